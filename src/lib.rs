//! ditto-importer
//!
//! Ditto のプロジェクトから翻訳を取得し、バリアントごとの JSON / TypeScript ファイルとして書き出す

pub mod cli;
pub mod config;
pub mod import;
pub mod output;
pub mod remote;
pub mod tree;
pub mod types;

#[cfg(test)]
mod test_utils;

pub use import::Importer;
pub use remote::DittoClient;
