//! Importer configuration: project list, base variant and API credential.
/// Config file loader
mod loader;
/// Configuration manager
mod manager;
/// Configuration types and settings
mod types;

pub use loader::CONFIG_FILE_NAME;
pub use manager::ConfigManager;
pub use types::{
    API_KEY_VARIABLE,
    API_URL_VARIABLE,
    ApiKey,
    ConfigError,
    DEFAULT_BASE_VARIANT,
    ImportSettings,
    ProjectConfig,
};
