//! テスト用ユーティリティ関数
//!
//! 複数のテストモジュールで使用される共通のヘルパー関数を提供します。
#![cfg(test)]

use std::collections::HashMap;

use reqwest::StatusCode;

use crate::remote::{
    FetchError,
    ProjectFetcher,
};
use crate::types::{
    ProjectTranslations,
    TranslationKeyEntry,
};

/// 固定のレスポンスを返す `ProjectFetcher`
///
/// 登録されていないプロジェクト id には 404 を返す
#[derive(Debug, Default)]
pub(crate) struct StaticFetcher {
    /// プロジェクト id → レスポンス
    projects: HashMap<String, ProjectTranslations>,
}

impl StaticFetcher {
    /// レスポンスを登録する
    pub(crate) fn with_project(mut self, id: &str, translations: ProjectTranslations) -> Self {
        self.projects.insert(id.to_string(), translations);
        self
    }
}

impl ProjectFetcher for StaticFetcher {
    async fn fetch_project(&self, project_id: &str) -> Result<ProjectTranslations, FetchError> {
        self.projects.get(project_id).cloned().ok_or_else(|| FetchError::Status {
            status: StatusCode::NOT_FOUND,
            body: format!("project {project_id} not found"),
        })
    }
}

/// `greeting.hello` に `formal` バリアントを持つレスポンスを作成する
pub(crate) fn greeting_translations() -> ProjectTranslations {
    let mut translations = ProjectTranslations::new();
    translations.insert(
        "greeting.hello".to_string(),
        TranslationKeyEntry::new("Hi").with_variant("formal", "Good day"),
    );
    translations
}
