//! 設定管理を行うモジュール

use std::path::{
    Path,
    PathBuf,
};

use super::{
    ConfigError,
    ImportSettings,
    ProjectConfig,
    loader,
};

/// 設定管理を行う
#[derive(Debug, Clone)]
pub struct ConfigManager {
    /// 現在の設定
    current_settings: ImportSettings,

    /// ワークスペースのルートパス（出力先の基準ディレクトリ）
    workspace_root: PathBuf,
}

impl ConfigManager {
    /// 読み込み済みの設定から作成
    #[must_use]
    pub const fn new(settings: ImportSettings, workspace_root: PathBuf) -> Self {
        Self { current_settings: settings, workspace_root }
    }

    /// 設定を読み込む
    ///
    /// # Arguments
    /// * `workspace_root` - ワークスペースのルートパス
    /// * `config_path` - 設定ファイルのパス（`None` の場合は `ditto-import-conf.json`）
    ///
    /// # Errors
    /// - ファイル読み込みエラー
    /// - JSON パースエラー
    pub fn load(workspace_root: PathBuf, config_path: Option<&Path>) -> Result<Self, ConfigError> {
        tracing::debug!("Loading settings for workspace: {:?}", workspace_root);

        let path = loader::resolve_config_path(&workspace_root, config_path);
        let settings = loader::load_from_file(&path)?;
        tracing::debug!("Settings loaded successfully: {:?}", settings);

        Ok(Self::new(settings, workspace_root))
    }

    /// 現在の設定を取得
    #[must_use]
    pub const fn get_settings(&self) -> &ImportSettings {
        &self.current_settings
    }

    /// ワークスペースルートを取得
    #[must_use]
    pub fn workspace_root(&self) -> &Path {
        &self.workspace_root
    }

    /// インポート対象のプロジェクトを選択する
    ///
    /// `filter` が指定された場合は id または name が一致する最初のプロジェクトのみを返す
    ///
    /// # Errors
    /// - `filter` に一致するプロジェクトが無い場合
    pub fn select_projects(&self, filter: Option<&str>) -> Result<Vec<&ProjectConfig>, ConfigError> {
        let projects = &self.current_settings.projects;

        let Some(filter) = filter else {
            return Ok(projects.iter().collect());
        };

        projects
            .iter()
            .find(|project| project.matches(filter))
            .map(|project| vec![project])
            .ok_or_else(|| ConfigError::UnknownProject(filter.to_string()))
    }
}
