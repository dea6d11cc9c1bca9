//! 設定ファイルの読み込み関数

use std::path::{
    Path,
    PathBuf,
};

use super::{
    ConfigError,
    ImportSettings,
};

/// ワークスペース直下の設定ファイル名
pub const CONFIG_FILE_NAME: &str = "ditto-import-conf.json";

/// 設定ファイルのパスを解決する
///
/// `explicit_path` が相対パスの場合はワークスペースからの相対パスとして扱う
pub(super) fn resolve_config_path(workspace_root: &Path, explicit_path: Option<&Path>) -> PathBuf {
    explicit_path.map_or_else(
        || workspace_root.join(CONFIG_FILE_NAME),
        |path| workspace_root.join(path),
    )
}

/// 設定ファイルを読み込む
///
/// # Arguments
/// * `config_path` - 設定ファイルのパス
///
/// # Errors
/// - ファイル読み込みエラー（ファイルが存在しない場合も含む）
/// - JSON パースエラー
pub(super) fn load_from_file(config_path: &Path) -> Result<ImportSettings, ConfigError> {
    tracing::debug!("Loading configuration from: {:?}", config_path);

    let content = std::fs::read_to_string(config_path)?;
    let settings: ImportSettings = serde_json::from_str(&content)?;

    Ok(settings)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use std::fs;

    use rstest::rstest;
    use tempfile::TempDir;

    use super::*;

    /// `load_from_file`: 設定ファイルが存在する場合
    #[rstest]
    fn test_load_from_file_with_valid_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_content = r#"{"base_variant": "en", "projects": [{"id": "p1"}]}"#;
        fs::write(temp_dir.path().join(CONFIG_FILE_NAME), config_content).unwrap();

        let result = load_from_file(&resolve_config_path(temp_dir.path(), None));

        assert!(result.is_ok());
        let settings = result.unwrap();
        assert_eq!(settings.base_variant, "en");
        assert_eq!(settings.projects[0].id, "p1");
    }

    /// `load_from_file`: 設定ファイルが存在しない場合はエラー
    #[rstest]
    fn test_load_from_file_no_config_file() {
        let temp_dir = TempDir::new().unwrap();

        let result = load_from_file(&resolve_config_path(temp_dir.path(), None));

        assert!(matches!(result, Err(ConfigError::IoError(_))));
    }

    /// `load_from_file`: JSON パースエラー
    #[rstest]
    fn test_load_from_file_invalid_json() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join(CONFIG_FILE_NAME), "invalid json").unwrap();

        let result = load_from_file(&resolve_config_path(temp_dir.path(), None));

        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[rstest]
    #[case::default(None, "/work/ditto-import-conf.json")]
    #[case::relative(Some("conf/ditto.json"), "/work/conf/ditto.json")]
    #[case::absolute(Some("/etc/ditto.json"), "/etc/ditto.json")]
    fn test_resolve_config_path(#[case] explicit: Option<&str>, #[case] expected: &str) {
        let resolved = resolve_config_path(Path::new("/work"), explicit.map(Path::new));

        assert_eq!(resolved, PathBuf::from(expected));
    }
}
