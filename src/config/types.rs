use std::fmt;

use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

/// Environment variable holding the Ditto API key.
pub const API_KEY_VARIABLE: &str = "DITTO_API_KEY";

/// Environment variable overriding the Ditto API base URL.
pub const API_URL_VARIABLE: &str = "DITTO_API_URL";

/// Base variant used when neither the project nor the config root names one.
pub const DEFAULT_BASE_VARIANT: &str = "base";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("DITTO_API_KEY variable not found! Please set it before importing.")]
    MissingApiKey,

    #[error("No configuration for project {0} was found!")]
    UnknownProject(String),

    #[error("Failed to load configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// Contents of `ditto-import-conf.json`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ImportSettings {
    pub projects: Vec<ProjectConfig>,

    /// Fallback for projects that do not set their own base variant.
    #[serde(default = "default_base_variant", alias = "baseVariant")]
    pub base_variant: String,
}

fn default_base_variant() -> String {
    DEFAULT_BASE_VARIANT.to_string()
}

/// One Ditto project to import.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ProjectConfig {
    pub id: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Output path template. `__variant` is replaced with the variant name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,

    #[serde(alias = "baseVariant", skip_serializing_if = "Option::is_none")]
    pub base_variant: Option<String>,
}

impl ProjectConfig {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into(), name: None, destination: None, base_variant: None }
    }

    /// Name if configured, otherwise the project id.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }

    /// Whether the project is selected by a `project=<id-or-name>` filter.
    #[must_use]
    pub fn matches(&self, filter: &str) -> bool {
        self.id == filter || self.name.as_deref() == Some(filter)
    }
}

impl ImportSettings {
    /// Base variant of `project`, falling back to the config-wide one.
    #[must_use]
    pub fn base_variant_for<'a>(&'a self, project: &'a ProjectConfig) -> &'a str {
        project.base_variant.as_deref().unwrap_or(&self.base_variant)
    }
}

/// Ditto API key, sent verbatim in the `Authorization` header.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Reads the key from [`API_KEY_VARIABLE`].
    ///
    /// # Errors
    /// Returns `ConfigError::MissingApiKey` if the variable is unset or empty.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_value(std::env::var(API_KEY_VARIABLE).ok())
    }

    /// # Errors
    /// Returns `ConfigError::MissingApiKey` if `value` is `None` or blank.
    pub fn from_value(value: Option<String>) -> Result<Self, ConfigError> {
        match value {
            Some(key) if !key.trim().is_empty() => Ok(Self(key)),
            _ => Err(ConfigError::MissingApiKey),
        }
    }

    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}
