//! Configuration management for notepub.
//!
//! Parses `notepub.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `notion.base_url`
//! - `notion.api_version`
//! - `notion.database_id`
//! - `notion.token`

mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override target database ID.
    pub database_id: Option<String>,
    /// Override integration token.
    pub token: Option<String>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "notepub.toml";

/// Default Notion API base URL.
const DEFAULT_BASE_URL: &str = "https://api.notion.com/v1";

/// Pinned Notion API version.
const DEFAULT_API_VERSION: &str = "2022-06-28";

/// Database the analysis page is published into when nothing else is configured.
const DEFAULT_DATABASE_ID: &str = "20ede957-d4e5-8033-b64d-fb4f53111611";

/// Default HTTP timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Upper bound for `notion.timeout_secs`.
const MAX_TIMEOUT_SECS: u64 = 600;

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Notion API configuration.
    pub notion: NotionConfig,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Notion API configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct NotionConfig {
    /// API base URL, without the trailing `/pages`.
    pub base_url: String,
    /// Value sent in the `Notion-Version` header.
    pub api_version: String,
    /// Target database ID.
    pub database_id: String,
    /// Integration token. Usually `${NOTION_TOKEN}`.
    pub token: Option<String>,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for NotionConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            api_version: DEFAULT_API_VERSION.to_owned(),
            database_id: DEFAULT_DATABASE_ID.to_owned(),
            token: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl NotionConfig {
    /// Validate that all required fields are properly set.
    ///
    /// The token is not checked here: it may still come from the CLI or a prompt.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any field is empty or has invalid format.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.base_url, "notion.base_url")?;
        require_http_url(&self.base_url, "notion.base_url")?;
        require_non_empty(&self.api_version, "notion.api_version")?;
        require_non_empty(&self.database_id, "notion.database_id")?;

        if self.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "notion.timeout_secs must be greater than 0".to_owned(),
            ));
        }
        if self.timeout_secs > MAX_TIMEOUT_SECS {
            return Err(ConfigError::Validation(format!(
                "notion.timeout_secs cannot exceed {MAX_TIMEOUT_SECS}"
            )));
        }

        Ok(())
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`notion.token`").
        field: String,
        /// Error message (e.g., "${`NOTION_TOKEN`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a URL field to use http:// or https:// scheme.
fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `notepub.toml` in current directory and parents,
    /// falling back to built-in defaults.
    ///
    /// CLI settings are applied after loading, allowing CLI arguments to take
    /// precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the resulting configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        config.validate()?;

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(database_id) = &settings.database_id {
            self.notion.database_id.clone_from(database_id);
        }
        if let Some(token) = &settings.token {
            self.notion.token = Some(token.clone());
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let current = std::env::current_dir().ok()?;
        Self::discover_from(&current)
    }

    /// Search for config file starting at `start` and walking up.
    fn discover_from(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;
        config.config_path = Some(path.to_path_buf());

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically by [`Config::load`].
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.notion.validate()
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        let notion = &mut self.notion;
        notion.base_url = expand::expand_env(&notion.base_url, "notion.base_url")?;
        notion.api_version = expand::expand_env(&notion.api_version, "notion.api_version")?;
        notion.database_id = expand::expand_env(&notion.database_id, "notion.database_id")?;
        if let Some(ref token) = notion.token {
            notion.token = Some(expand::expand_env(token, "notion.token")?);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, content: &str) -> PathBuf {
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.notion.base_url, "https://api.notion.com/v1");
        assert_eq!(config.notion.api_version, "2022-06-28");
        assert_eq!(
            config.notion.database_id,
            "20ede957-d4e5-8033-b64d-fb4f53111611"
        );
        assert_eq!(config.notion.token, None);
        assert_eq!(config.notion.timeout_secs, 30);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.notion.base_url, "https://api.notion.com/v1");
        assert_eq!(config.notion.timeout_secs, 30);
    }

    #[test]
    fn test_parse_notion_config() {
        let toml = r#"
[notion]
base_url = "http://localhost:8080/v1"
api_version = "2025-09-03"
database_id = "abc"
token = "secret_xyz"
timeout_secs = 5
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.notion.base_url, "http://localhost:8080/v1");
        assert_eq!(config.notion.api_version, "2025-09-03");
        assert_eq!(config.notion.database_id, "abc");
        assert_eq!(config.notion.token.as_deref(), Some("secret_xyz"));
        assert_eq!(config.notion.timeout_secs, 5);
    }

    #[test]
    fn test_parse_partial_notion_config_keeps_defaults() {
        let toml = r#"
[notion]
database_id = "abc"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.notion.database_id, "abc");
        assert_eq!(config.notion.api_version, "2022-06-28");
    }

    #[test]
    fn test_parse_unknown_type_fails() {
        let toml = r#"
[notion]
timeout_secs = "thirty"
"#;
        assert!(toml::from_str::<Config>(toml).is_err());
    }

    #[test]
    fn test_validate_rejects_non_http_base_url() {
        let mut config = Config::default();
        config.notion.base_url = "ftp://api.notion.com".to_owned();
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Validation(msg) if msg.contains("notion.base_url")));
    }

    #[test]
    fn test_validate_rejects_empty_database_id() {
        let mut config = Config::default();
        config.notion.database_id = String::new();
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Validation(msg) if msg.contains("notion.database_id")));
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let mut config = Config::default();
        config.notion.timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_huge_timeout() {
        let mut config = Config::default();
        config.notion.timeout_secs = 3600;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_explicit_missing_file() {
        let err = Config::load(Some(Path::new("/nonexistent/notepub.toml")), None).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_load_explicit_file() {
        let dir = TempDir::new().unwrap();
        let path = write_config(
            &dir,
            r#"
[notion]
database_id = "from-file"
"#,
        );

        let config = Config::load(Some(&path), None).unwrap();
        assert_eq!(config.notion.database_id, "from-file");
        assert_eq!(config.config_path, Some(path));
    }

    #[test]
    fn test_load_with_default_expansion() {
        let dir = TempDir::new().unwrap();
        let path = write_config(
            &dir,
            r#"
[notion]
database_id = "${NOTEPUB_TEST_SURELY_UNSET_DB:-fallback-db}"
"#,
        );

        let config = Config::load(Some(&path), None).unwrap();
        assert_eq!(config.notion.database_id, "fallback-db");
    }

    #[test]
    fn test_load_with_unset_token_variable_fails() {
        let dir = TempDir::new().unwrap();
        let path = write_config(
            &dir,
            r#"
[notion]
token = "${NOTEPUB_TEST_SURELY_UNSET_TOKEN}"
"#,
        );

        let err = Config::load(Some(&path), None).unwrap_err();
        assert!(matches!(err, ConfigError::EnvVar { field, .. } if field == "notion.token"));
    }

    #[test]
    fn test_cli_settings_override_file() {
        let dir = TempDir::new().unwrap();
        let path = write_config(
            &dir,
            r#"
[notion]
database_id = "from-file"
token = "secret_file"
"#,
        );
        let settings = CliSettings {
            database_id: Some("from-cli".to_owned()),
            token: Some("secret_cli".to_owned()),
        };

        let config = Config::load(Some(&path), Some(&settings)).unwrap();
        assert_eq!(config.notion.database_id, "from-cli");
        assert_eq!(config.notion.token.as_deref(), Some("secret_cli"));
    }

    #[test]
    fn test_cli_settings_are_validated() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "");
        let settings = CliSettings {
            database_id: Some(String::new()),
            ..Default::default()
        };

        assert!(Config::load(Some(&path), Some(&settings)).is_err());
    }

    #[test]
    fn test_discover_from_parent_directory() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "");
        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();

        assert_eq!(Config::discover_from(&nested), Some(path));
    }
}
