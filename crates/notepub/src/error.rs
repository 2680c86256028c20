//! CLI error types.

use notepub_config::ConfigError;
use notepub_notion::NotionError;
use notepub_notion::error::TokenError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Notion(#[from] NotionError),

    #[error("Invalid token: {0}")]
    Credential(#[from] TokenError),

    #[error("{0}")]
    Json(#[from] serde_json::Error),
}
