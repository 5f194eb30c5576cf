use std::path::PathBuf;

use status_overview_core::CoreError;

#[derive(Debug, thiserror::Error)]
pub enum PanelError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize panel view: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("Invalid panel options: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error(transparent)]
    Core(#[from] CoreError),
}
