use std::path::PathBuf;
use std::str::FromStr;

use status_overview_core::PanelId;

use crate::error::PanelError;

const DEFAULT_PANEL_ID: PanelId = 1;

/// How the binary prints the rendered panel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Json,
    Text,
}

impl FromStr for OutputFormat {
    type Err = PanelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "text" => Ok(OutputFormat::Text),
            other => Err(PanelError::Config(format!(
                "PANEL_OUTPUT must be 'json' or 'text', got '{other}'"
            ))),
        }
    }
}

/// Whether a `LOG_FORMAT` value selects JSON log lines. Anything else,
/// including an unset variable, keeps the human-readable format.
pub fn json_logs(log_format: Option<&str>) -> bool {
    log_format.is_some_and(|v| v.trim().eq_ignore_ascii_case("json"))
}

/// Binary configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct PanelConfig {
    pub options_path: PathBuf,
    pub samples_path: PathBuf,
    pub panel_id: PanelId,
    pub output: OutputFormat,
}

impl PanelConfig {
    /// Load configuration from the process environment.
    ///
    /// | Env Var              | Required | Default |
    /// |----------------------|----------|---------|
    /// | `PANEL_OPTIONS_PATH` | yes      | --      |
    /// | `SAMPLES_PATH`       | yes      | --      |
    /// | `PANEL_ID`           | no       | `1`     |
    /// | `PANEL_OUTPUT`       | no       | `json`  |
    pub fn from_env() -> Result<Self, PanelError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an explicit variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, PanelError> {
        let required = |key: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| PanelError::Config(format!("{key} environment variable is required")))
        };

        let options_path = PathBuf::from(required("PANEL_OPTIONS_PATH")?);
        let samples_path = PathBuf::from(required("SAMPLES_PATH")?);

        let panel_id = match lookup("PANEL_ID") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| PanelError::Config("PANEL_ID must be a valid integer".into()))?,
            None => DEFAULT_PANEL_ID,
        };

        let output = match lookup("PANEL_OUTPUT") {
            Some(raw) => raw.parse()?,
            None => OutputFormat::default(),
        };

        Ok(Self {
            options_path,
            samples_path,
            panel_id,
            output,
        })
    }
}
