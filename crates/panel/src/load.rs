//! Reading panel options and sample snapshots from JSON files.

use std::path::Path;

use serde::de::DeserializeOwned;
use status_overview_core::MetricSample;
use validator::Validate;

use crate::error::PanelError;
use crate::options::PanelOptions;

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, PanelError> {
    let raw = std::fs::read_to_string(path).map_err(|source| PanelError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| PanelError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Load panel options and check their ranges. Rule-set problems are left
/// to the render pass, which degrades the affected rule.
pub fn load_options(path: &Path) -> Result<PanelOptions, PanelError> {
    let options: PanelOptions = read_json(path)?;
    options.validate()?;
    tracing::debug!(
        path = %path.display(),
        rules = options.rules().len(),
        "Loaded panel options",
    );
    Ok(options)
}

/// Load a snapshot of samples (a JSON array).
pub fn load_samples(path: &Path) -> Result<Vec<MetricSample>, PanelError> {
    let samples: Vec<MetricSample> = read_json(path)?;
    tracing::debug!(path = %path.display(), samples = samples.len(), "Loaded samples");
    Ok(samples)
}
