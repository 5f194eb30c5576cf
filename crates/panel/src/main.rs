//! `status-overview` -- render a status overview panel from files.
//!
//! Reads panel options and a sample snapshot, runs one evaluation pass and
//! prints the rendered panel to stdout.
//!
//! # Environment variables
//!
//! | Variable             | Required | Default | Description                      |
//! |----------------------|----------|---------|----------------------------------|
//! | `PANEL_OPTIONS_PATH` | yes      | --      | Panel options JSON               |
//! | `SAMPLES_PATH`       | yes      | --      | JSON array of metric samples     |
//! | `PANEL_ID`           | no       | `1`     | Panel instance id                |
//! | `PANEL_OUTPUT`       | no       | `json`  | `json` or `text`                 |
//! | `LOG_FORMAT`         | no       | `text`  | `json` for structured log lines  |

use status_overview_panel::{json_logs, run_once, PanelConfig};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    dotenvy::dotenv().ok();

    let json = json_logs(std::env::var("LOG_FORMAT").ok().as_deref());

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "status_overview=info".into()),
        )
        .with(json.then(|| {
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(std::io::stderr)
        }))
        .with((!json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr)))
        .init();

    let config = PanelConfig::from_env().unwrap_or_else(|e| {
        tracing::error!(error = %e, "Invalid configuration");
        std::process::exit(1);
    });

    tracing::info!(
        panel_id = config.panel_id,
        options = %config.options_path.display(),
        samples = %config.samples_path.display(),
        "Rendering panel",
    );

    match run_once(&config) {
        Ok(output) => println!("{output}"),
        Err(e) => {
            tracing::error!(error = %e, "Panel render failed");
            std::process::exit(1);
        }
    }
}
