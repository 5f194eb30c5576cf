//! Status overview panel: options, one-pass rendering and the file-driven
//! runner behind the `status-overview` binary.

pub mod config;
pub mod error;
pub mod load;
pub mod options;
pub mod render;
pub mod runner;

pub use config::{json_logs, OutputFormat, PanelConfig};
pub use error::PanelError;
pub use load::{load_options, load_samples};
pub use options::{LayoutMode, PanelOptions, RuleConfig, StatePanelMode};
pub use render::{render_panel, PanelLayout, PanelTitle, PanelView};
pub use runner::run_once;
