//! Status overview rule evaluation engine.
//!
//! Maps a flat list of named metric samples and an ordered rule set to a
//! single worst [`PanelState`], the colors to paint it with, and the text
//! lines shown in the panel body. All logic here is pure: no I/O, no
//! global state. Hosts own the rule configuration, the palette and the
//! [`BlinkTracker`].

pub mod advisory;
pub mod blink;
pub mod color;
pub mod display;
pub mod error;
pub mod rules;
pub mod sample;
pub mod severity;
pub mod status;
pub mod types;
pub mod units;

pub use advisory::{
    duplicate_labels, report_duplicate_labels, Advisory, AdvisorySink, DuplicateLabel,
    TracingSink,
};
pub use blink::{did_worsen, BlinkTracker};
pub use color::{color_for_state, color_for_state_name, resolve_color, ColorPair, Palette};
pub use display::{build_lines, DisplayLine};
pub use error::CoreError;
pub use rules::{
    compare_values, parse_threshold, validate_rules, ComparisonOperator, CustomThreshold,
    DisplayMode, LogicExpression, NumberMode, Pattern, Rule, SeriesMatcher, SeverityThresholds,
    ShowMode, StringMode, ThresholdSource,
};
pub use sample::{round_value, MetricSample, SampleValue, ValueKind};
pub use severity::{PanelState, Severity};
pub use status::{evaluate, evaluate_sample, CustomColor, ResolvedStatus};
pub use types::PanelId;
pub use units::{format_value, FormatError};
