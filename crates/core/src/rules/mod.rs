//! Rule configuration and the helpers the evaluators share.
//!
//! Rules are authored in the panel editor and owned by the host; the engine
//! only reads them. Nothing here touches samples beyond single-value
//! comparisons.

pub mod pattern;
pub mod threshold;
pub mod types;
pub mod validate;

pub use pattern::{resolve_alias, Pattern, SeriesMatcher};
pub use threshold::{compare_values, parse_threshold};
pub use types::{
    ComparisonOperator, CustomThreshold, DisplayMode, LogicExpression, NumberMode, Rule,
    SeverityThresholds, ShowMode, StringMode, ThresholdSource,
};
pub use validate::validate_rules;

/// Sort rules by ascending `order`, keeping input order for equal values.
pub(crate) fn in_order(rules: &[Rule]) -> Vec<&Rule> {
    let mut sorted: Vec<&Rule> = rules.iter().collect();
    sorted.sort_by_key(|r| r.order);
    sorted
}
