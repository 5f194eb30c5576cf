//! Editor-side rule set checks.
//!
//! Evaluation tolerates every problem reported here (it degrades the single
//! rule instead); validation exists so editors and config loaders can tell
//! the author about it.

use std::collections::HashSet;

use crate::error::CoreError;
use crate::units::{is_supported_unit, MAX_DECIMALS};

use super::pattern::Pattern;
use super::types::{DisplayMode, Rule};

/// Check a rule set for authoring mistakes. Returns the first problem found.
pub fn validate_rules(rules: &[Rule]) -> Result<(), CoreError> {
    let mut seen = HashSet::new();

    for rule in rules {
        if !seen.insert(rule.order) {
            return Err(CoreError::DuplicateRuleOrder { order: rule.order });
        }

        Pattern::compile(&rule.series_match).map_err(|source| CoreError::InvalidPattern {
            order: rule.order,
            pattern: rule.series_match.clone(),
            source,
        })?;

        if let DisplayMode::Number(mode) = &rule.mode {
            if let Some(unknown) = mode.custom_thresholds.iter().find(|t| t.severity().is_none()) {
                return Err(CoreError::UnknownSeverity {
                    order: rule.order,
                    name: unknown.name.clone(),
                });
            }
        }

        if let Some(decimals) = rule.decimals {
            if !(0..=MAX_DECIMALS).contains(&decimals) {
                return Err(CoreError::Validation(format!(
                    "rule {}: decimals must be between 0 and {MAX_DECIMALS}, got {decimals}",
                    rule.order
                )));
            }
        }

        if rule.use_custom_formatting {
            if let Some(unit) = rule.unit_format() {
                if !is_supported_unit(unit) {
                    return Err(CoreError::Validation(format!(
                        "rule {}: unknown unit format '{unit}'",
                        rule.order
                    )));
                }
            }
        }
    }

    Ok(())
}
