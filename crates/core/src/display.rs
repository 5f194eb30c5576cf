//! Display line building.
//!
//! Walks rules and samples independently of status evaluation. Each
//! rule x matching sample pair that passes the rule's display gate yields
//! one line, in rule order and then sample order.

use serde::{Deserialize, Serialize};

use crate::rules::{compare_values, in_order, resolve_alias, DisplayMode, Rule, SeriesMatcher};
use crate::sample::MetricSample;
use crate::status::evaluate_sample;
use crate::units::{format_value, DEFAULT_DECIMALS};

/// One text line of the panel body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayLine {
    pub text: String,
    /// Rule description shown on hover; empty when the rule has none.
    pub tooltip: String,
}

/// Build the panel body lines for one evaluation pass.
pub fn build_lines(samples: &[MetricSample], rules: &[Rule]) -> Vec<DisplayLine> {
    let mut lines = Vec::new();

    for rule in in_order(rules) {
        let matcher = SeriesMatcher::new(&rule.series_match);
        for sample in samples.iter().filter(|s| matcher.is_match(&s.label)) {
            if let Some(line) = build_line(sample, rule) {
                lines.push(line);
            }
        }
    }

    lines
}

fn build_line(sample: &MetricSample, rule: &Rule) -> Option<DisplayLine> {
    if rule.gates_on_threshold() && evaluate_sample(sample, rule).is_ok() {
        return None;
    }
    if let DisplayMode::Show(mode) = &rule.mode {
        if let Some(logic) = &mode.logic {
            if !compare_values(&sample.value, &logic.value, logic.operator) {
                return None;
            }
        }
    }
    if !rule.show_name && !rule.show_value {
        return None;
    }

    let mut text = String::new();
    if rule.show_name {
        match rule.alias() {
            Some(alias) => text.push_str(resolve_alias(alias, &sample.label)),
            None => text.push_str(&sample.label),
        }
    }
    if rule.show_name && rule.show_value {
        text.push_str(": ");
    }
    if rule.show_value {
        text.push_str(&value_text(sample, rule));
    }

    Some(DisplayLine {
        text,
        tooltip: rule.description().unwrap_or_default().to_string(),
    })
}

/// Custom unit formatting when the rule asks for it, then the host's
/// formatted string, then the raw value.
fn value_text(sample: &MetricSample, rule: &Rule) -> String {
    if rule.use_custom_formatting {
        if let Some(unit) = rule.unit_format() {
            let decimals = rule.decimals.unwrap_or(DEFAULT_DECIMALS);
            match format_value(unit, &sample.value, decimals) {
                Ok(text) => return text,
                Err(e) => tracing::warn!(
                    rule = rule.order,
                    label = %sample.label,
                    unit,
                    error = %e,
                    "Custom value formatting failed, using default formatting",
                ),
            }
        }
    }

    if sample.value_formatted.is_empty() {
        sample.value.to_string()
    } else {
        sample.value_formatted.clone()
    }
}
