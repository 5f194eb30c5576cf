//! Metric samples handed to the engine by the data normalizer.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Default rounding precision applied by normalizers before evaluation.
pub const DEFAULT_SAMPLE_DECIMALS: u32 = 4;

/// Raw value of a reduced series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SampleValue {
    Number(f64),
    Text(String),
}

impl SampleValue {
    /// The numeric value, if this is a number. Text is never coerced.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            SampleValue::Number(n) => Some(*n),
            SampleValue::Text(_) => None,
        }
    }
}

impl fmt::Display for SampleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SampleValue::Number(n) if n.is_infinite() => {
                f.write_str(if *n > 0.0 { "Infinity" } else { "-Infinity" })
            }
            SampleValue::Number(n) if n.is_nan() => f.write_str("NaN"),
            SampleValue::Number(n) => f.write_str(&number_text(*n)),
            SampleValue::Text(s) => f.write_str(s),
        }
    }
}

/// Shortest round-trip text for a finite number, in the notation dashboards
/// use for raw values: plain decimals while the decimal point sits within
/// 21 digits and no more than 6 places after it, exponent form outside that
/// (`1e+21`, `1.5e-7`). Negative zero prints as `0`.
fn number_text(n: f64) -> String {
    if n == 0.0 {
        return "0".to_string();
    }

    // `{:e}` gives the shortest digits, e.g. "1.2345e3".
    let sci = format!("{:e}", n.abs());
    let (mantissa, exp) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();
    let exp: i32 = exp.parse().unwrap_or(0);
    let len = digits.len() as i32;
    // Position of the decimal point relative to the first digit.
    let point = exp + 1;

    let body = if len <= point && point <= 21 {
        format!("{digits}{}", "0".repeat((point - len) as usize))
    } else if 0 < point && point <= 21 {
        let (int, frac) = digits.split_at(point as usize);
        format!("{int}.{frac}")
    } else if -6 < point && point <= 0 {
        format!("0.{}{digits}", "0".repeat((-point) as usize))
    } else {
        let sign = if exp < 0 { '-' } else { '+' };
        let (first, rest) = digits.split_at(1);
        if rest.is_empty() {
            format!("{first}e{sign}{}", exp.abs())
        } else {
            format!("{first}.{rest}e{sign}{}", exp.abs())
        }
    };

    if n < 0.0 {
        format!("-{body}")
    } else {
        body
    }
}

impl From<f64> for SampleValue {
    fn from(value: f64) -> Self {
        SampleValue::Number(value)
    }
}

impl From<&str> for SampleValue {
    fn from(value: &str) -> Self {
        SampleValue::Text(value.to_string())
    }
}

/// The field type the value was reduced from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    #[default]
    Number,
    String,
    Time,
}

/// One named scalar produced per series for a single evaluation pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricSample {
    pub label: String,
    pub value: SampleValue,
    /// Host-formatted rendering of `value`; empty when the host has none.
    #[serde(default)]
    pub value_formatted: String,
    #[serde(default)]
    pub kind: ValueKind,
}

impl MetricSample {
    pub fn new(label: impl Into<String>, value: impl Into<SampleValue>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            value_formatted: String::new(),
            kind: ValueKind::Number,
        }
    }

    pub fn with_formatted(mut self, formatted: impl Into<String>) -> Self {
        self.value_formatted = formatted.into();
        self
    }

    pub fn with_kind(mut self, kind: ValueKind) -> Self {
        self.kind = kind;
        self
    }
}

/// Round `value` to at most `decimals` fractional digits.
pub fn round_value(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}
