//! Threshold text parsing and show-mode comparisons.

use crate::sample::SampleValue;

use super::types::ComparisonOperator;

/// Parse the leading number of a threshold text.
///
/// Mirrors how dashboard editors read numeric inputs: leading whitespace is
/// skipped, trailing garbage after a valid number is ignored (`"80%"` is 80),
/// and `Infinity` is accepted. Returns `None` when there is no numeric
/// prefix, which includes the empty string.
pub fn parse_threshold(text: &str) -> Option<f64> {
    let s = text.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    if s[end..].starts_with("Infinity") {
        let inf = f64::INFINITY;
        return Some(if bytes[0] == b'-' { -inf } else { inf });
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        end = frac_end;
    }
    if digits == 0 {
        return None;
    }

    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse().ok()
}

/// Apply a show-mode comparison between a sample value and the configured
/// operand.
///
/// Both sides are compared as numbers when both read as numbers; otherwise
/// `eq`/`ne` compare the text forms and the ordering operators are false.
pub fn compare_values(value: &SampleValue, operand: &str, operator: ComparisonOperator) -> bool {
    let numeric = match value {
        SampleValue::Number(n) => Some(*n),
        SampleValue::Text(t) => t.trim().parse::<f64>().ok(),
    };
    let operand_numeric = operand.trim().parse::<f64>().ok();

    match (numeric, operand_numeric) {
        (Some(v), Some(o)) => match operator {
            ComparisonOperator::Eq => v == o,
            ComparisonOperator::Ne => v != o,
            ComparisonOperator::Ge => v >= o,
            ComparisonOperator::Lt => v < o,
        },
        _ => {
            let text = value.to_string();
            match operator {
                ComparisonOperator::Eq => text == operand,
                ComparisonOperator::Ne => text != operand,
                ComparisonOperator::Ge | ComparisonOperator::Lt => false,
            }
        }
    }
}
