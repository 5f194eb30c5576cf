//! Value formatting for the unit ids offered by the rule editor.
//!
//! Only custom per-rule formatting goes through here; the host-supplied
//! `value_formatted` string is used as is.

use chrono::DateTime;

use crate::sample::SampleValue;

/// Upper bound for the configurable number of decimals.
pub const MAX_DECIMALS: i32 = 20;

/// Decimals used when a rule enables custom formatting without setting any.
pub const DEFAULT_DECIMALS: i32 = 2;

/// Every unit id [`format_value`] understands.
pub const SUPPORTED_UNITS: &[&str] = &[
    "none",
    "short",
    "percent",
    "percentunit",
    "bytes",
    "bits",
    "kbytes",
    "mbytes",
    "gbytes",
    "s",
    "ms",
    "dtdurations",
    "dthms",
    "ops",
    "rps",
    "wps",
    "iops",
    "celsius",
    "fahrenheit",
    "hex",
    "string",
    "dateTimeAsIso",
    "dateTimeAsUS",
];

const SHORT_SUFFIXES: &[&str] = &[
    "", " K", " Mil", " Bil", " Tri", " Quadr", " Quint", " Sext", " Sept",
];
const BYTE_UNITS: &[&str] = &["B", "KiB", "MiB", "GiB", "TiB", "PiB", "EiB", "ZiB", "YiB"];
const BIT_UNITS: &[&str] = &["b", "Kib", "Mib", "Gib", "Tib", "Pib", "Eib", "Zib", "Yib"];
const COUNT_PREFIXES: &[&str] = &["", "K", "M", "B", "T"];

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FormatError {
    #[error("Unknown unit format '{0}'")]
    UnknownUnit(String),

    #[error("Decimals must be between 0 and {MAX_DECIMALS}, got {0}")]
    InvalidDecimals(i32),

    #[error("Unit '{unit}' needs a numeric value, got '{value}'")]
    NonNumeric { unit: String, value: String },

    #[error("Value {value} is out of range for unit '{unit}'")]
    OutOfRange { unit: String, value: f64 },
}

pub fn is_supported_unit(unit: &str) -> bool {
    SUPPORTED_UNITS.contains(&unit)
}

/// Format `value` in `unit` with `decimals` fractional digits.
pub fn format_value(unit: &str, value: &SampleValue, decimals: i32) -> Result<String, FormatError> {
    if !(0..=MAX_DECIMALS).contains(&decimals) {
        return Err(FormatError::InvalidDecimals(decimals));
    }
    let decimals = decimals as usize;

    if unit == "string" {
        return Ok(value.to_string());
    }
    if !is_supported_unit(unit) {
        return Err(FormatError::UnknownUnit(unit.to_string()));
    }
    let v = value.as_number().ok_or_else(|| FormatError::NonNumeric {
        unit: unit.to_string(),
        value: value.to_string(),
    })?;

    let text = match unit {
        "none" => to_fixed(v, decimals),
        "short" => scaled(v, decimals, 1000.0, SHORT_SUFFIXES, ""),
        "percent" => format!("{}%", to_fixed(v, decimals)),
        "percentunit" => format!("{}%", to_fixed(v * 100.0, decimals)),
        "bytes" => binary(v, decimals, BYTE_UNITS, 0),
        "kbytes" => binary(v, decimals, BYTE_UNITS, 1),
        "mbytes" => binary(v, decimals, BYTE_UNITS, 2),
        "gbytes" => binary(v, decimals, BYTE_UNITS, 3),
        "bits" => binary(v, decimals, BIT_UNITS, 0),
        "ops" => count(v, decimals, "ops"),
        "rps" => count(v, decimals, "req/s"),
        "wps" => count(v, decimals, "wr/s"),
        "iops" => count(v, decimals, "io/s"),
        "celsius" => format!("{}°C", to_fixed(v, decimals)),
        "fahrenheit" => format!("{}°F", to_fixed(v, decimals)),
        "s" => seconds(v, decimals),
        "ms" => milliseconds(v, decimals),
        "dtdurations" => duration_words(v, decimals),
        "dthms" => clock_duration(v),
        "hex" => hex(v, decimals),
        "dateTimeAsIso" => date_time(unit, v, "%Y-%m-%d %H:%M:%S")?,
        "dateTimeAsUS" => date_time(unit, v, "%m/%d/%Y %-I:%M:%S %P")?,
        other => return Err(FormatError::UnknownUnit(other.to_string())),
    };
    Ok(text)
}

fn to_fixed(v: f64, decimals: usize) -> String {
    if v.is_finite() {
        format!("{v:.decimals$}")
    } else {
        SampleValue::Number(v).to_string()
    }
}

/// Divide by `factor` until the value fits, then append the matching suffix.
fn scaled(v: f64, decimals: usize, factor: f64, suffixes: &[&str], separator: &str) -> String {
    let mut size = v;
    let mut step = 0;
    while size.abs() >= factor && step + 1 < suffixes.len() {
        size /= factor;
        step += 1;
    }
    format!("{}{separator}{}", to_fixed(size, decimals), suffixes[step])
}

fn binary(v: f64, decimals: usize, units: &[&str], offset: usize) -> String {
    scaled(v, decimals, 1024.0, &units[offset..], " ")
}

fn count(v: f64, decimals: usize, symbol: &str) -> String {
    format!("{} {symbol}", scaled(v, decimals, 1000.0, COUNT_PREFIXES, ""))
}

fn seconds(v: f64, decimals: usize) -> String {
    let abs = v.abs();
    if abs < 1.0 {
        return milliseconds(v * 1000.0, decimals);
    }
    let (amount, unit) = if abs < 60.0 {
        (v, "s")
    } else if abs < 3600.0 {
        (v / 60.0, "min")
    } else if abs < 86_400.0 {
        (v / 3600.0, "hour")
    } else if abs < 604_800.0 {
        (v / 86_400.0, "day")
    } else if abs < 31_536_000.0 {
        (v / 604_800.0, "week")
    } else {
        (v / 3.15569e7, "year")
    };
    format!("{} {unit}", to_fixed(amount, decimals))
}

fn milliseconds(v: f64, decimals: usize) -> String {
    let abs = v.abs();
    let (amount, unit) = if abs < 1000.0 {
        (v, "ms")
    } else if abs < 60_000.0 {
        (v / 1000.0, "s")
    } else if abs < 3_600_000.0 {
        (v / 60_000.0, "min")
    } else if abs < 86_400_000.0 {
        (v / 3_600_000.0, "hour")
    } else if abs < 31_536_000_000.0 {
        (v / 86_400_000.0, "day")
    } else {
        (v / 31_536_000_000.0, "year")
    };
    format!("{} {unit}", to_fixed(amount, decimals))
}

/// `"1 day, 2 hours"`: the most significant non-zero parts, as many as
/// `decimals` allows (at least one).
fn duration_words(v: f64, decimals: usize) -> String {
    const PARTS: &[(&str, u64)] = &[
        ("year", 31_536_000),
        ("day", 86_400),
        ("hour", 3_600),
        ("minute", 60),
        ("second", 1),
    ];
    if v < 0.0 {
        return format!("{} ago", duration_words(-v, decimals));
    }
    let mut remaining = v.floor() as u64;
    if remaining == 0 {
        return "0 seconds".to_string();
    }

    let limit = decimals.max(1);
    let mut words = Vec::new();
    for (name, size) in PARTS {
        if words.len() == limit {
            break;
        }
        let amount = remaining / size;
        if amount > 0 {
            let plural = if amount == 1 { "" } else { "s" };
            words.push(format!("{amount} {name}{plural}"));
            remaining %= size;
        } else if !words.is_empty() {
            // Parts are contiguous: never "1 day, 5 seconds".
            break;
        }
    }
    words.join(", ")
}

/// `"HH:MM:SS"`; hours are not wrapped into days.
fn clock_duration(v: f64) -> String {
    if v < 0.0 {
        return format!("{} ago", clock_duration(-v));
    }
    let total = v.floor() as u64;
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let secs = total % 60;
    format!("{hours:02}:{minutes:02}:{secs:02}")
}

fn hex(v: f64, decimals: usize) -> String {
    let rounded: f64 = to_fixed(v, decimals).parse().unwrap_or(v);
    let int = rounded.trunc() as i64;
    if int < 0 {
        format!("-{:X}", int.unsigned_abs())
    } else {
        format!("{int:X}")
    }
}

fn date_time(unit: &str, epoch_ms: f64, pattern: &str) -> Result<String, FormatError> {
    let out_of_range = || FormatError::OutOfRange {
        unit: unit.to_string(),
        value: epoch_ms,
    };
    if !epoch_ms.is_finite() {
        return Err(out_of_range());
    }
    let dt = DateTime::from_timestamp_millis(epoch_ms as i64).ok_or_else(out_of_range)?;
    Ok(dt.format(pattern).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn fmt(unit: &str, v: f64, decimals: i32) -> String {
        format_value(unit, &SampleValue::Number(v), decimals).unwrap()
    }

    #[test]
    fn plain_and_percent() {
        assert_eq!(fmt("none", 95.0, 2), "95.00");
        assert_eq!(fmt("percent", 42.345, 1), "42.3%");
        assert_eq!(fmt("percentunit", 0.5, 0), "50%");
    }

    #[test]
    fn short_scales_by_thousands() {
        assert_eq!(fmt("short", 999.0, 0), "999");
        assert_eq!(fmt("short", 1500.0, 1), "1.5 K");
        assert_eq!(fmt("short", 2_000_000.0, 0), "2 Mil");
    }

    #[test]
    fn bytes_scale_by_1024() {
        assert_eq!(fmt("bytes", 512.0, 0), "512 B");
        assert_eq!(fmt("bytes", 2048.0, 2), "2.00 KiB");
        assert_eq!(fmt("kbytes", 2048.0, 0), "2 MiB");
        assert_eq!(fmt("gbytes", 1.0, 1), "1.0 GiB");
        assert_eq!(fmt("bits", 1024.0, 0), "1 Kib");
    }

    #[test]
    fn throughput_counts() {
        assert_eq!(fmt("ops", 15.0, 2), "15.00 ops");
        assert_eq!(fmt("rps", 1500.0, 1), "1.5K req/s");
        assert_eq!(fmt("iops", 3_000_000.0, 0), "3M io/s");
    }

    #[test]
    fn temperatures() {
        assert_eq!(fmt("celsius", 21.456, 1), "21.5°C");
        assert_eq!(fmt("fahrenheit", 70.0, 0), "70°F");
    }

    #[test]
    fn time_units() {
        assert_eq!(fmt("s", 30.0, 0), "30 s");
        assert_eq!(fmt("s", 90.0, 1), "1.5 min");
        assert_eq!(fmt("s", 0.25, 0), "250 ms");
        assert_eq!(fmt("ms", 1500.0, 1), "1.5 s");
        assert_eq!(fmt("ms", 7_200_000.0, 0), "2 hour");
    }

    #[test]
    fn durations() {
        assert_eq!(fmt("dtdurations", 93_784.0, 2), "1 day, 2 hours");
        assert_eq!(fmt("dtdurations", 61.0, 3), "1 minute, 1 second");
        assert_eq!(fmt("dtdurations", 0.0, 2), "0 seconds");
        assert_eq!(fmt("dthms", 3_725.0, 0), "01:02:05");
        assert_eq!(fmt("dthms", 90_000.0, 0), "25:00:00");
    }

    #[test]
    fn hex_rounds_first() {
        assert_eq!(fmt("hex", 255.0, 0), "FF");
        assert_eq!(fmt("hex", -255.0, 0), "-FF");
        assert_eq!(fmt("hex", 15.6, 0), "10");
    }

    #[test]
    fn dates_are_epoch_millis_in_utc() {
        assert_eq!(fmt("dateTimeAsIso", 0.0, 0), "1970-01-01 00:00:00");
        assert_eq!(fmt("dateTimeAsUS", 1_700_000_000_000.0, 0), "11/14/2023 10:13:20 pm");
    }

    #[test]
    fn string_unit_accepts_text() {
        let v = SampleValue::Text("UP".into());
        assert_eq!(format_value("string", &v, 2).unwrap(), "UP");
    }

    #[test]
    fn numeric_unit_rejects_text() {
        let v = SampleValue::Text("UP".into());
        assert_matches!(
            format_value("percent", &v, 2),
            Err(FormatError::NonNumeric { .. })
        );
    }

    #[test]
    fn rejects_unknown_unit_and_bad_decimals() {
        let v = SampleValue::Number(1.0);
        assert_matches!(format_value("furlongs", &v, 2), Err(FormatError::UnknownUnit(_)));
        assert_matches!(
            format_value("dateTimeFromNow", &v, 2),
            Err(FormatError::UnknownUnit(_))
        );
        assert_matches!(format_value("none", &v, -1), Err(FormatError::InvalidDecimals(-1)));
        assert_matches!(format_value("none", &v, 21), Err(FormatError::InvalidDecimals(21)));
    }

    #[test]
    fn date_out_of_range() {
        assert_matches!(
            format_value("dateTimeAsIso", &SampleValue::Number(f64::INFINITY), 0),
            Err(FormatError::OutOfRange { .. })
        );
    }
}
