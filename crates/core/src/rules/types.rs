//! Rule configuration types.
//!
//! The serialized shape follows the panel editor's JSON: camelCase keys, the
//! display mode as a `displayMode` tag next to the rule's own fields, and
//! both number-threshold representations stored side by side.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::severity::Severity;

/// A user-authored rule. `order` is both the evaluation position and the
/// rule's identity within a rule set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rule {
    pub order: i32,
    /// Editor label; not used by evaluation.
    #[serde(default)]
    pub label: String,
    /// Regex searched (unanchored) in each sample label.
    #[serde(default)]
    pub series_match: String,
    #[serde(flatten)]
    pub mode: DisplayMode,
    #[serde(default)]
    pub show_name: bool,
    #[serde(default)]
    pub show_value: bool,
    #[serde(default)]
    pub show_only_on_threshold: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub use_custom_formatting: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decimals: Option<i32>,
}

impl Rule {
    /// A rule with the given mode and everything else off.
    pub fn new(order: i32, series_match: impl Into<String>, mode: DisplayMode) -> Self {
        Self {
            order,
            label: String::new(),
            series_match: series_match.into(),
            mode,
            show_name: false,
            show_value: false,
            show_only_on_threshold: false,
            alias: None,
            description: None,
            use_custom_formatting: false,
            unit_format: None,
            decimals: None,
        }
    }

    /// The alias text, if set and non-empty.
    pub fn alias(&self) -> Option<&str> {
        non_empty(self.alias.as_deref())
    }

    /// The tooltip text, if set and non-empty.
    pub fn description(&self) -> Option<&str> {
        non_empty(self.description.as_deref())
    }

    /// The unit id used for custom formatting, if set and non-empty.
    pub fn unit_format(&self) -> Option<&str> {
        non_empty(self.unit_format.as_deref())
    }

    /// Whether line emission is gated on this rule crossing a threshold.
    pub fn gates_on_threshold(&self) -> bool {
        self.show_only_on_threshold
            && matches!(self.mode, DisplayMode::Number(_) | DisplayMode::String(_))
    }
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.is_empty())
}

/// Which threshold logic a rule applies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "displayMode", rename_all = "lowercase")]
pub enum DisplayMode {
    Number(NumberMode),
    String(StringMode),
    Show(ShowMode),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NumberMode {
    #[serde(rename = "numberThreshold", default)]
    pub thresholds: SeverityThresholds,
    #[serde(default)]
    pub custom_thresholds: Vec<CustomThreshold>,
    #[serde(default)]
    pub use_custom_thresholds: bool,
    /// Trigger when the value is at or below the threshold instead of at or above.
    #[serde(alias = "revers", default)]
    pub reverse_comparison: bool,
}

impl NumberMode {
    /// The threshold list in effect. The custom list wins when it is enabled
    /// and non-empty; otherwise the fixed severity map applies.
    pub fn threshold_source(&self) -> ThresholdSource<'_> {
        if self.use_custom_thresholds && !self.custom_thresholds.is_empty() {
            ThresholdSource::Custom(&self.custom_thresholds)
        } else {
            ThresholdSource::Legacy(&self.thresholds)
        }
    }
}

/// Borrowed view of the number thresholds a rule evaluates against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ThresholdSource<'a> {
    Legacy(&'a SeverityThresholds),
    Custom(&'a [CustomThreshold]),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StringMode {
    #[serde(rename = "stringThreshold", default)]
    pub thresholds: SeverityThresholds,
}

/// Severity to threshold-text map.
///
/// Entries are kept in severity order. Deserialization drops keys that are
/// not severity names (the editor stores a `showOnlyOnThreshold` flag in the
/// same object) and entries whose value is not text or a number.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, Value>", into = "BTreeMap<String, String>")]
pub struct SeverityThresholds(BTreeMap<Severity, String>);

impl SeverityThresholds {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, severity: Severity, threshold: impl Into<String>) -> Self {
        self.0.insert(severity, threshold.into());
        self
    }

    pub fn get(&self, severity: Severity) -> Option<&str> {
        self.0.get(&severity).map(String::as_str)
    }

    /// Entries from least to most severe.
    pub fn iter(&self) -> impl Iterator<Item = (Severity, &str)> {
        self.0.iter().map(|(s, t)| (*s, t.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<BTreeMap<String, Value>> for SeverityThresholds {
    fn from(raw: BTreeMap<String, Value>) -> Self {
        let entries = raw
            .into_iter()
            .filter_map(|(key, value)| {
                let severity = Severity::from_name(&key)?;
                let text = match value {
                    Value::String(s) => s,
                    Value::Number(n) => n.to_string(),
                    _ => return None,
                };
                Some((severity, text))
            })
            .collect();
        Self(entries)
    }
}

impl From<SeverityThresholds> for BTreeMap<String, String> {
    fn from(thresholds: SeverityThresholds) -> Self {
        thresholds
            .0
            .into_iter()
            .map(|(s, t)| (s.as_str().to_string(), t))
            .collect()
    }
}

/// One entry of a user-ordered custom threshold list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomThreshold {
    /// Severity name, e.g. `"warning"`. Unknown names never trigger.
    pub name: String,
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_color: Option<String>,
    #[serde(default)]
    pub order: i32,
}

impl CustomThreshold {
    pub fn new(severity: Severity, value: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            name: severity.as_str().to_string(),
            value: value.into(),
            color: color.into(),
            text_color: None,
            order: severity.rank() as i32,
        }
    }

    pub fn severity(&self) -> Option<Severity> {
        Severity::from_name(&self.name)
    }
}

/// Show-only mode: emits a line without contributing a severity, optionally
/// gated by a comparison against the sample value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawShowMode", into = "RawShowMode")]
pub struct ShowMode {
    pub logic: Option<LogicExpression>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogicExpression {
    pub operator: ComparisonOperator,
    pub value: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComparisonOperator {
    #[default]
    Eq,
    Ne,
    Ge,
    Lt,
}

/// Editor representation of [`ShowMode`]: a toggle plus loose fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawShowMode {
    #[serde(default)]
    logic_express: bool,
    #[serde(default)]
    logic_express_value: String,
    #[serde(default)]
    logical_mode: Option<ComparisonOperator>,
}

impl From<RawShowMode> for ShowMode {
    fn from(raw: RawShowMode) -> Self {
        let logic = raw.logic_express.then(|| LogicExpression {
            operator: raw.logical_mode.unwrap_or_default(),
            value: raw.logic_express_value,
        });
        Self { logic }
    }
}

impl From<ShowMode> for RawShowMode {
    fn from(mode: ShowMode) -> Self {
        match mode.logic {
            Some(logic) => RawShowMode {
                logic_express: true,
                logic_express_value: logic.value,
                logical_mode: Some(logic.operator),
            },
            None => RawShowMode::default(),
        }
    }
}
