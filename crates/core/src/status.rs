//! Worst-status evaluation.
//!
//! Folds every rule x matching sample combination into a single running
//! worst severity. A candidate replaces the current worst only when it is
//! strictly more severe. Only custom thresholds touch the captured color;
//! a legacy or string threshold that raises the severity keeps whatever
//! custom color was captured before it.

use serde::{Deserialize, Serialize};

use crate::rules::{
    in_order, parse_threshold, DisplayMode, NumberMode, Rule, SeriesMatcher, SeverityThresholds,
    StringMode, ThresholdSource,
};
use crate::sample::MetricSample;
use crate::severity::{PanelState, Severity};

/// Colors carried over from the custom threshold that set the worst state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomColor {
    pub background: Option<String>,
    pub text: Option<String>,
}

impl CustomColor {
    /// Build a pair from threshold colors; empty strings count as unset and
    /// a pair with neither color is `None`.
    pub fn from_parts(background: &str, text: Option<&str>) -> Option<Self> {
        let background = Some(background).filter(|c| !c.is_empty()).map(str::to_string);
        let text = text.filter(|c| !c.is_empty()).map(str::to_string);
        if background.is_none() && text.is_none() {
            None
        } else {
            Some(Self { background, text })
        }
    }
}

/// Result of one evaluation pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedStatus {
    pub state: PanelState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_color: Option<CustomColor>,
}

impl ResolvedStatus {
    pub fn ok() -> Self {
        Self {
            state: PanelState::Ok,
            custom_color: None,
        }
    }

    pub fn is_ok(&self) -> bool {
        self.state == PanelState::Ok
    }
}

/// Evaluate every rule against every sample its series pattern selects and
/// return the worst state reached. An empty rule set yields `ok-state`.
pub fn evaluate(samples: &[MetricSample], rules: &[Rule]) -> ResolvedStatus {
    let mut worst = Worst::default();

    for rule in in_order(rules) {
        let matcher = SeriesMatcher::new(&rule.series_match);
        for sample in samples.iter().filter(|s| matcher.is_match(&s.label)) {
            worst.fold(sample, rule);
        }
    }

    let status = worst.finish();
    tracing::debug!(
        rules = rules.len(),
        samples = samples.len(),
        state = %status.state,
        "Evaluated panel status",
    );
    status
}

/// Evaluate a single rule against a single sample the caller has already
/// selected with the rule's series pattern.
pub fn evaluate_sample(sample: &MetricSample, rule: &Rule) -> ResolvedStatus {
    let mut worst = Worst::default();
    worst.fold(sample, rule);
    worst.finish()
}

#[derive(Debug, Default)]
struct Worst {
    severity: Option<Severity>,
    color: Option<CustomColor>,
}

impl Worst {
    fn fold(&mut self, sample: &MetricSample, rule: &Rule) {
        match &rule.mode {
            DisplayMode::Number(mode) => self.fold_number(sample, mode),
            DisplayMode::String(mode) => self.fold_string(sample, mode),
            DisplayMode::Show(_) => {}
        }
    }

    fn fold_number(&mut self, sample: &MetricSample, mode: &NumberMode) {
        let Some(value) = sample.value.as_number() else {
            return;
        };

        match mode.threshold_source() {
            ThresholdSource::Custom(list) => {
                let mut sorted: Vec<_> = list.iter().collect();
                sorted.sort_by_key(|t| t.order);

                for threshold in sorted {
                    let Some(limit) = parse_threshold(&threshold.value) else {
                        continue;
                    };
                    let Some(severity) = threshold.severity() else {
                        continue;
                    };
                    if crosses(value, limit, mode.reverse_comparison) && self.raise(severity) {
                        self.color =
                            CustomColor::from_parts(&threshold.color, threshold.text_color.as_deref());
                    }
                }
            }
            ThresholdSource::Legacy(thresholds) => {
                self.fold_legacy_number(value, thresholds, mode.reverse_comparison);
            }
        }
    }

    fn fold_legacy_number(&mut self, value: f64, thresholds: &SeverityThresholds, reverse: bool) {
        for (severity, text) in thresholds.iter() {
            if let Some(limit) = parse_threshold(text) {
                if crosses(value, limit, reverse) {
                    self.raise(severity);
                }
            }
        }
    }

    fn fold_string(&mut self, sample: &MetricSample, mode: &StringMode) {
        let text = sample.value.to_string();
        for (severity, expected) in mode.thresholds.iter() {
            if text == expected {
                self.raise(severity);
            }
        }
    }

    /// Take `severity` if it is strictly worse than the current worst.
    /// Returns whether it was taken.
    fn raise(&mut self, severity: Severity) -> bool {
        if self.severity.is_some_and(|current| severity <= current) {
            return false;
        }
        self.severity = Some(severity);
        true
    }

    fn finish(self) -> ResolvedStatus {
        match self.severity {
            Some(severity) => ResolvedStatus {
                state: PanelState::Alert(severity),
                custom_color: self.color,
            },
            None => ResolvedStatus::ok(),
        }
    }
}

fn crosses(value: f64, limit: f64, reverse: bool) -> bool {
    if reverse {
        value <= limit
    } else {
        value >= limit
    }
}
