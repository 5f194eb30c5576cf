//! Non-fatal advisories raised while preparing an evaluation pass.
//!
//! Advisories never change evaluation output. They are published to an
//! [`AdvisorySink`] chosen by the host: a log, an event bus, a UI toast.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::sample::MetricSample;

/// A label carried by more than one sample in the same pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplicateLabel {
    pub label: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Advisory {
    DuplicateLabel(DuplicateLabel),
}

impl Advisory {
    /// User-facing text for the advisory.
    pub fn message(&self) -> String {
        match self {
            Advisory::DuplicateLabel(dup) => format!(
                "Warning: multiple metrics with the label \"{}\" were found.",
                dup.label
            ),
        }
    }
}

/// Receiver of advisories.
pub trait AdvisorySink {
    fn publish(&self, advisory: Advisory);
}

/// Sink that writes advisories to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl AdvisorySink for TracingSink {
    fn publish(&self, advisory: Advisory) {
        tracing::warn!(advisory = ?advisory, "{}", advisory.message());
    }
}

/// Labels that occur more than once, in order of first occurrence.
pub fn duplicate_labels(samples: &[MetricSample]) -> Vec<DuplicateLabel> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut first_seen: Vec<&str> = Vec::new();
    for sample in samples {
        let count = counts.entry(sample.label.as_str()).or_insert(0);
        if *count == 0 {
            first_seen.push(&sample.label);
        }
        *count += 1;
    }

    first_seen
        .into_iter()
        .filter_map(|label| {
            let count = counts.get(label).copied().unwrap_or_default();
            (count > 1).then(|| DuplicateLabel {
                label: label.to_string(),
                count,
            })
        })
        .collect()
}

/// Publish one advisory per distinct duplicated label. Returns how many
/// advisories were published.
pub fn report_duplicate_labels(samples: &[MetricSample], sink: &dyn AdvisorySink) -> usize {
    let duplicates = duplicate_labels(samples);
    let published = duplicates.len();
    for dup in duplicates {
        sink.publish(Advisory::DuplicateLabel(dup));
    }
    published
}
