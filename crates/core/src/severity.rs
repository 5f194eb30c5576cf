//! Severity ordering and panel state names.
//!
//! The ordering is a closed constant: `information` is the least severe,
//! `disaster` the most. A severity's rank is its index in [`Severity::ALL`].

use std::fmt;

use serde::{Deserialize, Serialize};

/// A rule severity, ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Information,
    Minor,
    Warning,
    Average,
    High,
    Critical,
    Disaster,
}

impl Severity {
    /// Every severity in rank order.
    pub const ALL: [Severity; 7] = [
        Severity::Information,
        Severity::Minor,
        Severity::Warning,
        Severity::Average,
        Severity::High,
        Severity::Critical,
        Severity::Disaster,
    ];

    /// Position in the severity ordering. Higher is worse.
    pub fn rank(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Information => "information",
            Severity::Minor => "minor",
            Severity::Warning => "warning",
            Severity::Average => "average",
            Severity::High => "high",
            Severity::Critical => "critical",
            Severity::Disaster => "disaster",
        }
    }

    /// Look a severity up by its lowercase name.
    pub fn from_name(name: &str) -> Option<Severity> {
        Severity::ALL.into_iter().find(|s| s.as_str() == name)
    }

    /// Comma-separated list of every severity name, for error messages.
    pub fn names() -> String {
        Severity::ALL
            .iter()
            .map(|s| s.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The state a panel is painted with.
///
/// `Alert` comes out of rule evaluation; `Disable` and `Na` are forced by
/// the host when the panel's state display is switched off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PanelState {
    Ok,
    Disable,
    Na,
    Alert(Severity),
}

impl PanelState {
    /// The `*-state` name the rendering layer keys its styles on.
    pub fn state_name(&self) -> String {
        match self {
            PanelState::Ok => "ok-state".to_string(),
            PanelState::Disable => "disable-state".to_string(),
            PanelState::Na => "na-state".to_string(),
            PanelState::Alert(severity) => format!("{severity}-state"),
        }
    }

    /// Inverse of [`state_name`](Self::state_name). Bare names such as `ok`
    /// or `disable` are not state names and return `None`.
    pub fn parse_state_name(name: &str) -> Option<PanelState> {
        match name {
            "ok-state" => Some(PanelState::Ok),
            "disable-state" => Some(PanelState::Disable),
            "na-state" => Some(PanelState::Na),
            other => other
                .strip_suffix("-state")
                .and_then(Severity::from_name)
                .map(PanelState::Alert),
        }
    }

    pub fn severity(&self) -> Option<Severity> {
        match self {
            PanelState::Alert(severity) => Some(*severity),
            _ => None,
        }
    }
}

impl fmt::Display for PanelState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.state_name())
    }
}

impl Serialize for PanelState {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.state_name())
    }
}

impl<'de> Deserialize<'de> for PanelState {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        PanelState::parse_state_name(&name)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown panel state '{name}'")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranks_follow_declaration_order() {
        for (idx, severity) in Severity::ALL.iter().enumerate() {
            assert_eq!(severity.rank(), idx);
        }
        assert!(Severity::Disaster > Severity::Critical);
        assert!(Severity::Information < Severity::Minor);
    }

    #[test]
    fn from_name_is_case_sensitive() {
        assert_eq!(Severity::from_name("warning"), Some(Severity::Warning));
        assert_eq!(Severity::from_name("Warning"), None);
        assert_eq!(Severity::from_name("showOnlyOnThreshold"), None);
    }

    #[test]
    fn state_names_round_trip() {
        let states = [
            PanelState::Ok,
            PanelState::Disable,
            PanelState::Na,
            PanelState::Alert(Severity::High),
        ];
        for state in states {
            assert_eq!(PanelState::parse_state_name(&state.state_name()), Some(state));
        }
    }

    #[test]
    fn bare_names_are_not_states() {
        assert_eq!(PanelState::parse_state_name("ok"), None);
        assert_eq!(PanelState::parse_state_name("na"), None);
        assert_eq!(PanelState::parse_state_name("bogus-state"), None);
    }

    #[test]
    fn serializes_as_state_name() {
        let json = serde_json::to_string(&PanelState::Alert(Severity::Critical)).unwrap();
        assert_eq!(json, "\"critical-state\"");
        let back: PanelState = serde_json::from_str("\"ok-state\"").unwrap();
        assert_eq!(back, PanelState::Ok);
    }
}
