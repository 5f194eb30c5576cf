//! Panel color resolution.

use serde::{Deserialize, Serialize};

use crate::severity::{PanelState, Severity};
use crate::status::ResolvedStatus;

/// Background used for anything the palette has no entry for.
pub const TRANSPARENT: &str = "rgba(0, 0, 0, 0)";

/// The ten panel colors, keyed the way the panel options store them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    #[serde(rename = "ColorOK")]
    pub ok: String,
    #[serde(rename = "ColorDisable")]
    pub disable: String,
    #[serde(rename = "ColorNa")]
    pub na: String,
    #[serde(rename = "ColorInformation")]
    pub information: String,
    #[serde(rename = "ColorMinor")]
    pub minor: String,
    #[serde(rename = "ColorWarning")]
    pub warning: String,
    #[serde(rename = "ColorAverage")]
    pub average: String,
    #[serde(rename = "ColorHigh")]
    pub high: String,
    #[serde(rename = "ColorCritical")]
    pub critical: String,
    #[serde(rename = "ColorDisaster")]
    pub disaster: String,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            ok: "#299c46".into(),
            disable: "#808080".into(),
            na: "#c4c4c4".into(),
            information: "#7499ff".into(),
            minor: "#ffc859".into(),
            warning: "#ffa059".into(),
            average: "#e97659".into(),
            high: "#e45959".into(),
            critical: "#c4162a".into(),
            disaster: "#8f0000".into(),
        }
    }
}

impl Palette {
    pub fn severity_color(&self, severity: Severity) -> &str {
        match severity {
            Severity::Information => &self.information,
            Severity::Minor => &self.minor,
            Severity::Warning => &self.warning,
            Severity::Average => &self.average,
            Severity::High => &self.high,
            Severity::Critical => &self.critical,
            Severity::Disaster => &self.disaster,
        }
    }
}

/// Colors handed to the renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorPair {
    pub background: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// Palette color for a state.
pub fn color_for_state(state: &PanelState, palette: &Palette) -> String {
    match state {
        PanelState::Ok => palette.ok.clone(),
        PanelState::Disable => palette.disable.clone(),
        PanelState::Na => palette.na.clone(),
        PanelState::Alert(severity) => palette.severity_color(*severity).to_string(),
    }
}

/// Palette color for a `*-state` name; anything else is transparent.
pub fn color_for_state_name(name: &str, palette: &Palette) -> String {
    match PanelState::parse_state_name(name) {
        Some(state) => color_for_state(&state, palette),
        None => TRANSPARENT.to_string(),
    }
}

/// Colors for an evaluated status. A captured custom pair wins over the
/// palette; a pair carrying only a text color keeps the palette background.
pub fn resolve_color(status: &ResolvedStatus, palette: &Palette) -> ColorPair {
    match &status.custom_color {
        Some(custom) => ColorPair {
            background: custom
                .background
                .clone()
                .unwrap_or_else(|| color_for_state(&status.state, palette)),
            text: custom.text.clone(),
        },
        None => ColorPair {
            background: color_for_state(&status.state, palette),
            text: None,
        },
    }
}
