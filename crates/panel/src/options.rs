//! Panel options as stored by the dashboard editor.

use serde::{Deserialize, Serialize};
use status_overview_core::{validate_rules, Palette, Rule};
use validator::Validate;

use crate::error::PanelError;

pub const DEFAULT_PANEL_NAME: &str = "Example name panel";

/// Whether the panel evaluates rules or shows a forced state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatePanelMode {
    #[default]
    Enable,
    Disable,
    Na,
}

/// How body lines are laid out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LayoutMode {
    /// One line per row.
    #[default]
    #[serde(rename = "line")]
    Line,
    /// All lines in one row, separated by ` / `.
    #[serde(rename = "in")]
    Inline,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleConfig {
    pub rules: Vec<Rule>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct PanelOptions {
    pub panel_name: String,
    pub state_panel: StatePanelMode,
    pub mode_panel: LayoutMode,
    pub blink: bool,
    /// Link placed on the title when non-empty.
    pub data_link: String,

    /// Margin below the title (px).
    #[validate(range(max = 50))]
    pub title_margin: u32,
    /// Line height of the body (em).
    #[validate(range(min = 1.0, max = 3.0))]
    pub line_height: f64,
    /// Spacing between rows in line mode (px).
    #[validate(range(max = 20))]
    pub text_spacing: u32,
    /// Spacing between entries in inline mode (px).
    #[validate(range(max = 50))]
    pub inline_spacing: u32,

    #[serde(flatten)]
    pub palette: Palette,

    pub rule_config: RuleConfig,
}

impl Default for PanelOptions {
    fn default() -> Self {
        Self {
            panel_name: DEFAULT_PANEL_NAME.to_string(),
            state_panel: StatePanelMode::default(),
            mode_panel: LayoutMode::default(),
            blink: true,
            data_link: String::new(),
            title_margin: 10,
            line_height: 1.5,
            text_spacing: 5,
            inline_spacing: 10,
            palette: Palette::default(),
            rule_config: RuleConfig::default(),
        }
    }
}

impl PanelOptions {
    pub fn rules(&self) -> &[Rule] {
        &self.rule_config.rules
    }

    /// Strict check used before saving: option ranges and the rule set.
    /// Rendering tolerates rule problems; this reports them.
    pub fn check(&self) -> Result<(), PanelError> {
        self.validate()?;
        validate_rules(self.rules())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn empty_object_uses_defaults() {
        let options: PanelOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(options, PanelOptions::default());
        assert!(options.blink);
        assert_eq!(options.state_panel, StatePanelMode::Enable);
        assert_eq!(options.mode_panel, LayoutMode::Line);
    }

    #[test]
    fn parses_editor_json() {
        let options: PanelOptions = serde_json::from_str(
            r##"{
                "panelName": "Core router",
                "statePanel": "na",
                "modePanel": "in",
                "blink": false,
                "dataLink": "d/abc/router",
                "inlineSpacing": 4,
                "ColorHigh": "#ff0000",
                "ruleConfig": {"rules": [
                    {"order": 0, "seriesMatch": "cpu", "displayMode": "show", "showName": true}
                ]}
            }"##,
        )
        .unwrap();

        assert_eq!(options.panel_name, "Core router");
        assert_eq!(options.state_panel, StatePanelMode::Na);
        assert_eq!(options.mode_panel, LayoutMode::Inline);
        assert!(!options.blink);
        assert_eq!(options.inline_spacing, 4);
        assert_eq!(options.palette.high, "#ff0000");
        assert_eq!(options.palette.ok, Palette::default().ok);
        assert_eq!(options.rules().len(), 1);
    }

    #[test]
    fn defaults_pass_checks() {
        assert!(PanelOptions::default().check().is_ok());
    }

    #[test]
    fn out_of_range_spacing_is_rejected() {
        let options = PanelOptions {
            title_margin: 51,
            ..Default::default()
        };
        assert_matches!(options.check(), Err(PanelError::Validation(_)));

        let options = PanelOptions {
            line_height: 0.5,
            ..Default::default()
        };
        assert_matches!(options.check(), Err(PanelError::Validation(_)));
    }

    #[test]
    fn invalid_rules_are_rejected() {
        let options: PanelOptions = serde_json::from_str(
            r#"{"ruleConfig": {"rules": [
                {"order": 1, "seriesMatch": "a", "displayMode": "show"},
                {"order": 1, "seriesMatch": "b", "displayMode": "show"}
            ]}}"#,
        )
        .unwrap();
        assert_matches!(options.check(), Err(PanelError::Core(_)));
    }
}
