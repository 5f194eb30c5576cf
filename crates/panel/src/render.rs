//! One render pass of a status overview panel.
//!
//! Ties the engine together: advisories, worst-status evaluation, color
//! resolution, body lines and the blink decision. The host calls
//! [`render_panel`] each time new samples arrive.

use serde::{Deserialize, Serialize};
use status_overview_core::{
    build_lines, evaluate, report_duplicate_labels, resolve_color, validate_rules, BlinkTracker,
    ColorPair, DisplayLine, MetricSample, PanelId, PanelState, ResolvedStatus,
};
use status_overview_events::EventBus;

use crate::options::{LayoutMode, PanelOptions, StatePanelMode};

/// Separator between entries in inline mode.
pub const INLINE_SEPARATOR: &str = " / ";

// ---------------------------------------------------------------------------
// PanelView
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelTitle {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

/// Spacing values the renderer applies to the body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelLayout {
    pub mode: LayoutMode,
    pub title_margin: u32,
    pub line_height: f64,
    /// Row spacing in line mode, entry spacing in inline mode.
    pub spacing: u32,
}

/// Everything a renderer needs to draw the panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelView {
    pub title: PanelTitle,
    pub state: PanelState,
    pub colors: ColorPair,
    pub lines: Vec<DisplayLine>,
    pub blink: bool,
    pub layout: PanelLayout,
}

impl PanelView {
    /// Body lines joined for the layout mode.
    pub fn body_text(&self) -> String {
        let separator = match self.layout.mode {
            LayoutMode::Line => "\n",
            LayoutMode::Inline => INLINE_SEPARATOR,
        };
        self.lines
            .iter()
            .map(|line| line.text.as_str())
            .collect::<Vec<_>>()
            .join(separator)
    }

    /// Plain-text rendering: a title row with the state, then the body.
    pub fn to_text(&self) -> String {
        let mut header = format!("{} [{}]", self.title.text, self.state);
        if self.blink {
            header.push_str(" (!)");
        }
        let body = self.body_text();
        if body.is_empty() {
            header
        } else {
            format!("{header}\n{body}")
        }
    }
}

// ---------------------------------------------------------------------------
// Render
// ---------------------------------------------------------------------------

/// Render one pass of panel `panel_id`.
///
/// Advisories and state-worsened events go to `bus`, tagged with
/// `panel_id`. Rule problems are logged and never abort the pass.
pub fn render_panel(
    options: &PanelOptions,
    samples: &[MetricSample],
    panel_id: PanelId,
    tracker: &mut BlinkTracker,
    bus: &EventBus,
) -> PanelView {
    let publisher = bus.for_panel(panel_id);

    let (status, lines) = match options.state_panel {
        StatePanelMode::Enable => {
            let rules = options.rules();
            if let Err(e) = validate_rules(rules) {
                tracing::warn!(panel_id, error = %e, "Rule set has problems, evaluating anyway");
            }
            report_duplicate_labels(samples, &publisher);
            (evaluate(samples, rules), build_lines(samples, rules))
        }
        StatePanelMode::Disable => (forced(PanelState::Disable), Vec::new()),
        StatePanelMode::Na => (forced(PanelState::Na), Vec::new()),
    };

    let previous = tracker.last_state(panel_id);
    let worsened = tracker.observe(panel_id, status.state);
    if let (true, Some(previous)) = (worsened, previous) {
        publisher.state_worsened(previous, status.state);
    }

    tracing::debug!(
        panel_id,
        state = %status.state,
        lines = lines.len(),
        worsened,
        "Panel rendered",
    );

    PanelView {
        title: PanelTitle {
            text: options.panel_name.clone(),
            link: Some(options.data_link.clone()).filter(|l| !l.is_empty()),
        },
        state: status.state,
        colors: resolve_color(&status, &options.palette),
        lines,
        blink: options.blink && worsened,
        layout: layout(options),
    }
}

fn forced(state: PanelState) -> ResolvedStatus {
    ResolvedStatus {
        state,
        custom_color: None,
    }
}

fn layout(options: &PanelOptions) -> PanelLayout {
    let spacing = match options.mode_panel {
        LayoutMode::Line => options.text_spacing,
        LayoutMode::Inline => options.inline_spacing,
    };
    PanelLayout {
        mode: options.mode_panel,
        title_margin: options.title_margin,
        line_height: options.line_height,
        spacing,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
