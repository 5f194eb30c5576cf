//! State-worsening detection for the panel blink effect.
//!
//! The engine keeps no memory between passes. Hosts own a [`BlinkTracker`]
//! and feed it each pass's state; it answers whether the panel just got
//! worse.

use std::collections::HashMap;

use crate::severity::PanelState;
use crate::types::PanelId;

/// Ordering used for worsening checks: every non-alert state ranks below
/// the least severe alert.
fn level(state: PanelState) -> i32 {
    match state {
        PanelState::Alert(severity) => severity.rank() as i32,
        PanelState::Ok | PanelState::Disable | PanelState::Na => -1,
    }
}

/// Whether `current` is strictly worse than `previous`. The first
/// observation of a panel never counts as worsening.
pub fn did_worsen(previous: Option<PanelState>, current: PanelState) -> bool {
    previous.is_some_and(|prev| level(current) > level(prev))
}

/// Last observed state per panel instance.
#[derive(Debug, Default, Clone)]
pub struct BlinkTracker {
    last_state_by_panel: HashMap<PanelId, PanelState>,
}

impl BlinkTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `state` for `panel_id` and report whether it worsened since
    /// the previous observation.
    pub fn observe(&mut self, panel_id: PanelId, state: PanelState) -> bool {
        let previous = self.last_state_by_panel.insert(panel_id, state);
        did_worsen(previous, state)
    }

    pub fn last_state(&self, panel_id: PanelId) -> Option<PanelState> {
        self.last_state_by_panel.get(&panel_id).copied()
    }

    /// Drop a panel's memory, e.g. when it is removed from the dashboard.
    pub fn forget(&mut self, panel_id: PanelId) {
        self.last_state_by_panel.remove(&panel_id);
    }
}
