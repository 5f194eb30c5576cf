//! In-process event bus backed by a `tokio::sync::broadcast` channel.
//!
//! [`EventBus`] carries [`PanelEvent`]s from the render pass to whoever
//! listens: a log drain, a UI notifier, a test. Share it via
//! `Arc<EventBus>` when several renderers publish at once.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use status_overview_core::{Advisory, AdvisorySink, PanelId, PanelState};
use tokio::sync::broadcast;

/// Published once per duplicated sample label in an evaluation pass.
pub const EVENT_DUPLICATE_LABEL: &str = "panel.duplicate_label";

/// Published when a panel's state is worse than on its previous pass.
pub const EVENT_STATE_WORSENED: &str = "panel.state_worsened";

// ---------------------------------------------------------------------------
// PanelEvent
// ---------------------------------------------------------------------------

/// Something that happened while rendering a panel.
///
/// Constructed via [`PanelEvent::new`] and enriched with
/// [`with_panel`](PanelEvent::with_panel) and
/// [`with_payload`](PanelEvent::with_payload).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PanelEvent {
    /// Dot-separated event name, e.g. `"panel.state_worsened"`.
    pub event_type: String,

    /// Panel instance the event belongs to, when known.
    pub panel_id: Option<PanelId>,

    /// Event-specific data.
    pub payload: serde_json::Value,

    pub timestamp: DateTime<Utc>,
}

impl PanelEvent {
    pub fn new(event_type: impl Into<String>) -> Self {
        Self {
            event_type: event_type.into(),
            panel_id: None,
            payload: serde_json::Value::Object(Default::default()),
            timestamp: Utc::now(),
        }
    }

    pub fn with_panel(mut self, panel_id: PanelId) -> Self {
        self.panel_id = Some(panel_id);
        self
    }

    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = payload;
        self
    }

    /// Event for a non-fatal advisory.
    pub fn from_advisory(advisory: &Advisory) -> Self {
        match advisory {
            Advisory::DuplicateLabel(dup) => {
                Self::new(EVENT_DUPLICATE_LABEL).with_payload(serde_json::json!({
                    "label": dup.label,
                    "count": dup.count,
                    "message": advisory.message(),
                }))
            }
        }
    }

    /// Event for a panel whose state got worse between two passes.
    pub fn state_worsened(panel_id: PanelId, previous: PanelState, current: PanelState) -> Self {
        Self::new(EVENT_STATE_WORSENED)
            .with_panel(panel_id)
            .with_payload(serde_json::json!({
                "previous": previous.state_name(),
                "current": current.state_name(),
            }))
    }
}

// ---------------------------------------------------------------------------
// EventBus
// ---------------------------------------------------------------------------

const DEFAULT_CAPACITY: usize = 1024;

/// In-process fan-out event bus.
///
/// ```rust
/// use status_overview_events::bus::{EventBus, PanelEvent};
///
/// let bus = EventBus::default();
/// let mut rx = bus.subscribe();
///
/// bus.publish(PanelEvent::new("panel.rendered"));
/// assert!(rx.try_recv().is_ok());
/// ```
pub struct EventBus {
    sender: broadcast::Sender<PanelEvent>,
}

impl EventBus {
    /// Create a bus with a specific channel capacity.
    ///
    /// When the buffer is full the oldest unread events are dropped and
    /// slow receivers observe `RecvError::Lagged`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all current subscribers. Dropped silently when
    /// nobody is subscribed.
    pub fn publish(&self, event: PanelEvent) {
        // SendError only means there are zero receivers.
        let _ = self.sender.send(event);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<PanelEvent> {
        self.sender.subscribe()
    }

    /// Advisory sink that tags every event with `panel_id`.
    pub fn for_panel(&self, panel_id: PanelId) -> PanelPublisher<'_> {
        PanelPublisher {
            bus: self,
            panel_id,
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl AdvisorySink for EventBus {
    fn publish(&self, advisory: Advisory) {
        EventBus::publish(self, PanelEvent::from_advisory(&advisory));
    }
}

/// [`EventBus`] handle bound to one panel instance.
pub struct PanelPublisher<'a> {
    bus: &'a EventBus,
    panel_id: PanelId,
}

impl PanelPublisher<'_> {
    pub fn panel_id(&self) -> PanelId {
        self.panel_id
    }

    pub fn state_worsened(&self, previous: PanelState, current: PanelState) {
        tracing::info!(
            panel_id = self.panel_id,
            previous = %previous,
            current = %current,
            "Panel state worsened",
        );
        self.bus
            .publish(PanelEvent::state_worsened(self.panel_id, previous, current));
    }
}

impl AdvisorySink for PanelPublisher<'_> {
    fn publish(&self, advisory: Advisory) {
        self.bus
            .publish(PanelEvent::from_advisory(&advisory).with_panel(self.panel_id));
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
