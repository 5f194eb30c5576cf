//! Status overview panel events.
//!
//! - [`EventBus`]: in-process publish/subscribe hub backed by
//!   `tokio::sync::broadcast`; also an [`AdvisorySink`](status_overview_core::AdvisorySink).
//! - [`PanelEvent`]: the event envelope.
//! - [`PanelPublisher`]: a bus handle bound to one panel instance.

pub mod bus;

pub use bus::{EventBus, PanelEvent, PanelPublisher, EVENT_DUPLICATE_LABEL, EVENT_STATE_WORSENED};
