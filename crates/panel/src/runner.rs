//! Single-shot render driven by [`PanelConfig`].

use status_overview_core::BlinkTracker;
use status_overview_events::{EventBus, PanelEvent};
use tokio::sync::broadcast;

use crate::config::{OutputFormat, PanelConfig};
use crate::error::PanelError;
use crate::load::{load_options, load_samples};
use crate::render::render_panel;

/// Load the configured files, render once and return the printable output.
pub fn run_once(config: &PanelConfig) -> Result<String, PanelError> {
    let options = load_options(&config.options_path)?;
    let samples = load_samples(&config.samples_path)?;

    let bus = EventBus::default();
    let mut events = bus.subscribe();
    let mut tracker = BlinkTracker::new();

    let view = render_panel(&options, &samples, config.panel_id, &mut tracker, &bus);
    drain_events(&mut events);

    match config.output {
        OutputFormat::Json => serde_json::to_string_pretty(&view).map_err(PanelError::Serialize),
        OutputFormat::Text => Ok(view.to_text()),
    }
}

/// Log every event published during the pass.
fn drain_events(events: &mut broadcast::Receiver<PanelEvent>) {
    while let Ok(event) = events.try_recv() {
        let message = event.payload["message"].as_str().unwrap_or_default();
        tracing::warn!(
            event_type = %event.event_type,
            panel_id = ?event.panel_id,
            payload = %event.payload,
            "{message}",
        );
    }
}
