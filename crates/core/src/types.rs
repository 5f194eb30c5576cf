/// Identity of a panel instance on a dashboard. Hosts key per-panel memory
/// (for example the [`crate::BlinkTracker`]) by this id.
pub type PanelId = i64;
