//! Application state for the web layer.

use std::sync::Arc;

use crate::widget::WidgetHandle;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Running widgets, in display order.
    pub widgets: Arc<Vec<WidgetHandle>>,

    /// Seconds between page reloads.
    pub refresh_secs: u32,
}

impl AppState {
    pub fn new(widgets: Vec<WidgetHandle>, refresh_secs: u32) -> Self {
        Self {
            widgets: Arc::new(widgets),
            refresh_secs,
        }
    }

    /// Look up a widget by id.
    pub fn widget(&self, id: &str) -> Option<&WidgetHandle> {
        self.widgets.iter().find(|w| w.id.as_str() == id)
    }
}
