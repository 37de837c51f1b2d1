//! Notifications exchanged between widgets and the fetch helper.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use crate::domain::DepartureRecord;

use super::config::WidgetConfig;

/// Identifies one widget instance.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct WidgetId(String);

impl WidgetId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WidgetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A message on the widget/helper channel.
///
/// Every payload carries the widget id. Results are broadcast to all
/// widgets and each one ignores ids other than its own.
#[derive(Debug, Clone)]
pub enum Notification {
    /// Widget to helper: register (or replace) a widget's configuration.
    Config {
        id: WidgetId,
        config: Arc<WidgetConfig>,
    },

    /// Widget to helper: fetch a fresh board.
    RequestDepartures { id: WidgetId },

    /// Helper to widget: raw departures from a successful fetch.
    /// `None` when the board had no services field.
    DeparturesResult {
        id: WidgetId,
        services: Option<Vec<DepartureRecord>>,
    },

    /// Helper to widget: whether the helper accepted the configuration.
    Started { id: WidgetId, started: bool },
}

impl Notification {
    pub fn id(&self) -> &WidgetId {
        match self {
            Notification::Config { id, .. }
            | Notification::RequestDepartures { id }
            | Notification::DeparturesResult { id, .. }
            | Notification::Started { id, .. } => id,
        }
    }
}
