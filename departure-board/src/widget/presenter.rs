//! The presentation side of a widget: polling timer, board state, view.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::broadcast::error::RecvError;
use tokio::sync::{RwLock, broadcast, mpsc};
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::board::{DisplayRow, process_departures};
use crate::config::ConfigError;

use super::config::{WidgetConfig, WidgetSetup};
use super::messages::{Notification, WidgetId};
use super::view::BoardView;

/// Shared access to a running widget, for the web layer.
#[derive(Debug, Clone)]
pub struct WidgetHandle {
    pub id: WidgetId,
    view: Arc<RwLock<BoardView>>,
    hidden: Arc<AtomicBool>,
}

impl WidgetHandle {
    /// The most recently published view.
    pub async fn view(&self) -> BoardView {
        self.view.read().await.clone()
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden.load(Ordering::Relaxed)
    }

    /// Hidden widgets keep their last board but stop requesting new ones.
    pub fn set_hidden(&self, hidden: bool) {
        self.hidden.store(hidden, Ordering::Relaxed);
    }
}

/// One departure board widget.
pub struct Widget {
    id: WidgetId,
    config: Arc<WidgetConfig>,
    setup: Result<WidgetSetup, ConfigError>,
    rows: Vec<DisplayRow>,
    loaded: bool,
    /// Set when the helper rejected the widget; polling stops for good.
    rejected: bool,
    published: Arc<RwLock<BoardView>>,
    hidden: Arc<AtomicBool>,
}

impl Widget {
    pub fn new(id: WidgetId, config: WidgetConfig) -> Self {
        let setup = config.validate();
        let initial = match &setup {
            Ok(_) => BoardView::loading(),
            Err(e) => BoardView::message(e.to_string()),
        };
        Self {
            id,
            config: Arc::new(config),
            setup,
            rows: Vec::new(),
            loaded: false,
            rejected: false,
            published: Arc::new(RwLock::new(initial)),
            hidden: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn handle(&self) -> WidgetHandle {
        WidgetHandle {
            id: self.id.clone(),
            view: Arc::clone(&self.published),
            hidden: Arc::clone(&self.hidden),
        }
    }

    /// The configuration notification sent on startup, unless the
    /// configuration is unusable.
    pub fn start(&self) -> Option<Notification> {
        match &self.setup {
            Ok(_) => Some(Notification::Config {
                id: self.id.clone(),
                config: Arc::clone(&self.config),
            }),
            Err(e) => {
                warn!(widget = %self.id, error = %e, "widget not started");
                None
            }
        }
    }

    /// Called on every timer tick.
    pub fn on_tick(&self) -> Option<Notification> {
        if self.setup.is_err() || self.rejected || self.hidden.load(Ordering::Relaxed) {
            return None;
        }
        Some(Notification::RequestDepartures {
            id: self.id.clone(),
        })
    }

    /// Apply a notification from the helper.
    ///
    /// Returns whether the view changed.
    pub fn on_notification(&mut self, notification: &Notification) -> bool {
        if notification.id() != &self.id {
            return false;
        }

        match notification {
            Notification::DeparturesResult {
                services: Some(services),
                ..
            } => {
                let Ok(setup) = &self.setup else {
                    return false;
                };
                self.rows = process_departures(services, &setup.filter);
                self.loaded = true;
                if self.config.debug {
                    info!(widget = %self.id, rows = ?self.rows, "processed departures");
                }
                true
            }
            Notification::DeparturesResult { services: None, .. } => {
                debug!(widget = %self.id, "board has no train services; keeping previous state");
                false
            }
            Notification::Started { started: true, .. } => {
                info!(widget = %self.id, "helper acknowledged widget");
                false
            }
            Notification::Started { started: false, .. } => {
                warn!(widget = %self.id, "helper could not start widget; polling stopped");
                self.rejected = true;
                true
            }
            Notification::Config { .. } | Notification::RequestDepartures { .. } => false,
        }
    }

    /// Build the current view.
    pub fn view(&self) -> BoardView {
        if let Err(e) = &self.setup {
            return BoardView::message(e.to_string());
        }
        if self.rejected {
            return BoardView::not_started();
        }
        if !self.loaded {
            return BoardView::loading();
        }
        if self.rows.is_empty() {
            return BoardView::no_trains();
        }
        BoardView::Table {
            header: self.config.header.clone(),
            columns: self.config.columns.clone(),
            rows: self.rows.clone(),
        }
    }

    async fn publish(&self) {
        *self.published.write().await = self.view();
    }

    /// Drive the widget until either channel closes.
    ///
    /// Sends the configuration, then requests departures after the initial
    /// delay and on every interval after that. A widget with an unusable
    /// configuration only shows its error message and returns.
    pub async fn run(
        mut self,
        to_helper: mpsc::UnboundedSender<Notification>,
        mut from_helper: broadcast::Receiver<Notification>,
    ) {
        self.publish().await;

        let Some(config) = self.start() else {
            return;
        };
        if to_helper.send(config).is_err() {
            return;
        }

        let first = Instant::now() + self.config.initial_load_delay();
        let mut timer = tokio::time::interval_at(first, self.config.update_interval());
        timer.set_missed_tick_behavior(MissedTickBehavior::Delay);

        info!(widget = %self.id, station = %self.config.station, "widget started");

        loop {
            tokio::select! {
                _ = timer.tick() => {
                    if let Some(request) = self.on_tick() {
                        if to_helper.send(request).is_err() {
                            break;
                        }
                    }
                }
                received = from_helper.recv() => match received {
                    Ok(notification) => {
                        if self.on_notification(&notification) {
                            self.publish().await;
                        }
                    }
                    Err(RecvError::Lagged(skipped)) => {
                        warn!(widget = %self.id, skipped, "missed notifications");
                    }
                    Err(RecvError::Closed) => break,
                },
            }
        }

        debug!(widget = %self.id, "widget stopped");
    }
}
