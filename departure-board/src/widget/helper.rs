//! The fetch helper: owns one departure source per widget and relays
//! results back over the broadcast channel.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::darwin::{
    DarwinClient, DarwinConfig, DarwinError, DepartureSource, MockDarwinClient,
};

use super::config::{WidgetConfig, WidgetSetup};
use super::messages::{Notification, WidgetId};

/// Builds a departure source for a widget's configuration.
pub trait Connector: Send + 'static {
    type Source: DepartureSource;

    fn connect(&self, config: &WidgetConfig) -> Result<Self::Source, DarwinError>;
}

/// Connects to live Darwin using each widget's own token.
#[derive(Debug, Clone, Default)]
pub struct DarwinConnector {
    base_url: Option<String>,
}

impl DarwinConnector {
    pub fn new(base_url: Option<String>) -> Self {
        Self { base_url }
    }
}

impl Connector for DarwinConnector {
    type Source = DarwinClient;

    fn connect(&self, config: &WidgetConfig) -> Result<DarwinClient, DarwinError> {
        let mut darwin = DarwinConfig::new(&config.token);
        if let Some(url) = &self.base_url {
            darwin = darwin.with_base_url(url);
        }
        DarwinClient::new(darwin)
    }
}

/// Hands every widget the same file-backed mock.
#[derive(Debug, Clone)]
pub struct MockConnector(pub MockDarwinClient);

impl Connector for MockConnector {
    type Source = MockDarwinClient;

    fn connect(&self, _config: &WidgetConfig) -> Result<MockDarwinClient, DarwinError> {
        Ok(self.0.clone())
    }
}

struct Instance<S> {
    setup: WidgetSetup,
    source: Arc<S>,
}

/// Performs departure fetches on behalf of widgets.
///
/// State is keyed by widget id; widgets never share a source. A failed
/// fetch is logged and dropped, and the widget's next tick is the only
/// retry.
pub struct FetchHelper<C: Connector> {
    connector: C,
    instances: HashMap<WidgetId, Instance<C::Source>>,
    outbound: broadcast::Sender<Notification>,
}

impl<C: Connector> FetchHelper<C> {
    pub fn new(connector: C, outbound: broadcast::Sender<Notification>) -> Self {
        Self {
            connector,
            instances: HashMap::new(),
            outbound,
        }
    }

    /// Process notifications until every widget has gone away.
    pub async fn run(mut self, mut inbound: mpsc::UnboundedReceiver<Notification>) {
        info!("fetch helper started");
        while let Some(notification) = inbound.recv().await {
            self.handle(notification);
        }
        debug!("fetch helper stopping: no widgets left");
    }

    /// Handle one notification.
    ///
    /// Returns the spawned fetch task, if one was started.
    pub fn handle(&mut self, notification: Notification) -> Option<JoinHandle<()>> {
        match notification {
            Notification::Config { id, config } => self.configure(id, &config),
            Notification::RequestDepartures { id } => self.request(&id),
            Notification::DeparturesResult { .. } | Notification::Started { .. } => None,
        }
    }

    fn configure(&mut self, id: WidgetId, config: &WidgetConfig) -> Option<JoinHandle<()>> {
        info!(widget = %id, station = %config.station, "received widget configuration");

        let instance = config
            .validate()
            .map_err(|e| e.to_string())
            .and_then(|setup| {
                let source = self.connector.connect(config).map_err(|e| e.to_string())?;
                Ok(Instance {
                    setup,
                    source: Arc::new(source),
                })
            });

        match instance {
            Ok(instance) => {
                self.instances.insert(id.clone(), instance);
                self.send(Notification::Started {
                    id: id.clone(),
                    started: true,
                });
                self.request(&id)
            }
            Err(e) => {
                error!(widget = %id, error = %e, "cannot start widget");
                self.instances.remove(&id);
                self.send(Notification::Started { id, started: false });
                None
            }
        }
    }

    /// Issue exactly one fetch for a widget.
    fn request(&self, id: &WidgetId) -> Option<JoinHandle<()>> {
        let Some(instance) = self.instances.get(id) else {
            warn!(widget = %id, "departures requested for unconfigured widget");
            return None;
        };

        let id = id.clone();
        let station = instance.setup.station;
        let query = instance.setup.query;
        let source = Arc::clone(&instance.source);
        let outbound = self.outbound.clone();

        debug!(widget = %id, %station, "sending request for departure board");
        Some(tokio::spawn(async move {
            match source.fetch_departures(station, query).await {
                Ok(services) => {
                    debug!(
                        widget = %id,
                        services = services.as_ref().map_or(0, Vec::len),
                        "departure board received"
                    );
                    let _ = outbound.send(Notification::DeparturesResult { id, services });
                }
                Err(e) => warn!(widget = %id, %station, error = %e, "departure fetch failed"),
            }
        }))
    }

    fn send(&self, notification: Notification) {
        if self.outbound.send(notification).is_err() {
            debug!("no widgets listening");
        }
    }
}
