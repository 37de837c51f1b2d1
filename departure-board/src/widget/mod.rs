//! Departure board widgets and the helper that fetches for them.
//!
//! Widgets and the helper talk only through channels: widgets send
//! configuration and fetch requests to the helper over an `mpsc` channel,
//! and the helper broadcasts results to every widget, each of which keeps
//! only the payloads addressed to it.

mod config;
mod helper;
mod messages;
mod presenter;
mod view;

use tokio::sync::{broadcast, mpsc};

pub use config::{MAX_FETCH_ROWS, WidgetConfig, WidgetSetup};
pub use helper::{Connector, DarwinConnector, FetchHelper, MockConnector};
pub use messages::{Notification, WidgetId};
pub use presenter::{Widget, WidgetHandle};
pub use view::{BoardView, MESSAGE_CLASS};

/// Capacity of the helper-to-widget broadcast channel.
const BROADCAST_CAPACITY: usize = 64;

/// Spawn the fetch helper and one task per widget.
///
/// Returns handles in the order the widgets were given. Must be called
/// from within a tokio runtime.
pub fn spawn_board<C: Connector>(
    widgets: Vec<(WidgetId, WidgetConfig)>,
    connector: C,
) -> Vec<WidgetHandle> {
    let (to_helper, from_widgets) = mpsc::unbounded_channel();
    let (to_widgets, _) = broadcast::channel(BROADCAST_CAPACITY);

    let handles = widgets
        .into_iter()
        .map(|(id, config)| {
            let widget = Widget::new(id, config);
            let handle = widget.handle();
            tokio::spawn(widget.run(to_helper.clone(), to_widgets.subscribe()));
            handle
        })
        .collect();

    // The helper stops once every widget has dropped its sender.
    drop(to_helper);
    tokio::spawn(FetchHelper::new(connector, to_widgets).run(from_widgets));

    handles
}
