//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::widget::{BoardView, WidgetId};

/// Request to show or hide a widget.
#[derive(Debug, Deserialize)]
pub struct HiddenRequest {
    pub hidden: bool,
}

/// A widget's current state.
#[derive(Debug, Serialize)]
pub struct WidgetResponse {
    pub id: WidgetId,
    pub hidden: bool,
    pub view: BoardView,
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
