//! Askama templates for the board page.

use askama::Template;

use crate::board::DisplayRow;
use crate::widget::{BoardView, WidgetHandle};

/// The full page: every widget, reloaded periodically.
#[derive(Template)]
#[template(path = "board.html")]
pub struct BoardTemplate {
    pub refresh_secs: u32,
    pub widgets: Vec<WidgetView>,
}

/// A single widget, without the page around it.
#[derive(Template)]
#[template(path = "widget.html")]
pub struct WidgetTemplate {
    pub widget: WidgetView,
}

// ============================================================================
// View Models (for templates)
// ============================================================================

/// Widget view model.
#[derive(Debug, Clone)]
pub struct WidgetView {
    pub id: String,
    pub hidden: bool,
    pub header: Option<String>,
    /// Shown instead of the table when set.
    pub message: Option<String>,
    pub message_class: &'static str,
    pub rows: Vec<Vec<CellView>>,
}

/// One table cell.
#[derive(Debug, Clone)]
pub struct CellView {
    pub text: String,
    pub class: String,
}

impl WidgetView {
    /// Snapshot a running widget.
    pub async fn from_handle(handle: &WidgetHandle) -> Self {
        Self::from_board(handle.id.as_str(), handle.is_hidden(), handle.view().await)
    }

    pub fn from_board(id: &str, hidden: bool, view: BoardView) -> Self {
        match view {
            BoardView::Message { text, class } => Self {
                id: id.to_string(),
                hidden,
                header: None,
                message: Some(text),
                message_class: class,
                rows: Vec::new(),
            },
            BoardView::Table {
                header,
                columns,
                rows,
            } => Self {
                id: id.to_string(),
                hidden,
                header,
                message: None,
                message_class: "",
                rows: rows
                    .iter()
                    .map(|row: &DisplayRow| {
                        columns
                            .iter()
                            .map(|&column| CellView {
                                text: row.cell(column).into_owned(),
                                class: row.cell_class(column).into_owned(),
                            })
                            .collect()
                    })
                    .collect(),
            },
        }
    }
}
