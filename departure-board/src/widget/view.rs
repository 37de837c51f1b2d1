//! What a widget currently shows.

use serde::Serialize;

use crate::board::{Column, DisplayRow};

/// Style classes for a status message.
pub const MESSAGE_CLASS: &str = "dimmed light small";

/// Rendered state of one widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BoardView {
    /// A single line instead of the table (setup problems, loading, empty).
    Message { text: String, class: &'static str },

    /// The departure table.
    Table {
        header: Option<String>,
        columns: Vec<Column>,
        rows: Vec<DisplayRow>,
    },
}

impl BoardView {
    pub fn message(text: impl Into<String>) -> Self {
        BoardView::Message {
            text: text.into(),
            class: MESSAGE_CLASS,
        }
    }

    pub fn loading() -> Self {
        Self::message("Loading trains ...")
    }

    /// The helper could not build a departure source for the widget.
    pub fn not_started() -> Self {
        Self::message("Could not connect to Darwin. Please check the API token.")
    }

    pub fn no_trains() -> Self {
        Self::message("No trains found")
    }

    pub fn is_table(&self) -> bool {
        matches!(self, BoardView::Table { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_json_shape() {
        let value = serde_json::to_value(BoardView::loading()).unwrap();
        assert_eq!(value["kind"], "message");
        assert_eq!(value["text"], "Loading trains ...");
        assert_eq!(value["class"], MESSAGE_CLASS);
    }

    #[test]
    fn table_json_shape() {
        let view = BoardView::Table {
            header: None,
            columns: vec![Column::Platform, Column::DepEstimated],
            rows: vec![],
        };
        let value = serde_json::to_value(&view).unwrap();
        assert_eq!(value["kind"], "table");
        assert_eq!(value["columns"][1], "dep_estimated");
        assert!(view.is_table());
    }
}
