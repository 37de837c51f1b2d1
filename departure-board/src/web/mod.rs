//! Web layer for the departure board.
//!
//! Serves the rendered widgets as an HTML page and as JSON.

mod dto;
mod routes;
mod state;
pub mod templates;

pub use dto::*;
pub use routes::create_router;
pub use state::AppState;
pub use templates::*;
