//! Darwin LDB (Live Departure Boards) client.
//!
//! This module provides an HTTP client for the National Rail Darwin API,
//! plus a file-backed mock with the same interface.
//!
//! Key characteristics of Darwin:
//! - Times are in "HH:MM" format (UK local time)
//! - Estimated times may instead be "On time", "Delayed" or "Cancelled"
//! - `GetDepBoardWithDetails` returns calling points inline
//! - The board can be filtered server-side to one destination only

mod client;
mod convert;
mod error;
mod mock;
mod source;
mod types;

pub use client::{DEFAULT_BASE_URL, DarwinClient, DarwinConfig};
pub use convert::{convert_service_item, convert_station_board};
pub use error::DarwinError;
pub use mock::MockDarwinClient;
pub use source::{BoardQuery, DepartureSource};
pub use types::{
    ArrayOfCallingPoints, CallingPoint, ServiceItemWithCallingPoints, ServiceLocation,
    StationBoardWithDetails,
};
