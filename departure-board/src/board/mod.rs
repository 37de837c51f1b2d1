//! Departure board formatting.
//!
//! Turns raw departure records into the bounded, filtered list of rows
//! a widget renders.

mod process;
mod row;

pub use process::{BoardFilter, process_departures};
pub use row::{Column, DisplayRow, JourneyDuration, Status};
