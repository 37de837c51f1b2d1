//! Domain types for the departure board.
//!
//! Identifiers and times here are validated at construction. Departure
//! records themselves are lenient, since they carry untrusted feed data.

mod departure;
mod estimate;
mod station;
mod time;

pub use departure::{CallingPoint, DepartureRecord};
pub use estimate::Estimate;
pub use station::{Crs, InvalidCrs};
pub use time::{ClockTime, TimeError};
