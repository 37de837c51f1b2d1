//! Departure records as delivered by the feed.

use super::{Crs, Estimate};

/// A single departure from the board station.
///
/// Fields are kept close to the feed: times stay as raw strings so that
/// whatever Darwin sent can be echoed back on the board.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DepartureRecord {
    /// Destination display name.
    pub destination: String,
    /// Origin display name.
    pub origin: String,
    /// Scheduled departure, normally "HH:MM".
    pub scheduled: String,
    /// Estimated departure token.
    pub estimate: Estimate,
    /// Platform, when the station publishes one.
    pub platform: Option<String>,
    /// Stations still to be called at, in order.
    pub calling_points: Vec<CallingPoint>,
}

impl DepartureRecord {
    /// The first subsequent calling point, if any.
    pub fn first_stop(&self) -> Option<&CallingPoint> {
        self.calling_points.first()
    }

    /// Whether the service calls at any of `stations` after leaving.
    pub fn calls_at_any(&self, stations: &[Crs]) -> bool {
        self.first_call_at(stations).is_some()
    }

    /// The first subsequent calling point whose code is in `stations`.
    pub fn first_call_at(&self, stations: &[Crs]) -> Option<&CallingPoint> {
        self.calling_points.iter().find(|cp| cp.is_one_of(stations))
    }
}

/// A station the service will call at.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CallingPoint {
    /// Station code. `None` when the feed sent something that isn't a CRS.
    pub crs: Option<Crs>,
    /// Station display name.
    pub name: String,
    /// Scheduled time, normally "HH:MM".
    pub scheduled: String,
    /// Estimated time token.
    pub estimate: Estimate,
}

impl CallingPoint {
    pub fn is_one_of(&self, stations: &[Crs]) -> bool {
        self.crs.is_some_and(|crs| crs.is_in(stations))
    }
}
