//! The seam between the fetch helper and wherever departures come from.

use std::future::Future;

use crate::domain::{Crs, DepartureRecord};

use super::error::DarwinError;

/// Parameters for one departure board request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardQuery {
    /// Number of services to request (Darwin caps this at 150).
    pub rows: u8,
    /// Only return services calling at this station.
    pub destination: Option<Crs>,
}

impl BoardQuery {
    pub fn new(rows: u8) -> Self {
        Self {
            rows,
            destination: None,
        }
    }

    pub fn calling_at(mut self, destination: Crs) -> Self {
        self.destination = Some(destination);
        self
    }
}

/// A source of departure boards.
///
/// `Ok(None)` means the board had no services field at all.
pub trait DepartureSource: Send + Sync + 'static {
    fn fetch_departures(
        &self,
        station: Crs,
        query: BoardQuery,
    ) -> impl Future<Output = Result<Option<Vec<DepartureRecord>>, DarwinError>> + Send;
}
