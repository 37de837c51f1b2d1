//! Darwin API response DTOs.
//!
//! These map the JSON returned by `GetDepBoardWithDetails`. Darwin omits
//! fields rather than sending nulls, so nearly everything is optional, and
//! only fields the board reads are declared; anything else is ignored.

use serde::Deserialize;

/// Response from `GetDepBoardWithDetails`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StationBoardWithDetails {
    /// Human-readable name of the board station.
    #[serde(default)]
    pub location_name: String,

    /// Train services. Absent when nothing is running.
    pub train_services: Option<Vec<ServiceItemWithCallingPoints>>,
}

/// A service on the departure board, including calling points.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceItemWithCallingPoints {
    /// Scheduled time of departure from the board station.
    pub std: Option<String>,

    /// Estimated departure: "On time", "Delayed", "Cancelled", or "HH:MM".
    pub etd: Option<String>,

    pub platform: Option<String>,

    /// Origin station(s); more than one for joining services.
    pub origin: Option<Vec<ServiceLocation>>,

    /// Destination station(s); more than one for dividing services.
    pub destination: Option<Vec<ServiceLocation>>,

    /// Stations still to visit, one array per portion of the train.
    pub subsequent_calling_points: Option<Vec<ArrayOfCallingPoints>>,
}

/// Calling points for one portion of a train.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArrayOfCallingPoints {
    #[serde(default)]
    pub calling_point: Vec<CallingPoint>,
}

/// A single calling point.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallingPoint {
    #[serde(default)]
    pub location_name: String,

    #[serde(default)]
    pub crs: String,

    /// Scheduled time.
    pub st: Option<String>,

    /// Estimated time, same vocabulary as `etd`.
    pub et: Option<String>,
}

/// Origin or destination location.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceLocation {
    #[serde(default)]
    pub location_name: String,
}
