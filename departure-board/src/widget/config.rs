//! Per-widget configuration.

use std::time::Duration;

use serde::{Deserialize, Deserializer};

use crate::board::{BoardFilter, Column};
use crate::config::ConfigError;
use crate::darwin::BoardQuery;
use crate::domain::Crs;

/// Largest board Darwin will return in one request.
pub const MAX_FETCH_ROWS: u8 = 150;

/// Configuration for one departure board widget.
///
/// Keys and defaults follow the widget's established JSON format.
#[derive(Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WidgetConfig {
    /// Instance id; generated from the widget's position when absent.
    pub id: Option<String>,

    /// CRS code of the board station.
    pub station: String,

    /// Darwin API token.
    pub token: String,

    /// Milliseconds between refreshes.
    #[serde(rename = "updateInterval")]
    pub update_interval_ms: u64,

    /// Milliseconds before the first timed refresh.
    #[serde(rename = "initialLoadDelay")]
    pub initial_load_delay_ms: u64,

    /// Only show trains calling at one of these stations.
    /// A single string is accepted too.
    #[serde(deserialize_with = "one_or_many")]
    pub filter_destination: Vec<String>,

    /// Only show trains whose first stop is one of these stations.
    pub filter_first_stop: Vec<String>,

    /// Hide cancelled trains.
    pub filter_cancelled: bool,

    /// Services to request from Darwin, before filtering. Capped at
    /// [`MAX_FETCH_ROWS`].
    pub fetch_rows: u32,

    /// Rows to display, after filtering.
    pub display_rows: usize,

    pub columns: Vec<Column>,

    /// Optional heading shown above the table.
    pub header: Option<String>,

    /// Log every processed board.
    pub debug: bool,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            id: None,
            station: String::new(),
            token: String::new(),
            update_interval_ms: 5 * 60 * 1000,
            initial_load_delay_ms: 0,
            filter_destination: Vec::new(),
            filter_first_stop: Vec::new(),
            filter_cancelled: false,
            fetch_rows: 20,
            display_rows: 10,
            columns: Column::defaults(),
            header: None,
            debug: false,
        }
    }
}

// The token stays out of logs.
impl std::fmt::Debug for WidgetConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WidgetConfig")
            .field("id", &self.id)
            .field("station", &self.station)
            .field("token", &if self.token.is_empty() { "" } else { "<redacted>" })
            .field("update_interval_ms", &self.update_interval_ms)
            .field("initial_load_delay_ms", &self.initial_load_delay_ms)
            .field("filter_destination", &self.filter_destination)
            .field("filter_first_stop", &self.filter_first_stop)
            .field("filter_cancelled", &self.filter_cancelled)
            .field("fetch_rows", &self.fetch_rows)
            .field("display_rows", &self.display_rows)
            .field("columns", &self.columns)
            .field("header", &self.header)
            .field("debug", &self.debug)
            .finish()
    }
}

/// A configuration that has passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetSetup {
    pub station: Crs,
    pub query: BoardQuery,
    pub filter: BoardFilter,
}

impl WidgetConfig {
    pub fn update_interval(&self) -> Duration {
        Duration::from_millis(self.update_interval_ms)
    }

    pub fn initial_load_delay(&self) -> Duration {
        Duration::from_millis(self.initial_load_delay_ms)
    }

    /// Validate the configuration.
    ///
    /// A missing station is reported before a missing token, and both
    /// before any malformed code.
    pub fn validate(&self) -> Result<WidgetSetup, ConfigError> {
        if self.station.trim().is_empty() {
            return Err(ConfigError::MissingStation);
        }
        if self.token.is_empty() {
            return Err(ConfigError::MissingToken);
        }
        if self.update_interval_ms == 0 {
            return Err(ConfigError::ZeroInterval);
        }

        let station = parse_code(&self.station)?;
        let filter_destination = parse_codes(&self.filter_destination)?;
        let filter_first_stop = parse_codes(&self.filter_first_stop)?;

        let rows = u8::try_from(self.fetch_rows)
            .map_or(MAX_FETCH_ROWS, |r| r.min(MAX_FETCH_ROWS));

        // Darwin can only filter on one destination; with several, the
        // whole board is fetched and filtered locally.
        let query = match filter_destination.as_slice() {
            [only] => BoardQuery::new(rows).calling_at(*only),
            _ => BoardQuery::new(rows),
        };

        Ok(WidgetSetup {
            station,
            query,
            filter: BoardFilter {
                filter_destination,
                filter_first_stop,
                filter_cancelled: self.filter_cancelled,
                display_rows: self.display_rows,
            },
        })
    }
}

fn parse_code(code: &str) -> Result<Crs, ConfigError> {
    Crs::parse_normalized(code).map_err(|_| ConfigError::InvalidCrs {
        code: code.to_string(),
    })
}

fn parse_codes(codes: &[String]) -> Result<Vec<Crs>, ConfigError> {
    codes.iter().map(|c| parse_code(c)).collect()
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

fn one_or_many<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(s) if s.trim().is_empty() => Vec::new(),
        OneOrMany::One(s) => vec![s],
        OneOrMany::Many(v) => v,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> WidgetConfig {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn defaults() {
        let config = parse("{}");

        assert_eq!(config.update_interval(), Duration::from_secs(300));
        assert_eq!(config.initial_load_delay(), Duration::ZERO);
        assert_eq!(config.fetch_rows, 20);
        assert_eq!(config.display_rows, 10);
        assert_eq!(config.columns, Column::defaults());
        assert!(!config.filter_cancelled);
        assert!(!config.debug);
    }

    #[test]
    fn accepts_camel_case_keys() {
        let config = parse(
            r#"{
                "station": "PAD",
                "token": "t",
                "updateInterval": 60000,
                "initialLoadDelay": 2500,
                "filterDestination": ["BRI", "OXF"],
                "filterFirstStop": ["RDG"],
                "filterCancelled": true,
                "fetchRows": 30,
                "displayRows": 5,
                "columns": ["dep_scheduled", "destination", "eta", "duration"],
                "header": "Westbound"
            }"#,
        );

        assert_eq!(config.update_interval(), Duration::from_secs(60));
        assert_eq!(config.initial_load_delay(), Duration::from_millis(2500));
        assert_eq!(config.filter_destination, ["BRI", "OXF"]);
        assert_eq!(config.filter_first_stop, ["RDG"]);
        assert!(config.filter_cancelled);
        assert_eq!(config.fetch_rows, 30);
        assert_eq!(config.display_rows, 5);
        assert_eq!(
            config.columns,
            [Column::DepScheduled, Column::Destination, Column::Eta, Column::Duration]
        );
        assert_eq!(config.header.as_deref(), Some("Westbound"));
    }

    #[test]
    fn single_destination_string() {
        assert_eq!(parse(r#"{"filterDestination": "BRI"}"#).filter_destination, ["BRI"]);
        assert!(parse(r#"{"filterDestination": ""}"#).filter_destination.is_empty());
    }

    #[test]
    fn validate_reports_missing_fields_in_order() {
        assert!(matches!(parse("{}").validate(), Err(ConfigError::MissingStation)));
        assert!(matches!(
            parse(r#"{"station": "PAD"}"#).validate(),
            Err(ConfigError::MissingToken)
        ));
        assert!(matches!(
            parse(r#"{"station": "PAD", "token": "t", "updateInterval": 0}"#).validate(),
            Err(ConfigError::ZeroInterval)
        ));
    }

    #[test]
    fn validate_rejects_bad_codes() {
        let err = parse(r#"{"station": "PAD", "token": "t", "filterFirstStop": ["RDG", "R1"]}"#)
            .validate()
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidCrs { code } if code == "R1"));

        let err = parse(r#"{"station": "Paddington", "token": "t"}"#)
            .validate()
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid station code: Paddington");
    }

    #[test]
    fn single_destination_is_sent_to_darwin() {
        let setup = parse(r#"{"station": "pad", "token": "t", "filterDestination": "bri"}"#)
            .validate()
            .unwrap();

        assert_eq!(setup.station, Crs::parse("PAD").unwrap());
        assert_eq!(setup.query.rows, 20);
        assert_eq!(setup.query.destination, Crs::parse("BRI").ok());
        assert_eq!(setup.filter.filter_destination, [Crs::parse("BRI").unwrap()]);
    }

    #[test]
    fn several_destinations_filtered_locally() {
        let setup = parse(
            r#"{"station": "PAD", "token": "t", "filterDestination": ["BRI", "OXF"], "displayRows": 3}"#,
        )
        .validate()
        .unwrap();

        assert_eq!(setup.query.destination, None);
        assert_eq!(setup.filter.filter_destination.len(), 2);
        assert_eq!(setup.filter.display_rows, 3);
    }

    #[test]
    fn oversized_fetch_rows_capped() {
        let setup = parse(r#"{"station": "PAD", "token": "t", "fetchRows": 300}"#)
            .validate()
            .unwrap();
        assert_eq!(setup.query.rows, MAX_FETCH_ROWS);

        let setup = parse(r#"{"station": "PAD", "token": "t", "fetchRows": 149}"#)
            .validate()
            .unwrap();
        assert_eq!(setup.query.rows, 149);
    }

    #[test]
    fn debug_redacts_token() {
        let config = parse(r#"{"station": "PAD", "token": "secret"}"#);
        let debug = format!("{config:?}");
        assert!(!debug.contains("secret"));
        assert!(debug.contains("<redacted>"));
    }
}
