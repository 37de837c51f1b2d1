//! Darwin LDB HTTP client.
//!
//! Fetches departure boards with calling points from the Darwin Live
//! Departure Boards API and converts them to departure records.

use reqwest::header::{HeaderMap, HeaderValue};
use tracing::debug;

use crate::domain::{Crs, DepartureRecord};

use super::convert::convert_station_board;
use super::error::DarwinError;
use super::source::{BoardQuery, DepartureSource};
use super::types::StationBoardWithDetails;

/// Default base URL for Darwin LDB API.
pub const DEFAULT_BASE_URL: &str =
    "https://api1.raildata.org.uk/1010-live-departure-board-dep-with-details/LDBWS";

/// Configuration for the Darwin client.
#[derive(Debug, Clone)]
pub struct DarwinConfig {
    /// API key for authentication
    pub api_key: String,
    /// Base URL for the API (defaults to production Darwin)
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl DarwinConfig {
    /// Create a new config with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
        }
    }

    /// Set a custom base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Darwin LDB API client.
///
/// One client is created per widget, since each widget carries its own
/// API token.
#[derive(Debug, Clone)]
pub struct DarwinClient {
    http: reqwest::Client,
    base_url: String,
}

impl DarwinClient {
    /// Create a new Darwin client with the given configuration.
    pub fn new(config: DarwinConfig) -> Result<Self, DarwinError> {
        let mut headers = HeaderMap::new();

        // Darwin uses "x-apikey" for authentication
        let mut api_key =
            HeaderValue::from_str(&config.api_key).map_err(|_| DarwinError::InvalidToken)?;
        api_key.set_sensitive(true);
        headers.insert("x-apikey", api_key);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Board URL for a station.
    fn board_url(&self, crs: &Crs) -> String {
        format!(
            "{}/api/20220120/GetDepBoardWithDetails/{}",
            self.base_url,
            crs.as_str()
        )
    }

    /// Get the raw departure board response.
    ///
    /// When `query.destination` is set, Darwin itself filters to services
    /// calling there. It only accepts one such station per request.
    pub async fn get_departure_board(
        &self,
        crs: &Crs,
        query: &BoardQuery,
    ) -> Result<StationBoardWithDetails, DarwinError> {
        let mut params = vec![("numRows", query.rows.to_string())];
        if let Some(dest) = query.destination {
            params.push(("filterCrs", dest.as_str().to_string()));
            params.push(("filterType", "to".to_string()));
        }

        debug!(station = %crs, ?query, "requesting departure board");

        let response = self.http.get(self.board_url(crs)).query(&params).send().await?;

        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(DarwinError::Unauthorized);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(DarwinError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DarwinError::ApiError {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| DarwinError::Json {
            message: e.to_string(),
            body: Some(body.chars().take(500).collect()),
        })
    }
}

impl DepartureSource for DarwinClient {
    async fn fetch_departures(
        &self,
        station: Crs,
        query: BoardQuery,
    ) -> Result<Option<Vec<DepartureRecord>>, DarwinError> {
        let board = self.get_departure_board(&station, &query).await?;
        debug!(
            station = %board.location_name,
            services = board.train_services.as_ref().map_or(0, Vec::len),
            "departure board received"
        );
        Ok(convert_station_board(&board))
    }
}
