//! Mock Darwin client for running without API access.
//!
//! Loads departure boards from JSON files and serves them as if they were
//! live API responses.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use tracing::info;

use crate::domain::{Crs, DepartureRecord};

use super::convert::convert_station_board;
use super::error::DarwinError;
use super::source::{BoardQuery, DepartureSource};
use super::types::StationBoardWithDetails;

/// Mock Darwin client that serves data from JSON files.
#[derive(Debug, Clone)]
pub struct MockDarwinClient {
    /// Pre-loaded station boards, keyed by CRS.
    boards: Arc<HashMap<Crs, StationBoardWithDetails>>,
}

impl MockDarwinClient {
    /// Create a new mock client by loading JSON files from a directory.
    ///
    /// Expects files named `{CRS}.json` (e.g., `PAD.json`, `KGX.json`).
    pub fn new(data_dir: impl AsRef<Path>) -> Result<Self, DarwinError> {
        let data_dir = data_dir.as_ref();
        let mut boards = HashMap::new();

        let entries = std::fs::read_dir(data_dir).map_err(|e| {
            DarwinError::Mock(format!("failed to read {}: {e}", data_dir.display()))
        })?;

        for entry in entries {
            let path = entry
                .map_err(|e| DarwinError::Mock(format!("failed to read directory entry: {e}")))?
                .path();
            if !path.is_file() || path.extension().and_then(|s| s.to_str()) != Some("json") {
                continue;
            }

            let Some(crs) = path
                .file_stem()
                .and_then(|s| s.to_str())
                .and_then(|s| Crs::parse(s).ok())
            else {
                continue;
            };

            let json = std::fs::read_to_string(&path)
                .map_err(|e| DarwinError::Mock(format!("failed to read {}: {e}", path.display())))?;
            let board: StationBoardWithDetails = serde_json::from_str(&json).map_err(|e| {
                DarwinError::Mock(format!("failed to parse {}: {e}", path.display()))
            })?;

            boards.insert(crs, board);
        }

        if boards.is_empty() {
            return Err(DarwinError::Mock(format!(
                "no board files found in {}",
                data_dir.display()
            )));
        }

        info!(boards = boards.len(), dir = %data_dir.display(), "loaded mock departure boards");

        Ok(Self {
            boards: Arc::new(boards),
        })
    }
}

impl DepartureSource for MockDarwinClient {
    /// Serves the stored board, applying the row limit and destination
    /// filter the way Darwin would.
    async fn fetch_departures(
        &self,
        station: Crs,
        query: BoardQuery,
    ) -> Result<Option<Vec<DepartureRecord>>, DarwinError> {
        let board = self
            .boards
            .get(&station)
            .ok_or_else(|| DarwinError::Mock(format!("no board for station {station}")))?;

        Ok(convert_station_board(board).map(|records| {
            records
                .into_iter()
                .filter(|r| query.destination.is_none_or(|d| r.calls_at_any(&[d])))
                .take(usize::from(query.rows))
                .collect()
        }))
    }
}
