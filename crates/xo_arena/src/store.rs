//! Statistics persisted as JSON.

use chrono::{DateTime, Utc};
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};
use xo_engine::Statistics;

/// Statistics file used when none is given.
pub const DEFAULT_STATS_FILE: &str = "xo_stats.json";

/// What is written to disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
pub struct StatsRecord {
    /// Accumulated statistics.
    statistics: Statistics,
    /// When the record was written.
    saved_at: DateTime<Utc>,
}

/// File-backed statistics store.
#[derive(Debug, Clone, derive_new::new)]
pub struct StatsStore {
    path: PathBuf,
}

impl StatsStore {
    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the stored record, if any.
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub fn load_record(&self) -> Result<Option<StatsRecord>, StoreError> {
        if !self.path.exists() {
            debug!("No statistics file");
            return Ok(None);
        }

        let content = std::fs::read_to_string(&self.path)?;
        let record: StatsRecord = serde_json::from_str(&content)?;
        info!(saved_at = %record.saved_at, "Statistics loaded");
        Ok(Some(record))
    }

    /// Reads stored statistics, or empty statistics if nothing is stored.
    #[instrument(skip(self))]
    pub fn load(&self) -> Result<Statistics, StoreError> {
        Ok(self
            .load_record()?
            .map(|record| record.statistics)
            .unwrap_or_default())
    }

    /// Writes `statistics` with the current time.
    #[instrument(skip(self, statistics), fields(path = %self.path.display()))]
    pub fn save(&self, statistics: &Statistics) -> Result<StatsRecord, StoreError> {
        let record = StatsRecord {
            statistics: statistics.clone(),
            saved_at: Utc::now(),
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, serde_json::to_string_pretty(&record)?)?;

        info!("Statistics saved");
        Ok(record)
    }

    /// Deletes the stored statistics.
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub fn clear(&self) -> Result<(), StoreError> {
        if self.path.exists() {
            std::fs::remove_file(&self.path)?;
            info!("Statistics cleared");
        }
        Ok(())
    }
}

impl Default for StatsStore {
    fn default() -> Self {
        Self::new(PathBuf::from(DEFAULT_STATS_FILE))
    }
}

/// Statistics store error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Store error: {} at {}:{}", message, file, line)]
pub struct StoreError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl StoreError {
    /// Creates a new store error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

impl From<std::io::Error> for StoreError {
    #[track_caller]
    fn from(err: std::io::Error) -> Self {
        Self::new(format!("I/O error: {}", err))
    }
}

impl From<serde_json::Error> for StoreError {
    #[track_caller]
    fn from(err: serde_json::Error) -> Self {
        Self::new(format!("JSON error: {}", err))
    }
}
