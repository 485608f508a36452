//! Process-lifetime station table cache keyed by source location.
//!
//! Tables are never evicted or expired. Callers that need fresh data call
//! [`StationCache::invalidate`] or restart the process. Failed loads are
//! not cached.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use aed_map_station_models::StationTable;
use tokio::sync::Mutex;

use crate::csv_download::parse_stations;
use crate::fetch::{DEFAULT_FETCH_TIMEOUT, SourceLocation, fetch_bytes};
use crate::{ColumnMapping, FetchError, SourceError};

/// Per-source entry. Its lock is held while that source is being fetched.
type Slot = Arc<Mutex<Option<Arc<StationTable>>>>;

/// Memoizes loaded station tables per source location.
///
/// Concurrent first requests for one source download the feed only once.
/// A slow source never blocks lookups of other sources.
pub struct StationCache {
    columns: ColumnMapping,
    timeout: Duration,
    slots: Mutex<BTreeMap<String, Slot>>,
}

impl StationCache {
    /// Creates an empty cache that parses feeds with `columns`.
    #[must_use]
    pub fn new(columns: ColumnMapping) -> Self {
        Self {
            columns,
            timeout: DEFAULT_FETCH_TIMEOUT,
            slots: Mutex::new(BTreeMap::new()),
        }
    }

    /// Sets how long a remote feed may take before a load fails.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Column mapping used to parse feeds.
    #[must_use]
    pub const fn columns(&self) -> &ColumnMapping {
        &self.columns
    }

    /// Returns the station table for `source`, fetching it on first use.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::DataUnavailable`] if the feed cannot be
    /// fetched within the timeout or parsed.
    pub async fn load(&self, source: &str) -> Result<Arc<StationTable>, SourceError> {
        let slot = Arc::clone(self.slots.lock().await.entry(source.to_owned()).or_default());
        let mut entry = slot.lock().await;

        if let Some(table) = entry.as_ref() {
            log::debug!("Station cache hit for {source}");
            return Ok(Arc::clone(table));
        }

        let table = self
            .fetch(source)
            .await
            .map_err(|reason| SourceError::DataUnavailable {
                source_location: source.to_owned(),
                reason,
            })?;

        log::info!("Loaded {} stations from {source}", table.len());

        let table = Arc::new(table);
        *entry = Some(Arc::clone(&table));
        Ok(table)
    }

    /// Drops the cached table for `source`. Returns whether one was cached.
    ///
    /// A load still in flight for `source` completes for its caller, but
    /// its result is not kept.
    pub async fn invalidate(&self, source: &str) -> bool {
        let removed = self
            .slots
            .lock()
            .await
            .remove(source)
            .is_some_and(|slot| is_filled(&slot));
        if removed {
            log::info!("Invalidated cached stations for {source}");
        }
        removed
    }

    /// Drops every cached table.
    pub async fn clear(&self) {
        self.slots.lock().await.clear();
    }

    /// Whether a table for `source` is currently cached.
    pub async fn contains(&self, source: &str) -> bool {
        self.slots.lock().await.get(source).is_some_and(is_filled)
    }

    async fn fetch(&self, source: &str) -> Result<StationTable, FetchError> {
        let bytes = fetch_bytes(&SourceLocation::parse(source), self.timeout).await?;
        parse_stations(&bytes, &self.columns)
    }
}

/// A slot locked by an in-flight load holds nothing yet.
fn is_filled(slot: &Slot) -> bool {
    slot.try_lock().is_ok_and(|table| table.is_some())
}

impl Default for StationCache {
    fn default() -> Self {
        Self::new(ColumnMapping::default())
    }
}
