// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Catalog Coordinator - entry point for catalog queries and lookups
//!
//! Wraps a record source, the current snapshot and a query engine. Every
//! call works on the snapshot that was current when it started; `refresh`
//! swaps in a new one without disturbing calls already in flight.

use crate::catalog::{
    CatalogRecord, CatalogResult, CatalogSnapshot, JsonFileRecordSource, MemoryRecordSource,
    RecordSource,
};
use crate::clock::{Clock, SystemClock};
use crate::config::EngineConfig;
use crate::query::{QueryCriteria, QueryEngine, QueryRequest, QueryResult};
use parking_lot::RwLock;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

pub struct CatalogCoordinator {
    source: Arc<dyn RecordSource>,
    engine: QueryEngine,
    snapshot: RwLock<Arc<CatalogSnapshot>>,
    generation: AtomicU64,
}

impl CatalogCoordinator {
    /// Create a coordinator and load the first snapshot
    ///
    /// # Arguments
    /// * `source` - Upstream record supplier
    /// * `clock` - Time source for recency phrases
    /// * `config` - Engine configuration
    ///
    /// # Returns
    /// * `Ok(CatalogCoordinator)` - ready to serve queries
    /// * `Err(CatalogError)` - invalid config, or the source could not
    ///   produce a valid snapshot
    pub fn new(
        source: Arc<dyn RecordSource>,
        clock: Arc<dyn Clock>,
        config: EngineConfig,
    ) -> CatalogResult<Self> {
        config.validate()?;

        let snapshot = CatalogSnapshot::load(source.as_ref(), 0)?;
        log::info!(
            "Loaded catalog snapshot from {}: {} records, {} tags",
            source.name(),
            snapshot.len(),
            snapshot.tag_index().tag_count()
        );

        Ok(Self {
            source,
            engine: QueryEngine::new(clock, config),
            snapshot: RwLock::new(Arc::new(snapshot)),
            generation: AtomicU64::new(0),
        })
    }

    /// Coordinator over an in-memory collection using the wall clock
    pub fn from_records(records: Vec<CatalogRecord>, config: EngineConfig) -> CatalogResult<Self> {
        Self::new(
            Arc::new(MemoryRecordSource::new(records)),
            Arc::new(SystemClock),
            config,
        )
    }

    /// Coordinator over a JSON record file using the wall clock
    pub fn from_json_file(path: impl AsRef<Path>, config: EngineConfig) -> CatalogResult<Self> {
        Self::new(
            Arc::new(JsonFileRecordSource::new(path)),
            Arc::new(SystemClock),
            config,
        )
    }

    pub fn config(&self) -> &EngineConfig {
        self.engine.config()
    }

    pub fn source_name(&self) -> &str {
        self.source.name()
    }

    /// The snapshot new calls will run against
    pub fn snapshot(&self) -> Arc<CatalogSnapshot> {
        self.snapshot.read().clone()
    }

    /// Search, filter and paginate the current snapshot
    pub fn query(&self, criteria: &QueryCriteria) -> CatalogResult<QueryResult> {
        let snapshot = self.snapshot();
        self.engine.query_snapshot(&snapshot, criteria)
    }

    /// Same as [`query`](Self::query), filling omitted page/limit from config
    pub fn query_request(&self, request: QueryRequest) -> CatalogResult<QueryResult> {
        let criteria = request.into_criteria(self.engine.config())?;
        self.query(&criteria)
    }

    /// Fetch one record by identifier; `None` if unknown
    pub fn lookup(&self, id: &str) -> Option<CatalogRecord> {
        self.snapshot().lookup(id).cloned()
    }

    /// Reload from the source and swap the snapshot
    ///
    /// On failure the previous snapshot stays in service and the error is
    /// returned.
    ///
    /// # Returns
    /// * `Ok(usize)` - number of records in the new snapshot
    pub fn refresh(&self) -> CatalogResult<usize> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        let snapshot = match CatalogSnapshot::load(self.source.as_ref(), generation) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                log::warn!(
                    "Refresh from {} failed, keeping previous snapshot: {}",
                    self.source.name(),
                    e
                );
                return Err(e);
            }
        };

        let count = snapshot.len();
        {
            let mut current = self.snapshot.write();
            // A slower concurrent refresh must not replace a newer snapshot
            if current.generation() < generation {
                *current = Arc::new(snapshot);
            }
        }
        log::info!(
            "Refreshed catalog snapshot from {}: generation {}, {} records",
            self.source.name(),
            generation,
            count
        );
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CatalogError, Lineage, Owner};
    use crate::clock::FixedClock;
    use chrono::{TimeZone, Utc};

    fn record(id: &str) -> CatalogRecord {
        CatalogRecord {
            id: id.to_string(),
            name: format!("dwh.{}", id),
            description: String::new(),
            owner: Owner {
                id: "o".to_string(),
                name: "Owner".to_string(),
                email: "owner@example.com".to_string(),
            },
            last_updated: Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap(),
            tags: vec!["Product".to_string()],
            schema: vec![],
            lineage: Lineage::default(),
            usage: vec![],
            freshness: vec![],
        }
    }

    #[test]
    fn test_rejects_invalid_config() {
        let config = EngineConfig {
            default_limit: 0,
            ..EngineConfig::default()
        };
        assert!(matches!(
            CatalogCoordinator::from_records(vec![record("a")], config),
            Err(CatalogError::ConfigError(_))
        ));
    }

    #[test]
    fn test_rejects_duplicate_ids_on_load() {
        assert!(matches!(
            CatalogCoordinator::from_records(vec![record("a"), record("a")], EngineConfig::default()),
            Err(CatalogError::DuplicateRecord(_))
        ));
    }

    #[test]
    fn test_query_request_uses_defaults() {
        let records = (0..15).map(|i| record(&format!("r{}", i))).collect();
        let coordinator = CatalogCoordinator::new(
            Arc::new(MemoryRecordSource::new(records)),
            Arc::new(FixedClock::new(Utc.with_ymd_and_hms(2024, 6, 15, 0, 0, 0).unwrap())),
            EngineConfig::default(),
        )
        .unwrap();

        let result = coordinator.query_request(QueryRequest::default()).unwrap();
        assert_eq!(result.total_count, 15);
        assert_eq!(result.records.len(), 10);
        assert_eq!(result.page, 1);
    }

    #[test]
    fn test_lookup_returns_owned_record() {
        let coordinator =
            CatalogCoordinator::from_records(vec![record("a")], EngineConfig::default()).unwrap();
        assert_eq!(coordinator.lookup("a").map(|r| r.id), Some("a".to_string()));
        assert!(coordinator.lookup("nonexistent-id").is_none());
        assert_eq!(coordinator.source_name(), "memory");
    }
}
