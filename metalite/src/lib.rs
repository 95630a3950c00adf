// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! MetaLite - A lightweight data catalog query engine
//!
//! MetaLite serves a catalog of data-asset records (datasets with owners,
//! schemas, lineage and usage/freshness history) through two operations:
//! a paginated search and a point lookup by identifier.
//!
//! # Features
//!
//! - **Free-text search**: case-insensitive match on dataset names and tags
//! - **Recency phrases**: "updated last 2 weeks" in the search box becomes a cutoff
//! - **Tag filtering**: every requested tag must be present
//! - **Deterministic pagination**: stable source order, total count before paging
//! - **Snapshots**: queries run on an immutable, refreshable snapshot
//!
//! # Usage
//!
//! ```no_run
//! use metalite::{CatalogCoordinator, EngineConfig, QueryCriteria};
//!
//! let catalog = CatalogCoordinator::from_json_file("./datasets.json", EngineConfig::default())?;
//!
//! let criteria = QueryCriteria::builder()
//!     .search("updated last week")
//!     .tag("Finance")
//!     .build()?;
//! let page = catalog.query(&criteria)?;
//! println!("{} matching datasets", page.total_count);
//!
//! if let Some(dataset) = catalog.lookup("some-id") {
//!     println!("{} owned by {}", dataset.name, dataset.owner.name);
//! }
//! # Ok::<(), metalite::CatalogError>(())
//! ```

pub mod catalog;
pub mod clock;
pub mod config;
pub mod coordinator;
pub mod query;

pub use catalog::{
    lookup, CatalogError, CatalogRecord, CatalogResult, CatalogSnapshot, FreshnessDataPoint,
    JsonFileRecordSource, Lineage, LineageNode, MemoryRecordSource, Owner, RecordSource,
    SchemaColumn, UsageDataPoint, UsageSummary,
};
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::EngineConfig;
pub use coordinator::CatalogCoordinator;
pub use query::{
    find_phrase, parse_recency, FilterPredicate, QueryCriteria, QueryEngine, QueryRequest,
    QueryResult, RecencyMatch, RecencyPhrase, RecencyUnit,
};

/// MetaLite version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// MetaLite crate name
pub const CRATE_NAME: &str = env!("CARGO_PKG_NAME");
