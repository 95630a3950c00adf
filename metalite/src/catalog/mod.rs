// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Catalog records and the collections they live in
//!
//! Records come from a pluggable [`RecordSource`](source::RecordSource), are
//! validated into an immutable [`CatalogSnapshot`](snapshot::CatalogSnapshot)
//! and are only ever read afterwards.

pub mod error;
pub mod index;
pub mod lookup;
pub mod record;
pub mod snapshot;
pub mod source;

pub use error::{CatalogError, CatalogResult};
pub use index::TagIndex;
pub use lookup::lookup;
pub use record::{
    CatalogRecord, FreshnessDataPoint, Lineage, LineageNode, Owner, SchemaColumn,
    UsageDataPoint, UsageSummary,
};
pub use snapshot::CatalogSnapshot;
pub use source::{JsonFileRecordSource, MemoryRecordSource, RecordSource};
