// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Immutable catalog snapshots
//!
//! A snapshot is the validated record collection a query or lookup runs
//! against. It is never mutated after construction; refreshing the catalog
//! builds a new snapshot and swaps the `Arc`, so readers holding the old one
//! finish undisturbed.

use super::error::{CatalogError, CatalogResult};
use super::index::TagIndex;
use super::record::CatalogRecord;
use super::source::RecordSource;
use std::collections::HashMap;

#[derive(Debug, Clone)]
pub struct CatalogSnapshot {
    records: Vec<CatalogRecord>,
    id_index: HashMap<String, usize>,
    tag_index: TagIndex,
    generation: u64,
}

impl CatalogSnapshot {
    /// Validate `records` and build the lookup and tag indexes
    ///
    /// # Returns
    /// * `Err(CatalogError::InvalidRecord)` if any record breaks a data model invariant
    /// * `Err(CatalogError::DuplicateRecord)` if two records share an identifier
    pub fn new(records: Vec<CatalogRecord>) -> CatalogResult<Self> {
        Self::with_generation(records, 0)
    }

    pub(crate) fn with_generation(records: Vec<CatalogRecord>, generation: u64) -> CatalogResult<Self> {
        let mut id_index = HashMap::with_capacity(records.len());

        for (position, record) in records.iter().enumerate() {
            record.validate()?;
            if id_index.insert(record.id.clone(), position).is_some() {
                return Err(CatalogError::DuplicateRecord(record.id.clone()));
            }
        }

        let tag_index = TagIndex::build(&records);

        Ok(Self {
            records,
            id_index,
            tag_index,
            generation,
        })
    }

    /// Pull a full collection from `source` and build a snapshot from it
    pub fn load(source: &dyn RecordSource, generation: u64) -> CatalogResult<Self> {
        let records = source.get_all()?;
        Self::with_generation(records, generation)
    }

    pub fn records(&self) -> &[CatalogRecord] {
        &self.records
    }

    pub fn tag_index(&self) -> &TagIndex {
        &self.tag_index
    }

    /// Monotonic counter bumped on every coordinator refresh
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Indexed lookup by identifier
    pub fn lookup(&self, id: &str) -> Option<&CatalogRecord> {
        self.id_index.get(id).map(|&position| &self.records[position])
    }
}
