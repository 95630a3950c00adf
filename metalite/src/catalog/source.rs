// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Record source trait and the bundled implementations
//!
//! A record source is the upstream collaborator that owns the catalog records.
//! The query engine only ever asks it for a full, ordered snapshot; the order
//! it returns is the default presentation order.

use super::error::{CatalogError, CatalogResult};
use super::record::CatalogRecord;
use std::fs;
use std::path::{Path, PathBuf};

/// Upstream supplier of catalog records
pub trait RecordSource: Send + Sync {
    /// Name used in log lines and error messages
    fn name(&self) -> &str;

    /// Return every record, in presentation order
    ///
    /// Each call returns a complete snapshot. Implementations must not hand
    /// out a partially updated collection.
    fn get_all(&self) -> CatalogResult<Vec<CatalogRecord>>;
}

/// Record source backed by an owned vector
#[derive(Debug, Clone, Default)]
pub struct MemoryRecordSource {
    records: Vec<CatalogRecord>,
}

impl MemoryRecordSource {
    pub fn new(records: Vec<CatalogRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl RecordSource for MemoryRecordSource {
    fn name(&self) -> &str {
        "memory"
    }

    fn get_all(&self) -> CatalogResult<Vec<CatalogRecord>> {
        Ok(self.records.clone())
    }
}

/// Record source reading a JSON array of records from disk
///
/// The file is re-read on every `get_all`, so a coordinator refresh picks up
/// edits made since the last load.
#[derive(Debug, Clone)]
pub struct JsonFileRecordSource {
    path: PathBuf,
    name: String,
}

impl JsonFileRecordSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let name = format!("json:{}", path.display());
        Self { path, name }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RecordSource for JsonFileRecordSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn get_all(&self) -> CatalogResult<Vec<CatalogRecord>> {
        let contents = fs::read_to_string(&self.path).map_err(|e| {
            CatalogError::SourceError(format!("Failed to read {}: {}", self.path.display(), e))
        })?;

        let records: Vec<CatalogRecord> = serde_json::from_str(&contents)?;
        log::debug!(
            "Read {} records from {}",
            records.len(),
            self.path.display()
        );
        Ok(records)
    }
}
