// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Query result page

use crate::catalog::CatalogRecord;
use serde::{Deserialize, Serialize};

/// One page of matching records plus the size of the whole match set
///
/// Serializes as the connection envelope `{ totalCount, datasets, page, limit }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResult {
    /// Matches before pagination
    pub total_count: usize,
    #[serde(rename = "datasets")]
    pub records: Vec<CatalogRecord>,
    pub page: usize,
    pub limit: usize,
}

impl QueryResult {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of pages needed for `total_count` at this limit
    pub fn total_pages(&self) -> usize {
        if self.limit == 0 {
            return 0;
        }
        self.total_count.div_ceil(self.limit)
    }

    pub fn has_next_page(&self) -> bool {
        self.page < self.total_pages()
    }
}
