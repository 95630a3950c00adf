// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Point lookup by record identifier

use super::record::CatalogRecord;

/// Find a record by identifier with a linear scan
///
/// Returns the first match, which is the only one when identifiers are
/// unique. An unknown identifier is `None`, never an error.
pub fn lookup<'a>(records: &'a [CatalogRecord], id: &str) -> Option<&'a CatalogRecord> {
    records.iter().find(|record| record.id == id)
}
