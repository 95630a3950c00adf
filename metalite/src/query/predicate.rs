// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Composite record filter
//!
//! Three independent conditions, ANDed. An absent condition always passes.
//! - text: case-insensitive substring of the name or of any tag
//! - tags: every requested tag present, exact case-sensitive equality
//! - cutoff: `last_updated >= cutoff`

use crate::catalog::CatalogRecord;
use chrono::{DateTime, Utc};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterPredicate {
    /// Lowercased, trimmed; `None` when absent or blank
    text_term: Option<String>,
    tags: BTreeSet<String>,
    cutoff: Option<DateTime<Utc>>,
}

impl FilterPredicate {
    pub fn new(
        text_term: Option<&str>,
        tags: &BTreeSet<String>,
        cutoff: Option<DateTime<Utc>>,
    ) -> Self {
        let text_term = text_term
            .map(str::trim)
            .filter(|term| !term.is_empty())
            .map(str::to_lowercase);

        Self {
            text_term,
            tags: tags.clone(),
            cutoff,
        }
    }

    /// Predicate that accepts every record
    pub fn always() -> Self {
        Self::default()
    }

    pub fn text_term(&self) -> Option<&str> {
        self.text_term.as_deref()
    }

    pub fn tags(&self) -> &BTreeSet<String> {
        &self.tags
    }

    pub fn cutoff(&self) -> Option<DateTime<Utc>> {
        self.cutoff
    }

    pub fn is_unconstrained(&self) -> bool {
        self.text_term.is_none() && self.tags.is_empty() && self.cutoff.is_none()
    }

    pub fn matches(&self, record: &CatalogRecord) -> bool {
        self.matches_text(record) && self.matches_tags(record) && self.matches_cutoff(record)
    }

    fn matches_text(&self, record: &CatalogRecord) -> bool {
        let Some(term) = &self.text_term else {
            return true;
        };

        record.name.to_lowercase().contains(term.as_str())
            || record
                .tags
                .iter()
                .any(|tag| tag.to_lowercase().contains(term.as_str()))
    }

    fn matches_tags(&self, record: &CatalogRecord) -> bool {
        self.tags.iter().all(|tag| record.has_tag(tag))
    }

    fn matches_cutoff(&self, record: &CatalogRecord) -> bool {
        self.cutoff.map_or(true, |cutoff| record.last_updated >= cutoff)
    }
}
