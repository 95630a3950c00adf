// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Tag inverted index
//!
//! Maps each stored tag to the ascending positions of the records carrying
//! it. Intersecting posting lists yields candidates already in source order,
//! so the engine can skip records that cannot satisfy a tag filter without
//! changing the result.

use super::record::CatalogRecord;
use std::collections::{BTreeSet, HashMap};

#[derive(Debug, Clone, Default)]
pub struct TagIndex {
    postings: HashMap<String, Vec<usize>>,
}

impl TagIndex {
    pub fn build(records: &[CatalogRecord]) -> Self {
        let mut postings: HashMap<String, Vec<usize>> = HashMap::new();

        for (position, record) in records.iter().enumerate() {
            for tag in &record.tags {
                let list = postings.entry(tag.clone()).or_default();
                // A record listing the same tag twice is posted once
                if list.last() != Some(&position) {
                    list.push(position);
                }
            }
        }

        Self { postings }
    }

    /// Positions of records carrying every tag in `tags`, ascending
    ///
    /// An empty tag set has no meaningful candidate list; callers treat it as
    /// "no tag filter" and must not call this.
    pub fn candidates(&self, tags: &BTreeSet<String>) -> Vec<usize> {
        let mut lists = Vec::with_capacity(tags.len());
        for tag in tags {
            match self.postings.get(tag) {
                Some(list) => lists.push(list.as_slice()),
                None => return Vec::new(),
            }
        }

        // Start from the shortest list to keep the intersection cheap
        lists.sort_by_key(|list| list.len());
        let Some((first, rest)) = lists.split_first() else {
            return Vec::new();
        };

        first
            .iter()
            .copied()
            .filter(|position| rest.iter().all(|list| list.binary_search(position).is_ok()))
            .collect()
    }

    pub fn tag_count(&self) -> usize {
        self.postings.len()
    }

    /// Number of records carrying `tag`
    pub fn frequency(&self, tag: &str) -> usize {
        self.postings.get(tag).map_or(0, Vec::len)
    }

    /// Every indexed tag with its record count, sorted by tag
    pub fn tags(&self) -> Vec<(String, usize)> {
        let mut tags: Vec<(String, usize)> = self
            .postings
            .iter()
            .map(|(tag, list)| (tag.clone(), list.len()))
            .collect();
        tags.sort();
        tags
    }
}
