// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Catalog query engine
//!
//! Evaluates a [`QueryCriteria`] against a record collection in four steps:
//!
//! 1. **Resolve** - a recency phrase in the search term replaces the term
//!    with a cutoff. An explicit `updated_since` is taken as-is.
//! 2. **Filter** - the composite predicate is applied in source order.
//! 3. **Count** - `total_count` covers the whole filtered sequence.
//! 4. **Paginate** - `(page - 1) * limit` onward, at most `limit` records.
//!
//! The engine holds no mutable state; identical inputs give identical output.

use super::criteria::QueryCriteria;
use super::predicate::FilterPredicate;
use super::recency::{parse_recency, RecencyPhrase};
use super::result::QueryResult;
use crate::catalog::{CatalogRecord, CatalogResult, CatalogSnapshot};
use crate::clock::Clock;
use crate::config::EngineConfig;
use chrono::{DateTime, Utc};
use std::collections::BTreeSet;
use std::sync::Arc;

/// Criteria after recency phrase resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedCriteria {
    /// Literal search term; cleared when a phrase matched
    pub text_term: Option<String>,
    pub tags: BTreeSet<String>,
    /// Effective cutoff (later of the phrase and explicit cutoffs)
    pub cutoff: Option<DateTime<Utc>>,
    /// Phrase recognized in the search term, if any
    pub phrase: Option<RecencyPhrase>,
}

impl ResolvedCriteria {
    pub fn predicate(&self) -> FilterPredicate {
        FilterPredicate::new(self.text_term.as_deref(), &self.tags, self.cutoff)
    }
}

pub struct QueryEngine {
    clock: Arc<dyn Clock>,
    config: EngineConfig,
}

impl QueryEngine {
    pub fn new(clock: Arc<dyn Clock>, config: EngineConfig) -> Self {
        Self { clock, config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Step 1: turn a recency phrase in the search term into a cutoff
    pub fn resolve(&self, criteria: &QueryCriteria) -> ResolvedCriteria {
        let recency = if self.config.recency_phrases {
            criteria
                .search
                .as_deref()
                .and_then(|search| parse_recency(search, self.clock.as_ref()))
        } else {
            None
        };

        match recency {
            Some(matched) => {
                // Both constraints hold, so the later instant is the binding one
                let cutoff = match criteria.updated_since {
                    Some(explicit) => explicit.max(matched.cutoff),
                    None => matched.cutoff,
                };
                ResolvedCriteria {
                    text_term: None,
                    tags: criteria.tags.clone(),
                    cutoff: Some(cutoff),
                    phrase: Some(matched.phrase),
                }
            }
            None => ResolvedCriteria {
                text_term: criteria.search.clone(),
                tags: criteria.tags.clone(),
                cutoff: criteria.updated_since,
                phrase: None,
            },
        }
    }

    /// Evaluate `criteria` over `records` with a full scan
    ///
    /// # Returns
    /// * `Ok(QueryResult)` - the requested page; empty past the last page
    /// * `Err(CatalogError::InvalidCriteria)` - page or limit below 1
    pub fn query(
        &self,
        records: &[CatalogRecord],
        criteria: &QueryCriteria,
    ) -> CatalogResult<QueryResult> {
        criteria.validate()?;
        let resolved = self.resolve(criteria);
        log_resolution(criteria, &resolved);

        let predicate = resolved.predicate();
        let matches = records.iter().filter(|record| predicate.matches(record));
        Ok(paginate(matches, criteria))
    }

    /// Evaluate `criteria` against a snapshot, using its tag index for
    /// candidate pre-selection when tags are requested
    ///
    /// Returns exactly what [`query`](Self::query) returns for
    /// `snapshot.records()`.
    pub fn query_snapshot(
        &self,
        snapshot: &CatalogSnapshot,
        criteria: &QueryCriteria,
    ) -> CatalogResult<QueryResult> {
        if !self.config.use_tag_index || criteria.tags.is_empty() {
            return self.query(snapshot.records(), criteria);
        }

        criteria.validate()?;
        let resolved = self.resolve(criteria);
        log_resolution(criteria, &resolved);

        let candidates = snapshot.tag_index().candidates(&resolved.tags);
        log::debug!(
            "Tag index narrowed {} records to {} candidates",
            snapshot.len(),
            candidates.len()
        );

        let predicate = resolved.predicate();
        let records = snapshot.records();
        let matches = candidates
            .into_iter()
            .map(|position| &records[position])
            .filter(|record| predicate.matches(record));
        Ok(paginate(matches, criteria))
    }
}

/// Steps 3 and 4 in one pass: count everything, keep the requested window
fn paginate<'a>(
    matches: impl Iterator<Item = &'a CatalogRecord>,
    criteria: &QueryCriteria,
) -> QueryResult {
    // An overflowing start index is past any real collection
    let window = criteria
        .start_index()
        .map(|start| start..start.saturating_add(criteria.limit));

    let mut total_count = 0;
    let mut records = Vec::new();
    for (position, record) in matches.enumerate() {
        if window.as_ref().is_some_and(|w| w.contains(&position)) {
            records.push(record.clone());
        }
        total_count += 1;
    }

    log::debug!(
        "Query matched {} records, returning {} (page {}, limit {})",
        total_count,
        records.len(),
        criteria.page,
        criteria.limit
    );

    QueryResult {
        total_count,
        records,
        page: criteria.page,
        limit: criteria.limit,
    }
}

fn log_resolution(criteria: &QueryCriteria, resolved: &ResolvedCriteria) {
    if let Some(phrase) = &resolved.phrase {
        log::debug!(
            "Search {:?} read as recency phrase '{}', cutoff {:?}",
            criteria.search,
            phrase,
            resolved.cutoff
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CatalogError, Lineage, Owner};
    use crate::clock::FixedClock;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    fn record(id: &str, name: &str, tags: &[&str], updated: DateTime<Utc>) -> CatalogRecord {
        CatalogRecord {
            id: id.to_string(),
            name: name.to_string(),
            description: String::new(),
            owner: Owner {
                id: "o".to_string(),
                name: "Owner".to_string(),
                email: "owner@example.com".to_string(),
            },
            last_updated: updated,
            tags: tags.iter().map(|t| t.to_string()).collect(),
            schema: vec![],
            lineage: Lineage::default(),
            usage: vec![],
            freshness: vec![],
        }
    }

    fn engine(config: EngineConfig) -> QueryEngine {
        QueryEngine::new(Arc::new(FixedClock::new(at(2024, 6, 15))), config)
    }

    fn records() -> Vec<CatalogRecord> {
        vec![
            record("1", "dwh.sales_1", &["Sales"], at(2024, 1, 1)),
            record("2", "dwh.mktg_2", &["Marketing"], at(2024, 6, 1)),
            record("3", "dwh.updated_orders", &["Sales", "PII"], at(2024, 6, 10)),
        ]
    }

    #[test]
    fn test_resolve_phrase_clears_search() {
        let criteria = QueryCriteria::builder()
            .search("updated last week")
            .build()
            .unwrap();
        let resolved = engine(EngineConfig::default()).resolve(&criteria);
        assert_eq!(resolved.text_term, None);
        assert_eq!(resolved.cutoff, Some(at(2024, 6, 8)));
        assert!(resolved.phrase.is_some());
    }

    #[test]
    fn test_resolve_plain_search_kept() {
        let criteria = QueryCriteria::builder().search("orders").build().unwrap();
        let resolved = engine(EngineConfig::default()).resolve(&criteria);
        assert_eq!(resolved.text_term.as_deref(), Some("orders"));
        assert_eq!(resolved.cutoff, None);
    }

    #[test]
    fn test_resolve_later_cutoff_wins() {
        let criteria = QueryCriteria::builder()
            .search("updated last 2 weeks")
            .updated_since(at(2024, 6, 5))
            .build()
            .unwrap();
        let resolved = engine(EngineConfig::default()).resolve(&criteria);
        assert_eq!(resolved.cutoff, Some(at(2024, 6, 5)));

        let criteria = QueryCriteria::builder()
            .search("updated last 2 weeks")
            .updated_since(at(2024, 5, 1))
            .build()
            .unwrap();
        let resolved = engine(EngineConfig::default()).resolve(&criteria);
        assert_eq!(resolved.cutoff, Some(at(2024, 6, 1)));
    }

    #[test]
    fn test_literal_config_skips_phrases() {
        let criteria = QueryCriteria::builder()
            .search("updated")
            .build()
            .unwrap();
        let result = engine(EngineConfig::literal_search())
            .query(&records(), &criteria)
            .unwrap();
        assert_eq!(result.total_count, 1);
        assert_eq!(result.records[0].id, "3");

        let criteria = QueryCriteria::builder()
            .search("updated last week")
            .build()
            .unwrap();
        let result = engine(EngineConfig::literal_search())
            .query(&records(), &criteria)
            .unwrap();
        assert_eq!(result.total_count, 0);
    }

    #[test]
    fn test_phrase_does_not_match_literal_word() {
        let criteria = QueryCriteria::builder()
            .search("updated last week")
            .build()
            .unwrap();
        let result = engine(EngineConfig::default())
            .query(&records(), &criteria)
            .unwrap();
        // Only the cutoff applies; record 3 qualifies by date, not by name
        assert_eq!(result.total_count, 1);
        assert_eq!(result.records[0].id, "3");
    }

    #[test]
    fn test_invalid_criteria_rejected() {
        let e = engine(EngineConfig::default());
        assert!(matches!(
            e.query(&records(), &QueryCriteria::page(0, 10)),
            Err(CatalogError::InvalidCriteria(_))
        ));
        assert!(matches!(
            e.query(&records(), &QueryCriteria::page(1, 0)),
            Err(CatalogError::InvalidCriteria(_))
        ));
    }

    #[test]
    fn test_pagination_window() {
        let e = engine(EngineConfig::default());
        let page1 = e.query(&records(), &QueryCriteria::page(1, 2)).unwrap();
        let page2 = e.query(&records(), &QueryCriteria::page(2, 2)).unwrap();
        let page3 = e.query(&records(), &QueryCriteria::page(3, 2)).unwrap();

        assert_eq!(page1.total_count, 3);
        assert_eq!(page1.records.len(), 2);
        assert_eq!(page2.records.len(), 1);
        assert_eq!(page2.records[0].id, "3");
        assert!(page3.is_empty());
        assert_eq!(page3.total_count, 3);
    }

    #[test]
    fn test_overflowing_page_is_empty() {
        let e = engine(EngineConfig::default());
        let result = e
            .query(&records(), &QueryCriteria::page(usize::MAX, usize::MAX))
            .unwrap();
        assert_eq!(result.total_count, 3);
        assert!(result.is_empty());
    }

    #[test]
    fn test_snapshot_query_matches_scan() {
        let snapshot = CatalogSnapshot::new(records()).unwrap();
        let e = engine(EngineConfig::default());
        let criteria = QueryCriteria::builder().tag("Sales").limit(1).page(2).build().unwrap();

        let indexed = e.query_snapshot(&snapshot, &criteria).unwrap();
        let scanned = e.query(snapshot.records(), &criteria).unwrap();
        assert_eq!(indexed, scanned);
        assert_eq!(indexed.total_count, 2);
        assert_eq!(indexed.records[0].id, "3");
    }

    #[test]
    fn test_snapshot_query_validates_criteria() {
        let snapshot = CatalogSnapshot::new(records()).unwrap();
        let criteria = QueryCriteria {
            tags: ["Sales".to_string()].into_iter().collect(),
            ..QueryCriteria::page(0, 10)
        };
        assert!(matches!(
            engine(EngineConfig::default()).query_snapshot(&snapshot, &criteria),
            Err(CatalogError::InvalidCriteria(_))
        ));
    }
}
