// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Query criteria
//!
//! [`QueryCriteria`] is the immutable per-call request the engine evaluates.
//! [`QueryRequest`] is the looser transport shape (page and limit optional)
//! that is resolved into criteria using the configured defaults.

use crate::catalog::{CatalogError, CatalogResult};
use crate::config::EngineConfig;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryCriteria {
    /// 1-based page number
    pub page: usize,
    /// Page size, at least 1
    pub limit: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    /// Required tags. Empty means no tag filter.
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub tags: BTreeSet<String>,
    /// Explicit cutoff; never re-parsed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_since: Option<DateTime<Utc>>,
}

impl QueryCriteria {
    /// Unfiltered criteria for one page
    pub fn page(page: usize, limit: usize) -> Self {
        Self {
            page,
            limit,
            search: None,
            tags: BTreeSet::new(),
            updated_since: None,
        }
    }

    pub fn builder() -> QueryCriteriaBuilder {
        QueryCriteriaBuilder::default()
    }

    /// Reject page or limit below 1
    pub fn validate(&self) -> CatalogResult<()> {
        if self.page < 1 {
            return Err(CatalogError::InvalidCriteria(format!(
                "page must be at least 1, got {}",
                self.page
            )));
        }
        if self.limit < 1 {
            return Err(CatalogError::InvalidCriteria(format!(
                "limit must be at least 1, got {}",
                self.limit
            )));
        }
        Ok(())
    }

    /// Index of the first record on this page, `None` on overflow
    pub fn start_index(&self) -> Option<usize> {
        self.page.checked_sub(1)?.checked_mul(self.limit)
    }
}

/// Fluent construction of [`QueryCriteria`]
///
/// # Examples
///
/// ```no_run
/// use metalite::QueryCriteria;
///
/// let criteria = QueryCriteria::builder()
///     .page(2)
///     .limit(25)
///     .search("orders")
///     .tag("Finance")
///     .build()?;
/// # Ok::<(), metalite::CatalogError>(())
/// ```
#[derive(Debug, Clone)]
pub struct QueryCriteriaBuilder {
    page: usize,
    limit: usize,
    search: Option<String>,
    tags: BTreeSet<String>,
    updated_since: Option<DateTime<Utc>>,
}

impl Default for QueryCriteriaBuilder {
    fn default() -> Self {
        let defaults = EngineConfig::default();
        Self {
            page: defaults.default_page,
            limit: defaults.default_limit,
            search: None,
            tags: BTreeSet::new(),
            updated_since: None,
        }
    }
}

impl QueryCriteriaBuilder {
    pub fn page(mut self, page: usize) -> Self {
        self.page = page;
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Free-text search; may contain a recency phrase
    pub fn search(mut self, search: &str) -> Self {
        self.search = Some(search.to_string());
        self
    }

    /// Require a tag. Can be called repeatedly; all tags must match.
    pub fn tag(mut self, tag: &str) -> Self {
        self.tags.insert(tag.to_string());
        self
    }

    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags.extend(tags.into_iter().map(Into::into));
        self
    }

    pub fn updated_since(mut self, cutoff: DateTime<Utc>) -> Self {
        self.updated_since = Some(cutoff);
        self
    }

    pub fn build(self) -> CatalogResult<QueryCriteria> {
        let criteria = QueryCriteria {
            page: self.page,
            limit: self.limit,
            search: self.search,
            tags: self.tags,
            updated_since: self.updated_since,
        };
        criteria.validate()?;
        Ok(criteria)
    }
}

/// Transport-level query arguments
///
/// Mirrors the `datasets(page, limit, search, tags, updatedSince)` field of
/// the served schema. Omitted page/limit fall back to the configured
/// defaults; an explicit 0 is still rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryRequest {
    #[serde(default)]
    pub page: Option<usize>,
    #[serde(default)]
    pub limit: Option<usize>,
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub updated_since: Option<DateTime<Utc>>,
}

impl QueryRequest {
    pub fn into_criteria(self, config: &EngineConfig) -> CatalogResult<QueryCriteria> {
        let criteria = QueryCriteria {
            page: self.page.unwrap_or(config.default_page),
            limit: self.limit.unwrap_or(config.default_limit),
            search: self.search,
            tags: self.tags.unwrap_or_default().into_iter().collect(),
            updated_since: self.updated_since,
        };
        criteria.validate()?;
        Ok(criteria)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let criteria = QueryCriteria::builder().build().unwrap();
        assert_eq!(criteria.page, 1);
        assert_eq!(criteria.limit, 10);
        assert!(criteria.tags.is_empty());
    }

    #[test]
    fn test_builder_collects_tags() {
        let criteria = QueryCriteria::builder()
            .tag("Sales")
            .tags(["PII", "Sales"])
            .build()
            .unwrap();
        assert_eq!(criteria.tags.len(), 2);
    }

    #[test]
    fn test_zero_page_rejected() {
        let err = QueryCriteria::builder().page(0).build().unwrap_err();
        assert!(matches!(err, CatalogError::InvalidCriteria(_)));
    }

    #[test]
    fn test_zero_limit_rejected() {
        assert!(matches!(
            QueryCriteria::page(1, 0).validate(),
            Err(CatalogError::InvalidCriteria(_))
        ));
    }

    #[test]
    fn test_start_index() {
        assert_eq!(QueryCriteria::page(1, 10).start_index(), Some(0));
        assert_eq!(QueryCriteria::page(3, 25).start_index(), Some(50));
        assert_eq!(QueryCriteria::page(usize::MAX, 2).start_index(), None);
    }

    #[test]
    fn test_request_defaults_applied() {
        let criteria = QueryRequest::default()
            .into_criteria(&EngineConfig::default())
            .unwrap();
        assert_eq!((criteria.page, criteria.limit), (1, 10));
    }

    #[test]
    fn test_request_explicit_zero_not_defaulted() {
        let request = QueryRequest {
            limit: Some(0),
            ..Default::default()
        };
        assert!(matches!(
            request.into_criteria(&EngineConfig::default()),
            Err(CatalogError::InvalidCriteria(_))
        ));
    }

    #[test]
    fn test_request_deserializes_transport_names() {
        let request: QueryRequest = serde_json::from_str(
            r#"{"page": 2, "tags": ["PII"], "updatedSince": "2024-06-01T00:00:00Z"}"#,
        )
        .unwrap();
        let criteria = request.into_criteria(&EngineConfig::default()).unwrap();
        assert_eq!(criteria.page, 2);
        assert!(criteria.tags.contains("PII"));
        assert!(criteria.updated_since.is_some());
    }
}
