// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Catalog record data model
//!
//! These types mirror the dataset shape served to the transport layer. Field
//! names serialize in camelCase (`lastUpdated`, `type`, ...) so a record file
//! produced for the GraphQL schema can be loaded unchanged.

use super::error::{CatalogError, CatalogResult};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// One data asset (dataset) in the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogRecord {
    /// Unique, stable identifier
    pub id: String,
    pub name: String,
    pub description: String,
    pub owner: Owner,
    pub last_updated: DateTime<Utc>,
    /// Tags as stored. Never empty.
    pub tags: Vec<String>,
    #[serde(default)]
    pub schema: Vec<SchemaColumn>,
    #[serde(default)]
    pub lineage: Lineage,
    /// Daily query counts, oldest first
    #[serde(default)]
    pub usage: Vec<UsageDataPoint>,
    /// Weekly freshness observations, oldest first
    #[serde(default)]
    pub freshness: Vec<FreshnessDataPoint>,
}

/// Dataset owner, embedded in each record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Owner {
    pub id: String,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaColumn {
    pub name: String,
    #[serde(rename = "type")]
    pub data_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lineage {
    #[serde(default)]
    pub upstream: Vec<LineageNode>,
    #[serde(default)]
    pub downstream: Vec<LineageNode>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineageNode {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageDataPoint {
    #[serde(deserialize_with = "calendar_day::deserialize")]
    pub date: NaiveDate,
    pub queries: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FreshnessDataPoint {
    /// Start of the observed week
    #[serde(deserialize_with = "calendar_day::deserialize")]
    pub date: NaiveDate,
    pub last_updated: DateTime<Utc>,
}

/// History dates arrive either as `YYYY-MM-DD` or as a full RFC 3339
/// timestamp (`2024-05-31T10:00:00+02:00`). Timestamps keep the calendar day
/// of their own offset.
mod calendar_day {
    use chrono::{DateTime, NaiveDate};
    use serde::{de, Deserialize, Deserializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| {
            de::Error::custom(format!(
                "'{}' is neither a YYYY-MM-DD date nor an RFC 3339 timestamp",
                raw
            ))
        })
    }

    pub(super) fn parse(raw: &str) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|ts| ts.date_naive()))
    }
}

/// Aggregates over a record's usage and freshness history
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageSummary {
    pub total_queries: u64,
    pub days: usize,
    pub peak: Option<UsageDataPoint>,
    pub latest_freshness: Option<FreshnessDataPoint>,
}

impl UsageSummary {
    /// Mean queries per recorded day
    pub fn daily_average(&self) -> f64 {
        if self.days == 0 {
            return 0.0;
        }
        self.total_queries as f64 / self.days as f64
    }
}

impl CatalogRecord {
    /// Check the invariants a record must hold before it enters a snapshot
    pub fn validate(&self) -> CatalogResult<()> {
        if self.id.trim().is_empty() {
            return Err(CatalogError::InvalidRecord(format!(
                "record '{}' has an empty identifier",
                self.name
            )));
        }

        if self.tags.is_empty() {
            return Err(CatalogError::InvalidRecord(format!(
                "record '{}' has no tags",
                self.id
            )));
        }

        if self.usage.windows(2).any(|w| w[0].date > w[1].date) {
            return Err(CatalogError::InvalidRecord(format!(
                "record '{}' has usage history out of chronological order",
                self.id
            )));
        }

        if self.freshness.windows(2).any(|w| w[0].date > w[1].date) {
            return Err(CatalogError::InvalidRecord(format!(
                "record '{}' has freshness history out of chronological order",
                self.id
            )));
        }

        Ok(())
    }

    /// Exact, case-sensitive tag membership
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    pub fn usage_summary(&self) -> UsageSummary {
        // First maximum wins so ties resolve to the earliest day
        let peak = self.usage.iter().fold(None, |best: Option<UsageDataPoint>, point| {
            match best {
                Some(b) if b.queries >= point.queries => Some(b),
                _ => Some(*point),
            }
        });

        UsageSummary {
            total_queries: self.usage.iter().map(|p| p.queries).sum(),
            days: self.usage.len(),
            peak,
            latest_freshness: self.freshness.last().copied(),
        }
    }
}
