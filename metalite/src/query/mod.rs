// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Catalog query evaluation: recency phrases, predicates, pagination

pub mod criteria;
pub mod engine;
pub mod predicate;
pub mod recency;
pub mod result;

pub use criteria::{QueryCriteria, QueryCriteriaBuilder, QueryRequest};
pub use engine::{QueryEngine, ResolvedCriteria};
pub use predicate::FilterPredicate;
pub use recency::{find_phrase, parse_recency, RecencyMatch, RecencyPhrase, RecencyUnit};
pub use result::QueryResult;
