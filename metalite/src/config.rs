// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Engine configuration

use crate::catalog::{CatalogError, CatalogResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Query engine configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Page used when a request omits one
    pub default_page: usize,

    /// Page size used when a request omits one
    pub default_limit: usize,

    /// Interpret "updated last N days/weeks" in the search term as a cutoff
    pub recency_phrases: bool,

    /// Pre-select tag-filtered candidates from the snapshot's tag index
    pub use_tag_index: bool,

    /// Page sizes a front end may request. Empty accepts any size.
    pub page_size_options: Vec<usize>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_page: 1,
            default_limit: 10,
            recency_phrases: true,
            use_tag_index: true,
            page_size_options: vec![5, 10, 25],
        }
    }
}

impl EngineConfig {
    /// Search terms are always literal; no phrase parsing
    pub fn literal_search() -> Self {
        Self {
            recency_phrases: false,
            ..Self::default()
        }
    }

    /// Load a JSON configuration file. Missing keys take their defaults.
    pub fn from_file(path: impl AsRef<Path>) -> CatalogResult<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| {
            CatalogError::ConfigError(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let config: EngineConfig = serde_json::from_str(&contents).map_err(|e| {
            CatalogError::ConfigError(format!("Failed to parse {}: {}", path.display(), e))
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> CatalogResult<()> {
        if self.default_page == 0 {
            return Err(CatalogError::ConfigError(
                "default_page must be at least 1".to_string(),
            ));
        }
        if self.default_limit == 0 {
            return Err(CatalogError::ConfigError(
                "default_limit must be at least 1".to_string(),
            ));
        }
        if self.page_size_options.contains(&0) {
            return Err(CatalogError::ConfigError(
                "page_size_options must not contain 0".to_string(),
            ));
        }
        if !self.page_size_options.is_empty()
            && !self.page_size_options.contains(&self.default_limit)
        {
            return Err(CatalogError::ConfigError(format!(
                "default_limit {} is not one of page_size_options {:?}",
                self.default_limit, self.page_size_options
            )));
        }
        Ok(())
    }

    /// Check a requested page size against `page_size_options`
    ///
    /// # Returns
    /// * `Ok(())` - the size is offered, or no options are configured
    /// * `Err(CatalogError::InvalidCriteria)` - the size is not offered
    pub fn check_page_size(&self, limit: usize) -> CatalogResult<()> {
        if self.page_size_options.is_empty() || self.page_size_options.contains(&limit) {
            return Ok(());
        }
        Err(CatalogError::InvalidCriteria(format!(
            "page size {} is not offered; choose one of {:?}",
            limit, self.page_size_options
        )))
    }
}
