// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Command handlers
//!
//! Each handler loads the catalog file, runs one operation against a
//! [`CatalogCoordinator`] and prints the formatted result.

use super::commands::OutputFormat;
use super::output::ResultFormatter;
use chrono::{DateTime, Utc};
use metalite::{CatalogCoordinator, CatalogResult, EngineConfig, QueryRequest};
use std::path::{Path, PathBuf};

/// Arguments of the `query` command
pub struct QueryArgs {
    pub records: PathBuf,
    pub page: Option<usize>,
    pub limit: Option<usize>,
    pub search: Option<String>,
    pub tags: Vec<String>,
    pub updated_since: Option<DateTime<Utc>>,
    pub format: OutputFormat,
    pub config: Option<PathBuf>,
}

pub fn handle_query(args: QueryArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = match &args.config {
        Some(path) => EngineConfig::from_file(path)?,
        None => EngineConfig::default(),
    };
    let format = args.format;
    let records = args.records.clone();
    let request = build_request(args, &config)?;

    let coordinator = load_catalog(&records, config)?;
    let result = coordinator.query_request(request)?;
    print!("{}", ResultFormatter::format(&result, format, Utc::now()));
    Ok(())
}

/// Turn command arguments into a transport request
///
/// An explicit `--limit` must be one of the configured page sizes.
pub fn build_request(args: QueryArgs, config: &EngineConfig) -> CatalogResult<QueryRequest> {
    if let Some(limit) = args.limit {
        config.check_page_size(limit)?;
    }

    Ok(QueryRequest {
        page: args.page,
        limit: args.limit,
        search: args.search,
        tags: Some(args.tags),
        updated_since: args.updated_since,
    })
}

pub fn handle_show(
    records: PathBuf,
    id: String,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let coordinator = load_catalog(&records, EngineConfig::default())?;

    let record = coordinator
        .lookup(&id)
        .ok_or_else(|| format!("Dataset '{}' not found", id))?;
    println!("{}", ResultFormatter::format_record(&record, format, Utc::now()));
    Ok(())
}

pub fn handle_tags(records: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let coordinator = load_catalog(&records, EngineConfig::default())?;
    let snapshot = coordinator.snapshot();
    print!("{}", ResultFormatter::format_tags(&snapshot.tag_index().tags()));
    Ok(())
}

/// Load a catalog file into a fresh coordinator
fn load_catalog(
    path: &Path,
    config: EngineConfig,
) -> Result<CatalogCoordinator, Box<dyn std::error::Error>> {
    if !path.exists() {
        return Err(format!("Catalog file not found at {:?}", path).into());
    }

    let coordinator = CatalogCoordinator::from_json_file(path, config)?;
    log::info!(
        "Loaded {} datasets from {}",
        coordinator.snapshot().len(),
        coordinator.source_name()
    );
    Ok(coordinator)
}
