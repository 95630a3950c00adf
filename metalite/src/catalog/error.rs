// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Error types for the catalog query engine

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// Page or limit below 1. Never clamped.
    #[error("Invalid criteria: {0}")]
    InvalidCriteria(String),

    #[error("Duplicate record identifier: {0}")]
    DuplicateRecord(String),

    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    #[error("Record source error: {0}")]
    SourceError(String),

    #[error("IO error: {0}")]
    IoError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl From<std::io::Error> for CatalogError {
    fn from(err: std::io::Error) -> Self {
        CatalogError::IoError(err.to_string())
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        CatalogError::SerializationError(err.to_string())
    }
}

pub type CatalogResult<T> = Result<T, CatalogError>;
