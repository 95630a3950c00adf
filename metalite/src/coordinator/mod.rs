// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Catalog Coordinator - the public entry point for the transport layer
//!
//! Exposes the two catalog operations, `query` (search/filter/paginate) and
//! `lookup` (fetch by identifier), over a refreshable snapshot.

pub mod catalog_coordinator;

pub use catalog_coordinator::CatalogCoordinator;
