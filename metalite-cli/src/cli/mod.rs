// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! CLI module for MetaLite
//!
//! Searches, filters and inspects a catalog file from the terminal.

pub mod commands;
pub mod handlers;
pub mod output;

pub use commands::{Cli, Commands};
pub use handlers::{handle_query, handle_show, handle_tags, QueryArgs};
