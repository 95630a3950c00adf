//! Test utilities for MetaLite integration tests
//!
//! - fixtures: hand-built records for the documented scenarios and a seeded
//!   sample catalog generator for property-style checks

#![allow(dead_code)]

pub mod fixtures;
