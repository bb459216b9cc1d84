//! Integration test utilities for the linkbio server
//!
//! This crate provides helpers for running end-to-end tests against
//! the REST API.

pub mod fixtures;

pub use fixtures::*;
pub use helpers::*;
