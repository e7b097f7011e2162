//! Shared helpers for integration tests.
#![allow(dead_code)]

pub mod index_helpers;
pub mod source_fixtures;
