//! Testing infrastructure for cck integration tests.
//!
//! This crate provides utilities for writing robust integration tests:
//! - `TestWorld`: Fluent interface for declarative project setup
//! - `assertions`: Checks on generated context documents
//! - `process`: Background process management for `cck watch`

pub mod assertions;
pub mod process;
pub mod world;

pub use world::{CliResult, TestWorld};
