//! Shared test utilities for space-vault.
//!
//! This crate provides:
//! - Proptest generators for space names, secret paths and secret fields
//! - Vault JSON response fixtures
//! - A log capture sink for asserting on emitted events

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod generators;
pub mod logs;

pub use generators::*;
