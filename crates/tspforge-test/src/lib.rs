//! Shared test fixtures for TspForge crates.
//!
//! This crate provides documented matrices and result checks for testing.
//! It depends only on `tspforge-core` so every other crate can use it.
//!
//! - [`fixtures`] - small hand-checked matrices and seeded Euclidean instances
//! - [`assertions`] - tour and result invariant checks
//!
//! # Usage
//!
//! Add as a dev-dependency in your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! tspforge-test = { workspace = true }
//! ```
//!
//! Then import the fixtures you need:
//!
//! ```ignore
//! use tspforge_test::assertions::assert_valid_result;
//! use tspforge_test::fixtures;
//! ```

pub mod assertions;
pub mod fixtures;

pub use assertions::{assert_valid_result, assert_valid_tour};
