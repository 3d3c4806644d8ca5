//! TspForge Core - Core types for tour solving
//!
//! This crate provides the value types shared by every TspForge algorithm:
//! - [`DistanceMatrix`]: validated, immutable N×N cost table
//! - [`Tour`]: closed permutation of cities and the canonical cost function
//! - [`SolveResult`]: uniform result record returned by every solver
//! - [`TspForgeError`]: error taxonomy

pub mod error;
pub mod matrix;
pub mod result;
pub mod tour;

pub use error::{Result, TspForgeError};
pub use matrix::DistanceMatrix;
pub use result::{Algorithm, SolveResult};
pub use tour::Tour;
