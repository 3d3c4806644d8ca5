//! TspForge - Traveling Salesman tours in Rust
//!
//! One call picks an algorithm by name or by instance size and returns a
//! uniform [`SolveResult`].
//!
//! # Example
//!
//! ```rust
//! use tspforge::prelude::*;
//!
//! let matrix = DistanceMatrix::new(vec![
//!     vec![0.0, 10.0, 15.0],
//!     vec![10.0, 0.0, 20.0],
//!     vec![15.0, 20.0, 0.0],
//! ]).unwrap();
//!
//! let result = tspforge::solve(&matrix, "auto").unwrap();
//! assert_eq!(result.algorithm, Algorithm::HeldKarp);
//! assert_eq!(result.cost, 45.0);
//! ```

// Value types
pub use tspforge_core::{Algorithm, DistanceMatrix, Result, SolveResult, Tour, TspForgeError};

// Configuration
pub use tspforge_config::{
    ConfigError, MatchingStrategy, MetricAssumption, SelectionConfig, SolverConfig,
};

// Algorithms and dispatch
pub use tspforge_solver::{
    AlgorithmSelector, Christofides, HeldKarp, NearestNeighbor, SolveOptions, SolverManager,
    TwoOpt,
};

// Cancellation
pub use tspforge_solver::termination;

#[cfg(feature = "console")]
pub mod console;

mod solver;
pub use solver::{solve, solve_with_config};

pub mod prelude {
    pub use super::{
        Algorithm, AlgorithmSelector, DistanceMatrix, SolveOptions, SolveResult, SolverConfig,
        SolverManager, Tour, TspForgeError,
    };
    pub use super::termination::{ExternalTermination, Termination, TimeTermination};
}
