//! Solver entry points that hide the manager wiring.

use tspforge_config::SolverConfig;
use tspforge_core::{DistanceMatrix, Result, SolveResult, TspForgeError};
use tspforge_solver::{AlgorithmSelector, SolverManager};

/// Solves `matrix` with the algorithm named by `selector` under the default
/// configuration.
///
/// # Errors
///
/// [`UnknownAlgorithm`](tspforge_core::TspForgeError::UnknownAlgorithm) for
/// an unrecognised selector, then whatever the chosen algorithm reports.
pub fn solve(matrix: &DistanceMatrix, selector: &str) -> Result<SolveResult> {
    solve_with_config(matrix, selector, SolverConfig::default())
}

/// Solves `matrix` under a caller-supplied configuration.
///
/// Loading is left to the caller, e.g. `SolverConfig::load("tspforge.toml")`.
/// A configuration that fails validation is reported as
/// [`InvalidInput`](tspforge_core::TspForgeError::InvalidInput).
///
/// # Errors
///
/// `UnknownAlgorithm` for an unrecognised selector, `InvalidInput` for an
/// invalid configuration, then whatever the chosen algorithm reports.
pub fn solve_with_config(
    matrix: &DistanceMatrix,
    selector: &str,
    config: SolverConfig,
) -> Result<SolveResult> {
    let selector: AlgorithmSelector = selector.parse()?;

    #[cfg(feature = "console")]
    crate::console::init();

    let manager = SolverManager::new(config)
        .map_err(|err| TspForgeError::InvalidInput(err.to_string()))?;
    manager.solve(matrix, selector)
}
