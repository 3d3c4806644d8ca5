//! SolverManager implementation.

use std::time::Instant;

use rayon::prelude::*;
use tracing::info;
use tspforge_config::{ConfigError, SolverConfig};
use tspforge_core::{Algorithm, DistanceMatrix, Result, SolveResult, Tour};

use crate::christofides::Christofides;
use crate::construction::NearestNeighbor;
use crate::exhaustive::HeldKarp;
use crate::localsearch::TwoOpt;
use crate::termination::{checkpoint, NoTermination, Termination};

use super::{AlgorithmSelector, SolveOptions};

/// Dispatches solve requests to the configured algorithms.
///
/// Holds only immutable configuration, so one manager can serve concurrent
/// solves from many threads.
///
/// # Examples
///
/// ```
/// use tspforge_core::DistanceMatrix;
/// use tspforge_solver::{AlgorithmSelector, SolverManager};
///
/// let matrix = DistanceMatrix::new(vec![
///     vec![0.0, 10.0, 15.0],
///     vec![10.0, 0.0, 20.0],
///     vec![15.0, 20.0, 0.0],
/// ]).unwrap();
///
/// let manager = SolverManager::default();
/// let result = manager.solve(&matrix, AlgorithmSelector::Auto).unwrap();
/// assert_eq!(result.cost, 45.0);
/// assert!(result.is_optimal);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SolverManager {
    config: SolverConfig,
}

impl SolverManager {
    /// Creates a manager after validating `config`.
    pub fn new(config: SolverConfig) -> std::result::Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Algorithm auto-selection picks for `num_cities`.
    pub fn select(&self, num_cities: usize) -> Algorithm {
        let thresholds = &self.config.selection;
        if num_cities <= thresholds.held_karp_max_cities {
            Algorithm::HeldKarp
        } else if num_cities <= thresholds.christofides_max_cities {
            Algorithm::Christofides
        } else if num_cities <= thresholds.two_opt_max_cities {
            Algorithm::TwoOpt
        } else {
            Algorithm::NearestNeighbor
        }
    }

    pub fn solve(&self, matrix: &DistanceMatrix, selector: AlgorithmSelector) -> Result<SolveResult> {
        self.solve_with(matrix, selector, &SolveOptions::default(), &NoTermination)
    }

    /// Solves `matrix` with per-call overrides and a cancellation source.
    ///
    /// `Auto` runs nearest-neighbor before 2-opt and reports the time of both
    /// stages; an explicit 2-opt request improves `options.initial_tour`, or
    /// the identity tour when none is given.
    ///
    /// # Errors
    ///
    /// Whatever the dispatched algorithm reports: `InvalidInput`,
    /// `SizeLimitExceeded` or `Cancelled`.
    pub fn solve_with<T>(
        &self,
        matrix: &DistanceMatrix,
        selector: AlgorithmSelector,
        options: &SolveOptions,
        termination: &T,
    ) -> Result<SolveResult>
    where
        T: Termination + ?Sized,
    {
        checkpoint(termination)?;

        let n = matrix.size();
        let algorithm = selector.algorithm().unwrap_or_else(|| self.select(n));
        info!(
            event = "solve_start",
            num_cities = n,
            selector = selector.name(),
            algorithm = algorithm.name(),
        );

        let started = Instant::now();
        let result = match algorithm {
            Algorithm::HeldKarp => {
                HeldKarp::from_config(&self.config.held_karp).solve_with(matrix, termination)?
            }
            Algorithm::Christofides => {
                let mut christofides = Christofides::from_config(&self.config.christofides);
                if let Some(metric) = options.metric {
                    christofides = christofides.with_metric(metric);
                }
                christofides.solve_with(matrix, termination)?
            }
            Algorithm::NearestNeighbor => self.nearest_neighbor(options).solve(matrix)?,
            Algorithm::TwoOpt => {
                let initial = match &options.initial_tour {
                    Some(tour) => tour.clone(),
                    None if selector == AlgorithmSelector::Auto => {
                        self.nearest_neighbor(options).build_tour(matrix)?
                    }
                    None => Tour::identity(n),
                };
                let mut result = self.two_opt(options).improve_with(matrix, &initial, termination)?;
                result.execution_time = started.elapsed();
                result
            }
        };

        info!(
            event = "solve_end",
            algorithm = result.algorithm.name(),
            num_cities = n,
            cost = result.cost,
            duration_ms = result.execution_time.as_millis() as u64,
            is_optimal = result.is_optimal,
        );
        Ok(result)
    }

    /// Solves independent matrices in parallel, one rayon task each.
    ///
    /// Results keep the order of `matrices`.
    pub fn solve_batch(
        &self,
        matrices: &[DistanceMatrix],
        selector: AlgorithmSelector,
    ) -> Vec<Result<SolveResult>> {
        matrices
            .par_iter()
            .map(|matrix| self.solve(matrix, selector))
            .collect()
    }

    fn nearest_neighbor(&self, options: &SolveOptions) -> NearestNeighbor {
        NearestNeighbor::new(options.start.unwrap_or(self.config.nearest_neighbor.start))
    }

    fn two_opt(&self, options: &SolveOptions) -> TwoOpt {
        let mut two_opt = TwoOpt::from_config(&self.config.two_opt);
        if let Some(max_iterations) = options.max_iterations {
            two_opt = TwoOpt::new(max_iterations)
                .with_parallel_threshold(self.config.two_opt.parallel_threshold);
        }
        two_opt
    }
}
