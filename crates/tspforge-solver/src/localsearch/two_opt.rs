//! 2-opt local search.
//!
//! # Algorithm
//!
//! For each pair of tour edges `(t[i], t[i+1])` and `(t[j], t[j+1])` with
//! `i < j`, reversing `t[i+1..=j]` changes the tour cost by
//!
//! ```text
//! delta = d(t[i], t[j]) + d(t[i+1], t[j+1]) - d(t[i], t[i+1]) - d(t[j], t[j+1])
//! ```
//!
//! Each pass scans every pair and applies the single best improving move
//! (best-improvement). The search stops on the first pass without an
//! improving move or after `max_iterations` passes.
//!
//! Reversal leaves interior edge costs unchanged only when `d` is symmetric,
//! so asymmetric matrices are rejected.

use std::time::Instant;

use rayon::prelude::*;
use tracing::{info, trace};
use tspforge_config::TwoOptConfig;
use tspforge_core::{Algorithm, DistanceMatrix, Result, SolveResult, Tour, TspForgeError};

use crate::stats::PhaseStats;
use crate::termination::{checkpoint, NoTermination, Termination};

/// A move must lower the cost by more than this to be applied.
const MIN_IMPROVEMENT: f64 = 1e-10;

/// Best-improvement 2-opt.
///
/// # Example
///
/// ```
/// use tspforge_core::{DistanceMatrix, Tour};
/// use tspforge_solver::TwoOpt;
///
/// // Unit square visited in crossing order
/// let matrix = DistanceMatrix::from_points(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]).unwrap();
/// let crossing = Tour::new(vec![0, 2, 1, 3]);
///
/// let result = TwoOpt::new(100).improve(&matrix, &crossing).unwrap();
/// assert!((result.cost - 4.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct TwoOpt {
    max_iterations: u64,
    parallel_threshold: usize,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Candidate {
    i: usize,
    j: usize,
    delta: f64,
}

impl Candidate {
    /// Lower delta wins; ties go to the lexicographically smaller `(i, j)`.
    fn better_of(self, other: Self) -> Self {
        if other.delta < self.delta
            || (other.delta == self.delta && (other.i, other.j) < (self.i, self.j))
        {
            other
        } else {
            self
        }
    }
}

impl TwoOpt {
    pub fn new(max_iterations: u64) -> Self {
        Self {
            max_iterations,
            parallel_threshold: TwoOptConfig::default().parallel_threshold,
        }
    }

    pub fn from_config(config: &TwoOptConfig) -> Self {
        Self {
            max_iterations: config.max_iterations,
            parallel_threshold: config.parallel_threshold,
        }
    }

    /// Tours with at least `threshold` cities are scanned in parallel.
    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    /// Improves `initial` until no improving move remains or the pass limit is hit.
    pub fn improve(&self, matrix: &DistanceMatrix, initial: &Tour) -> Result<SolveResult> {
        self.improve_with(matrix, initial, &NoTermination)
    }

    /// Like [`improve`](Self::improve), polling `termination` before each pass.
    ///
    /// # Errors
    ///
    /// - [`TspForgeError::InvalidInput`] for an asymmetric matrix or an
    ///   `initial` tour that is not a permutation of the cities.
    /// - [`TspForgeError::Cancelled`] when `termination` fires.
    pub fn improve_with<T>(
        &self,
        matrix: &DistanceMatrix,
        initial: &Tour,
        termination: &T,
    ) -> Result<SolveResult>
    where
        T: Termination + ?Sized,
    {
        let started = Instant::now();
        let n = matrix.size();
        if !matrix.is_symmetric() {
            return Err(TspForgeError::InvalidInput(
                "2-opt requires a symmetric distance matrix".to_string(),
            ));
        }
        initial.validate(n)?;

        let mut stats = PhaseStats::new("TwoOpt");
        let initial_cost = initial.cost(matrix);
        info!(
            event = "phase_start",
            phase = "2-opt",
            num_cities = n,
            initial_cost = initial_cost,
        );

        let mut tour = initial.as_slice().to_vec();
        // Incremental total, only checked against the final re-sum for drift
        let mut running_cost = initial_cost;
        let mut converged = n < 4;
        let parallel = n >= self.parallel_threshold;

        while !converged && stats.step_count < self.max_iterations {
            checkpoint(termination)?;
            stats.record_step();
            stats.record_moves(pair_count(n));

            let best = if parallel {
                best_move_parallel(matrix, &tour)
            } else {
                best_move(matrix, &tour)
            };

            match best {
                Some(mv) => {
                    tour[mv.i + 1..=mv.j].reverse();
                    running_cost += mv.delta;
                    stats.record_applied();
                    trace!(
                        event = "move_applied",
                        pass = stats.step_count,
                        i = mv.i,
                        j = mv.j,
                        delta = mv.delta,
                    );
                }
                None => converged = true,
            }
        }

        let result = SolveResult::new(Tour::new(tour), matrix, Algorithm::TwoOpt, started.elapsed());
        debug_assert!(
            (result.cost - running_cost).abs() <= 1e-6 * initial_cost.max(1.0),
            "incremental cost {running_cost} drifted from {}",
            result.cost
        );

        info!(
            event = "phase_end",
            phase = "2-opt",
            duration_ms = stats.elapsed_ms(),
            steps = stats.step_count,
            moves_evaluated = stats.moves_evaluated,
            moves_applied = stats.moves_applied,
            moves_per_sec = stats.moves_per_second(),
            converged = converged,
            cost = result.cost,
        );
        Ok(result)
    }
}

/// Number of non-adjacent edge pairs scanned per pass.
fn pair_count(n: usize) -> u64 {
    if n < 4 {
        0
    } else {
        (n * (n - 3) / 2) as u64
    }
}

#[inline]
fn move_delta(matrix: &DistanceMatrix, tour: &[usize], i: usize, j: usize) -> f64 {
    let n = tour.len();
    let (a, b) = (tour[i], tour[i + 1]);
    let (c, e) = (tour[j], tour[(j + 1) % n]);
    matrix.get(a, c) + matrix.get(b, e) - matrix.get(a, b) - matrix.get(c, e)
}

/// Best improving move whose first edge starts at position `i`.
fn best_in_row(matrix: &DistanceMatrix, tour: &[usize], i: usize) -> Option<Candidate> {
    let n = tour.len();
    // (0, n - 1) would pair two edges sharing tour[0]
    let last_j = if i == 0 { n - 2 } else { n - 1 };
    let mut best: Option<Candidate> = None;
    for j in (i + 2)..=last_j {
        let delta = move_delta(matrix, tour, i, j);
        if delta < -MIN_IMPROVEMENT && best.map_or(true, |b| delta < b.delta) {
            best = Some(Candidate { i, j, delta });
        }
    }
    best
}

fn best_move(matrix: &DistanceMatrix, tour: &[usize]) -> Option<Candidate> {
    (0..tour.len() - 2)
        .filter_map(|i| best_in_row(matrix, tour, i))
        .reduce(Candidate::better_of)
}

fn best_move_parallel(matrix: &DistanceMatrix, tour: &[usize]) -> Option<Candidate> {
    (0..tour.len() - 2)
        .into_par_iter()
        .filter_map(|i| best_in_row(matrix, tour, i))
        .reduce_with(Candidate::better_of)
}
