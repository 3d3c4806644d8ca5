//! Exact tour search.
//!
//! [`HeldKarp`] solves the problem to optimality with dynamic programming
//! over `(visited subset, last city)` states. Time is `O(n² 2ⁿ)` and the
//! table holds `2^(n-1) * (n-1)` entries, so callers bound `n` through the
//! configured ceiling (default 20).

use std::time::Instant;

use tracing::{debug, info};
use tspforge_config::{HeldKarpConfig, HELD_KARP_HARD_LIMIT};
use tspforge_core::{Algorithm, DistanceMatrix, Result, SolveResult, Tour, TspForgeError};

use crate::stats::PhaseStats;
use crate::termination::{checkpoint, NoTermination, Termination};

/// Parent marker for base states (`{j}` reached directly from city 0).
const NO_PARENT: u8 = u8::MAX;

/// Held-Karp exact solver.
///
/// City 0 is the fixed start. City `c >= 1` is bit `c - 1` of a subset mask;
/// entry `mask * (n - 1) + (c - 1)` holds the cheapest path that leaves city 0,
/// visits exactly `mask` and ends at `c`, next to the predecessor that achieved it.
/// Ties go to the lowest city index.
///
/// Works on asymmetric matrices: every transition uses `d[from][to]`.
///
/// # Example
///
/// ```
/// use tspforge_core::DistanceMatrix;
/// use tspforge_solver::HeldKarp;
///
/// let matrix = DistanceMatrix::new(vec![
///     vec![0.0, 10.0, 15.0],
///     vec![10.0, 0.0, 20.0],
///     vec![15.0, 20.0, 0.0],
/// ]).unwrap();
///
/// let result = HeldKarp::new(20).solve(&matrix).unwrap();
/// assert_eq!(result.cost, 45.0);
/// assert!(result.is_optimal);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct HeldKarp {
    max_cities: usize,
}

impl HeldKarp {
    /// Creates a solver refusing instances above `max_cities`.
    ///
    /// The ceiling is clamped to [`HELD_KARP_HARD_LIMIT`].
    pub fn new(max_cities: usize) -> Self {
        Self {
            max_cities: max_cities.min(HELD_KARP_HARD_LIMIT),
        }
    }

    pub fn from_config(config: &HeldKarpConfig) -> Self {
        Self::new(config.max_cities)
    }

    pub fn max_cities(&self) -> usize {
        self.max_cities
    }

    /// Solves `matrix` to optimality.
    pub fn solve(&self, matrix: &DistanceMatrix) -> Result<SolveResult> {
        self.solve_with(matrix, &NoTermination)
    }

    /// Solves `matrix`, polling `termination` before each DP layer.
    ///
    /// # Errors
    ///
    /// - [`TspForgeError::SizeLimitExceeded`] before any allocation when the
    ///   instance is above the ceiling.
    /// - [`TspForgeError::Cancelled`] when `termination` fires; the partial
    ///   table is dropped.
    pub fn solve_with<T>(&self, matrix: &DistanceMatrix, termination: &T) -> Result<SolveResult>
    where
        T: Termination + ?Sized,
    {
        let n = matrix.size();
        if n > self.max_cities {
            return Err(TspForgeError::SizeLimitExceeded {
                algorithm: Algorithm::HeldKarp.display_name(),
                num_cities: n,
                limit: self.max_cities,
            });
        }

        let started = Instant::now();
        if n <= 2 {
            let result = SolveResult::new(
                Tour::identity(n),
                matrix,
                Algorithm::HeldKarp,
                started.elapsed(),
            );
            return Ok(result.optimal());
        }

        let m = n - 1;
        let full = (1usize << m) - 1;
        let states = (1usize << m) * m;

        let mut stats = PhaseStats::new("HeldKarp");
        info!(
            event = "phase_start",
            phase = "Held-Karp",
            num_cities = n,
            dp_states = states as u64,
        );

        let mut cost = vec![f64::INFINITY; states];
        let mut parent = vec![NO_PARENT; states];

        for j in 0..m {
            cost[(1 << j) * m + j] = matrix.get(0, j + 1);
        }

        for size in 2..=m {
            checkpoint(termination)?;

            let mut transitions = 0u64;
            let mut mask = (1usize << size) - 1;
            while mask <= full {
                let mut lasts = mask;
                while lasts != 0 {
                    let last = lasts.trailing_zeros() as usize;
                    lasts &= lasts - 1;

                    let prev_mask = mask & !(1 << last);
                    let mut best = f64::INFINITY;
                    let mut best_prev = NO_PARENT;

                    let mut prevs = prev_mask;
                    while prevs != 0 {
                        let prev = prevs.trailing_zeros() as usize;
                        prevs &= prevs - 1;

                        let candidate = cost[prev_mask * m + prev] + matrix.get(prev + 1, last + 1);
                        if best_prev == NO_PARENT || candidate < best {
                            best = candidate;
                            best_prev = prev as u8;
                        }
                        transitions += 1;
                    }

                    cost[mask * m + last] = best;
                    parent[mask * m + last] = best_prev;
                }
                mask = next_subset(mask);
            }

            stats.record_step();
            stats.record_moves(transitions);
            debug!(
                event = "dp_layer",
                subset_size = size as u64,
                transitions = transitions,
                elapsed_ms = stats.elapsed_ms(),
            );
        }

        let mut best_last = 0;
        let mut best_cost = f64::INFINITY;
        for last in 0..m {
            let closed = cost[full * m + last] + matrix.get(last + 1, 0);
            if last == 0 || closed < best_cost {
                best_cost = closed;
                best_last = last;
            }
        }

        let tour = reconstruct(&parent, m, full, best_last);
        let result = SolveResult::new(tour, matrix, Algorithm::HeldKarp, started.elapsed()).optimal();

        info!(
            event = "phase_end",
            phase = "Held-Karp",
            duration_ms = stats.elapsed_ms(),
            steps = stats.step_count,
            moves_evaluated = stats.moves_evaluated,
            moves_per_sec = stats.moves_per_second(),
            cost = result.cost,
        );
        Ok(result)
    }
}

/// Next larger integer with the same number of set bits (Gosper's hack).
fn next_subset(mask: usize) -> usize {
    let lowest = mask & mask.wrapping_neg();
    let ripple = mask + lowest;
    (((ripple ^ mask) >> 2) / lowest) | ripple
}

/// Walks parent pointers back from `(full, last)` to city 0.
fn reconstruct(parent: &[u8], m: usize, full: usize, last: usize) -> Tour {
    let mut path = Vec::with_capacity(m + 1);
    let mut mask = full;
    let mut city = last;
    loop {
        path.push(city + 1);
        let prev = parent[mask * m + city];
        mask &= !(1 << city);
        if prev == NO_PARENT {
            break;
        }
        city = prev as usize;
    }
    path.push(0);
    path.reverse();
    Tour::new(path)
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicBool;

    use super::*;
    use crate::termination::ExternalTermination;
    use tspforge_test::assertions::assert_valid_result;
    use tspforge_test::fixtures;

    /// Minimum over all tours fixing city 0, by enumerating permutations.
    fn brute_force(matrix: &DistanceMatrix) -> f64 {
        fn permute(rest: &mut Vec<usize>, k: usize, matrix: &DistanceMatrix, best: &mut f64) {
            if k == rest.len() {
                let mut tour = vec![0];
                tour.extend_from_slice(rest);
                *best = best.min(Tour::new(tour).cost(matrix));
                return;
            }
            for i in k..rest.len() {
                rest.swap(k, i);
                permute(rest, k + 1, matrix, best);
                rest.swap(k, i);
            }
        }
        let mut rest: Vec<usize> = (1..matrix.size()).collect();
        let mut best = f64::INFINITY;
        permute(&mut rest, 0, matrix, &mut best);
        best
    }

    #[test]
    fn test_three_cities() {
        let matrix = fixtures::three_cities();
        let result = HeldKarp::new(20).solve(&matrix).unwrap();

        assert_valid_result(&result, &matrix);
        assert_eq!(result.cost, 45.0);
        assert!(result.is_optimal);
        assert_eq!(result.algorithm, Algorithm::HeldKarp);
        assert_eq!(result.tour.as_slice()[0], 0);
    }

    #[test]
    fn test_four_cities() {
        let matrix = fixtures::four_cities();
        let result = HeldKarp::new(20).solve(&matrix).unwrap();

        assert_valid_result(&result, &matrix);
        // 0-1-3-2-0 = 10 + 25 + 30 + 15
        assert_eq!(result.cost, 80.0);
    }

    #[test]
    fn test_single_city() {
        let matrix = fixtures::single_city();
        let result = HeldKarp::new(20).solve(&matrix).unwrap();
        assert_eq!(result.tour.as_slice(), &[0]);
        assert_eq!(result.cost, 0.0);
        assert!(result.is_optimal);
    }

    #[test]
    fn test_two_cities() {
        let matrix = fixtures::two_cities();
        let result = HeldKarp::new(20).solve(&matrix).unwrap();
        assert_eq!(result.tour.as_slice(), &[0, 1]);
        assert_eq!(result.cost, 20.0);
    }

    #[test]
    fn test_matches_brute_force() {
        for seed in 0..6 {
            let matrix = fixtures::euclidean(8, seed);
            let result = HeldKarp::new(20).solve(&matrix).unwrap();
            assert_valid_result(&result, &matrix);
            assert!((result.cost - brute_force(&matrix)).abs() < 1e-9);
        }
    }

    #[test]
    fn test_asymmetric_matches_brute_force() {
        let matrix = fixtures::asymmetric_three_cities();
        let result = HeldKarp::new(20).solve(&matrix).unwrap();
        assert_eq!(result.cost, 3.0);
        assert_eq!(result.tour.as_slice(), &[0, 1, 2]);
    }

    #[test]
    fn test_ties_go_to_lowest_index() {
        let matrix = fixtures::uniform(5, 1.0);
        let result = HeldKarp::new(20).solve(&matrix).unwrap();
        assert_eq!(result.tour.as_slice(), &[0, 4, 3, 2, 1]);
        assert_eq!(result.cost, 5.0);
    }

    #[test]
    fn test_overflowing_costs_still_yield_full_tour() {
        // Every two-edge path already sums past f64::MAX
        let matrix = fixtures::uniform(4, 1e308);
        let result = HeldKarp::new(20).solve(&matrix).unwrap();

        assert_eq!(result.tour.as_slice(), &[0, 3, 2, 1]);
        assert!(result.tour.validate(4).is_ok());
        assert_eq!(result.cost, f64::INFINITY);
    }

    #[test]
    fn test_size_limit_exceeded() {
        let matrix = fixtures::euclidean(25, 42);
        let err = HeldKarp::new(20).solve(&matrix).unwrap_err();
        assert_eq!(
            err,
            TspForgeError::SizeLimitExceeded {
                algorithm: "Held-Karp (Exact DP)",
                num_cities: 25,
                limit: 20,
            }
        );
    }

    #[test]
    fn test_ceiling_is_clamped() {
        assert_eq!(HeldKarp::new(1000).max_cities(), HELD_KARP_HARD_LIMIT);
    }

    #[test]
    fn test_cancelled_before_first_layer() {
        let flag = AtomicBool::new(true);
        let matrix = fixtures::euclidean(10, 1);
        let err = HeldKarp::new(20)
            .solve_with(&matrix, &ExternalTermination::new(&flag))
            .unwrap_err();
        assert_eq!(err, TspForgeError::Cancelled);
    }

    #[test]
    fn test_next_subset_enumerates_combinations() {
        let mut seen = Vec::new();
        let mut mask = 0b0011usize;
        while mask <= 0b1111 {
            seen.push(mask);
            mask = next_subset(mask);
        }
        assert_eq!(seen, vec![0b0011, 0b0101, 0b0110, 0b1001, 0b1010, 0b1100]);
    }
}
