//! Christofides approximation for metric instances.
//!
//! The pipeline is MST, odd-degree vertices, perfect matching on those
//! vertices, Eulerian circuit over the union multigraph, and shortcutting of
//! repeated cities. With an exact matching on a metric matrix the tour costs
//! at most 1.5 times the optimum.

pub mod euler;
pub mod matching;
pub mod mst;

use std::time::Instant;

use tracing::{debug, info, warn};
use tspforge_config::{ChristofidesConfig, MatchingStrategy, MetricAssumption};
use tspforge_core::{Algorithm, DistanceMatrix, Result, SolveResult, Tour, TspForgeError};

use crate::stats::PhaseStats;
use crate::termination::{checkpoint, NoTermination, Termination};
use euler::{shortcut, Multigraph};

/// Worst-case ratio to the optimum for exact matching on metric input.
pub const CHRISTOFIDES_RATIO: f64 = 1.5;

/// Christofides solver.
///
/// # Example
///
/// ```
/// use tspforge_core::DistanceMatrix;
/// use tspforge_solver::Christofides;
///
/// let matrix = DistanceMatrix::random_euclidean(40, 7).unwrap();
/// let result = Christofides::new().solve(&matrix).unwrap();
///
/// assert_eq!(result.tour.len(), 40);
/// assert!(!result.is_optimal);
/// assert_eq!(result.approximation_ratio, Some(1.5));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Christofides {
    matching: MatchingStrategy,
    metric: MetricAssumption,
}

impl Christofides {
    /// Exact matching, metric input trusted.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &ChristofidesConfig) -> Self {
        Self {
            matching: config.matching,
            metric: config.metric,
        }
    }

    pub fn with_matching(mut self, matching: MatchingStrategy) -> Self {
        self.matching = matching;
        self
    }

    pub fn with_metric(mut self, metric: MetricAssumption) -> Self {
        self.metric = metric;
        self
    }

    pub fn solve(&self, matrix: &DistanceMatrix) -> Result<SolveResult> {
        self.solve_with(matrix, &NoTermination)
    }

    /// Runs the pipeline, polling `termination` between stages.
    ///
    /// # Errors
    ///
    /// - [`TspForgeError::InvalidInput`] for an asymmetric matrix.
    /// - [`TspForgeError::Cancelled`] when `termination` fires.
    /// - [`TspForgeError::Internal`] if a graph invariant breaks.
    pub fn solve_with<T>(&self, matrix: &DistanceMatrix, termination: &T) -> Result<SolveResult>
    where
        T: Termination + ?Sized,
    {
        if !matrix.is_symmetric() {
            return Err(TspForgeError::InvalidInput(
                "Christofides requires a symmetric distance matrix".to_string(),
            ));
        }

        let started = Instant::now();
        let n = matrix.size();
        let mut stats = PhaseStats::new("Christofides");
        info!(
            event = "phase_start",
            phase = "Christofides",
            num_cities = n,
            matching = ?self.matching,
        );

        checkpoint(termination)?;
        let tree = mst::minimum_spanning_tree(matrix);
        let odd = mst::odd_degree_vertices(n, &tree);
        stats.record_step();
        debug!(
            event = "mst",
            edges = tree.len() as u64,
            weight = mst::edge_weight(matrix, &tree),
            odd_vertices = odd.len() as u64,
        );
        if odd.len() % 2 != 0 {
            return Err(TspForgeError::Internal(format!(
                "spanning tree has {} odd-degree vertices",
                odd.len()
            )));
        }

        checkpoint(termination)?;
        let matched = match self.matching {
            MatchingStrategy::Exact => matching::min_weight_perfect_matching(matrix, &odd)?,
            MatchingStrategy::Greedy => matching::greedy_matching(matrix, &odd)?,
        };
        stats.record_step();
        debug!(
            event = "matching",
            pairs = matched.len() as u64,
            weight = mst::edge_weight(matrix, &matched),
        );

        checkpoint(termination)?;
        let mut graph = Multigraph::new(n);
        for &(u, v) in tree.iter().chain(&matched) {
            graph.add_edge(u, v);
        }
        let circuit = graph.eulerian_circuit(0)?;
        stats.record_step();
        debug!(event = "euler", circuit_len = circuit.len() as u64);

        let tour: Tour = shortcut(&circuit, n)?;
        let ratio = self.reported_ratio(matrix);
        let result = SolveResult::new(tour, matrix, Algorithm::Christofides, started.elapsed())
            .with_approximation_ratio(ratio);

        info!(
            event = "phase_end",
            phase = "Christofides",
            duration_ms = stats.elapsed_ms(),
            steps = stats.step_count,
            cost = result.cost,
        );
        Ok(result)
    }

    /// `Some(1.5)` only for exact matching on input known or verified metric.
    fn reported_ratio(&self, matrix: &DistanceMatrix) -> Option<f64> {
        if self.matching != MatchingStrategy::Exact {
            return None;
        }
        match self.metric {
            MetricAssumption::Trusted => Some(CHRISTOFIDES_RATIO),
            MetricAssumption::NonMetric => None,
            MetricAssumption::Verify => {
                if matrix.satisfies_triangle_inequality() {
                    Some(CHRISTOFIDES_RATIO)
                } else {
                    warn!(
                        event = "metric_check_failed",
                        num_cities = matrix.size(),
                    );
                    None
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicBool;

    use super::*;
    use crate::exhaustive::HeldKarp;
    use crate::termination::ExternalTermination;
    use tspforge_test::assertions::assert_valid_result;
    use tspforge_test::fixtures;

    #[test]
    fn test_five_cities() {
        let matrix = fixtures::five_cities();
        let result = Christofides::new().solve(&matrix).unwrap();

        assert_valid_result(&result, &matrix);
        assert_eq!(result.algorithm, Algorithm::Christofides);
        assert!(!result.is_optimal);
        assert_eq!(result.approximation_ratio, Some(1.5));
        assert_eq!(result.tour.as_slice()[0], 0);
    }

    #[test]
    fn test_within_bound_of_optimum() {
        for seed in 0..12 {
            let n = 6 + seed as usize % 9;
            let matrix = fixtures::euclidean(n, seed);
            let approx = Christofides::new().solve(&matrix).unwrap();
            let exact = HeldKarp::new(20).solve(&matrix).unwrap();

            assert_valid_result(&approx, &matrix);
            assert!(
                approx.cost <= 1.5 * exact.cost + 1e-9,
                "seed {seed}: {} > 1.5 * {}",
                approx.cost,
                exact.cost
            );
        }
    }

    #[test]
    fn test_tiny_instances() {
        let one = Christofides::new().solve(&fixtures::single_city()).unwrap();
        assert_eq!(one.tour.as_slice(), &[0]);
        assert_eq!(one.cost, 0.0);

        let two = Christofides::new().solve(&fixtures::two_cities()).unwrap();
        assert_eq!(two.tour.as_slice(), &[0, 1]);
        assert_eq!(two.cost, 20.0);
    }

    #[test]
    fn test_greedy_drops_ratio() {
        let matrix = fixtures::euclidean(30, 3);
        let result = Christofides::new()
            .with_matching(MatchingStrategy::Greedy)
            .solve(&matrix)
            .unwrap();
        assert_valid_result(&result, &matrix);
        assert_eq!(result.approximation_ratio, None);
    }

    #[test]
    fn test_non_metric_drops_ratio() {
        let matrix = fixtures::five_cities();
        let result = Christofides::new()
            .with_metric(MetricAssumption::NonMetric)
            .solve(&matrix)
            .unwrap();
        assert_eq!(result.approximation_ratio, None);
    }

    #[test]
    fn test_verify_metric() {
        // d(1, 2) = 35 > d(1, 0) + d(0, 2) = 25
        let non_metric = fixtures::five_cities();
        let verify = Christofides::new().with_metric(MetricAssumption::Verify);
        assert_eq!(verify.solve(&non_metric).unwrap().approximation_ratio, None);

        let metric = fixtures::euclidean(20, 5);
        assert_eq!(verify.solve(&metric).unwrap().approximation_ratio, Some(1.5));
    }

    #[test]
    fn test_asymmetric_rejected() {
        let matrix = fixtures::asymmetric_three_cities();
        assert!(matches!(
            Christofides::new().solve(&matrix),
            Err(TspForgeError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_cancelled() {
        let flag = AtomicBool::new(true);
        let matrix = fixtures::euclidean(20, 1);
        let err = Christofides::new()
            .solve_with(&matrix, &ExternalTermination::new(&flag))
            .unwrap_err();
        assert_eq!(err, TspForgeError::Cancelled);
    }

    #[test]
    fn test_deterministic() {
        let matrix = fixtures::euclidean(60, 9);
        let first = Christofides::new().solve(&matrix).unwrap();
        let second = Christofides::new().solve(&matrix).unwrap();
        assert_eq!(first.tour, second.tour);
    }
}
