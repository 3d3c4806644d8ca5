//! Per-call overrides of the solver configuration.

use tspforge_config::MetricAssumption;
use tspforge_core::Tour;

/// Optional parameters for one solve.
///
/// Unset fields fall back to the manager's [`SolverConfig`](tspforge_config::SolverConfig).
///
/// # Examples
///
/// ```
/// use tspforge_core::Tour;
/// use tspforge_solver::SolveOptions;
///
/// let options = SolveOptions::new()
///     .with_max_iterations(50)
///     .with_initial_tour(Tour::new(vec![0, 2, 1, 3]));
/// assert_eq!(options.max_iterations, Some(50));
/// assert!(options.start.is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SolveOptions {
    /// Nearest-neighbor start city.
    pub start: Option<usize>,
    /// 2-opt pass limit.
    pub max_iterations: Option<u64>,
    /// Tour improved by an explicit 2-opt request.
    pub initial_tour: Option<Tour>,
    /// Metric assumption reported by Christofides.
    pub metric: Option<MetricAssumption>,
}

impl SolveOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_start(mut self, start: usize) -> Self {
        self.start = Some(start);
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: u64) -> Self {
        self.max_iterations = Some(max_iterations);
        self
    }

    pub fn with_initial_tour(mut self, tour: Tour) -> Self {
        self.initial_tour = Some(tour);
        self
    }

    pub fn with_metric(mut self, metric: MetricAssumption) -> Self {
        self.metric = Some(metric);
        self
    }
}
