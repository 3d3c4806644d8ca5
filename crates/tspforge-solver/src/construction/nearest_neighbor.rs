//! Greedy nearest-neighbor construction.

use std::time::Instant;

use tracing::info;
use tspforge_config::NearestNeighborConfig;
use tspforge_core::{Algorithm, DistanceMatrix, Result, SolveResult, Tour, TspForgeError};

/// Builds a tour by always travelling to the closest unvisited city.
///
/// `O(n²)` time, `O(n)` space, no quality bound. Deterministic for a fixed
/// start: ties go to the lowest city index. Accepts asymmetric matrices.
///
/// # Example
///
/// ```
/// use tspforge_core::DistanceMatrix;
/// use tspforge_solver::NearestNeighbor;
///
/// let matrix = DistanceMatrix::new(vec![
///     vec![0.0, 10.0],
///     vec![10.0, 0.0],
/// ]).unwrap();
///
/// let result = NearestNeighbor::new(0).solve(&matrix).unwrap();
/// assert_eq!(result.tour.as_slice(), &[0, 1]);
/// assert_eq!(result.cost, 20.0);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct NearestNeighbor {
    start: usize,
}

impl NearestNeighbor {
    pub fn new(start: usize) -> Self {
        Self { start }
    }

    pub fn from_config(config: &NearestNeighborConfig) -> Self {
        Self::new(config.start)
    }

    /// Builds the greedy tour from the configured start city.
    ///
    /// # Errors
    ///
    /// Returns [`TspForgeError::InvalidInput`] if the start city is out of range.
    pub fn solve(&self, matrix: &DistanceMatrix) -> Result<SolveResult> {
        let started = Instant::now();
        info!(
            event = "phase_start",
            phase = "Nearest Neighbor",
            num_cities = matrix.size(),
            start = self.start,
        );
        let tour = self.build_tour(matrix)?;
        let result = SolveResult::new(tour, matrix, Algorithm::NearestNeighbor, started.elapsed());

        info!(
            event = "phase_end",
            phase = "Nearest Neighbor",
            num_cities = matrix.size(),
            start = self.start,
            duration_ms = started.elapsed().as_millis() as u64,
            cost = result.cost,
        );
        Ok(result)
    }

    /// Builds the greedy visit order without wrapping it in a result.
    pub fn build_tour(&self, matrix: &DistanceMatrix) -> Result<Tour> {
        let n = matrix.size();
        if self.start >= n {
            return Err(TspForgeError::InvalidInput(format!(
                "start city {} out of range 0..{n}",
                self.start
            )));
        }

        let mut visited = vec![false; n];
        let mut order = Vec::with_capacity(n);
        let mut current = self.start;
        visited[current] = true;
        order.push(current);

        for _ in 1..n {
            let row = matrix.row(current);
            let mut nearest = usize::MAX;
            let mut nearest_dist = f64::INFINITY;
            for (city, &dist) in row.iter().enumerate() {
                if !visited[city] && (nearest == usize::MAX || dist < nearest_dist) {
                    nearest = city;
                    nearest_dist = dist;
                }
            }
            visited[nearest] = true;
            order.push(nearest);
            current = nearest;
        }

        Ok(Tour::new(order))
    }
}
