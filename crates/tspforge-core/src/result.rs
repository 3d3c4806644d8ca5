//! Uniform result record returned by every algorithm.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::matrix::DistanceMatrix;
use crate::tour::Tour;

/// The algorithm that produced a [`SolveResult`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Algorithm {
    #[serde(rename = "held-karp")]
    HeldKarp,
    #[serde(rename = "christofides")]
    Christofides,
    #[serde(rename = "nearest-neighbor")]
    NearestNeighbor,
    #[serde(rename = "2-opt")]
    TwoOpt,
}

impl Algorithm {
    /// Selector name, as accepted by the solver façade.
    pub fn name(self) -> &'static str {
        match self {
            Algorithm::HeldKarp => "held-karp",
            Algorithm::Christofides => "christofides",
            Algorithm::NearestNeighbor => "nearest-neighbor",
            Algorithm::TwoOpt => "2-opt",
        }
    }

    /// Human-readable name for reports.
    pub fn display_name(self) -> &'static str {
        match self {
            Algorithm::HeldKarp => "Held-Karp (Exact DP)",
            Algorithm::Christofides => "Christofides",
            Algorithm::NearestNeighbor => "Nearest Neighbor",
            Algorithm::TwoOpt => "2-opt",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Tour, cost, timing and quality metadata for one solve call.
///
/// Serializes as
/// `{tour, cost, algorithm, execution_time, num_cities, is_optimal, approximation_ratio}`
/// with `execution_time` in fractional seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolveResult {
    pub tour: Tour,
    pub cost: f64,
    pub algorithm: Algorithm,
    #[serde(with = "duration_secs")]
    pub execution_time: Duration,
    pub num_cities: usize,
    pub is_optimal: bool,
    pub approximation_ratio: Option<f64>,
}

impl SolveResult {
    /// Wraps `tour`, computing its cost from `matrix`.
    ///
    /// Flags default to "heuristic": not optimal, no ratio.
    pub fn new(
        tour: Tour,
        matrix: &DistanceMatrix,
        algorithm: Algorithm,
        execution_time: Duration,
    ) -> Self {
        let cost = tour.cost(matrix);
        Self {
            num_cities: tour.len(),
            tour,
            cost,
            algorithm,
            execution_time,
            is_optimal: false,
            approximation_ratio: None,
        }
    }

    /// Marks the result as provably optimal.
    pub fn optimal(mut self) -> Self {
        self.is_optimal = true;
        self
    }

    /// Attaches a worst-case approximation guarantee.
    pub fn with_approximation_ratio(mut self, ratio: Option<f64>) -> Self {
        self.approximation_ratio = ratio;
        self
    }
}

mod duration_secs {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_f64(d.as_secs_f64())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        let secs = f64::deserialize(d)?;
        Duration::try_from_secs_f64(secs).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> DistanceMatrix {
        DistanceMatrix::new(vec![
            vec![0.0, 10.0, 15.0],
            vec![10.0, 0.0, 20.0],
            vec![15.0, 20.0, 0.0],
        ])
        .unwrap()
    }

    #[test]
    fn test_new_computes_cost() {
        let result = SolveResult::new(
            Tour::new(vec![0, 2, 1]),
            &triangle(),
            Algorithm::NearestNeighbor,
            Duration::from_millis(5),
        );
        assert_eq!(result.cost, 45.0);
        assert_eq!(result.num_cities, 3);
        assert!(!result.is_optimal);
        assert_eq!(result.approximation_ratio, None);
    }

    #[test]
    fn test_json_shape() {
        let result = SolveResult::new(
            Tour::new(vec![0, 1, 2]),
            &triangle(),
            Algorithm::Christofides,
            Duration::from_millis(250),
        )
        .with_approximation_ratio(Some(1.5));

        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["tour"], serde_json::json!([0, 1, 2]));
        assert_eq!(value["cost"], 45.0);
        assert_eq!(value["algorithm"], "christofides");
        assert_eq!(value["execution_time"], 0.25);
        assert_eq!(value["num_cities"], 3);
        assert_eq!(value["is_optimal"], false);
        assert_eq!(value["approximation_ratio"], 1.5);
    }

    #[test]
    fn test_json_null_ratio() {
        let result = SolveResult::new(
            Tour::new(vec![0, 1, 2]),
            &triangle(),
            Algorithm::HeldKarp,
            Duration::ZERO,
        )
        .optimal();
        let value = serde_json::to_value(&result).unwrap();
        assert!(value["approximation_ratio"].is_null());
        assert_eq!(value["is_optimal"], true);
        assert_eq!(value["algorithm"], "held-karp");
    }

    #[test]
    fn test_algorithm_names() {
        assert_eq!(Algorithm::TwoOpt.name(), "2-opt");
        assert_eq!(Algorithm::HeldKarp.to_string(), "Held-Karp (Exact DP)");
        let json = serde_json::to_string(&Algorithm::TwoOpt).unwrap();
        assert_eq!(json, "\"2-opt\"");
    }
}
