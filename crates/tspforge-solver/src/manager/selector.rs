//! Algorithm selection by name.

use std::fmt;
use std::str::FromStr;

use tspforge_core::{Algorithm, TspForgeError};

/// Which algorithm [`SolverManager`](super::SolverManager) runs.
///
/// # Examples
///
/// ```
/// use tspforge_solver::AlgorithmSelector;
///
/// let selector: AlgorithmSelector = "Held-Karp".parse().unwrap();
/// assert_eq!(selector, AlgorithmSelector::HeldKarp);
/// assert_eq!("nn".parse::<AlgorithmSelector>().unwrap(), AlgorithmSelector::NearestNeighbor);
/// assert!("simplex".parse::<AlgorithmSelector>().is_err());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum AlgorithmSelector {
    HeldKarp,
    Christofides,
    NearestNeighbor,
    TwoOpt,
    /// Pick by city count using the configured thresholds.
    #[default]
    Auto,
}

impl AlgorithmSelector {
    /// Canonical selector string.
    pub fn name(self) -> &'static str {
        match self {
            AlgorithmSelector::HeldKarp => "held-karp",
            AlgorithmSelector::Christofides => "christofides",
            AlgorithmSelector::NearestNeighbor => "nearest-neighbor",
            AlgorithmSelector::TwoOpt => "2-opt",
            AlgorithmSelector::Auto => "auto",
        }
    }

    /// The algorithm this selector names, or `None` for `Auto`.
    pub fn algorithm(self) -> Option<Algorithm> {
        match self {
            AlgorithmSelector::HeldKarp => Some(Algorithm::HeldKarp),
            AlgorithmSelector::Christofides => Some(Algorithm::Christofides),
            AlgorithmSelector::NearestNeighbor => Some(Algorithm::NearestNeighbor),
            AlgorithmSelector::TwoOpt => Some(Algorithm::TwoOpt),
            AlgorithmSelector::Auto => None,
        }
    }
}

impl From<Algorithm> for AlgorithmSelector {
    fn from(algorithm: Algorithm) -> Self {
        match algorithm {
            Algorithm::HeldKarp => AlgorithmSelector::HeldKarp,
            Algorithm::Christofides => AlgorithmSelector::Christofides,
            Algorithm::NearestNeighbor => AlgorithmSelector::NearestNeighbor,
            Algorithm::TwoOpt => AlgorithmSelector::TwoOpt,
        }
    }
}

impl FromStr for AlgorithmSelector {
    type Err = TspForgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "held-karp" | "held_karp" | "heldkarp" => Ok(AlgorithmSelector::HeldKarp),
            "christofides" => Ok(AlgorithmSelector::Christofides),
            "nearest-neighbor" | "nearest_neighbor" | "nn" => {
                Ok(AlgorithmSelector::NearestNeighbor)
            }
            "2-opt" | "2opt" | "two-opt" | "two_opt" => Ok(AlgorithmSelector::TwoOpt),
            "auto" => Ok(AlgorithmSelector::Auto),
            _ => Err(TspForgeError::UnknownAlgorithm(s.to_string())),
        }
    }
}

impl fmt::Display for AlgorithmSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
