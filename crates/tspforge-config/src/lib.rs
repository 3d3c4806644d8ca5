//! Configuration system for TspForge.
//!
//! Load solver configuration from TOML or YAML files to tune algorithm
//! selection thresholds, size ceilings and local search limits without
//! code changes.
//!
//! # Examples
//!
//! Load configuration from TOML string:
//!
//! ```
//! use tspforge_config::{MatchingStrategy, SolverConfig};
//!
//! let config = SolverConfig::from_toml_str(r#"
//!     [selection]
//!     held_karp_max_cities = 12
//!
//!     [held_karp]
//!     max_cities = 18
//!
//!     [christofides]
//!     matching = "greedy"
//! "#).unwrap();
//!
//! assert_eq!(config.selection.held_karp_max_cities, 12);
//! assert_eq!(config.selection.christofides_max_cities, 500);
//! assert_eq!(config.held_karp.max_cities, 18);
//! assert_eq!(config.christofides.matching, MatchingStrategy::Greedy);
//! ```
//!
//! Use default config when file is missing:
//!
//! ```
//! use tspforge_config::SolverConfig;
//!
//! let config = SolverConfig::load("tspforge.toml").unwrap_or_default();
//! // Proceeds with defaults if file doesn't exist
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Largest Held-Karp ceiling accepted by [`SolverConfig::validate`].
///
/// The DP table holds `2^(n-1) * (n-1)` entries; beyond this the table no
/// longer fits in addressable memory on any realistic host.
pub const HELD_KARP_HARD_LIMIT: usize = 30;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main solver configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct SolverConfig {
    /// Thresholds used by automatic algorithm selection.
    pub selection: SelectionConfig,

    /// Held-Karp size ceiling.
    pub held_karp: HeldKarpConfig,

    /// 2-opt limits.
    pub two_opt: TwoOptConfig,

    /// Christofides matching and metric policy.
    pub christofides: ChristofidesConfig,

    /// Nearest-neighbor defaults.
    pub nearest_neighbor: NearestNeighborConfig,
}

impl SolverConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads and validates configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist, contains invalid TOML, or fails
    /// [`validate`](Self::validate).
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let config = Self::from_toml_file(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(s)?)
    }

    /// Sets the Held-Karp ceiling.
    pub fn with_held_karp_max_cities(mut self, max_cities: usize) -> Self {
        self.held_karp.max_cities = max_cities;
        self
    }

    /// Sets the automatic selection thresholds.
    pub fn with_selection(mut self, selection: SelectionConfig) -> Self {
        self.selection = selection;
        self
    }

    /// Sets the maximum number of 2-opt passes.
    pub fn with_two_opt_max_iterations(mut self, max_iterations: u64) -> Self {
        self.two_opt.max_iterations = max_iterations;
        self
    }

    /// Sets the Christofides matching strategy.
    pub fn with_matching(mut self, matching: MatchingStrategy) -> Self {
        self.christofides.matching = matching;
        self
    }

    /// Sets the Christofides metric policy.
    pub fn with_metric(mut self, metric: MetricAssumption) -> Self {
        self.christofides.metric = metric;
        self
    }

    /// Checks cross-field constraints.
    ///
    /// # Examples
    ///
    /// ```
    /// use tspforge_config::{SelectionConfig, SolverConfig};
    ///
    /// let config = SolverConfig::new().with_selection(SelectionConfig {
    ///     held_karp_max_cities: 600,
    ///     christofides_max_cities: 500,
    ///     two_opt_max_cities: 1000,
    /// });
    /// assert!(config.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<(), ConfigError> {
        let s = &self.selection;
        if s.held_karp_max_cities > s.christofides_max_cities
            || s.christofides_max_cities > s.two_opt_max_cities
        {
            return Err(ConfigError::Invalid(format!(
                "selection thresholds must be non-decreasing, got {} / {} / {}",
                s.held_karp_max_cities, s.christofides_max_cities, s.two_opt_max_cities
            )));
        }
        if s.held_karp_max_cities > self.held_karp.max_cities {
            return Err(ConfigError::Invalid(format!(
                "auto-selection would run Held-Karp up to {} cities but its ceiling is {}",
                s.held_karp_max_cities, self.held_karp.max_cities
            )));
        }
        if self.held_karp.max_cities > HELD_KARP_HARD_LIMIT {
            return Err(ConfigError::Invalid(format!(
                "held_karp.max_cities must be at most {HELD_KARP_HARD_LIMIT}, got {}",
                self.held_karp.max_cities
            )));
        }
        if self.two_opt.max_iterations == 0 {
            return Err(ConfigError::Invalid(
                "two_opt.max_iterations must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// City-count thresholds for automatic algorithm selection.
///
/// `n <= held_karp_max_cities` runs Held-Karp, then Christofides up to
/// `christofides_max_cities`, then nearest-neighbor refined by 2-opt up to
/// `two_opt_max_cities`, and nearest-neighbor alone beyond that.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct SelectionConfig {
    pub held_karp_max_cities: usize,
    pub christofides_max_cities: usize,
    pub two_opt_max_cities: usize,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            held_karp_max_cities: 15,
            christofides_max_cities: 500,
            two_opt_max_cities: 1000,
        }
    }
}

/// Held-Karp configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct HeldKarpConfig {
    /// Requests above this many cities fail instead of allocating the DP table.
    pub max_cities: usize,
}

impl Default for HeldKarpConfig {
    fn default() -> Self {
        Self { max_cities: 20 }
    }
}

/// 2-opt configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct TwoOptConfig {
    /// Maximum number of full improvement passes.
    pub max_iterations: u64,

    /// Tours with at least this many cities are scanned on the rayon pool.
    pub parallel_threshold: usize,
}

impl Default for TwoOptConfig {
    fn default() -> Self {
        Self {
            max_iterations: 1000,
            parallel_threshold: 256,
        }
    }
}

/// Christofides configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct ChristofidesConfig {
    pub matching: MatchingStrategy,
    pub metric: MetricAssumption,
}

/// How odd-degree MST vertices are paired.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchingStrategy {
    /// Minimum-weight perfect matching (blossom algorithm). Keeps the 1.5 bound.
    #[default]
    Exact,

    /// Nearest-partner greedy pairing. Voids the 1.5 bound.
    Greedy,
}

/// What the caller asserts about the triangle inequality.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricAssumption {
    /// Accept the precondition on faith.
    #[default]
    Trusted,

    /// The caller knows the matrix is not metric.
    NonMetric,

    /// Check the triangle inequality before reporting a ratio (O(N³)).
    Verify,
}

/// Nearest-neighbor configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct NearestNeighborConfig {
    /// Default start city.
    pub start: usize,
}
