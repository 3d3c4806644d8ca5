//! Closed tours and the canonical cost function.

use serde::{Deserialize, Serialize};

use crate::error::{Result, TspForgeError};
use crate::matrix::DistanceMatrix;

/// An ordered visit sequence over all cities, implicitly closed: the last
/// city connects back to the first.
///
/// # Examples
///
/// ```
/// use tspforge_core::{DistanceMatrix, Tour};
///
/// let matrix = DistanceMatrix::new(vec![
///     vec![0.0, 10.0, 15.0],
///     vec![10.0, 0.0, 20.0],
///     vec![15.0, 20.0, 0.0],
/// ]).unwrap();
///
/// let tour = Tour::new(vec![0, 1, 2]);
/// assert_eq!(tour.cost(&matrix), 45.0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tour(Vec<usize>);

impl Tour {
    pub fn new(cities: Vec<usize>) -> Self {
        Self(cities)
    }

    /// The tour `0, 1, ..., n - 1`.
    pub fn identity(n: usize) -> Self {
        Self((0..n).collect())
    }

    /// Sum of `d[t[k]][t[(k + 1) % n]]` over every position.
    ///
    /// This is the only place tour quality is computed; results never carry
    /// a cost obtained any other way.
    pub fn cost(&self, matrix: &DistanceMatrix) -> f64 {
        let n = self.0.len();
        let mut total = 0.0;
        for k in 0..n {
            total += matrix.get(self.0[k], self.0[(k + 1) % n]);
        }
        total
    }

    /// Checks that the tour is a permutation of `0..n`.
    pub fn validate(&self, n: usize) -> Result<()> {
        if self.0.len() != n {
            return Err(TspForgeError::invalid(format!(
                "tour visits {} cities, expected {n}",
                self.0.len()
            )));
        }
        let mut seen = vec![false; n];
        for &city in &self.0 {
            if city >= n {
                return Err(TspForgeError::invalid(format!(
                    "tour city {city} out of range 0..{n}"
                )));
            }
            if std::mem::replace(&mut seen[city], true) {
                return Err(TspForgeError::invalid(format!(
                    "tour visits city {city} more than once"
                )));
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<usize> {
        self.0
    }
}

impl From<Vec<usize>> for Tour {
    fn from(cities: Vec<usize>) -> Self {
        Self(cities)
    }
}

impl AsRef<[usize]> for Tour {
    fn as_ref(&self) -> &[usize] {
        &self.0
    }
}
