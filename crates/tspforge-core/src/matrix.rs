//! Dense distance matrix.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{Result, TspForgeError};

/// Relative tolerance for symmetry and triangle-inequality checks.
const TOLERANCE: f64 = 1e-9;

/// Side length of the square used by [`DistanceMatrix::random_euclidean`].
const RANDOM_EXTENT: f64 = 1000.0;

/// An immutable N×N table of nonnegative travel costs, stored in row-major order.
///
/// Validated once at construction: at least one city, square, finite,
/// nonnegative, zero diagonal. Symmetry is measured at construction and
/// exposed via [`is_symmetric`](Self::is_symmetric); algorithms that depend
/// on it check the flag instead of rescanning the table.
///
/// # Examples
///
/// ```
/// use tspforge_core::DistanceMatrix;
///
/// let matrix = DistanceMatrix::new(vec![
///     vec![0.0, 10.0, 15.0],
///     vec![10.0, 0.0, 20.0],
///     vec![15.0, 20.0, 0.0],
/// ]).unwrap();
///
/// assert_eq!(matrix.size(), 3);
/// assert_eq!(matrix.get(1, 2), 20.0);
/// assert!(matrix.is_symmetric());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    data: Vec<f64>,
    size: usize,
    symmetric: bool,
}

impl DistanceMatrix {
    /// Creates a matrix from nested rows.
    ///
    /// # Errors
    ///
    /// Returns [`TspForgeError::InvalidInput`] when the table is empty, not
    /// square, or holds a negative, non-finite or nonzero-diagonal entry.
    pub fn new(rows: Vec<Vec<f64>>) -> Result<Self> {
        let size = rows.len();
        if size == 0 {
            return Err(TspForgeError::invalid("distance matrix has no cities"));
        }
        let mut data = Vec::with_capacity(size * size);
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != size {
                return Err(TspForgeError::invalid(format!(
                    "distance matrix must be square: row {i} has {} entries, expected {size}",
                    row.len()
                )));
            }
            data.extend(row);
        }
        Self::from_flat(size, data)
    }

    /// Creates a matrix from `size * size` row-major values.
    pub fn from_flat(size: usize, data: Vec<f64>) -> Result<Self> {
        if size == 0 {
            return Err(TspForgeError::invalid("distance matrix has no cities"));
        }
        if data.len() != size * size {
            return Err(TspForgeError::invalid(format!(
                "expected {} values for a {size}x{size} matrix, got {}",
                size * size,
                data.len()
            )));
        }

        for (idx, &value) in data.iter().enumerate() {
            let (i, j) = (idx / size, idx % size);
            if !value.is_finite() {
                return Err(TspForgeError::invalid(format!(
                    "distance d[{i}][{j}] is not finite"
                )));
            }
            if value < 0.0 {
                return Err(TspForgeError::invalid(format!(
                    "distance d[{i}][{j}] is negative ({value})"
                )));
            }
            if i == j && value != 0.0 {
                return Err(TspForgeError::invalid(format!(
                    "diagonal entry d[{i}][{i}] must be zero, got {value}"
                )));
            }
        }

        let symmetric = (0..size)
            .all(|i| ((i + 1)..size).all(|j| approx_eq(data[i * size + j], data[j * size + i])));

        Ok(Self {
            data,
            size,
            symmetric,
        })
    }

    /// Builds a Euclidean matrix from planar coordinates.
    pub fn from_points(points: &[(f64, f64)]) -> Result<Self> {
        let n = points.len();
        let mut data = vec![0.0; n * n];
        for i in 0..n {
            for j in (i + 1)..n {
                let (dx, dy) = (points[i].0 - points[j].0, points[i].1 - points[j].1);
                let d = dx.hypot(dy);
                data[i * n + j] = d;
                data[j * n + i] = d;
            }
        }
        Self::from_flat(n, data)
    }

    /// Generates a Euclidean instance of `n` cities placed uniformly in a
    /// 1000×1000 square. The same seed always yields the same matrix.
    ///
    /// # Examples
    ///
    /// ```
    /// use tspforge_core::DistanceMatrix;
    ///
    /// let a = DistanceMatrix::random_euclidean(10, 42).unwrap();
    /// let b = DistanceMatrix::random_euclidean(10, 42).unwrap();
    /// assert_eq!(a, b);
    /// ```
    pub fn random_euclidean(n: usize, seed: u64) -> Result<Self> {
        let mut rng = StdRng::seed_from_u64(seed);
        let points: Vec<(f64, f64)> = (0..n)
            .map(|_| {
                (
                    rng.random::<f64>() * RANDOM_EXTENT,
                    rng.random::<f64>() * RANDOM_EXTENT,
                )
            })
            .collect();
        Self::from_points(&points)
    }

    /// Returns the cost of travelling from `from` to `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    #[inline]
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.size + to]
    }

    /// Number of cities.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns `true` if `d[i][j] == d[j][i]` for every pair, within tolerance.
    pub fn is_symmetric(&self) -> bool {
        self.symmetric
    }

    /// Returns the row of costs leaving `from`.
    pub fn row(&self, from: usize) -> &[f64] {
        &self.data[from * self.size..(from + 1) * self.size]
    }

    /// Checks `d[i][j] <= d[i][k] + d[k][j]` for every triple. O(N³).
    pub fn satisfies_triangle_inequality(&self) -> bool {
        let n = self.size;
        for k in 0..n {
            for i in 0..n {
                let ik = self.get(i, k);
                for j in 0..n {
                    let direct = self.get(i, j);
                    let detour = ik + self.get(k, j);
                    if direct > detour && !approx_eq(direct, detour) {
                        return false;
                    }
                }
            }
        }
        true
    }
}

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() <= TOLERANCE * a.abs().max(b.abs()).max(1.0)
}
