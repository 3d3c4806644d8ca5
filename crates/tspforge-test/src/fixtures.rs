//! Distance matrices with known answers.

use tspforge_core::DistanceMatrix;

fn matrix(rows: Vec<Vec<f64>>) -> DistanceMatrix {
    DistanceMatrix::new(rows).expect("fixture matrix is valid")
}

/// `[[0]]`.
pub fn single_city() -> DistanceMatrix {
    matrix(vec![vec![0.0]])
}

/// Two cities 10 apart; every tour costs 20.
pub fn two_cities() -> DistanceMatrix {
    matrix(vec![vec![0.0, 10.0], vec![10.0, 0.0]])
}

/// Every tour costs 45.
pub fn three_cities() -> DistanceMatrix {
    matrix(vec![
        vec![0.0, 10.0, 15.0],
        vec![10.0, 0.0, 20.0],
        vec![15.0, 20.0, 0.0],
    ])
}

/// Optimum 80 via `0-1-3-2-0`.
pub fn four_cities() -> DistanceMatrix {
    matrix(vec![
        vec![0.0, 10.0, 15.0, 20.0],
        vec![10.0, 0.0, 35.0, 25.0],
        vec![15.0, 35.0, 0.0, 30.0],
        vec![20.0, 25.0, 30.0, 0.0],
    ])
}

/// Symmetric but not metric: `d(1, 2) = 35 > d(1, 0) + d(0, 2)`.
///
/// Nearest-neighbor from 0 gives `[0, 1, 3, 4, 2]` at cost 85.
pub fn five_cities() -> DistanceMatrix {
    matrix(vec![
        vec![0.0, 10.0, 15.0, 20.0, 25.0],
        vec![10.0, 0.0, 35.0, 25.0, 30.0],
        vec![15.0, 35.0, 0.0, 30.0, 20.0],
        vec![20.0, 25.0, 30.0, 0.0, 15.0],
        vec![25.0, 30.0, 20.0, 15.0, 0.0],
    ])
}

/// `n` cities all `distance` apart.
pub fn uniform(n: usize, distance: f64) -> DistanceMatrix {
    let rows = (0..n)
        .map(|i| (0..n).map(|j| if i == j { 0.0 } else { distance }).collect())
        .collect();
    matrix(rows)
}

/// Directed ring: `0 -> 1 -> 2 -> 0` costs 3, the reverse costs 300.
pub fn asymmetric_three_cities() -> DistanceMatrix {
    matrix(vec![
        vec![0.0, 1.0, 100.0],
        vec![100.0, 0.0, 1.0],
        vec![1.0, 100.0, 0.0],
    ])
}

/// Corners of the unit square in perimeter order; optimum 4.
pub fn unit_square() -> DistanceMatrix {
    DistanceMatrix::from_points(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)])
        .expect("fixture points are valid")
}

/// `n` seeded random cities in the 1000 x 1000 square.
pub fn euclidean(n: usize, seed: u64) -> DistanceMatrix {
    DistanceMatrix::random_euclidean(n, seed).expect("fixture size is positive")
}
