//! Invariant checks shared by solver tests.

use tspforge_core::{DistanceMatrix, SolveResult, Tour};

/// Panics unless `tour` is a permutation of `0..n`.
pub fn assert_valid_tour(tour: &Tour, n: usize) {
    assert_eq!(tour.len(), n, "tour {:?} should visit {n} cities", tour.as_slice());
    let mut seen = vec![false; n];
    for &city in tour.as_slice() {
        assert!(city < n, "city {city} out of range 0..{n}");
        assert!(!seen[city], "city {city} visited twice");
        seen[city] = true;
    }
}

/// Panics unless `result` holds a valid tour of `matrix` whose reported cost
/// is exactly the canonical closed-tour sum.
pub fn assert_valid_result(result: &SolveResult, matrix: &DistanceMatrix) {
    assert_valid_tour(&result.tour, matrix.size());
    assert_eq!(result.num_cities, matrix.size());
    assert_eq!(
        result.cost,
        result.tour.cost(matrix),
        "reported cost drifted from the tour sum"
    );
    if result.is_optimal {
        assert!(result.approximation_ratio.is_none() || result.approximation_ratio == Some(1.0));
    }
}
