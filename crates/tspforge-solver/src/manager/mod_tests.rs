//! Tests for the SolverManager façade.

use std::sync::atomic::AtomicBool;

use tspforge_config::{MetricAssumption, SelectionConfig, SolverConfig};
use tspforge_core::{Algorithm, Tour, TspForgeError};
use tspforge_test::assertions::assert_valid_result;
use tspforge_test::fixtures;

use super::*;
use crate::construction::NearestNeighbor;
use crate::localsearch::TwoOpt;
use crate::termination::{ExternalTermination, NoTermination};

/// Small thresholds so every auto branch runs on cheap instances.
fn small_thresholds() -> SolverManager {
    SolverManager::new(SolverConfig::new().with_selection(SelectionConfig {
        held_karp_max_cities: 5,
        christofides_max_cities: 12,
        two_opt_max_cities: 40,
    }))
    .unwrap()
}

#[test]
fn test_default_selection_policy() {
    let manager = SolverManager::default();
    assert_eq!(manager.select(1), Algorithm::HeldKarp);
    assert_eq!(manager.select(15), Algorithm::HeldKarp);
    assert_eq!(manager.select(16), Algorithm::Christofides);
    assert_eq!(manager.select(500), Algorithm::Christofides);
    assert_eq!(manager.select(501), Algorithm::TwoOpt);
    assert_eq!(manager.select(1000), Algorithm::TwoOpt);
    assert_eq!(manager.select(1001), Algorithm::NearestNeighbor);
}

#[test]
fn test_auto_dispatch() {
    let manager = small_thresholds();
    for (n, expected) in [
        (5, Algorithm::HeldKarp),
        (12, Algorithm::Christofides),
        (30, Algorithm::TwoOpt),
        (41, Algorithm::NearestNeighbor),
    ] {
        let matrix = fixtures::euclidean(n, n as u64);
        let result = manager.solve(&matrix, AlgorithmSelector::Auto).unwrap();
        assert_valid_result(&result, &matrix);
        assert_eq!(result.algorithm, expected, "n = {n}");
    }
}

#[test]
fn test_auto_two_opt_starts_from_nearest_neighbor() {
    let manager = small_thresholds();
    let matrix = fixtures::euclidean(30, 8);

    let auto = manager.solve(&matrix, AlgorithmSelector::Auto).unwrap();
    let greedy = NearestNeighbor::new(0).build_tour(&matrix).unwrap();
    let expected = TwoOpt::new(1000).improve(&matrix, &greedy).unwrap();

    assert_eq!(auto.tour, expected.tour);
    assert!(auto.cost <= greedy.cost(&matrix));
}

#[test]
fn test_explicit_two_opt_starts_from_identity() {
    let manager = SolverManager::default();
    let matrix = fixtures::euclidean(25, 4);

    let result = manager.solve(&matrix, AlgorithmSelector::TwoOpt).unwrap();
    let expected = TwoOpt::new(1000).improve(&matrix, &Tour::identity(25)).unwrap();
    assert_eq!(result.tour, expected.tour);
    assert!(result.cost <= Tour::identity(25).cost(&matrix));
}

#[test]
fn test_initial_tour_override() {
    let manager = SolverManager::default();
    let matrix = fixtures::unit_square();
    let options = SolveOptions::new().with_initial_tour(Tour::new(vec![0, 2, 1, 3]));

    let result = manager
        .solve_with(&matrix, AlgorithmSelector::TwoOpt, &options, &NoTermination)
        .unwrap();
    assert!((result.cost - 4.0).abs() < 1e-12);
}

#[test]
fn test_invalid_initial_tour() {
    let manager = SolverManager::default();
    let matrix = fixtures::four_cities();
    let options = SolveOptions::new().with_initial_tour(Tour::new(vec![0, 1, 1, 3]));

    let err = manager
        .solve_with(&matrix, AlgorithmSelector::TwoOpt, &options, &NoTermination)
        .unwrap_err();
    assert!(matches!(err, TspForgeError::InvalidInput(_)));
}

#[test]
fn test_start_override() {
    let manager = SolverManager::default();
    let matrix = fixtures::five_cities();
    let options = SolveOptions::new().with_start(4);

    let result = manager
        .solve_with(&matrix, AlgorithmSelector::NearestNeighbor, &options, &NoTermination)
        .unwrap();
    assert_eq!(result.tour.as_slice()[0], 4);

    let out_of_range = SolveOptions::new().with_start(5);
    let err = manager
        .solve_with(&matrix, AlgorithmSelector::NearestNeighbor, &out_of_range, &NoTermination)
        .unwrap_err();
    assert!(matches!(err, TspForgeError::InvalidInput(_)));
}

#[test]
fn test_max_iterations_override() {
    let manager = SolverManager::default();
    let matrix = fixtures::euclidean(30, 2);
    let options = SolveOptions::new().with_max_iterations(1);

    let one_pass = manager
        .solve_with(&matrix, AlgorithmSelector::TwoOpt, &options, &NoTermination)
        .unwrap();
    let expected = TwoOpt::new(1).improve(&matrix, &Tour::identity(30)).unwrap();
    assert_eq!(one_pass.tour, expected.tour);
}

#[test]
fn test_metric_override() {
    let manager = SolverManager::default();
    let matrix = fixtures::five_cities();
    let options = SolveOptions::new().with_metric(MetricAssumption::NonMetric);

    let trusted = manager.solve(&matrix, AlgorithmSelector::Christofides).unwrap();
    assert_eq!(trusted.approximation_ratio, Some(1.5));

    let flagged = manager
        .solve_with(&matrix, AlgorithmSelector::Christofides, &options, &NoTermination)
        .unwrap();
    assert_eq!(flagged.approximation_ratio, None);
}

#[test]
fn test_held_karp_ceiling() {
    let manager = SolverManager::default();
    let matrix = fixtures::euclidean(21, 1);
    let err = manager.solve(&matrix, AlgorithmSelector::HeldKarp).unwrap_err();
    assert!(matches!(
        err,
        TspForgeError::SizeLimitExceeded { num_cities: 21, limit: 20, .. }
    ));
}

#[test]
fn test_asymmetric_rejected_where_required() {
    let manager = SolverManager::default();
    let matrix = fixtures::asymmetric_three_cities();

    for selector in [AlgorithmSelector::Christofides, AlgorithmSelector::TwoOpt] {
        assert!(matches!(
            manager.solve(&matrix, selector),
            Err(TspForgeError::InvalidInput(_))
        ));
    }
    assert!(manager.solve(&matrix, AlgorithmSelector::HeldKarp).is_ok());
    assert!(manager.solve(&matrix, AlgorithmSelector::NearestNeighbor).is_ok());
}

#[test]
fn test_invalid_config_rejected() {
    let config = SolverConfig::new().with_two_opt_max_iterations(0);
    assert!(SolverManager::new(config).is_err());
}

#[test]
fn test_cancelled_before_dispatch() {
    let flag = AtomicBool::new(true);
    let manager = SolverManager::default();
    let matrix = fixtures::three_cities();

    let err = manager
        .solve_with(
            &matrix,
            AlgorithmSelector::NearestNeighbor,
            &SolveOptions::default(),
            &ExternalTermination::new(&flag),
        )
        .unwrap_err();
    assert_eq!(err, TspForgeError::Cancelled);
}

#[test]
fn test_batch_keeps_order() {
    let manager = SolverManager::default();
    let matrices: Vec<_> = (0..8).map(|i| fixtures::euclidean(4 + i, i as u64)).collect();

    let results = manager.solve_batch(&matrices, AlgorithmSelector::Auto);
    assert_eq!(results.len(), 8);
    for (matrix, result) in matrices.iter().zip(&results) {
        let result = result.as_ref().unwrap();
        assert_valid_result(result, matrix);
        let sequential = manager.solve(matrix, AlgorithmSelector::Auto).unwrap();
        assert_eq!(result.tour, sequential.tour);
    }
}
