//! Tests for termination conditions.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use super::*;

#[test]
fn test_no_termination() {
    assert!(!NoTermination.is_terminated());
    assert!(checkpoint(&NoTermination).is_ok());
}

#[test]
fn test_external_termination() {
    let flag = AtomicBool::new(false);
    let term = ExternalTermination::new(&flag);

    assert!(!term.is_terminated());
    flag.store(true, Ordering::SeqCst);
    assert!(term.is_terminated());
    assert_eq!(checkpoint(&term), Err(TspForgeError::Cancelled));
}

#[test]
fn test_time_termination_zero_budget() {
    let term = TimeTermination::new(Duration::ZERO);
    assert!(term.is_terminated());
}

#[test]
fn test_time_termination_not_reached() {
    let term = TimeTermination::seconds(3600);
    assert!(!term.is_terminated());
}

#[test]
fn test_or_termination() {
    let flag = AtomicBool::new(false);
    let term = OrTermination::new(ExternalTermination::new(&flag), TimeTermination::seconds(3600));

    assert!(!term.is_terminated());
    flag.store(true, Ordering::SeqCst);
    assert!(term.is_terminated());
}

#[test]
fn test_reference_is_termination() {
    let flag = AtomicBool::new(true);
    let term = ExternalTermination::new(&flag);
    let by_ref: &dyn Termination = &term;
    assert!(checkpoint(by_ref).is_err());
}
