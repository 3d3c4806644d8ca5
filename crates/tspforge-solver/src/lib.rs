//! TspForge Solver Engine
//!
//! This crate provides the tour algorithms and their entry point:
//! - Exact search ([`HeldKarp`])
//! - Christofides approximation (MST, matching, Eulerian circuit, shortcut)
//! - Construction heuristic ([`NearestNeighbor`])
//! - Local search ([`TwoOpt`])
//! - Termination conditions for cooperative cancellation
//! - [`SolverManager`] dispatch by name or city count

pub mod christofides;
pub mod construction;
pub mod exhaustive;
pub mod localsearch;
pub mod manager;
pub mod stats;
pub mod termination;

pub use christofides::Christofides;
pub use construction::NearestNeighbor;
pub use exhaustive::HeldKarp;
pub use localsearch::TwoOpt;
pub use manager::{AlgorithmSelector, SolveOptions, SolverManager};
pub use termination::{
    ExternalTermination, NoTermination, OrTermination, Termination, TimeTermination,
};
