//! High-level solve entry point.
//!
//! - [`SolverManager`]: validated configuration plus dispatch by selector
//! - [`AlgorithmSelector`]: the four algorithms or automatic choice by size
//! - [`SolveOptions`]: per-call overrides of the configuration

mod options;
mod selector;
mod solver_manager;

#[cfg(test)]
mod mod_tests;

pub use options::SolveOptions;
pub use selector::AlgorithmSelector;
pub use solver_manager::SolverManager;
