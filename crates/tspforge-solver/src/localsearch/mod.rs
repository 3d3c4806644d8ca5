//! Local search tour improvement.

mod two_opt;

pub use two_opt::TwoOpt;
