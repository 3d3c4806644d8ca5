//! Tour construction heuristics.

mod nearest_neighbor;

pub use nearest_neighbor::NearestNeighbor;
