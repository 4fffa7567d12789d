//! Constructive heuristics for building an initial tour.
//!
//! - [`greedy_construct`] — Greedy nearest-neighbor from a given start, O(n²)
//! - [`greedy_construct_random`] — Same, from a start drawn from an injected RNG

mod nearest_neighbor;

pub use nearest_neighbor::{
    greedy_construct, greedy_construct_random, greedy_construct_with, ZeroDistancePolicy,
};
