//! Domain model types for tour construction.
//!
//! Provides the planar [`Point`] and the closed [`Tour`] that flows from the
//! constructive stage into local search.

mod point;
mod tour;

pub use point::Point;
pub use tour::{is_permutation, Tour};
