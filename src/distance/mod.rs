//! Distance matrices.
//!
//! Provides a dense Euclidean distance matrix shared read-only by every
//! later stage.

mod matrix;

pub use matrix::DistanceMatrix;
