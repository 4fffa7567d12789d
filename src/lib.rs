//! # tour-opt
//!
//! Approximate shortest closed tours over planar points: a Euclidean
//! distance matrix, a nearest-neighbor starting tour, and best-improvement
//! 2-opt refinement.
//!
//! ## Modules
//!
//! - [`models`] — Domain model types (Point, Tour)
//! - [`distance`] — Dense Euclidean distance matrix
//! - [`constructive`] — Nearest-neighbor tour construction
//! - [`local_search`] — 2-opt refinement with scan observers and stop conditions
//! - [`generator`] — Seeded random point sets
//! - [`solver`] — The full pipeline and its configuration
//! - [`logging`] — Logger setup and a logging observer
//!
//! ## Example
//!
//! ```
//! use tour_opt::models::Point;
//! use tour_opt::distance::DistanceMatrix;
//! use tour_opt::constructive::greedy_construct;
//! use tour_opt::local_search::{optimize, NoopObserver};
//!
//! let points = [
//!     Point::new(0.0, 0.0),
//!     Point::new(1.0, 1.0),
//!     Point::new(0.0, 1.0),
//!     Point::new(1.0, 0.0),
//! ];
//! let dm = DistanceMatrix::from_points(&points).unwrap();
//! let tour = greedy_construct(&dm, 0).unwrap();
//! let tour = optimize(&dm, tour, &mut NoopObserver).unwrap();
//! assert!((tour.length() - 4.0).abs() < 1e-10);
//! ```

pub mod constructive;
pub mod distance;
pub mod error;
pub mod generator;
pub mod local_search;
pub mod logging;
pub mod models;
pub mod solver;

pub use error::{Error, Result};
