//! End-to-end pipeline: matrix, nearest-neighbor start, 2-opt refinement.

use std::fs;
use std::path::Path;
use std::time::Instant;

use log::info;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::constructive::{greedy_construct_random, ZeroDistancePolicy};
use crate::distance::DistanceMatrix;
use crate::error::Result;
use crate::local_search::{ScanObserver, StopReason, TwoOpt, TwoOptConfig};
use crate::models::Point;

/// Settings for [`solve`].
///
/// Every field has a default, so a partial JSON document is accepted. The
/// pipeline defaults to [`ZeroDistancePolicy::Allow`] so that coincident
/// points never yield a repeated index; set `"zero_distance": "exclude"` to
/// get the strict nearest-neighbor rule of [`greedy_construct`].
///
/// [`greedy_construct`]: crate::constructive::greedy_construct
///
/// # Examples
///
/// ```
/// use tour_opt::solver::SolverConfig;
/// use tour_opt::constructive::ZeroDistancePolicy;
///
/// let config = SolverConfig::from_json_str(
///     r#"{ "zero_distance": "exclude", "two_opt": { "max_scans": 50 } }"#,
/// ).unwrap();
/// assert_eq!(config.zero_distance, ZeroDistancePolicy::Exclude);
/// assert_eq!(config.two_opt.max_scans, Some(50));
/// assert_eq!(config.two_opt.min_gain, 0.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    pub zero_distance: ZeroDistancePolicy,
    pub two_opt: TwoOptConfig,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            zero_distance: ZeroDistancePolicy::Allow,
            two_opt: TwoOptConfig::default(),
        }
    }
}

impl SolverConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }
}

/// A solved instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Solution {
    /// Visiting order of point indices.
    pub order: Vec<usize>,
    /// Cyclic length of `order`.
    pub length: f64,
    /// Length of the nearest-neighbor tour before refinement.
    pub initial_length: f64,
    pub scans: usize,
    pub moves: usize,
    pub stop: StopReason,
    /// Wall time spent in 2-opt, in milliseconds.
    pub elapsed_ms: f64,
}

/// Builds the distance matrix, constructs a nearest-neighbor tour from a
/// random start, and refines it with 2-opt.
///
/// # Errors
///
/// Propagates [`Error::InvalidInput`](crate::Error::InvalidInput) from each
/// stage: non-finite coordinates, an invalid configuration, or, only under
/// [`ZeroDistancePolicy::Exclude`], a degenerate nearest-neighbor tour over
/// coincident points.
///
/// # Examples
///
/// ```
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
/// use tour_opt::generator::random_points;
/// use tour_opt::local_search::NoopObserver;
/// use tour_opt::solver::{solve, SolverConfig};
///
/// let mut rng = StdRng::seed_from_u64(3);
/// let points = random_points(30, &mut rng);
/// let solution = solve(&points, &SolverConfig::default(), &mut rng, &mut NoopObserver).unwrap();
/// assert_eq!(solution.order.len(), 30);
/// assert!(solution.length <= solution.initial_length);
/// ```
pub fn solve<R: Rng, O: ScanObserver + ?Sized>(
    points: &[Point],
    config: &SolverConfig,
    rng: &mut R,
    observer: &mut O,
) -> Result<Solution> {
    let distances = DistanceMatrix::from_points(points)?;
    let initial = greedy_construct_random(&distances, config.zero_distance, rng)?;
    let initial_length = initial.length();
    info!(
        "nearest-neighbor tour over {} points, length {initial_length:.6}",
        points.len()
    );

    let started = Instant::now();
    let outcome = TwoOpt::new(config.two_opt.clone()).run(&distances, initial, observer)?;
    let elapsed = started.elapsed();

    let (order, length) = outcome.tour.into_parts();
    Ok(Solution {
        order,
        length,
        initial_length,
        scans: outcome.scans,
        moves: outcome.moves,
        stop: outcome.stop,
        elapsed_ms: elapsed.as_secs_f64() * 1000.0,
    })
}
