//! Nearest-neighbor constructive heuristic.
//!
//! Builds a closed tour greedily: starting from a given location, always move
//! to the nearest unvisited location.
//!
//! # Complexity
//!
//! O(n²) where n = number of locations.
//!
//! # Zero distances
//!
//! Under [`ZeroDistancePolicy::Exclude`] a candidate must lie at a strictly
//! positive distance to be picked, so coincident locations are never chosen. When the
//! only unvisited locations coincide with the current one the step finds no
//! candidate and falls back to location 0 at distance 0, which repeats an
//! index. The optimizer rejects such a tour at its boundary.
//! [`ZeroDistancePolicy::Allow`] admits zero-distance candidates and always
//! yields a permutation.

use log::warn;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::distance::DistanceMatrix;
use crate::error::{Error, Result};
use crate::models::Tour;

/// Whether a zero-distance location may be picked as the nearest neighbor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZeroDistancePolicy {
    /// Only strictly positive distances qualify.
    #[default]
    Exclude,
    /// Zero distances qualify as well.
    Allow,
}

/// Constructs a tour with the nearest-neighbor heuristic from `start`.
///
/// Uses [`ZeroDistancePolicy::Exclude`]. The returned length includes the
/// closing edge back to `start`.
///
/// # Errors
///
/// [`Error::InvalidInput`] if `start` is out of range for a non-empty matrix.
///
/// # Examples
///
/// ```
/// use tour_opt::models::Point;
/// use tour_opt::distance::DistanceMatrix;
/// use tour_opt::constructive::greedy_construct;
///
/// let points = vec![
///     Point::new(0.0, 0.0),
///     Point::new(3.0, 0.0),
///     Point::new(1.0, 0.0),
///     Point::new(2.0, 0.0),
/// ];
/// let dm = DistanceMatrix::from_points(&points).unwrap();
///
/// let tour = greedy_construct(&dm, 0).unwrap();
/// assert_eq!(tour.order(), &[0, 2, 3, 1]);
/// assert!((tour.length() - 6.0).abs() < 1e-10);
/// ```
pub fn greedy_construct(distances: &DistanceMatrix, start: usize) -> Result<Tour> {
    greedy_construct_with(distances, start, ZeroDistancePolicy::Exclude)
}

/// Constructs a tour from a start drawn uniformly from the location set.
pub fn greedy_construct_random<R: Rng>(
    distances: &DistanceMatrix,
    policy: ZeroDistancePolicy,
    rng: &mut R,
) -> Result<Tour> {
    if distances.is_empty() {
        return Ok(Tour::empty());
    }
    let start = rng.random_range(0..distances.size());
    greedy_construct_with(distances, start, policy)
}

/// Constructs a tour from `start` under an explicit zero-distance policy.
pub fn greedy_construct_with(
    distances: &DistanceMatrix,
    start: usize,
    policy: ZeroDistancePolicy,
) -> Result<Tour> {
    let n = distances.size();
    if n == 0 {
        return Ok(Tour::empty());
    }
    if start >= n {
        return Err(Error::invalid_input(format!(
            "start index {start} out of range for {n} locations"
        )));
    }

    let mut visited = vec![false; n];
    let mut order = Vec::with_capacity(n);
    let mut length = 0.0;
    let mut current = start;
    visited[current] = true;
    order.push(current);

    for _ in 1..n {
        let (next, distance) = match nearest_unvisited(distances.row(current), &visited, policy) {
            Some(found) => found,
            None => {
                warn!(
                    "no qualifying neighbor from location {current}; falling back to location 0"
                );
                (0, 0.0)
            }
        };
        visited[next] = true;
        order.push(next);
        length += distance;
        current = next;
    }

    length += distances.get(current, start);
    Ok(Tour::new(order, length))
}

/// Returns the first unvisited index with the strictly smallest qualifying distance.
fn nearest_unvisited(
    row: &[f64],
    visited: &[bool],
    policy: ZeroDistancePolicy,
) -> Option<(usize, f64)> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &d) in row.iter().enumerate() {
        if visited[i] {
            continue;
        }
        if policy == ZeroDistancePolicy::Exclude && d <= 0.0 {
            continue;
        }
        match best {
            Some((_, best_d)) if d >= best_d => {}
            _ => best = Some((i, d)),
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Point;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn line_points() -> DistanceMatrix {
        let points = vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(2.0, 0.0),
            Point::new(3.0, 0.0),
        ];
        DistanceMatrix::from_points(&points).expect("finite")
    }

    #[test]
    fn test_nn_visits_in_line_order() {
        let dm = line_points();
        let tour = greedy_construct(&dm, 0).expect("valid start");
        assert_eq!(tour.order(), &[0, 1, 2, 3]);
        // 0→1 + 1→2 + 2→3 + 3→0 = 1 + 1 + 1 + 3
        assert!((tour.length() - 6.0).abs() < 1e-10);
        assert!(tour.is_permutation());
    }

    #[test]
    fn test_nn_from_middle() {
        let dm = line_points();
        let tour = greedy_construct(&dm, 2).expect("valid start");
        // 2 has neighbors 1 and 3 at equal distance: the lower index wins
        assert_eq!(tour.order(), &[2, 1, 0, 3]);
        assert!((tour.length() - dm.tour_length(tour.order())).abs() < 1e-10);
    }

    #[test]
    fn test_nn_empty_and_single() {
        let dm = DistanceMatrix::from_points(&[]).expect("empty");
        let tour = greedy_construct(&dm, 0).expect("empty is fine");
        assert!(tour.is_empty());
        assert_eq!(tour.length(), 0.0);

        let dm = DistanceMatrix::from_points(&[Point::new(5.0, 5.0)]).expect("single");
        let tour = greedy_construct(&dm, 0).expect("valid start");
        assert_eq!(tour.order(), &[0]);
        assert_eq!(tour.length(), 0.0);
    }

    #[test]
    fn test_nn_start_out_of_range() {
        let dm = line_points();
        assert!(greedy_construct(&dm, 4).unwrap_err().is_invalid_input());
    }

    #[test]
    fn test_nn_skips_coincident_point() {
        // Location 2 coincides with 0 and is skipped while any positive
        // candidate remains.
        let points = vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(0.0, 0.0),
        ];
        let dm = DistanceMatrix::from_points(&points).expect("finite");
        let tour = greedy_construct(&dm, 0).expect("valid start");
        assert_eq!(tour.order(), &[0, 1, 2]);
        assert!(tour.is_permutation());
    }

    #[test]
    fn test_nn_coincident_start_prefers_positive() {
        let points = vec![
            Point::new(1.0, 0.0),
            Point::new(0.0, 0.0),
            Point::new(0.0, 0.0),
        ];
        let dm = DistanceMatrix::from_points(&points).expect("finite");
        // From 1, location 2 sits at distance 0 and is passed over for 0.
        let tour = greedy_construct(&dm, 1).expect("valid start");
        assert_eq!(tour.order(), &[1, 0, 2]);
        assert!(tour.is_permutation());
    }

    #[test]
    fn test_nn_degrades_on_only_coincident_candidate() {
        let points = vec![Point::new(0.0, 0.0), Point::new(0.0, 0.0)];
        let dm = DistanceMatrix::from_points(&points).expect("finite");

        // No positive candidate: falls back to location 0 at distance 0.
        let tour = greedy_construct(&dm, 1).expect("valid start");
        assert_eq!(tour.order(), &[1, 0]);

        let tour = greedy_construct(&dm, 0).expect("valid start");
        assert_eq!(tour.order(), &[0, 0]);
        assert!(!tour.is_permutation());
        assert_eq!(tour.length(), 0.0);
    }

    #[test]
    fn test_nn_allow_zero_distance() {
        let points = vec![Point::new(0.0, 0.0), Point::new(0.0, 0.0)];
        let dm = DistanceMatrix::from_points(&points).expect("finite");
        let tour = greedy_construct_with(&dm, 0, ZeroDistancePolicy::Allow).expect("valid");
        assert_eq!(tour.order(), &[0, 1]);
        assert!(tour.is_permutation());
        assert_eq!(tour.length(), 0.0);
    }

    #[test]
    fn test_nn_random_start_is_reproducible() {
        let dm = line_points();
        let mut a = StdRng::seed_from_u64(7);
        let mut b = StdRng::seed_from_u64(7);
        let ta = greedy_construct_random(&dm, ZeroDistancePolicy::Exclude, &mut a).expect("ok");
        let tb = greedy_construct_random(&dm, ZeroDistancePolicy::Exclude, &mut b).expect("ok");
        assert_eq!(ta, tb);
        assert!(ta.is_permutation());
    }
}
