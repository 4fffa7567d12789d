//! Closed tour over point indices.

use serde::{Deserialize, Serialize};

use crate::distance::DistanceMatrix;
use crate::error::Result;

/// A closed tour: an ordering of point indices and its cyclic length.
///
/// The successor of the last index is the first. The order and the length
/// travel together so that the optimizer can update the length incrementally
/// while it reverses segments in place.
///
/// # Examples
///
/// ```
/// use tour_opt::models::{Point, Tour};
/// use tour_opt::distance::DistanceMatrix;
///
/// let points = [
///     Point::new(0.0, 0.0),
///     Point::new(0.0, 1.0),
///     Point::new(1.0, 1.0),
///     Point::new(1.0, 0.0),
/// ];
/// let dm = DistanceMatrix::from_points(&points).unwrap();
/// let tour = Tour::from_order(vec![0, 1, 2, 3], &dm).unwrap();
/// assert!((tour.length() - 4.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Tour {
    order: Vec<usize>,
    length: f64,
}

impl Tour {
    /// Creates a tour from an order and a length the caller already tracks.
    ///
    /// No validation is performed; the optimizer checks both at its boundary.
    pub fn new(order: Vec<usize>, length: f64) -> Self {
        Self { order, length }
    }

    /// Creates an empty tour with zero length.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Validates `order` against `distances` and computes its cyclic length.
    pub fn from_order(order: Vec<usize>, distances: &DistanceMatrix) -> Result<Self> {
        distances.check_tour(&order)?;
        let length = distances.tour_length(&order);
        Ok(Self { order, length })
    }

    /// The visiting order.
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    /// Tracked cyclic length.
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Number of visited positions.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns `true` if the tour visits nothing.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Returns `true` if the order is a permutation of `0..len`.
    pub fn is_permutation(&self) -> bool {
        is_permutation(&self.order)
    }

    /// Splits the tour into its order and length.
    pub fn into_parts(self) -> (Vec<usize>, f64) {
        (self.order, self.length)
    }

    pub(crate) fn order_mut(&mut self) -> &mut [usize] {
        &mut self.order
    }

    pub(crate) fn subtract_gain(&mut self, gain: f64) {
        self.length -= gain;
    }
}

/// Returns `true` if `order` contains every index in `0..order.len()` exactly once.
pub fn is_permutation(order: &[usize]) -> bool {
    let mut seen = vec![false; order.len()];
    for &idx in order {
        if idx >= order.len() || seen[idx] {
            return false;
        }
        seen[idx] = true;
    }
    true
}

impl From<Tour> for (Vec<usize>, f64) {
    fn from(tour: Tour) -> Self {
        tour.into_parts()
    }
}
