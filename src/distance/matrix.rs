//! Dense distance matrix.

use crate::error::{Error, Result};
use crate::models::{is_permutation, Point};

/// A dense n×n distance matrix stored in row-major order.
///
/// Built once from the point set and read-only afterwards. Entries are
/// finite and non-negative, the diagonal is zero and `get(i, j) == get(j, i)`.
///
/// # Examples
///
/// ```
/// use tour_opt::models::Point;
/// use tour_opt::distance::DistanceMatrix;
///
/// let points = vec![
///     Point::new(0.0, 0.0),
///     Point::new(3.0, 4.0),
///     Point::new(6.0, 8.0),
/// ];
/// let dm = DistanceMatrix::from_points(&points).unwrap();
/// assert!((dm.get(0, 1) - 5.0).abs() < 1e-10);
/// assert_eq!(dm.size(), 3);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    data: Vec<f64>,
    size: usize,
}

impl DistanceMatrix {
    fn zeroed(size: usize) -> Self {
        Self {
            data: vec![0.0; size * size],
            size,
        }
    }

    /// Computes the Euclidean distance matrix of a point set.
    ///
    /// Each unordered pair is computed once and mirrored, so the result is
    /// exactly symmetric.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidInput`] if any coordinate is NaN or infinite.
    pub fn from_points(points: &[Point]) -> Result<Self> {
        if let Some(idx) = points.iter().position(|p| !p.is_finite()) {
            return Err(Error::invalid_input(format!(
                "point {idx} has a non-finite coordinate: {:?}",
                points[idx]
            )));
        }

        let n = points.len();
        let mut dm = Self::zeroed(n);
        for i in 0..n {
            for j in (i + 1)..n {
                let d = points[i].distance_to(&points[j]);
                dm.set(i, j, d);
                dm.set(j, i, d);
            }
        }
        Ok(dm)
    }

    /// Creates a distance matrix from an explicit row-major n×n grid.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidInput`] if `data.len() != size * size`, if an entry is
    /// negative or non-finite, if the diagonal is non-zero, or if the grid is
    /// not symmetric.
    pub fn from_data(size: usize, data: Vec<f64>) -> Result<Self> {
        if data.len() != size * size {
            return Err(Error::invalid_input(format!(
                "expected {} entries for a {size}x{size} matrix, got {}",
                size * size,
                data.len()
            )));
        }
        if let Some(pos) = data.iter().position(|d| !d.is_finite() || *d < 0.0) {
            return Err(Error::invalid_input(format!(
                "entry ({}, {}) is not a finite non-negative distance",
                pos / size,
                pos % size
            )));
        }

        let dm = Self { data, size };
        if (0..size).any(|i| dm.get(i, i) != 0.0) {
            return Err(Error::invalid_input("diagonal must be zero"));
        }
        if !dm.is_symmetric(1e-9) {
            return Err(Error::invalid_input("matrix is not symmetric"));
        }
        Ok(dm)
    }

    /// Creates a distance matrix from nested rows.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidInput`] if the rows do not form a square grid, plus
    /// everything [`DistanceMatrix::from_data`] rejects.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self> {
        let size = rows.len();
        if let Some(i) = rows.iter().position(|row| row.len() != size) {
            return Err(Error::invalid_input(format!(
                "row {i} has {} entries, expected {size}",
                rows[i].len()
            )));
        }
        Self::from_data(size, rows.concat())
    }

    /// Returns the distance from location `from` to location `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    #[inline]
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.size + to]
    }

    fn set(&mut self, from: usize, to: usize, distance: f64) {
        self.data[from * self.size + to] = distance;
    }

    /// Distances from `from` to every location, indexed by location.
    pub fn row(&self, from: usize) -> &[f64] {
        let start = from * self.size;
        &self.data[start..start + self.size]
    }

    /// Number of locations in this matrix.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns `true` if the matrix has no locations.
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns `true` if the matrix is symmetric within the given tolerance.
    pub fn is_symmetric(&self, tol: f64) -> bool {
        for i in 0..self.size {
            for j in (i + 1)..self.size {
                if (self.get(i, j) - self.get(j, i)).abs() > tol {
                    return false;
                }
            }
        }
        true
    }

    /// Cyclic length of `order`, including the closing edge back to the start.
    ///
    /// # Panics
    ///
    /// Panics if `order` holds an index outside the matrix.
    pub fn tour_length(&self, order: &[usize]) -> f64 {
        let n = order.len();
        if n < 2 {
            return 0.0;
        }
        let mut length = 0.0;
        for i in 0..n - 1 {
            length += self.get(order[i], order[i + 1]);
        }
        length + self.get(order[n - 1], order[0])
    }

    /// Checks that `order` is a permutation of this matrix's index set.
    pub fn check_tour(&self, order: &[usize]) -> Result<()> {
        if order.len() != self.size {
            return Err(Error::invalid_input(format!(
                "tour visits {} locations but the matrix has {}",
                order.len(),
                self.size
            )));
        }
        if !is_permutation(order) {
            return Err(Error::invalid_input(
                "tour is not a permutation of the location indices",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_points() -> Vec<Point> {
        vec![
            Point::new(0.0, 0.0),
            Point::new(3.0, 4.0),
            Point::new(0.0, 8.0),
        ]
    }

    #[test]
    fn test_from_points() {
        let dm = DistanceMatrix::from_points(&sample_points()).expect("finite");
        assert_eq!(dm.size(), 3);
        assert!((dm.get(0, 1) - 5.0).abs() < 1e-10);
        assert!((dm.get(0, 2) - 8.0).abs() < 1e-10);
        assert_eq!(dm.get(0, 0), 0.0);
    }

    #[test]
    fn test_symmetric_zero_diagonal() {
        let dm = DistanceMatrix::from_points(&sample_points()).expect("finite");
        assert!(dm.is_symmetric(0.0));
        for i in 0..dm.size() {
            assert_eq!(dm.get(i, i), 0.0);
        }
    }

    #[test]
    fn test_empty_and_single() {
        let dm = DistanceMatrix::from_points(&[]).expect("empty");
        assert_eq!(dm.size(), 0);
        assert!(dm.is_empty());

        let dm = DistanceMatrix::from_points(&[Point::new(2.0, 3.0)]).expect("single");
        assert_eq!(dm.size(), 1);
        assert_eq!(dm.get(0, 0), 0.0);
    }

    #[test]
    fn test_non_finite_rejected() {
        let points = vec![Point::new(0.0, 0.0), Point::new(f64::NAN, 1.0)];
        let err = DistanceMatrix::from_points(&points).unwrap_err();
        assert!(err.is_invalid_input());

        let points = vec![Point::new(f64::INFINITY, 0.0)];
        assert!(DistanceMatrix::from_points(&points).is_err());
    }

    #[test]
    fn test_from_data() {
        let dm = DistanceMatrix::from_data(2, vec![0.0, 5.0, 5.0, 0.0]).expect("valid");
        assert_eq!(dm.get(0, 1), 5.0);
        assert_eq!(dm.get(1, 0), 5.0);
    }

    #[test]
    fn test_from_data_invalid() {
        assert!(DistanceMatrix::from_data(2, vec![0.0, 1.0, 2.0]).is_err());
        assert!(DistanceMatrix::from_data(2, vec![0.0, 1.0, 2.0, 0.0]).is_err());
        assert!(DistanceMatrix::from_data(2, vec![1.0, 1.0, 1.0, 0.0]).is_err());
        assert!(DistanceMatrix::from_data(2, vec![0.0, -1.0, -1.0, 0.0]).is_err());
        assert!(DistanceMatrix::from_data(2, vec![0.0, f64::NAN, f64::NAN, 0.0]).is_err());
    }

    #[test]
    fn test_from_rows_non_square() {
        let rows = vec![vec![0.0, 1.0], vec![1.0]];
        assert!(DistanceMatrix::from_rows(&rows).unwrap_err().is_invalid_input());

        let rows = vec![vec![0.0, 1.0], vec![1.0, 0.0]];
        let dm = DistanceMatrix::from_rows(&rows).expect("square");
        assert_eq!(dm.row(1), &[1.0, 0.0]);
    }

    #[test]
    fn test_tour_length() {
        let dm = DistanceMatrix::from_points(&sample_points()).expect("finite");
        // 0→1 = 5, 1→2 = 5, 2→0 = 8
        assert!((dm.tour_length(&[0, 1, 2]) - 18.0).abs() < 1e-10);
        assert_eq!(dm.tour_length(&[1]), 0.0);
        assert_eq!(dm.tour_length(&[]), 0.0);
    }

    #[test]
    fn test_check_tour() {
        let dm = DistanceMatrix::from_points(&sample_points()).expect("finite");
        assert!(dm.check_tour(&[2, 0, 1]).is_ok());
        assert!(dm.check_tour(&[0, 1]).is_err());
        assert!(dm.check_tour(&[0, 1, 1]).is_err());
        assert!(dm.check_tour(&[0, 1, 3]).is_err());
    }
}
