//! Random point sets.

use rand::Rng;

use crate::models::Point;

/// Generates `size` points with both coordinates drawn uniformly from `[0, size)`.
///
/// The side of the square grows with the point count so that density stays
/// roughly constant.
///
/// # Examples
///
/// ```
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
/// use tour_opt::generator::random_points;
///
/// let mut rng = StdRng::seed_from_u64(42);
/// let points = random_points(10, &mut rng);
/// assert_eq!(points.len(), 10);
/// assert!(points.iter().all(|p| p.x() >= 0.0 && p.x() < 10.0));
/// ```
pub fn random_points<R: Rng>(size: usize, rng: &mut R) -> Vec<Point> {
    let side = size as f64;
    (0..size)
        .map(|_| {
            let x = rng.random::<f64>() * side;
            let y = rng.random::<f64>() * side;
            Point::new(x, y)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_bounds() {
        let mut rng = StdRng::seed_from_u64(1);
        let points = random_points(50, &mut rng);
        assert_eq!(points.len(), 50);
        for p in &points {
            assert!(p.is_finite());
            assert!((0.0..50.0).contains(&p.x()));
            assert!((0.0..50.0).contains(&p.y()));
        }
    }

    #[test]
    fn test_seeded_reproducible() {
        let a = random_points(20, &mut StdRng::seed_from_u64(99));
        let b = random_points(20, &mut StdRng::seed_from_u64(99));
        assert_eq!(a, b);
    }

    #[test]
    fn test_empty() {
        let mut rng = StdRng::seed_from_u64(0);
        assert!(random_points(0, &mut rng).is_empty());
    }
}
