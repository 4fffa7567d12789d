//! Best-improvement 2-opt over a closed tour.
//!
//! # Algorithm
//!
//! Each scan evaluates every pair of tour positions (n, m) with
//! `m >= n + 2`, i.e. the edges (t[n], t[n+1]) and (t[m], t[m+1]) with the
//! successor of the last position wrapping to the first:
//!
//! ```text
//! change = (d(t[n], t[m]) + d(t[n+1], t[m+1])) - (d(t[n], t[n+1]) + d(t[m], t[m+1]))
//! ```
//!
//! The most negative change over the whole neighborhood is applied by
//! reversing positions n+1..=m, and its gain is subtracted from the tracked
//! length. The search stops when the best gain does not exceed
//! [`TwoOptConfig::min_gain`] or a configured limit is reached.
//!
//! # Complexity
//!
//! O(n²) per scan. The number of scans is unbounded unless
//! [`TwoOptConfig::max_scans`] or [`TwoOptConfig::time_limit_ms`] is set.
//!
//! # Reference
//!
//! Croes, G.A. (1958). "A method for solving traveling salesman problems",
//! *Operations Research* 6(6), 791-812.

use std::time::{Duration, Instant};

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::distance::DistanceMatrix;
use crate::error::{Error, Result};
use crate::models::Tour;

/// Relative tolerance between a tour's tracked and recomputed length.
const LENGTH_TOLERANCE: f64 = 1e-9;

/// Receives progress after every completed scan.
///
/// Called from inside the optimization loop, so implementations should
/// return quickly.
pub trait ScanObserver {
    /// `scan` counts from 1; `length` is the tracked length after the scan.
    fn on_scan(&mut self, scan: usize, length: f64);
}

impl<F: FnMut(usize, f64)> ScanObserver for F {
    fn on_scan(&mut self, scan: usize, length: f64) {
        self(scan, length)
    }
}

/// Observer that ignores every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl ScanObserver for NoopObserver {
    fn on_scan(&mut self, _scan: usize, _length: f64) {}
}

/// Stop conditions for [`TwoOpt`].
///
/// Reaching a limit is not an error: the best tour found so far is returned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TwoOptConfig {
    /// Maximum number of scans, `None` for no limit.
    pub max_scans: Option<usize>,
    /// Wall-clock budget in milliseconds, checked between scans.
    pub time_limit_ms: Option<u64>,
    /// A move is applied only if its gain is strictly greater than this.
    pub min_gain: f64,
}

impl Default for TwoOptConfig {
    fn default() -> Self {
        Self {
            max_scans: None,
            time_limit_ms: None,
            min_gain: 0.0,
        }
    }
}

impl TwoOptConfig {
    pub fn with_max_scans(mut self, max_scans: usize) -> Self {
        self.max_scans = Some(max_scans);
        self
    }

    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit_ms = Some(u64::try_from(limit.as_millis()).unwrap_or(u64::MAX));
        self
    }

    pub fn with_min_gain(mut self, min_gain: f64) -> Self {
        self.min_gain = min_gain;
        self
    }

    fn validate(&self) -> Result<()> {
        if !self.min_gain.is_finite() || self.min_gain < 0.0 {
            return Err(Error::invalid_input(format!(
                "min_gain must be finite and non-negative, got {}",
                self.min_gain
            )));
        }
        Ok(())
    }
}

/// Why an optimization run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// No move with enough gain remains.
    Converged,
    /// [`TwoOptConfig::max_scans`] was reached.
    ScanLimit,
    /// [`TwoOptConfig::time_limit_ms`] elapsed.
    TimeLimit,
}

/// Result of a [`TwoOpt::run`].
#[derive(Debug, Clone, PartialEq)]
pub struct TwoOptOutcome {
    /// The refined tour with its tracked length.
    pub tour: Tour,
    /// Number of completed scans.
    pub scans: usize,
    /// Number of applied moves.
    pub moves: usize,
    /// Why the run ended.
    pub stop: StopReason,
}

/// The best exchange found by one scan.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TwoOptMove {
    /// Position of the first removed edge's tail.
    pub n: usize,
    /// Position of the second removed edge's tail.
    pub m: usize,
    /// Length change of the exchange, negative when it improves.
    pub change: f64,
}

impl TwoOptMove {
    /// Positive length reduction of this move.
    pub fn gain(&self) -> f64 {
        -self.change
    }
}

/// Best-improvement 2-opt optimizer.
///
/// # Examples
///
/// ```
/// use tour_opt::models::{Point, Tour};
/// use tour_opt::distance::DistanceMatrix;
/// use tour_opt::local_search::{NoopObserver, StopReason, TwoOpt, TwoOptConfig};
///
/// let points = [
///     Point::new(0.0, 0.0),
///     Point::new(0.0, 1.0),
///     Point::new(1.0, 0.0),
///     Point::new(1.0, 1.0),
/// ];
/// let dm = DistanceMatrix::from_points(&points).unwrap();
/// let crossing = Tour::from_order(vec![0, 3, 1, 2], &dm).unwrap();
///
/// let outcome = TwoOpt::new(TwoOptConfig::default())
///     .run(&dm, crossing, &mut NoopObserver)
///     .unwrap();
/// assert_eq!(outcome.stop, StopReason::Converged);
/// assert!((outcome.tour.length() - 4.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Default)]
pub struct TwoOpt {
    config: TwoOptConfig,
}

impl TwoOpt {
    pub fn new(config: TwoOptConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TwoOptConfig {
        &self.config
    }

    /// Refines `tour` until it is 2-opt optimal or a limit is reached.
    ///
    /// The tour is taken by value, reversed in place, and handed back in the
    /// outcome together with its updated length.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidInput`] if the tour is not a permutation of the
    /// matrix's locations, if its tracked length disagrees with the matrix,
    /// or if the configuration is invalid.
    pub fn run<O: ScanObserver + ?Sized>(
        &self,
        distances: &DistanceMatrix,
        mut tour: Tour,
        observer: &mut O,
    ) -> Result<TwoOptOutcome> {
        self.config.validate()?;
        check_length(distances, &tour)?;

        let mut scans = 0;
        let mut moves = 0;

        // Fewer than four locations admit only one cycle.
        if tour.len() < 4 {
            return Ok(TwoOptOutcome {
                tour,
                scans,
                moves,
                stop: StopReason::Converged,
            });
        }

        // A budget too large for `Instant` is no budget.
        let deadline = self
            .config
            .time_limit_ms
            .and_then(|ms| Instant::now().checked_add(Duration::from_millis(ms)));

        let stop = loop {
            if self.config.max_scans.is_some_and(|max| scans >= max) {
                break StopReason::ScanLimit;
            }
            if deadline.is_some_and(|deadline| Instant::now() >= deadline) {
                break StopReason::TimeLimit;
            }

            let best = best_move(distances, tour.order());
            scans += 1;

            let applied = match best {
                Some(mv) if mv.gain() > self.config.min_gain => {
                    reverse_segment(tour.order_mut(), mv.n + 1, mv.m);
                    tour.subtract_gain(mv.gain());
                    moves += 1;
                    debug!(
                        "scan {scans}: exchanged edges at positions {} and {}, gain {:.6}",
                        mv.n,
                        mv.m,
                        mv.gain()
                    );
                    true
                }
                _ => false,
            };

            observer.on_scan(scans, tour.length());

            if !applied {
                break StopReason::Converged;
            }
        };

        info!(
            "2-opt stopped ({stop:?}) after {scans} scans and {moves} moves, length {:.6}",
            tour.length()
        );

        Ok(TwoOptOutcome {
            tour,
            scans,
            moves,
            stop,
        })
    }
}

/// Refines `tour` with an unlimited best-improvement 2-opt.
///
/// Returns the same tour, reversed in place until no improving move remains,
/// with its length reduced by the accumulated gains.
pub fn optimize<O: ScanObserver + ?Sized>(
    distances: &DistanceMatrix,
    tour: Tour,
    observer: &mut O,
) -> Result<Tour> {
    TwoOpt::default()
        .run(distances, tour, observer)
        .map(|outcome| outcome.tour)
}

fn check_length(distances: &DistanceMatrix, tour: &Tour) -> Result<()> {
    distances.check_tour(tour.order())?;
    let recomputed = distances.tour_length(tour.order());
    if !tour.length().is_finite()
        || (recomputed - tour.length()).abs() > LENGTH_TOLERANCE * recomputed.max(1.0)
    {
        return Err(Error::invalid_input(format!(
            "tracked tour length {} does not match recomputed length {recomputed}",
            tour.length()
        )));
    }
    Ok(())
}

/// Length change of exchanging the edges after positions `n` and `m`.
///
/// # Panics
///
/// Panics if `n` or `m` is out of range for `order`.
#[inline]
pub fn two_opt_change(distances: &DistanceMatrix, order: &[usize], n: usize, m: usize) -> f64 {
    let size = order.len();
    let (x1, x2) = (order[n], order[m]);
    let (y1, y2) = (order[(n + 1) % size], order[(m + 1) % size]);
    let added = distances.get(x1, x2) + distances.get(y1, y2);
    let removed = distances.get(x1, y1) + distances.get(x2, y2);
    added - removed
}

/// Scans the full neighborhood and returns the most improving move.
///
/// Returns `None` when no pair has a negative change. Among equal changes
/// the first pair in scan order wins.
pub fn best_move(distances: &DistanceMatrix, order: &[usize]) -> Option<TwoOptMove> {
    let size = order.len();
    let mut best: Option<TwoOptMove> = None;
    let mut best_change = 0.0;

    for n in 0..size {
        for m in (n + 2)..size {
            let change = two_opt_change(distances, order, n, m);
            if change < best_change {
                best_change = change;
                best = Some(TwoOptMove { n, m, change });
            }
        }
    }
    best
}

/// Returns `true` if no 2-opt move shortens the tour.
pub fn is_two_opt_optimal(distances: &DistanceMatrix, order: &[usize]) -> bool {
    best_move(distances, order).is_none()
}

/// Reverses the cyclic segment from position `x` to position `y` inclusive.
///
/// Reverses whichever of the arc `x..=y` and its complement is shorter. Both
/// give the same cyclic tour up to direction.
///
/// # Panics
///
/// Panics if `x` or `y` is out of range for a tour of two or more locations.
pub fn reverse_segment(order: &mut [usize], x: usize, y: usize) {
    let size = order.len();
    if size < 2 {
        return;
    }
    assert!(x < size && y < size, "segment endpoints out of range");

    let inner = (y + size - x) % size + 1;
    let (from, to, len) = if inner <= size - inner {
        (x, y, inner)
    } else {
        ((y + 1) % size, (x + size - 1) % size, size - inner)
    };

    for i in 0..len / 2 {
        order.swap((from + i) % size, (to + size - i) % size);
    }
}
