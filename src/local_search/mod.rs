//! Local search for improving a constructed tour.
//!
//! - [`two_opt`] — Best-improvement 2-opt edge exchange with segment reversal

mod two_opt;

pub use two_opt::{
    best_move, is_two_opt_optimal, optimize, reverse_segment, two_opt_change, NoopObserver,
    ScanObserver, StopReason, TwoOpt, TwoOptConfig, TwoOptMove, TwoOptOutcome,
};
