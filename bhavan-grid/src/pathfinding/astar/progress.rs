//! Search progress reporting.
//!
//! An observer receives immutable snapshots of the search at a cadence the
//! caller picks. It cannot touch search state; returning
//! [`ControlFlow::Break`] stops the search at the current expansion boundary.

use std::ops::ControlFlow;
use std::time::{Duration, Instant};

use crate::core::CellPos;

/// How often snapshots are taken.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProgressCadence {
    /// After every `n` expansions (`0` behaves like `1`)
    EveryExpansions(usize),
    /// At most once per wall-clock interval
    Interval(Duration),
}

impl ProgressCadence {
    /// Snapshots at `fps` frames per second. Rates with no representable
    /// interval fall back to every expansion.
    pub fn per_second(fps: f64) -> Self {
        match Duration::try_from_secs_f64(1.0 / fps) {
            Ok(interval) if fps > 0.0 => ProgressCadence::Interval(interval),
            _ => ProgressCadence::EveryExpansions(1),
        }
    }
}

/// Read-only view of a running search.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchSnapshot {
    /// Expansions so far
    pub expansions: usize,
    /// Cell just expanded
    pub current: CellPos,
    /// Closed cells
    pub closed: Vec<CellPos>,
    /// Cells waiting in the frontier
    pub frontier: Vec<CellPos>,
    /// Best partial path: start to `current`
    pub current_path: Vec<CellPos>,
}

/// Receiver of search snapshots.
pub trait SearchObserver {
    fn on_progress(&mut self, snapshot: &SearchSnapshot) -> ControlFlow<()>;
}

impl<F> SearchObserver for F
where
    F: FnMut(&SearchSnapshot) -> ControlFlow<()>,
{
    fn on_progress(&mut self, snapshot: &SearchSnapshot) -> ControlFlow<()> {
        self(snapshot)
    }
}

/// Decides when the next snapshot is due.
pub(super) struct ProgressGate {
    cadence: ProgressCadence,
    since_last: usize,
    last: Instant,
}

impl ProgressGate {
    pub fn new(cadence: ProgressCadence) -> Self {
        Self {
            cadence,
            since_last: 0,
            last: Instant::now(),
        }
    }

    /// Record one expansion; true when a snapshot is due.
    pub fn tick(&mut self) -> bool {
        self.since_last += 1;
        let due = match self.cadence {
            ProgressCadence::EveryExpansions(n) => self.since_last >= n.max(1),
            ProgressCadence::Interval(interval) => self.last.elapsed() >= interval,
        };
        if due {
            self.since_last = 0;
            self.last = Instant::now();
        }
        due
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_expansions_gate() {
        let mut gate = ProgressGate::new(ProgressCadence::EveryExpansions(3));
        let fired: Vec<bool> = (0..7).map(|_| gate.tick()).collect();
        assert_eq!(fired, vec![false, false, true, false, false, true, false]);

        let mut gate = ProgressGate::new(ProgressCadence::EveryExpansions(0));
        assert!(gate.tick());
        assert!(gate.tick());
    }

    #[test]
    fn test_interval_gate_zero_always_fires() {
        let mut gate = ProgressGate::new(ProgressCadence::Interval(Duration::ZERO));
        assert!(gate.tick());
        assert!(gate.tick());
    }

    #[test]
    fn test_interval_gate_long_never_fires() {
        let mut gate = ProgressGate::new(ProgressCadence::Interval(Duration::from_secs(3600)));
        assert!(!gate.tick());
    }

    #[test]
    fn test_per_second() {
        assert_eq!(
            ProgressCadence::per_second(4.0),
            ProgressCadence::Interval(Duration::from_millis(250))
        );
        assert_eq!(
            ProgressCadence::per_second(0.0),
            ProgressCadence::EveryExpansions(1)
        );
    }

    #[test]
    fn test_per_second_out_of_range_rates() {
        for fps in [1e-300, -2.0, f64::NAN, f64::NEG_INFINITY] {
            assert_eq!(
                ProgressCadence::per_second(fps),
                ProgressCadence::EveryExpansions(1),
                "fps {}",
                fps
            );
        }
        assert_eq!(
            ProgressCadence::per_second(f64::INFINITY),
            ProgressCadence::Interval(Duration::ZERO)
        );
    }
}
