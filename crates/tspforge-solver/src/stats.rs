//! Phase statistics.
//!
//! Stack-allocated counters reported in each algorithm's `phase_end` event.

use std::time::{Duration, Instant};

/// Statistics for a single algorithm run.
///
/// # Example
///
/// ```
/// use tspforge_solver::stats::PhaseStats;
///
/// let mut stats = PhaseStats::new("TwoOpt");
/// stats.record_step();
/// stats.record_moves(10);
/// stats.record_applied();
///
/// assert_eq!(stats.phase_type, "TwoOpt");
/// assert_eq!(stats.step_count, 1);
/// assert_eq!(stats.moves_evaluated, 10);
/// assert_eq!(stats.moves_applied, 1);
/// ```
#[derive(Debug)]
pub struct PhaseStats {
    /// Type name of the phase.
    pub phase_type: &'static str,
    start_time: Instant,
    /// Steps taken (DP layers, 2-opt passes, pipeline stages).
    pub step_count: u64,
    /// Candidate moves or DP transitions evaluated.
    pub moves_evaluated: u64,
    /// Moves that changed the tour.
    pub moves_applied: u64,
}

impl PhaseStats {
    /// Creates new phase statistics, starting the clock.
    pub fn new(phase_type: &'static str) -> Self {
        Self {
            phase_type,
            start_time: Instant::now(),
            step_count: 0,
            moves_evaluated: 0,
            moves_applied: 0,
        }
    }

    /// Returns the elapsed time for this phase.
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Returns the elapsed time in milliseconds.
    pub fn elapsed_ms(&self) -> u64 {
        self.start_time.elapsed().as_millis() as u64
    }

    /// Records a step completion.
    pub fn record_step(&mut self) {
        self.step_count += 1;
    }

    /// Records `count` evaluated candidates.
    pub fn record_moves(&mut self, count: u64) {
        self.moves_evaluated += count;
    }

    /// Records an applied move.
    pub fn record_applied(&mut self) {
        self.moves_applied += 1;
    }

    /// Returns the evaluations per second rate.
    pub fn moves_per_second(&self) -> u64 {
        let secs = self.elapsed().as_secs_f64();
        if secs > 0.0 {
            (self.moves_evaluated as f64 / secs) as u64
        } else {
            0
        }
    }
}
