//! Time-based termination.

use std::time::{Duration, Instant};

use super::Termination;

/// Terminates once a time budget, counted from construction, is spent.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use tspforge_solver::termination::TimeTermination;
///
/// // Give up after 30 seconds
/// let term = TimeTermination::new(Duration::from_secs(30));
///
/// // Or use convenience constructors
/// let term = TimeTermination::seconds(30);
/// let term = TimeTermination::millis(500);
/// ```
#[derive(Debug, Clone)]
pub struct TimeTermination {
    started: Instant,
    limit: Duration,
}

impl TimeTermination {
    pub fn new(limit: Duration) -> Self {
        Self {
            started: Instant::now(),
            limit,
        }
    }

    pub fn millis(ms: u64) -> Self {
        Self::new(Duration::from_millis(ms))
    }

    pub fn seconds(secs: u64) -> Self {
        Self::new(Duration::from_secs(secs))
    }
}

impl Termination for TimeTermination {
    fn is_terminated(&self) -> bool {
        self.started.elapsed() >= self.limit
    }
}
