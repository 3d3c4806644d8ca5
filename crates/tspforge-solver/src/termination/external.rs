//! External termination via AtomicBool flag.

use std::sync::atomic::{AtomicBool, Ordering};

use super::Termination;

/// Terminates when an external flag is set.
///
/// Allows another thread to cancel a running solve by setting an `AtomicBool`.
///
/// # Example
///
/// ```
/// use std::sync::atomic::{AtomicBool, Ordering};
/// use tspforge_solver::termination::{ExternalTermination, Termination};
///
/// let flag = AtomicBool::new(false);
/// let term = ExternalTermination::new(&flag);
/// assert!(!term.is_terminated());
///
/// flag.store(true, Ordering::SeqCst);
/// assert!(term.is_terminated());
/// ```
#[derive(Debug)]
pub struct ExternalTermination<'a> {
    flag: &'a AtomicBool,
}

impl<'a> ExternalTermination<'a> {
    /// Creates a termination that checks the given flag.
    pub fn new(flag: &'a AtomicBool) -> Self {
        Self { flag }
    }
}

impl Termination for ExternalTermination<'_> {
    fn is_terminated(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}
