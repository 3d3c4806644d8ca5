//! Composite termination (OR).

use super::Termination;

/// Combines two terminations with OR logic.
///
/// # Examples
///
/// ```
/// use std::sync::atomic::AtomicBool;
/// use tspforge_solver::termination::{ExternalTermination, OrTermination, TimeTermination};
///
/// // Stop on a user abort OR after 10 seconds
/// let flag = AtomicBool::new(false);
/// let termination = OrTermination::new(
///     ExternalTermination::new(&flag),
///     TimeTermination::seconds(10),
/// );
/// ```
#[derive(Debug)]
pub struct OrTermination<A, B>(pub A, pub B);

impl<A, B> OrTermination<A, B> {
    pub fn new(first: A, second: B) -> Self {
        Self(first, second)
    }
}

impl<A: Termination, B: Termination> Termination for OrTermination<A, B> {
    fn is_terminated(&self) -> bool {
        self.0.is_terminated() || self.1.is_terminated()
    }
}
