//! Cooperative cancellation checkpoints.
//!
//! Algorithms poll a [`Termination`] at natural boundaries (between
//! Held-Karp DP layers, between 2-opt passes, between Christofides stages)
//! and abandon the solve with `TspForgeError::Cancelled` when it fires.
//! Nothing here enforces a timeout on its own; the caller decides.

mod composite;
mod external;
mod time;

use std::fmt::Debug;

use tspforge_core::{Result, TspForgeError};

pub use composite::OrTermination;
pub use external::ExternalTermination;
pub use time::TimeTermination;

/// Trait for determining when to abandon a solve.
pub trait Termination: Send + Sync + Debug {
    /// Returns true if solving should stop.
    fn is_terminated(&self) -> bool;
}

impl<T: Termination + ?Sized> Termination for &T {
    fn is_terminated(&self) -> bool {
        (**self).is_terminated()
    }
}

/// Never terminates.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTermination;

impl Termination for NoTermination {
    fn is_terminated(&self) -> bool {
        false
    }
}

/// Returns `Err(Cancelled)` once `termination` fires.
pub(crate) fn checkpoint<T: Termination + ?Sized>(termination: &T) -> Result<()> {
    if termination.is_terminated() {
        Err(TspForgeError::Cancelled)
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests;
