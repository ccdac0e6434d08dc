//! [`SharedTeleopState`] – the state shared by operator and supervisor.
//!
//! One mutex over one small struct. Both sides hold the lock only long
//! enough to read or apply a transition; nothing inside the critical
//! section blocks, sleeps, or publishes.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Instant;

use velogate_kernel::VelocityState;

/// Everything the watchdog and the gate need to see together: the velocity
/// machine and when the operator last spoke.
#[derive(Debug, Default)]
pub struct TeleopState {
    pub velocity: VelocityState,
    /// Monotonic timestamp of the last accepted intent. `None` until the
    /// first one arrives, which the watchdog treats as stale.
    pub last_command: Option<Instant>,
}

/// Cloneable handle to the shared state.
#[derive(Debug, Default, Clone)]
pub struct SharedTeleopState {
    inner: Arc<Mutex<TeleopState>>,
}

impl SharedTeleopState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lock the state. A poisoned mutex yields the inner state anyway: a
    /// panicked peer must not be able to wedge the safety loop.
    pub fn lock(&self) -> MutexGuard<'_, TeleopState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_stationary_and_stale() {
        let shared = SharedTeleopState::new();
        let state = shared.lock();
        assert!(state.velocity.command().is_zero());
        assert!(state.last_command.is_none());
    }

    #[test]
    fn clones_see_the_same_state() {
        let a = SharedTeleopState::new();
        let b = a.clone();
        a.lock().last_command = Some(Instant::now());
        assert!(b.lock().last_command.is_some());
    }
}
