//! Thread-safe session handle
//!
//! The lock is held for `begin_spin` and for `finish_spin`, never across the
//! presentation delay. A spin issued from another thread during the delay
//! sees `Spinning` and is rejected.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::rng::RandomSource;
use crate::session::{GrantRejected, SessionSnapshot, SlotSession, SpinRejected};
use crate::spin::SpinOutcome;
use crate::timing::TimingConfig;

/// Cloneable handle to one session
#[derive(Debug, Clone)]
pub struct SharedSession {
    inner: Arc<Mutex<SlotSession>>,
    timing: TimingConfig,
}

impl SharedSession {
    /// Share a session, timing taken from its config
    pub fn new(session: SlotSession) -> Self {
        let timing = TimingConfig::from_profile(session.config().timing);
        Self::with_timing(session, timing)
    }

    pub fn with_timing(session: SlotSession, timing: TimingConfig) -> Self {
        Self {
            inner: Arc::new(Mutex::new(session)),
            timing,
        }
    }

    pub fn timing(&self) -> &TimingConfig {
        &self.timing
    }

    /// Accept, wait out the reveal delay, then resolve
    pub fn spin<R: RandomSource + ?Sized>(&self, rng: &mut R) -> Result<SpinOutcome, SpinRejected> {
        let pending = self.inner.lock().begin_spin()?;

        let delay = self.timing.spin_delay();
        if !delay.is_zero() {
            log::trace!("Revealing spin in {:?}", delay);
            std::thread::sleep(delay);
        }

        self.inner.lock().finish_spin(pending, rng)
    }

    pub fn grant_free_spins(&self, count: u32) -> Result<(), GrantRejected> {
        self.inner.lock().grant_free_spins(count)
    }

    pub fn reset(&self) {
        self.inner.lock().reset();
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.inner.lock().snapshot()
    }

    /// Run a closure against the locked session
    pub fn with_session<T>(&self, f: impl FnOnce(&mut SlotSession) -> T) -> T {
        f(&mut self.inner.lock())
    }
}
