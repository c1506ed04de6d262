//! Per-disk fault scheduling state.
//!
//! Each monitored disk owns a private generator, its access/fault
//! counters, and the countdown to its next fault.  Disks share nothing,
//! so firing on one disk can never perturb another's fault pattern.

use std::sync::atomic::{AtomicI64, AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};

use swapfault_rng::Mt64;

/// Every disk's generator is reseeded with this constant at construction
/// and on rate reconfiguration.
pub(crate) const DISK_SEED: u64 = 1;

/// Fault-scheduling state for a single disk.
///
/// Counters use relaxed atomics: concurrent callers on the same disk may
/// lose or duplicate an update, which the engine accepts because only the
/// aggregate firing rate matters.  The generator mutex is touched only
/// when a fault fires or the disk is reset, never on the plain access
/// path.
#[derive(Debug)]
pub(crate) struct DiskFaultState {
    /// Private word source for countdown draws.
    rng: Mutex<Mt64>,
    /// Accesses recorded for this disk.  Informational.
    access_count: AtomicU64,
    /// Remaining accesses until the next fault.  Signed: racing
    /// decrements may push it below zero, and firing tolerates that.
    countdown: AtomicI64,
    /// Faults fired for this disk.  Reporting only.
    fault_count: AtomicU64,
}

impl DiskFaultState {
    /// Fresh state for `rate`: reseeded generator, zeroed counters, and
    /// an initial countdown drawn uniformly over `[0, 2*rate)`.
    pub(crate) fn new(rate: u64) -> Self {
        let mut rng = Mt64::new(DISK_SEED);
        let countdown = (rng.next_u64() % (2 * rate)) as i64;
        Self {
            rng: Mutex::new(rng),
            access_count: AtomicU64::new(0),
            countdown: AtomicI64::new(countdown),
            fault_count: AtomicU64::new(0),
        }
    }

    /// Reseed and zero this disk as part of a full reconfiguration.
    ///
    /// Takes `&mut self`: the controller holds its write lock here, so
    /// the atomics and the mutex are accessed directly.
    pub(crate) fn reset(&mut self, rate: u64) {
        let rng = self
            .rng
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner);
        rng.reseed(DISK_SEED);
        *self.countdown.get_mut() = (rng.next_u64() % (2 * rate)) as i64;
        *self.access_count.get_mut() = 0;
        *self.fault_count.get_mut() = 0;
    }

    /// Record one access: bump the counter, tick the countdown.
    pub(crate) fn record_access(&self) {
        self.access_count.fetch_add(1, Ordering::Relaxed);
        self.countdown.fetch_sub(1, Ordering::Relaxed);
    }

    /// Fire if the countdown has run out.
    ///
    /// On firing, bumps the fault count and resamples the countdown
    /// uniformly over `[1, 2*rate]` from this disk's generator.  Two
    /// racing callers may both observe an expired countdown and both
    /// fire; that imprecision is part of the engine's contract.
    pub(crate) fn try_fire(&self, rate: u64) -> bool {
        if self.countdown.load(Ordering::Relaxed) > 0 {
            return false;
        }
        self.fault_count.fetch_add(1, Ordering::Relaxed);
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        let draw = rng.next_u64() % (2 * rate);
        self.countdown.store(1 + draw as i64, Ordering::Relaxed);
        true
    }

    pub(crate) fn access_count(&self) -> u64 {
        self.access_count.load(Ordering::Relaxed)
    }

    pub(crate) fn fault_count(&self) -> u64 {
        self.fault_count.load(Ordering::Relaxed)
    }
}
