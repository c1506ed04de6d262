//! The fault injection controller.
//!
//! [`FaultInjector`] owns one per-disk fault state per monitored disk
//! plus the global enable gate and fault rate.  The
//! surrounding I/O path calls [`record_access`](FaultInjector::record_access)
//! then [`should_inject_fault`](FaultInjector::should_inject_fault) once
//! per simulated access; on `true` the caller simulates the failure mode
//! itself.
//!
//! # Concurrency
//!
//! The hot-path operations share a read lock and mutate only relaxed
//! atomics, so any number of I/O threads can drive the engine without
//! external synchronization; per-disk counts are approximate under such
//! races by contract.  Reconfiguration (`set_rate*`) takes the write
//! lock and reseeds every disk in one critical section, so no caller can
//! observe a half-reset controller.  Nothing here blocks beyond those
//! short sections; no operation sleeps or awaits.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use log::{debug, info};
use serde::Serialize;

use crate::disk::DiskFaultState;
use crate::error::InjectError;
use crate::rate;

/// Per-disk statistical fault injection engine.
///
/// A caller-owned instance; construct one per engine and share it by
/// reference.  Independent instances never interfere, which keeps test
/// runs isolated.
///
/// # Example
///
/// ```
/// use swapfault_inject::FaultInjector;
///
/// let injector = FaultInjector::new(4);
/// injector.set_rate_text("100")?;
/// injector.set_enabled(true);
///
/// // On the I/O path, once per access:
/// injector.record_access(0)?;
/// if injector.should_inject_fault(0)? {
///     // caller simulates the failure (error return, delay, disconnect)
/// }
/// # Ok::<(), swapfault_inject::InjectError>(())
/// ```
#[derive(Debug)]
pub struct FaultInjector {
    /// Global gate; flipping it never disturbs counters or countdowns.
    enabled: AtomicBool,
    /// Rate plus per-disk state, behind the reconfiguration lock.
    inner: RwLock<Inner>,
}

#[derive(Debug)]
struct Inner {
    rate: u64,
    disks: Vec<DiskFaultState>,
}

impl Inner {
    fn disk(&self, disk: usize) -> Result<&DiskFaultState, InjectError> {
        self.disks.get(disk).ok_or(InjectError::InvalidDisk {
            disk,
            ndisks: self.disks.len(),
        })
    }

    /// Apply `new_rate` and reinitialize every disk: reseed, zero
    /// counters, redraw countdowns.  In-flight countdowns are discarded.
    fn reset(&mut self, new_rate: u64) {
        self.rate = new_rate;
        for disk in &mut self.disks {
            disk.reset(new_rate);
        }
    }
}

impl FaultInjector {
    /// Create a controller for `ndisks` disks: disabled, default rate,
    /// every disk freshly seeded.
    ///
    /// The disk count is fixed for the lifetime of the instance.
    pub fn new(ndisks: usize) -> Self {
        let disks = (0..ndisks)
            .map(|_| DiskFaultState::new(rate::DEFAULT_FAULT_RATE))
            .collect();
        info!(
            "fault injection ready: {} disks, rate {}, disabled",
            ndisks,
            rate::DEFAULT_FAULT_RATE
        );
        Self {
            enabled: AtomicBool::new(false),
            inner: RwLock::new(Inner {
                rate: rate::DEFAULT_FAULT_RATE,
                disks,
            }),
        }
    }

    /// Number of disks this controller tracks.
    pub fn ndisks(&self) -> usize {
        self.read().disks.len()
    }

    /// Whether the global gate is open.
    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Relaxed)
    }

    /// Open or close the global gate.  Takes effect for all subsequent
    /// injection queries immediately; counters and countdowns are
    /// untouched either way.
    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::Relaxed);
        info!(
            "fault injection {}",
            if enabled { "enabled" } else { "disabled" }
        );
    }

    /// Reconfigure the fault rate from its textual form.
    ///
    /// On success every disk is reinitialized exactly as at construction
    /// but with the new rate.  On any parse or validation failure the
    /// prior rate and all disk states are left unchanged.
    pub fn set_rate_text(&self, text: &str) -> Result<(), InjectError> {
        self.set_rate(rate::parse(text)?)
    }

    /// Reconfigure the fault rate from a numeric value.  Same full-reset
    /// semantics as [`set_rate_text`](Self::set_rate_text).
    pub fn set_rate(&self, new_rate: u64) -> Result<(), InjectError> {
        rate::validate(new_rate)?;
        self.write().reset(new_rate);
        info!("fault rate set to {new_rate}, all disks reseeded");
        Ok(())
    }

    /// Current mean accesses between faults.
    pub fn rate(&self) -> u64 {
        self.read().rate
    }

    /// Current rate rendered as decimal text; round-trips through
    /// [`set_rate_text`](Self::set_rate_text).
    pub fn rate_text(&self) -> String {
        rate::render(self.read().rate)
    }

    /// Record one access to `disk`: bump its access count, tick its
    /// countdown.  Call exactly once per simulated access, before the
    /// injection query.
    pub fn record_access(&self, disk: usize) -> Result<(), InjectError> {
        self.read().disk(disk)?.record_access();
        Ok(())
    }

    /// Decide whether to inject a fault on `disk`.
    ///
    /// Returns `Ok(true)` iff the gate is enabled and the disk's
    /// countdown has run out; firing bumps the disk's fault count and
    /// resamples its countdown from the rate currently in effect.
    /// Otherwise `Ok(false)` with no side effects.
    pub fn should_inject_fault(&self, disk: usize) -> Result<bool, InjectError> {
        let inner = self.read();
        let state = inner.disk(disk)?;
        if !self.enabled.load(Ordering::Relaxed) {
            return Ok(false);
        }
        let fired = state.try_fire(inner.rate);
        if fired {
            debug!("fault fired on disk {disk}");
        }
        Ok(fired)
    }

    /// Accesses recorded for `disk`.  Approximate under concurrency.
    pub fn access_count(&self, disk: usize) -> Result<u64, InjectError> {
        Ok(self.read().disk(disk)?.access_count())
    }

    /// Faults fired on `disk`.  Approximate under concurrency.
    pub fn fault_count(&self, disk: usize) -> Result<u64, InjectError> {
        Ok(self.read().disk(disk)?.fault_count())
    }

    /// Faults fired across all disks.  Approximate under concurrency.
    pub fn total_fault_count(&self) -> u64 {
        self.read().disks.iter().map(DiskFaultState::fault_count).sum()
    }

    /// Snapshot the controller for the status/metrics surface.
    pub fn report(&self) -> InjectorReport {
        let inner = self.read();
        let disks: Vec<DiskReport> = inner
            .disks
            .iter()
            .enumerate()
            .map(|(disk, state)| DiskReport {
                disk,
                access_count: state.access_count(),
                fault_count: state.fault_count(),
            })
            .collect();
        InjectorReport {
            enabled: self.enabled.load(Ordering::Relaxed),
            rate: inner.rate,
            total_faults: disks.iter().map(|d| d.fault_count).sum(),
            disks,
        }
    }

    // ── Internal ────────────────────────────────────────────────

    fn read(&self) -> RwLockReadGuard<'_, Inner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Inner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Point-in-time view of the controller, for reporting.
#[derive(Debug, Clone, Serialize)]
pub struct InjectorReport {
    /// Whether the gate was open when the snapshot was taken.
    pub enabled: bool,
    /// Configured mean accesses between faults.
    pub rate: u64,
    /// Faults fired across all disks.
    pub total_faults: u64,
    /// Per-disk counters.
    pub disks: Vec<DiskReport>,
}

/// One disk's counters within an [`InjectorReport`].
#[derive(Debug, Clone, Serialize)]
pub struct DiskReport {
    /// Disk index.
    pub disk: usize,
    /// Accesses recorded.
    pub access_count: u64,
    /// Faults fired.
    pub fault_count: u64,
}
