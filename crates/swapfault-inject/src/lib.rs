//! Per-disk statistical fault injection for the swapfault harness.
//!
//! This crate provides the decision engine that tells a simulated storage
//! I/O path *when* to pretend a disk access failed:
//!
//! 1. **[`injector`]** — [`FaultInjector`], the caller-owned controller:
//!    enable gate, global fault rate, per-disk accounting, and the
//!    hot-path inject-or-not decision
//! 2. **[`rate`]** — parsing and rendering of the textual fault-rate
//!    configuration boundary
//! 3. **[`error`]** — the typed failure taxonomy
//!
//! # Architecture
//!
//! ```text
//! I/O path (caller)        FaultInjector           per-disk state
//! ─────────────────        ─────────────           ──────────────
//! on access to disk d ──→ record_access(d)    ──→ access_count++, countdown--
//!                     ──→ should_inject(d)    ──→ countdown <= 0?
//!                          │ false: proceed        fire: fault_count++,
//!                          │ true:  simulate             resample countdown
//!                          ▼        failure            from private MT19937-64
//! control surface     ──→ set_rate_text / rate_text / total_fault_count
//! ```
//!
//! The engine never performs I/O and never decides *how* a fault is
//! handled; on a `true` decision the caller simulates the failure mode on
//! its own path.  Inter-fault spacing per disk is drawn uniformly from
//! `[1, 2*rate]`, so the mean spacing converges to `rate + 0.5` accesses
//! and identical seeds reproduce identical fault patterns bit for bit.

pub mod error;
pub mod injector;
pub mod rate;

mod disk;

pub use error::InjectError;
pub use injector::{DiskReport, FaultInjector, InjectorReport};
pub use rate::{DEFAULT_FAULT_RATE, MAX_FAULT_RATE};
