//! Failure taxonomy for the injection controller.
//!
//! Every error is synchronous, local, and recoverable by the caller
//! retrying with corrected input; nothing here is fatal to the host
//! process.  A failed operation never leaves partial mutations behind.

use thiserror::Error;

/// Errors from the fault injection controller.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InjectError {
    /// Rate text that does not parse as an unsigned decimal integer.
    #[error("invalid fault rate {text:?}: expected an unsigned decimal integer")]
    InvalidRateText {
        /// The rejected input, verbatim.
        text: String,
    },

    /// A zero rate would make the countdown range draws ill-defined.
    #[error("fault rate must be nonzero")]
    ZeroRate,

    /// Rates above [`MAX_FAULT_RATE`](crate::rate::MAX_FAULT_RATE) cannot
    /// be represented by the signed per-disk countdown.
    #[error("fault rate {rate} out of range (max {max})")]
    RateOutOfRange {
        /// The rejected rate.
        rate: u64,
        /// The largest accepted rate.
        max: u64,
    },

    /// Disk index outside `[0, ndisks)`.
    #[error("disk index {disk} out of range ({ndisks} disks)")]
    InvalidDisk {
        /// The rejected index.
        disk: usize,
        /// Number of disks the controller was built with.
        ndisks: usize,
    },
}
