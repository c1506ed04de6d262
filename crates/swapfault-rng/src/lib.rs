//! Deterministic pseudo-random generators for the swapfault engine.
//!
//! This crate provides the two Mersenne Twister variants the injection
//! engine is built on:
//!
//! 1. **[`Mt64`]** — MT19937-64, the word source for per-disk fault
//!    scheduling
//! 2. **[`Mt32`]** — MT19937, used by the memory fill/verify harness for
//!    platform-independent test patterns
//!
//! Both are seeded explicitly from a single scalar and produce the exact
//! reference sequences of the published algorithm: same seed, same words,
//! forever, on every platform. That bit-for-bit reproducibility is what
//! makes injected fault patterns replayable, so neither generator may be
//! swapped for a different algorithm.
//!
//! The generators implement [`rand_core::RngCore`] and so compose with the
//! wider `rand` ecosystem, but the canonical construction path is the
//! inherent `new(seed)` on each type.

pub mod mt32;
pub mod mt64;

pub use mt32::Mt32;
pub use mt64::Mt64;
