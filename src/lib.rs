#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![deny(unreachable_pub)]
#![deny(clippy::correctness)]
#![deny(clippy::suspicious)]
#![deny(clippy::style)]
#![deny(clippy::complexity)]
#![deny(clippy::perf)]
#![deny(clippy::pedantic)]
#![deny(clippy::std_instead_of_core)]

//! Highest-density credible intervals for sampled posterior distributions.
//!
//! Given the draws of an MCMC chain, this crate estimates each marginal's
//! density with a Gaussian KDE, locates the mode, and finds the horizontal
//! density cut enclosing exactly the requested probability mass for each
//! credible level (e.g. 68%, 95%) — the highest-density interval, found by
//! nested root-finding over the cut threshold and its two crossing points.
//!
//! # Getting Started
//!
//! ```
//! use credible::prelude::*;
//!
//! // A deterministic, roughly normal draw set (sum of 12 uniforms).
//! let mut state = 0x2545_f491_4f6c_dd1d_u64;
//! let mut uniform = move || {
//!     state = state
//!         .wrapping_mul(6_364_136_223_846_793_005)
//!         .wrapping_add(1_442_695_040_888_963_407);
//!     (state >> 11) as f64 / (1u64 << 53) as f64
//! };
//! let draws: Vec<f64> = (0..2000)
//!     .map(|_| (0..12).map(|_| uniform()).sum::<f64>() - 6.0)
//!     .collect();
//!
//! let chain = ChainSummary::from_columns(&[draws], &[0.95, 0.68])?;
//! let (lo68, hi68) = chain.interval(0, 0.68).unwrap();
//! let (lo95, hi95) = chain.interval(0, 0.95).unwrap();
//! assert!(lo95 <= lo68 && lo68 < hi68 && hi68 <= hi95);
//! # Ok::<(), credible::Error>(())
//! ```
//!
//! # Core Concepts
//!
//! | Type | Role |
//! |------|------|
//! | [`Posterior`] | Density model for one dimension: KDE, sample moments, mode, finite evaluation domain. |
//! | [`credible_interval`] / [`credible_intervals`] | Level search: the density threshold enclosing a target probability mass. |
//! | [`RegionMass`] / [`enclosed_mass`] | One threshold's region: crossing points either side of the mode and the mass between them. |
//! | [`ChainSummary`] | Batch driver across dimensions, isolating per-dimension failures. |
//! | [`DimensionOutcome`] | Tagged per-dimension result: resolved record or skip with reason. |
//!
//! # Degenerate posteriors
//!
//! The method assumes a single global mode. Sample sets that are flat,
//! multi-modal, or collapse onto a point are an expected category of input:
//! per-dimension processing reports them as [`DimensionOutcome::Skipped`]
//! with a [`SkipReason`] and moves on, while caller errors (empty input,
//! out-of-range levels) abort the whole batch.
//!
//! # Feature Flags
//!
//! | Flag | What it enables | Default |
//! |------|----------------|---------|
//! | `serde` | `Serialize`/`Deserialize` on the result types | off |
//! | `tracing` | Structured log events via [`tracing`](https://docs.rs/tracing) at key search points | off |

/// Emit a `tracing::info!` event when the `tracing` feature is enabled.
/// No-op otherwise.
#[cfg(feature = "tracing")]
macro_rules! trace_info {
    ($($arg:tt)*) => { tracing::info!($($arg)*) };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_info {
    ($($arg:tt)*) => {};
}

/// Emit a `tracing::debug!` event when the `tracing` feature is enabled.
/// No-op otherwise.
#[cfg(feature = "tracing")]
macro_rules! trace_debug {
    ($($arg:tt)*) => { tracing::debug!($($arg)*) };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_debug {
    ($($arg:tt)*) => {};
}

mod chain;
mod error;
mod kde;
mod level;
mod numeric;
mod posterior;
mod region;

pub use chain::{ChainSummary, DimensionOutcome, DimensionSummary, SkipReason};
pub use error::{Error, Result};
pub use level::{credible_interval, credible_intervals};
pub use posterior::Posterior;
pub use region::{enclosed_mass, RegionMass};

/// Convenient wildcard import for the most common types.
///
/// ```
/// use credible::prelude::*;
/// ```
pub mod prelude {
    pub use crate::chain::{ChainSummary, DimensionOutcome, DimensionSummary, SkipReason};
    pub use crate::error::{Error, Result};
    pub use crate::level::{credible_interval, credible_intervals};
    pub use crate::posterior::Posterior;
    pub use crate::region::{enclosed_mass, RegionMass};
}
