#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Returned when a sample array contains no draws.
    #[error("sample array must contain at least one draw")]
    EmptySamples,

    /// Returned when a chain contains no dimensions.
    #[error("chain must contain at least one dimension")]
    EmptyChain,

    /// Returned when a row-major chain has rows of unequal width.
    #[error("row {row} has {got} entries, expected {expected}")]
    RaggedChain {
        /// The width of the first row.
        expected: usize,
        /// The width of the offending row.
        got: usize,
        /// The index of the offending row.
        row: usize,
    },

    /// Returned when an explicit KDE bandwidth is not positive.
    #[error("invalid bandwidth: {0} must be positive")]
    InvalidBandwidth(f64),

    /// Returned when a requested credible level lies outside `(0.0, 1.0]`.
    #[error("invalid credible level: {0} must be in (0.0, 1.0]")]
    InvalidLevel(f64),

    /// Returned when the empirical density has no usable single mode:
    /// flat, multi-modal, or collapsed onto a single point.
    #[error("degenerate density: {0}")]
    DegenerateDensity(&'static str),

    /// Returned when a root-finding bracket contains no sign change.
    ///
    /// During a crossing-point or threshold search this is the signal that
    /// the unimodality assumption does not hold for the sample set.
    #[error("no sign change over [{low}, {high}]; density is flat, multi-modal, or delta-like")]
    NoSignChange {
        /// The lower end of the failed bracket.
        low: f64,
        /// The upper end of the failed bracket.
        high: f64,
    },

    /// Returned when the density's total mass over its evaluation domain
    /// deviates from 1 beyond tolerance. Indicates a construction problem
    /// (domain too narrow, bad estimate) rather than a statistical
    /// degeneracy, but is equally recoverable per dimension.
    #[error("density mass over the evaluation domain is {mass}, expected 1 within {tolerance}")]
    Unnormalized {
        /// The integrated total mass.
        mass: f64,
        /// The absolute tolerance that was exceeded.
        tolerance: f64,
    },

    /// Returned when a requested level exceeds the total density mass.
    /// Cannot occur for levels in `(0, 1)` over a normalized density; the
    /// level is never clamped to make the search succeed.
    #[error("requested level {level} exceeds total density mass {mass}")]
    LevelExceedsMass {
        /// The requested credible level.
        level: f64,
        /// The total mass over the evaluation domain.
        mass: f64,
    },
}

pub type Result<T> = core::result::Result<T, Error>;

impl Error {
    /// Whether this error marks a posterior the method cannot resolve
    /// (flat, multi-modal, delta-like, or badly normalized), as opposed to
    /// a caller error.
    ///
    /// Batch processing skips the affected dimension exactly when this
    /// returns `true`; every other error aborts the batch.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        matches!(
            self,
            Error::DegenerateDensity(_) | Error::NoSignChange { .. } | Error::Unnormalized { .. }
        )
    }
}
