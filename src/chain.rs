//! Batch interval computation across the dimensions of a chain.

use core::fmt::Write as _;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::level::credible_intervals;
use crate::posterior::Posterior;

/// Why a dimension was skipped instead of resolved.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SkipReason {
    /// Mode search or crossing-point root-finding failed: the empirical
    /// density is flat, multi-modal, or collapses to a near-delta.
    Degenerate,
    /// The density's total mass over its evaluation domain deviates from 1.
    /// Control flow treats this like a degeneracy, but it points at a
    /// construction problem, so the offending mass is kept for diagnostics.
    Unnormalized {
        /// The integrated total mass that failed the check.
        mass: f64,
    },
}

/// The resolved record for one dimension.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DimensionSummary {
    /// Sample mean of the dimension's draws.
    pub mean: f64,
    /// Location of the estimated density's maximum.
    pub mode: f64,
    /// Population standard deviation of the draws.
    pub std_dev: f64,
    /// All level boundaries merged into one ascending sequence, two per
    /// requested level (nested levels interleave).
    pub bounds: Vec<f64>,
}

/// Outcome of processing one dimension: a full record, or a skip marker for
/// a posterior this method cannot resolve.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DimensionOutcome {
    /// The dimension resolved to a full interval record.
    Resolved(DimensionSummary),
    /// The dimension was skipped; other dimensions are unaffected.
    Skipped(SkipReason),
}

impl DimensionOutcome {
    /// The resolved record, if any.
    #[must_use]
    pub fn summary(&self) -> Option<&DimensionSummary> {
        match self {
            DimensionOutcome::Resolved(summary) => Some(summary),
            DimensionOutcome::Skipped(_) => None,
        }
    }

    /// Whether the dimension was skipped.
    #[must_use]
    pub fn is_skipped(&self) -> bool {
        matches!(self, DimensionOutcome::Skipped(_))
    }

    /// The skip reason, if the dimension was skipped.
    #[must_use]
    pub fn skip_reason(&self) -> Option<SkipReason> {
        match self {
            DimensionOutcome::Resolved(_) => None,
            DimensionOutcome::Skipped(reason) => Some(*reason),
        }
    }
}

/// Per-dimension highest-density intervals for a whole chain.
///
/// Dimensions are processed independently and in order; a degenerate
/// dimension is recorded as [`DimensionOutcome::Skipped`] without aborting
/// the rest of the batch. Caller errors (empty input, invalid levels) abort
/// the whole call instead.
///
/// # Examples
///
/// ```
/// use credible::ChainSummary;
///
/// // A chain with a single degenerate dimension: every draw identical.
/// let chain = ChainSummary::from_columns(&[vec![1.0; 100]], &[0.95, 0.68]).unwrap();
///
/// assert!(chain.dimensions()[0].is_skipped());
/// let record = &chain.records()[0];
/// assert!(record.mean.is_nan() && record.mode.is_nan() && record.std_dev.is_nan());
/// assert!(record.bounds.iter().all(|b| b.is_nan()));
/// ```
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[allow(clippy::module_name_repetitions)]
pub struct ChainSummary {
    /// Requested levels, sorted descending (widest first).
    levels: Vec<f64>,
    /// One outcome per dimension, in original dimension order.
    dimensions: Vec<DimensionOutcome>,
}

impl ChainSummary {
    /// Computes intervals for a dimension-major chain: one draw array per
    /// dimension.
    ///
    /// # Errors
    ///
    /// - [`Error::EmptyChain`] when `columns` is empty.
    /// - [`Error::EmptySamples`] when any dimension has no draws.
    /// - [`Error::InvalidLevel`] for a level outside `(0.0, 1.0]`.
    /// - [`Error::LevelExceedsMass`] propagated unswallowed: it marks a
    ///   caller error, not a degenerate posterior.
    pub fn from_columns<S: AsRef<[f64]>>(columns: &[S], levels: &[f64]) -> Result<Self> {
        if columns.is_empty() {
            return Err(Error::EmptyChain);
        }
        for &level in levels {
            if !(level > 0.0 && level <= 1.0) {
                return Err(Error::InvalidLevel(level));
            }
        }

        let mut sorted_levels = levels.to_vec();
        sorted_levels.sort_by(|a, b| b.total_cmp(a));

        let mut dimensions = Vec::with_capacity(columns.len());
        for column in columns {
            let outcome = summarize_dimension(column.as_ref(), &sorted_levels)?;
            trace_info!(
                dim = dimensions.len(),
                skipped = outcome.is_skipped(),
                "dimension processed"
            );
            dimensions.push(outcome);
        }

        Ok(Self {
            levels: sorted_levels,
            dimensions,
        })
    }

    /// Computes intervals for a row-major chain: one row per draw, one
    /// column per dimension (the usual on-disk orientation).
    ///
    /// # Errors
    ///
    /// As [`ChainSummary::from_columns`], plus [`Error::RaggedChain`] when
    /// rows differ in width.
    pub fn from_draws<S: AsRef<[f64]>>(draws: &[S], levels: &[f64]) -> Result<Self> {
        let Some(first) = draws.first() else {
            return Err(Error::EmptyChain);
        };
        let width = first.as_ref().len();
        if width == 0 {
            return Err(Error::EmptyChain);
        }

        let mut columns = vec![Vec::with_capacity(draws.len()); width];
        for (row, draw) in draws.iter().enumerate() {
            let draw = draw.as_ref();
            if draw.len() != width {
                return Err(Error::RaggedChain {
                    expected: width,
                    got: draw.len(),
                    row,
                });
            }
            for (column, &value) in columns.iter_mut().zip(draw) {
                column.push(value);
            }
        }
        Self::from_columns(&columns, levels)
    }

    /// Requested levels, sorted descending.
    #[must_use]
    pub fn levels(&self) -> &[f64] {
        &self.levels
    }

    /// Per-dimension outcomes in original dimension order.
    #[must_use]
    pub fn dimensions(&self) -> &[DimensionOutcome] {
        &self.dimensions
    }

    /// The `(lower, upper)` pair for one level of one dimension, recovered
    /// from the sorted boundary list. `None` for an unknown dimension or
    /// level, or for a skipped dimension.
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn interval(&self, dim: usize, level: f64) -> Option<(f64, f64)> {
        let summary = self.dimensions.get(dim)?.summary()?;
        let rank = self.levels.iter().position(|&l| l == level)?;
        let n = self.levels.len();
        let lower = summary.bounds.get(rank).copied()?;
        let upper = summary.bounds.get(2 * n - 1 - rank).copied()?;
        Some((lower, upper))
    }

    /// Materializes one record per dimension, with NaN sentinels standing in
    /// for every field of a skipped dimension.
    #[must_use]
    pub fn records(&self) -> Vec<DimensionSummary> {
        self.dimensions
            .iter()
            .map(|outcome| match outcome {
                DimensionOutcome::Resolved(summary) => summary.clone(),
                DimensionOutcome::Skipped(_) => DimensionSummary {
                    mean: f64::NAN,
                    mode: f64::NAN,
                    std_dev: f64::NAN,
                    bounds: vec![f64::NAN; 2 * self.levels.len()],
                },
            })
            .collect()
    }

    /// Signed-percentage column labels: the negative tail in descending
    /// level order, then the positive tail ascending, matching the sorted
    /// boundary sequence (e.g. `-95.00%, -68.00%, 68.00%, 95.00%`).
    #[must_use]
    pub fn level_labels(&self) -> Vec<String> {
        let mut labels = Vec::with_capacity(2 * self.levels.len());
        for &level in &self.levels {
            labels.push(format!("{:.2}%", -100.0 * level));
        }
        for &level in self.levels.iter().rev() {
            labels.push(format!("{:.2}%", 100.0 * level));
        }
        labels
    }

    /// Renders the batch as a tab-delimited table.
    ///
    /// Header row `Dim  Mean  Mode  StdDev` plus one signed-percentage
    /// column per level and tail; skipped dimensions render an explicit
    /// marker instead of numbers. Pure formatting over the computed records.
    #[must_use]
    pub fn to_table(&self) -> String {
        let mut out = String::from("Dim\tMean\tMode\tStdDev");
        for label in self.level_labels() {
            let _ = write!(out, "\t{label}");
        }
        out.push('\n');
        out.push_str("===============================================================\n");

        for (dim, outcome) in self.dimensions.iter().enumerate() {
            match outcome {
                DimensionOutcome::Resolved(summary) => {
                    let _ = write!(
                        out,
                        "{dim:2}\t{:6.3}\t{:6.3}\t{:6.3}",
                        summary.mean, summary.mode, summary.std_dev
                    );
                    for &bound in &summary.bounds {
                        let _ = write!(out, "\t{bound:6.3}");
                    }
                }
                DimensionOutcome::Skipped(_) => {
                    let _ = write!(out, "{dim:2}\t\tskipped (multi-modal, flat, or delta?)");
                }
            }
            out.push('\n');
        }
        out
    }
}

/// Resolves one dimension, converting degeneracy-class failures into a
/// tagged skip and letting caller errors propagate.
fn summarize_dimension(samples: &[f64], levels: &[f64]) -> Result<DimensionOutcome> {
    let resolved = Posterior::from_samples(samples).and_then(|posterior| {
        credible_intervals(&posterior, levels).map(|bounds| (posterior, bounds))
    });
    match resolved {
        Ok((posterior, bounds)) => Ok(DimensionOutcome::Resolved(DimensionSummary {
            mean: posterior.mean(),
            mode: posterior.mode(),
            std_dev: posterior.std_dev(),
            bounds,
        })),
        Err(Error::Unnormalized { mass, .. }) => {
            Ok(DimensionOutcome::Skipped(SkipReason::Unnormalized { mass }))
        }
        Err(err) if err.is_degenerate() => Ok(DimensionOutcome::Skipped(SkipReason::Degenerate)),
        Err(err) => Err(err),
    }
}
