//! Similarity scorers
//!
//! A [`Metric`] is turned into a [`PreparedQuery`] once per call; the prepared
//! form is then compared against every candidate. All metrics report scores
//! in the range [`MIN_SCORE`]..=[`MAX_SCORE`] (0-100).
//!
//! The `floor` passed to [`Scorer::similarity`] is a pruning hint only. A
//! scorer may return an imprecisely low score (usually `0.0`) for candidates
//! below it, but never reports a score at or above the floor that is not real.

use std::fmt;
use std::str::FromStr;

use rapidfuzz::distance::indel;
use strsim::{jaro_winkler, normalized_levenshtein};

use crate::error::MetricError;

/// Lowest score any metric reports
pub const MIN_SCORE: f64 = 0.0;
/// Highest score any metric reports (identical strings)
pub const MAX_SCORE: f64 = 100.0;

// Slack (in normalized 0-1 units) subtracted from the floor before it is
// handed to rapidfuzz, so a candidate scoring exactly the floor is never pruned
// by rounding in the 0-100 <-> 0-1 conversion.
const CUTOFF_SLACK: f64 = 1e-9;

/// A query-bound similarity function.
pub trait Scorer {
    /// Score `candidate` against the prepared query.
    fn similarity(&self, candidate: &str, floor: f64) -> f64;
}

impl<F> Scorer for F
where
    F: Fn(&str, f64) -> f64,
{
    fn similarity(&self, candidate: &str, floor: f64) -> f64 {
        self(candidate, floor)
    }
}

/// Similarity metric used for one matching call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Metric {
    /// Normalized Indel similarity (rapidfuzz `ratio`)
    #[default]
    Ratio,
    /// Normalized Levenshtein similarity
    Levenshtein,
    /// Jaro-Winkler similarity
    JaroWinkler,
}

impl Metric {
    /// Stable name used in configuration
    pub fn name(self) -> &'static str {
        match self {
            Metric::Ratio => "ratio",
            Metric::Levenshtein => "levenshtein",
            Metric::JaroWinkler => "jaro_winkler",
        }
    }

    /// Numeric id used at the C boundary
    pub fn id(self) -> i32 {
        match self {
            Metric::Ratio => 0,
            Metric::Levenshtein => 1,
            Metric::JaroWinkler => 2,
        }
    }

    /// Build the per-call prepared form of `query` for this metric.
    pub fn prepare(self, query: &str) -> PreparedQuery<'_> {
        match self {
            Metric::Ratio => PreparedQuery::Ratio {
                comparator: indel::BatchComparator::new(query.chars()),
                query_empty: query.is_empty(),
            },
            Metric::Levenshtein => PreparedQuery::Levenshtein(query),
            Metric::JaroWinkler => PreparedQuery::JaroWinkler(query),
        }
    }
}

impl TryFrom<i32> for Metric {
    type Error = MetricError;

    fn try_from(id: i32) -> Result<Self, Self::Error> {
        match id {
            0 => Ok(Metric::Ratio),
            1 => Ok(Metric::Levenshtein),
            2 => Ok(Metric::JaroWinkler),
            other => Err(MetricError::UnknownId(other)),
        }
    }
}

impl FromStr for Metric {
    type Err = MetricError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ratio" | "indel" => Ok(Metric::Ratio),
            "levenshtein" => Ok(Metric::Levenshtein),
            "jaro_winkler" | "jaro-winkler" => Ok(Metric::JaroWinkler),
            _ => Err(MetricError::UnknownName(s.to_string())),
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Query preprocessed once and reused for every candidate of a call.
///
/// Immutable after construction, so independent calls on other threads never
/// observe each other's state.
pub enum PreparedQuery<'q> {
    Ratio {
        comparator: indel::BatchComparator<char>,
        query_empty: bool,
    },
    Levenshtein(&'q str),
    JaroWinkler(&'q str),
}

impl PreparedQuery<'_> {
    fn query_is_empty(&self) -> bool {
        match self {
            PreparedQuery::Ratio { query_empty, .. } => *query_empty,
            PreparedQuery::Levenshtein(q) | PreparedQuery::JaroWinkler(q) => q.is_empty(),
        }
    }
}

impl Scorer for PreparedQuery<'_> {
    fn similarity(&self, candidate: &str, floor: f64) -> f64 {
        if candidate.is_empty() && self.query_is_empty() {
            return MAX_SCORE;
        }

        let score = match self {
            PreparedQuery::Ratio { comparator, .. } => {
                let floor = if floor.is_nan() { MIN_SCORE } else { floor };
                let hint = (floor / MAX_SCORE - CUTOFF_SLACK).clamp(0.0, 1.0);
                comparator
                    .normalized_similarity_with_args(
                        candidate.chars(),
                        &indel::Args::default().score_cutoff(hint),
                    )
                    .map_or(MIN_SCORE, |s| s * MAX_SCORE)
            }
            PreparedQuery::Levenshtein(query) => normalized_levenshtein(query, candidate) * MAX_SCORE,
            PreparedQuery::JaroWinkler(query) => jaro_winkler(query, candidate) * MAX_SCORE,
        };

        score.clamp(MIN_SCORE, MAX_SCORE)
    }
}
