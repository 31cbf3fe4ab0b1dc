//! Matcher - best-match selection and threshold extraction
//!
//! Both operations scan candidates once, in input order, with a single
//! prepared query:
//!
//! - [`Matcher::find_best`] raises its floor as better candidates appear and
//!   keeps the *last* candidate among equal best scores.
//! - [`Matcher::find_all_above`] uses the fixed input cutoff and returns every
//!   candidate reaching it, in scan order (not ranked).
//!
//! In both cases a candidate is accepted only when `score >= cutoff` holds for
//! the score the scorer actually returned.

use crate::config::MatcherConfig;
use crate::scorer::Scorer;

/// A candidate that met the cutoff, borrowed from the input slice
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchResult<'a> {
    /// Position of the candidate in the input sequence
    pub index: usize,
    pub text: &'a str,
    /// Similarity score (0-100)
    pub score: f64,
}

impl MatchResult<'_> {
    pub fn to_extracted(&self) -> ExtractedMatch {
        ExtractedMatch {
            index: self.index,
            text: self.text.to_string(),
            score: self.score,
        }
    }
}

/// Owned copy of a [`MatchResult`]
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedMatch {
    pub index: usize,
    pub text: String,
    pub score: f64,
}

/// Stateless matcher; a single instance can be shared across threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct Matcher {
    config: MatcherConfig,
}

impl Matcher {
    /// Create a matcher with the default configuration (ratio, cutoff 0)
    pub fn new() -> Self {
        Self::with_config(MatcherConfig::default())
    }

    pub fn with_config(config: MatcherConfig) -> Self {
        Self { config }
    }

    /// Find the highest-scoring candidate with `score >= cutoff`.
    ///
    /// `cutoff` defaults to the configured `default_cutoff`. Returns `None` for
    /// an empty candidate slice or when nothing reaches the cutoff. On equal
    /// scores the later candidate wins.
    pub fn find_best<'c, S>(
        &self,
        query: &str,
        candidates: &'c [S],
        cutoff: Option<f64>,
    ) -> Option<MatchResult<'c>>
    where
        S: AsRef<str>,
    {
        let cutoff = cutoff.unwrap_or(self.config.default_cutoff);
        let scorer = self.config.metric.prepare(query);
        let best = find_best_with(&scorer, candidates, cutoff);

        debug!(
            "find_best: metric={} candidates={} cutoff={} found={}",
            self.config.metric,
            candidates.len(),
            cutoff,
            best.is_some()
        );
        best
    }

    /// Collect every candidate with `score >= cutoff`, in input order.
    pub fn find_all_above<'c, S>(
        &self,
        query: &str,
        candidates: &'c [S],
        cutoff: Option<f64>,
    ) -> Vec<MatchResult<'c>>
    where
        S: AsRef<str>,
    {
        let cutoff = cutoff.unwrap_or(self.config.default_cutoff);
        let scorer = self.config.metric.prepare(query);
        let matches = find_all_above_with(&scorer, candidates, cutoff);

        debug!(
            "find_all_above: metric={} candidates={} cutoff={} matched={}",
            self.config.metric,
            candidates.len(),
            cutoff,
            matches.len()
        );
        matches
    }
}

/// Best-match scan over an arbitrary scorer.
///
/// The running best score is passed to the scorer as its floor.
pub fn find_best_with<'c, T, S>(scorer: &T, candidates: &'c [S], cutoff: f64) -> Option<MatchResult<'c>>
where
    T: Scorer + ?Sized,
    S: AsRef<str>,
{
    let mut best_score = cutoff;
    let mut best = None;

    for (index, candidate) in candidates.iter().enumerate() {
        let text = candidate.as_ref();
        let score = scorer.similarity(text, best_score);

        if score >= best_score {
            trace!("new best at index {}: score={}", index, score);
            best_score = score;
            best = Some(MatchResult { index, text, score });
        }
    }

    best
}

/// Threshold scan over an arbitrary scorer; the floor stays at `cutoff`.
pub fn find_all_above_with<'c, T, S>(scorer: &T, candidates: &'c [S], cutoff: f64) -> Vec<MatchResult<'c>>
where
    T: Scorer + ?Sized,
    S: AsRef<str>,
{
    let mut matches = Vec::new();

    for (index, candidate) in candidates.iter().enumerate() {
        let text = candidate.as_ref();
        let score = scorer.similarity(text, cutoff);

        if score >= cutoff {
            trace!("accepted index {}: score={}", index, score);
            matches.push(MatchResult { index, text, score });
        }
    }

    matches
}

/// Best match as `(text, score)`, or `None` when nothing reaches `score_cutoff`.
pub fn extract_one<S>(query: &str, choices: &[S], score_cutoff: f64) -> Option<(String, f64)>
where
    S: AsRef<str>,
{
    Matcher::new()
        .find_best(query, choices, Some(score_cutoff))
        .map(|m| (m.text.to_string(), m.score))
}

/// All matches reaching `score_cutoff`, in input order, as owned values.
pub fn extract<S>(query: &str, choices: &[S], score_cutoff: f64) -> Vec<ExtractedMatch>
where
    S: AsRef<str>,
{
    Matcher::new()
        .find_all_above(query, choices, Some(score_cutoff))
        .iter()
        .map(MatchResult::to_extracted)
        .collect()
}
