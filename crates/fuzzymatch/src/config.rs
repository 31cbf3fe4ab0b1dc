//! Matcher configuration
//!
//! Environment variables read by [`MatcherConfig::from_env`]:
//! - `FUZZYMATCH_METRIC`: `ratio` (default), `levenshtein` or `jaro_winkler`
//! - `FUZZYMATCH_CUTOFF`: default score cutoff, 0-100 (default: 0)
//! - `RUST_LOG`: logging level, see [`crate::init_logger`]

use crate::scorer::{Metric, MAX_SCORE, MIN_SCORE};

/// Environment variable selecting the default metric
pub const METRIC_ENV: &str = "FUZZYMATCH_METRIC";
/// Environment variable selecting the default cutoff
pub const CUTOFF_ENV: &str = "FUZZYMATCH_CUTOFF";

/// Configuration for [`crate::Matcher`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatcherConfig {
    /// Similarity metric used for every comparison
    pub metric: Metric,
    /// Cutoff applied when a call does not pass one (0-100)
    pub default_cutoff: f64,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            metric: Metric::Ratio,
            default_cutoff: MIN_SCORE,
        }
    }
}

impl MatcherConfig {
    pub fn with_metric(mut self, metric: Metric) -> Self {
        self.metric = metric;
        self
    }

    pub fn with_default_cutoff(mut self, cutoff: f64) -> Self {
        self.default_cutoff = cutoff;
        self
    }

    /// Build a configuration from `FUZZYMATCH_*` environment variables.
    ///
    /// Unset variables keep their defaults; invalid values are logged and ignored.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(METRIC_ENV) {
            match raw.parse::<Metric>() {
                Ok(metric) => config.metric = metric,
                Err(e) => warn!("ignoring {}: {}", METRIC_ENV, e),
            }
        }

        if let Some(raw) = lookup(CUTOFF_ENV) {
            match raw.trim().parse::<f64>() {
                Ok(cutoff) if (MIN_SCORE..=MAX_SCORE).contains(&cutoff) => {
                    config.default_cutoff = cutoff
                }
                _ => warn!(
                    "ignoring {}={:?}: expected a number between {} and {}",
                    CUTOFF_ENV, raw, MIN_SCORE, MAX_SCORE
                ),
            }
        }

        debug!(
            "matcher config: metric={} default_cutoff={}",
            config.metric, config.default_cutoff
        );
        config
    }
}
