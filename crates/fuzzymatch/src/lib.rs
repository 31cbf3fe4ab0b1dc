//! fuzzymatch - fuzzy string matching library (CGO)
//!
//! Finds the best match for a query among candidate strings, or every
//! candidate at or above a similarity cutoff, with scores on a 0-100 scale.
//!
//! This library is designed to be used from Go via CGO. Results crossing the
//! C boundary are caller-owned and must be released with the paired free
//! function.
//!
//! ## Usage from Go via CGO
//!
//! ```go
//! best := C.fuzzy_best_match(cQuery, &cCandidates[0], C.size_t(len(candidates)), 0)
//! defer C.fuzzy_release_best_match(best)
//!
//! all := C.fuzzy_extract_matches(cQuery, &cCandidates[0], C.size_t(len(candidates)), 60)
//! defer C.fuzzy_release_matches(all)
//! ```
//!
//! ## Usage from Rust
//!
//! ```rust
//! use fuzzymatch::Matcher;
//!
//! let candidates = ["nite", "nit", "flight", "night"];
//! let best = Matcher::new().find_best("night", &candidates, None).unwrap();
//! assert_eq!(best.text, "night");
//! assert_eq!(best.index, 3);
//! ```

// Import logging macros
#[macro_use]
extern crate log;

pub mod batch;
pub mod config;
pub mod error;
pub mod matcher;
pub mod packager;
pub mod scorer;

// FFI module for C/CGO integration
pub mod ffi;

/// Initialize the logger for the matching library.
/// This should be called once at startup, typically from FFI.
///
/// The log level can be controlled via the RUST_LOG environment variable:
/// - RUST_LOG=fuzzymatch=debug
/// - RUST_LOG=fuzzymatch=trace
pub fn init_logger() {
    use std::sync::Once;
    static INIT: Once = Once::new();

    INIT.call_once(|| {
        if env_logger::try_init().is_ok() {
            info!("fuzzymatch library initialized");
        }
    });
}

// Re-export main types
pub use config::MatcherConfig;
pub use error::{FfiError, MetricError};
pub use matcher::{extract, extract_one, ExtractedMatch, MatchResult, Matcher};
pub use packager::{OwnedBestMatch, OwnedMatches};
pub use scorer::{Metric, PreparedQuery, Scorer, MAX_SCORE, MIN_SCORE};

// Re-export FFI types for C consumers
pub use ffi::{BestMatchC, MatchArrayC, MatchC};
