//! C-compatible FFI interface for the matcher
//!
//! Exposes best-match and threshold extraction through a C ABI for Go (CGO).
//!
//! # Memory Ownership Rules
//!
//! - Input strings and arrays stay owned by the caller and are only borrowed
//!   for the duration of the call
//! - Every `BestMatchC` must be passed to `fuzzy_release_best_match()` exactly once
//! - Every `MatchArrayC` must be passed to `fuzzy_release_matches()` exactly once
//! - Releasing twice, or releasing a struct not produced here, is undefined behavior
//!
//! # Input Contract
//!
//! Null pointers, null array elements, invalid UTF-8 and oversized arrays are
//! detected, logged at error level, and produce an empty result (`found = false`
//! or `count = 0`). Dangling or non-NUL-terminated pointers are undefined behavior.
//!
//! # Configuration
//!
//! `FUZZYMATCH_METRIC` and `FUZZYMATCH_CUTOFF` are read once, on the first
//! matching call (see [`MatcherConfig::from_env`]). The configured metric is
//! used by the entry points without a `metric` argument; a NaN `cutoff`
//! selects the configured default cutoff.
//!
//! # Thread Safety
//!
//! Entry points hold no mutable state. Independent calls may run concurrently
//! from any number of threads as long as each owns its inputs and results.

use std::os::raw::c_char;
use std::ptr;
use std::sync::OnceLock;

use fuzzymatch_ffi_common::{borrow_string_array, cstr_to_str, FfiError};

use crate::config::MatcherConfig;
use crate::matcher::Matcher;
use crate::packager::{self, OwnedBestMatch, OwnedMatches};
use crate::scorer::Metric;

// Safety limits
const MAX_CANDIDATES: usize = 1_000_000;

static BASE_CONFIG: OnceLock<MatcherConfig> = OnceLock::new();

/// C-compatible best-match result.
///
/// When `found` is false, `text` is null and `score` is 0.
#[repr(C)]
pub struct BestMatchC {
    pub found: bool,
    /// Owned NUL-terminated copy of the winning candidate
    pub text: *mut c_char,
    pub score: f64,
}

/// C-compatible element of a match array
#[repr(C)]
pub struct MatchC {
    /// Position of the candidate in the input array
    pub index: usize,
    /// Owned NUL-terminated copy of the candidate
    pub text: *mut c_char,
    pub score: f64,
}

/// C-compatible match array (null `matches` when `count` is 0)
#[repr(C)]
pub struct MatchArrayC {
    pub matches: *mut MatchC,
    pub count: usize,
}

impl Default for BestMatchC {
    fn default() -> Self {
        Self {
            found: false,
            text: ptr::null_mut(),
            score: 0.0,
        }
    }
}

impl Default for MatchArrayC {
    fn default() -> Self {
        Self {
            matches: ptr::null_mut(),
            count: 0,
        }
    }
}

// ============================================================================
// Lifecycle
// ============================================================================

#[no_mangle]
pub extern "C" fn fuzzy_init_logger() {
    crate::init_logger();
}

fuzzymatch_ffi_common::define_version_fn!(fuzzy_version);

// ============================================================================
// Matching
// ============================================================================

/// Best match using the configured metric. See [`fuzzy_best_match_with_metric`].
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn fuzzy_best_match(
    query: *const c_char,
    candidates: *const *const c_char,
    candidates_len: usize,
    cutoff: f64,
) -> BestMatchC {
    let config = base_config();
    match unsafe { best_match_inner(query, candidates, candidates_len, cutoff, config) } {
        Ok(owned) => owned.into_raw(),
        Err(e) => {
            error!("fuzzy_best_match: {}", e);
            BestMatchC::default()
        }
    }
}

/// Best match among `candidates` with `score >= cutoff`; ties go to the later
/// candidate. `metric` is a [`Metric`] id; unknown ids fall back to ratio.
/// Release with [`fuzzy_release_best_match`].
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn fuzzy_best_match_with_metric(
    query: *const c_char,
    candidates: *const *const c_char,
    candidates_len: usize,
    cutoff: f64,
    metric: i32,
) -> BestMatchC {
    let config = config_with_metric(metric);
    match unsafe { best_match_inner(query, candidates, candidates_len, cutoff, config) } {
        Ok(owned) => owned.into_raw(),
        Err(e) => {
            error!("fuzzy_best_match: {}", e);
            BestMatchC::default()
        }
    }
}

/// All matches using the configured metric. See [`fuzzy_extract_matches_with_metric`].
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn fuzzy_extract_matches(
    query: *const c_char,
    candidates: *const *const c_char,
    candidates_len: usize,
    cutoff: f64,
) -> MatchArrayC {
    let config = base_config();
    match unsafe { extract_matches_inner(query, candidates, candidates_len, cutoff, config) } {
        Ok(owned) => owned.into_raw(),
        Err(e) => {
            error!("fuzzy_extract_matches: {}", e);
            MatchArrayC::default()
        }
    }
}

/// Every candidate with `score >= cutoff`, in input order, tagged with its
/// input index. Release with [`fuzzy_release_matches`].
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn fuzzy_extract_matches_with_metric(
    query: *const c_char,
    candidates: *const *const c_char,
    candidates_len: usize,
    cutoff: f64,
    metric: i32,
) -> MatchArrayC {
    let config = config_with_metric(metric);
    match unsafe { extract_matches_inner(query, candidates, candidates_len, cutoff, config) } {
        Ok(owned) => owned.into_raw(),
        Err(e) => {
            error!("fuzzy_extract_matches: {}", e);
            MatchArrayC::default()
        }
    }
}

// ============================================================================
// Release
// ============================================================================

#[no_mangle]
pub extern "C" fn fuzzy_release_best_match(result: BestMatchC) {
    unsafe { packager::release_best_match(result) };
}

#[no_mangle]
pub extern "C" fn fuzzy_release_matches(result: MatchArrayC) {
    unsafe { packager::release_matches(result) };
}

// ============================================================================
// Helpers
// ============================================================================

unsafe fn best_match_inner(
    query: *const c_char,
    candidates: *const *const c_char,
    candidates_len: usize,
    cutoff: f64,
    config: MatcherConfig,
) -> Result<OwnedBestMatch, FfiError> {
    let query = unsafe { query_str(query) }?;
    let candidates = unsafe { borrow_string_array(candidates, candidates_len, MAX_CANDIDATES) }?;

    let best = Matcher::with_config(config).find_best(query, &candidates, call_cutoff(cutoff));
    OwnedBestMatch::from_match(best)
}

unsafe fn extract_matches_inner(
    query: *const c_char,
    candidates: *const *const c_char,
    candidates_len: usize,
    cutoff: f64,
    config: MatcherConfig,
) -> Result<OwnedMatches, FfiError> {
    let query = unsafe { query_str(query) }?;
    let candidates = unsafe { borrow_string_array(candidates, candidates_len, MAX_CANDIDATES) }?;

    let matches =
        Matcher::with_config(config).find_all_above(query, &candidates, call_cutoff(cutoff));
    OwnedMatches::from_results(&matches)
}

unsafe fn query_str<'a>(query: *const c_char) -> Result<&'a str, FfiError> {
    unsafe { cstr_to_str(query) }.map_err(|e| match e {
        FfiError::NullPointer(_) => FfiError::NullPointer("query"),
        other => other,
    })
}

fn base_config() -> MatcherConfig {
    *BASE_CONFIG.get_or_init(MatcherConfig::from_env)
}

fn config_with_metric(metric: i32) -> MatcherConfig {
    let metric = Metric::try_from(metric).unwrap_or_else(|e| {
        warn!("{}, falling back to {}", e, Metric::Ratio);
        Metric::Ratio
    });
    base_config().with_metric(metric)
}

// NaN selects the configured default cutoff
fn call_cutoff(cutoff: f64) -> Option<f64> {
    (!cutoff.is_nan()).then_some(cutoff)
}
