//! Environment configuration at the C boundary.
//!
//! Kept in its own test binary: the boundary reads `FUZZYMATCH_*` once per
//! process, so the variables must be set before the first matching call.

use std::ffi::{CStr, CString};
use std::os::raw::c_char;

use fuzzymatch::config::{CUTOFF_ENV, METRIC_ENV};
use fuzzymatch::ffi::{
    fuzzy_best_match, fuzzy_best_match_with_metric, fuzzy_extract_matches,
    fuzzy_release_best_match, fuzzy_release_matches,
};
use fuzzymatch::Metric;

#[test]
fn test_environment_sets_metric_and_default_cutoff() {
    std::env::set_var(METRIC_ENV, "jaro_winkler");
    std::env::set_var(CUTOFF_ENV, "90");

    let query = CString::new("martha").unwrap();
    let owned: Vec<CString> = ["marhta", "xyz"]
        .iter()
        .map(|s| CString::new(*s).unwrap())
        .collect();
    let ptrs: Vec<*const c_char> = owned.iter().map(|s| s.as_ptr()).collect();

    // Jaro-Winkler from the environment
    let best = fuzzy_best_match(query.as_ptr(), ptrs.as_ptr(), ptrs.len(), 0.0);
    assert!(best.found);
    assert!((best.score - 96.111).abs() < 0.01);
    assert_eq!(unsafe { CStr::from_ptr(best.text) }.to_str(), Ok("marhta"));
    fuzzy_release_best_match(best);

    // NaN cutoff picks up FUZZYMATCH_CUTOFF
    let all = fuzzy_extract_matches(query.as_ptr(), ptrs.as_ptr(), ptrs.len(), f64::NAN);
    assert_eq!(all.count, 1);
    let first = unsafe { &*all.matches };
    assert_eq!(first.index, 0);
    fuzzy_release_matches(all);

    // Ratio scores martha/marhta below 90
    let best = fuzzy_best_match_with_metric(
        query.as_ptr(),
        ptrs.as_ptr(),
        ptrs.len(),
        f64::NAN,
        Metric::Ratio.id(),
    );
    assert!(!best.found);
    fuzzy_release_best_match(best);
}
