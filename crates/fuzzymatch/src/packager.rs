//! Result packaging for the C boundary
//!
//! Matcher output is first copied into owning values ([`OwnedBestMatch`],
//! [`OwnedMatches`]) built from `CString`s, so a failure part-way through
//! packaging drops everything already allocated. Only a fully built owner is
//! turned into raw `#[repr(C)]` structs with `into_raw`; [`release_best_match`]
//! and [`release_matches`] free what `into_raw` handed out.

use std::ffi::{CStr, CString};

use fuzzymatch_ffi_common::{vec_from_raw, vec_into_raw, FfiError};

use crate::ffi::{BestMatchC, MatchArrayC, MatchC};
use crate::matcher::MatchResult;

fn to_cstring(text: &str) -> Result<CString, FfiError> {
    CString::new(text).map_err(|e| FfiError::InteriorNul {
        position: e.nul_position(),
    })
}

/// Owned best-match result, convertible to [`BestMatchC`]
#[derive(Debug, Default)]
pub struct OwnedBestMatch {
    text: Option<CString>,
    score: f64,
}

impl OwnedBestMatch {
    /// The `found = false` result: no text, zero score
    pub fn not_found() -> Self {
        Self::default()
    }

    pub fn from_match(best: Option<MatchResult<'_>>) -> Result<Self, FfiError> {
        match best {
            Some(m) => Ok(Self {
                text: Some(to_cstring(m.text)?),
                score: m.score,
            }),
            None => Ok(Self::not_found()),
        }
    }

    pub fn found(&self) -> bool {
        self.text.is_some()
    }

    pub fn text(&self) -> Option<&CStr> {
        self.text.as_deref()
    }

    pub fn score(&self) -> f64 {
        self.score
    }

    /// Transfer ownership to the caller.
    pub fn into_raw(self) -> BestMatchC {
        match self.text {
            Some(text) => BestMatchC {
                found: true,
                text: text.into_raw(),
                score: self.score,
            },
            None => BestMatchC::default(),
        }
    }

    /// Take ownership back from the caller.
    ///
    /// # Safety
    /// `raw` must have been produced by [`OwnedBestMatch::into_raw`] and not
    /// reclaimed before.
    pub unsafe fn from_raw(raw: BestMatchC) -> Self {
        if raw.text.is_null() {
            return Self::not_found();
        }
        Self {
            text: Some(unsafe { CString::from_raw(raw.text) }),
            score: raw.score,
        }
    }
}

#[derive(Debug)]
struct OwnedMatch {
    index: usize,
    text: CString,
    score: f64,
}

/// Owned result set, convertible to [`MatchArrayC`]
#[derive(Debug, Default)]
pub struct OwnedMatches {
    entries: Vec<OwnedMatch>,
}

impl OwnedMatches {
    pub fn from_results(results: &[MatchResult<'_>]) -> Result<Self, FfiError> {
        let entries = results
            .iter()
            .map(|m| {
                Ok(OwnedMatch {
                    index: m.index,
                    text: to_cstring(m.text)?,
                    score: m.score,
                })
            })
            .collect::<Result<Vec<_>, FfiError>>()?;
        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate `(index, text, score)` in scan order
    pub fn iter(&self) -> impl Iterator<Item = (usize, &CStr, f64)> + '_ {
        self.entries
            .iter()
            .map(|m| (m.index, m.text.as_c_str(), m.score))
    }

    /// Transfer ownership to the caller as one block of exactly `count` elements.
    pub fn into_raw(self) -> MatchArrayC {
        let raw: Vec<MatchC> = self
            .entries
            .into_iter()
            .map(|m| MatchC {
                index: m.index,
                text: m.text.into_raw(),
                score: m.score,
            })
            .collect();

        let (matches, count) = vec_into_raw(raw);
        MatchArrayC { matches, count }
    }
}

/// Release a best-match result handed out by [`OwnedBestMatch::into_raw`].
///
/// # Safety
/// `raw` must come from [`OwnedBestMatch::into_raw`] and must not be released
/// twice.
pub unsafe fn release_best_match(raw: BestMatchC) {
    drop(unsafe { OwnedBestMatch::from_raw(raw) });
}

/// Release a result set handed out by [`OwnedMatches::into_raw`].
///
/// Every element's text is freed before the element block itself.
///
/// # Safety
/// `raw` must come from [`OwnedMatches::into_raw`] and must not be released
/// twice.
pub unsafe fn release_matches(raw: MatchArrayC) {
    let block = unsafe { vec_from_raw(raw.matches, raw.count) };
    for m in &block {
        if !m.text.is_null() {
            drop(unsafe { CString::from_raw(m.text) });
        }
    }
    drop(block);
}
