//! Common FFI utilities for fuzzymatch C-compatible interfaces.
//!
//! Shared helpers for moving strings and arrays across the C ABI without
//! copying more than necessary.
//!
//! # Memory Ownership
//!
//! - Pointers handed to the caller via [`vec_into_raw`] are owned by the caller
//!   until they come back through [`vec_from_raw`]
//! - Borrowed input (`*const c_char`, `*const *const c_char`) is never freed here
//! - NULL pointers with zero length are treated as empty input

use std::ffi::CStr;
use std::os::raw::c_char;
use std::ptr;
use std::slice;

use thiserror::Error;

/// Errors detected while reading caller-owned input at the C boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FfiError {
    /// A required pointer argument was null
    #[error("null {0} pointer")]
    NullPointer(&'static str),

    /// An element of a string array was null
    #[error("null string at index {index}")]
    NullElement { index: usize },

    /// A string was not valid UTF-8 (`index` is `None` for scalar arguments)
    #[error("invalid UTF-8{}", location(.index))]
    InvalidUtf8 { index: Option<usize> },

    /// An array exceeded the configured maximum length
    #[error("array of {len} elements exceeds maximum of {max}")]
    TooLarge { len: usize, max: usize },

    /// An output string contained an interior NUL byte
    #[error("string contains interior NUL byte at position {position}")]
    InteriorNul { position: usize },
}

fn location(index: &Option<usize>) -> String {
    match index {
        Some(i) => format!(" at index {}", i),
        None => String::new(),
    }
}

/// Hand a vector to the caller as a raw pointer and length.
///
/// Returns null pointer and 0 length for empty vectors. Otherwise the
/// allocation is exactly `len` elements and is owned by the caller until it
/// is passed back to [`vec_from_raw`].
#[inline]
pub fn vec_into_raw<T>(vec: Vec<T>) -> (*mut T, usize) {
    let len = vec.len();
    if len == 0 {
        (ptr::null_mut(), 0)
    } else {
        (Box::into_raw(vec.into_boxed_slice()) as *mut T, len)
    }
}

/// Reclaim a vector previously released with [`vec_into_raw`].
///
/// Null pointer or zero length yields an empty vector.
///
/// # Safety
/// The pointer must have come from [`vec_into_raw`] with the same `len`, and
/// must not be reclaimed twice.
#[inline]
pub unsafe fn vec_from_raw<T>(ptr: *mut T, len: usize) -> Vec<T> {
    if ptr.is_null() || len == 0 {
        return Vec::new();
    }
    unsafe { Box::from_raw(ptr::slice_from_raw_parts_mut(ptr, len)) }.into_vec()
}

/// Borrow a C string as `&str`.
///
/// # Safety
/// The pointer must be null or point to a NUL-terminated string that stays
/// alive and unmodified for `'a`.
pub unsafe fn cstr_to_str<'a>(ptr: *const c_char) -> Result<&'a str, FfiError> {
    if ptr.is_null() {
        return Err(FfiError::NullPointer("string"));
    }
    unsafe { CStr::from_ptr(ptr) }
        .to_str()
        .map_err(|_| FfiError::InvalidUtf8 { index: None })
}

/// Borrow a C string array as a `Vec<&str>` without copying the strings.
///
/// A null array is accepted only when `len` is zero.
///
/// # Safety
/// - `arr` must point to `len` string pointers, or be null when `len` is 0
/// - Each string pointer must satisfy the contract of [`cstr_to_str`] for `'a`
pub unsafe fn borrow_string_array<'a>(
    arr: *const *const c_char,
    len: usize,
    max_len: usize,
) -> Result<Vec<&'a str>, FfiError> {
    if len == 0 {
        return Ok(Vec::new());
    }
    if arr.is_null() {
        return Err(FfiError::NullPointer("string array"));
    }
    if len > max_len {
        return Err(FfiError::TooLarge { len, max: max_len });
    }

    let slice = unsafe { slice::from_raw_parts(arr, len) };
    let mut result = Vec::with_capacity(len);

    for (i, &ptr) in slice.iter().enumerate() {
        if ptr.is_null() {
            return Err(FfiError::NullElement { index: i });
        }
        match unsafe { CStr::from_ptr(ptr) }.to_str() {
            Ok(s) => result.push(s),
            Err(_) => return Err(FfiError::InvalidUtf8 { index: Some(i) }),
        }
    }

    Ok(result)
}

/// Generate a version function that returns a static C string.
///
/// # Example
/// ```ignore
/// fuzzymatch_ffi_common::define_version_fn!(my_lib_version);
/// // Expands to:
/// // #[no_mangle]
/// // pub extern "C" fn my_lib_version() -> *const c_char {
/// //     concat!(env!("CARGO_PKG_VERSION"), "\0").as_ptr() as *const c_char
/// // }
/// ```
#[macro_export]
macro_rules! define_version_fn {
    ($fn_name:ident) => {
        #[no_mangle]
        pub extern "C" fn $fn_name() -> *const std::os::raw::c_char {
            concat!(env!("CARGO_PKG_VERSION"), "\0").as_ptr() as *const std::os::raw::c_char
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::CString;

    #[test]
    fn test_vec_into_raw_empty() {
        let (ptr, len): (*mut i32, usize) = vec_into_raw(Vec::new());
        assert!(ptr.is_null());
        assert_eq!(len, 0);
    }

    #[test]
    fn test_vec_round_trip_through_raw() {
        let (ptr, len) = vec_into_raw(vec![1i32, 2, 3]);
        assert!(!ptr.is_null());
        assert_eq!(len, 3);
        let back = unsafe { vec_from_raw(ptr, len) };
        assert_eq!(back, vec![1, 2, 3]);
    }

    #[test]
    fn test_vec_from_raw_null_is_empty() {
        let v: Vec<u8> = unsafe { vec_from_raw(ptr::null_mut(), 0) };
        assert!(v.is_empty());
    }

    #[test]
    fn test_borrow_string_array_empty() {
        let result = unsafe { borrow_string_array(ptr::null(), 0, 10) };
        assert_eq!(result, Ok(Vec::new()));
    }

    #[test]
    fn test_borrow_string_array_valid() {
        let strings = [
            CString::new("hello").unwrap(),
            CString::new("world").unwrap(),
        ];
        let ptrs: Vec<*const c_char> = strings.iter().map(|s| s.as_ptr()).collect();

        let result = unsafe { borrow_string_array(ptrs.as_ptr(), ptrs.len(), 10) };
        assert_eq!(result.unwrap(), vec!["hello", "world"]);
    }

    #[test]
    fn test_borrow_string_array_null_array_with_len() {
        let result = unsafe { borrow_string_array(ptr::null(), 3, 10) };
        assert_eq!(result, Err(FfiError::NullPointer("string array")));
    }

    #[test]
    fn test_borrow_string_array_null_element() {
        let first = CString::new("ok").unwrap();
        let ptrs = [first.as_ptr(), ptr::null()];
        let result = unsafe { borrow_string_array(ptrs.as_ptr(), ptrs.len(), 10) };
        assert_eq!(result, Err(FfiError::NullElement { index: 1 }));
    }

    #[test]
    fn test_borrow_string_array_invalid_utf8() {
        let bad = CString::new(vec![0xffu8, 0xfe]).unwrap();
        let good = CString::new("fine").unwrap();
        let ptrs = [good.as_ptr(), bad.as_ptr()];
        let result = unsafe { borrow_string_array(ptrs.as_ptr(), ptrs.len(), 10) };
        assert_eq!(result, Err(FfiError::InvalidUtf8 { index: Some(1) }));
    }

    #[test]
    fn test_borrow_string_array_too_large() {
        let s = CString::new("x").unwrap();
        let ptrs = vec![s.as_ptr(); 4];
        let result = unsafe { borrow_string_array(ptrs.as_ptr(), ptrs.len(), 3) };
        assert_eq!(result, Err(FfiError::TooLarge { len: 4, max: 3 }));
    }

    #[test]
    fn test_cstr_to_str_null() {
        let result = unsafe { cstr_to_str(ptr::null()) };
        assert_eq!(result, Err(FfiError::NullPointer("string")));
    }

    #[test]
    fn test_cstr_to_str_valid() {
        let s = CString::new("test").unwrap();
        let result = unsafe { cstr_to_str(s.as_ptr()) };
        assert_eq!(result, Ok("test"));
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            FfiError::InvalidUtf8 { index: Some(2) }.to_string(),
            "invalid UTF-8 at index 2"
        );
        assert_eq!(FfiError::InvalidUtf8 { index: None }.to_string(), "invalid UTF-8");
        assert_eq!(FfiError::NullPointer("query").to_string(), "null query pointer");
    }
}
