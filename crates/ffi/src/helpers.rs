use crate::error::{with_last_error_mut, DefaultFireRiskError, FireRiskError, FireRiskErrorCode};
use std::ffi::CString;

/// Set the thread-local error message and code.
pub(crate) fn set_last_error(error: &impl FireRiskError) {
    with_last_error_mut(|(cstring, code)| {
        *cstring = CString::new(error.msg()).ok();
        *code = error.code();
    });
}

/// Track an error by setting it in thread-local storage and returning its code.
#[inline]
pub(crate) fn track_error(error: &impl FireRiskError) -> FireRiskErrorCode {
    set_last_error(error);
    error.code()
}

/// Record the error of a failed result, passing successes through.
#[inline]
pub(crate) fn track_result<T, E: FireRiskError>(
    result: Result<T, E>,
) -> Result<T, FireRiskErrorCode> {
    result.map_err(|error| track_error(&error))
}

/// Clear the thread-local error message and code.
/// Called on successful operations.
pub(crate) fn clear_last_error() {
    with_last_error_mut(|(cstring, code)| {
        *cstring = None;
        *code = FireRiskErrorCode::Ok;
    });
}

/// Borrow a caller-owned array.
///
/// A zero length yields an empty slice without touching `ptr`, so callers may
/// pass null for empty arrays.
///
/// # Safety
/// When `len > 0`, `ptr` must point to `len` initialized values that stay
/// valid and unmodified for `'a`.
pub(crate) unsafe fn slice_from_raw<'a, T>(
    ptr: *const T,
    len: usize,
    param_name: &str,
) -> Result<&'a [T], DefaultFireRiskError> {
    if len == 0 {
        return Ok(&[]);
    }
    if ptr.is_null() {
        return Err(DefaultFireRiskError::null_pointer(param_name));
    }
    // SAFETY: non-null and the caller guarantees `len` readable elements.
    Ok(unsafe { std::slice::from_raw_parts(ptr, len) })
}
