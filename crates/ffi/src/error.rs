use fire_risk_core::{FwiError, ModelError};
use std::cell::RefCell;
use std::ffi::CString;
use std::os::raw::c_char;
use std::ptr;

/// Common interface for FFI error types.
///
/// - `code()` - Returns the error code to be passed across FFI boundary
/// - `msg()` - Returns the error message for diagnostic purposes
pub(crate) trait FireRiskError {
    /// Returns the error code to be returned across the FFI boundary.
    fn code(&self) -> FireRiskErrorCode;

    /// Returns the human-readable error message.
    fn msg(&self) -> &str;
}

/// Default implementation of `FireRiskError` for FFI error scenarios.
///
/// Wraps a `FireRiskErrorCode` with a message. Core library errors convert
/// into this via `From`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DefaultFireRiskError {
    code: FireRiskErrorCode,
    msg: String,
}

impl DefaultFireRiskError {
    /// Create error for null pointer passed where non-null required.
    ///
    /// # Arguments
    /// * `param_name` - The name of the parameter that was null (e.g., `"out_handle"`, `"x"`)
    pub fn null_pointer(param_name: &str) -> Self {
        Self {
            code: FireRiskErrorCode::NullPointer,
            msg: format!("Parameter '{param_name}' cannot be null"),
        }
    }

    /// Create error for invalid parameter.
    ///
    /// # Arguments
    /// * `message` - Description of the error
    pub fn invalid_parameter(message: String) -> Self {
        Self {
            code: FireRiskErrorCode::InvalidParameter,
            msg: message,
        }
    }

    /// Create error for a feature vector whose length does not match the model.
    pub fn dimension_mismatch(expected: usize, found: usize) -> Self {
        Self {
            code: FireRiskErrorCode::DimensionMismatch,
            msg: format!("Predictor expects {expected} features, got {found}"),
        }
    }
}

impl FireRiskError for DefaultFireRiskError {
    fn code(&self) -> FireRiskErrorCode {
        self.code
    }

    fn msg(&self) -> &str {
        &self.msg
    }
}

impl From<FwiError> for DefaultFireRiskError {
    fn from(error: FwiError) -> Self {
        let code = match error {
            FwiError::InvalidLatitude { .. } => FireRiskErrorCode::InvalidLatitude,
            FwiError::InvalidMonth { .. } => FireRiskErrorCode::InvalidMonth,
        };
        Self {
            code,
            msg: error.to_string(),
        }
    }
}

impl From<ModelError> for DefaultFireRiskError {
    fn from(error: ModelError) -> Self {
        Self {
            code: FireRiskErrorCode::InvalidModel,
            msg: error.to_string(),
        }
    }
}

/// FFI error codes returned by fire risk functions.
/// Follows standard C convention: 0 = success, non-zero = error.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FireRiskErrorCode {
    /// Operation completed successfully.
    Ok = 0,

    /// Invalid pointer: null pointer passed where non-null required.
    NullPointer = 1,

    /// Invalid parameter passed to function.
    InvalidParameter = 2,

    /// Latitude is outside [-90, 90] or not a number.
    InvalidLatitude = 3,

    /// Month is not in 1..=12.
    InvalidMonth = 4,

    /// Model parts are inconsistent (array lengths, ragged vectors, labels other than ±1).
    InvalidModel = 5,

    /// Feature vector length does not match the predictor.
    DimensionMismatch = 6,
}

thread_local! {
    /// Most recent FFI error on this thread (C string, error code).
    /// The CString is owned here so the pointer handed out stays valid.
    static LAST_ERROR: RefCell<(Option<CString>, FireRiskErrorCode)> =
        const { RefCell::new((None, FireRiskErrorCode::Ok)) };
}

/// Internal helper to read `LAST_ERROR` thread-local storage (cstring, code).
pub(crate) fn with_last_error<F, R>(f: F) -> R
where
    F: FnOnce(&(Option<CString>, FireRiskErrorCode)) -> R,
{
    LAST_ERROR.with_borrow(f)
}

/// Internal helper to mutate `LAST_ERROR` thread-local storage (cstring, code).
pub(crate) fn with_last_error_mut<F, R>(f: F) -> R
where
    F: FnOnce(&mut (Option<CString>, FireRiskErrorCode)) -> R,
{
    LAST_ERROR.with_borrow_mut(f)
}

/// Retrieve the most recent FFI error message as a null-terminated C string.
///
/// Returns:
/// - A borrowed pointer to the error message if the last call on this thread failed.
/// - `null` if the last call succeeded or no call has been made.
///
/// # Lifetime
/// The returned pointer is valid until the next FFI call on this thread.
///
/// **DO NOT FREE THIS POINTER** - it is managed internally.
///
/// Example:
/// ```cpp
/// FwiOutput out;
/// FireRiskErrorCode err = fire_risk_calculate(&input, &out);
/// if (err != FireRiskErrorCode::Ok) {
///     const char* error = fire_risk_get_last_error();
///     if (error) {
///         printf("FWI calculation failed: %s\n", error);
///     }
/// }
/// ```
#[no_mangle]
pub extern "C" fn fire_risk_get_last_error() -> *const c_char {
    with_last_error(|(cstring, _code)| cstring.as_ref().map_or(ptr::null(), |cs| cs.as_ptr()))
}

/// Retrieve the most recent FFI error code.
///
/// Returns `FireRiskErrorCode::Ok` (0) if the last call on this thread
/// succeeded, otherwise the code it returned.
#[no_mangle]
pub extern "C" fn fire_risk_get_last_error_code() -> FireRiskErrorCode {
    with_last_error(|(_cstring, code)| *code)
}
