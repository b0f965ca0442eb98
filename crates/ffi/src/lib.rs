//! C ABI for the fire risk core
//!
//! Exposes the FWI System and trained SVM predictors to non-Rust callers.
//! Every fallible function returns a [`FireRiskErrorCode`]; details of the
//! last failure on the calling thread are available from
//! [`fire_risk_get_last_error`]. The C header `FireRiskFFI.h` is generated at
//! build time.

mod error;
mod fwi;
mod helpers;
mod predictor;

pub use error::{fire_risk_get_last_error, fire_risk_get_last_error_code, FireRiskErrorCode};
pub use fwi::{fire_risk_calculate, FwiInput, FwiOutput};
pub use predictor::{
    fire_risk_predictor_destroy, fire_risk_predictor_new, fire_risk_predictor_predict,
    FireRiskPredictor, KernelSpec,
};
