use fire_risk_core::svm::{KernelKind, Label, PredictorParts, SvmPredictor};
use std::ptr;

use crate::error::{DefaultFireRiskError, FireRiskErrorCode};
use crate::helpers::{clear_last_error, slice_from_raw, track_error, track_result};

/// Kernel selection for a predictor, mirroring the core kernel family.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KernelSpec {
    /// ⟨x, y⟩
    Linear,
    /// (offset + ⟨x, y⟩)^degree
    Polynomial { degree: i32, offset: f64 },
    /// exp(−‖x − y‖² / (2σ²))
    Gaussian { sigma: f64 },
    /// exp(−γ‖x − y‖²)
    RadialBasis { gamma: f64 },
    /// tanh(κ⟨x, y⟩ + c)
    HyperbolicTangent { kappa: f64, c: f64 },
}

impl From<KernelSpec> for KernelKind {
    fn from(kernel: KernelSpec) -> Self {
        match kernel {
            KernelSpec::Linear => KernelKind::Linear,
            KernelSpec::Polynomial { degree, offset } => KernelKind::Polynomial { degree, offset },
            KernelSpec::Gaussian { sigma } => KernelKind::Gaussian { sigma },
            KernelSpec::RadialBasis { gamma } => KernelKind::RadialBasis { gamma },
            KernelSpec::HyperbolicTangent { kappa, c } => {
                KernelKind::HyperbolicTangent { kappa, c }
            }
        }
    }
}

/// A trained SVM decision function.
///
/// Immutable after creation, so one handle may be shared by any number of
/// threads calling `fire_risk_predictor_predict` concurrently.
pub struct FireRiskPredictor {
    pub(crate) predictor: SvmPredictor<KernelKind>,
}

impl FireRiskPredictor {
    /// Validate raw model arrays and build the predictor.
    ///
    /// # Safety
    /// Array pointers must be valid for the lengths implied by `n_support`
    /// and `n_features` (see `fire_risk_predictor_new`).
    unsafe fn from_raw(
        kernel: KernelSpec,
        bias: f64,
        weights: *const f64,
        support_vectors: *const f64,
        labels: *const i32,
        n_support: usize,
        n_features: usize,
    ) -> Result<Box<Self>, DefaultFireRiskError> {
        let flat_len = n_support.checked_mul(n_features).ok_or_else(|| {
            DefaultFireRiskError::invalid_parameter(format!(
                "Support vector array size overflows: {n_support} × {n_features}"
            ))
        })?;
        if n_support > 0 && n_features == 0 {
            return Err(DefaultFireRiskError::invalid_parameter(
                "n_features must be positive when there are support vectors".to_string(),
            ));
        }

        let weights = unsafe { slice_from_raw(weights, n_support, "weights") }?;
        let flat = unsafe { slice_from_raw(support_vectors, flat_len, "support_vectors") }?;
        let raw_labels = unsafe { slice_from_raw(labels, n_support, "labels") }?;

        let support_vector_labels = raw_labels
            .iter()
            .map(|&value| Label::try_from(f64::from(value)))
            .collect::<Result<Vec<_>, _>>()?;

        let parts = PredictorParts {
            kernel: kernel.into(),
            bias,
            weights: weights.to_vec(),
            support_vectors: flat
                .chunks(n_features.max(1))
                .map(<[f64]>::to_vec)
                .collect(),
            support_vector_labels,
        };

        Ok(Box::new(Self {
            predictor: SvmPredictor::from_parts(parts)?,
        }))
    }
}

/// Create a predictor from trained model parts and return it via out-parameter.
///
/// Parameters
/// - `kernel`: Kernel the model was trained with.
/// - `bias`: Bias term.
/// - `weights`: `n_support` Lagrange multipliers.
/// - `support_vectors`: `n_support × n_features` values, row-major.
/// - `labels`: `n_support` class labels, each -1 or +1.
/// - `out_handle`: Receives the predictor; set to null on failure.
///
/// Arrays may be null when `n_support` is 0; such a model classifies by the
/// sign of `bias` alone. All arrays are copied, so the caller may free them
/// after this call.
///
/// Returns
/// - `FireRiskErrorCode::Ok` (0): success
/// - `FireRiskErrorCode::NullPointer`: a required pointer is null
/// - `FireRiskErrorCode::InvalidParameter`: zero `n_features` or size overflow
/// - `FireRiskErrorCode::InvalidModel`: a label other than -1 or +1
///
/// # Safety
/// - `out_handle` must be a valid, non-null pointer to writable memory.
/// - Each array pointer must be valid for reads of its stated length.
/// - The caller owns the returned handle and MUST call
///   `fire_risk_predictor_destroy` exactly once.
#[no_mangle]
#[expect(
    clippy::too_many_arguments,
    reason = "Flat C signature, one argument per model array"
)]
pub unsafe extern "C" fn fire_risk_predictor_new(
    kernel: KernelSpec,
    bias: f64,
    weights: *const f64,
    support_vectors: *const f64,
    labels: *const i32,
    n_support: usize,
    n_features: usize,
    out_handle: *mut *mut FireRiskPredictor,
) -> FireRiskErrorCode {
    if out_handle.is_null() {
        return track_error(&DefaultFireRiskError::null_pointer("out_handle"));
    }

    let result = unsafe {
        FireRiskPredictor::from_raw(
            kernel,
            bias,
            weights,
            support_vectors,
            labels,
            n_support,
            n_features,
        )
    };

    match track_result(result) {
        Ok(handle) => {
            unsafe {
                *out_handle = Box::into_raw(handle);
            }
            clear_last_error();
            FireRiskErrorCode::Ok
        }
        Err(code) => {
            unsafe {
                *out_handle = ptr::null_mut();
            }
            code
        }
    }
}

/// Classify one feature vector.
///
/// Writes -1 or +1 to `out_label`. A decision value of exactly zero is +1.
///
/// Returns
/// - `FireRiskErrorCode::Ok` (0): success
/// - `FireRiskErrorCode::NullPointer`: `handle` or `out_label` is null, or `x`
///   is null with a non-zero `n_features`
/// - `FireRiskErrorCode::DimensionMismatch`: `n_features` differs from the model's
///
/// # Safety
/// - `handle` must come from `fire_risk_predictor_new` and not be destroyed.
/// - `x` must be valid for reads of `n_features` values; it may be null when
///   `n_features` is 0.
/// - `out_label` must point to writable memory.
#[no_mangle]
pub unsafe extern "C" fn fire_risk_predictor_predict(
    handle: *const FireRiskPredictor,
    x: *const f64,
    n_features: usize,
    out_label: *mut i32,
) -> FireRiskErrorCode {
    if handle.is_null() {
        return track_error(&DefaultFireRiskError::null_pointer("handle"));
    }
    if out_label.is_null() {
        return track_error(&DefaultFireRiskError::null_pointer("out_label"));
    }

    // SAFETY: non-null, created by `fire_risk_predictor_new`.
    let predictor = unsafe { &(*handle).predictor };

    if let Some(expected) = predictor.n_features() {
        if expected != n_features {
            return track_error(&DefaultFireRiskError::dimension_mismatch(expected, n_features));
        }
    }

    // SAFETY: caller guarantees x is valid for n_features reads.
    let features = match track_result(unsafe { slice_from_raw(x, n_features, "x") }) {
        Ok(features) => features,
        Err(code) => return code,
    };
    let label = predictor.predict(features);

    unsafe {
        *out_label = i32::from(label);
    }
    clear_last_error();
    FireRiskErrorCode::Ok
}

/// Destroys a predictor previously created by `fire_risk_predictor_new`.
///
/// Null is a no-op.
///
/// # Safety
/// - The pointer MUST have been created by `fire_risk_predictor_new`.
/// - The pointer MUST NOT be used again after this call.
#[no_mangle]
pub unsafe extern "C" fn fire_risk_predictor_destroy(handle: *mut FireRiskPredictor) {
    if handle.is_null() {
        return;
    }

    // SAFETY: created by `Box::into_raw` in `fire_risk_predictor_new`.
    unsafe {
        drop(Box::from_raw(handle));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::fire_risk_get_last_error_code;

    /// Two support vectors on the x axis: decision value = x₀
    unsafe fn two_point(out: *mut *mut FireRiskPredictor) -> FireRiskErrorCode {
        let weights = [0.5, 0.5];
        let support_vectors = [1.0, 0.0, -1.0, 0.0];
        let labels = [1, -1];
        unsafe {
            fire_risk_predictor_new(
                KernelSpec::Linear,
                0.0,
                weights.as_ptr(),
                support_vectors.as_ptr(),
                labels.as_ptr(),
                2,
                2,
                out,
            )
        }
    }

    #[test]
    fn test_predict_through_handle() {
        let mut handle: *mut FireRiskPredictor = ptr::null_mut();
        assert_eq!(unsafe { two_point(&mut handle) }, FireRiskErrorCode::Ok);
        assert!(!handle.is_null());

        let mut label = 0;
        let code =
            unsafe { fire_risk_predictor_predict(handle, [2.0, 7.0].as_ptr(), 2, &mut label) };
        assert_eq!(code, FireRiskErrorCode::Ok);
        assert_eq!(label, 1);

        let code =
            unsafe { fire_risk_predictor_predict(handle, [-0.5, 7.0].as_ptr(), 2, &mut label) };
        assert_eq!(code, FireRiskErrorCode::Ok);
        assert_eq!(label, -1);

        // Zero decision value
        let code =
            unsafe { fire_risk_predictor_predict(handle, [0.0, 1.0].as_ptr(), 2, &mut label) };
        assert_eq!(code, FireRiskErrorCode::Ok);
        assert_eq!(label, 1);

        unsafe { fire_risk_predictor_destroy(handle) };
    }

    #[test]
    fn test_predict_dimension_mismatch() {
        let mut handle: *mut FireRiskPredictor = ptr::null_mut();
        assert_eq!(unsafe { two_point(&mut handle) }, FireRiskErrorCode::Ok);

        let mut label = 0;
        let code =
            unsafe { fire_risk_predictor_predict(handle, [1.0, 2.0, 3.0].as_ptr(), 3, &mut label) };
        assert_eq!(code, FireRiskErrorCode::DimensionMismatch);
        assert_eq!(label, 0);

        unsafe { fire_risk_predictor_destroy(handle) };
    }

    #[test]
    fn test_new_rejects_bad_label() {
        let weights = [0.5, 0.5];
        let support_vectors = [1.0, -1.0];
        let labels = [1, 0];
        let mut handle: *mut FireRiskPredictor = ptr::null_mut();
        let code = unsafe {
            fire_risk_predictor_new(
                KernelSpec::Gaussian { sigma: 1.0 },
                0.0,
                weights.as_ptr(),
                support_vectors.as_ptr(),
                labels.as_ptr(),
                2,
                1,
                &mut handle,
            )
        };
        assert_eq!(code, FireRiskErrorCode::InvalidModel);
        assert_eq!(
            fire_risk_get_last_error_code(),
            FireRiskErrorCode::InvalidModel
        );
        assert!(handle.is_null());
    }

    #[test]
    fn test_new_null_arrays() {
        let mut handle: *mut FireRiskPredictor = ptr::null_mut();
        let code = unsafe {
            fire_risk_predictor_new(
                KernelSpec::Linear,
                0.0,
                ptr::null(),
                ptr::null(),
                ptr::null(),
                1,
                2,
                &mut handle,
            )
        };
        assert_eq!(code, FireRiskErrorCode::NullPointer);

        let code = unsafe { two_point(ptr::null_mut()) };
        assert_eq!(code, FireRiskErrorCode::NullPointer);
    }

    #[test]
    fn test_empty_model_uses_bias() {
        let mut handle: *mut FireRiskPredictor = ptr::null_mut();
        let code = unsafe {
            fire_risk_predictor_new(
                KernelSpec::RadialBasis { gamma: 0.5 },
                -0.25,
                ptr::null(),
                ptr::null(),
                ptr::null(),
                0,
                0,
                &mut handle,
            )
        };
        assert_eq!(code, FireRiskErrorCode::Ok);

        let mut label = 0;
        let code = unsafe { fire_risk_predictor_predict(handle, [3.0].as_ptr(), 1, &mut label) };
        assert_eq!(code, FireRiskErrorCode::Ok);
        assert_eq!(label, -1);

        unsafe { fire_risk_predictor_destroy(handle) };
    }

    #[test]
    fn test_empty_model_accepts_null_features() {
        let mut handle: *mut FireRiskPredictor = ptr::null_mut();
        let code = unsafe {
            fire_risk_predictor_new(
                KernelSpec::Linear,
                0.5,
                ptr::null(),
                ptr::null(),
                ptr::null(),
                0,
                0,
                &mut handle,
            )
        };
        assert_eq!(code, FireRiskErrorCode::Ok);

        let mut label = 0;
        let code = unsafe { fire_risk_predictor_predict(handle, ptr::null(), 0, &mut label) };
        assert_eq!(code, FireRiskErrorCode::Ok);
        assert_eq!(label, 1);
        assert_eq!(fire_risk_get_last_error_code(), FireRiskErrorCode::Ok);

        let code = unsafe { fire_risk_predictor_predict(handle, ptr::null(), 2, &mut label) };
        assert_eq!(code, FireRiskErrorCode::NullPointer);

        unsafe { fire_risk_predictor_destroy(handle) };
    }

    #[test]
    fn test_kernel_conversion() {
        assert_eq!(
            KernelKind::from(KernelSpec::Polynomial {
                degree: 3,
                offset: 1.0
            }),
            KernelKind::polynomial(3)
        );
        assert_eq!(
            KernelKind::from(KernelSpec::HyperbolicTangent {
                kappa: 0.5,
                c: -1.0
            }),
            KernelKind::HyperbolicTangent {
                kappa: 0.5,
                c: -1.0
            }
        );
    }
}
