//! Kernel support vector machine
//!
//! Training solves the soft-margin dual QP for one Lagrange multiplier per
//! sample, keeps the samples whose multiplier is non-negligible, and averages
//! the bias over them. Prediction is the sign of the kernel expansion over the
//! retained support vectors.
//!
//! The trainer and predictor are generic over [`Kernel`]; any
//! `Fn(&[f64], &[f64]) -> f64` closure works, and [`KernelKind`] provides the
//! standard serializable family.

mod error;
mod kernel;
mod predictor;
mod smo;
mod trainer;

pub use error::{ModelError, TrainError};
pub use kernel::{dot, squared_distance, Kernel, KernelKind};
pub use predictor::{PredictorParts, SvmPredictor};
pub use trainer::{SvmTrainer, TrainerConfig, MIN_SUPPORT_VECTOR_MULTIPLIER};

use serde::{Deserialize, Serialize};

/// Binary class label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Label {
    /// Class -1
    Negative,
    /// Class +1
    Positive,
}

impl Label {
    /// Numeric value, -1.0 or +1.0
    #[inline]
    pub fn value(self) -> f64 {
        match self {
            Label::Negative => -1.0,
            Label::Positive => 1.0,
        }
    }

    /// Sign of a decision value. Zero (either sign) and NaN map to `Positive`.
    #[inline]
    pub fn from_decision(value: f64) -> Self {
        if value < 0.0 {
            Label::Negative
        } else {
            Label::Positive
        }
    }
}

impl From<Label> for f64 {
    fn from(label: Label) -> f64 {
        label.value()
    }
}

impl From<Label> for i32 {
    fn from(label: Label) -> i32 {
        match label {
            Label::Negative => -1,
            Label::Positive => 1,
        }
    }
}

impl TryFrom<f64> for Label {
    type Error = ModelError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if value == 1.0 {
            Ok(Label::Positive)
        } else if value == -1.0 {
            Ok(Label::Negative)
        } else {
            Err(ModelError::InvalidLabel { value })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_values() {
        assert_eq!(Label::Positive.value(), 1.0);
        assert_eq!(f64::from(Label::Negative), -1.0);
        assert_eq!(i32::from(Label::Negative), -1);
    }

    #[test]
    fn test_label_from_decision() {
        assert_eq!(Label::from_decision(-1e-300), Label::Negative);
        assert_eq!(Label::from_decision(0.0), Label::Positive);
        assert_eq!(Label::from_decision(-0.0), Label::Positive);
        assert_eq!(Label::from_decision(3.2), Label::Positive);
    }

    #[test]
    fn test_label_try_from() {
        assert_eq!(Label::try_from(1.0), Ok(Label::Positive));
        assert_eq!(Label::try_from(-1.0), Ok(Label::Negative));
        assert_eq!(
            Label::try_from(0.0),
            Err(ModelError::InvalidLabel { value: 0.0 })
        );
    }
}
