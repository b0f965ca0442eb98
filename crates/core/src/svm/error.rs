use std::fmt;

/// Errors that can occur while training an SVM
#[derive(Debug, Clone, PartialEq)]
pub enum TrainError {
    /// No training samples were supplied
    EmptyTrainingSet,
    /// Sample and label counts differ
    LengthMismatch {
        /// Number of feature vectors
        samples: usize,
        /// Number of labels (or multipliers)
        labels: usize,
    },
    /// A feature vector's dimension differs from the first sample's
    InconsistentDimensions {
        /// Index of the offending sample
        index: usize,
        /// Dimension of sample 0
        expected: usize,
        /// Dimension of the offending sample
        found: usize,
    },
    /// Every label is the same class; the equality constraint forces all multipliers to zero
    SingleClass,
    /// Regularization constant must be finite and positive
    InvalidRegularization {
        /// The rejected value of C
        c: f64,
    },
    /// No multiplier exceeded the support-vector threshold
    NoSupportVectors,
    /// The QP solver hit its iteration budget before the KKT gap closed
    SolverDidNotConverge {
        /// Iterations performed
        iterations: usize,
        /// Remaining maximal KKT violation
        kkt_gap: f64,
    },
}

impl fmt::Display for TrainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrainError::EmptyTrainingSet => write!(f, "Training set is empty"),
            TrainError::LengthMismatch { samples, labels } => {
                write!(f, "Got {samples} samples but {labels} labels")
            }
            TrainError::InconsistentDimensions {
                index,
                expected,
                found,
            } => write!(
                f,
                "Sample {index} has {found} features, expected {expected}"
            ),
            TrainError::SingleClass => write!(f, "Training labels contain a single class"),
            TrainError::InvalidRegularization { c } => write!(
                f,
                "Regularization constant must be finite and positive, got {c}"
            ),
            TrainError::NoSupportVectors => write!(f, "No support vectors above threshold"),
            TrainError::SolverDidNotConverge {
                iterations,
                kkt_gap,
            } => write!(
                f,
                "QP solver did not converge after {iterations} iterations (KKT gap {kkt_gap:e})"
            ),
        }
    }
}

impl std::error::Error for TrainError {}

/// Errors from assembling a predictor or label from external data
#[derive(Debug, Clone, PartialEq)]
pub enum ModelError {
    /// Weights, support vectors and labels must have equal length
    LengthMismatch {
        /// Number of multipliers
        weights: usize,
        /// Number of support vectors
        support_vectors: usize,
        /// Number of support vector labels
        labels: usize,
    },
    /// A support vector's dimension differs from the first one's
    DimensionMismatch {
        /// Index of the offending support vector
        index: usize,
        /// Dimension of support vector 0
        expected: usize,
        /// Dimension of the offending vector
        found: usize,
    },
    /// A class label other than -1 or +1
    InvalidLabel {
        /// The rejected value
        value: f64,
    },
}

impl fmt::Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelError::LengthMismatch {
                weights,
                support_vectors,
                labels,
            } => write!(
                f,
                "Length mismatch: {weights} weights, {support_vectors} support vectors, {labels} labels"
            ),
            ModelError::DimensionMismatch {
                index,
                expected,
                found,
            } => write!(
                f,
                "Support vector {index} has {found} features, expected {expected}"
            ),
            ModelError::InvalidLabel { value } => {
                write!(f, "Class label must be -1 or +1, got {value}")
            }
        }
    }
}

impl std::error::Error for ModelError {}
