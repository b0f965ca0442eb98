use super::error::ModelError;
use super::kernel::Kernel;
use super::Label;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Trained kernel SVM decision function
///
/// Immutable once constructed: holds the bias and the pruned
/// (multiplier, support vector, label) triples, with no reference back to the
/// training set. Safe to share between threads when the kernel is.
#[derive(Debug, Clone)]
pub struct SvmPredictor<K> {
    kernel: K,
    bias: f64,
    weights: Vec<f64>,
    support_vectors: Vec<Vec<f64>>,
    support_vector_labels: Vec<Label>,
}

/// Plain-data form of a predictor, for handing to and from a model store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictorParts<K> {
    /// Kernel used by the decision function
    pub kernel: K,
    /// Bias term
    pub bias: f64,
    /// Lagrange multiplier of each support vector
    pub weights: Vec<f64>,
    /// Retained training samples
    pub support_vectors: Vec<Vec<f64>>,
    /// Class of each support vector
    pub support_vector_labels: Vec<Label>,
}

impl<K: Kernel> SvmPredictor<K> {
    /// Create a predictor from its parts
    ///
    /// # Panics
    /// When `weights`, `support_vectors` and `support_vector_labels` differ in
    /// length. Use [`from_parts`](SvmPredictor::from_parts) for untrusted input.
    #[track_caller]
    pub fn new(
        kernel: K,
        bias: f64,
        weights: Vec<f64>,
        support_vectors: Vec<Vec<f64>>,
        support_vector_labels: Vec<Label>,
    ) -> Self {
        assert_eq!(
            support_vectors.len(),
            support_vector_labels.len(),
            "SvmPredictor::new: support vector/label count mismatch"
        );
        assert_eq!(
            weights.len(),
            support_vector_labels.len(),
            "SvmPredictor::new: weight/label count mismatch"
        );

        debug!(
            "SVM predictor: bias={}, {} support vectors",
            bias,
            weights.len()
        );

        SvmPredictor {
            kernel,
            bias,
            weights,
            support_vectors,
            support_vector_labels,
        }
    }

    /// Validated construction from model-store data
    ///
    /// # Errors
    /// `ModelError::LengthMismatch` when the three arrays differ in length,
    /// `ModelError::DimensionMismatch` when support vectors are ragged.
    pub fn from_parts(parts: PredictorParts<K>) -> Result<Self, ModelError> {
        let PredictorParts {
            kernel,
            bias,
            weights,
            support_vectors,
            support_vector_labels,
        } = parts;

        if weights.len() != support_vectors.len() || weights.len() != support_vector_labels.len() {
            return Err(ModelError::LengthMismatch {
                weights: weights.len(),
                support_vectors: support_vectors.len(),
                labels: support_vector_labels.len(),
            });
        }

        if let Some(first) = support_vectors.first() {
            let expected = first.len();
            if let Some((index, sv)) = support_vectors
                .iter()
                .enumerate()
                .find(|(_, sv)| sv.len() != expected)
            {
                return Err(ModelError::DimensionMismatch {
                    index,
                    expected,
                    found: sv.len(),
                });
            }
        }

        Ok(Self::new(
            kernel,
            bias,
            weights,
            support_vectors,
            support_vector_labels,
        ))
    }

    /// Decompose into plain data
    pub fn into_parts(self) -> PredictorParts<K> {
        PredictorParts {
            kernel: self.kernel,
            bias: self.bias,
            weights: self.weights,
            support_vectors: self.support_vectors,
            support_vector_labels: self.support_vector_labels,
        }
    }

    /// Same support set with a different bias
    pub(crate) fn with_bias(self, bias: f64) -> Self {
        debug!("SVM predictor bias set to {}", bias);
        SvmPredictor { bias, ..self }
    }

    /// Raw decision value `bias + Σ α_i y_i K(sv_i, x)`
    pub fn decision_value(&self, x: &[f64]) -> f64 {
        self.weights
            .iter()
            .zip(&self.support_vectors)
            .zip(&self.support_vector_labels)
            .fold(self.bias, |acc, ((alpha, sv), label)| {
                acc + alpha * label.value() * self.kernel.evaluate(sv, x)
            })
    }

    /// Classify a feature vector
    ///
    /// A decision value of exactly zero is classified as [`Label::Positive`].
    pub fn predict(&self, x: &[f64]) -> Label {
        Label::from_decision(self.decision_value(x))
    }

    /// Kernel used by the decision function
    pub fn kernel(&self) -> &K {
        &self.kernel
    }

    /// Bias term
    pub fn bias(&self) -> f64 {
        self.bias
    }

    /// Support vector multipliers
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Retained training samples
    pub fn support_vectors(&self) -> &[Vec<f64>] {
        &self.support_vectors
    }

    /// Class of each support vector
    pub fn support_vector_labels(&self) -> &[Label] {
        &self.support_vector_labels
    }

    /// Number of support vectors
    pub fn n_support(&self) -> usize {
        self.weights.len()
    }

    /// Feature dimension, if there is at least one support vector
    pub fn n_features(&self) -> Option<usize> {
        self.support_vectors.first().map(Vec::len)
    }
}
