use super::error::TrainError;
use super::kernel::Kernel;
use super::predictor::SvmPredictor;
use super::smo::SmoSolver;
use super::Label;
use nalgebra::{DMatrix, DVector};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Multipliers at or below this value are treated as zero
pub const MIN_SUPPORT_VECTOR_MULTIPLIER: f64 = 1e-5;

/// Lower bound on the solver iteration budget
const MIN_ITERATION_BUDGET: usize = 100_000;

/// Soft-margin SVM training parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrainerConfig {
    /// Regularization constant C (upper bound on each multiplier)
    pub c: f64,
    /// KKT violation at which the solver stops
    pub tolerance: f64,
    /// Solver iteration budget; `None` scales with the training set size
    pub max_iterations: Option<usize>,
    /// Multipliers above this are kept as support vectors
    pub support_threshold: f64,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        TrainerConfig {
            c: 1.0,
            tolerance: 1e-3,
            max_iterations: None,
            support_threshold: MIN_SUPPORT_VECTOR_MULTIPLIER,
        }
    }
}

impl TrainerConfig {
    /// Set the regularization constant
    pub fn with_c(mut self, c: f64) -> Self {
        self.c = c;
        self
    }

    /// Set the KKT stopping tolerance
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Set a fixed solver iteration budget
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = Some(max_iterations);
        self
    }

    /// Set the support vector multiplier threshold
    pub fn with_support_threshold(mut self, support_threshold: f64) -> Self {
        self.support_threshold = support_threshold;
        self
    }

    fn iteration_budget(&self, n_samples: usize) -> usize {
        self.max_iterations
            .unwrap_or_else(|| n_samples.saturating_mul(100).max(MIN_ITERATION_BUDGET))
    }
}

/// Kernel soft-margin SVM trainer
///
/// Owns the kernel and configuration only; the Gram matrix and QP state live
/// for the duration of one [`train`](SvmTrainer::train) call.
///
/// # Example
/// ```
/// use fire_risk_core::svm::{KernelKind, Label, SvmTrainer};
///
/// let samples = vec![vec![2.0, 2.0], vec![3.0, 1.0], vec![-2.0, -1.0], vec![-1.0, -3.0]];
/// let labels = [Label::Positive, Label::Positive, Label::Negative, Label::Negative];
///
/// let predictor = SvmTrainer::new(KernelKind::Linear, 10.0)
///     .train(&samples, &labels)
///     .unwrap();
/// assert_eq!(predictor.predict(&[4.0, 4.0]), Label::Positive);
/// ```
#[derive(Debug, Clone)]
pub struct SvmTrainer<K> {
    kernel: K,
    config: TrainerConfig,
}

impl<K: Kernel + Clone> SvmTrainer<K> {
    /// Create a trainer with regularization constant `c` and default solver settings
    pub fn new(kernel: K, c: f64) -> Self {
        Self::with_config(kernel, TrainerConfig::default().with_c(c))
    }

    /// Create a trainer with explicit configuration
    pub fn with_config(kernel: K, config: TrainerConfig) -> Self {
        SvmTrainer { kernel, config }
    }

    /// Training parameters
    pub fn config(&self) -> &TrainerConfig {
        &self.config
    }

    /// Fit a predictor to labelled samples
    ///
    /// Computes the Lagrange multipliers, then keeps the support vectors.
    ///
    /// # Errors
    /// Any [`TrainError`]: malformed input, a single-class label set, solver
    /// non-convergence, or no multiplier above the support threshold.
    pub fn train(
        &self,
        samples: &[Vec<f64>],
        labels: &[Label],
    ) -> Result<SvmPredictor<K>, TrainError> {
        let multipliers = self.compute_multipliers(samples, labels)?;
        self.construct_predictor(samples, labels, &multipliers)
    }

    /// Dense Gram matrix `K[i][j] = kernel(x_i, x_j)`
    ///
    /// Columns are filled in parallel; every cell is an independent kernel call.
    pub fn gram_matrix(&self, samples: &[Vec<f64>]) -> DMatrix<f64> {
        let n = samples.len();
        let mut gram = DMatrix::zeros(n, n);

        // nalgebra storage is column-major: chunk j is column j
        gram.as_mut_slice()
            .par_chunks_mut(n.max(1))
            .enumerate()
            .for_each(|(j, column)| {
                for (i, cell) in column.iter_mut().enumerate() {
                    *cell = self.kernel.evaluate(&samples[i], &samples[j]);
                }
            });

        gram
    }

    /// Solve the dual soft-margin QP for one multiplier per sample
    ///
    /// ```text
    /// maximize   Σα_i − ½ Σ_i Σ_j α_i α_j y_i y_j K(x_i, x_j)
    /// subject to 0 ≤ α_i ≤ C and Σ α_i y_i = 0
    /// ```
    ///
    /// # Errors
    /// Input validation failures and `TrainError::SolverDidNotConverge`.
    pub fn compute_multipliers(
        &self,
        samples: &[Vec<f64>],
        labels: &[Label],
    ) -> Result<Vec<f64>, TrainError> {
        self.validate(samples, labels)?;

        info!(
            "Training SVM on {} samples with {} features (C = {})",
            samples.len(),
            samples[0].len(),
            self.config.c
        );

        let gram = self.gram_matrix(samples);
        let y = DVector::from_iterator(labels.len(), labels.iter().map(|l| l.value()));

        let solution = SmoSolver::new(
            &gram,
            &y,
            self.config.c,
            self.config.tolerance,
            self.config.iteration_budget(samples.len()),
        )
        .solve()?;

        debug!(
            "SMO converged after {} iterations (KKT gap {:e})",
            solution.iterations, solution.kkt_gap
        );

        Ok(solution.alpha.iter().copied().collect())
    }

    /// Keep samples whose multiplier exceeds the threshold and fit the bias
    ///
    /// The bias is the mean over support samples of `y_k − f₀(x_k)`, where
    /// `f₀` is the decision value with zero bias.
    ///
    /// # Errors
    /// `TrainError::LengthMismatch` when the three inputs disagree in length,
    /// `TrainError::NoSupportVectors` when nothing passes the threshold.
    pub fn construct_predictor(
        &self,
        samples: &[Vec<f64>],
        labels: &[Label],
        multipliers: &[f64],
    ) -> Result<SvmPredictor<K>, TrainError> {
        if samples.len() != labels.len() {
            return Err(TrainError::LengthMismatch {
                samples: samples.len(),
                labels: labels.len(),
            });
        }
        if multipliers.len() != samples.len() {
            return Err(TrainError::LengthMismatch {
                samples: samples.len(),
                labels: multipliers.len(),
            });
        }

        let mut weights = Vec::new();
        let mut support_vectors = Vec::new();
        let mut support_vector_labels = Vec::new();
        for ((sample, &label), &alpha) in samples.iter().zip(labels).zip(multipliers) {
            if alpha > self.config.support_threshold {
                weights.push(alpha);
                support_vectors.push(sample.clone());
                support_vector_labels.push(label);
            }
        }

        if weights.is_empty() {
            return Err(TrainError::NoSupportVectors);
        }

        info!(
            "Retained {} of {} samples as support vectors",
            weights.len(),
            samples.len()
        );

        let unbiased = SvmPredictor::new(
            self.kernel.clone(),
            0.0,
            weights,
            support_vectors,
            support_vector_labels,
        );

        let residual_sum: f64 = unbiased
            .support_vectors()
            .iter()
            .zip(unbiased.support_vector_labels())
            .map(|(x, y)| y.value() - unbiased.decision_value(x))
            .sum();
        let bias = residual_sum / unbiased.n_support() as f64;

        Ok(unbiased.with_bias(bias))
    }

    fn validate(&self, samples: &[Vec<f64>], labels: &[Label]) -> Result<(), TrainError> {
        let c = self.config.c;
        if !(c.is_finite() && c > 0.0) {
            return Err(TrainError::InvalidRegularization { c });
        }
        if samples.is_empty() {
            return Err(TrainError::EmptyTrainingSet);
        }
        if samples.len() != labels.len() {
            return Err(TrainError::LengthMismatch {
                samples: samples.len(),
                labels: labels.len(),
            });
        }

        let expected = samples[0].len();
        if let Some((index, sample)) = samples
            .iter()
            .enumerate()
            .find(|(_, s)| s.len() != expected)
        {
            return Err(TrainError::InconsistentDimensions {
                index,
                expected,
                found: sample.len(),
            });
        }

        let has_positive = labels.contains(&Label::Positive);
        let has_negative = labels.contains(&Label::Negative);
        if !(has_positive && has_negative) {
            return Err(TrainError::SingleClass);
        }

        Ok(())
    }
}
