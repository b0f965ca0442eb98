//! Sequential minimal optimization for the SVM dual
//!
//! Solves
//!
//! ```text
//! minimize    ½ αᵀQα − eᵀα          Q_ij = y_i y_j K_ij
//! subject to  0 ≤ α_i ≤ C
//!             yᵀα = 0
//! ```
//!
//! which is the negated soft-margin dual. Each iteration picks the maximal
//! violating pair using second-order working-set selection and solves the
//! two-variable subproblem analytically, so the equality constraint holds
//! after every step and α never leaves the box.
//!
//! # References
//! - Platt, J. (1998). "Sequential Minimal Optimization: A Fast Algorithm for
//!   Training Support Vector Machines". MSR-TR-98-14
//! - Fan, R.-E., Chen, P.-H. & Lin, C.-J. (2005). "Working Set Selection Using
//!   Second Order Information for Training Support Vector Machines". JMLR 6

use super::error::TrainError;
use nalgebra::{DMatrix, DVector};

/// Floor for non-positive curvature along the working pair
const TAU: f64 = 1e-12;

/// Converged multipliers and solver diagnostics
#[derive(Debug, Clone)]
pub(crate) struct SmoSolution {
    pub(crate) alpha: DVector<f64>,
    pub(crate) iterations: usize,
    pub(crate) kkt_gap: f64,
}

/// Outcome of working-set selection
enum WorkingSet {
    /// KKT conditions hold within tolerance
    Optimal { gap: f64 },
    /// Pair to optimize next
    Pair { i: usize, j: usize, gap: f64 },
}

pub(crate) struct SmoSolver<'a> {
    gram: &'a DMatrix<f64>,
    labels: &'a DVector<f64>,
    c: f64,
    tolerance: f64,
    max_iterations: usize,
}

impl<'a> SmoSolver<'a> {
    pub(crate) fn new(
        gram: &'a DMatrix<f64>,
        labels: &'a DVector<f64>,
        c: f64,
        tolerance: f64,
        max_iterations: usize,
    ) -> Self {
        debug_assert_eq!(gram.nrows(), labels.len());
        debug_assert_eq!(gram.ncols(), labels.len());
        SmoSolver {
            gram,
            labels,
            c,
            tolerance,
            max_iterations,
        }
    }

    /// Run SMO from α = 0
    pub(crate) fn solve(&self) -> Result<SmoSolution, TrainError> {
        let n = self.labels.len();
        let mut alpha = DVector::zeros(n);
        // Gradient of the objective, Qα − e
        let mut grad = DVector::from_element(n, -1.0);
        let mut last_gap = f64::INFINITY;

        for iteration in 0..self.max_iterations {
            let (i, j) = match self.select_working_set(&alpha, &grad) {
                WorkingSet::Optimal { gap } => {
                    return Ok(SmoSolution {
                        alpha,
                        iterations: iteration,
                        kkt_gap: gap,
                    });
                }
                WorkingSet::Pair { i, j, gap } => {
                    last_gap = gap;
                    (i, j)
                }
            };

            let (old_i, old_j) = (alpha[i], alpha[j]);
            self.update_pair(&mut alpha, &grad, i, j);

            let delta_i = alpha[i] - old_i;
            let delta_j = alpha[j] - old_j;
            let (yi, yj) = (self.labels[i], self.labels[j]);
            for k in 0..n {
                let yk = self.labels[k];
                grad[k] +=
                    yi * yk * self.gram[(i, k)] * delta_i + yj * yk * self.gram[(j, k)] * delta_j;
            }
        }

        match self.select_working_set(&alpha, &grad) {
            WorkingSet::Optimal { gap } => Ok(SmoSolution {
                alpha,
                iterations: self.max_iterations,
                kkt_gap: gap,
            }),
            WorkingSet::Pair { gap, .. } => Err(TrainError::SolverDidNotConverge {
                iterations: self.max_iterations,
                kkt_gap: gap.min(last_gap),
            }),
        }
    }

    #[inline]
    fn in_up_set(&self, alpha: f64, label: f64) -> bool {
        if label > 0.0 {
            alpha < self.c
        } else {
            alpha > 0.0
        }
    }

    #[inline]
    fn in_low_set(&self, alpha: f64, label: f64) -> bool {
        if label > 0.0 {
            alpha > 0.0
        } else {
            alpha < self.c
        }
    }

    /// Second-order working-set selection (Fan, Chen & Lin 2005, WSS 2)
    fn select_working_set(&self, alpha: &DVector<f64>, grad: &DVector<f64>) -> WorkingSet {
        let n = self.labels.len();

        // i maximizes −y_t ∇f_t over the "up" set
        let mut g_max = f64::NEG_INFINITY;
        let mut best_i = None;
        for t in 0..n {
            let y = self.labels[t];
            if self.in_up_set(alpha[t], y) {
                let violation = -y * grad[t];
                if violation >= g_max {
                    g_max = violation;
                    best_i = Some(t);
                }
            }
        }
        let Some(i) = best_i else {
            return WorkingSet::Optimal { gap: 0.0 };
        };

        // j minimizes the second-order decrease over the "low" set
        let mut g_max2 = f64::NEG_INFINITY;
        let mut obj_min = f64::INFINITY;
        let mut best_j = None;
        let k_ii = self.gram[(i, i)];
        for t in 0..n {
            let y = self.labels[t];
            if !self.in_low_set(alpha[t], y) {
                continue;
            }
            let y_grad = y * grad[t];
            if y_grad >= g_max2 {
                g_max2 = y_grad;
            }

            let grad_diff = g_max + y_grad;
            if grad_diff > 0.0 {
                let curvature = k_ii + self.gram[(t, t)] - 2.0 * self.gram[(i, t)];
                let curvature = if curvature > 0.0 { curvature } else { TAU };
                let obj = -(grad_diff * grad_diff) / curvature;
                if obj <= obj_min {
                    obj_min = obj;
                    best_j = Some(t);
                }
            }
        }

        let gap = g_max + g_max2;
        match best_j {
            Some(j) if gap >= self.tolerance => WorkingSet::Pair { i, j, gap },
            _ => WorkingSet::Optimal { gap: gap.max(0.0) },
        }
    }

    /// Analytic solution of the two-variable subproblem, clipped to the box
    fn update_pair(&self, alpha: &mut DVector<f64>, grad: &DVector<f64>, i: usize, j: usize) {
        let c = self.c;
        let (yi, yj) = (self.labels[i], self.labels[j]);
        let curvature = self.gram[(i, i)] + self.gram[(j, j)] - 2.0 * self.gram[(i, j)];
        let curvature = if curvature > 0.0 { curvature } else { TAU };

        if yi == yj {
            let delta = (grad[i] - grad[j]) / curvature;
            let sum = alpha[i] + alpha[j];
            alpha[i] -= delta;
            alpha[j] += delta;

            if sum > c {
                if alpha[i] > c {
                    alpha[i] = c;
                    alpha[j] = sum - c;
                }
            } else if alpha[j] < 0.0 {
                alpha[j] = 0.0;
                alpha[i] = sum;
            }
            if sum > c {
                if alpha[j] > c {
                    alpha[j] = c;
                    alpha[i] = sum - c;
                }
            } else if alpha[i] < 0.0 {
                alpha[i] = 0.0;
                alpha[j] = sum;
            }
        } else {
            let delta = (-grad[i] - grad[j]) / curvature;
            let diff = alpha[i] - alpha[j];
            alpha[i] += delta;
            alpha[j] += delta;

            if diff > 0.0 {
                if alpha[j] < 0.0 {
                    alpha[j] = 0.0;
                    alpha[i] = diff;
                }
            } else if alpha[i] < 0.0 {
                alpha[i] = 0.0;
                alpha[j] = -diff;
            }
            if diff > 0.0 {
                if alpha[i] > c {
                    alpha[i] = c;
                    alpha[j] = c - diff;
                }
            } else if alpha[j] > c {
                alpha[j] = c;
                alpha[i] = c + diff;
            }
        }
    }
}
