//! Kernel functions for the SVM decision function
//!
//! Any `Fn(&[f64], &[f64]) -> f64 + Send + Sync` closure is a kernel. The
//! [`KernelKind`] family covers the standard choices and is serializable, so
//! a trained predictor can be handed to a model store.

use serde::{Deserialize, Serialize};

/// A symmetric similarity function over feature vectors
///
/// Implementations must be pure: the Gram matrix is evaluated in parallel and
/// assumes `evaluate(x, y)` depends only on its arguments.
pub trait Kernel: Send + Sync {
    /// Evaluate the kernel for two feature vectors of equal dimension
    fn evaluate(&self, x: &[f64], y: &[f64]) -> f64;
}

impl<F> Kernel for F
where
    F: Fn(&[f64], &[f64]) -> f64 + Send + Sync,
{
    #[inline]
    fn evaluate(&self, x: &[f64], y: &[f64]) -> f64 {
        self(x, y)
    }
}

/// Inner product ⟨x, y⟩
#[inline]
pub fn dot(x: &[f64], y: &[f64]) -> f64 {
    x.iter().zip(y).map(|(a, b)| a * b).sum()
}

/// Squared Euclidean distance ‖x − y‖²
#[inline]
pub fn squared_distance(x: &[f64], y: &[f64]) -> f64 {
    x.iter()
        .zip(y)
        .map(|(a, b)| {
            let d = a - b;
            d * d
        })
        .sum()
}

/// Standard kernel family
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum KernelKind {
    /// ⟨x, y⟩
    Linear,
    /// (offset + ⟨x, y⟩)^degree
    Polynomial {
        /// Polynomial degree
        degree: i32,
        /// Additive offset; 0 gives the homogeneous kernel
        offset: f64,
    },
    /// exp(−‖x − y‖² / (2σ²))
    Gaussian {
        /// Bandwidth σ
        sigma: f64,
    },
    /// exp(−γ‖x − y‖²)
    RadialBasis {
        /// Inverse width γ
        gamma: f64,
    },
    /// tanh(κ⟨x, y⟩ + c). Not positive semi-definite for every κ, c.
    HyperbolicTangent {
        /// Slope κ
        kappa: f64,
        /// Intercept c
        c: f64,
    },
}

impl KernelKind {
    /// Inhomogeneous polynomial kernel, offset 1
    pub fn polynomial(degree: i32) -> Self {
        KernelKind::Polynomial {
            degree,
            offset: 1.0,
        }
    }

    /// Gaussian kernel with bandwidth `sigma`
    pub fn gaussian(sigma: f64) -> Self {
        KernelKind::Gaussian { sigma }
    }

    /// RBF kernel with inverse width `gamma`
    pub fn radial_basis(gamma: f64) -> Self {
        KernelKind::RadialBasis { gamma }
    }
}

impl Kernel for KernelKind {
    fn evaluate(&self, x: &[f64], y: &[f64]) -> f64 {
        match *self {
            KernelKind::Linear => dot(x, y),
            KernelKind::Polynomial { degree, offset } => (offset + dot(x, y)).powi(degree),
            KernelKind::Gaussian { sigma } => {
                (-squared_distance(x, y) / (2.0 * sigma * sigma)).exp()
            }
            KernelKind::RadialBasis { gamma } => (-gamma * squared_distance(x, y)).exp(),
            KernelKind::HyperbolicTangent { kappa, c } => (kappa * dot(x, y) + c).tanh(),
        }
    }
}
