//! Fire Risk Core Library
//!
//! Numerical core of a forest fire risk predictor:
//! - the Canadian Forest Fire Weather Index System (FFMC, DMC, DC, ISI, BUI, FWI)
//!   computed from a noon weather observation and yesterday's moisture codes
//! - a kernel support vector machine trained by solving the soft-margin dual QP
//!
//! The two halves are independent. Callers compute the FWI components, assemble
//! a [`FeatureVector`], and feed it to a trained [`SvmPredictor`].
//!
//! ## Example
//! ```
//! use fire_risk_core::{fwi, MoistureCodes, WeatherObservation};
//! use fire_risk_core::core_types::{Celsius, KilometersPerHour, Percent};
//!
//! let noon = WeatherObservation::dry(
//!     Celsius::new(17.0),
//!     Percent::new(42.0),
//!     KilometersPerHour::new(25.0),
//! );
//! let today = fwi::calculate(&noon, MoistureCodes::STARTUP, 45.98, 4).unwrap();
//! assert!((today.fwi - 10.096371392382368).abs() < 1e-9);
//! ```

// Core types and utilities
pub mod core_types;

// Fire Weather Index System
pub mod fwi;

// Kernel SVM
pub mod svm;

// Model input assembly
pub mod features;

// Re-export core types
pub use core_types::{Celsius, KilometersPerHour, Millimeters, Percent, WeatherObservation};

// Re-export FWI types
pub use fwi::{FwiCalculator, FwiComponents, FwiError, LawsonForestFloor, MoistureCodes};

// Re-export SVM types
pub use svm::{
    Kernel, KernelKind, Label, ModelError, PredictorParts, SvmPredictor, SvmTrainer, TrainError,
    TrainerConfig,
};

pub use features::{FeatureVector, GridBounds};
