//! End-to-end SVM training on seeded synthetic data
//!
//! Set `RUST_LOG=fire_risk_core=debug` to see solver progress.

use approx::assert_relative_eq;
use fire_risk_core::core_types::{Celsius, KilometersPerHour, Millimeters, Percent};
use fire_risk_core::features::FEATURE_COUNT;
use fire_risk_core::fwi::{FwiCalculator, MoistureCodes};
use fire_risk_core::svm::{
    KernelKind, Label, PredictorParts, SvmPredictor, SvmTrainer, TrainError, TrainerConfig,
};
use fire_risk_core::{FeatureVector, GridBounds, WeatherObservation};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[ctor::ctor]
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Two clusters around (2, 2) and (-2, -2), well apart
fn separable_clusters(rng: &mut StdRng, per_class: usize) -> (Vec<Vec<f64>>, Vec<Label>) {
    let mut samples = Vec::with_capacity(2 * per_class);
    let mut labels = Vec::with_capacity(2 * per_class);
    for _ in 0..per_class {
        samples.push(vec![
            2.0 + rng.random_range(-1.0..1.0),
            2.0 + rng.random_range(-1.0..1.0),
        ]);
        labels.push(Label::Positive);
        samples.push(vec![
            -2.0 + rng.random_range(-1.0..1.0),
            -2.0 + rng.random_range(-1.0..1.0),
        ]);
        labels.push(Label::Negative);
    }
    (samples, labels)
}

/// Points in the four quadrants, labelled by the sign of x·y
fn xor_quadrants(rng: &mut StdRng, per_quadrant: usize) -> (Vec<Vec<f64>>, Vec<Label>) {
    let mut samples = Vec::new();
    let mut labels = Vec::new();
    for (sx, sy) in [(1.0, 1.0), (-1.0, -1.0), (1.0, -1.0), (-1.0, 1.0)] {
        for _ in 0..per_quadrant {
            let x: f64 = sx * rng.random_range(0.3..1.0);
            let y: f64 = sy * rng.random_range(0.3..1.0);
            samples.push(vec![x, y]);
            labels.push(Label::from_decision(x * y));
        }
    }
    (samples, labels)
}

fn accuracy<K: fire_risk_core::Kernel>(
    predictor: &SvmPredictor<K>,
    samples: &[Vec<f64>],
    labels: &[Label],
) -> f64 {
    let correct = samples
        .iter()
        .zip(labels)
        .filter(|(x, y)| predictor.predict(x) == **y)
        .count();
    correct as f64 / samples.len() as f64
}

#[test]
fn test_linear_separable_has_zero_training_error() {
    let mut rng = StdRng::seed_from_u64(42);
    let (samples, labels) = separable_clusters(&mut rng, 30);

    let trainer = SvmTrainer::new(KernelKind::Linear, 10.0);
    let multipliers = trainer.compute_multipliers(&samples, &labels).unwrap();

    let balance: f64 = multipliers
        .iter()
        .zip(&labels)
        .map(|(a, y)| a * y.value())
        .sum();
    assert!(balance.abs() < 1e-9, "Σαy = {balance}");
    assert!(multipliers.iter().all(|&a| (0.0..=10.0).contains(&a)));

    let predictor = trainer
        .construct_predictor(&samples, &labels, &multipliers)
        .unwrap();
    assert_eq!(accuracy(&predictor, &samples, &labels), 1.0);

    // A separable set is carried by a handful of margin points
    assert!(predictor.n_support() < samples.len() / 2);
    assert!(predictor.n_support() >= 2);
}

#[test]
fn test_gaussian_kernel_solves_xor() {
    let mut rng = StdRng::seed_from_u64(7);
    let (samples, labels) = xor_quadrants(&mut rng, 15);

    let gaussian = SvmTrainer::new(KernelKind::gaussian(0.3), 10.0)
        .train(&samples, &labels)
        .unwrap();
    assert_eq!(accuracy(&gaussian, &samples, &labels), 1.0);
    assert_eq!(gaussian.predict(&[0.8, 0.8]), Label::Positive);
    assert_eq!(gaussian.predict(&[-0.8, 0.8]), Label::Negative);

    let linear = SvmTrainer::new(KernelKind::Linear, 10.0)
        .train(&samples, &labels)
        .unwrap();
    assert!(accuracy(&linear, &samples, &labels) < 0.9);
}

#[test]
fn test_closure_kernel() {
    let mut rng = StdRng::seed_from_u64(3);
    let (samples, labels) = separable_clusters(&mut rng, 10);

    let kernel = |x: &[f64], y: &[f64]| x.iter().zip(y).map(|(a, b)| a * b).sum::<f64>();
    let predictor = SvmTrainer::new(kernel, 1.0)
        .train(&samples, &labels)
        .unwrap();

    assert_eq!(accuracy(&predictor, &samples, &labels), 1.0);
}

#[test]
fn test_trained_model_survives_parts_round_trip() {
    let mut rng = StdRng::seed_from_u64(11);
    let (samples, labels) = xor_quadrants(&mut rng, 8);
    let predictor = SvmTrainer::new(KernelKind::radial_basis(2.0), 5.0)
        .train(&samples, &labels)
        .unwrap();
    let before: Vec<f64> = samples
        .iter()
        .map(|x| predictor.decision_value(x))
        .collect();

    let json = serde_json::to_string(&predictor.into_parts()).unwrap();
    let parts: PredictorParts<KernelKind> = serde_json::from_str(&json).unwrap();
    let restored = SvmPredictor::from_parts(parts).unwrap();

    for (x, expected) in samples.iter().zip(before) {
        assert_relative_eq!(restored.decision_value(x), expected, max_relative = 1e-12);
    }
}

#[test]
fn test_training_rejects_bad_input() {
    let trainer = SvmTrainer::new(KernelKind::Linear, 1.0);

    assert_eq!(
        trainer.train(&[], &[]).unwrap_err(),
        TrainError::EmptyTrainingSet
    );
    assert_eq!(
        trainer
            .train(&[vec![1.0], vec![2.0]], &[Label::Positive, Label::Positive])
            .unwrap_err(),
        TrainError::SingleClass
    );
    assert_eq!(
        trainer
            .train(
                &[vec![1.0, 0.0], vec![2.0]],
                &[Label::Positive, Label::Negative]
            )
            .unwrap_err(),
        TrainError::InconsistentDimensions {
            index: 1,
            expected: 2,
            found: 1
        }
    );

    let starved = SvmTrainer::with_config(
        KernelKind::Linear,
        TrainerConfig::default().with_max_iterations(0),
    );
    let mut rng = StdRng::seed_from_u64(5);
    let (samples, labels) = separable_clusters(&mut rng, 5);
    assert!(matches!(
        starved.train(&samples, &labels),
        Err(TrainError::SolverDidNotConverge { iterations: 0, .. })
    ));
}

#[test]
fn test_fwi_features_feed_predictor() {
    // Hot dry afternoons are labelled risky, cool damp ones safe
    let bounds = GridBounds::MONTESINHO;
    let (lon, lat) = (-6.9, 41.85);
    let mut rows = Vec::new();
    let mut labels = Vec::new();

    for (temperature, humidity, label) in [
        (31.0, 18.0, Label::Positive),
        (29.0, 22.0, Label::Positive),
        (33.0, 15.0, Label::Positive),
        (14.0, 85.0, Label::Negative),
        (12.0, 90.0, Label::Negative),
        (16.0, 78.0, Label::Negative),
    ] {
        let mut calculator = FwiCalculator::with_codes(lat, MoistureCodes::STARTUP);
        let weather = WeatherObservation::new(
            Celsius::new(temperature),
            Percent::new(humidity),
            KilometersPerHour::new(12.0),
            Millimeters::ZERO,
        );
        let components = calculator.step(&weather, 8).unwrap();
        let features = FeatureVector::assemble(&bounds, lon, lat, 8, 15, &weather, &components);
        rows.push(Vec::from(features));
        labels.push(label);
    }

    let predictor = SvmTrainer::new(KernelKind::Linear, 1.0)
        .train(&rows, &labels)
        .unwrap();

    assert_eq!(predictor.n_features(), Some(FEATURE_COUNT));
    assert_eq!(accuracy(&predictor, &rows, &labels), 1.0);
}
