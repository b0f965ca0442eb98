//! Semantic unit types for noon weather observations
//!
//! Newtype wrappers keep the four FWI weather inputs from being passed in the
//! wrong order (every one of them is a bare `f64` otherwise).
//!
//! # Design
//! - All types use f64: the FWI codes are chained day over day and the
//!   published reference values are quoted to full double precision
//! - Total ordering via `Ord` (NaN sorts above all values)
//! - `Deref` to the raw value for use inside formulas
//! - Serde support for serialization
//!
//! # Usage
//! ```
//! use fire_risk_core::core_types::units::{Celsius, Percent};
//!
//! let temp = Celsius::new(17.0);
//! assert_eq!(*temp, 17.0);
//!
//! let rh = Percent::new(112.0);
//! assert_eq!(rh.saturated(), Percent::new(100.0));
//! ```

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::ops::Deref;

/// Compare f64 values with total ordering using Rust's built-in `total_cmp`
#[inline]
fn f64_total_cmp(a: f64, b: f64) -> Ordering {
    a.total_cmp(&b)
}

// ============================================================================
// TEMPERATURE
// ============================================================================

/// Air temperature in degrees Celsius (12:00 LST reading)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Celsius(f64);

impl Eq for Celsius {}

impl PartialOrd for Celsius {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Celsius {
    fn cmp(&self, other: &Self) -> Ordering {
        f64_total_cmp(self.0, other.0)
    }
}

impl Deref for Celsius {
    type Target = f64;
    #[inline]
    fn deref(&self) -> &f64 {
        &self.0
    }
}

impl Celsius {
    /// Celsius to Kelvin conversion offset (0°C = 273.15 K)
    pub const KELVIN_OFFSET: f64 = 273.15;

    /// Create a new Celsius temperature. Asserts value >= absolute zero (-273.15°C).
    #[inline]
    #[must_use]
    #[track_caller]
    pub const fn new(value: f64) -> Self {
        assert!(
            value >= -Self::KELVIN_OFFSET,
            "Celsius::new: value is below absolute zero (-273.15°C)"
        );
        Celsius(value)
    }

    /// Convert a Kelvin reading (as delivered by most weather feeds)
    #[inline]
    #[must_use]
    #[track_caller]
    pub const fn from_kelvin(kelvin: f64) -> Self {
        Self::new(kelvin - Self::KELVIN_OFFSET)
    }

    /// Get the raw f64 value
    #[inline]
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }
}

impl From<f64> for Celsius {
    fn from(v: f64) -> Self {
        Celsius(v)
    }
}

impl From<Celsius> for f64 {
    fn from(c: Celsius) -> f64 {
        c.0
    }
}

impl fmt::Display for Celsius {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}°C", self.0)
    }
}

// ============================================================================
// RELATIVE HUMIDITY
// ============================================================================

/// A percentage (0-100), used for relative humidity
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Percent(f64);

impl Eq for Percent {}

impl PartialOrd for Percent {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Percent {
    fn cmp(&self, other: &Self) -> Ordering {
        f64_total_cmp(self.0, other.0)
    }
}

impl Deref for Percent {
    type Target = f64;
    #[inline]
    fn deref(&self) -> &f64 {
        &self.0
    }
}

impl Percent {
    /// Saturation (100%)
    pub const SATURATED: Percent = Percent(100.0);

    /// Create a new percentage
    #[inline]
    #[must_use]
    pub const fn new(value: f64) -> Self {
        Percent(value)
    }

    /// Get the raw f64 value
    #[inline]
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }

    /// Cap at saturation. Sensor readings above 100% are clipped, readings
    /// below zero are left alone.
    #[inline]
    #[must_use]
    pub fn saturated(self) -> Percent {
        Percent(self.0.min(100.0))
    }
}

impl From<f64> for Percent {
    fn from(v: f64) -> Self {
        Percent(v)
    }
}

impl From<Percent> for f64 {
    fn from(p: Percent) -> f64 {
        p.0
    }
}

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}%", self.0)
    }
}

// ============================================================================
// WIND SPEED
// ============================================================================

/// Velocity in kilometers per hour
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct KilometersPerHour(f64);

impl Eq for KilometersPerHour {}

impl PartialOrd for KilometersPerHour {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for KilometersPerHour {
    fn cmp(&self, other: &Self) -> Ordering {
        f64_total_cmp(self.0, other.0)
    }
}

impl Deref for KilometersPerHour {
    type Target = f64;
    #[inline]
    fn deref(&self) -> &f64 {
        &self.0
    }
}

impl KilometersPerHour {
    /// Create a new `KilometersPerHour` value.
    #[inline]
    #[must_use]
    pub const fn new(value: f64) -> Self {
        KilometersPerHour(value)
    }

    /// Convert from m/s (the unit most weather feeds report)
    #[inline]
    #[must_use]
    pub fn from_mps(meters_per_second: f64) -> Self {
        KilometersPerHour(meters_per_second * 3.6)
    }

    /// Get the raw f64 value
    #[inline]
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }
}

impl From<f64> for KilometersPerHour {
    fn from(v: f64) -> Self {
        KilometersPerHour::new(v)
    }
}

impl From<KilometersPerHour> for f64 {
    fn from(k: KilometersPerHour) -> f64 {
        k.0
    }
}

impl fmt::Display for KilometersPerHour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1} km/h", self.0)
    }
}

// ============================================================================
// PRECIPITATION
// ============================================================================

/// Accumulated precipitation depth in millimeters
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Millimeters(f64);

impl Eq for Millimeters {}

impl PartialOrd for Millimeters {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Millimeters {
    fn cmp(&self, other: &Self) -> Ordering {
        f64_total_cmp(self.0, other.0)
    }
}

impl Deref for Millimeters {
    type Target = f64;
    #[inline]
    fn deref(&self) -> &f64 {
        &self.0
    }
}

impl Millimeters {
    /// No rain
    pub const ZERO: Millimeters = Millimeters(0.0);

    /// Create a new precipitation depth
    #[inline]
    #[must_use]
    pub const fn new(value: f64) -> Self {
        Millimeters(value)
    }

    /// Get the raw f64 value
    #[inline]
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }
}

impl From<f64> for Millimeters {
    fn from(v: f64) -> Self {
        Millimeters(v)
    }
}

impl From<Millimeters> for f64 {
    fn from(m: Millimeters) -> f64 {
        m.0
    }
}

impl fmt::Display for Millimeters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1} mm", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kelvin_conversion() {
        let temp = Celsius::from_kelvin(290.15);
        assert!((*temp - 17.0).abs() < 1e-9);
    }

    #[test]
    #[should_panic(expected = "below absolute zero")]
    fn test_celsius_below_absolute_zero_panics() {
        let _ = Celsius::new(-300.0);
    }

    #[test]
    fn test_humidity_saturation() {
        assert_eq!(Percent::new(104.0).saturated(), Percent::SATURATED);
        assert_eq!(Percent::new(42.0).saturated(), Percent::new(42.0));
    }

    #[test]
    fn test_wind_from_mps() {
        let wind = KilometersPerHour::from_mps(5.0);
        assert!((*wind - 18.0).abs() < 1e-12);
    }

    #[test]
    fn test_total_ordering() {
        let dry = Millimeters::ZERO;
        let wet = Millimeters::new(12.5);
        assert!(dry < wet);
        assert_eq!(dry.max(wet), wet);
    }

    #[test]
    fn test_display() {
        assert_eq!(Celsius::new(17.0).to_string(), "17.0°C");
        assert_eq!(Percent::new(42.0).to_string(), "42.0%");
        assert_eq!(KilometersPerHour::new(25.0).to_string(), "25.0 km/h");
        assert_eq!(Millimeters::new(0.0).to_string(), "0.0 mm");
    }
}
