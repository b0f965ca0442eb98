//! Noon weather observation consumed by the FWI pipeline
//!
//! The Canadian system is defined on a single daily reading taken at 12:00
//! local standard time, with rainfall accumulated over the previous 24 hours.
//! Fetching the reading is the caller's job; this type is the injected snapshot.

use super::units::{Celsius, KilometersPerHour, Millimeters, Percent};
use serde::{Deserialize, Serialize};

/// One day's 12:00 LST weather reading
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeatherObservation {
    /// Air temperature
    pub temperature: Celsius,
    /// Relative humidity, clipped to 100% before use
    pub humidity: Percent,
    /// 10 m open wind speed
    pub wind_speed: KilometersPerHour,
    /// Rainfall accumulated over the preceding 24 hours
    pub rain: Millimeters,
}

impl WeatherObservation {
    /// Create a new observation
    pub fn new(
        temperature: Celsius,
        humidity: Percent,
        wind_speed: KilometersPerHour,
        rain: Millimeters,
    ) -> Self {
        WeatherObservation {
            temperature,
            humidity,
            wind_speed,
            rain,
        }
    }

    /// Same reading with no rainfall
    pub fn dry(temperature: Celsius, humidity: Percent, wind_speed: KilometersPerHour) -> Self {
        Self::new(temperature, humidity, wind_speed, Millimeters::ZERO)
    }
}
