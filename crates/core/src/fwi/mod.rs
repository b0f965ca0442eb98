//! Canadian Forest Fire Weather Index System
//!
//! Pure functions chaining one noon weather observation and yesterday's three
//! moisture codes into the six standard FWI components:
//!
//! ```text
//! weather ─┬─> FFMC ──────────┐
//!          ├─> DMC ──┐        ├─> ISI ─┐
//!          └─> DC  ──┴─> BUI ─┼────────┴─> FWI
//! wind ────────────────────────┘
//! ```
//!
//! DMC and DC need latitude/month lookup tables; those are the only fallible
//! steps. Everything else is a total function of its inputs: NaN and negative
//! inputs are not validated and propagate numerically.
//!
//! # Scientific References
//! - Van Wagner, C.E. & Pickett, T.L. (1985). Forestry Technical Report 33
//! - Van Wagner, C.E. (1987). Forestry Technical Report 35

mod calculator;
mod codes;
mod error;
mod indices;
pub mod lawson;
mod tables;

pub use calculator::FwiCalculator;
pub use codes::{dc, dmc, ffmc};
pub use error::FwiError;
pub use indices::{bui, fwi, isi};
pub use lawson::LawsonForestFloor;
pub use tables::{day_length, drying_factor};

use crate::core_types::WeatherObservation;
use serde::{Deserialize, Serialize};

/// The three codes carried from one day to the next
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MoistureCodes {
    /// Fine Fuel Moisture Code
    pub ffmc: f64,
    /// Duff Moisture Code
    pub dmc: f64,
    /// Drought Code
    pub dc: f64,
}

impl MoistureCodes {
    /// Standard start-up values for the first day of the fire season
    pub const STARTUP: MoistureCodes = MoistureCodes {
        ffmc: 85.0,
        dmc: 6.0,
        dc: 15.0,
    };

    /// Create a new set of carried codes
    pub fn new(ffmc: f64, dmc: f64, dc: f64) -> Self {
        MoistureCodes { ffmc, dmc, dc }
    }
}

impl Default for MoistureCodes {
    fn default() -> Self {
        Self::STARTUP
    }
}

/// All six FWI System outputs for one day
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FwiComponents {
    /// Fine Fuel Moisture Code
    pub ffmc: f64,
    /// Duff Moisture Code
    pub dmc: f64,
    /// Drought Code
    pub dc: f64,
    /// Initial Spread Index
    pub isi: f64,
    /// Buildup Index
    pub bui: f64,
    /// Fire Weather Index
    pub fwi: f64,
}

impl FwiComponents {
    /// The moisture codes to carry into tomorrow's calculation
    pub fn codes(&self) -> MoistureCodes {
        MoistureCodes::new(self.ffmc, self.dmc, self.dc)
    }
}

/// Calculate all six FWI components for one day
///
/// Evaluation order is fixed: FFMC, DMC, DC, ISI, BUI, FWI.
///
/// # Arguments
/// * `observation` - Today's 12:00 LST weather
/// * `previous` - Yesterday's FFMC, DMC and DC
/// * `latitude` - Decimal degrees, positive north
/// * `month` - Calendar month (1..=12)
///
/// # Errors
/// `FwiError::InvalidLatitude` or `FwiError::InvalidMonth` from the DMC/DC
/// lookup tables.
pub fn calculate(
    observation: &WeatherObservation,
    previous: MoistureCodes,
    latitude: f64,
    month: u32,
) -> Result<FwiComponents, FwiError> {
    let temperature = *observation.temperature;
    let humidity = *observation.humidity;
    let wind = *observation.wind_speed;
    let rain = *observation.rain;

    let ffmc = ffmc(temperature, humidity, wind, rain, previous.ffmc);
    let dmc = dmc(temperature, humidity, rain, previous.dmc, latitude, month)?;
    let dc = dc(temperature, rain, previous.dc, latitude, month)?;
    let isi = isi(wind, ffmc);
    let bui = bui(dmc, dc);
    let fwi = fwi(isi, bui);

    Ok(FwiComponents {
        ffmc,
        dmc,
        dc,
        isi,
        bui,
        fwi,
    })
}

/// Calculate today's Fire Weather Index from raw scalars
///
/// Argument order follows the traditional `calcFWI` signature.
///
/// # Arguments
/// * `month` - Calendar month (1..=12)
/// * `temperature` - 12:00 LST temperature (°C)
/// * `humidity` - 12:00 LST relative humidity (%)
/// * `wind` - 12:00 LST wind speed (km/h)
/// * `rain` - 24-hour accumulated rainfall (mm)
/// * `previous_ffmc` / `previous_dmc` / `previous_dc` - Yesterday's codes
/// * `latitude` - Decimal degrees, positive north
///
/// # Errors
/// Same as [`calculate`].
#[expect(
    clippy::too_many_arguments,
    reason = "Mirrors the published calcFWI signature"
)]
pub fn calc_fwi(
    month: u32,
    temperature: f64,
    humidity: f64,
    wind: f64,
    rain: f64,
    previous_ffmc: f64,
    previous_dmc: f64,
    previous_dc: f64,
    latitude: f64,
) -> Result<f64, FwiError> {
    let observation = WeatherObservation {
        temperature: temperature.into(),
        humidity: humidity.into(),
        wind_speed: wind.into(),
        rain: rain.into(),
    };
    let previous = MoistureCodes::new(previous_ffmc, previous_dmc, previous_dc);

    calculate(&observation, previous, latitude, month).map(|components| components.fwi)
}
