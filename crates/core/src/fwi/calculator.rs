use super::{calculate, FwiComponents, FwiError, MoistureCodes};
use crate::core_types::WeatherObservation;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Runs the FWI System day by day for one station
///
/// Owns the station latitude and the codes carried between days. A failed
/// step leaves the carried codes untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FwiCalculator {
    latitude: f64,
    codes: MoistureCodes,
    days: u32,
}

impl FwiCalculator {
    /// Start a new season at `latitude` from the standard start-up codes
    pub fn new(latitude: f64) -> Self {
        Self::with_codes(latitude, MoistureCodes::STARTUP)
    }

    /// Resume from previously computed codes
    pub fn with_codes(latitude: f64, codes: MoistureCodes) -> Self {
        FwiCalculator {
            latitude,
            codes,
            days: 0,
        }
    }

    /// Station latitude (decimal degrees)
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Codes that will be used as "yesterday" by the next step
    pub fn codes(&self) -> MoistureCodes {
        self.codes
    }

    /// Number of days successfully computed
    pub fn days(&self) -> u32 {
        self.days
    }

    /// Compute today's components and carry the codes forward
    ///
    /// # Errors
    /// `FwiError::InvalidLatitude` / `FwiError::InvalidMonth` from the lookup
    /// tables; the carried codes are not advanced.
    pub fn step(
        &mut self,
        observation: &WeatherObservation,
        month: u32,
    ) -> Result<FwiComponents, FwiError> {
        let components = calculate(observation, self.codes, self.latitude, month)
            .inspect_err(|e| warn!("FWI step failed at day {}: {}", self.days, e))?;

        self.codes = components.codes();
        self.days += 1;

        debug!(
            "FWI day {}: FFMC={:.2} DMC={:.2} DC={:.2} ISI={:.2} BUI={:.2} FWI={:.2}",
            self.days,
            components.ffmc,
            components.dmc,
            components.dc,
            components.isi,
            components.bui,
            components.fwi
        );

        Ok(components)
    }
}
