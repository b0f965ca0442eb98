use fire_risk_core::fwi::{self, FwiComponents, MoistureCodes};
use fire_risk_core::WeatherObservation;

use crate::error::{DefaultFireRiskError, FireRiskErrorCode};
use crate::helpers::{clear_last_error, track_error, track_result};

/// One day of noon weather plus yesterday's codes.
///
/// Field order follows the traditional `calcFWI` argument list.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FwiInput {
    /// Calendar month (1-12)
    pub month: u32,
    /// Noon temperature (°C)
    pub temperature: f64,
    /// Noon relative humidity (%)
    pub humidity: f64,
    /// Noon wind speed (km/h)
    pub wind: f64,
    /// 24-hour rainfall (mm)
    pub rain: f64,
    /// Yesterday's Fine Fuel Moisture Code (85.0 at season start)
    pub previous_ffmc: f64,
    /// Yesterday's Duff Moisture Code (6.0 at season start)
    pub previous_dmc: f64,
    /// Yesterday's Drought Code (15.0 at season start)
    pub previous_dc: f64,
    /// Station latitude in decimal degrees, positive north
    pub latitude: f64,
}

/// Today's FWI System components.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FwiOutput {
    pub ffmc: f64,
    pub dmc: f64,
    pub dc: f64,
    pub isi: f64,
    pub bui: f64,
    pub fwi: f64,
}

impl From<FwiComponents> for FwiOutput {
    fn from(c: FwiComponents) -> Self {
        FwiOutput {
            ffmc: c.ffmc,
            dmc: c.dmc,
            dc: c.dc,
            isi: c.isi,
            bui: c.bui,
            fwi: c.fwi,
        }
    }
}

/// Calculate today's FWI System components.
///
/// Returns
/// - `FireRiskErrorCode::Ok` (0): success, `out` holds today's components
/// - `FireRiskErrorCode::NullPointer`: `input` or `out` is null
/// - `FireRiskErrorCode::InvalidLatitude`: latitude outside [-90, 90] or NaN
/// - `FireRiskErrorCode::InvalidMonth`: month outside 1-12
///
/// `out` is left untouched on failure.
///
/// # Safety
/// - `input` must point to a valid `FwiInput`.
/// - `out` must point to writable memory for one `FwiOutput`.
///
/// Example (C)
/// ```c
/// FwiInput in = { 4, 17.0, 42.0, 25.0, 0.0, 85.0, 6.0, 15.0, 45.98 };
/// FwiOutput out;
/// if (fire_risk_calculate(&in, &out) == Ok) {
///     printf("FWI %.2f\n", out.fwi);
/// }
/// ```
#[no_mangle]
pub unsafe extern "C" fn fire_risk_calculate(
    input: *const FwiInput,
    out: *mut FwiOutput,
) -> FireRiskErrorCode {
    if input.is_null() {
        return track_error(&DefaultFireRiskError::null_pointer("input"));
    }
    if out.is_null() {
        return track_error(&DefaultFireRiskError::null_pointer("out"));
    }

    // SAFETY: checked non-null above; caller guarantees validity.
    let input = unsafe { *input };

    let observation = WeatherObservation {
        temperature: input.temperature.into(),
        humidity: input.humidity.into(),
        wind_speed: input.wind.into(),
        rain: input.rain.into(),
    };
    let previous = MoistureCodes::new(input.previous_ffmc, input.previous_dmc, input.previous_dc);

    let result = fwi::calculate(&observation, previous, input.latitude, input.month)
        .map_err(DefaultFireRiskError::from);

    match track_result(result) {
        Ok(components) => {
            unsafe {
                *out = components.into();
            }
            clear_last_error();
            FireRiskErrorCode::Ok
        }
        Err(code) => code,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::fire_risk_get_last_error;
    use std::ffi::CStr;
    use std::ptr;

    fn april_input() -> FwiInput {
        FwiInput {
            month: 4,
            temperature: 17.0,
            humidity: 42.0,
            wind: 25.0,
            rain: 0.0,
            previous_ffmc: 85.0,
            previous_dmc: 6.0,
            previous_dc: 15.0,
            latitude: 45.98,
        }
    }

    #[test]
    fn test_calculate_reference_day() {
        let mut out = FwiOutput::default();
        let code = unsafe { fire_risk_calculate(&april_input(), &mut out) };

        assert_eq!(code, FireRiskErrorCode::Ok);
        assert!((out.ffmc - 87.69298009277445).abs() < 1e-9);
        assert!((out.dmc - 8.545051136).abs() < 1e-9);
        assert!((out.dc - 19.014).abs() < 1e-9);
        assert!((out.fwi - 10.096371392382368).abs() < 1e-9);
        assert!(fire_risk_get_last_error().is_null());
    }

    #[test]
    fn test_calculate_null_pointers() {
        let mut out = FwiOutput::default();
        let code = unsafe { fire_risk_calculate(ptr::null(), &mut out) };
        assert_eq!(code, FireRiskErrorCode::NullPointer);

        let code = unsafe { fire_risk_calculate(&april_input(), ptr::null_mut()) };
        assert_eq!(code, FireRiskErrorCode::NullPointer);
        let msg = unsafe { CStr::from_ptr(fire_risk_get_last_error()) };
        assert_eq!(msg.to_str().unwrap(), "Parameter 'out' cannot be null");
    }

    #[test]
    fn test_calculate_invalid_latitude_leaves_output() {
        let mut out = FwiOutput::default();
        let input = FwiInput {
            latitude: 91.0,
            ..april_input()
        };
        let code = unsafe { fire_risk_calculate(&input, &mut out) };

        assert_eq!(code, FireRiskErrorCode::InvalidLatitude);
        assert_eq!(out, FwiOutput::default());
        assert_eq!(
            crate::error::fire_risk_get_last_error_code(),
            FireRiskErrorCode::InvalidLatitude
        );
    }

    #[test]
    fn test_calculate_invalid_month() {
        let mut out = FwiOutput::default();
        let input = FwiInput {
            month: 0,
            ..april_input()
        };
        let code = unsafe { fire_risk_calculate(&input, &mut out) };
        assert_eq!(code, FireRiskErrorCode::InvalidMonth);
    }
}
