//! The three fuel moisture codes of the Canadian FWI System
//!
//! Each code carries over from the previous day and is updated from a single
//! 12:00 LST observation:
//! - FFMC: fine surface litter, ~2/3 day timelag
//! - DMC: loosely compacted duff, ~15 day timelag
//! - DC: deep compact organic layer, ~52 day timelag
//!
//! # Scientific References
//! - Van Wagner, C.E. & Pickett, T.L. (1985). "Equations and FORTRAN program for
//!   the Canadian Forest Fire Weather Index System". Forestry Technical Report 33
//! - Van Wagner, C.E. (1987). "Development and structure of the Canadian Forest
//!   Fire Weather Index System". Forestry Technical Report 35

use super::error::FwiError;
use super::tables::{day_length, drying_factor};

/// FFMC scale factor relating code to moisture content
const FFMC_COEFFICIENT: f64 = 147.2;

/// Convert an FFMC value to fine fuel moisture content (%)
///
/// Van Wagner & Pickett (1985), Eq. 1
#[inline]
pub(crate) fn ffmc_to_moisture(ffmc: f64) -> f64 {
    FFMC_COEFFICIENT * (101.0 - ffmc) / (59.5 + ffmc)
}

/// Calculate today's Fine Fuel Moisture Code
///
/// Rain above 0.5 mm wets the litter first (capped at 250% moisture), then the
/// fuel dries towards `ed` or wets towards `ew`; between the two equilibria the
/// moisture content is unchanged.
///
/// # Arguments
/// * `temperature` - 12:00 LST temperature (°C)
/// * `humidity` - 12:00 LST relative humidity (%), clipped to 100
/// * `wind` - 12:00 LST wind speed (km/h)
/// * `rain` - 24-hour accumulated rainfall (mm)
/// * `previous_ffmc` - Yesterday's FFMC
///
/// # Returns
/// Today's FFMC
///
/// # References
/// Van Wagner & Pickett (1985), Eqs. 1-10
pub fn ffmc(temperature: f64, humidity: f64, wind: f64, rain: f64, previous_ffmc: f64) -> f64 {
    let rh = humidity.min(100.0);
    let mut mo = ffmc_to_moisture(previous_ffmc);

    if rain > 0.5 {
        let rf = rain - 0.5;

        // Eq. 3a, plus the Eq. 3b correction for already saturated litter
        let mut mr = mo + 42.5 * rf * (-100.0 / (251.0 - mo)).exp() * (1.0 - (-6.93 / rf).exp());
        if mo > 150.0 {
            mr += 0.0015 * (mo - 150.0).powf(2.0) * rf.powf(0.5);
        }

        mo = mr.min(250.0);
    }

    // Equilibrium moisture content for drying (Eq. 4)
    let ed = 0.942 * rh.powf(0.679)
        + 11.0 * ((rh - 100.0) / 10.0).exp()
        + 0.18 * (21.1 - temperature) * (1.0 - (-0.115 * rh).exp());

    let m = if mo > ed {
        // Drying rate (Eqs. 6a, 6b)
        let ko = 0.424 * (1.0 - (rh / 100.0).powf(1.7))
            + 0.0694 * wind.powf(0.5) * (1.0 - (rh / 100.0).powf(8.0));
        let kd = ko * 0.581 * (0.0365 * temperature).exp();

        ed + (mo - ed) * 10f64.powf(-kd)
    } else {
        // Equilibrium moisture content for wetting (Eq. 5)
        let ew = 0.618 * rh.powf(0.753)
            + 10.0 * ((rh - 100.0) / 10.0).exp()
            + 0.18 * (21.1 - temperature) * (1.0 - (-0.115 * rh).exp());

        if mo < ew {
            // Wetting rate (Eqs. 7a, 7b)
            let k1 = 0.424 * (1.0 - ((100.0 - rh) / 100.0).powf(1.7))
                + 0.0694 * wind.powf(0.5) * (1.0 - ((100.0 - rh) / 100.0).powf(8.0));
            let kw = k1 * 0.581 * (0.0365 * temperature).exp();

            ew - (ew - mo) * 10f64.powf(-kw)
        } else {
            mo
        }
    };

    59.5 * (250.0 - m) / (FFMC_COEFFICIENT + m)
}

/// Calculate today's Duff Moisture Code
///
/// Rain above 1.5 mm first reduces yesterday's code; drying only happens above
/// -1.1°C and scales with the effective day length for the latitude band.
///
/// # Arguments
/// * `temperature` - 12:00 LST temperature (°C)
/// * `humidity` - 12:00 LST relative humidity (%), clipped to 100
/// * `rain` - 24-hour accumulated rainfall (mm)
/// * `previous_dmc` - Yesterday's DMC
/// * `latitude` - Decimal degrees, positive north
/// * `month` - Calendar month (1..=12)
///
/// # Returns
/// Today's DMC
///
/// # Errors
/// Propagates [`day_length`] failures for an out-of-band latitude or bad month.
///
/// # References
/// Van Wagner & Pickett (1985), Eqs. 11-17
pub fn dmc(
    temperature: f64,
    humidity: f64,
    rain: f64,
    previous_dmc: f64,
    latitude: f64,
    month: u32,
) -> Result<f64, FwiError> {
    let rh = humidity.min(100.0);
    let mut dmc = previous_dmc;

    if rain > 1.5 {
        let re = 0.92 * rain - 1.27;
        let mo = 20.0 + (5.6348 - dmc / 43.43).exp();

        // Slope of the rain/moisture relation depends on how dry the duff was
        let b = match dmc {
            d if d <= 33.0 => 100.0 / (0.5 + 0.3 * d),
            d if d <= 65.0 => 14.0 - 1.3 * d.ln(),
            d => 6.2 * d.ln() - 17.2,
        };

        let mr = mo + 1000.0 * re / (48.77 + b * re);
        let pr = 244.72 - 43.43 * (mr - 20.0).ln();

        dmc = pr.max(0.0);
    }

    let k = if temperature > -1.1 {
        let le = day_length(latitude, month)?;
        1.894 * (temperature + 1.1) * (100.0 - rh) * le * 0.000_001
    } else {
        0.0
    };

    Ok(dmc + 100.0 * k)
}

/// Calculate today's Drought Code
///
/// Rain above 2.8 mm first reduces yesterday's code through its moisture
/// equivalent; potential evapotranspiration is floored at zero.
///
/// # Arguments
/// * `temperature` - 12:00 LST temperature (°C)
/// * `rain` - 24-hour accumulated rainfall (mm)
/// * `previous_dc` - Yesterday's DC
/// * `latitude` - Decimal degrees, positive north
/// * `month` - Calendar month (1..=12)
///
/// # Returns
/// Today's DC
///
/// # Errors
/// Propagates [`drying_factor`] failures for an out-of-band latitude or bad month.
///
/// # References
/// Van Wagner & Pickett (1985), Eqs. 18-23
pub fn dc(
    temperature: f64,
    rain: f64,
    previous_dc: f64,
    latitude: f64,
    month: u32,
) -> Result<f64, FwiError> {
    let mut dc = previous_dc;

    if rain > 2.8 {
        let rd = 0.83 * rain - 1.27;
        let qo = 800.0 * (-dc / 400.0).exp();
        let qr = qo + 3.937 * rd;
        let dr = 400.0 * (800.0 / qr).ln();

        dc = dr.max(0.0);
    }

    let lf = drying_factor(latitude, month)?;

    let v = if temperature > -2.8 {
        0.36 * (temperature + 2.8) + lf
    } else {
        lf
    };

    Ok(dc + 0.5 * v.max(0.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_ffmc_reference_value() {
        assert_relative_eq!(
            ffmc(17.0, 42.0, 25.0, 0.0, 85.0),
            87.69298009277445,
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_ffmc_rain_wets_fuel() {
        let dry = ffmc(17.0, 42.0, 25.0, 0.0, 85.0);
        let wet = ffmc(17.0, 42.0, 25.0, 12.0, 85.0);
        assert!(wet < dry, "Rain should lower FFMC: dry={dry}, wet={wet}");
    }

    #[test]
    fn test_ffmc_saturated_litter_correction() {
        // Previous FFMC of 10 means mo > 150, exercising the extra rain term.
        // Heavy rain on saturated litter is capped at 250% moisture, so the
        // result stays within the code's range.
        let code = ffmc(10.0, 95.0, 5.0, 40.0, 10.0);
        assert!((0.0..=101.0).contains(&code), "FFMC out of range: {code}");
    }

    #[test]
    fn test_ffmc_humidity_clipped() {
        assert_eq!(
            ffmc(12.0, 130.0, 10.0, 0.0, 80.0),
            ffmc(12.0, 100.0, 10.0, 0.0, 80.0)
        );
    }

    #[test]
    fn test_ffmc_wetting_regime() {
        // Very dry litter under humid air picks up moisture
        let code = ffmc(10.0, 98.0, 5.0, 0.0, 99.0);
        assert!(code < 99.0, "FFMC should drop in humid air: {code}");
    }

    #[test]
    fn test_dmc_reference_value() {
        let value = dmc(17.0, 42.0, 0.0, 6.0, 45.98, 4).unwrap();
        assert_relative_eq!(value, 8.545051136, max_relative = 1e-12);
    }

    #[test]
    fn test_dmc_no_drying_below_threshold() {
        // Cold day, no rain: the code carries over unchanged
        assert_eq!(dmc(-5.0, 50.0, 0.0, 20.0, 45.98, 1), Ok(20.0));
    }

    #[test]
    fn test_dmc_rain_branches() {
        for previous in [10.0, 50.0, 120.0] {
            let dried = dmc(20.0, 40.0, 0.0, previous, 45.0, 7).unwrap();
            let rained = dmc(20.0, 40.0, 15.0, previous, 45.0, 7).unwrap();
            assert!(
                rained < dried,
                "Rain should reduce DMC from {previous}: {rained} vs {dried}"
            );
            assert!(rained >= 0.0);
        }
    }

    #[test]
    fn test_dmc_invalid_latitude() {
        assert_eq!(
            dmc(17.0, 42.0, 0.0, 6.0, 95.0, 4),
            Err(FwiError::InvalidLatitude { latitude: 95.0 })
        );
    }

    #[test]
    fn test_dc_reference_value() {
        let value = dc(17.0, 0.0, 15.0, 45.98, 4).unwrap();
        assert_relative_eq!(value, 19.014, max_relative = 1e-12);
    }

    #[test]
    fn test_dc_rain_floors_at_zero() {
        let value = dc(-10.0, 200.0, 5.0, 45.0, 1).unwrap();
        assert_eq!(value, 0.0);
    }

    #[test]
    fn test_dc_invalid_latitude() {
        assert_eq!(
            dc(17.0, 0.0, 15.0, -100.0, 4),
            Err(FwiError::InvalidLatitude { latitude: -100.0 })
        );
    }
}
