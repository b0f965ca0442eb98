//! Fire behaviour indices derived from the moisture codes
//!
//! - ISI: expected rate of spread, from wind and FFMC
//! - BUI: fuel available for combustion, from DMC and DC
//! - FWI: fire intensity, from ISI and BUI
//!
//! # References
//! Van Wagner & Pickett (1985), Eqs. 24-30

use super::codes::ffmc_to_moisture;

/// Calculate today's Initial Spread Index
///
/// # Arguments
/// * `wind` - 12:00 LST wind speed (km/h)
/// * `ffmc` - Today's FFMC
///
/// # Returns
/// ISI (dimensionless, >= 0 for valid FFMC)
pub fn isi(wind: f64, ffmc: f64) -> f64 {
    let wind_function = (0.05039 * wind).exp();

    let m = ffmc_to_moisture(ffmc);
    let fine_fuel_function = 91.9 * (-0.1386 * m).exp() * (1.0 + m.powf(5.31) / 49_300_000.0);

    0.208 * wind_function * fine_fuel_function
}

/// Calculate today's Buildup Index
///
/// # Arguments
/// * `dmc` - Today's Duff Moisture Code
/// * `dc` - Today's Drought Code
///
/// # Returns
/// BUI, floored at zero
pub fn bui(dmc: f64, dc: f64) -> f64 {
    let u = if dmc <= 0.4 * dc {
        0.8 * dmc * dc / (dmc + 0.4 * dc)
    } else {
        dmc - (1.0 - 0.8 * dc / (dmc + 0.4 * dc)) * (0.92 + (0.0114 * dmc).powf(1.7))
    };

    u.max(0.0)
}

/// Calculate today's Fire Weather Index
///
/// # Arguments
/// * `isi` - Today's Initial Spread Index
/// * `bui` - Today's Buildup Index
///
/// # Returns
/// FWI. Intermediate values `B <= 1` are returned as-is.
pub fn fwi(isi: f64, bui: f64) -> f64 {
    // Duff moisture function
    let fd = if bui <= 80.0 {
        0.626 * bui.powf(0.809) + 2.0
    } else {
        1000.0 / (25.0 + 108.64 * (-0.023 * bui).exp())
    };

    let b = 0.1 * isi * fd;

    if b > 1.0 {
        (2.72 * (0.434 * b.ln()).powf(0.647)).exp()
    } else {
        b
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_isi_reference_value() {
        assert_relative_eq!(
            isi(25.0, 87.69298009277445),
            10.853661073655068,
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_isi_increases_with_wind() {
        assert!(isi(40.0, 88.0) > isi(10.0, 88.0));
    }

    #[test]
    fn test_bui_reference_value() {
        assert_relative_eq!(
            bui(8.545051136, 19.014),
            8.490426535837184,
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_bui_dmc_dominated_branch() {
        // dmc > 0.4 * dc selects the second branch
        let value = bui(60.0, 100.0);
        assert!(value > 0.0 && value <= 60.0, "BUI was {value}");
    }

    #[test]
    fn test_bui_floors_at_zero() {
        // 0/0 in the first branch is NaN, which the floor discards
        assert_eq!(bui(0.0, 0.0), 0.0);
        assert_eq!(bui(0.0, 50.0), 0.0);
    }

    #[test]
    fn test_fwi_reference_value() {
        assert_relative_eq!(
            fwi(10.853661073655068, 8.490426535837184),
            10.096371392382368,
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_fwi_small_b_returned_unchanged() {
        // ISI 0.1 and BUI 10 give B = 0.1 * 0.1 * fD < 1
        let fd = 0.626 * 10f64.powf(0.809) + 2.0;
        assert_eq!(fwi(0.1, 10.0), 0.1 * 0.1 * fd);
    }

    #[test]
    fn test_fwi_high_bui_branch() {
        assert!(fwi(10.0, 200.0) > fwi(10.0, 80.0));
    }
}
