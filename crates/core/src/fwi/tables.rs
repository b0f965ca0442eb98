//! Latitude/month lookup tables for the DMC and DC drying terms
//!
//! # References
//! - Van Wagner, C.E. (1987). "Development and structure of the Canadian Forest
//!   Fire Weather Index System". Forestry Technical Report 35, Table 1 (effective
//!   day length) and Table 2 (day-length adjustment for DC)
//! - Lawson, B.D. & Armitage, O.B. (2008). "Weather guide for the Canadian Forest
//!   Fire Danger Rating System", equatorial and southern hemisphere adjustments

use super::error::FwiError;

/// Effective day length (hours) for latitudes around 46°N
const DAY_LENGTH_46N: [f64; 12] = [
    6.5, 7.5, 9.0, 12.8, 13.9, 13.9, 12.4, 10.9, 9.4, 8.0, 7.0, 6.0,
];
/// Effective day length (hours) for latitudes around 20°N
const DAY_LENGTH_20N: [f64; 12] = [7.9, 8.4, 8.9, 9.5, 9.9, 10.2, 10.1, 9.7, 9.1, 8.6, 8.1, 7.8];
/// Effective day length (hours) for latitudes around 20°S
const DAY_LENGTH_20S: [f64; 12] = [10.1, 9.6, 9.1, 8.5, 8.1, 7.8, 7.9, 8.3, 8.9, 9.4, 9.9, 10.2];
/// Effective day length (hours) for latitudes around 40°S
const DAY_LENGTH_40S: [f64; 12] = [
    11.5, 10.5, 9.2, 7.9, 6.8, 6.2, 6.5, 7.4, 8.7, 10.0, 11.2, 11.8,
];

/// DC day-length adjustment, northern hemisphere
const DRYING_FACTOR_NORTH: [f64; 12] = [
    -1.6, -1.6, -1.6, 0.9, 3.8, 5.8, 6.4, 5.0, 2.4, 0.4, -1.6, -1.6,
];
/// DC day-length adjustment, southern hemisphere (northern table shifted six months)
const DRYING_FACTOR_SOUTH: [f64; 12] = [
    6.4, 5.0, 2.4, 0.4, -1.6, -1.6, -1.6, -1.6, -1.6, 0.9, 3.8, 5.8,
];

/// Map a calendar month (1..=12) onto a table index
fn month_index(month: u32) -> Result<usize, FwiError> {
    match month {
        1..=12 => Ok((month - 1) as usize),
        _ => Err(FwiError::InvalidMonth { month }),
    }
}

/// Effective day length used by the DMC drying term
///
/// Four latitude bands: (33, 90], (0, 33], (-30, 0] and [-90, -30].
///
/// # Arguments
/// * `latitude` - Decimal degrees, positive north
/// * `month` - Calendar month (1..=12)
///
/// # Returns
/// Effective day length (hours)
///
/// # Errors
/// `FwiError::InvalidLatitude` when the latitude is outside every band
/// (including NaN), `FwiError::InvalidMonth` when month is not 1..=12.
pub fn day_length(latitude: f64, month: u32) -> Result<f64, FwiError> {
    let table = match latitude {
        l if l > 33.0 && l <= 90.0 => &DAY_LENGTH_46N,
        l if l > 0.0 && l <= 33.0 => &DAY_LENGTH_20N,
        l if l > -30.0 && l <= 0.0 => &DAY_LENGTH_20S,
        l if (-90.0..=-30.0).contains(&l) => &DAY_LENGTH_40S,
        _ => return Err(FwiError::InvalidLatitude { latitude }),
    };
    Ok(table[month_index(month)?])
}

/// Day-length drying factor used by the DC drying term
///
/// Two bands split at the equator: (0, 90] north, [-90, 0] south. Latitudes
/// outside [-90, 90] fail the same way as [`day_length`].
///
/// # Arguments
/// * `latitude` - Decimal degrees, positive north
/// * `month` - Calendar month (1..=12)
///
/// # Errors
/// `FwiError::InvalidLatitude` when the latitude is outside [-90, 90]
/// (including NaN), `FwiError::InvalidMonth` when month is not 1..=12.
pub fn drying_factor(latitude: f64, month: u32) -> Result<f64, FwiError> {
    let table = match latitude {
        l if l > 0.0 && l <= 90.0 => &DRYING_FACTOR_NORTH,
        l if (-90.0..=0.0).contains(&l) => &DRYING_FACTOR_SOUTH,
        _ => return Err(FwiError::InvalidLatitude { latitude }),
    };
    Ok(table[month_index(month)?])
}
