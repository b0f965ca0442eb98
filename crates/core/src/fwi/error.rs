use std::fmt;

/// Errors from the latitude/month lookup tables
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FwiError {
    /// Latitude falls in none of the table bands (outside [-90, 90] or NaN)
    InvalidLatitude {
        /// The offending latitude in decimal degrees
        latitude: f64,
    },
    /// Month is not in 1..=12
    InvalidMonth {
        /// The offending month number
        month: u32,
    },
}

impl fmt::Display for FwiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FwiError::InvalidLatitude { latitude } => {
                write!(f, "{latitude} is not a valid latitude")
            }
            FwiError::InvalidMonth { month } => write!(f, "{month} is not a valid month"),
        }
    }
}

impl std::error::Error for FwiError {}
