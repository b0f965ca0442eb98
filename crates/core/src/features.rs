//! Model input assembly
//!
//! The burned-area models were fitted on the Montesinho park dataset, where
//! each row is a 9×9 park grid cell, a date, four FWI components and the raw
//! weather. This module builds that row, in the same column order, from a
//! location, a date, an observation and the day's [`FwiComponents`].

use crate::core_types::WeatherObservation;
use crate::fwi::FwiComponents;
use serde::{Deserialize, Serialize};

/// Number of columns in a [`FeatureVector`]
pub const FEATURE_COUNT: usize = 12;

/// Geographic box divided into a 9×9 grid
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridBounds {
    /// Western edge longitude
    pub west: f64,
    /// Eastern edge longitude
    pub east: f64,
    /// Southern edge latitude
    pub south: f64,
    /// Northern edge latitude
    pub north: f64,
}

impl GridBounds {
    /// Cells along each axis
    pub const DIVISIONS: f64 = 9.0;

    /// Montesinho natural park, northeast Portugal
    pub const MONTESINHO: GridBounds = GridBounds {
        west: -7.182288,
        east: -6.515598,
        south: 41.732416,
        north: 41.992531,
    };

    /// Grid coordinates `(x, y)` of a point
    ///
    /// Truncates towards zero; points outside the box map to coordinates
    /// outside 0..=9 rather than being clamped.
    pub fn cell(&self, longitude: f64, latitude: f64) -> (i32, i32) {
        let x = Self::DIVISIONS * (longitude - self.west) / (self.east - self.west);
        let y = Self::DIVISIONS * (latitude - self.south) / (self.north - self.south);
        (x as i32, y as i32)
    }

    /// Whether a point lies inside the box (edges inclusive)
    pub fn contains(&self, longitude: f64, latitude: f64) -> bool {
        (self.west..=self.east).contains(&longitude)
            && (self.south..=self.north).contains(&latitude)
    }
}

impl Default for GridBounds {
    fn default() -> Self {
        Self::MONTESINHO
    }
}

/// One model input row, in training column order
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    /// Grid x coordinate
    pub x: f64,
    /// Grid y coordinate
    pub y: f64,
    /// Calendar month (1..=12)
    pub month: f64,
    /// Day of month
    pub day: f64,
    /// Fine Fuel Moisture Code
    pub ffmc: f64,
    /// Duff Moisture Code
    pub dmc: f64,
    /// Drought Code
    pub dc: f64,
    /// Initial Spread Index
    pub isi: f64,
    /// Temperature (°C)
    pub temperature: f64,
    /// Relative humidity (%)
    pub humidity: f64,
    /// Wind speed (km/h)
    pub wind: f64,
    /// 24h rainfall (mm)
    pub rain: f64,
}

impl FeatureVector {
    /// Assemble a row for a point on the grid
    pub fn assemble(
        bounds: &GridBounds,
        longitude: f64,
        latitude: f64,
        month: u32,
        day: u32,
        observation: &WeatherObservation,
        components: &FwiComponents,
    ) -> Self {
        let (x, y) = bounds.cell(longitude, latitude);
        FeatureVector {
            x: f64::from(x),
            y: f64::from(y),
            month: f64::from(month),
            day: f64::from(day),
            ffmc: components.ffmc,
            dmc: components.dmc,
            dc: components.dc,
            isi: components.isi,
            temperature: *observation.temperature,
            humidity: *observation.humidity,
            wind: *observation.wind_speed,
            rain: *observation.rain,
        }
    }

    /// Columns as an array, training order
    pub fn to_array(&self) -> [f64; FEATURE_COUNT] {
        [
            self.x,
            self.y,
            self.month,
            self.day,
            self.ffmc,
            self.dmc,
            self.dc,
            self.isi,
            self.temperature,
            self.humidity,
            self.wind,
            self.rain,
        ]
    }
}

impl From<FeatureVector> for Vec<f64> {
    fn from(features: FeatureVector) -> Vec<f64> {
        features.to_array().to_vec()
    }
}
