//! Static conversion tables for the temperature and distance groups.
//!
//! Distances are stored relative to miles; temperatures are converted through
//! Celsius. Neither table carries any state.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TemperatureScale {
    Celsius,
    Fahrenheit,
    Kelvin,
}

impl TemperatureScale {
    pub const ALL: [TemperatureScale; 3] = [
        TemperatureScale::Celsius,
        TemperatureScale::Fahrenheit,
        TemperatureScale::Kelvin,
    ];

    /// Converts a reading on this scale to Celsius.
    pub fn to_celsius(self, value: f64) -> f64 {
        match self {
            TemperatureScale::Celsius => value,
            TemperatureScale::Fahrenheit => (value - 32.0) * 5.0 / 9.0,
            TemperatureScale::Kelvin => value - 273.15,
        }
    }

    /// Converts a Celsius reading to this scale.
    pub fn from_celsius(self, celsius: f64) -> f64 {
        match self {
            TemperatureScale::Celsius => celsius,
            TemperatureScale::Fahrenheit => celsius * 9.0 / 5.0 + 32.0,
            TemperatureScale::Kelvin => celsius + 273.15,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            TemperatureScale::Celsius => "°C",
            TemperatureScale::Fahrenheit => "°F",
            TemperatureScale::Kelvin => "K",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DistanceUnit {
    Miles,
    Kilometers,
    Meters,
    Feet,
    Yards,
}

impl DistanceUnit {
    pub const ALL: [DistanceUnit; 5] = [
        DistanceUnit::Miles,
        DistanceUnit::Kilometers,
        DistanceUnit::Meters,
        DistanceUnit::Feet,
        DistanceUnit::Yards,
    ];

    /// How many of this unit make up one mile.
    pub fn per_mile(self) -> f64 {
        match self {
            DistanceUnit::Miles => 1.0,
            DistanceUnit::Kilometers => 1.609344,
            DistanceUnit::Meters => 1609.344,
            DistanceUnit::Feet => 5280.0,
            DistanceUnit::Yards => 1760.0,
        }
    }

    pub fn to_miles(self, value: f64) -> f64 {
        value / self.per_mile()
    }

    pub fn from_miles(self, miles: f64) -> f64 {
        miles * self.per_mile()
    }

    pub fn symbol(self) -> &'static str {
        match self {
            DistanceUnit::Miles => "mi",
            DistanceUnit::Kilometers => "km",
            DistanceUnit::Meters => "m",
            DistanceUnit::Feet => "ft",
            DistanceUnit::Yards => "yd",
        }
    }
}
