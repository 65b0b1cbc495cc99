//! Data models for the three record tables.

use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::AppError;

// ---

/// Closed set of physical quantities a field sensor reports.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, sqlx::Type,
)]
#[serde(rename_all = "snake_case")]
#[sqlx(rename_all = "snake_case")]
pub enum SensorType {
    SoilMoisture,
    Temperature,
    Humidity,
    PhLevel,
}

impl SensorType {
    pub const ALL: [SensorType; 4] = [
        SensorType::SoilMoisture,
        SensorType::Temperature,
        SensorType::Humidity,
        SensorType::PhLevel,
    ];

    pub fn as_str(self) -> &'static str {
        // ---
        match self {
            SensorType::SoilMoisture => "soil_moisture",
            SensorType::Temperature => "temperature",
            SensorType::Humidity => "humidity",
            SensorType::PhLevel => "ph_level",
        }
    }
}

impl fmt::Display for SensorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SensorType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // ---
        SensorType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| AppError::InvalidInput(format!("Invalid sensor type: {}", s)))
    }
}

/// One row of `sensor_data`.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct SensorReading {
    // ---
    pub id: i64,
    pub sensor_type: SensorType,
    pub value: f64,
    pub timestamp: DateTime<Utc>,
}

/// Value and time of a single reading, as served by `/api/sensor_data`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct ReadingPoint {
    pub value: f64,
    pub timestamp: DateTime<Utc>,
}

/// One row of `weather_data`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct WeatherObservation {
    // ---
    pub id: i64,
    pub temperature: f64,
    pub humidity: f64,
    pub rainfall: f64,
    pub wind_speed: f64,
    pub timestamp: DateTime<Utc>,
}

/// Weather fields prior to insertion (id assigned by the store).
#[derive(Debug, Clone)]
pub struct NewWeatherObservation {
    pub temperature: f64,
    pub humidity: f64,
    pub rainfall: f64,
    pub wind_speed: f64,
    pub timestamp: DateTime<Utc>,
}

/// Static reference row of `crop_recommendations`.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct CropRecommendation {
    // ---
    pub id: i64,
    pub soil_type: String,
    pub ph_level: f64,
    pub temperature: f64,
    pub rainfall: f64,
    pub recommended_crop: String,
    pub confidence: f64,
}

/// Round to two decimal places, the precision used for every stored and
/// reported measurement.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;

    #[test]
    fn test_sensor_type_parse() {
        // ---
        assert_eq!(
            "soil_moisture".parse::<SensorType>().unwrap(),
            SensorType::SoilMoisture
        );
        assert_eq!("ph_level".parse::<SensorType>().unwrap(), SensorType::PhLevel);
        assert!("wind".parse::<SensorType>().is_err());
        assert!("".parse::<SensorType>().is_err());
    }

    #[test]
    fn test_sensor_type_serde_matches_as_str() {
        // ---
        for t in SensorType::ALL {
            let json = serde_json::to_string(&t).unwrap();
            assert_eq!(json, format!("\"{}\"", t.as_str()));
        }
    }

    #[test]
    fn test_round2() {
        // ---
        assert_eq!(round2(0.4 + 0.3), 0.7);
        assert_eq!(round2(6.666), 6.67);
        assert_eq!(round2(1.0), 1.0);
    }
}
