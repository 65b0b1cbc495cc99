//! Rule-based crop suitability scoring.
//!
//! Each known soil type carries optimal inclusive ranges for pH, temperature
//! and rainfall plus the crops suited to it. The confidence score is the sum
//! of fixed weights for the ranges the input falls inside.

use serde::{Deserialize, Serialize};

use crate::{models::round2, AppError};

// ---

const PH_WEIGHT: f64 = 0.4;
const TEMPERATURE_WEIGHT: f64 = 0.3;
const RAINFALL_WEIGHT: f64 = 0.3;

/// Closed interval `[low, high]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OptimalRange {
    pub low: f64,
    pub high: f64,
}

impl OptimalRange {
    const fn new(low: f64, high: f64) -> Self {
        OptimalRange { low, high }
    }

    pub fn contains(&self, value: f64) -> bool {
        self.low <= value && value <= self.high
    }
}

/// Growing conditions and suited crops for one soil type.
#[derive(Debug, Clone, Copy)]
pub struct SoilProfile {
    pub soil_type: &'static str,
    pub ph: OptimalRange,
    pub temperature: OptimalRange,
    pub rainfall: OptimalRange,
    pub crops: &'static [&'static str],
}

pub const SOIL_PROFILES: &[SoilProfile] = &[
    SoilProfile {
        soil_type: "clay",
        ph: OptimalRange::new(6.0, 7.0),
        temperature: OptimalRange::new(20.0, 30.0),
        rainfall: OptimalRange::new(100.0, 200.0),
        crops: &["Rice", "Wheat"],
    },
    SoilProfile {
        soil_type: "sandy",
        ph: OptimalRange::new(6.5, 7.5),
        temperature: OptimalRange::new(25.0, 35.0),
        rainfall: OptimalRange::new(50.0, 150.0),
        crops: &["Maize", "Groundnut"],
    },
    SoilProfile {
        soil_type: "loamy",
        ph: OptimalRange::new(6.0, 7.5),
        temperature: OptimalRange::new(15.0, 30.0),
        rainfall: OptimalRange::new(75.0, 175.0),
        crops: &["Wheat", "Sugarcane", "Cotton"],
    },
];

/// Look up the profile for `soil_type`.
pub fn soil_profile(soil_type: &str) -> Option<&'static SoilProfile> {
    SOIL_PROFILES.iter().find(|p| p.soil_type == soil_type)
}

/// Request body of `POST /api/recommend_crop`.
///
/// Every field is optional on the wire so an unknown soil type is reported
/// as such even when the measurements are absent.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RecommendRequest {
    pub soil_type: Option<String>,
    pub ph_level: Option<f64>,
    pub temperature: Option<f64>,
    pub rainfall: Option<f64>,
}

/// Scoring result returned to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub recommended_crops: Vec<String>,
    pub confidence_score: f64,
    pub soil_type: String,
}

/// Score how well the conditions suit `soil_type`.
///
/// The full crop list of the soil type is returned regardless of which range
/// checks passed. Unknown soil types are rejected as invalid input.
pub fn recommend(
    soil_type: &str,
    ph: f64,
    temperature: f64,
    rainfall: f64,
) -> Result<Recommendation, AppError> {
    // ---
    let profile = soil_profile(soil_type).ok_or_else(invalid_soil_type)?;

    let mut score = 0.0;
    if profile.ph.contains(ph) {
        score += PH_WEIGHT;
    }
    if profile.temperature.contains(temperature) {
        score += TEMPERATURE_WEIGHT;
    }
    if profile.rainfall.contains(rainfall) {
        score += RAINFALL_WEIGHT;
    }

    Ok(Recommendation {
        recommended_crops: profile.crops.iter().map(|c| c.to_string()).collect(),
        confidence_score: round2(score),
        soil_type: soil_type.to_string(),
    })
}

fn invalid_soil_type() -> AppError {
    AppError::InvalidInput("Invalid soil type".to_string())
}

fn required(value: Option<f64>, field: &str) -> Result<f64, AppError> {
    value.ok_or_else(|| AppError::InvalidInput(format!("Missing field: {}", field)))
}

impl RecommendRequest {
    /// Validate the soil type first, then require the three measurements.
    pub fn score(&self) -> Result<Recommendation, AppError> {
        // ---
        let soil_type = self.soil_type.as_deref().unwrap_or_default();
        soil_profile(soil_type).ok_or_else(invalid_soil_type)?;

        let ph = required(self.ph_level, "ph_level")?;
        let temperature = required(self.temperature, "temperature")?;
        let rainfall = required(self.rainfall, "rainfall")?;

        recommend(soil_type, ph, temperature, rainfall)
    }
}
