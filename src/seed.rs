//! Sample data seeding for demo deployments.
//!
//! Each table is seeded only while it is empty, so restarting the service
//! never duplicates sample rows.

use std::ops::RangeInclusive;

use anyhow::Result;
use chrono::{Duration, Utc};
use rand::Rng;
use sqlx::SqlitePool;

use crate::{
    models::{round2, NewWeatherObservation, SensorType},
    store::{self, Table},
};

// ---

pub const SENSOR_SAMPLE_ROWS: usize = 50;
pub const WEATHER_SAMPLE_ROWS: usize = 30;

/// Timestamps are back-dated by up to a week.
const MAX_BACKDATE_HOURS: i64 = 168;

const TEMPERATURE_RANGE: RangeInclusive<f64> = 15.0..=35.0;
const HUMIDITY_RANGE: RangeInclusive<f64> = 40.0..=90.0;
const RAINFALL_RANGE: RangeInclusive<f64> = 0.0..=50.0;
const WIND_SPEED_RANGE: RangeInclusive<f64> = 0.0..=25.0;

/// (soil_type, ph_level, temperature, rainfall, recommended_crop, confidence)
pub const REFERENCE_RECOMMENDATIONS: [(&str, f64, f64, f64, &str, f64); 5] = [
    ("clay", 6.5, 25.0, 120.0, "Rice", 0.85),
    ("sandy", 7.0, 28.0, 60.0, "Maize", 0.78),
    ("loamy", 6.8, 22.0, 100.0, "Wheat", 0.82),
    ("clay", 7.2, 30.0, 80.0, "Cotton", 0.75),
    ("sandy", 6.0, 20.0, 150.0, "Sugarcane", 0.88),
];

/// Row counts written by one seeding pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    pub sensor_rows: usize,
    pub weather_rows: usize,
    pub recommendation_rows: usize,
}

/// Plausible value range for a simulated reading of `sensor_type`.
pub fn sample_range(sensor_type: SensorType) -> RangeInclusive<f64> {
    // ---
    match sensor_type {
        SensorType::SoilMoisture => 20.0..=80.0,
        SensorType::Temperature => TEMPERATURE_RANGE,
        SensorType::Humidity => HUMIDITY_RANGE,
        SensorType::PhLevel => 5.0..=8.5,
    }
}

/// Populate every empty table with sample rows.
///
/// Tables that already hold data are left untouched.
pub async fn seed_sample_data(pool: &SqlitePool) -> Result<SeedReport> {
    // ---
    let report = SeedReport {
        sensor_rows: seed_sensor_data(pool).await?,
        weather_rows: seed_weather_data(pool).await?,
        recommendation_rows: seed_recommendations(pool).await?,
    };

    tracing::info!(
        "Seeding complete: {} sensor, {} weather, {} recommendation rows inserted",
        report.sensor_rows,
        report.weather_rows,
        report.recommendation_rows
    );
    Ok(report)
}

async fn seed_sensor_data(pool: &SqlitePool) -> Result<usize> {
    // ---
    let mut tx = pool.begin().await?;
    if store::count_rows(&mut *tx, Table::SensorData).await? > 0 {
        tracing::debug!("sensor_data already populated, skipping seed");
        return Ok(0);
    }

    // ThreadRng is not Send, so draw every row before the next await.
    let now = Utc::now();
    let rows: Vec<_> = {
        let mut rng = rand::thread_rng();
        (0..SENSOR_SAMPLE_ROWS)
            .map(|_| {
                let sensor_type = SensorType::ALL[rng.gen_range(0..SensorType::ALL.len())];
                let value = round2(rng.gen_range(sample_range(sensor_type)));
                let timestamp = now - Duration::hours(rng.gen_range(0..=MAX_BACKDATE_HOURS));
                (sensor_type, value, timestamp)
            })
            .collect()
    };

    for (sensor_type, value, timestamp) in rows {
        store::insert_sensor_reading(&mut *tx, sensor_type, value, timestamp).await?;
    }
    tx.commit().await?;

    Ok(SENSOR_SAMPLE_ROWS)
}

async fn seed_weather_data(pool: &SqlitePool) -> Result<usize> {
    // ---
    let mut tx = pool.begin().await?;
    if store::count_rows(&mut *tx, Table::WeatherData).await? > 0 {
        tracing::debug!("weather_data already populated, skipping seed");
        return Ok(0);
    }

    let now = Utc::now();
    let rows: Vec<NewWeatherObservation> = {
        let mut rng = rand::thread_rng();
        (0..WEATHER_SAMPLE_ROWS)
            .map(|_| NewWeatherObservation {
                temperature: round2(rng.gen_range(TEMPERATURE_RANGE)),
                humidity: round2(rng.gen_range(HUMIDITY_RANGE)),
                rainfall: round2(rng.gen_range(RAINFALL_RANGE)),
                wind_speed: round2(rng.gen_range(WIND_SPEED_RANGE)),
                timestamp: now - Duration::hours(rng.gen_range(0..=MAX_BACKDATE_HOURS)),
            })
            .collect()
    };

    for obs in &rows {
        store::insert_weather_observation(&mut *tx, obs).await?;
    }
    tx.commit().await?;

    Ok(rows.len())
}

async fn seed_recommendations(pool: &SqlitePool) -> Result<usize> {
    // ---
    let mut tx = pool.begin().await?;
    if store::count_rows(&mut *tx, Table::CropRecommendations).await? > 0 {
        tracing::debug!("crop_recommendations already populated, skipping seed");
        return Ok(0);
    }

    for (soil, ph, temp, rain, crop, confidence) in REFERENCE_RECOMMENDATIONS {
        store::insert_crop_recommendation(&mut *tx, soil, ph, temp, rain, crop, confidence).await?;
    }
    tx.commit().await?;

    Ok(REFERENCE_RECOMMENDATIONS.len())
}
