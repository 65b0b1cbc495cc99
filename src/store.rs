//! Query layer over the SQLite store.
//!
//! Every read takes the pool and checks a connection out for the duration of
//! a single statement; the connection goes back to the pool when the query
//! future completes or is dropped. Inserts are generic over any SQLite
//! executor so seeding can batch them inside a transaction.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use sqlx::{sqlite::SqlitePoolOptions, Sqlite, SqlitePool};

use crate::models::{
    round2, CropRecommendation, NewWeatherObservation, ReadingPoint, SensorReading, SensorType,
    WeatherObservation,
};

// ---

/// Tables the store knows how to count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Table {
    SensorData,
    WeatherData,
    CropRecommendations,
}

impl Table {
    fn name(self) -> &'static str {
        match self {
            Table::SensorData => "sensor_data",
            Table::WeatherData => "weather_data",
            Table::CropRecommendations => "crop_recommendations",
        }
    }
}

/// Most recent value of one sensor type, shown on the dashboard.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct LatestReading {
    pub value: f64,
    pub timestamp: DateTime<Utc>,
}

/// Open a connection pool for `db_url`.
pub async fn connect(db_url: &str, max_connections: u32) -> Result<SqlitePool, sqlx::Error> {
    // ---
    SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect(db_url)
        .await
}

/// Open a pool over a private in-memory database.
///
/// Each SQLite connection to `:memory:` sees its own database, so the pool is
/// pinned to one connection that is never recycled.
pub async fn connect_in_memory() -> Result<SqlitePool, sqlx::Error> {
    // ---
    SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
}

/// Fresh in-memory pool with the schema applied, for unit tests.
#[cfg(test)]
pub(crate) async fn memory_pool() -> anyhow::Result<SqlitePool> {
    let pool = connect_in_memory().await?;
    crate::schema::create_schema(&pool).await?;
    Ok(pool)
}

// --- reads

/// Latest reading per sensor type: at most one entry per type, the one with
/// the greatest timestamp (ties go to the highest id).
pub async fn latest_per_sensor_type(
    pool: &SqlitePool,
) -> Result<BTreeMap<SensorType, LatestReading>, sqlx::Error> {
    // ---
    let rows: Vec<(SensorType, f64, DateTime<Utc>)> = sqlx::query_as(
        r#"
        SELECT s.sensor_type, s.value, s.timestamp
        FROM sensor_data AS s
        WHERE s.id = (
            SELECT sd.id FROM sensor_data AS sd
            WHERE sd.sensor_type = s.sensor_type
            ORDER BY sd.timestamp DESC, sd.id DESC
            LIMIT 1
        )
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|(sensor_type, value, timestamp)| (sensor_type, LatestReading { value, timestamp }))
        .collect())
}

/// Most recent weather observation, if any.
pub async fn latest_weather(pool: &SqlitePool) -> Result<Option<WeatherObservation>, sqlx::Error> {
    // ---
    sqlx::query_as(
        r#"
        SELECT id, temperature, humidity, rainfall, wind_speed, timestamp
        FROM weather_data
        ORDER BY timestamp DESC, id DESC
        LIMIT 1
        "#,
    )
    .fetch_optional(pool)
    .await
}

/// Mean value per sensor type, rounded to two decimals.
pub async fn average_by_sensor_type(
    pool: &SqlitePool,
) -> Result<BTreeMap<SensorType, f64>, sqlx::Error> {
    // ---
    let rows: Vec<(SensorType, f64)> = sqlx::query_as(
        r#"
        SELECT sensor_type, AVG(value) AS avg_value
        FROM sensor_data
        GROUP BY sensor_type
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|(sensor_type, avg)| (sensor_type, round2(avg)))
        .collect())
}

/// Up to `limit` readings of one type, most recent first.
pub async fn recent_sensor_readings(
    pool: &SqlitePool,
    sensor_type: SensorType,
    limit: i64,
) -> Result<Vec<ReadingPoint>, sqlx::Error> {
    // ---
    sqlx::query_as(
        r#"
        SELECT value, timestamp
        FROM sensor_data
        WHERE sensor_type = ?
        ORDER BY timestamp DESC, id DESC
        LIMIT ?
        "#,
    )
    .bind(sensor_type)
    .bind(limit)
    .fetch_all(pool)
    .await
}

/// Up to `limit` readings across all types, most recent first.
pub async fn recent_sensor_table(
    pool: &SqlitePool,
    limit: i64,
) -> Result<Vec<SensorReading>, sqlx::Error> {
    // ---
    sqlx::query_as(
        r#"
        SELECT id, sensor_type, value, timestamp
        FROM sensor_data
        ORDER BY timestamp DESC, id DESC
        LIMIT ?
        "#,
    )
    .bind(limit)
    .fetch_all(pool)
    .await
}

/// Up to `limit` weather observations, most recent first.
pub async fn recent_weather(
    pool: &SqlitePool,
    limit: i64,
) -> Result<Vec<WeatherObservation>, sqlx::Error> {
    // ---
    sqlx::query_as(
        r#"
        SELECT id, temperature, humidity, rainfall, wind_speed, timestamp
        FROM weather_data
        ORDER BY timestamp DESC, id DESC
        LIMIT ?
        "#,
    )
    .bind(limit)
    .fetch_all(pool)
    .await
}

/// All crop recommendation reference rows.
pub async fn all_recommendations(
    pool: &SqlitePool,
) -> Result<Vec<CropRecommendation>, sqlx::Error> {
    // ---
    sqlx::query_as(
        r#"
        SELECT id, soil_type, ph_level, temperature, rainfall, recommended_crop, confidence
        FROM crop_recommendations
        ORDER BY id
        "#,
    )
    .fetch_all(pool)
    .await
}

/// Number of rows currently stored in `table`.
pub async fn count_rows<'e, E>(executor: E, table: Table) -> Result<i64, sqlx::Error>
where
    E: sqlx::Executor<'e, Database = Sqlite>,
{
    // ---
    let sql = format!("SELECT COUNT(*) FROM {}", table.name());
    let (count,): (i64,) = sqlx::query_as(&sql).fetch_one(executor).await?;
    Ok(count)
}

// --- writes

pub async fn insert_sensor_reading<'e, E>(
    executor: E,
    sensor_type: SensorType,
    value: f64,
    timestamp: DateTime<Utc>,
) -> Result<(), sqlx::Error>
where
    E: sqlx::Executor<'e, Database = Sqlite>,
{
    // ---
    sqlx::query("INSERT INTO sensor_data (sensor_type, value, timestamp) VALUES (?, ?, ?)")
        .bind(sensor_type)
        .bind(value)
        .bind(timestamp)
        .execute(executor)
        .await?;

    Ok(())
}

pub async fn insert_weather_observation<'e, E>(
    executor: E,
    obs: &NewWeatherObservation,
) -> Result<(), sqlx::Error>
where
    E: sqlx::Executor<'e, Database = Sqlite>,
{
    // ---
    sqlx::query(
        r#"
        INSERT INTO weather_data (temperature, humidity, rainfall, wind_speed, timestamp)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(obs.temperature)
    .bind(obs.humidity)
    .bind(obs.rainfall)
    .bind(obs.wind_speed)
    .bind(obs.timestamp)
    .execute(executor)
    .await?;

    Ok(())
}

pub async fn insert_crop_recommendation<'e, E>(
    executor: E,
    soil_type: &str,
    ph_level: f64,
    temperature: f64,
    rainfall: f64,
    recommended_crop: &str,
    confidence: f64,
) -> Result<(), sqlx::Error>
where
    E: sqlx::Executor<'e, Database = Sqlite>,
{
    // ---
    sqlx::query(
        r#"
        INSERT INTO crop_recommendations
            (soil_type, ph_level, temperature, rainfall, recommended_crop, confidence)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(soil_type)
    .bind(ph_level)
    .bind(temperature)
    .bind(rainfall)
    .bind(recommended_crop)
    .bind(confidence)
    .execute(executor)
    .await?;

    Ok(())
}
