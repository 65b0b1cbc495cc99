//! Database schema management for `agri-dashboard`.
//!
//! Ensures required tables and indexes exist before serving requests.
//! Applied once on startup from `main.rs`.

use anyhow::Result;
use sqlx::SqlitePool;

// ---

/// Create the database schema (idempotent).
///
/// Creates `sensor_data` and `weather_data` as append-only logs and
/// `crop_recommendations` as static reference data. Safe to call on every
/// startup; no-op if the objects already exist.
///
/// Errors are propagated if any SQL execution fails.
pub async fn create_schema(pool: &SqlitePool) -> Result<()> {
    // ---
    let mut tx = pool.begin().await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS sensor_data (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            sensor_type TEXT     NOT NULL,
            value       REAL     NOT NULL,
            timestamp   DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP
        );
        "#,
    )
    .execute(&mut *tx)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS weather_data (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            temperature REAL     NOT NULL,
            humidity    REAL     NOT NULL,
            rainfall    REAL     NOT NULL,
            wind_speed  REAL     NOT NULL,
            timestamp   DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP
        );
        "#,
    )
    .execute(&mut *tx)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS crop_recommendations (
            id               INTEGER PRIMARY KEY AUTOINCREMENT,
            soil_type        TEXT NOT NULL,
            ph_level         REAL NOT NULL,
            temperature      REAL NOT NULL,
            rainfall         REAL NOT NULL,
            recommended_crop TEXT NOT NULL,
            confidence       REAL NOT NULL
        );
        "#,
    )
    .execute(&mut *tx)
    .await?;

    // Latest-per-type and ordered-limit lookups
    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_sensor_data_type_ts
            ON sensor_data (sensor_type, timestamp);
        "#,
    )
    .execute(&mut *tx)
    .await?;

    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_weather_data_ts
            ON weather_data (timestamp);
        "#,
    )
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(())
}
