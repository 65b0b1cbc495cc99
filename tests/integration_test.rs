use std::net::SocketAddr;

use anyhow::Result;
use chrono::{DateTime, Duration, TimeZone, Utc};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::{json, Value};
use sqlx::SqlitePool;

use agri_dashboard::{routes, schema, seed, store, Config, SensorType};

#[derive(Debug, Deserialize)]
struct ReadingPoint {
    value: f64,
    timestamp: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
struct WeatherRow {
    id: i64,
    temperature: f64,
    humidity: f64,
    rainfall: f64,
    wind_speed: f64,
    timestamp: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
struct Recommendation {
    recommended_crops: Vec<String>,
    confidence_score: f64,
    soil_type: String,
}

/// Serve the full router over a fresh in-memory store on an ephemeral port.
async fn spawn_app(config: Config) -> Result<(String, SqlitePool)> {
    // ---
    let pool = store::connect_in_memory().await?;
    schema::create_schema(&pool).await?;

    let listener = tokio::net::TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
    let addr = listener.local_addr()?;
    let app = routes::router(pool.clone(), config);

    tokio::spawn(async move {
        axum::serve(listener, app).await.ok();
    });

    Ok((format!("http://{}", addr), pool))
}

#[tokio::test]
async fn sensor_data_defaults_to_soil_moisture() -> Result<()> {
    // ---
    let (base, pool) = spawn_app(Config::default()).await?;
    seed::seed_sample_data(&pool).await?;

    let readings: Vec<ReadingPoint> = Client::new()
        .get(format!("{}/api/sensor_data", base))
        .send()
        .await?
        .json()
        .await?;

    let stored = store::recent_sensor_readings(&pool, SensorType::SoilMoisture, 10).await?;
    assert_eq!(readings.len(), stored.len());
    assert!(readings.len() <= 10, "Default limit exceeded");
    for (got, want) in readings.iter().zip(stored.iter()) {
        assert_eq!(got.value, want.value);
        assert_eq!(got.timestamp, want.timestamp);
        assert!((20.0..=80.0).contains(&got.value), "soil moisture out of range");
    }
    Ok(())
}

#[tokio::test]
async fn sensor_data_type_and_limit() -> Result<()> {
    // ---
    let (base, pool) = spawn_app(Config::default()).await?;
    let t0 = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
    for h in 0..8 {
        store::insert_sensor_reading(&pool, SensorType::Temperature, 20.0 + h as f64, t0 - Duration::hours(h))
            .await?;
    }

    let readings: Vec<ReadingPoint> = Client::new()
        .get(format!("{}/api/sensor_data?type=temperature&limit=5", base))
        .send()
        .await?
        .json()
        .await?;

    assert_eq!(readings.len(), 5);
    assert!(
        readings.windows(2).all(|w| w[0].timestamp >= w[1].timestamp),
        "Readings not ordered most recent first"
    );
    assert_eq!(readings[0].timestamp, t0);
    assert_eq!(readings[0].value, 20.0);
    Ok(())
}

#[tokio::test]
async fn sensor_data_limit_is_clamped() -> Result<()> {
    // ---
    let config = Config {
        api_max_limit: 3,
        ..Config::default()
    };
    let (base, pool) = spawn_app(config).await?;
    for _ in 0..6 {
        store::insert_sensor_reading(&pool, SensorType::Humidity, 50.0, Utc::now()).await?;
    }

    let readings: Vec<ReadingPoint> = Client::new()
        .get(format!("{}/api/sensor_data?type=humidity&limit=1000", base))
        .send()
        .await?
        .json()
        .await?;

    assert_eq!(readings.len(), 3);
    Ok(())
}

#[tokio::test]
async fn sensor_data_unknown_type_is_empty() -> Result<()> {
    // ---
    let (base, pool) = spawn_app(Config::default()).await?;
    seed::seed_sample_data(&pool).await?;

    let resp = Client::new()
        .get(format!("{}/api/sensor_data?type=wind", base))
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = resp.json().await?;
    assert_eq!(body, json!([]));
    Ok(())
}

#[tokio::test]
async fn sensor_data_rejects_non_integer_limit() -> Result<()> {
    // ---
    let (base, _pool) = spawn_app(Config::default()).await?;
    let client = Client::new();

    let resp = client
        .get(format!("{}/api/sensor_data?limit=abc", base))
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn weather_data_returns_full_rows() -> Result<()> {
    // ---
    let (base, pool) = spawn_app(Config::default()).await?;
    seed::seed_sample_data(&pool).await?;

    let rows: Vec<WeatherRow> = Client::new()
        .get(format!("{}/api/weather_data?limit=7", base))
        .send()
        .await?
        .json()
        .await?;

    assert_eq!(rows.len(), 7);
    assert!(rows.windows(2).all(|w| w[0].timestamp >= w[1].timestamp));
    for r in &rows {
        assert!(r.id > 0);
        assert!((15.0..=35.0).contains(&r.temperature));
        assert!((40.0..=90.0).contains(&r.humidity));
        assert!((0.0..=50.0).contains(&r.rainfall));
        assert!((0.0..=25.0).contains(&r.wind_speed));
    }

    let default_rows: Vec<WeatherRow> = Client::new()
        .get(format!("{}/api/weather_data", base))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(default_rows.len(), 10);
    Ok(())
}

#[tokio::test]
async fn weather_data_limit_is_clamped() -> Result<()> {
    // ---
    let config = Config {
        api_max_limit: 4,
        ..Config::default()
    };
    let (base, pool) = spawn_app(config).await?;
    seed::seed_sample_data(&pool).await?;

    let rows: Vec<WeatherRow> = Client::new()
        .get(format!("{}/api/weather_data?limit=500", base))
        .send()
        .await?
        .json()
        .await?;

    assert_eq!(rows.len(), 4);
    Ok(())
}

#[tokio::test]
async fn recommend_crop_scores_known_soil() -> Result<()> {
    // ---
    let (base, _pool) = spawn_app(Config::default()).await?;

    let resp = Client::new()
        .post(format!("{}/api/recommend_crop", base))
        .json(&json!({
            "soil_type": "sandy",
            "ph_level": 5.0,
            "temperature": 25,
            "rainfall": 120
        }))
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::OK);

    let rec: Recommendation = resp.json().await?;
    assert_eq!(rec.recommended_crops, ["Maize", "Groundnut"]);
    assert_eq!(rec.confidence_score, 0.6);
    assert_eq!(rec.soil_type, "sandy");
    Ok(())
}

#[tokio::test]
async fn recommend_crop_rejects_unknown_soil() -> Result<()> {
    // ---
    let (base, _pool) = spawn_app(Config::default()).await?;

    let resp = Client::new()
        .post(format!("{}/api/recommend_crop", base))
        .json(&json!({
            "soil_type": "desert",
            "ph_level": 6.5,
            "temperature": 25,
            "rainfall": 120
        }))
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = resp.json().await?;
    assert_eq!(body, json!({ "error": "Invalid soil type" }));
    Ok(())
}

#[tokio::test]
async fn pages_render_html() -> Result<()> {
    // ---
    let (base, pool) = spawn_app(Config::default()).await?;
    seed::seed_sample_data(&pool).await?;
    let client = Client::new();

    for path in ["/", "/dashboard", "/sensors", "/predictions", "/analytics"] {
        let resp = client.get(format!("{}{}", base, path)).send().await?;
        assert_eq!(resp.status(), StatusCode::OK, "GET {} failed", path);

        let content_type = resp
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        assert!(content_type.starts_with("text/html"), "{} served {}", path, content_type);

        let body = resp.text().await?;
        assert!(body.contains("<html>"), "{} is not an HTML document", path);
    }

    let predictions = client.get(format!("{}/predictions", base)).send().await?.text().await?;
    for crop in ["Rice", "Maize", "Wheat", "Cotton", "Sugarcane"] {
        assert!(predictions.contains(crop), "missing {} on /predictions", crop);
    }
    Ok(())
}

#[tokio::test]
async fn health_is_ok() -> Result<()> {
    // ---
    let (base, _pool) = spawn_app(Config::default()).await?;
    let body: Value = Client::new()
        .get(format!("{}/health", base))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(body, json!({ "status": "ok" }));
    Ok(())
}

#[tokio::test]
async fn recommend_crop_unknown_soil_without_measurements() -> Result<()> {
    // ---
    let (base, _pool) = spawn_app(Config::default()).await?;

    let resp = Client::new()
        .post(format!("{}/api/recommend_crop", base))
        .json(&json!({ "soil_type": "desert" }))
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = resp.json().await?;
    assert_eq!(body, json!({ "error": "Invalid soil type" }));
    Ok(())
}

#[tokio::test]
async fn recommend_crop_known_soil_missing_measurement() -> Result<()> {
    // ---
    let (base, _pool) = spawn_app(Config::default()).await?;

    let resp = Client::new()
        .post(format!("{}/api/recommend_crop", base))
        .json(&json!({ "soil_type": "clay", "ph_level": 6.5, "rainfall": 120 }))
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = resp.json().await?;
    assert_eq!(body, json!({ "error": "Missing field: temperature" }));
    Ok(())
}
