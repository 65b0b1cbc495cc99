//! Demo dashboard and JSON API for simulated agricultural sensor, weather
//! and crop data, backed by a local SQLite file.

pub mod config;
pub mod error;
pub mod models;
pub mod pages;
pub mod routes;
pub mod schema;
pub mod scoring;
pub mod seed;
pub mod store;

pub use config::Config;
pub use error::AppError;

// Re-exported so routes/*.rs reach models through the crate root rather than
// knowing which module defines them.
pub use models::{ReadingPoint, SensorReading, SensorType, WeatherObservation};
