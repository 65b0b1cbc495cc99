//! Server-rendered HTML pages.
//!
//! Templates only take preformatted strings; building them from query
//! results happens in the `*Page::new` constructors below.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::{
    models::{CropRecommendation, SensorReading, SensorType, WeatherObservation},
    store::LatestReading,
};

// ---

fn fmt_ts(ts: &DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M").to_string()
}

fn fmt_num(v: f64) -> String {
    format!("{:.2}", v)
}

pub struct LatestRow {
    pub sensor: String,
    pub value: String,
    pub timestamp: String,
    pub average: String,
}

pub struct WeatherRow {
    pub temperature: String,
    pub humidity: String,
    pub rainfall: String,
    pub wind_speed: String,
    pub timestamp: String,
}

pub struct SensorRow {
    pub id: String,
    pub sensor: String,
    pub value: String,
    pub timestamp: String,
}

pub struct RecommendationRow {
    pub soil_type: String,
    pub ph_level: String,
    pub temperature: String,
    pub rainfall: String,
    pub crop: String,
    pub confidence: String,
}

markup::define! {
    Nav {
        nav {
            a[href = "/"] { "Home" }
            " | "
            a[href = "/dashboard"] { "Dashboard" }
            " | "
            a[href = "/sensors"] { "Sensors" }
            " | "
            a[href = "/predictions"] { "Predictions" }
            " | "
            a[href = "/analytics"] { "Analytics" }
        }
    }

    IndexPage {
        @markup::doctype()
        html {
            head { title { "Smart Agriculture" } }
            body {
                @Nav {}
                h1 { "Smart Agriculture" }
                p { "Simulated field sensors, local weather and crop suitability in one place." }
            }
        }
    }

    DashboardPage(latest: Vec<LatestRow>, weather: Option<WeatherRow>) {
        @markup::doctype()
        html {
            head {
                meta["http-equiv" = "refresh", content = "30"];
                title { "Dashboard" }
            }
            body {
                @Nav {}
                h1 { "Dashboard" }
                h2 { "Latest readings" }
                table {
                    tr { th { "Sensor" } th { "Latest" } th { "Recorded" } th { "Average" } }
                    @for row in latest.iter() {
                        tr {
                            td { @row.sensor }
                            td { @row.value }
                            td { @row.timestamp }
                            td { @row.average }
                        }
                    }
                }
                h2 { "Weather" }
                @if let Some(w) = weather {
                    ul {
                        li { "Temperature: " @w.temperature }
                        li { "Humidity: " @w.humidity }
                        li { "Rainfall: " @w.rainfall }
                        li { "Wind speed: " @w.wind_speed }
                        li { "Observed: " @w.timestamp }
                    }
                } else {
                    p { "No weather observations yet." }
                }
            }
        }
    }

    SensorsPage(rows: Vec<SensorRow>) {
        @markup::doctype()
        html {
            head { title { "Sensors" } }
            body {
                @Nav {}
                h1 { "Recent sensor readings" }
                table {
                    tr { th { "ID" } th { "Sensor" } th { "Value" } th { "Recorded" } }
                    @for row in rows.iter() {
                        tr {
                            td { @row.id }
                            td { @row.sensor }
                            td { @row.value }
                            td { @row.timestamp }
                        }
                    }
                }
            }
        }
    }

    PredictionsPage(rows: Vec<RecommendationRow>) {
        @markup::doctype()
        html {
            head { title { "Predictions" } }
            body {
                @Nav {}
                h1 { "Crop recommendations" }
                table {
                    tr {
                        th { "Soil" } th { "pH" } th { "Temperature" }
                        th { "Rainfall" } th { "Crop" } th { "Confidence" }
                    }
                    @for row in rows.iter() {
                        tr {
                            td { @row.soil_type }
                            td { @row.ph_level }
                            td { @row.temperature }
                            td { @row.rainfall }
                            td { @row.crop }
                            td { @row.confidence }
                        }
                    }
                }
            }
        }
    }

    AnalyticsPage {
        @markup::doctype()
        html {
            head { title { "Analytics" } }
            body {
                @Nav {}
                h1 { "Analytics" }
                p { "Coming soon." }
            }
        }
    }
}

impl DashboardPage {
    pub fn new(
        latest: &BTreeMap<SensorType, LatestReading>,
        weather: Option<&WeatherObservation>,
        averages: &BTreeMap<SensorType, f64>,
    ) -> Self {
        // ---
        let latest = latest
            .iter()
            .map(|(sensor_type, reading)| LatestRow {
                sensor: sensor_type.to_string(),
                value: fmt_num(reading.value),
                timestamp: fmt_ts(&reading.timestamp),
                average: averages
                    .get(sensor_type)
                    .map(|v| fmt_num(*v))
                    .unwrap_or_default(),
            })
            .collect();

        let weather = weather.map(|w| WeatherRow {
            temperature: fmt_num(w.temperature),
            humidity: fmt_num(w.humidity),
            rainfall: fmt_num(w.rainfall),
            wind_speed: fmt_num(w.wind_speed),
            timestamp: fmt_ts(&w.timestamp),
        });

        DashboardPage { latest, weather }
    }
}

impl SensorsPage {
    pub fn new(readings: &[SensorReading]) -> Self {
        // ---
        let rows = readings
            .iter()
            .map(|r| SensorRow {
                id: r.id.to_string(),
                sensor: r.sensor_type.to_string(),
                value: fmt_num(r.value),
                timestamp: fmt_ts(&r.timestamp),
            })
            .collect();
        SensorsPage { rows }
    }
}

impl PredictionsPage {
    pub fn new(recommendations: &[CropRecommendation]) -> Self {
        // ---
        let rows = recommendations
            .iter()
            .map(|r| RecommendationRow {
                soil_type: r.soil_type.clone(),
                ph_level: fmt_num(r.ph_level),
                temperature: fmt_num(r.temperature),
                rainfall: fmt_num(r.rainfall),
                crop: r.recommended_crop.clone(),
                confidence: fmt_num(r.confidence),
            })
            .collect();
        PredictionsPage { rows }
    }
}
