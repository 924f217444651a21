use chrono::{DateTime, Utc};

use crate::models::{
    enriched::{DangerLevel, EnrichedMeasurement},
    measurement::Measurement,
};

const NANOS_PER_MILLI: f64 = 1_000_000.0;

/// Enriches a measurement with its processing latency and danger level.
pub fn transform(measurement: Measurement) -> EnrichedMeasurement {
    let latency_ms = latency_ms(measurement.created_on, measurement.processed_on);
    if latency_ms < 0.0 {
        tracing::warn!(
            id = measurement.id,
            latency_ms,
            "measurement was processed before it was created"
        );
    }
    let danger_level = DangerLevel::classify(measurement.temperature, measurement.humidity);

    EnrichedMeasurement {
        measurement,
        latency_ms,
        danger_level,
    }
}

/// Milliseconds between creation and processing, keeping sub-millisecond precision.
pub fn latency_ms(created_on: DateTime<Utc>, processed_on: DateTime<Utc>) -> f64 {
    let delta = processed_on - created_on;
    match delta.num_nanoseconds() {
        Some(nanos) => nanos as f64 / NANOS_PER_MILLI,
        // Only deltas beyond ~292 years overflow nanoseconds.
        None => delta.num_milliseconds() as f64,
    }
}

impl DangerLevel {
    /// First matching threshold wins; either value alone can raise the level.
    pub fn classify(temperature: f64, humidity: f64) -> DangerLevel {
        if temperature > 10.0 || humidity > 60.0 {
            DangerLevel::Critical
        } else if temperature > 7.0 || humidity > 50.0 {
            DangerLevel::High
        } else if temperature > 5.0 || humidity > 40.0 {
            DangerLevel::Medium
        } else if temperature > 3.0 || humidity > 20.0 {
            DangerLevel::Low
        } else {
            DangerLevel::No
        }
    }
}
