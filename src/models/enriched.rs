use std::fmt;

use serde::{Deserialize, Serialize};
use surrealdb::{Datetime, RecordId};

use super::measurement::Measurement;

/// Risk classification derived from temperature and humidity, least severe first.
#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum DangerLevel {
    No,
    Low,
    Medium,
    High,
    Critical,
}

impl DangerLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            DangerLevel::No => "No",
            DangerLevel::Low => "Low",
            DangerLevel::Medium => "Medium",
            DangerLevel::High => "High",
            DangerLevel::Critical => "Critical",
        }
    }
}

impl fmt::Display for DangerLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A measurement together with the fields computed from it.
#[derive(Clone, PartialEq, Debug)]
pub struct EnrichedMeasurement {
    pub measurement: Measurement,
    pub latency_ms: f64,
    pub danger_level: DangerLevel,
}

/// Content of one `materialized_view` row. The measurement id is the record key,
/// the remaining columns follow in their stored order.
#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
#[serde(rename_all = "camelCase")]
pub struct MaterializedModel {
    pub created_on: Datetime,
    pub danger_level: DangerLevel,
    pub event_stream: String,
    pub humidity: f64,
    pub latency_ms: f64,
    pub processed_on: Datetime,
    pub sensor_id: i64,
    pub temperature: f64,
}

/// A `materialized_view` row as read back from the database.
#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
#[serde(rename_all = "camelCase")]
pub struct MaterializedRowModel {
    pub id: RecordId,
    pub created_on: Datetime,
    pub danger_level: DangerLevel,
    pub event_stream: String,
    pub humidity: f64,
    pub latency_ms: f64,
    pub processed_on: Datetime,
    pub sensor_id: i64,
    pub temperature: f64,
}

impl From<&EnrichedMeasurement> for MaterializedModel {
    fn from(e: &EnrichedMeasurement) -> Self {
        let m = &e.measurement;
        MaterializedModel {
            created_on: m.created_on.into(),
            danger_level: e.danger_level,
            event_stream: m.event_stream.clone(),
            humidity: m.humidity,
            latency_ms: e.latency_ms,
            processed_on: m.processed_on.into(),
            sensor_id: m.sensor_id,
            temperature: m.temperature,
        }
    }
}
