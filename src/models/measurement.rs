use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use surrealdb::{Datetime, RecordId};

use crate::error::Error;

use super::{record_key, EVENT_STORE};

/// A raw sensor event as read from the event store.
#[derive(Clone, PartialEq, Debug)]
pub struct Measurement {
    pub id: i64,
    pub sensor_id: i64,
    /// Degrees Celsius.
    pub temperature: f64,
    /// Relative humidity in percent.
    pub humidity: f64,
    /// Name of the transport that delivered the event.
    pub event_stream: String,
    pub created_on: DateTime<Utc>,
    pub processed_on: DateTime<Utc>,
}

/// Row layout of the `event_store` table.
#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
#[serde(rename_all = "camelCase")]
pub struct MeasurementModel {
    pub id: RecordId,

    pub sensor_id: i64,
    pub temperature: f64,
    pub humidity: f64,
    pub event_stream: String,

    pub created_on: Datetime,
    pub processed_on: Datetime,
}

/// Content written when appending to the event store. The id lives in the record id.
#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CreateMeasurementModel {
    pub sensor_id: i64,
    pub temperature: f64,
    pub humidity: f64,
    pub event_stream: String,

    pub created_on: Datetime,
    pub processed_on: Datetime,
}

impl TryFrom<MeasurementModel> for Measurement {
    type Error = Error;

    fn try_from(model: MeasurementModel) -> Result<Self, Self::Error> {
        if model.id.table() != EVENT_STORE {
            return Err(Error::Decode {
                record: model.id.to_string(),
                reason: format!("expected a record of table `{EVENT_STORE}`"),
            });
        }
        let Some(id) = record_key(&model.id) else {
            return Err(Error::Decode {
                record: model.id.to_string(),
                reason: "record key is not an integer".into(),
            });
        };

        Ok(Measurement {
            id,
            sensor_id: model.sensor_id,
            temperature: model.temperature,
            humidity: model.humidity,
            event_stream: model.event_stream,
            created_on: model.created_on.into_inner().into(),
            processed_on: model.processed_on.into_inner().into(),
        })
    }
}

impl From<&Measurement> for CreateMeasurementModel {
    fn from(m: &Measurement) -> Self {
        CreateMeasurementModel {
            sensor_id: m.sensor_id,
            temperature: m.temperature,
            humidity: m.humidity,
            event_stream: m.event_stream.clone(),
            created_on: m.created_on.into(),
            processed_on: m.processed_on.into(),
        }
    }
}
