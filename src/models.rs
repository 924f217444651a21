use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

pub mod enriched;
pub mod measurement;

pub const EVENT_STORE: &str = "event_store";
pub const MATERIALIZED_VIEW: &str = "materialized_view";

#[derive(Debug, Deserialize, Clone, Serialize)]
pub struct Record {
    pub id: RecordId,
}

/// Extracts the integer key of a record id such as `event_store:17`.
pub fn record_key(id: &RecordId) -> Option<i64> {
    id.key().to_string().parse().ok()
}
