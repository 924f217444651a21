//! Error types for the materializer.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// A required environment variable is not set.
    #[error("environment variable `{name}` must be set")]
    MissingEnv { name: String },

    /// An environment variable is set but cannot be used.
    #[error("environment variable `{name}` has an invalid value `{value}`")]
    InvalidEnv { name: String, value: String },

    /// Connectivity or query failure reported by the database.
    #[error("database error: {0}")]
    Database(#[from] surrealdb::Error),

    /// A stored record could not be mapped onto a measurement.
    #[error("could not decode record {record}: {reason}")]
    Decode { record: String, reason: String },

    /// The materialized view refused a row.
    #[error("materialized view rejected measurement {id}: {reason}")]
    Constraint { id: i64, reason: String },

    #[error("a benchmark needs at least one completed iteration")]
    NoIterations,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
