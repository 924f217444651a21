//! Rebuilds the `materialized_view` table from the `event_store` of sensor
//! measurements, and benchmarks how long that takes.
//!
//! Each measurement is enriched with its processing latency and a danger level
//! derived from temperature and humidity. A run always starts from an empty
//! view and writes one row per stored measurement, in id order.

pub mod config;
pub mod db;
pub mod error;
pub mod functions;
pub mod helpers;
pub mod models;
pub mod progress;
pub mod stats;

pub use config::Config;
pub use db::SurrealStore;
pub use error::{Error, Result};
pub use functions::{
    benchmark::{benchmark, Clock, SystemClock},
    materialize::{MaterializeReport, Materializer, MeasurementSource, ViewWriter},
    transform::transform,
};
pub use models::{
    enriched::{DangerLevel, EnrichedMeasurement},
    measurement::Measurement,
};
pub use progress::{ConsoleProgress, ProgressObserver};
pub use stats::RunStatistics;
