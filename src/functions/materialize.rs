use std::{sync::Arc, time::Duration};

use async_trait::async_trait;

use crate::{
    error::Result,
    functions::{benchmark::Clock, transform::transform},
    models::{enriched::EnrichedMeasurement, measurement::Measurement},
    progress::ProgressObserver,
};

/// Read side of the pipeline: the append-only event store.
#[async_trait]
pub trait MeasurementSource: Send + Sync {
    /// Every stored measurement, ordered by id ascending.
    async fn fetch_all(&self) -> Result<Vec<Measurement>>;
}

/// Write side of the pipeline: the materialized view.
#[async_trait]
pub trait ViewWriter: Send + Sync {
    /// Removes every row of the view.
    async fn clear(&self) -> Result<()>;

    async fn insert(&self, row: &EnrichedMeasurement) -> Result<()>;
}

#[async_trait]
impl<T: MeasurementSource + ?Sized> MeasurementSource for Arc<T> {
    async fn fetch_all(&self) -> Result<Vec<Measurement>> {
        (**self).fetch_all().await
    }
}

#[async_trait]
impl<T: ViewWriter + ?Sized> ViewWriter for Arc<T> {
    async fn clear(&self) -> Result<()> {
        (**self).clear().await
    }

    async fn insert(&self, row: &EnrichedMeasurement) -> Result<()> {
        (**self).insert(row).await
    }
}

/// Outcome of a single timed materialization.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct MaterializeReport {
    pub records: usize,
    pub elapsed: Duration,
}

/// Rebuilds the materialized view from the event store.
///
/// Every run starts from an empty view and writes rows one at a time. The first
/// failure aborts the run; rows written before it stay in the view.
#[derive(Clone, Debug)]
pub struct Materializer<S, W> {
    source: S,
    view: W,
}

impl<S, W> Materializer<S, W>
where
    S: MeasurementSource,
    W: ViewWriter,
{
    pub fn new(source: S, view: W) -> Self {
        Self { source, view }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn view(&self) -> &W {
        &self.view
    }

    /// Performs one full refresh and returns the number of measurements written.
    pub async fn run(&self, progress: &impl ProgressObserver) -> Result<usize> {
        self.view.clear().await?;

        let measurements = self.source.fetch_all().await?;
        let total = measurements.len();
        progress.on_run_started(total);

        for measurement in measurements {
            let enriched = transform(measurement);
            self.view.insert(&enriched).await?;
            progress.on_record_processed();
        }

        tracing::debug!("materialized {total} measurements");
        Ok(total)
    }

    /// Like [`Materializer::run`], bracketed by two readings of `clock`.
    pub async fn run_timed(
        &self,
        clock: &impl Clock,
        progress: &impl ProgressObserver,
    ) -> Result<MaterializeReport> {
        let start = clock.now();
        let records = self.run(progress).await?;
        let elapsed = clock.now().saturating_duration_since(start);

        Ok(MaterializeReport { records, elapsed })
    }
}
