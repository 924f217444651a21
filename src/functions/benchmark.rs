use std::{num::NonZeroUsize, time::Instant};

use crate::{
    error::{Error, Result},
    functions::materialize::{Materializer, MeasurementSource, ViewWriter},
    progress::ProgressObserver,
    stats::RunStatistics,
};

/// Source of time used to bound each run.
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

/// The monotonic system clock.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Runs the materializer `iterations` times back to back and aggregates the run durations.
///
/// Any failing iteration aborts the whole benchmark; no statistics are produced for it.
pub async fn benchmark<S, W>(
    materializer: &Materializer<S, W>,
    iterations: NonZeroUsize,
    clock: &impl Clock,
    progress: &impl ProgressObserver,
) -> Result<RunStatistics>
where
    S: MeasurementSource,
    W: ViewWriter,
{
    let iterations = iterations.get();
    tracing::info!("starting benchmark with {iterations} iterations");

    let mut durations = Vec::with_capacity(iterations);
    let mut records = 0;

    for k in 1..=iterations {
        let report = materializer.run_timed(clock, progress).await?;
        records = report.records;
        durations.push(report.elapsed.as_secs_f64());

        tracing::debug!(
            iteration = k,
            seconds = report.elapsed.as_secs_f64(),
            "iteration finished"
        );
        progress.on_iteration_complete(k, iterations);
    }

    let statistics = RunStatistics::aggregate(durations, records).ok_or(Error::NoIterations)?;
    tracing::info!(
        mean = statistics.mean,
        median = statistics.median,
        "benchmark finished"
    );

    Ok(statistics)
}
