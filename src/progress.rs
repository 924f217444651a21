use std::sync::atomic::{AtomicUsize, Ordering};

/// Receives fire-and-forget notifications while the materializer works.
pub trait ProgressObserver: Send + Sync {
    /// A run is about to process `total` measurements.
    fn on_run_started(&self, _total: usize) {}

    fn on_record_processed(&self) {}

    /// Iteration `k` (1-based) of `total` has finished.
    fn on_iteration_complete(&self, _k: usize, _total: usize) {}
}

/// Ignores every notification.
impl ProgressObserver for () {}

/// Logs record progress and prints finished benchmark iterations to stdout.
#[derive(Debug, Default)]
pub struct ConsoleProgress {
    total: AtomicUsize,
    done: AtomicUsize,
}

impl ConsoleProgress {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProgressObserver for ConsoleProgress {
    fn on_run_started(&self, total: usize) {
        self.total.store(total, Ordering::Relaxed);
        self.done.store(0, Ordering::Relaxed);
        tracing::info!("materializing {total} measurements");
    }

    fn on_record_processed(&self) {
        let done = self.done.fetch_add(1, Ordering::Relaxed) + 1;
        let total = self.total.load(Ordering::Relaxed);
        tracing::trace!("{done}/{total} measurements written");
        if let Some(percent) = decile_reached(done, total) {
            tracing::debug!("{percent}% of measurements written");
        }
    }

    fn on_iteration_complete(&self, k: usize, total: usize) {
        println!("Iteration {k}/{total} finished");
    }
}

/// The percentage of the decile record `done` crosses into, if any.
fn decile_reached(done: usize, total: usize) -> Option<usize> {
    if total == 0 || done == 0 || done > total {
        return None;
    }
    let decile = done * 10 / total;
    (decile > (done - 1) * 10 / total).then_some(decile * 10)
}
