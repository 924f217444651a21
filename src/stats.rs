use std::fmt;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// Descriptive statistics over the durations of a benchmark's runs, in seconds.
#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
#[serde(rename_all = "camelCase")]
pub struct RunStatistics {
    pub iterations: usize,
    /// Records written by the last run.
    pub record_count: usize,

    /// Durations in the order the runs happened.
    pub durations: Vec<f64>,
    /// Durations sorted ascending.
    pub sorted: Vec<f64>,

    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub median: f64,
    /// Population variance (divides by n).
    pub variance: f64,
    pub standard_deviation: f64,
}

impl RunStatistics {
    /// Returns `None` when there are no durations to aggregate.
    pub fn aggregate(durations: Vec<f64>, record_count: usize) -> Option<Self> {
        let n = durations.len();
        if n == 0 {
            return None;
        }

        let mut sorted = durations.clone();
        sorted.sort_by(f64::total_cmp);

        let mean = durations.iter().sum::<f64>() / n as f64;
        let median = if n % 2 == 0 {
            (sorted[n / 2] + sorted[n / 2 - 1]) / 2.0
        } else {
            sorted[n / 2]
        };
        let variance = durations.iter().map(|d| (d - mean).powi(2)).sum::<f64>() / n as f64;

        Some(RunStatistics {
            iterations: n,
            record_count,
            min: sorted[0],
            max: sorted[n - 1],
            mean,
            median,
            variance,
            standard_deviation: variance.sqrt(),
            durations,
            sorted,
        })
    }
}

fn seconds_list(values: &[f64]) -> String {
    format!("[{}]", values.iter().map(|v| format!("{v:.6}")).join(" "))
}

impl fmt::Display for RunStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Materializer Microbenchmark")?;
        writeln!(f, "Number of Iterations:\t\t{}", self.iterations)?;
        writeln!(f, "Datapoints processed each:\t{}", self.record_count)?;
        writeln!(f, "Fastest iteration (min):\t{:.6} seconds", self.min)?;
        writeln!(f, "Slowest iteration (max):\t{:.6} seconds", self.max)?;
        writeln!(f, "Average duration (avg/mean):\t{:.6} seconds", self.mean)?;
        writeln!(f, "Median duration (median):\t{:.6} seconds", self.median)?;
        writeln!(
            f,
            "Standard deviation:\t\t{:.6} seconds",
            self.standard_deviation
        )?;
        writeln!(f, "Variance:\t\t\t{:.6} seconds", self.variance)?;
        writeln!(f)?;
        writeln!(f, "All runs:")?;
        writeln!(f, "{}", seconds_list(&self.sorted))?;
        writeln!(f)?;
        writeln!(f, "All runs (unsorted):")?;
        write!(f, "{}", seconds_list(&self.durations))
    }
}
