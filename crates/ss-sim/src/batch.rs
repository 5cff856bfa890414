//! Batch driver: step until everyone has left or the budget runs out.

use tracing::{info, warn};

use crate::observer::{ModelObserver, NoopObserver};
use crate::stats::{BatchReport, Histogram, SampleSummary, HISTOGRAM_BINS};
use crate::CrowdModel;

/// Iterations between progress log lines.
const PROGRESS_INTERVAL: u64 = 100;

impl CrowdModel {
    /// Run up to `max_iterations` steps, stopping early once every agent has
    /// finished.
    pub fn batch(&mut self, max_iterations: u64) -> BatchReport {
        self.batch_with(max_iterations, &mut NoopObserver)
    }

    /// [`batch`](Self::batch) with observer callbacks.
    pub fn batch_with<O: ModelObserver>(&mut self, max_iterations: u64, observer: &mut O) -> BatchReport {
        let mut iterations = 0;

        for i in 0..max_iterations {
            self.step_with(observer);
            iterations += 1;

            if i % PROGRESS_INTERVAL == 0 {
                let counts = self.counts();
                info!(
                    iteration   = i,
                    tick        = %self.tick(),
                    not_started = counts.not_started,
                    active      = counts.active,
                    finished    = counts.finished,
                    "batch progress"
                );
            }

            if self.all_finished() {
                info!(iterations, tick = %self.tick(), "everyone made it");
                break;
            }
        }

        let finished_all = self.all_finished();
        if !finished_all {
            warn!(
                max_iterations,
                remaining = self.population_size() - self.finished_count(),
                "iteration budget exhausted"
            );
        }

        let report = self.report(iterations, finished_all);
        observer.on_batch_end(&report);
        report
    }

    /// Summarise the current counters and completion samples.
    pub fn report(&self, iterations: u64, finished_all: bool) -> BatchReport {
        let counts = self.counts();
        let history = self.config().history_enabled;
        BatchReport {
            iterations,
            finished_all,
            final_tick: self.tick(),
            not_started: counts.not_started,
            active: counts.active,
            finished: counts.finished,
            total: counts.total(),
            time_taken: history.then(|| SampleSummary::from_samples(self.time_taken())).flatten(),
            delay: history.then(|| SampleSummary::from_samples(self.delays())).flatten(),
            delay_histogram: history
                .then(|| Histogram::from_samples(self.delays(), HISTOGRAM_BINS))
                .flatten(),
        }
    }
}
