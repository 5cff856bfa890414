//! Summary statistics reported at the end of a batch run.

use std::fmt;

use ss_core::Tick;

/// Number of equal-width bins in the delay histogram.
pub const HISTOGRAM_BINS: usize = 10;

/// Count, mean, (population) standard deviation and range of a sample.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SampleSummary {
    pub count: usize,
    pub mean:  f64,
    pub std:   f64,
    pub min:   f64,
    pub max:   f64,
}

impl SampleSummary {
    /// `None` for an empty sample.
    pub fn from_samples(samples: &[f64]) -> Option<Self> {
        if samples.is_empty() {
            return None;
        }
        let count = samples.len();
        let mean = samples.iter().sum::<f64>() / count as f64;
        let var = samples.iter().map(|s| (s - mean).powi(2)).sum::<f64>() / count as f64;
        let (min, max) = samples
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &s| (lo.min(s), hi.max(s)));
        Some(Self { count, mean, std: var.sqrt(), min, max })
    }
}

impl fmt::Display for SampleSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "n={} mean={:.3} std={:.3} min={:.3} max={:.3}",
            self.count, self.mean, self.std, self.min, self.max
        )
    }
}

/// Equal-width histogram over `[min, max]`.
#[derive(Clone, Debug, PartialEq)]
pub struct Histogram {
    /// `counts.len() + 1` bin edges, ascending.
    pub edges:  Vec<f64>,
    pub counts: Vec<usize>,
}

impl Histogram {
    /// `None` for an empty sample or zero bins.  A sample with a single
    /// distinct value gets a unit-wide range centred on it.
    pub fn from_samples(samples: &[f64], bins: usize) -> Option<Self> {
        let summary = SampleSummary::from_samples(samples)?;
        if bins == 0 {
            return None;
        }
        let (lo, hi) = if summary.max > summary.min {
            (summary.min, summary.max)
        } else {
            (summary.min - 0.5, summary.max + 0.5)
        };
        let width = (hi - lo) / bins as f64;
        let edges = (0..=bins).map(|i| lo + width * i as f64).collect();

        let mut counts = vec![0usize; bins];
        for &s in samples {
            // The last bin is closed on the right.
            let bin = (((s - lo) / width) as usize).min(bins - 1);
            counts[bin] += 1;
        }
        Some(Self { edges, counts })
    }
}

// ── BatchReport ───────────────────────────────────────────────────────────────

/// Outcome of [`CrowdModel::batch`][crate::CrowdModel::batch].
#[derive(Clone, Debug, PartialEq)]
pub struct BatchReport {
    /// Number of `step()` calls made by this batch.
    pub iterations:   u64,
    /// `true` if the batch stopped because everyone finished.
    pub finished_all: bool,
    /// Model tick after the last step.
    pub final_tick:   Tick,
    pub not_started:  usize,
    pub active:       usize,
    pub finished:     usize,
    pub total:        usize,
    /// Completion times of finished agents.  `None` without history.
    pub time_taken:   Option<SampleSummary>,
    /// Completion delays of finished agents.  `None` without history.
    pub delay:        Option<SampleSummary>,
    pub delay_histogram: Option<Histogram>,
}

impl fmt::Display for BatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Finish time: {}", self.final_tick)?;
        writeln!(
            f,
            "Not started / active / finished / total agents: {}/{}/{}/{}",
            self.not_started, self.active, self.finished, self.total
        )?;
        if let Some(t) = &self.time_taken {
            writeln!(f, "Time taken: {t}")?;
        }
        if let Some(d) = &self.delay {
            writeln!(f, "Delay:      {d}")?;
        }
        if let Some(h) = &self.delay_histogram {
            for (i, count) in h.counts.iter().enumerate() {
                writeln!(f, "  [{:>8.2}, {:>8.2}) {count}", h.edges[i], h.edges[i + 1])?;
            }
        }
        Ok(())
    }
}
