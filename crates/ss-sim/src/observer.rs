//! Model observer trait for progress reporting and data collection.

use ss_agent::Completion;
use ss_core::{AgentId, Tick};

use crate::stats::BatchReport;

/// Agents per state after a tick.  The three counts always sum to the
/// population size.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub struct PopulationCounts {
    pub not_started: usize,
    pub active:      usize,
    pub finished:    usize,
}

impl PopulationCounts {
    #[inline]
    pub fn total(&self) -> usize {
        self.not_started + self.active + self.finished
    }
}

/// Callbacks invoked by [`CrowdModel::step_with`][crate::CrowdModel::step_with]
/// and [`CrowdModel::batch_with`][crate::CrowdModel::batch_with].
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example — finish counter
///
/// ```rust,ignore
/// struct Finishes(usize);
///
/// impl ModelObserver for Finishes {
///     fn on_agent_finished(&mut self, _agent: AgentId, _tick: Tick, _c: &Completion) {
///         self.0 += 1;
///     }
/// }
/// ```
pub trait ModelObserver {
    /// Called at the very start of each tick, before the index rebuild.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called when an agent reaches its exit during `tick`.
    fn on_agent_finished(&mut self, _agent: AgentId, _tick: Tick, _completion: &Completion) {}

    /// Called at the end of each tick with the updated population counts.
    fn on_tick_end(&mut self, _tick: Tick, _counts: PopulationCounts) {}

    /// Called once when a batch run stops.
    fn on_batch_end(&mut self, _report: &BatchReport) {}
}

/// A [`ModelObserver`] that does nothing.
pub struct NoopObserver;

impl ModelObserver for NoopObserver {}
