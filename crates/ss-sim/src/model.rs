//! The `CrowdModel` struct and its tick.

use ss_agent::{step_agent, Agent, AgentState, StepOutcome, TickEnv};
use ss_core::{AgentId, Bounds, CrowdConfig, Point2, SimRng, Tick};
use ss_spatial::SpatialIndex;
use tracing::debug;

use crate::observer::{ModelObserver, NoopObserver, PopulationCounts};
use crate::{CrowdModelBuilder, Gates, ModelError, ModelResult};

// ── CrowdModel ────────────────────────────────────────────────────────────────

/// The crowd model: population arena, spatial index, gates and counters.
///
/// Each [`step`](Self::step):
///
/// 1. **Rebuild** the spatial index from every agent's location, whatever
///    its state.
/// 2. **Update** agents in population order with [`step_agent`].  All of them
///    query the snapshot from (1); the active / `x` filter reads live agent
///    records, so later agents see earlier agents' committed moves.
/// 3. **Count** activations and exits, record completion samples.
/// 4. **Advance** `tick` and `step_count`, append to the state history.
///
/// Once every agent has finished, (1)–(3) are skipped but (4) still runs.
///
/// Create via [`CrowdModelBuilder`] or [`CrowdModel::new`].
pub struct CrowdModel {
    config:        CrowdConfig,
    bounds:        Bounds,
    gates:         Gates,
    agents:        Vec<Agent>,
    index:         SpatialIndex,
    rng:           SimRng,
    tick:          Tick,
    step_count:    u64,
    active:        usize,
    finished:      usize,
    time_taken:    Vec<f64>,
    delays:        Vec<f64>,
    state_history: Vec<Vec<f64>>,
}

impl CrowdModel {
    /// Build a model with randomly drawn agents.  Shorthand for
    /// `CrowdModelBuilder::new(config).build()`.
    pub fn new(config: CrowdConfig) -> ModelResult<Self> {
        CrowdModelBuilder::new(config).build()
    }

    pub(crate) fn assemble(config: CrowdConfig, gates: Gates, agents: Vec<Agent>, rng: SimRng) -> Self {
        Self {
            bounds: config.bounds(),
            config,
            gates,
            agents,
            index: SpatialIndex::new(),
            rng,
            tick: Tick::ZERO,
            step_count: 0,
            active: 0,
            finished: 0,
            time_taken: Vec::new(),
            delays: Vec::new(),
            state_history: Vec::new(),
        }
    }

    // ── Tick ──────────────────────────────────────────────────────────────

    /// Advance the model by one tick.
    pub fn step(&mut self) {
        self.step_with(&mut NoopObserver);
    }

    /// [`step`](Self::step) with observer callbacks.
    pub fn step_with<O: ModelObserver>(&mut self, observer: &mut O) {
        let now = self.tick;
        observer.on_tick_start(now);

        if !self.all_finished() {
            self.index.rebuild(self.agents.iter().map(|a| (a.id(), a.location())));

            let env = TickEnv {
                tick:        now,
                bounds:      self.bounds,
                separation:  self.config.separation,
                max_wiggle:  i32::try_from(self.config.max_wiggle).unwrap_or(i32::MAX),
                exit_radius: self.config.exit_spacing,
                index:       &self.index,
            };

            for i in 0..self.agents.len() {
                let id = AgentId(i as u32);
                match step_agent(&mut self.agents, id, &env, &mut self.rng) {
                    StepOutcome::Activated => self.active += 1,
                    StepOutcome::Finished { completion, .. } => {
                        self.active -= 1;
                        self.finished += 1;
                        if self.config.history_enabled {
                            self.time_taken.push(completion.elapsed as f64);
                            self.delays.push(completion.delay);
                        }
                        debug!(agent = %id, tick = %now, elapsed = completion.elapsed, delay = completion.delay, "agent exited");
                        observer.on_agent_finished(id, now, &completion);
                    }
                    StepOutcome::Waiting | StepOutcome::Moved(_) | StepOutcome::Gone => {}
                }
            }
        }

        self.tick = self.tick + 1;
        self.step_count += 1;
        if self.config.history_enabled {
            let snapshot = self.state();
            self.state_history.push(snapshot);
        }
        observer.on_tick_end(now, self.counts());
    }

    // ── State vector ──────────────────────────────────────────────────────

    /// Flattened `[x0, y0, x1, y1, …]` in population order.
    pub fn state(&self) -> Vec<f64> {
        self.agents
            .iter()
            .flat_map(|a| {
                let p = a.location();
                [p.x, p.y]
            })
            .collect()
    }

    /// Overwrite every agent's location from a flattened state vector.
    ///
    /// Agent states are not touched.  Each injected location is clamped into
    /// the corridor, whatever the agent's state, so agents that are not
    /// moving this tick stay in bounds too.
    pub fn set_state(&mut self, state: &[f64]) -> ModelResult<()> {
        let expected = self.config.state_len();
        if state.len() != expected {
            return Err(ModelError::LengthMismatch { expected, got: state.len(), what: "state vector" });
        }
        if let Some((index, &value)) = state.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return Err(ModelError::NonFiniteState { index, value });
        }
        for (agent, xy) in self.agents.iter_mut().zip(state.chunks_exact(2)) {
            agent.set_location(self.bounds.clamp(Point2::new(xy[0], xy[1])));
        }
        Ok(())
    }

    /// One state vector per completed `step()`; empty without history.
    pub fn state_history(&self) -> &[Vec<f64>] {
        &self.state_history
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn config(&self) -> &CrowdConfig {
        &self.config
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn gates(&self) -> &Gates {
        &self.gates
    }

    /// The population, indexed by `AgentId`.
    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn agent(&self, id: AgentId) -> Option<&Agent> {
        self.agents.get(id.index())
    }

    /// The index as rebuilt at the start of the most recent tick.
    pub fn spatial_index(&self) -> &SpatialIndex {
        &self.index
    }

    pub fn tick(&self) -> Tick {
        self.tick
    }

    pub fn step_count(&self) -> u64 {
        self.step_count
    }

    pub fn population_size(&self) -> usize {
        self.agents.len()
    }

    pub fn active_count(&self) -> usize {
        self.active
    }

    pub fn finished_count(&self) -> usize {
        self.finished
    }

    pub fn counts(&self) -> PopulationCounts {
        PopulationCounts {
            not_started: self.agents.len() - self.active - self.finished,
            active:      self.active,
            finished:    self.finished,
        }
    }

    pub fn all_finished(&self) -> bool {
        self.finished == self.agents.len()
    }

    /// Completion times (`tick − start_time`) in finishing order.
    pub fn time_taken(&self) -> &[f64] {
        &self.time_taken
    }

    /// Completion delays in finishing order.
    pub fn delays(&self) -> &[f64] {
        &self.delays
    }

    /// Agents currently in `state`.
    pub fn agents_in(&self, state: AgentState) -> impl Iterator<Item = &Agent> + '_ {
        self.agents.iter().filter(move |a| a.state() == state)
    }
}
