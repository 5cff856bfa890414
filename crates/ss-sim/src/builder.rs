//! Fluent builder for constructing a [`CrowdModel`].

use ss_agent::{Agent, AgentSpec};
use ss_core::{AgentId, CrowdConfig, SimRng};
use tracing::debug;

use crate::{CrowdModel, Gates, ModelError, ModelResult};

/// Fluent builder for [`CrowdModel`].
///
/// # Required inputs
///
/// - [`CrowdConfig`] — corridor, population, speeds, seed, …
///
/// # Optional inputs (have defaults)
///
/// | Method            | Default                                        |
/// |-------------------|------------------------------------------------|
/// | `.seed(s)`        | `config.seed`                                  |
/// | `.population(v)`  | `population_size` agents drawn from the gates  |
///
/// # Example
///
/// ```rust,ignore
/// let mut model = CrowdModelBuilder::new(config)
///     .seed(7)
///     .build()?;
/// let report = model.batch(900);
/// ```
pub struct CrowdModelBuilder {
    config:     CrowdConfig,
    seed:       Option<u64>,
    population: Option<Vec<AgentSpec>>,
}

impl CrowdModelBuilder {
    pub fn new(config: CrowdConfig) -> Self {
        Self { config, seed: None, population: None }
    }

    /// Override the configured seed (e.g. per ensemble member).
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Supply hand-specified agents instead of random draws.
    ///
    /// Must be length `population_size`.  Candidate speed ladders are still
    /// derived from the configuration.
    pub fn population(mut self, specs: Vec<AgentSpec>) -> Self {
        self.population = Some(specs);
        self
    }

    /// Validate the configuration, lay out the gates, create every agent and
    /// return a model at tick 0.
    pub fn build(self) -> ModelResult<CrowdModel> {
        let mut config = self.config;
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        config.validate()?;

        let n = config.population_size;
        // The highest id must fit; every lower one then does too.
        AgentId::try_from(n.saturating_sub(1)).map_err(|_| ModelError::PopulationTooLarge(n))?;
        let ids: Vec<AgentId> = (0..n).map(|i| AgentId(i as u32)).collect();

        let gates = Gates::new(&config);
        let mut rng = SimRng::new(config.seed);

        let agents: Vec<Agent> = match &self.population {
            Some(specs) => {
                if specs.len() != n {
                    return Err(ModelError::LengthMismatch {
                        expected: n,
                        got:      specs.len(),
                        what:     "agent specs",
                    });
                }
                ids.iter()
                    .zip(specs)
                    .map(|(&id, spec)| Agent::from_spec(id, spec, &config))
                    .collect::<Result<_, _>>()?
            }
            None => ids
                .iter()
                .map(|&id| Agent::spawn(id, &config, &gates.entrances, &gates.exits, &mut rng))
                .collect::<Result<_, _>>()?,
        };

        debug!(
            agents    = n,
            entrances = gates.entrances.len(),
            exits     = gates.exits.len(),
            seed      = config.seed,
            "crowd model built"
        );

        Ok(CrowdModel::assemble(config, gates, agents, rng))
    }
}
