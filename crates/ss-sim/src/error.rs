use ss_agent::AgentError;
use ss_core::CoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error(transparent)]
    Config(#[from] CoreError),

    #[error(transparent)]
    Agent(#[from] AgentError),

    #[error("{what} length {got} does not match expected {expected}")]
    LengthMismatch {
        expected: usize,
        got:      usize,
        what:     &'static str,
    },

    #[error("state vector entry {index} is not finite: {value}")]
    NonFiniteState { index: usize, value: f64 },

    #[error("population of {0} agents exceeds the agent id space")]
    PopulationTooLarge(usize),
}

pub type ModelResult<T> = Result<T, ModelError>;
