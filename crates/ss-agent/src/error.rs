use ss_core::{AgentId, CoreError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AgentError {
    #[error("{agent}: no candidate speed between desired speed {desired_speed} and min speed {min_speed}")]
    EmptySpeedLadder {
        agent:         AgentId,
        desired_speed: f64,
        min_speed:     f64,
    },

    #[error("{agent}: desired speed {desired_speed} in steps of {speed_step} needs more than {limit} candidate speeds")]
    SpeedLadderTooLong {
        agent:         AgentId,
        desired_speed: f64,
        speed_step:    f64,
        limit:         usize,
    },

    #[error("{agent}: sampled {what} is out of range: {value}")]
    InvalidSample {
        agent: AgentId,
        what:  &'static str,
        value: f64,
    },

    #[error("no {0} gates to choose from")]
    NoGates(&'static str),

    #[error(transparent)]
    Core(#[from] CoreError),
}

pub type AgentResult<T> = Result<T, AgentError>;
