use ss_core::CoreError;
use ss_sim::ModelError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AssimError {
    #[error("filter configuration error: {0}")]
    Config(String),

    #[error("{what} length {got} does not match expected {expected}")]
    LengthMismatch {
        expected: usize,
        got:      usize,
        what:     &'static str,
    },

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    Core(#[from] CoreError),
}

pub type AssimResult<T> = Result<T, AssimError>;
