//! Core error type.
//!
//! Sub-crates define their own error enums and wrap `CoreError` as one
//! variant via `#[from]`, so configuration failures keep their message all
//! the way up to the caller.

use thiserror::Error;

/// Errors raised while validating configuration or sampled parameters.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("invalid value for `{name}`: {value}")]
    InvalidParameter { name: &'static str, value: f64 },
}

/// Shorthand result type for all `ss-*` crates.
pub type CoreResult<T> = Result<T, CoreError>;
