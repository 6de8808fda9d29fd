//! Error types.
//!
//! Absence is never an error in this crate: a null or undefined host value
//! decodes to `None`. The variants below are contract violations, raised when
//! the host surface does not match what the bindings expect.

use thiserror::Error;

use crate::host::Kind;

#[derive(Debug, Error)]
pub enum Error {
    #[error("unable to convert '{value}' into {kind}")]
    UnknownEnumValue { kind: &'static str, value: String },
    #[error("host value of kind {0} is not callable")]
    NotCallable(Kind),
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Aborts the current operation on a contract violation.
pub(crate) fn fail_fast<T>(result: Result<T>) -> T {
    match result {
        Ok(value) => value,
        Err(err) => panic!("{err}"),
    }
}
