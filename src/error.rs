//! Errors raised at the input/output boundary
//!
//! The projection itself cannot fail once assumptions are clamped; only
//! reading inputs and writing ledgers can.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum InputError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

pub type InputResult<T> = Result<T, InputError>;
