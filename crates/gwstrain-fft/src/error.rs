//! Error types for gwstrain-fft.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Cannot transform an empty series")]
    EmptyInput,

    #[error("Invalid sampling frequency: {0}. Must be finite and positive")]
    InvalidSamplingFrequency(f64),
}

/// Result type alias.
pub type Result<T> = core::result::Result<T, Error>;
