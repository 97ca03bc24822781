//! Centralized error type for the gwstrain umbrella crate.
//!
//! Wraps subsystem errors so `?` propagates naturally across crate boundaries.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error(transparent)]
    Core(#[from] gwstrain_core::Error),

    #[error("Transform: {0}")]
    Transform(#[from] gwstrain_fft::Error),

    /// Raised at construction when neither source model is supplied.
    #[error("Either time or frequency domain source model must be provided")]
    NoSourceModelConfigured,

    /// Raised when strain is requested and no model can produce it.
    #[error("No source model given")]
    NoSourceModel,
}

pub type Result<T> = std::result::Result<T, Error>;
