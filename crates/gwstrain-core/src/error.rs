//! Error types for gwstrain-core.

use thiserror::Error;

/// Error type for gwstrain-core operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error(
        "Illegal duration ({duration}) and sampling frequency ({sampling_frequency}): \
         their product must be an integer number of samples"
    )]
    IllegalDurationAndSamplingFrequency {
        duration: f64,
        sampling_frequency: f64,
    },

    #[error("{axis} series was not evenly sampled")]
    UnevenlySampled { axis: &'static str },

    #[error("{axis} series {reason}")]
    InvalidAxis {
        axis: &'static str,
        reason: &'static str,
    },

    #[error("{axis} series needs at least two samples, got {len}")]
    AxisTooShort { axis: &'static str, len: usize },

    #[error("\"parameters\" must be a mapping, got {found}")]
    NotAMapping { found: &'static str },

    #[error("Missing required parameter: {0}")]
    MissingParameter(String),

    #[error("Invalid parameter value for '{0}': {1}")]
    InvalidParameter(String, String),

    #[error("Parameter conversion failed: {0}")]
    Conversion(String),
}

/// Result type alias.
pub type Result<T> = core::result::Result<T, Error>;
