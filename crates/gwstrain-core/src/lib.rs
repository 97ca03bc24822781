//! Core types for gravitational-wave strain generation.
//!
//! # Primary API
//!
//! - [`Parameters`] / [`ParameterValue`]: evaluation points handed to models
//! - [`filter_parameters`]: restrict a mapping to a model's [`ParameterKeys`]
//! - [`ParameterConversion`]: sampler to model parameterization
//! - [`SourceModel`] / [`FnSourceModel`]: strain on a time or frequency axis
//! - [`AxisPair`]: lazily cached, coupled time and frequency axes
//!
//! # Example
//!
//! ```
//! use gwstrain_core::{AxisConfig, AxisPair};
//!
//! let mut axes = AxisPair::new(AxisConfig::new(4.0, 16.0, 0.0));
//! assert_eq!(axes.time_array().unwrap().len(), 64);
//! assert_eq!(axes.frequency_array().unwrap().len(), 33);
//!
//! axes.set_sampling_frequency(32.0);
//! assert_eq!(axes.frequency_array().unwrap().len(), 65);
//! ```

pub mod error;
pub use error::{Error, Result};

mod config;
pub use config::AxisConfig;

pub mod parameter;
pub use parameter::{
    filter_parameters, get_param, get_param_or, parameters_from_value, ParameterKeys,
    ParameterValue, Parameters,
};

pub mod conversion;
pub use conversion::{
    ChainedConversion, ConvertedParameters, IdentityConversion, NamedConversion,
    ParameterConversion,
};

pub mod source;
pub use source::{FnSourceModel, Polarizations, SourceModel, Strain};

pub mod axis;
pub use axis::{
    check_legal_sampling_frequency_and_duration, create_frequency_series, create_time_series,
    one_sided_frequencies, AxisPair,
};
