//! # gwstrain - Gravitational-wave strain generation
//!
//! Forward model for parameter inference: given a parameter mapping, produce
//! the predicted strain in the time or frequency domain.
//!
//! ## Architecture
//!
//! gwstrain is an umbrella crate that coordinates:
//! - **gwstrain-core** - Parameters, conversions, source models, coupled time/frequency axes
//! - **gwstrain-fft** - Forward and inverse one-sided transforms
//!
//! The [`WaveformGenerator`] owns one or two source models. Strain in a
//! domain without its own model is obtained by transforming the other
//! model's output.
//!
//! ## Quick Start
//!
//! ```ignore
//! use gwstrain::prelude::*;
//!
//! let mut generator = WaveformGenerator::builder()
//!     .duration(4.0)
//!     .sampling_frequency(2048.0)
//!     .frequency_domain_source_model(my_model)
//!     .waveform_argument("reference_frequency", 20.0)
//!     .build()?;
//!
//! // Once per likelihood evaluation
//! let strain = generator.frequency_domain_strain(Some(&sample))?;
//! let plus = strain.polarization("plus");
//! ```

/// Re-export of gwstrain-core for direct access
pub use gwstrain_core as core;

/// Re-export of gwstrain-fft for direct access
pub use gwstrain_fft as fft;

pub use gwstrain_core::{
    filter_parameters, get_param, get_param_or, params, AxisConfig, AxisPair, ChainedConversion,
    ConvertedParameters, FnSourceModel, IdentityConversion, NamedConversion, ParameterConversion,
    ParameterKeys, ParameterValue, Parameters, Polarizations, SourceModel, Strain,
};

pub use gwstrain_fft::{infft, infft_with_len, nfft, Complex64, FourierTransform};

mod builder;
mod error;
mod generator;

pub use builder::WaveformGeneratorBuilder;
pub use error::{Error, Result};
pub use generator::{FrequencyDomainSourceModel, TimeDomainSourceModel, WaveformGenerator};

/// Convenience prelude for common imports
pub mod prelude {
    // Main generator
    pub use crate::{WaveformGenerator, WaveformGeneratorBuilder};

    // Parameters
    pub use crate::core::{
        get_param, get_param_or, params, ConvertedParameters, NamedConversion,
        ParameterConversion, ParameterValue, Parameters,
    };

    // Source models
    pub use crate::core::{FnSourceModel, Polarizations, SourceModel, Strain};

    pub use crate::fft::Complex64;
}
