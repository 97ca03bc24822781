//! Parameter conversion strategies.
//!
//! A conversion maps a sampler's native parameterization onto the one a
//! source model expects (e.g. chirp mass and mass ratio to component
//! masses). It reports which names it added; the generator itself does not
//! consume that list, but likelihoods and result post-processing do.

use crate::{Parameters, Result};

/// Output of a [`ParameterConversion`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConvertedParameters {
    pub parameters: Parameters,
    /// Names introduced by the conversion.
    pub added_keys: Vec<String>,
}

impl ConvertedParameters {
    /// Parameters passed through with nothing added.
    pub fn unchanged(parameters: Parameters) -> Self {
        Self {
            parameters,
            added_keys: Vec::new(),
        }
    }
}

/// Converts a raw parameter mapping before it is filtered for a source model.
pub trait ParameterConversion {
    /// Display name, `None` for anonymous conversions.
    fn name(&self) -> Option<&str> {
        None
    }

    fn convert(&self, parameters: Parameters) -> Result<ConvertedParameters>;
}

impl<F> ParameterConversion for F
where
    F: Fn(Parameters) -> Result<ConvertedParameters>,
{
    fn convert(&self, parameters: Parameters) -> Result<ConvertedParameters> {
        self(parameters)
    }
}

/// Leaves the parameters untouched. Used when no conversion is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityConversion;

impl ParameterConversion for IdentityConversion {
    fn convert(&self, parameters: Parameters) -> Result<ConvertedParameters> {
        Ok(ConvertedParameters::unchanged(parameters))
    }
}

/// A closure conversion carrying a display name.
pub struct NamedConversion<F> {
    name: String,
    convert: F,
}

impl<F> NamedConversion<F>
where
    F: Fn(Parameters) -> Result<ConvertedParameters>,
{
    pub fn new(name: impl Into<String>, convert: F) -> Self {
        Self {
            name: name.into(),
            convert,
        }
    }
}

impl<F> ParameterConversion for NamedConversion<F>
where
    F: Fn(Parameters) -> Result<ConvertedParameters>,
{
    fn name(&self) -> Option<&str> {
        Some(&self.name)
    }

    fn convert(&self, parameters: Parameters) -> Result<ConvertedParameters> {
        (self.convert)(parameters)
    }
}

/// Applies conversions in order, feeding each one the previous output.
///
/// Added keys are concatenated in application order.
#[derive(Default)]
pub struct ChainedConversion {
    stages: Vec<Box<dyn ParameterConversion + Send>>,
}

impl ChainedConversion {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn then(mut self, stage: impl ParameterConversion + Send + 'static) -> Self {
        self.stages.push(Box::new(stage));
        self
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }
}

impl ParameterConversion for ChainedConversion {
    fn name(&self) -> Option<&str> {
        Some("chained")
    }

    fn convert(&self, parameters: Parameters) -> Result<ConvertedParameters> {
        let mut out = ConvertedParameters::unchanged(parameters);
        for stage in &self.stages {
            let next = stage.convert(out.parameters)?;
            out.parameters = next.parameters;
            out.added_keys.extend(next.added_keys);
        }
        Ok(out)
    }
}
