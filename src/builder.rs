//! Builder for configuring and constructing a `WaveformGenerator`.

use tracing::debug;

use crate::core::{
    AxisConfig, AxisPair, IdentityConversion, ParameterConversion, ParameterValue, Parameters,
    SourceModel,
};
use crate::fft::Complex64;
use crate::generator::{FrequencyDomainSourceModel, TimeDomainSourceModel};
use crate::{Error, Result, WaveformGenerator};

/// At least one source model is required. When both are given, the
/// frequency-domain model's declared keys define which parameters are kept.
///
/// # Example
///
/// ```ignore
/// use gwstrain::prelude::*;
///
/// let generator = WaveformGenerator::builder()
///     .duration(4.0)
///     .sampling_frequency(2048.0)
///     .frequency_domain_source_model(lal_binary_black_hole)
///     .parameter_conversion(convert_to_component_masses)
///     .waveform_argument("reference_frequency", 50.0)
///     .waveform_argument("approximant", "IMRPhenomPv2")
///     .build()?;
/// ```
pub struct WaveformGeneratorBuilder {
    axis_config: AxisConfig,
    frequency_domain_source_model: Option<Box<FrequencyDomainSourceModel>>,
    time_domain_source_model: Option<Box<TimeDomainSourceModel>>,
    parameters: Option<Parameters>,
    parameter_conversion: Box<dyn ParameterConversion + Send>,
    waveform_arguments: Parameters,
}

impl Default for WaveformGeneratorBuilder {
    fn default() -> Self {
        Self {
            axis_config: AxisConfig::default(),
            frequency_domain_source_model: None,
            time_domain_source_model: None,
            parameters: None,
            parameter_conversion: Box::new(IdentityConversion),
            waveform_arguments: Parameters::new(),
        }
    }
}

impl WaveformGeneratorBuilder {
    /// Default: 4 s
    pub fn duration(mut self, duration: f64) -> Self {
        self.axis_config.duration = duration;
        self
    }

    /// Default: 2048 Hz
    pub fn sampling_frequency(mut self, sampling_frequency: f64) -> Self {
        self.axis_config.sampling_frequency = sampling_frequency;
        self
    }

    /// Default: 0
    pub fn start_time(mut self, start_time: f64) -> Self {
        self.axis_config.start_time = start_time;
        self
    }

    pub fn axis_config(mut self, config: AxisConfig) -> Self {
        self.axis_config = config;
        self
    }

    pub fn frequency_domain_source_model(
        mut self,
        model: impl SourceModel<Sample = Complex64> + Send + 'static,
    ) -> Self {
        self.frequency_domain_source_model = Some(Box::new(model));
        self
    }

    pub fn time_domain_source_model(
        mut self,
        model: impl SourceModel<Sample = f64> + Send + 'static,
    ) -> Self {
        self.time_domain_source_model = Some(Box::new(model));
        self
    }

    /// Initial evaluation point, applied through the usual parameter write.
    pub fn parameters(mut self, parameters: Parameters) -> Self {
        self.parameters = Some(parameters);
        self
    }

    /// Default: [`IdentityConversion`]
    pub fn parameter_conversion(
        mut self,
        conversion: impl ParameterConversion + Send + 'static,
    ) -> Self {
        self.parameter_conversion = Box::new(conversion);
        self
    }

    pub fn waveform_arguments(mut self, waveform_arguments: Parameters) -> Self {
        self.waveform_arguments = waveform_arguments;
        self
    }

    pub fn waveform_argument(
        mut self,
        name: impl Into<String>,
        value: impl Into<ParameterValue>,
    ) -> Self {
        self.waveform_arguments.insert(name.into(), value.into());
        self
    }

    pub fn build(self) -> Result<WaveformGenerator> {
        let source_parameter_keys = match (
            self.frequency_domain_source_model.as_deref(),
            self.time_domain_source_model.as_deref(),
        ) {
            (Some(model), _) => model.parameter_keys().clone(),
            (None, Some(model)) => model.parameter_keys().clone(),
            (None, None) => return Err(Error::NoSourceModelConfigured),
        };
        self.axis_config.validate()?;

        debug!(
            frequency_domain_source_model = ?self.frequency_domain_source_model.as_deref().map(|m| m.name()),
            time_domain_source_model = ?self.time_domain_source_model.as_deref().map(|m| m.name()),
            keys = ?source_parameter_keys,
            "building waveform generator"
        );

        let mut generator = WaveformGenerator::from_parts(
            AxisPair::new(self.axis_config),
            self.frequency_domain_source_model,
            self.time_domain_source_model,
            source_parameter_keys,
            self.parameter_conversion,
            self.waveform_arguments,
        );

        if let Some(parameters) = self.parameters {
            generator.set_parameters(&parameters)?;
        }

        Ok(generator)
    }
}
