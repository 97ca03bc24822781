//! WaveformGenerator that glues parameters, source models and domain transforms.

use std::collections::BTreeMap;
use std::fmt;

use tracing::trace;

use crate::core::{
    axis::number_of_samples, filter_parameters, parameters_from_value, AxisPair, ParameterConversion,
    ParameterKeys, Parameters, SourceModel, Strain,
};
use crate::fft::{Complex64, FourierTransform};
use crate::{Error, Result};

/// Time-domain source model: evaluated on the time axis, real samples.
pub type TimeDomainSourceModel = dyn SourceModel<Sample = f64> + Send;

/// Frequency-domain source model: evaluated on the frequency axis, complex samples.
pub type FrequencyDomainSourceModel = dyn SourceModel<Sample = Complex64> + Send;

/// Computes strain in either domain from whichever source model is available.
///
/// The generator owns the segment's axes, the fixed waveform arguments and the
/// current evaluation point. [`set_parameters`](Self::set_parameters) is the
/// hot path: it is called once per likelihood evaluation.
///
/// When only one model is supplied, strain in the other domain is obtained by
/// evaluating that model and transforming its output.
///
/// A generator is mutated by every evaluation and is not meant to be shared.
/// Parallel samplers should give each worker its own instance.
///
/// # Example
///
/// ```
/// use gwstrain::prelude::*;
///
/// let model = FnSourceModel::new("ramp", ["slope"], |times: &[f64], params: &Parameters| {
///     let slope = get_param(params, "slope", |v| v.as_f64())?;
///     Ok(Strain::Array(times.iter().map(|t| slope * t).collect()))
/// });
///
/// let mut generator = WaveformGenerator::builder()
///     .duration(1.0)
///     .sampling_frequency(8.0)
///     .time_domain_source_model(model)
///     .build()?;
///
/// let strain = generator.time_domain_strain(Some(&params! { "slope" => 2.0, "ra" => 0.3 }))?;
/// assert_eq!(strain.as_array().map(|s| s.len()), Some(8));
/// assert!(!generator.parameters().contains_key("ra"));
///
/// // No frequency-domain model: transformed from the time-domain one.
/// let spectrum = generator.frequency_domain_strain(None)?;
/// assert_eq!(spectrum.as_array().map(|s| s.len()), Some(5));
/// # Ok::<(), gwstrain::Error>(())
/// ```
pub struct WaveformGenerator {
    /// Coupled time/frequency axes of the segment
    axes: AxisPair,

    frequency_domain_source_model: Option<Box<FrequencyDomainSourceModel>>,
    time_domain_source_model: Option<Box<TimeDomainSourceModel>>,

    /// Schema of the model the generator was built around
    source_parameter_keys: ParameterKeys,

    parameter_conversion: Box<dyn ParameterConversion + Send>,

    /// Fixed arguments merged into every parameter write
    waveform_arguments: Parameters,

    /// Current evaluation point (already converted and filtered)
    parameters: Parameters,

    /// FFT plans reused across fallback evaluations
    transform: FourierTransform,
}

impl WaveformGenerator {
    /// Create a new generator builder
    pub fn builder() -> crate::WaveformGeneratorBuilder {
        crate::WaveformGeneratorBuilder::default()
    }

    pub(crate) fn from_parts(
        axes: AxisPair,
        frequency_domain_source_model: Option<Box<FrequencyDomainSourceModel>>,
        time_domain_source_model: Option<Box<TimeDomainSourceModel>>,
        source_parameter_keys: ParameterKeys,
        parameter_conversion: Box<dyn ParameterConversion + Send>,
        waveform_arguments: Parameters,
    ) -> Self {
        Self {
            axes,
            frequency_domain_source_model,
            time_domain_source_model,
            source_parameter_keys,
            parameter_conversion,
            waveform_arguments,
            parameters: Parameters::new(),
            transform: FourierTransform::new(),
        }
    }

    // =========================================================================
    // Parameters
    // =========================================================================

    /// Current evaluation point.
    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    /// Replace the current evaluation point.
    ///
    /// `parameters` is copied, passed through the parameter conversion,
    /// restricted to [`source_parameter_keys`](Self::source_parameter_keys),
    /// and finally overlaid with the waveform arguments, which win on any
    /// name collision. If the conversion fails the previous evaluation point
    /// is kept.
    pub fn set_parameters(&mut self, parameters: &Parameters) -> Result<()> {
        let converted = self.parameter_conversion.convert(parameters.clone())?;
        self.parameters = filter_parameters(
            converted.parameters,
            &self.source_parameter_keys,
            &self.waveform_arguments,
        );
        Ok(())
    }

    /// Replace the current evaluation point from a dynamically typed value.
    ///
    /// Fails with [`Error::Core`] wrapping `NotAMapping` when `value` is not
    /// a JSON object; the previous evaluation point is kept.
    pub fn set_parameters_from_value(&mut self, value: &serde_json::Value) -> Result<()> {
        let parameters = parameters_from_value(value)?;
        self.set_parameters(&parameters)
    }

    /// Parameter names accepted by the source model, excluding the axis.
    pub fn source_parameter_keys(&self) -> &ParameterKeys {
        &self.source_parameter_keys
    }

    pub fn waveform_arguments(&self) -> &Parameters {
        &self.waveform_arguments
    }

    /// Replace the fixed waveform arguments. Takes effect on the next
    /// parameter write.
    pub fn set_waveform_arguments(&mut self, waveform_arguments: Parameters) {
        self.waveform_arguments = waveform_arguments;
    }

    pub fn parameter_conversion_name(&self) -> Option<&str> {
        self.parameter_conversion.name()
    }

    // =========================================================================
    // Source models
    // =========================================================================

    pub fn has_frequency_domain_source_model(&self) -> bool {
        self.frequency_domain_source_model.is_some()
    }

    pub fn has_time_domain_source_model(&self) -> bool {
        self.time_domain_source_model.is_some()
    }

    pub fn frequency_domain_source_model_name(&self) -> Option<&str> {
        self.frequency_domain_source_model.as_deref().map(|m| m.name())
    }

    pub fn time_domain_source_model_name(&self) -> Option<&str> {
        self.time_domain_source_model.as_deref().map(|m| m.name())
    }

    // =========================================================================
    // Strain
    // =========================================================================

    /// Frequency-domain strain at the current (or given) parameters.
    ///
    /// Uses the frequency-domain model directly when present. Otherwise the
    /// time-domain model is evaluated and each output array is forward
    /// transformed. In that case the transform's frequency axis replaces
    /// the cached [`frequency_array`](Self::frequency_array), so the axis read
    /// after this call is the one the returned strain is sampled on. Duration,
    /// sampling frequency and the time axis are left unchanged.
    ///
    /// # Errors
    ///
    /// [`Error::NoSourceModel`] if no model is available.
    pub fn frequency_domain_strain(
        &mut self,
        parameters: Option<&Parameters>,
    ) -> Result<Strain<Complex64>> {
        if let Some(parameters) = parameters {
            self.set_parameters(parameters)?;
        }

        if let Some(model) = self.frequency_domain_source_model.as_deref() {
            let frequencies = self.axes.frequency_array()?;
            return Ok(model.evaluate(frequencies, &self.parameters)?);
        }

        if let Some(model) = self.time_domain_source_model.as_deref() {
            let times = self.axes.time_array()?;
            let strain = model.evaluate(times, &self.parameters)?;
            trace!(model = model.name(), "frequency domain strain via forward transform");

            let sampling_frequency = self.axes.sampling_frequency();
            let transform = &mut self.transform;
            let mut frequency_array = None;
            let spectrum = strain.try_map(|values| {
                let (spectrum, frequencies) = transform.forward(&values, sampling_frequency)?;
                // Same axis for every polarization; the last one is kept.
                frequency_array = Some(frequencies);
                Ok::<_, Error>(spectrum)
            })?;
            if let Some(frequencies) = frequency_array {
                self.axes.cache_frequency_array(frequencies);
            }
            return Ok(spectrum);
        }

        Err(Error::NoSourceModel)
    }

    /// Time-domain strain at the current (or given) parameters.
    ///
    /// Uses the time-domain model directly when present. Otherwise the
    /// frequency-domain model is evaluated and each output array is inverse
    /// transformed to as many samples as the time axis holds.
    ///
    /// # Errors
    ///
    /// [`Error::NoSourceModel`] if no model is available.
    pub fn time_domain_strain(&mut self, parameters: Option<&Parameters>) -> Result<Strain<f64>> {
        if let Some(parameters) = parameters {
            self.set_parameters(parameters)?;
        }

        if let Some(model) = self.time_domain_source_model.as_deref() {
            let times = self.axes.time_array()?;
            return Ok(model.evaluate(times, &self.parameters)?);
        }

        if let Some(model) = self.frequency_domain_source_model.as_deref() {
            let frequencies = self.axes.frequency_array()?;
            let strain = model.evaluate(frequencies, &self.parameters)?;
            trace!(model = model.name(), "time domain strain via inverse transform");

            let sampling_frequency = self.axes.sampling_frequency();
            let len = number_of_samples(sampling_frequency, self.axes.duration());
            let transform = &mut self.transform;
            return strain.try_map(|values| {
                Ok::<_, Error>(transform.inverse_with_len(&values, sampling_frequency, len)?)
            });
        }

        Err(Error::NoSourceModel)
    }

    // =========================================================================
    // Axes
    // =========================================================================

    pub fn duration(&self) -> f64 {
        self.axes.duration()
    }

    /// Marks both axes for recomputation on next read.
    pub fn set_duration(&mut self, duration: f64) {
        self.axes.set_duration(duration);
    }

    pub fn sampling_frequency(&self) -> f64 {
        self.axes.sampling_frequency()
    }

    /// Marks both axes for recomputation on next read.
    pub fn set_sampling_frequency(&mut self, sampling_frequency: f64) {
        self.axes.set_sampling_frequency(sampling_frequency);
    }

    pub fn start_time(&self) -> f64 {
        self.axes.start_time()
    }

    pub fn set_start_time(&mut self, start_time: f64) {
        self.axes.set_start_time(start_time);
    }

    /// Frequency axis, recomputed first if the segment changed.
    pub fn frequency_array(&mut self) -> Result<&[f64]> {
        Ok(self.axes.frequency_array()?)
    }

    /// Override the frequency axis; sampling frequency and duration follow it.
    pub fn set_frequency_array(&mut self, frequency_array: Vec<f64>) -> Result<()> {
        Ok(self.axes.set_frequency_array(frequency_array)?)
    }

    /// Time axis, recomputed first if the segment changed.
    pub fn time_array(&mut self) -> Result<&[f64]> {
        Ok(self.axes.time_array()?)
    }

    /// Override the time axis; sampling frequency, duration and start time follow it.
    pub fn set_time_array(&mut self, time_array: Vec<f64>) -> Result<()> {
        Ok(self.axes.set_time_array(time_array)?)
    }
}

impl fmt::Display for WaveformGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sorted: BTreeMap<&String, _> = self.waveform_arguments.iter().collect();
        let arguments = sorted
            .iter()
            .map(|(name, value)| format!("'{}': {}", name, value))
            .collect::<Vec<_>>()
            .join(", ");

        write!(
            f,
            "WaveformGenerator(duration={}, sampling_frequency={}, start_time={}, \
             frequency_domain_source_model={}, time_domain_source_model={}, \
             parameter_conversion={}, waveform_arguments={{{}}})",
            self.duration(),
            self.sampling_frequency(),
            self.start_time(),
            self.frequency_domain_source_model_name().unwrap_or("None"),
            self.time_domain_source_model_name().unwrap_or("None"),
            self.parameter_conversion_name().unwrap_or("None"),
            arguments,
        )
    }
}

impl fmt::Debug for WaveformGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WaveformGenerator")
            .field("axes", &self.axes)
            .field(
                "frequency_domain_source_model",
                &self.frequency_domain_source_model_name(),
            )
            .field(
                "time_domain_source_model",
                &self.time_domain_source_model_name(),
            )
            .field("source_parameter_keys", &self.source_parameter_keys)
            .field("parameter_conversion", &self.parameter_conversion_name())
            .field("waveform_arguments", &self.waveform_arguments)
            .field("parameters", &self.parameters)
            .finish_non_exhaustive()
    }
}
