//! Source models and the strain they produce.
//!
//! A source model evaluates strain on an axis (times or frequencies) for a
//! parameter mapping. It declares its parameter schema up front through
//! [`SourceModel::parameter_keys`] so callers never need to introspect it.

use std::collections::BTreeMap;

use crate::{ParameterKeys, Parameters, Result};

/// Named polarizations ("plus", "cross", ...) of one waveform.
pub type Polarizations<T> = BTreeMap<String, Vec<T>>;

/// Strain returned by a source model: one array, or one array per polarization.
#[derive(Debug, Clone, PartialEq)]
pub enum Strain<T> {
    Array(Vec<T>),
    Polarizations(Polarizations<T>),
}

impl<T> Strain<T> {
    pub fn is_array(&self) -> bool {
        matches!(self, Self::Array(_))
    }

    /// Samples per series. Polarizations share one length; the first is used.
    pub fn len(&self) -> usize {
        match self {
            Self::Array(values) => values.len(),
            Self::Polarizations(map) => map.values().next().map_or(0, Vec::len),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_array(&self) -> Option<&[T]> {
        match self {
            Self::Array(values) => Some(values),
            Self::Polarizations(_) => None,
        }
    }

    pub fn as_polarizations(&self) -> Option<&Polarizations<T>> {
        match self {
            Self::Array(_) => None,
            Self::Polarizations(map) => Some(map),
        }
    }

    /// Look up a polarization by name. Always `None` for single-array strain.
    pub fn polarization(&self, name: &str) -> Option<&[T]> {
        self.as_polarizations()
            .and_then(|map| map.get(name))
            .map(Vec::as_slice)
    }

    pub fn into_array(self) -> Option<Vec<T>> {
        match self {
            Self::Array(values) => Some(values),
            Self::Polarizations(_) => None,
        }
    }

    pub fn into_polarizations(self) -> Option<Polarizations<T>> {
        match self {
            Self::Array(_) => None,
            Self::Polarizations(map) => Some(map),
        }
    }

    /// Apply `f` to the single array, or independently to each polarization,
    /// preserving polarization names.
    pub fn try_map<U, E>(
        self,
        mut f: impl FnMut(Vec<T>) -> core::result::Result<Vec<U>, E>,
    ) -> core::result::Result<Strain<U>, E> {
        match self {
            Self::Array(values) => Ok(Strain::Array(f(values)?)),
            Self::Polarizations(map) => {
                let mut out = Polarizations::new();
                for (name, values) in map {
                    out.insert(name, f(values)?);
                }
                Ok(Strain::Polarizations(out))
            }
        }
    }
}

impl<T> From<Vec<T>> for Strain<T> {
    fn from(values: Vec<T>) -> Self {
        Self::Array(values)
    }
}

impl<T> From<Polarizations<T>> for Strain<T> {
    fn from(map: Polarizations<T>) -> Self {
        Self::Polarizations(map)
    }
}

/// A waveform model evaluated on a time or frequency axis.
///
/// `Sample` is `f64` for time-domain models and a complex type for
/// frequency-domain models.
pub trait SourceModel {
    type Sample;

    fn name(&self) -> &str;

    /// Parameters the model accepts, excluding the axis.
    fn parameter_keys(&self) -> &ParameterKeys;

    fn evaluate(&self, axis: &[f64], parameters: &Parameters) -> Result<Strain<Self::Sample>>;
}

/// Source model backed by a closure and an explicit parameter schema.
///
/// # Example
/// ```
/// use gwstrain_core::{get_param, params, FnSourceModel, Parameters, SourceModel, Strain};
///
/// let sine = FnSourceModel::new("sine", ["amplitude", "frequency"], |times: &[f64], params: &Parameters| {
///     let amplitude = get_param(params, "amplitude", |v| v.as_f64())?;
///     let frequency = get_param(params, "frequency", |v| v.as_f64())?;
///     Ok(Strain::Array(
///         times
///             .iter()
///             .map(|t| amplitude * (2.0 * std::f64::consts::PI * frequency * t).sin())
///             .collect(),
///     ))
/// });
///
/// let strain = sine
///     .evaluate(&[0.0, 0.25], &params! { "amplitude" => 2.0, "frequency" => 1.0 })
///     .unwrap();
/// assert!((strain.as_array().unwrap()[1] - 2.0).abs() < 1e-12);
/// ```
pub struct FnSourceModel<T, F> {
    name: String,
    keys: ParameterKeys,
    evaluate: F,
    _sample: core::marker::PhantomData<fn() -> T>,
}

impl<T, F> FnSourceModel<T, F>
where
    F: Fn(&[f64], &Parameters) -> Result<Strain<T>>,
{
    pub fn new<I, S>(name: impl Into<String>, keys: I, evaluate: F) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            keys: ParameterKeys::new(keys),
            evaluate,
            _sample: core::marker::PhantomData,
        }
    }
}

impl<T, F> SourceModel for FnSourceModel<T, F>
where
    F: Fn(&[f64], &Parameters) -> Result<Strain<T>>,
{
    type Sample = T;

    fn name(&self) -> &str {
        &self.name
    }

    fn parameter_keys(&self) -> &ParameterKeys {
        &self.keys
    }

    fn evaluate(&self, axis: &[f64], parameters: &Parameters) -> Result<Strain<T>> {
        (self.evaluate)(axis, parameters)
    }
}
