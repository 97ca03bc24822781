//! Parameter values, mappings and the source-parameter filter.
//!
//! A [`Parameters`] mapping is the evaluation point handed to a source model.
//! Samplers usually produce more keys than a model accepts (sky location,
//! calibration, hyper-parameters), so every write goes through
//! [`filter_parameters`], which keeps only the model's declared
//! [`ParameterKeys`] and overlays the fixed waveform arguments.
//!
//! # Example
//!
//! ```
//! use gwstrain_core::{filter_parameters, params, ParameterKeys};
//!
//! let keys = ParameterKeys::new(["mass", "amplitude"]);
//! let sampled = params! {
//!     "mass" => 30.0,
//!     "amplitude" => 1e-21,
//!     "ra" => 1.2,
//! };
//! let fixed = params! { "reference_frequency" => 20.0 };
//!
//! let filtered = filter_parameters(sampled, &keys, &fixed);
//! assert_eq!(filtered.len(), 3);
//! assert!(!filtered.contains_key("ra"));
//! ```

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Create a [`Parameters`] map with key-value pairs.
///
/// # Example
/// ```
/// use gwstrain_core::params;
///
/// let params = params! {
///     "chirp_mass" => 28.0,
///     "approximant" => "IMRPhenomPv2",
/// };
/// assert_eq!(params.len(), 2);
/// ```
#[macro_export]
macro_rules! params {
    ($($key:expr => $value:expr),* $(,)?) => {{
        #[allow(unused_mut)]
        let mut map = $crate::Parameters::new();
        $(
            map.insert($key.to_string(), $crate::ParameterValue::from($value));
        )*
        map
    }};
}

/// Parameter mapping (name to value).
pub type Parameters = HashMap<String, ParameterValue>;

/// Parameter value types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParameterValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
}

impl ParameterValue {
    /// Convert to f64 if possible
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            Self::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Convert to f32 if possible
    pub fn as_f32(&self) -> Option<f32> {
        self.as_f64().map(|f| f as f32)
    }

    /// Convert to i64 if possible
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            Self::Float(f) => Some(*f as i64),
            _ => None,
        }
    }

    /// Convert to bool if possible
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Convert to string slice if possible
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s.as_str()),
            _ => None,
        }
    }
}

impl fmt::Display for ParameterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{}", b),
            Self::Int(i) => write!(f, "{}", i),
            Self::Float(x) => write!(f, "{:?}", x),
            Self::String(s) => write!(f, "'{}'", s),
        }
    }
}

impl From<f64> for ParameterValue {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<f32> for ParameterValue {
    fn from(f: f32) -> Self {
        Self::Float(f as f64)
    }
}

impl From<i64> for ParameterValue {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<i32> for ParameterValue {
    fn from(i: i32) -> Self {
        Self::Int(i as i64)
    }
}

impl From<bool> for ParameterValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<String> for ParameterValue {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<&str> for ParameterValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

/// Declared parameter schema of a source model.
///
/// Names are kept in declaration order with duplicates removed. The axis
/// argument (times or frequencies) is never part of the schema.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterKeys {
    keys: Vec<String>,
}

impl ParameterKeys {
    pub fn new<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut out: Vec<String> = Vec::new();
        for key in keys {
            let key = key.into();
            if !out.contains(&key) {
                out.push(key);
            }
        }
        Self { keys: out }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.keys.iter().any(|k| k == key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for ParameterKeys {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}

/// Restrict `converted` to the keys in `keys`, then overlay `waveform_arguments`.
///
/// The result holds exactly `keys ∩ keys(converted)` plus every waveform
/// argument; on a name collision the waveform argument wins. Keys declared
/// by the model but absent from `converted` stay absent.
pub fn filter_parameters(
    mut converted: Parameters,
    keys: &ParameterKeys,
    waveform_arguments: &Parameters,
) -> Parameters {
    let mut filtered = Parameters::with_capacity(keys.len() + waveform_arguments.len());
    for key in keys.iter() {
        if let Some((name, value)) = converted.remove_entry(key) {
            filtered.insert(name, value);
        }
    }
    for (name, value) in waveform_arguments {
        filtered.insert(name.clone(), value.clone());
    }
    filtered
}

/// Build a [`Parameters`] map from a dynamically typed JSON value.
///
/// Fails with [`Error::NotAMapping`] unless `value` is a JSON object, and with
/// [`Error::InvalidParameter`] for entries that are not scalars.
pub fn parameters_from_value(value: &serde_json::Value) -> Result<Parameters> {
    let object = match value {
        serde_json::Value::Object(object) => object,
        other => {
            return Err(Error::NotAMapping {
                found: json_kind(other),
            })
        }
    };

    let mut params = Parameters::with_capacity(object.len());
    for (name, entry) in object {
        let value = match entry {
            serde_json::Value::Bool(b) => ParameterValue::Bool(*b),
            serde_json::Value::String(s) => ParameterValue::String(s.clone()),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => ParameterValue::Int(i),
                None => n
                    .as_f64()
                    .map(ParameterValue::Float)
                    .ok_or_else(|| Error::InvalidParameter(name.clone(), n.to_string()))?,
            },
            other => {
                return Err(Error::InvalidParameter(name.clone(), other.to_string()));
            }
        };
        params.insert(name.clone(), value);
    }
    Ok(params)
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

/// Helper to get a required parameter
pub fn get_param<T>(
    params: &Parameters,
    name: &str,
    convert: impl FnOnce(&ParameterValue) -> Option<T>,
) -> Result<T> {
    params
        .get(name)
        .ok_or_else(|| Error::MissingParameter(name.to_string()))
        .and_then(|v| {
            convert(v).ok_or_else(|| Error::InvalidParameter(name.to_string(), v.to_string()))
        })
}

/// Helper to get an optional parameter with default
pub fn get_param_or<T>(
    params: &Parameters,
    name: &str,
    default: T,
    convert: impl FnOnce(&ParameterValue) -> Option<T>,
) -> T {
    params.get(name).and_then(convert).unwrap_or(default)
}
