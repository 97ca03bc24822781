//! Coupled time and frequency axes.
//!
//! [`AxisPair`] derives a time axis and a one-sided frequency axis from
//! `duration`, `sampling_frequency` and `start_time`. Both are cached and
//! tracked with explicit stale flags: setters only mark, getters recompute
//! only when marked. Either axis may also be overridden directly, in which
//! case duration and sampling frequency are re-derived from it.

use tracing::{debug, trace};

use crate::{AxisConfig, Error, Result};

/// Absolute tolerance on `duration * sampling_frequency` being integral.
const INTEGRAL_SAMPLES_TOLERANCE: f64 = 1e-10;

/// Base tolerance for evenly-sampled checks on overriding arrays.
const EVEN_SAMPLING_TOLERANCE: f64 = 1e-10;

/// Fail unless `duration * sampling_frequency` is an integer number of samples.
pub fn check_legal_sampling_frequency_and_duration(
    sampling_frequency: f64,
    duration: f64,
) -> Result<()> {
    let num = sampling_frequency * duration;
    if (num - num.round()).abs() > INTEGRAL_SAMPLES_TOLERANCE {
        return Err(Error::IllegalDurationAndSamplingFrequency {
            duration,
            sampling_frequency,
        });
    }
    Ok(())
}

/// Number of time samples in a segment.
pub fn number_of_samples(sampling_frequency: f64, duration: f64) -> usize {
    (sampling_frequency * duration).round() as usize
}

/// Time samples `start_time + i / sampling_frequency` for the whole segment.
pub fn create_time_series(
    sampling_frequency: f64,
    duration: f64,
    start_time: f64,
) -> Result<Vec<f64>> {
    let mut out = Vec::new();
    fill_time_series(&mut out, sampling_frequency, duration, start_time)?;
    Ok(out)
}

/// One-sided frequency samples from 0 to `sampling_frequency / 2` inclusive.
pub fn create_frequency_series(sampling_frequency: f64, duration: f64) -> Result<Vec<f64>> {
    let mut out = Vec::new();
    fill_frequency_series(&mut out, sampling_frequency, duration)?;
    Ok(out)
}

fn fill_time_series(
    out: &mut Vec<f64>,
    sampling_frequency: f64,
    duration: f64,
    start_time: f64,
) -> Result<()> {
    AxisConfig::new(duration, sampling_frequency, start_time).validate()?;
    check_legal_sampling_frequency_and_duration(sampling_frequency, duration)?;
    let n = number_of_samples(sampling_frequency, duration);
    out.clear();
    out.extend((0..n).map(|i| start_time + i as f64 / sampling_frequency));
    Ok(())
}

/// `len` evenly spaced frequencies from 0 to `sampling_frequency / 2` inclusive.
///
/// This is the axis of a one-sided spectrum with `len` bins.
pub fn one_sided_frequencies(len: usize, sampling_frequency: f64) -> Vec<f64> {
    let mut out = Vec::with_capacity(len);
    fill_one_sided_frequencies(&mut out, len, sampling_frequency);
    out
}

fn fill_one_sided_frequencies(out: &mut Vec<f64>, len: usize, sampling_frequency: f64) {
    let nyquist = sampling_frequency / 2.0;
    out.clear();
    match len {
        0 => {}
        1 => out.push(0.0),
        _ => {
            let step = nyquist / (len - 1) as f64;
            out.extend((0..len).map(|i| i as f64 * step));
            out[len - 1] = nyquist;
        }
    }
}

fn fill_frequency_series(out: &mut Vec<f64>, sampling_frequency: f64, duration: f64) -> Result<()> {
    AxisConfig::new(duration, sampling_frequency, 0.0).validate()?;
    check_legal_sampling_frequency_and_duration(sampling_frequency, duration)?;
    let n = number_of_samples(sampling_frequency, duration);
    fill_one_sided_frequencies(out, n / 2 + 1, sampling_frequency);
    Ok(())
}

/// Largest deviation between consecutive spacings of `array`.
fn spacing_spread(array: &[f64]) -> f64 {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for pair in array.windows(2) {
        let d = pair[1] - pair[0];
        min = min.min(d);
        max = max.max(d);
    }
    max - min
}

fn check_evenly_sampled(array: &[f64], axis: &'static str) -> Result<()> {
    if array.len() < 2 {
        return Err(Error::AxisTooShort {
            axis,
            len: array.len(),
        });
    }
    if array.iter().any(|x| !x.is_finite()) {
        return Err(Error::InvalidAxis {
            axis,
            reason: "contains non-finite values",
        });
    }
    if array.windows(2).any(|pair| pair[1] <= pair[0]) {
        return Err(Error::InvalidAxis {
            axis,
            reason: "must be strictly increasing",
        });
    }
    let magnitude = array.iter().fold(0.0_f64, |acc, x| acc.max(x.abs()));
    let tolerance = EVEN_SAMPLING_TOLERANCE.max(8.0 * f64::EPSILON * magnitude);
    if spacing_spread(array) > tolerance {
        return Err(Error::UnevenlySampled { axis });
    }
    Ok(())
}

/// Derive `(sampling_frequency, duration)` from a one-sided frequency axis.
pub fn sampling_frequency_and_duration_from_frequency_array(
    frequency_array: &[f64],
) -> Result<(f64, f64)> {
    check_evenly_sampled(frequency_array, "frequency")?;
    let delta = frequency_array[1] - frequency_array[0];
    let duration = 1.0 / delta;
    let sampling_frequency = 2.0 * (frequency_array.len() - 1) as f64 / duration;
    Ok((sampling_frequency, duration))
}

/// Derive `(sampling_frequency, duration)` from a time axis.
pub fn sampling_frequency_and_duration_from_time_array(time_array: &[f64]) -> Result<(f64, f64)> {
    check_evenly_sampled(time_array, "time")?;
    let n = time_array.len();
    let span = time_array[n - 1] - time_array[0];
    let sampling_frequency = (n - 1) as f64 / span;
    let duration = n as f64 / sampling_frequency;
    Ok((sampling_frequency, duration))
}

/// Lazily computed time and frequency axes for one segment.
///
/// Reads take `&mut self` because they may refill the cache.
#[derive(Debug, Clone)]
pub struct AxisPair {
    duration: f64,
    sampling_frequency: f64,
    start_time: f64,
    time_array: Vec<f64>,
    time_stale: bool,
    frequency_array: Vec<f64>,
    frequency_stale: bool,
}

impl AxisPair {
    pub fn new(config: AxisConfig) -> Self {
        Self {
            duration: config.duration,
            sampling_frequency: config.sampling_frequency,
            start_time: config.start_time,
            time_array: Vec::new(),
            time_stale: true,
            frequency_array: Vec::new(),
            frequency_stale: true,
        }
    }

    pub fn config(&self) -> AxisConfig {
        AxisConfig::new(self.duration, self.sampling_frequency, self.start_time)
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn sampling_frequency(&self) -> f64 {
        self.sampling_frequency
    }

    pub fn start_time(&self) -> f64 {
        self.start_time
    }

    pub fn set_duration(&mut self, duration: f64) {
        if self.duration != duration {
            self.duration = duration;
            self.time_stale = true;
            self.frequency_stale = true;
        }
    }

    pub fn set_sampling_frequency(&mut self, sampling_frequency: f64) {
        if self.sampling_frequency != sampling_frequency {
            self.sampling_frequency = sampling_frequency;
            self.time_stale = true;
            self.frequency_stale = true;
        }
    }

    /// Shifts the time axis only; frequencies do not depend on it.
    pub fn set_start_time(&mut self, start_time: f64) {
        if self.start_time != start_time {
            self.start_time = start_time;
            self.time_stale = true;
        }
    }

    pub fn is_time_array_stale(&self) -> bool {
        self.time_stale
    }

    pub fn is_frequency_array_stale(&self) -> bool {
        self.frequency_stale
    }

    pub fn time_array(&mut self) -> Result<&[f64]> {
        if self.time_stale {
            fill_time_series(
                &mut self.time_array,
                self.sampling_frequency,
                self.duration,
                self.start_time,
            )?;
            self.time_stale = false;
            trace!(len = self.time_array.len(), "recomputed time array");
        }
        Ok(&self.time_array)
    }

    pub fn frequency_array(&mut self) -> Result<&[f64]> {
        if self.frequency_stale {
            fill_frequency_series(
                &mut self.frequency_array,
                self.sampling_frequency,
                self.duration,
            )?;
            self.frequency_stale = false;
            trace!(len = self.frequency_array.len(), "recomputed frequency array");
        }
        Ok(&self.frequency_array)
    }

    /// Replace the frequency axis.
    ///
    /// Sampling frequency and duration are re-derived from the array; the
    /// time axis is marked stale if either changed. Nothing is modified when
    /// the array is rejected.
    pub fn set_frequency_array(&mut self, frequency_array: Vec<f64>) -> Result<()> {
        let (sampling_frequency, duration) =
            sampling_frequency_and_duration_from_frequency_array(&frequency_array)?;
        if sampling_frequency != self.sampling_frequency || duration != self.duration {
            debug!(
                sampling_frequency,
                duration, "frequency array override changed segment"
            );
            self.sampling_frequency = sampling_frequency;
            self.duration = duration;
            self.time_stale = true;
        }
        self.frequency_array = frequency_array;
        self.frequency_stale = false;
        Ok(())
    }

    /// Store the axis of a transformed spectrum as the cached frequency axis.
    ///
    /// Unlike [`set_frequency_array`](Self::set_frequency_array) the segment
    /// is left as is: an odd number of time samples has the same bin count as
    /// the even number below it, so duration cannot be recovered from the
    /// spectrum alone.
    pub fn cache_frequency_array(&mut self, frequency_array: Vec<f64>) {
        self.frequency_array = frequency_array;
        self.frequency_stale = false;
    }

    /// Replace the time axis.
    ///
    /// Sampling frequency, duration and start time are re-derived from the
    /// array; the frequency axis is marked stale if sampling frequency or
    /// duration changed.
    pub fn set_time_array(&mut self, time_array: Vec<f64>) -> Result<()> {
        let (sampling_frequency, duration) =
            sampling_frequency_and_duration_from_time_array(&time_array)?;
        if sampling_frequency != self.sampling_frequency || duration != self.duration {
            debug!(sampling_frequency, duration, "time array override changed segment");
            self.sampling_frequency = sampling_frequency;
            self.duration = duration;
            self.frequency_stale = true;
        }
        self.start_time = time_array[0];
        self.time_array = time_array;
        self.time_stale = false;
        Ok(())
    }
}
