//! Axis configuration.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Duration, sampling frequency and start time of the analysed segment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisConfig {
    /// Segment length in seconds.
    pub duration: f64,
    /// Samples per second.
    pub sampling_frequency: f64,
    /// GPS time of the first sample.
    #[serde(default)]
    pub start_time: f64,
}

impl Default for AxisConfig {
    fn default() -> Self {
        Self {
            duration: 4.0,
            sampling_frequency: 2048.0,
            start_time: 0.0,
        }
    }
}

impl AxisConfig {
    pub fn new(duration: f64, sampling_frequency: f64, start_time: f64) -> Self {
        Self {
            duration,
            sampling_frequency,
            start_time,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !self.duration.is_finite() || self.duration <= 0.0 {
            return Err(Error::InvalidConfig(format!(
                "duration {} must be finite and positive",
                self.duration
            )));
        }
        if !self.sampling_frequency.is_finite() || self.sampling_frequency <= 0.0 {
            return Err(Error::InvalidConfig(format!(
                "sampling_frequency {} must be finite and positive",
                self.sampling_frequency
            )));
        }
        if !self.start_time.is_finite() {
            return Err(Error::InvalidConfig(format!(
                "start_time {} must be finite",
                self.start_time
            )));
        }
        Ok(())
    }
}
