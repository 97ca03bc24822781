//! Forward and inverse one-sided transforms.
//!
//! The forward transform of `N` real samples keeps the `N/2 + 1`
//! non-negative frequency bins and divides by the sampling frequency, so the
//! result approximates the continuous Fourier transform. The inverse undoes
//! both steps. Imaginary parts of the DC and Nyquist bins are ignored on the
//! way back.

use rustfft::num_complex::Complex64;
use rustfft::FftPlanner;

use gwstrain_core::one_sided_frequencies;

use crate::{Error, Result};

fn check_sampling_frequency(sampling_frequency: f64) -> Result<()> {
    if !sampling_frequency.is_finite() || sampling_frequency <= 0.0 {
        return Err(Error::InvalidSamplingFrequency(sampling_frequency));
    }
    Ok(())
}

/// Forward transform with a throwaway planner. See [`FourierTransform::forward`].
pub fn nfft(time_domain_strain: &[f64], sampling_frequency: f64) -> Result<(Vec<Complex64>, Vec<f64>)> {
    FourierTransform::new().forward(time_domain_strain, sampling_frequency)
}

/// Inverse transform with a throwaway planner. See [`FourierTransform::inverse`].
pub fn infft(frequency_domain_strain: &[Complex64], sampling_frequency: f64) -> Result<Vec<f64>> {
    FourierTransform::new().inverse(frequency_domain_strain, sampling_frequency)
}

/// Inverse transform to exactly `len` samples. See [`FourierTransform::inverse_with_len`].
pub fn infft_with_len(
    frequency_domain_strain: &[Complex64],
    sampling_frequency: f64,
    len: usize,
) -> Result<Vec<f64>> {
    FourierTransform::new().inverse_with_len(frequency_domain_strain, sampling_frequency, len)
}

/// Time/frequency transform with cached FFT plans and reusable buffers.
pub struct FourierTransform {
    /// FFT planner (caches plans per length and direction)
    planner: FftPlanner<f64>,
    /// Full-length complex work buffer
    buffer: Vec<Complex64>,
    /// Scratch space for in-place FFTs
    scratch: Vec<Complex64>,
}

impl Default for FourierTransform {
    fn default() -> Self {
        Self::new()
    }
}

impl FourierTransform {
    pub fn new() -> Self {
        Self {
            planner: FftPlanner::new(),
            buffer: Vec::new(),
            scratch: Vec::new(),
        }
    }

    /// Transform a real time series into its one-sided spectrum.
    ///
    /// Returns the `N/2 + 1` bins divided by `sampling_frequency` together
    /// with the matching frequency axis.
    pub fn forward(
        &mut self,
        time_domain_strain: &[f64],
        sampling_frequency: f64,
    ) -> Result<(Vec<Complex64>, Vec<f64>)> {
        check_sampling_frequency(sampling_frequency)?;
        let n = time_domain_strain.len();
        if n == 0 {
            return Err(Error::EmptyInput);
        }

        self.buffer.clear();
        self.buffer
            .extend(time_domain_strain.iter().map(|&x| Complex64::new(x, 0.0)));

        let fft = self.planner.plan_fft_forward(n);
        self.scratch
            .resize(fft.get_inplace_scratch_len(), Complex64::default());
        fft.process_with_scratch(&mut self.buffer, &mut self.scratch);

        let m = n / 2 + 1;
        let spectrum = self.buffer[..m]
            .iter()
            .map(|&c| c / sampling_frequency)
            .collect();
        Ok((spectrum, one_sided_frequencies(m, sampling_frequency)))
    }

    /// Transform a one-sided spectrum of `M` bins back into `2(M - 1)` samples.
    ///
    /// Odd-length series cannot be recovered from their spectrum length
    /// alone; use [`inverse_with_len`](Self::inverse_with_len) for those.
    pub fn inverse(
        &mut self,
        frequency_domain_strain: &[Complex64],
        sampling_frequency: f64,
    ) -> Result<Vec<f64>> {
        let len = 2 * frequency_domain_strain.len().saturating_sub(1);
        self.inverse_with_len(frequency_domain_strain, sampling_frequency, len)
    }

    /// Transform a one-sided spectrum back into exactly `len` samples.
    ///
    /// Bins beyond `len / 2 + 1` are ignored; missing bins are treated as zero.
    pub fn inverse_with_len(
        &mut self,
        frequency_domain_strain: &[Complex64],
        sampling_frequency: f64,
        len: usize,
    ) -> Result<Vec<f64>> {
        check_sampling_frequency(sampling_frequency)?;
        if frequency_domain_strain.is_empty() || len == 0 {
            return Err(Error::EmptyInput);
        }

        // Rebuild the Hermitian-symmetric full spectrum.
        let half = len / 2 + 1;
        self.buffer.clear();
        self.buffer.extend(
            (0..half).map(|k| frequency_domain_strain.get(k).copied().unwrap_or_default()),
        );
        for k in half..len {
            let mirrored = self.buffer[len - k].conj();
            self.buffer.push(mirrored);
        }

        let fft = self.planner.plan_fft_inverse(len);
        self.scratch
            .resize(fft.get_inplace_scratch_len(), Complex64::default());
        fft.process_with_scratch(&mut self.buffer, &mut self.scratch);

        let scale = sampling_frequency / len as f64;
        Ok(self.buffer.iter().map(|c| c.re * scale).collect())
    }
}
