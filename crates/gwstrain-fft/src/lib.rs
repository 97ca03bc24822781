//! # gwstrain-fft
//!
//! One-sided Fourier transforms between time-domain and frequency-domain
//! strain.
//!
//! - [`nfft`]: real time series to one-sided spectrum, scaled by
//!   `1 / sampling_frequency`, plus its frequency axis
//! - [`infft`]: one-sided spectrum back to a real time series, scaled by
//!   `sampling_frequency`
//! - [`FourierTransform`]: the same operations with FFT plans cached across
//!   calls, for hot loops
//!
//! ## Example
//!
//! ```rust
//! use gwstrain_fft::{infft, nfft};
//!
//! let sampling_frequency = 16.0;
//! let strain: Vec<f64> = (0..16).map(|i| (i as f64 * 0.7).sin()).collect();
//!
//! let (spectrum, frequencies) = nfft(&strain, sampling_frequency).unwrap();
//! assert_eq!(spectrum.len(), 9);
//! assert_eq!(frequencies[8], 8.0);
//!
//! let back = infft(&spectrum, sampling_frequency).unwrap();
//! assert!(strain.iter().zip(&back).all(|(a, b)| (a - b).abs() < 1e-12));
//! ```

mod error;
pub mod transform;

pub use error::{Error, Result};
pub use rustfft::num_complex::{Complex, Complex64};
pub use gwstrain_core::one_sided_frequencies;
pub use transform::{infft, infft_with_len, nfft, FourierTransform};
