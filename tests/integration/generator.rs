//! Generator construction, strain dispatch and domain transforms.

use crate::helpers::tolerances::{FFT_EPSILON, FLOAT_EPSILON, STRAIN_EPSILON};
use crate::helpers::*;
use gwstrain::core::Error as CoreError;
use gwstrain::prelude::*;
use gwstrain::{nfft, Error};

/// Bin index of the fixture cosine.
fn cosine_bin() -> usize {
    (TEST_FREQUENCY * TEST_DURATION) as usize
}

#[test]
fn test_construction_requires_a_model() {
    let err = WaveformGenerator::builder()
        .duration(TEST_DURATION)
        .sampling_frequency(TEST_SAMPLING_FREQUENCY)
        .build()
        .unwrap_err();
    assert_eq!(err, Error::NoSourceModelConfigured);
}

#[test]
fn test_direct_frequency_domain_strain() {
    let mut generator = test_builder()
        .frequency_domain_source_model(cosine_frequency_model())
        .build()
        .unwrap();

    let strain = generator
        .frequency_domain_strain(Some(&cosine_parameters(2.0)))
        .unwrap();
    let values = strain.as_array().unwrap();

    assert_eq!(values.len(), 65);
    assert!((values[cosine_bin()].re - 2.0).abs() < FLOAT_EPSILON);
    assert_eq!(values[cosine_bin() + 1], Complex64::new(0.0, 0.0));
}

#[test]
fn test_domain_duality_with_both_models() {
    let mut generator = test_builder()
        .frequency_domain_source_model(cosine_frequency_model())
        .time_domain_source_model(cosine_time_model())
        .parameters(cosine_parameters(1.5))
        .build()
        .unwrap();

    let direct = generator.frequency_domain_strain(None).unwrap();
    let time_strain = generator.time_domain_strain(None).unwrap();
    let (transformed, _) = nfft(time_strain.as_array().unwrap(), TEST_SAMPLING_FREQUENCY).unwrap();

    assert!(max_abs_diff_complex(direct.as_array().unwrap(), &transformed) < STRAIN_EPSILON);
}

#[test]
fn test_frequency_fallback_matches_forward_transform() {
    init_tracing();
    let mut generator = test_builder()
        .time_domain_source_model(cosine_time_model())
        .build()
        .unwrap();

    let time_strain = generator
        .time_domain_strain(Some(&cosine_parameters(1.0)))
        .unwrap();
    let (expected, expected_frequencies) =
        nfft(time_strain.as_array().unwrap(), TEST_SAMPLING_FREQUENCY).unwrap();

    let strain = generator.frequency_domain_strain(None).unwrap();
    assert_eq!(strain.as_array().unwrap(), expected.as_slice());
    assert_eq!(
        generator.frequency_array().unwrap(),
        expected_frequencies.as_slice()
    );
}

#[test]
fn test_frequency_fallback_replaces_overridden_axis() {
    let mut generator = test_builder()
        .time_domain_source_model(cosine_time_model())
        .build()
        .unwrap();

    // A coarse custom axis: 4 s at 8 Hz.
    generator
        .set_frequency_array((0..=16).map(|i| i as f64 * 0.25).collect())
        .unwrap();
    assert!((generator.duration() - 4.0).abs() < FLOAT_EPSILON);
    assert!((generator.sampling_frequency() - 8.0).abs() < FLOAT_EPSILON);

    let strain = generator
        .frequency_domain_strain(Some(&cosine_parameters(1.0)))
        .unwrap();
    let len = strain.as_array().unwrap().len();
    assert_eq!(generator.frequency_array().unwrap().len(), len);
    assert_eq!(generator.frequency_array().unwrap()[len - 1], 4.0);
}

#[test]
fn test_time_fallback_matches_inverse_transform() {
    init_tracing();
    let mut generator = test_builder()
        .frequency_domain_source_model(cosine_frequency_model())
        .build()
        .unwrap();

    let strain = generator
        .time_domain_strain(Some(&cosine_parameters(3.0)))
        .unwrap();
    let values = strain.into_array().unwrap();
    let times = generator.time_array().unwrap().to_vec();

    let expected: Vec<f64> = times
        .iter()
        .map(|t| 3.0 * (2.0 * std::f64::consts::PI * TEST_FREQUENCY * t).cos())
        .collect();
    assert_eq!(values.len(), times.len());
    assert!(max_abs_diff(&values, &expected) < FFT_EPSILON);
}

#[test]
fn test_polarizations_keep_names_through_fallback() {
    let mut generator = test_builder()
        .time_domain_source_model(polarized_time_model())
        .build()
        .unwrap();

    let strain = generator
        .frequency_domain_strain(Some(&cosine_parameters(1.0)))
        .unwrap();
    let polarizations = strain.as_polarizations().unwrap();
    assert_eq!(
        polarizations.keys().collect::<Vec<_>>(),
        vec!["cross", "plus"]
    );

    // cos -> +A T / 2 (real), sin -> -i A T / 2 at the cosine bin.
    let half = TEST_DURATION / 2.0;
    let plus = strain.polarization("plus").unwrap();
    let cross = strain.polarization("cross").unwrap();
    assert!((plus[cosine_bin()] - Complex64::new(half, 0.0)).norm() < STRAIN_EPSILON);
    assert!((cross[cosine_bin()] - Complex64::new(0.0, -half)).norm() < STRAIN_EPSILON);
    assert_eq!(generator.frequency_array().unwrap().len(), plus.len());
}

#[test]
fn test_strain_arguments_overwrite_parameters() {
    let mut generator = test_builder()
        .time_domain_source_model(cosine_time_model())
        .parameters(cosine_parameters(1.0))
        .build()
        .unwrap();

    let strain = generator
        .time_domain_strain(Some(&cosine_parameters(4.0)))
        .unwrap();
    assert!((strain.as_array().unwrap()[0] - 4.0).abs() < FLOAT_EPSILON);
    assert_eq!(generator.parameters()["amplitude"].as_f64(), Some(4.0));

    // Without arguments the stored point is reused.
    let again = generator.time_domain_strain(None).unwrap();
    assert_eq!(again, strain);
}

#[test]
fn test_model_errors_propagate() {
    let mut generator = test_builder()
        .time_domain_source_model(cosine_time_model())
        .build()
        .unwrap();

    let err = generator
        .time_domain_strain(Some(&params! { "amplitude" => 1.0 }))
        .unwrap_err();
    assert_eq!(
        err,
        Error::Core(CoreError::MissingParameter("frequency".to_string()))
    );
}
