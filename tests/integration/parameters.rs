//! Parameter filtering, conversion and validation through the generator.

use crate::helpers::*;
use gwstrain::core::Error as CoreError;
use gwstrain::prelude::*;
use gwstrain::{ChainedConversion, Error};

/// Component masses from total mass and mass ratio (q = m2 / m1 <= 1).
fn component_masses(mut params: Parameters) -> gwstrain::core::Result<ConvertedParameters> {
    let mut added_keys = Vec::new();
    if !params.contains_key("mass_1") {
        let total = get_param(&params, "total_mass", |v| v.as_f64())?;
        let q = get_param(&params, "mass_ratio", |v| v.as_f64())?;
        params.insert("mass_1".to_string(), (total / (1.0 + q)).into());
        params.insert("mass_2".to_string(), (total * q / (1.0 + q)).into());
        added_keys.push("mass_1".to_string());
        added_keys.push("mass_2".to_string());
    }
    Ok(ConvertedParameters {
        parameters: params,
        added_keys,
    })
}

fn binary_model() -> impl SourceModel<Sample = f64> + Send {
    FnSourceModel::new(
        "binary",
        ["mass_1", "mass_2", "luminosity_distance"],
        |times: &[f64], params: &Parameters| {
            let m1 = get_param(params, "mass_1", |v| v.as_f64())?;
            let m2 = get_param(params, "mass_2", |v| v.as_f64())?;
            let distance = get_param_or(params, "luminosity_distance", 100.0, |v| v.as_f64());
            Ok(Strain::Array(vec![(m1 + m2) / distance; times.len()]))
        },
    )
}

#[test]
fn test_unrelated_keys_are_dropped() {
    let mut generator = test_builder()
        .time_domain_source_model(cosine_time_model())
        .build()
        .unwrap();

    let mut sample = cosine_parameters(1.0);
    sample.insert("ra".to_string(), 1.3.into());
    sample.insert("dec".to_string(), (-0.2).into());
    sample.insert("psi".to_string(), 0.7.into());
    generator.set_parameters(&sample).unwrap();

    let mut keys: Vec<&str> = generator.parameters().keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(keys, vec!["amplitude", "duration", "frequency"]);
    assert_eq!(sample.len(), 5);
}

#[test]
fn test_waveform_arguments_always_win() {
    let mut generator = test_builder()
        .time_domain_source_model(cosine_time_model())
        .waveform_argument("frequency", 7.0)
        .build()
        .unwrap();

    generator.set_parameters(&cosine_parameters(1.0)).unwrap();
    assert_eq!(
        generator.parameters()["frequency"],
        ParameterValue::Float(7.0)
    );
    assert_eq!(
        generator.parameters()["duration"],
        ParameterValue::Float(TEST_DURATION)
    );
}

#[test]
fn test_waveform_arguments_update_on_next_write() {
    let mut generator = test_builder()
        .time_domain_source_model(cosine_time_model())
        .parameters(cosine_parameters(1.0))
        .build()
        .unwrap();

    generator.set_waveform_arguments(params! { "frequency" => 9.0 });
    assert_eq!(generator.parameters()["frequency"].as_f64(), Some(TEST_FREQUENCY));

    generator.set_parameters(&cosine_parameters(1.0)).unwrap();
    assert_eq!(generator.parameters()["frequency"].as_f64(), Some(9.0));
    assert!(!generator.parameters().contains_key("duration"));
}

#[test]
fn test_conversion_runs_before_filtering() {
    let mut generator = WaveformGenerator::builder()
        .duration(1.0)
        .sampling_frequency(16.0)
        .time_domain_source_model(binary_model())
        .parameter_conversion(NamedConversion::new("component_masses", component_masses))
        .build()
        .unwrap();

    generator
        .set_parameters(&params! {
            "total_mass" => 60.0,
            "mass_ratio" => 0.5,
            "luminosity_distance" => 400.0,
        })
        .unwrap();

    let params = generator.parameters();
    assert_eq!(params.len(), 3);
    assert_eq!(params["mass_1"].as_f64(), Some(40.0));
    assert_eq!(params["mass_2"].as_f64(), Some(20.0));
    assert!(!params.contains_key("total_mass"));

    let strain = generator.time_domain_strain(None).unwrap();
    assert_eq!(strain.as_array().unwrap()[0], 0.15);
    assert!(generator
        .to_string()
        .contains("parameter_conversion=component_masses"));
}

#[test]
fn test_chained_conversion() {
    let scale_distance = |mut params: Parameters| -> gwstrain::core::Result<ConvertedParameters> {
        let distance = get_param(&params, "distance_gpc", |v| v.as_f64())?;
        params.insert("luminosity_distance".to_string(), (distance * 1000.0).into());
        Ok(ConvertedParameters {
            parameters: params,
            added_keys: vec!["luminosity_distance".to_string()],
        })
    };
    let conversion = ChainedConversion::new()
        .then(component_masses)
        .then(scale_distance);

    let mut generator = WaveformGenerator::builder()
        .duration(1.0)
        .sampling_frequency(16.0)
        .time_domain_source_model(binary_model())
        .parameter_conversion(conversion)
        .build()
        .unwrap();

    generator
        .set_parameters(&params! { "total_mass" => 30.0, "mass_ratio" => 1.0, "distance_gpc" => 0.5 })
        .unwrap();
    assert_eq!(generator.parameters()["luminosity_distance"].as_f64(), Some(500.0));
    assert_eq!(generator.parameters()["mass_1"].as_f64(), Some(15.0));
}

#[test]
fn test_non_mapping_is_rejected_without_mutation() {
    let mut generator = test_builder()
        .time_domain_source_model(cosine_time_model())
        .parameters(cosine_parameters(1.0))
        .build()
        .unwrap();
    let before = generator.parameters().clone();

    for value in [
        serde_json::json!([1.0, 2.0]),
        serde_json::json!(3.5),
        serde_json::json!("amplitude"),
        serde_json::json!(null),
    ] {
        let err = generator.set_parameters_from_value(&value).unwrap_err();
        assert!(matches!(err, Error::Core(CoreError::NotAMapping { .. })));
        assert_eq!(generator.parameters(), &before);
    }
}

#[test]
fn test_mapping_value_is_accepted() {
    let mut generator = test_builder()
        .time_domain_source_model(cosine_time_model())
        .build()
        .unwrap();

    generator
        .set_parameters_from_value(&serde_json::json!({
            "amplitude": 2.0,
            "frequency": 5,
            "geocent_time": 1126259462.4,
        }))
        .unwrap();

    assert_eq!(generator.parameters()["frequency"], ParameterValue::Int(5));
    assert!(!generator.parameters().contains_key("geocent_time"));
    let strain = generator.time_domain_strain(None).unwrap();
    assert_eq!(strain.as_array().unwrap()[0], 2.0);
}
