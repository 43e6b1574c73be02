//! Tests for configuration module.

use super::*;

fn settings_with(overrides: &[(&str, &str)]) -> Settings {
    let mut builder = Settings::builder().expect("defaults should apply");
    for (key, value) in overrides {
        builder = builder
            .set_override(*key, *value)
            .expect("override should apply");
    }
    builder
        .build()
        .expect("config should build")
        .try_deserialize::<Settings>()
        .expect("settings should deserialize")
}

#[test_log::test]
fn test_defaults() {
    tracing::debug!("Testing configuration defaults");

    let settings = settings_with(&[]);

    assert_eq!(settings.logging.level, "info");
    assert_eq!(settings.convert.input_format, Format::Text);
    assert_eq!(settings.convert.output_format, Format::Text);
    assert!(settings.convert.strict);
    assert!(!settings.convert.add_prod_id);
    assert!(settings.convert.version.is_none());
}

#[test_log::test]
fn test_format_deserialization() {
    let settings = settings_with(&[
        ("convert.input_format", "xml"),
        ("convert.output_format", "json"),
    ]);

    assert_eq!(settings.convert.input_format, Format::Xml);
    assert_eq!(settings.convert.output_format, Format::Json);
}

#[test]
fn test_validate_requires_input() {
    let settings = settings_with(&[]);

    assert!(matches!(
        settings.validate(),
        Err(CoreError::ConfigError(_))
    ));
}

#[test]
fn test_validate_rejects_unknown_version() {
    let settings = settings_with(&[("convert.input", "card.vcf"), ("convert.version", "5.0")]);

    assert!(matches!(
        settings.validate(),
        Err(CoreError::InvalidInput(_))
    ));
}

#[test]
fn test_validate_accepts_complete_settings() {
    let settings = settings_with(&[("convert.input", "card.vcf"), ("convert.version", "3.0")]);

    assert!(settings.validate().is_ok());
    assert_eq!(settings.convert.version.as_deref(), Some("3.0"));
}
