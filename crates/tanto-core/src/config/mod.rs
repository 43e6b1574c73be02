use anyhow::Result;
use config::Config;
use serde::Deserialize;

use crate::error::{CoreError, CoreResult};

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub logging: LoggingConfig,
    pub convert: ConvertConfig,
}

/// Serialized vCard representation handled by the converter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Format {
    /// Plain-text `BEGIN:VCARD` content lines.
    Text,
    /// xCard (RFC 6351).
    Xml,
    /// jCard (RFC 7095).
    Json,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ConvertConfig {
    /// Path of the document to read.
    pub input: String,
    pub input_format: Format,
    pub output_format: Format,
    /// Target version for plain-text output (`2.1`, `3.0` or `4.0`).
    /// When unset, each card keeps its own version.
    pub version: Option<String>,
    pub strict: bool,
    pub add_prod_id: bool,
}

impl Settings {
    /// ## Summary
    /// Loads configuration from environment variables and an optional
    /// `config.toml` into a `Settings`.
    ///
    /// Environment variables use the `TANTO_` prefix and `__` as the section
    /// separator, e.g. `TANTO_CONVERT__OUTPUT_FORMAT=json`.
    ///
    /// ## Errors
    /// Returns an error if building the configuration or deserializing it fails.
    pub fn load() -> Result<Self> {
        Ok(Self::builder()?
            .add_source(
                config::Environment::with_prefix("TANTO")
                    .separator("__")
                    .ignore_empty(true)
                    .try_parsing(true),
            )
            .add_source(config::File::with_name("config.toml").required(false))
            .build()?
            .try_deserialize::<Settings>()?)
    }

    /// ## Summary
    /// Returns a configuration builder pre-populated with every default.
    ///
    /// ## Errors
    /// Returns an error if a default cannot be set.
    pub fn builder() -> Result<config::ConfigBuilder<config::builder::DefaultState>> {
        Ok(Config::builder()
            .set_default("logging.level", "info")?
            .set_default("convert.input", "")?
            .set_default("convert.input_format", "text")?
            .set_default("convert.output_format", "text")?
            .set_default("convert.strict", true)?
            .set_default("convert.add_prod_id", false)?)
    }

    /// ## Summary
    /// Checks the settings for values that deserialize but cannot be used.
    ///
    /// ## Errors
    /// Returns `CoreError::ConfigError` when no input path is configured and
    /// `CoreError::InvalidInput` when the target version is not recognised.
    pub fn validate(&self) -> CoreResult<()> {
        if self.convert.input.trim().is_empty() {
            return Err(CoreError::ConfigError(
                "convert.input must name the document to convert".to_string(),
            ));
        }

        if let Some(version) = &self.convert.version
            && !matches!(version.trim(), "2.1" | "3.0" | "4.0")
        {
            return Err(CoreError::InvalidInput(format!(
                "unsupported target version {version:?}"
            )));
        }

        Ok(())
    }
}

/// ## Summary
/// Loads configuration from environment variables and `.env` file, then validates it.
///
/// ## Errors
/// Returns an error if loading, deserializing or validating the configuration fails.
pub fn load_config() -> Result<Settings> {
    dotenvy::dotenv().ok();

    let settings = Settings::load()?;
    settings.validate()?;
    tracing::debug!(input = %settings.convert.input, "Configuration validated");

    Ok(settings)
}

#[cfg(test)]
mod tests;
