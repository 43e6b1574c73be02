//! Reads a card document in one format and writes it in another.

use anyhow::{Context, Result};
use tanto_core::config::{ConvertConfig, Format};
use tanto_vcard::io::{Decoded, ReadOptions, WriteOptions, json, text, xml};
use tanto_vcard::model::{VCard, VCardVersion};
use tanto_vcard::scribe::ScribeRegistry;

/// ## Summary
/// Converts `input` as described by `settings`.
///
/// Problems that did not stop reading are logged as warnings.
///
/// ## Errors
/// Returns an error if the input cannot be read in its format, if the target
/// version is unknown, or if writing fails.
#[tracing::instrument(skip(input, settings), fields(
    input_format = ?settings.input_format,
    output_format = ?settings.output_format
))]
pub fn convert(input: &str, settings: &ConvertConfig) -> Result<String> {
    let registry = ScribeRegistry::shared();

    let decoded = read(input, settings.input_format, registry)?;
    let mut cards = Vec::with_capacity(decoded.len());
    for Decoded { card, warnings } in decoded {
        for warning in &warnings {
            tracing::warn!(%warning, "Problem while reading card");
        }
        cards.push(card);
    }
    tracing::info!(count = cards.len(), "Cards read");

    let options = write_options(settings)?;
    write(&cards, settings.output_format, registry, &options)
}

fn read(input: &str, format: Format, registry: &ScribeRegistry) -> Result<Vec<Decoded>> {
    Ok(match format {
        Format::Text => text::read(input, registry, ReadOptions::default()),
        Format::Xml => xml::read(input, registry).context("Failed to read xCard input")?,
        Format::Json => json::read(input, registry).context("Failed to read jCard input")?,
    })
}

fn write_options(settings: &ConvertConfig) -> Result<WriteOptions> {
    let version = settings
        .version
        .as_deref()
        .map(str::parse::<VCardVersion>)
        .transpose()?;

    Ok(WriteOptions {
        version,
        strict: settings.strict,
        add_prod_id: settings.add_prod_id,
    })
}

fn write(
    cards: &[VCard],
    format: Format,
    registry: &ScribeRegistry,
    options: &WriteOptions,
) -> Result<String> {
    let output = match format {
        Format::Text => text::write(cards, registry, options),
        Format::Xml => xml::write(cards, registry, options),
        Format::Json => json::write_pretty(cards, registry, options),
    };
    output.with_context(|| format!("Failed to write {format:?} output"))
}
