//! Plain-text vCard serialization.

use super::escape::{escape_param_value, escape_text};
use super::fold::fold_line;
use crate::error::VCardResult;
use crate::io::encode::{Encoded, WriteOptions, encode};
use crate::model::{ParameterBag, VCard, VCardVersion, WireValue, keys};
use crate::scribe::{ScribeRegistry, WireToken};

/// ## Summary
/// Serializes cards to a vCard document.
///
/// Lines end with CRLF and are folded at 75 octets.
///
/// ## Errors
/// Returns an error if encoding a card fails; see [`encode`].
#[tracing::instrument(skip_all, fields(cards = cards.len()))]
pub fn write(
    cards: &[VCard],
    registry: &ScribeRegistry,
    options: &WriteOptions,
) -> VCardResult<String> {
    let mut output = String::new();

    for card in cards {
        let encoded = encode(card, registry, options)?;
        for warning in &encoded.warnings {
            tracing::warn!(%warning, "Problem while writing card");
        }
        write_card(&encoded, &mut output);
    }

    tracing::debug!(output_len = output.len(), "vCard text written");

    Ok(output)
}

/// Serializes a single card.
///
/// ## Errors
/// Returns an error if encoding the card fails; see [`encode`].
pub fn write_single(
    card: &VCard,
    registry: &ScribeRegistry,
    options: &WriteOptions,
) -> VCardResult<String> {
    write(std::slice::from_ref(card), registry, options)
}

/// Writes an encoded card, `BEGIN` to `END`.
pub fn write_card(encoded: &Encoded, output: &mut String) {
    output.push_str("BEGIN:VCARD\r\n");
    output.push_str("VERSION:");
    output.push_str(encoded.version.as_str());
    output.push_str("\r\n");

    for token in &encoded.tokens {
        output.push_str(&fold_line(&content_line(token, encoded.version)));
        output.push_str("\r\n");
    }

    output.push_str("END:VCARD\r\n");
}

/// Renders a token as one unfolded content line.
#[must_use]
pub fn content_line(token: &WireToken, version: VCardVersion) -> String {
    let mut line = String::new();

    if let Some(group) = &token.group {
        line.push_str(group);
        line.push('.');
    }
    line.push_str(&token.name);
    write_parameters(&token.parameters, version, &mut line);
    line.push(':');
    write_value(&token.value, &mut line);

    line
}

fn write_parameters(parameters: &ParameterBag, version: VCardVersion, line: &mut String) {
    let caret = version != VCardVersion::V2_1;

    for (name, values) in parameters.iter() {
        if version == VCardVersion::V2_1 && name.eq_ignore_ascii_case(keys::TYPE) {
            for value in values {
                line.push(';');
                push_param_value(value, caret, line);
            }
            continue;
        }

        line.push(';');
        line.push_str(name);
        line.push('=');
        for (i, value) in values.iter().enumerate() {
            if i > 0 {
                line.push(',');
            }
            push_param_value(value, caret, line);
        }
    }
}

fn push_param_value(value: &str, caret: bool, line: &mut String) {
    let (escaped, needs_quotes) = escape_param_value(value, caret);
    if needs_quotes {
        line.push('"');
        line.push_str(&escaped);
        line.push('"');
    } else {
        line.push_str(&escaped);
    }
}

fn write_value(value: &WireValue, line: &mut String) {
    match value {
        WireValue::Text(text) => line.push_str(&escape_text(text)),
        WireValue::List(values) => line.push_str(&join_escaped(values, ",")),
        WireValue::Structured(components) => {
            let components: Vec<String> = components
                .iter()
                .map(|component| join_escaped(component, ","))
                .collect();
            line.push_str(&components.join(";"));
        }
        // Raw values are written untouched; only line breaks would corrupt
        // the document.
        WireValue::Raw(raw) => {
            for c in raw.chars() {
                match c {
                    '\n' => line.push_str("\\n"),
                    '\r' => {}
                    _ => line.push(c),
                }
            }
        }
    }
}

fn join_escaped(values: &[String], separator: &str) -> String {
    values
        .iter()
        .map(|value| escape_text(value))
        .collect::<Vec<_>>()
        .join(separator)
}
