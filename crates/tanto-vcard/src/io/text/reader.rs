//! Plain-text vCard parsing.

use super::escape::{split_escaped, unescape_text};
use super::fold::unfold;
use super::lexer::parse_content_line;
use crate::io::decode::{CardDecoder, ContentToken, Decoded};
use crate::io::warning::{Warning, WarningKind};
use crate::model::{VCardVersion, ValueShape, WireValue};
use crate::scribe::ScribeRegistry;

/// Options for reading plain-text documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReadOptions {
    /// Version assumed until a `VERSION` property is seen.
    pub default_version: VCardVersion,
}

/// ## Summary
/// Parses every card in a vCard document.
///
/// Reading never fails: malformed lines, unknown versions and a missing
/// `END:VCARD` are reported as warnings on the affected card. Text outside
/// `BEGIN:VCARD`/`END:VCARD` is ignored.
#[must_use]
#[tracing::instrument(skip(input, registry), fields(input_len = input.len()))]
pub fn read(input: &str, registry: &ScribeRegistry, options: ReadOptions) -> Vec<Decoded> {
    let unfolded = unfold(input);
    let mut cards = Vec::new();
    let mut current: Option<CardDecoder<'_>> = None;

    for (index, line) in unfolded.lines().enumerate() {
        let line_num = index + 1;
        if line.trim().is_empty() {
            continue;
        }

        if line.eq_ignore_ascii_case("BEGIN:VCARD") {
            if let Some(mut open) = current.take() {
                open.warn(unterminated(line_num));
                cards.push(open.finish());
            }
            current = Some(CardDecoder::new(registry, options.default_version));
            continue;
        }

        if line.eq_ignore_ascii_case("END:VCARD") {
            if let Some(decoder) = current.take() {
                cards.push(decoder.finish());
            }
            continue;
        }

        let Some(decoder) = current.as_mut() else {
            tracing::trace!(line_num, "Skipping line outside a card");
            continue;
        };

        read_line(decoder, line, line_num);
    }

    if let Some(mut open) = current {
        open.warn(unterminated(unfolded.lines().count()));
        cards.push(open.finish());
    }

    tracing::debug!(count = cards.len(), "Parsed vCards");

    cards
}

/// Parses the first card of a document.
#[must_use]
pub fn read_single(input: &str, registry: &ScribeRegistry, options: ReadOptions) -> Option<Decoded> {
    read(input, registry, options).into_iter().next()
}

fn read_line(decoder: &mut CardDecoder<'_>, line: &str, line_num: usize) {
    let caret = decoder.version() != VCardVersion::V2_1;
    let content = match parse_content_line(line, line_num, caret) {
        Ok(content) => content,
        Err(err) => {
            decoder.warn(
                Warning::new(WarningKind::MalformedLine, err.to_string()).at_line(Some(line_num)),
            );
            return;
        }
    };

    if content.name.eq_ignore_ascii_case("VERSION") {
        match VCardVersion::parse(&content.value) {
            Some(version) => decoder.set_version(version),
            None => decoder.warn(
                Warning::new(
                    WarningKind::UnsupportedVersion,
                    format!("unsupported version {:?}", content.value),
                )
                .at_line(Some(line_num)),
            ),
        }
        return;
    }

    let value = split_value(&content.value, decoder.value_shape(&content.name));
    let parameters = content
        .params
        .into_iter()
        .flat_map(|(name, values)| values.into_iter().map(move |value| (name.clone(), value)))
        .collect();

    decoder.push(ContentToken {
        group: content.group,
        name: content.name,
        parameters,
        data_type: None,
        value,
        line: Some(line_num),
    });
}

/// Splits and unescapes a raw value according to the scribe's shape.
#[must_use]
pub fn split_value(raw: &str, shape: ValueShape) -> WireValue {
    match shape {
        ValueShape::Text => WireValue::Text(unescape_text(raw)),
        ValueShape::List => WireValue::List(split_list(raw)),
        ValueShape::Structured => {
            WireValue::Structured(split_escaped(raw, ';').into_iter().map(split_list).collect())
        }
        ValueShape::Raw => WireValue::Raw(raw.to_owned()),
    }
}

fn split_list(raw: &str) -> Vec<String> {
    if raw.is_empty() {
        return Vec::new();
    }
    split_escaped(raw, ',')
        .into_iter()
        .map(unescape_text)
        .collect()
}

fn unterminated(line_num: usize) -> Warning {
    Warning::new(WarningKind::UnterminatedCard, "missing END:VCARD").at_line(Some(line_num))
}
