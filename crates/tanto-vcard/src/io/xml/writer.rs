//! xCard serialization.

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use super::{NAMESPACE, component_name};
use crate::error::{VCardError, VCardResult};
use crate::io::encode::{Encoded, WriteOptions, encode};
use crate::model::{ParameterBag, VCard, VCardVersion, WireValue, keys};
use crate::scribe::{Scribe, ScribeRegistry, WireToken};

/// ## Summary
/// Serializes cards to an xCard document.
///
/// The target version is always 4.0 whatever `options.version` says.
/// Consecutive properties sharing a group are written inside one `<group>`.
///
/// ## Errors
/// Returns an error if encoding a card fails (see [`encode`]) or if the XML
/// writer fails.
#[tracing::instrument(skip_all, fields(cards = cards.len()))]
pub fn write(
    cards: &[VCard],
    registry: &ScribeRegistry,
    options: &WriteOptions,
) -> VCardResult<String> {
    let options = WriteOptions {
        version: Some(VCardVersion::V4),
        ..*options
    };

    let mut encoded = Vec::with_capacity(cards.len());
    for card in cards {
        let card = encode(card, registry, &options)?;
        for warning in &card.warnings {
            tracing::warn!(%warning, "Problem while writing card");
        }
        encoded.push(card);
    }

    let bytes = serialize(&encoded, registry).map_err(|e| VCardError::Xml(e.to_string()))?;
    let output = String::from_utf8(bytes).map_err(|e| {
        tracing::error!("Generated invalid UTF-8 in xCard output: {e}");
        VCardError::Xml(e.to_string())
    })?;

    tracing::debug!(output_len = output.len(), "xCard written");

    Ok(output)
}

/// Serializes a single card as an xCard document.
///
/// ## Errors
/// See [`write`].
pub fn write_single(
    card: &VCard,
    registry: &ScribeRegistry,
    options: &WriteOptions,
) -> VCardResult<String> {
    write(std::slice::from_ref(card), registry, options)
}

fn serialize(cards: &[Encoded], registry: &ScribeRegistry) -> Result<Vec<u8>, quick_xml::Error> {
    let mut writer = Writer::new(Vec::new());

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;

    let mut root = BytesStart::new("vcards");
    root.push_attribute(("xmlns", NAMESPACE));
    writer.write_event(Event::Start(root))?;

    for card in cards {
        writer.write_event(Event::Start(BytesStart::new("vcard")))?;

        let mut open_group: Option<&str> = None;
        for token in &card.tokens {
            let group = token.group.as_deref();
            if group != open_group {
                if open_group.is_some() {
                    writer.write_event(Event::End(BytesEnd::new("group")))?;
                }
                if let Some(name) = group {
                    let mut elem = BytesStart::new("group");
                    elem.push_attribute(("name", name));
                    writer.write_event(Event::Start(elem))?;
                }
                open_group = group;
            }

            let labels = registry
                .lookup_by_name(&token.name, VCardVersion::V4)
                .map_or(&[] as &[&str], Scribe::component_labels);
            write_property(&mut writer, token, labels)?;
        }
        if open_group.is_some() {
            writer.write_event(Event::End(BytesEnd::new("group")))?;
        }

        writer.write_event(Event::End(BytesEnd::new("vcard")))?;
    }

    writer.write_event(Event::End(BytesEnd::new("vcards")))?;

    Ok(writer.into_inner())
}

fn write_property<W: std::io::Write>(
    writer: &mut Writer<W>,
    token: &WireToken,
    labels: &[&str],
) -> Result<(), quick_xml::Error> {
    let name = token.name.to_ascii_lowercase();
    writer.write_event(Event::Start(BytesStart::new(name.as_str())))?;

    write_parameters(writer, &token.parameters)?;

    // The value element names the data type, so VALUE is never written as a
    // parameter.
    let type_name = token.data_type.as_str();
    match &token.value {
        WireValue::Text(text) | WireValue::Raw(text) => {
            write_text_element(writer, type_name, text)?;
        }
        WireValue::List(values) => {
            // An empty list still needs a value element.
            if values.is_empty() {
                write_text_element(writer, type_name, "")?;
            }
            for value in values {
                write_text_element(writer, type_name, value)?;
            }
        }
        WireValue::Structured(components) => {
            if components.is_empty() {
                write_text_element(writer, type_name, "")?;
            }
            for (index, component) in components.iter().enumerate() {
                let element = component_name(labels, index);
                let mut values = component.iter().filter(|value| !value.is_empty()).peekable();
                if values.peek().is_none() {
                    writer.write_event(Event::Empty(BytesStart::new(element.as_str())))?;
                }
                for value in values {
                    write_text_element(writer, &element, value)?;
                }
            }
        }
    }

    writer.write_event(Event::End(BytesEnd::new(name.as_str())))?;
    Ok(())
}

fn write_parameters<W: std::io::Write>(
    writer: &mut Writer<W>,
    parameters: &ParameterBag,
) -> Result<(), quick_xml::Error> {
    let mut parameters = parameters
        .iter()
        .filter(|(name, _)| !name.eq_ignore_ascii_case(keys::VALUE))
        .peekable();
    if parameters.peek().is_none() {
        return Ok(());
    }

    writer.write_event(Event::Start(BytesStart::new("parameters")))?;
    for (name, values) in parameters {
        let element = name.to_ascii_lowercase();
        let value_type = parameter_value_type(name);
        writer.write_event(Event::Start(BytesStart::new(element.as_str())))?;
        for value in values {
            write_text_element(writer, value_type, value)?;
        }
        writer.write_event(Event::End(BytesEnd::new(element.as_str())))?;
    }
    writer.write_event(Event::End(BytesEnd::new("parameters")))?;

    Ok(())
}

/// Element wrapping each value of parameter `name`.
fn parameter_value_type(name: &str) -> &'static str {
    if name.eq_ignore_ascii_case(keys::PREF) || name.eq_ignore_ascii_case(keys::INDEX) {
        "integer"
    } else if name.eq_ignore_ascii_case(keys::LANGUAGE) {
        "language-tag"
    } else {
        "text"
    }
}

/// Writes a simple text element.
fn write_text_element<W: std::io::Write>(
    writer: &mut Writer<W>,
    name: &str,
    text: &str,
) -> Result<(), quick_xml::Error> {
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}
