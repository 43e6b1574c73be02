//! jCard serialization.

use serde_json::{Map, Value, json};

use crate::error::VCardResult;
use crate::io::encode::{Encoded, WriteOptions, encode};
use crate::model::{VCard, VCardVersion, WireValue, keys};
use crate::scribe::{ScribeRegistry, WireToken};

/// ## Summary
/// Builds the jCard tree for `cards`.
///
/// A single card becomes one `["vcard", [...]]` array; any other number of
/// cards becomes an array of those. The target version is always 4.0.
///
/// ## Errors
/// Returns an error if encoding a card fails; see [`encode`].
#[tracing::instrument(skip_all, fields(cards = cards.len()))]
pub fn to_value(
    cards: &[VCard],
    registry: &ScribeRegistry,
    options: &WriteOptions,
) -> VCardResult<Value> {
    let options = WriteOptions {
        version: Some(VCardVersion::V4),
        ..*options
    };

    let mut values = Vec::with_capacity(cards.len());
    for card in cards {
        let encoded = encode(card, registry, &options)?;
        for warning in &encoded.warnings {
            tracing::warn!(%warning, "Problem while writing card");
        }
        values.push(card_value(&encoded));
    }

    if values.len() == 1
        && let Some(single) = values.pop()
    {
        return Ok(single);
    }
    Ok(Value::Array(values))
}

/// Serializes cards to a jCard document.
///
/// ## Errors
/// Returns an error if encoding a card or serializing the tree fails.
pub fn write(
    cards: &[VCard],
    registry: &ScribeRegistry,
    options: &WriteOptions,
) -> VCardResult<String> {
    let value = to_value(cards, registry, options)?;
    let output = serde_json::to_string(&value)?;
    tracing::debug!(output_len = output.len(), "jCard written");
    Ok(output)
}

/// Serializes cards to an indented jCard document.
///
/// ## Errors
/// See [`write`].
pub fn write_pretty(
    cards: &[VCard],
    registry: &ScribeRegistry,
    options: &WriteOptions,
) -> VCardResult<String> {
    let value = to_value(cards, registry, options)?;
    Ok(serde_json::to_string_pretty(&value)?)
}

/// Serializes a single card.
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

fn card_value(card: &Encoded) -> Value {
    let mut properties = Vec::with_capacity(card.tokens.len() + 1);
    properties.push(json!(["version", {}, "text", card.version.as_str()]));
    properties.extend(card.tokens.iter().map(property_value));
    json!(["vcard", properties])
}

fn property_value(token: &WireToken) -> Value {
    let mut parameters = Map::new();
    if let Some(group) = &token.group {
        parameters.insert("group".to_owned(), Value::String(group.clone()));
    }
    // The type slot carries VALUE.
    for (name, values) in token.parameters.iter() {
        if name.eq_ignore_ascii_case(keys::VALUE) {
            continue;
        }
        let value = match values {
            [single] => Value::String(single.clone()),
            _ => Value::Array(values.iter().cloned().map(Value::String).collect()),
        };
        parameters.insert(name.to_ascii_lowercase(), value);
    }

    let mut property = vec![
        Value::String(token.name.to_ascii_lowercase()),
        Value::Object(parameters),
        Value::String(token.data_type.as_str().to_owned()),
    ];
    match &token.value {
        WireValue::Text(text) | WireValue::Raw(text) => property.push(Value::String(text.clone())),
        WireValue::List(values) if values.is_empty() => property.push(Value::String(String::new())),
        WireValue::List(values) => property.extend(values.iter().cloned().map(Value::String)),
        WireValue::Structured(components) => property.push(Value::Array(
            components.iter().map(|component| component_value(component)).collect(),
        )),
    }

    Value::Array(property)
}

/// One structured component: a string when it has at most one value.
fn component_value(component: &[String]) -> Value {
    match component {
        [] => Value::String(String::new()),
        [single] => Value::String(single.clone()),
        _ => Value::Array(component.iter().cloned().map(Value::String).collect()),
    }
}
