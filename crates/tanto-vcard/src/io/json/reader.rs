//! jCard parsing.

use serde_json::{Map, Value};

use crate::error::{VCardError, VCardResult};
use crate::io::decode::{CardDecoder, ContentToken, Decoded};
use crate::io::warning::{Warning, WarningKind};
use crate::model::{VCardVersion, ValueShape, ValueType, WireValue};
use crate::scribe::ScribeRegistry;

/// ## Summary
/// Parses a jCard document holding one card or an array of cards.
///
/// ## Errors
/// Returns `VCardError::Json` if the input is not JSON, and
/// `VCardError::InvalidDocument` if it is not shaped like jCard. Malformed
/// properties inside a card are skipped with a warning.
#[tracing::instrument(skip(input, registry), fields(input_len = input.len()))]
pub fn read(input: &str, registry: &ScribeRegistry) -> VCardResult<Vec<Decoded>> {
    let value: Value = serde_json::from_str(input)?;
    from_value(&value, registry)
}

/// Reads cards from an already parsed jCard tree.
///
/// ## Errors
/// Returns `VCardError::InvalidDocument` if the tree is not shaped like jCard.
pub fn from_value(value: &Value, registry: &ScribeRegistry) -> VCardResult<Vec<Decoded>> {
    let items = value
        .as_array()
        .ok_or_else(|| invalid("expected a jCard array"))?;

    if items.first().and_then(Value::as_str) == Some("vcard") {
        return Ok(vec![read_card(items, registry)?]);
    }

    let mut cards = Vec::with_capacity(items.len());
    for item in items {
        let card = item
            .as_array()
            .ok_or_else(|| invalid("expected an array of jCards"))?;
        cards.push(read_card(card, registry)?);
    }

    tracing::debug!(count = cards.len(), "Parsed jCards");

    Ok(cards)
}

fn invalid(message: &str) -> VCardError {
    VCardError::InvalidDocument(message.to_owned())
}

fn read_card(items: &[Value], registry: &ScribeRegistry) -> VCardResult<Decoded> {
    let [tag, properties] = items else {
        return Err(invalid("a jCard must be [\"vcard\", [properties]]"));
    };
    if tag.as_str() != Some("vcard") {
        return Err(invalid("a jCard must start with \"vcard\""));
    }
    let properties = properties
        .as_array()
        .ok_or_else(|| invalid("jCard properties must be an array"))?;

    // jCard has no lines; warnings carry the 1-based property position instead.
    let mut decoder = CardDecoder::new(registry, VCardVersion::V4);
    for (index, property) in properties.iter().enumerate() {
        read_property(&mut decoder, property, index + 1);
    }

    Ok(decoder.finish())
}

fn read_property(decoder: &mut CardDecoder<'_>, property: &Value, position: usize) {
    let Some((name, parameters, data_type, values)) = split_property(property) else {
        decoder.warn(
            Warning::new(
                WarningKind::MalformedElement,
                "expected [name, {parameters}, type, value...]",
            )
            .at_line(Some(position)),
        );
        return;
    };

    let name = name.to_ascii_uppercase();
    if name == "VERSION" {
        let version = values.first().map(scalar_text).unwrap_or_default();
        if version != VCardVersion::V4.as_str() {
            decoder.warn(
                Warning::new(
                    WarningKind::UnsupportedVersion,
                    format!("jCard is always 4.0, found {version:?}"),
                )
                .at_line(Some(position)),
            );
        }
        return;
    }

    let mut group = None;
    let mut token_parameters = Vec::new();
    for (key, value) in parameters {
        if key.eq_ignore_ascii_case("group") {
            group = value.as_str().map(str::to_owned);
            continue;
        }
        let key = key.to_ascii_uppercase();
        match value {
            Value::Array(items) => {
                token_parameters
                    .extend(items.iter().map(|item| (Some(key.clone()), scalar_text(item))));
            }
            other => token_parameters.push((Some(key), scalar_text(other))),
        }
    }

    let value = match decoder.value_shape(&name) {
        ValueShape::Text => WireValue::Text(joined(values)),
        ValueShape::Raw => raw(values),
        ValueShape::List => WireValue::List(values.iter().flat_map(texts).collect()),
        ValueShape::Structured => {
            WireValue::Structured(values.first().map(structured).unwrap_or_default())
        }
    };

    decoder.push(ContentToken {
        group,
        name,
        parameters: token_parameters,
        data_type: Some(ValueType::parse(data_type)),
        value,
        line: Some(position),
    });
}

fn split_property(property: &Value) -> Option<(&str, &Map<String, Value>, &str, &[Value])> {
    let [name, parameters, data_type, values @ ..] = property.as_array()?.as_slice() else {
        return None;
    };
    Some((
        name.as_str()?,
        parameters.as_object()?,
        data_type.as_str()?,
        values,
    ))
}

/// Text of a scalar. Nested arrays and objects are kept as JSON.
fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Null => String::new(),
        Value::Bool(_) | Value::Number(_) | Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

/// Values of a list item or structured component. An empty string is an
/// empty list.
fn texts(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items.iter().map(scalar_text).collect(),
        Value::String(text) if text.is_empty() => Vec::new(),
        other => vec![scalar_text(other)],
    }
}

fn structured(value: &Value) -> Vec<Vec<String>> {
    match value {
        Value::Array(components) => components.iter().map(texts).collect(),
        other => vec![texts(other)],
    }
}

/// A value for a property without a scribe, kept in the layout it was
/// written in: one string, several values, or one structured array.
fn raw(values: &[Value]) -> WireValue {
    match values {
        [] => WireValue::Raw(String::new()),
        [Value::Array(components)] => {
            WireValue::Structured(components.iter().map(texts).collect())
        }
        [single] => WireValue::Raw(scalar_text(single)),
        several => WireValue::List(several.iter().map(scalar_text).collect()),
    }
}

/// A single-valued reading of `values`: several values are joined with
/// commas and structured values with semicolons.
fn joined(values: &[Value]) -> String {
    values
        .iter()
        .map(|value| match value {
            Value::Array(components) => components
                .iter()
                .map(|component| texts(component).join(","))
                .collect::<Vec<_>>()
                .join(";"),
            other => scalar_text(other),
        })
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        Categories, HasLanguage, Note, RawProperty, StructuredName, VCardProperty,
    };

    fn read_one(json: &str) -> Decoded {
        let mut cards = read(json, &ScribeRegistry::new()).expect("valid jCard");
        assert_eq!(cards.len(), 1);
        cards.remove(0)
    }

    #[test]
    fn reads_a_single_card() {
        let decoded = read_one(
            r#"["vcard", [
                ["version", {}, "text", "4.0"],
                ["note", {"group": "item1", "language": "en"}, "text", "hello"]
            ]]"#,
        );

        let note = decoded.card.property::<Note>().expect("a note");
        assert_eq!(note.value, "hello");
        assert_eq!(note.group(), Some("item1"));
        assert_eq!(note.language(), Some("en"));
        assert!(decoded.warnings.is_empty());
    }

    #[test]
    fn reads_an_array_of_cards() {
        let cards = read(
            r#"[["vcard", [["fn", {}, "text", "A"]]], ["vcard", [["fn", {}, "text", "B"]]]]"#,
            &ScribeRegistry::new(),
        )
        .expect("valid jCard");

        let names: Vec<_> = cards.iter().filter_map(|d| d.card.formatted_name()).collect();
        assert_eq!(names, ["A", "B"]);
    }

    #[test]
    fn reads_lists_and_structured_values() {
        let decoded = read_one(
            r#"["vcard", [
                ["categories", {}, "text", "a", "b"],
                ["n", {}, "text", ["Doe", ["John", "Q"], "", "", ""]]
            ]]"#,
        );

        let categories = decoded.card.property::<Categories>().expect("categories");
        assert_eq!(categories.value, ["a", "b"]);
        let name = decoded.card.property::<StructuredName>().expect("a name");
        assert_eq!(name.value.family, ["Doe"]);
        assert_eq!(name.value.given, ["John", "Q"]);
        assert!(name.value.suffixes.is_empty());
    }

    #[test]
    fn type_slot_becomes_value_parameter() {
        let decoded = read_one(r#"["vcard", [["x-count", {}, "integer", 42]]]"#);

        let raw = decoded
            .card
            .properties_of::<RawProperty>()
            .next()
            .expect("raw property");
        assert_eq!(raw.value, WireValue::Raw("42".to_owned()));
        assert_eq!(raw.parameters().get("VALUE"), Some("integer"));
    }

    #[test]
    fn unknown_properties_keep_every_value() {
        let decoded = read_one(
            r#"["vcard", [
                ["x-list", {}, "unknown", "a", "b"],
                ["x-parts", {}, "unknown", ["a", "", ["c", "d"]]],
                ["x-empty", {}, "unknown"]
            ]]"#,
        );

        let value = |name| {
            decoded
                .card
                .raw_properties(name)
                .next()
                .map(|raw| raw.value.clone())
        };
        assert_eq!(
            value("X-LIST"),
            Some(WireValue::List(vec!["a".to_owned(), "b".to_owned()]))
        );
        assert_eq!(
            value("X-PARTS"),
            Some(WireValue::Structured(vec![
                vec!["a".to_owned()],
                Vec::new(),
                vec!["c".to_owned(), "d".to_owned()],
            ]))
        );
        assert_eq!(value("X-EMPTY"), Some(WireValue::Raw(String::new())));
    }

    #[test]
    fn malformed_properties_are_warnings() {
        let decoded = read_one(
            r#"["vcard", [
                ["version", {}, "text", "3.0"],
                ["note", "not-an-object", "text", "x"],
                ["fn", {}, "text", "Kept"]
            ]]"#,
        );

        let kinds: Vec<_> = decoded.warnings.iter().map(|w| w.kind).collect();
        assert_eq!(
            kinds,
            [WarningKind::UnsupportedVersion, WarningKind::MalformedElement]
        );
        assert_eq!(decoded.warnings[1].line, Some(2));
        assert_eq!(decoded.card.formatted_name(), Some("Kept"));
    }

    #[test]
    fn wrong_shapes_are_errors() {
        let registry = ScribeRegistry::new();

        assert!(matches!(read("{", &registry), Err(VCardError::Json(_))));
        assert!(matches!(
            read(r#"{"vcard": []}"#, &registry),
            Err(VCardError::InvalidDocument(_))
        ));
        assert!(matches!(
            read(r#"["vcard"]"#, &registry),
            Err(VCardError::InvalidDocument(_))
        ));
        assert!(matches!(
            read(r#"[["vcard", {}]]"#, &registry),
            Err(VCardError::InvalidDocument(_))
        ));
    }
}
