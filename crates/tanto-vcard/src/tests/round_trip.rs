//! Round-trip tests for every format.
//!
//! Each fixture is read from text and written in the target format. The
//! output is read back and written again; both writes must be identical.
//! Cards built in code cover raw list and structured values and names no
//! reader accepts.

use super::fixtures::*;
use crate::io::{ReadOptions, WriteOptions, json, text, xml};
use crate::model::{
    FormattedName, HasLanguage, Note, ParameterBag, RawProperty, VCard, VCardProperty, WireValue,
};
use crate::scribe::ScribeRegistry;

#[derive(Debug, Clone, Copy)]
enum Format {
    Text,
    Xml,
    Json,
}

impl Format {
    fn write(self, cards: &[VCard], registry: &ScribeRegistry) -> Result<String, String> {
        let options = WriteOptions::default();
        match self {
            Self::Text => text::write(cards, registry, &options),
            Self::Xml => xml::write(cards, registry, &options),
            Self::Json => json::write(cards, registry, &options),
        }
        .map_err(|e| format!("{self:?} write failed: {e}"))
    }

    fn read(self, input: &str, registry: &ScribeRegistry) -> Result<Vec<VCard>, String> {
        let decoded = match self {
            Self::Text => text::read(input, registry, ReadOptions::default()),
            Self::Xml => xml::read(input, registry)
                .map_err(|e| format!("xCard read failed: {e}\n{input}"))?,
            Self::Json => json::read(input, registry)
                .map_err(|e| format!("jCard read failed: {e}\n{input}"))?,
        };
        Ok(decoded.into_iter().map(|decoded| decoded.card).collect())
    }
}

/// Read a text fixture, write it twice through `format`, and compare.
fn round_trip(input: &str, format: Format) -> Result<(), String> {
    let registry = ScribeRegistry::new();
    let cards = Format::Text.read(input, &registry)?;
    round_trip_cards(&cards, format, &registry)
}

/// Write `cards` twice through `format`, reading back in between, and compare.
fn round_trip_cards(
    cards: &[VCard],
    format: Format,
    registry: &ScribeRegistry,
) -> Result<(), String> {
    // First write
    let first = format.write(cards, registry)?;

    // Read back and write again
    let reparsed = format.read(&first, registry)?;
    if reparsed.len() != cards.len() {
        return Err(format!(
            "Card count mismatch: {} vs {}",
            cards.len(),
            reparsed.len()
        ));
    }
    let second = format.write(&reparsed, registry)?;

    if first != second {
        return Err(format!(
            "Output changed on the second pass:\n{first}\n---\n{second}"
        ));
    }

    Ok(())
}

#[test]
fn round_trip_all_fixtures_as_text() {
    for (name, input) in ALL {
        round_trip(input, Format::Text).unwrap_or_else(|e| panic!("{name}: {e}"));
    }
}

#[test]
fn round_trip_all_fixtures_as_xcard() {
    for (name, input) in ALL {
        round_trip(input, Format::Xml).unwrap_or_else(|e| panic!("{name}: {e}"));
    }
}

#[test]
fn round_trip_all_fixtures_as_jcard() {
    for (name, input) in ALL {
        round_trip(input, Format::Json).unwrap_or_else(|e| panic!("{name}: {e}"));
    }
}

#[test_log::test]
fn canonical_text_is_reproduced_exactly() {
    let registry = ScribeRegistry::new();
    for input in [VCARD_AUTHOR, VCARD_BASIC, VCARD_GROUPED, VCARD_V3, VCARD_MULTIPLE] {
        let cards = Format::Text.read(input, &registry).expect("read");
        let output = Format::Text.write(&cards, &registry).expect("write");
        assert_eq!(output, input);
    }
}

#[test]
fn xcard_and_jcard_carry_the_same_card() {
    let registry = ScribeRegistry::new();
    let cards = Format::Text.read(VCARD_AUTHOR, &registry).expect("read");

    let direct = Format::Json.write(&cards, &registry).expect("write");
    let xcard = Format::Xml.write(&cards, &registry).expect("write");
    let via_xcard = Format::Xml.read(&xcard, &registry).expect("read");

    assert_eq!(Format::Json.write(&via_xcard, &registry).expect("write"), direct);
}

#[test]
fn round_trip_keeps_typed_properties() {
    let registry = ScribeRegistry::new();
    let cards = Format::Text.read(VCARD_INTERESTS, &registry).expect("read");

    for format in [Format::Text, Format::Xml, Format::Json] {
        let output = format.write(&cards, &registry).expect("write");
        let reparsed = format.read(&output, &registry).expect("read");
        let card = &reparsed[0];

        let hobby = card.property::<crate::model::Hobby>().expect("hobby");
        assert_eq!(hobby.level(), Ok(Some(crate::model::InterestLevel::High)));
        let interest = card.property::<crate::model::Interest>().expect("interest");
        assert_eq!(crate::model::HasIndex::index(interest), Ok(Some(1)));
        assert!(card.raw_properties("HOBBY").next().is_none(), "{format:?}");
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| (*value).to_owned()).collect()
}

/// Cards built in code, with values and names the fixtures never contain.
fn edge_cards() -> Vec<VCard> {
    let mut card = VCard::new();
    card.add_property(FormattedName::new("Edge Case"));
    card.add_property(RawProperty::new("X-LIST", WireValue::List(strings(&["a", "b,c", ""]))));
    card.add_property(RawProperty::new("X-ONE", WireValue::List(strings(&["only"]))));
    card.add_property(RawProperty::new("X-NONE", WireValue::List(Vec::new())));
    card.add_property(RawProperty::new(
        "X-PARTS",
        WireValue::Structured(vec![strings(&["a"]), Vec::new(), strings(&["c", "d"])]),
    ));
    card.add_property(RawProperty::new("X-NO-PARTS", WireValue::Structured(Vec::new())));
    card.add_property(RawProperty::new(
        "X-TRAILING",
        WireValue::Structured(vec![strings(&["a"]), strings(&[""])]),
    ));

    let mut note = Note::new("nested group").in_group("a.b");
    note.set_language(Some("en"));
    note.parameters_mut().set("X PARAM", "dropped");
    note.parameters_mut().set("X-QUOTED", "say \"hi\": yes; no");
    card.add_property(note);
    card.add_property(Note::new("spaced group").in_group("my group"));
    card.add_property(RawProperty::text("X BAD", "unwritable name"));
    card.add_property(RawProperty::from_parts(
        Some("item1".to_owned()),
        "X-GOOD",
        ParameterBag::new(),
        WireValue::Raw("kept".to_owned()),
    ));

    vec![card]
}

#[test_log::test]
fn round_trip_edge_cases_in_every_format() {
    let registry = ScribeRegistry::new();
    let cards = edge_cards();

    for format in [Format::Text, Format::Xml, Format::Json] {
        round_trip_cards(&cards, format, &registry).unwrap_or_else(|e| panic!("{e}"));
    }
}

#[test]
fn notes_with_invalid_groups_survive_every_format() {
    let registry = ScribeRegistry::new();
    let cards = edge_cards();

    for format in [Format::Text, Format::Xml, Format::Json] {
        let output = format.write(&cards, &registry).expect("write");
        let reparsed = format.read(&output, &registry).expect("read");

        let notes: Vec<_> = reparsed[0]
            .properties_of::<Note>()
            .map(|note| (note.value.as_str(), note.group(), note.language()))
            .collect();
        assert_eq!(
            notes,
            [("nested group", None, Some("en")), ("spaced group", None, None)],
            "{format:?}"
        );
        assert!(reparsed[0].raw_properties("X-GOOD").next().is_some(), "{format:?}");
        assert!(reparsed[0].raw_properties("X BAD").next().is_none(), "{format:?}");
    }
}

#[test]
fn raw_values_keep_their_layout() {
    let registry = ScribeRegistry::new();

    for (format, input) in [(Format::Json, JCARD_RAW_VALUES), (Format::Xml, XCARD_RAW_VALUES)] {
        let cards = format.read(input, &registry).expect("read");
        round_trip_cards(&cards, format, &registry).unwrap_or_else(|e| panic!("{e}"));

        let card = &cards[0];
        let value = |name| card.raw_properties(name).next().map(|raw| raw.value.clone());
        assert_eq!(value("X-LIST"), Some(WireValue::List(strings(&["a", "b"]))), "{format:?}");
        assert_eq!(
            value("X-PARTS"),
            Some(WireValue::Structured(vec![
                strings(&["a"]),
                Vec::new(),
                strings(&["c", "d"]),
            ])),
            "{format:?}"
        );
        assert_eq!(value("X-EMPTY"), Some(WireValue::Raw(String::new())), "{format:?}");

        // The same values survive a trip through the other format.
        let other = match format {
            Format::Json => Format::Xml,
            Format::Xml | Format::Text => Format::Json,
        };
        let output = other.write(&cards, &registry).expect("write");
        let converted = other.read(&output, &registry).expect("read");
        let raw_values = |card: &VCard| {
            card.properties_of::<RawProperty>()
                .map(|raw| raw.value.clone())
                .collect::<Vec<_>>()
        };
        assert_eq!(raw_values(&converted[0]), raw_values(card), "{format:?}");
    }
}

#[test]
fn oversized_xcard_components_are_contained() {
    let registry = ScribeRegistry::new();
    let decoded = xml::read(XCARD_OVERSIZED_COMPONENTS, &registry).expect("read");

    assert_eq!(decoded[0].warnings.len(), 2);
    let cards: Vec<VCard> = decoded.into_iter().map(|decoded| decoded.card).collect();
    for format in [Format::Text, Format::Xml, Format::Json] {
        round_trip_cards(&cards, format, &registry).unwrap_or_else(|e| panic!("{e}"));
    }
}
