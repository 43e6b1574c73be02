//! xCard parsing.

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use super::component_index;
use crate::error::{VCardError, VCardResult};
use crate::io::decode::{CardDecoder, ContentToken, Decoded};
use crate::io::warning::{Warning, WarningKind};
use crate::model::{VCardVersion, ValueShape, ValueType, WireValue};
use crate::scribe::ScribeRegistry;

/// ## Summary
/// Parses every card in an xCard document.
///
/// The root may be `<vcards>` or a lone `<vcard>`. Elements that do not fit
/// the xCard structure are skipped with a warning on the affected card.
///
/// ## Errors
/// Returns `VCardError::Xml` if the document is not well-formed XML, and
/// `VCardError::InvalidDocument` if the root element is not an xCard root.
#[tracing::instrument(skip(input, registry), fields(input_len = input.len()))]
pub fn read(input: &str, registry: &ScribeRegistry) -> VCardResult<Vec<Decoded>> {
    let root = parse_tree(input)?;

    let cards: Vec<Decoded> = match root.name.as_str() {
        "vcards" => root
            .elements()
            .filter(|element| {
                let is_card = element.name == "vcard";
                if !is_card {
                    tracing::debug!(element = %element.name, "Skipping non-vcard element");
                }
                is_card
            })
            .map(|card| read_card(card, registry))
            .collect(),
        "vcard" => vec![read_card(&root, registry)],
        other => {
            return Err(VCardError::InvalidDocument(format!(
                "unexpected root element <{other}>"
            )));
        }
    };

    tracing::debug!(count = cards.len(), "Parsed xCards");

    Ok(cards)
}

fn read_card(card: &Element, registry: &ScribeRegistry) -> Decoded {
    let mut decoder = CardDecoder::new(registry, VCardVersion::V4);

    for child in card.elements() {
        if child.name != "group" {
            read_property(&mut decoder, child, None);
            continue;
        }

        let group = child.attribute("name");
        if group.is_none() {
            decoder.warn(Warning::new(
                WarningKind::MalformedElement,
                "<group> without a name attribute",
            ));
        }
        for property in child.elements() {
            read_property(&mut decoder, property, group);
        }
    }

    decoder.finish()
}

fn read_property(decoder: &mut CardDecoder<'_>, element: &Element, group: Option<&str>) {
    let name = element.name.to_ascii_uppercase();
    let mut parameters = Vec::new();
    let mut values = Vec::new();

    for child in element.elements() {
        if child.name != "parameters" {
            values.push(child);
            continue;
        }
        for parameter in child.elements() {
            let parameter_name = parameter.name.to_ascii_uppercase();
            for value in parameter.elements() {
                parameters.push((Some(parameter_name.clone()), value.text()));
            }
        }
    }

    let shape = decoder.value_shape(&name);
    let labels = decoder.component_labels(&name);
    // Properties without a scribe keep whatever layout they were written in.
    let structured = match shape {
        ValueShape::Structured => true,
        ValueShape::Raw => values
            .iter()
            .any(|value| component_index(labels, &value.name).is_some()),
        ValueShape::Text | ValueShape::List => false,
    };

    if values.len() > 1 && shape == ValueShape::Text {
        decoder.warn(
            Warning::new(WarningKind::MalformedElement, "extra value elements ignored")
                .for_property(name.clone()),
        );
    }

    let (data_type, value) = if structured {
        (None, structured_value(decoder, &name, labels, &values))
    } else {
        let data_type = values.first().map(|value| ValueType::parse(&value.name));
        let value = match shape {
            ValueShape::Text => {
                WireValue::Text(values.first().copied().map(Element::text).unwrap_or_default())
            }
            ValueShape::List => {
                WireValue::List(values.iter().copied().map(Element::text).collect())
            }
            ValueShape::Raw | ValueShape::Structured => match values.as_slice() {
                [] => WireValue::Raw(String::new()),
                [single] => WireValue::Raw(single.text()),
                several => WireValue::List(several.iter().copied().map(Element::text).collect()),
            },
        };
        (data_type, value)
    };

    decoder.push(ContentToken {
        group: group.map(str::to_owned),
        name,
        parameters,
        data_type,
        value,
        line: None,
    });
}

/// Collects component elements by position. Elements that name no
/// component are skipped with a warning.
fn structured_value(
    decoder: &mut CardDecoder<'_>,
    name: &str,
    labels: &[&str],
    values: &[&Element],
) -> WireValue {
    let mut components: Vec<Vec<String>> = vec![Vec::new(); labels.len()];
    for value in values {
        let Some(index) = component_index(labels, &value.name) else {
            decoder.warn(
                Warning::new(
                    WarningKind::MalformedElement,
                    format!("unknown component <{}>", value.name),
                )
                .for_property(name),
            );
            continue;
        };
        if components.len() <= index {
            components.resize(index + 1, Vec::new());
        }
        let text = value.text();
        if let Some(component) = components.get_mut(index)
            && !text.is_empty()
        {
            component.push(text);
        }
    }
    WireValue::Structured(components)
}

/// A parsed XML element. Names are local names; namespaces are not checked.
#[derive(Debug)]
struct Element {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<Node>,
}

#[derive(Debug)]
enum Node {
    Element(Element),
    Text(String),
}

impl Element {
    fn open(start: &BytesStart<'_>) -> VCardResult<Self> {
        let local_name_bytes = start.local_name();
        let name = std::str::from_utf8(local_name_bytes.as_ref())
            .map_err(|e| VCardError::Xml(e.to_string()))?
            .to_owned();

        let mut attributes = Vec::new();
        for attr in start.attributes().flatten() {
            let key = std::str::from_utf8(attr.key.local_name().as_ref())
                .map_err(|e| VCardError::Xml(e.to_string()))?
                .to_owned();
            let value = std::str::from_utf8(&attr.value)
                .map_err(|e| VCardError::Xml(e.to_string()))?
                .to_owned();
            attributes.push((key, value));
        }

        Ok(Self {
            name,
            attributes,
            children: Vec::new(),
        })
    }

    fn elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|child| match child {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        })
    }

    fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Concatenated character data of the element's direct children.
    fn text(&self) -> String {
        self.children
            .iter()
            .filter_map(|child| match child {
                Node::Text(text) => Some(text.as_str()),
                Node::Element(_) => None,
            })
            .collect()
    }

    fn push_text(&mut self, text: &str) {
        if let Some(Node::Text(existing)) = self.children.last_mut() {
            existing.push_str(text);
        } else {
            self.children.push(Node::Text(text.to_owned()));
        }
    }
}

/// Reads the whole document into an element tree. Character data is kept
/// exactly as written.
fn parse_tree(input: &str) -> VCardResult<Element> {
    let mut reader = Reader::from_str(input);
    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        let event = reader
            .read_event()
            .map_err(|e| VCardError::Xml(e.to_string()))?;
        match event {
            Event::Start(ref e) => stack.push(Element::open(e)?),
            Event::Empty(ref e) => {
                let element = Element::open(e)?;
                close(&mut stack, &mut root, element)?;
            }
            Event::End(_) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| VCardError::Xml("unbalanced end tag".to_owned()))?;
                close(&mut stack, &mut root, element)?;
            }
            Event::Text(ref e) => {
                if let Some(parent) = stack.last_mut() {
                    let decoded = reader
                        .decoder()
                        .decode(e.as_ref())
                        .map_err(|e| VCardError::Xml(e.to_string()))?;
                    parent.push_text(&decoded);
                }
            }
            Event::CData(ref e) => {
                if let Some(parent) = stack.last_mut() {
                    let decoded = reader
                        .decoder()
                        .decode(e)
                        .map_err(|e| VCardError::Xml(e.to_string()))?;
                    parent.push_text(&decoded);
                }
            }
            Event::GeneralRef(ref e) => {
                if let Some(parent) = stack.last_mut() {
                    let decoded = reader
                        .decoder()
                        .decode(e)
                        .map_err(|e| VCardError::Xml(e.to_string()))?;
                    parent.push_text(&resolve_reference(&decoded)?);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !stack.is_empty() {
        return Err(VCardError::Xml("unexpected end of document".to_owned()));
    }
    root.ok_or_else(|| VCardError::InvalidDocument("document has no root element".to_owned()))
}

fn close(
    stack: &mut [Element],
    root: &mut Option<Element>,
    element: Element,
) -> VCardResult<()> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(Node::Element(element));
        return Ok(());
    }
    if root.is_some() {
        return Err(VCardError::Xml("more than one root element".to_owned()));
    }
    *root = Some(element);
    Ok(())
}

/// Resolves `&name;` for the predefined entities and character references.
fn resolve_reference(name: &str) -> VCardResult<String> {
    let resolved = match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        _ => name.strip_prefix('#').and_then(|code| {
            let code = match code.strip_prefix('x') {
                Some(hex) => u32::from_str_radix(hex, 16).ok(),
                None => code.parse().ok(),
            };
            code.and_then(char::from_u32)
        }),
    };

    resolved
        .map(String::from)
        .ok_or_else(|| VCardError::Xml(format!("unknown entity &{name};")))
}
