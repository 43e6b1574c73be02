//! Turns a card into wire tokens for a target version.

use super::text::lexer::is_token;
use super::warning::{Warning, WarningKind};
use crate::constants::PRODUCT_ID;
use crate::error::VCardResult;
use crate::model::{ProductId, VCard, VCardProperty, VCardVersion, keys, parameter_versions};
use crate::scribe::{ScribeRegistry, WireToken};

/// Options for writing cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteOptions {
    /// Target version. `None` writes each card in its own version.
    pub version: Option<VCardVersion>,
    /// Leave out properties and parameters the target version does not
    /// accept, and fail on properties no scribe can write.
    pub strict: bool,
    /// Write a `PRODID` naming this library instead of the card's own.
    pub add_prod_id: bool,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            version: None,
            strict: true,
            add_prod_id: false,
        }
    }
}

impl WriteOptions {
    /// Options targeting `version`.
    #[must_use]
    pub fn for_version(version: VCardVersion) -> Self {
        Self {
            version: Some(version),
            ..Self::default()
        }
    }
}

/// A card in wire form.
#[derive(Debug, Clone)]
pub struct Encoded {
    pub version: VCardVersion,
    /// Tokens in card order.
    pub tokens: Vec<WireToken>,
    pub warnings: Vec<Warning>,
}

/// ## Summary
/// Encodes a card into wire tokens.
///
/// Each property is written by the scribe registered for its type. In strict
/// mode properties and parameters the target version does not accept are
/// left out with a warning.
///
/// ## Errors
/// Returns `VCardError::UnregisteredType` in strict mode when a property has
/// no scribe and the registry has no fallback. Outside strict mode such
/// properties are skipped with a warning.
#[tracing::instrument(skip_all, fields(properties = card.len()))]
pub fn encode(
    card: &VCard,
    registry: &ScribeRegistry,
    options: &WriteOptions,
) -> VCardResult<Encoded> {
    let version = options.version.unwrap_or(card.version());
    let mut encoder = Encoder {
        registry,
        options,
        version,
        tokens: Vec::with_capacity(card.len() + 1),
        warnings: Vec::new(),
    };

    let product_id = ProductId::new(PRODUCT_ID);
    let replace_product_id = options.add_prod_id && registry.is_supported(&product_id, version);
    if replace_product_id {
        encoder.push(&product_id)?;
    }

    for property in card.properties() {
        if replace_product_id && property.is::<ProductId>() {
            continue;
        }
        encoder.push(property.as_ref())?;
    }

    tracing::trace!(
        tokens = encoder.tokens.len(),
        warnings = encoder.warnings.len(),
        "Card encoded"
    );

    Ok(Encoded {
        version,
        tokens: encoder.tokens,
        warnings: encoder.warnings,
    })
}

struct Encoder<'a> {
    registry: &'a ScribeRegistry,
    options: &'a WriteOptions,
    version: VCardVersion,
    tokens: Vec<WireToken>,
    warnings: Vec<Warning>,
}

impl Encoder<'_> {
    fn push(&mut self, property: &dyn VCardProperty) -> VCardResult<()> {
        let version = self.version;

        if self.options.strict && !self.registry.is_supported(property, version) {
            tracing::debug!(property = property.property_name(), %version, "Omitting property");
            self.warnings
                .push(Warning::property_omitted(property.property_name(), version));
            return Ok(());
        }

        let scribe = match self.registry.scribe_for(property) {
            Ok(scribe) => scribe,
            Err(err) if self.options.strict => return Err(err),
            Err(err) => {
                tracing::warn!(error = %err, "Skipping property");
                self.warnings.push(
                    Warning::new(WarningKind::UnregisteredType, err.to_string())
                        .for_property(property.property_name()),
                );
                return Ok(());
            }
        };

        let mut token = scribe.write(property, version);
        if !is_token(&token.name) {
            tracing::warn!(property = %token.name, "Skipping property with an invalid name");
            self.warnings.push(
                Warning::new(
                    WarningKind::InvalidName,
                    format!("invalid property name {:?}", token.name),
                )
                .for_property(token.name),
            );
            return Ok(());
        }
        drop_invalid_names(&mut token, &mut self.warnings);
        if self.options.strict {
            drop_unsupported_parameters(&mut token, version, &mut self.warnings);
        }
        self.tokens.push(token);
        Ok(())
    }
}

/// Leaves out a group or parameter names the readers would reject.
fn drop_invalid_names(token: &mut WireToken, warnings: &mut Vec<Warning>) {
    let property = token.name.as_str();
    if let Some(group) = token.group.take_if(|group| !is_token(group)) {
        tracing::debug!(property, %group, "Dropping invalid group");
        warnings.push(
            Warning::new(WarningKind::InvalidName, format!("invalid group {group:?}"))
                .for_property(property),
        );
    }
    token.parameters.retain(|name, _| {
        let keep = is_token(name);
        if !keep {
            tracing::debug!(property, parameter = name, "Dropping invalid parameter");
            warnings.push(
                Warning::new(
                    WarningKind::InvalidName,
                    format!("invalid parameter name {name:?}"),
                )
                .for_property(property),
            );
        }
        keep
    });
}

fn drop_unsupported_parameters(
    token: &mut WireToken,
    version: VCardVersion,
    warnings: &mut Vec<Warning>,
) {
    let property = token.name.as_str();
    token.parameters.retain(|name, _| {
        let keep =
            name.eq_ignore_ascii_case(keys::VALUE) || parameter_versions(name).contains(version);
        if !keep {
            tracing::debug!(property, parameter = name, %version, "Omitting parameter");
            warnings.push(Warning::parameter_omitted(property, name, version));
        }
        keep
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FormattedName, Note, RawProperty, WireValue};

    #[test]
    fn option_version_overrides_the_card() {
        let mut card = VCard::with_version(VCardVersion::V4);
        card.add_property(FormattedName::new("Jo"));

        let encoded = encode(
            &card,
            ScribeRegistry::shared(),
            &WriteOptions::for_version(VCardVersion::V3),
        )
        .expect("encodes");

        assert_eq!(encoded.version, VCardVersion::V3);
        assert_eq!(card.version(), VCardVersion::V4);
    }

    #[test]
    fn product_id_comes_first() {
        let mut card = VCard::new();
        card.add_property(Note::new("x"));
        card.add_property(ProductId::new("-//Other//EN"));
        let options = WriteOptions {
            add_prod_id: true,
            ..WriteOptions::default()
        };

        let encoded = encode(&card, ScribeRegistry::shared(), &options).expect("encodes");

        let names: Vec<_> = encoded.tokens.iter().map(|token| token.name.as_str()).collect();
        assert_eq!(names, ["PRODID", "NOTE"]);
        assert_eq!(
            encoded.tokens[0].value,
            WireValue::Text(PRODUCT_ID.to_owned())
        );
    }

    #[test]
    fn names_the_readers_reject_are_left_out() {
        let mut note = Note::new("hello").in_group("a.b");
        note.parameters_mut().set("X PARAM", "1");
        note.parameters_mut().set("X-OK", "2");
        let mut card = VCard::new();
        card.add_property(note);
        card.add_property(RawProperty::text("X BAD", "dropped"));

        let encoded =
            encode(&card, ScribeRegistry::shared(), &WriteOptions::default()).expect("encodes");

        assert_eq!(encoded.tokens.len(), 1);
        let token = &encoded.tokens[0];
        assert_eq!(token.name, "NOTE");
        assert!(token.group.is_none());
        assert_eq!(token.parameters.names().collect::<Vec<_>>(), ["X-OK"]);
        assert_eq!(encoded.warnings.len(), 3);
        assert!(
            encoded
                .warnings
                .iter()
                .all(|warning| warning.kind == WarningKind::InvalidName)
        );

        // The card keeps what it had.
        let note = card.property::<Note>().expect("a note");
        assert_eq!(note.group(), Some("a.b"));
    }

    #[test]
    fn value_parameter_survives_filtering() {
        let mut raw = RawProperty::text("X-PHOTO", "http://example.com/a.png");
        raw.parameters_mut().set("VALUE", "uri");
        raw.parameters_mut().set("CHARSET", "UTF-8");
        let mut card = VCard::with_version(VCardVersion::V3);
        card.add_property(raw);

        let encoded =
            encode(&card, ScribeRegistry::shared(), &WriteOptions::default()).expect("encodes");

        let parameters = &encoded.tokens[0].parameters;
        assert_eq!(parameters.get("VALUE"), Some("uri"));
        assert!(!parameters.contains("CHARSET"));
        assert_eq!(encoded.warnings.len(), 1);
        assert_eq!(encoded.warnings[0].kind, WarningKind::ParameterOmitted);
    }
}
