//! Builds cards from tokens supplied by a format adapter.

use super::warning::{Warning, WarningKind};
use crate::model::{
    ParameterBag, RawProperty, VCard, VCardVersion, ValueShape, ValueType, WireValue, keys,
};
use crate::scribe::{Scribe, ScribeRegistry, WireToken};

/// A property as tokenised by a format adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentToken {
    pub group: Option<String>,
    pub name: String,
    /// Parameters in document order. A nameless parameter (vCard 2.1
    /// `TEL;HOME:`) has no name and is read as a `TYPE` value.
    pub parameters: Vec<(Option<String>, String)>,
    /// Data type declared outside the parameters, such as the jCard type slot.
    pub data_type: Option<ValueType>,
    pub value: WireValue,
    /// Source line, for warnings.
    pub line: Option<usize>,
}

/// A card read from a document, with the problems met while reading it.
#[derive(Debug, Clone)]
pub struct Decoded {
    pub card: VCard,
    pub warnings: Vec<Warning>,
}

/// Accumulates the properties of one card.
#[derive(Debug)]
pub struct CardDecoder<'r> {
    registry: &'r ScribeRegistry,
    card: VCard,
    warnings: Vec<Warning>,
}

impl<'r> CardDecoder<'r> {
    #[must_use]
    pub fn new(registry: &'r ScribeRegistry, version: VCardVersion) -> Self {
        Self {
            registry,
            card: VCard::with_version(version),
            warnings: Vec::new(),
        }
    }

    #[must_use]
    pub fn version(&self) -> VCardVersion {
        self.card.version()
    }

    pub fn set_version(&mut self, version: VCardVersion) {
        self.card.set_version(version);
    }

    /// How the value of property `name` should be split.
    #[must_use]
    pub fn value_shape(&self, name: &str) -> ValueShape {
        self.registry
            .lookup_by_name(name, self.version())
            .map_or(ValueShape::Raw, Scribe::value_shape)
    }

    /// Component names of structured property `name`.
    #[must_use]
    pub fn component_labels(&self, name: &str) -> &'static [&'static str] {
        self.registry
            .lookup_by_name(name, self.version())
            .map_or(&[] as &[&str], Scribe::component_labels)
    }

    pub fn warn(&mut self, warning: Warning) {
        tracing::debug!(%warning, "Recoverable problem while reading");
        self.warnings.push(warning);
    }

    /// ## Summary
    /// Adds the property described by `token` to the card.
    ///
    /// Names without a scribe go to the registry's fallback. A value the
    /// scribe cannot parse is kept as a [`RawProperty`] and a warning is
    /// recorded.
    pub fn push(&mut self, token: ContentToken) {
        let version = self.version();
        let ContentToken {
            group,
            name,
            parameters: raw_parameters,
            data_type,
            value,
            line,
        } = token;

        let mut parameters = ParameterBag::new();
        for (parameter, parameter_value) in raw_parameters {
            parameters.add(parameter.as_deref().unwrap_or(keys::TYPE), parameter_value);
        }

        let Some(scribe) = self.registry.lookup_by_name(&name, version) else {
            self.warn(
                Warning::new(WarningKind::UnregisteredType, "no scribe and no fallback")
                    .for_property(name)
                    .at_line(line),
            );
            return;
        };

        let default_type = scribe.default_data_type(version);
        let data_type = match data_type {
            Some(declared) => {
                if declared != default_type && !parameters.contains(keys::VALUE) {
                    parameters.set(keys::VALUE, declared.as_str());
                }
                declared
            }
            None => default_type,
        };

        let token = WireToken {
            group,
            name,
            parameters,
            data_type,
            value,
        };

        match scribe.parse(token.clone(), version) {
            Ok(property) => self.card.add_boxed(property),
            Err(failure) => {
                self.warn(
                    Warning::new(WarningKind::ParseFailure, failure.reason)
                        .for_property(token.name.clone())
                        .at_line(line),
                );
                self.card.add_property(RawProperty::from_parts(
                    token.group,
                    token.name,
                    token.parameters,
                    token.value,
                ));
            }
        }
    }

    #[must_use]
    pub fn finish(self) -> Decoded {
        tracing::trace!(
            properties = self.card.len(),
            warnings = self.warnings.len(),
            "Card decoded"
        );
        Decoded {
            card: self.card,
            warnings: self.warnings,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{HasLanguage, HasPref, Note, Revision, VCardProperty};

    fn token(name: &str, parameters: &[(Option<&str>, &str)], value: WireValue) -> ContentToken {
        ContentToken {
            group: None,
            name: name.to_owned(),
            parameters: parameters
                .iter()
                .map(|(n, v)| (n.map(str::to_owned), (*v).to_owned()))
                .collect(),
            data_type: None,
            value,
            line: Some(3),
        }
    }

    #[test]
    fn known_property_is_typed() {
        let registry = ScribeRegistry::new();
        let mut decoder = CardDecoder::new(&registry, VCardVersion::V4);
        decoder.push(token(
            "note",
            &[(Some("LANGUAGE"), "en")],
            WireValue::Text("hello".to_owned()),
        ));

        let decoded = decoder.finish();
        let note = decoded.card.property::<Note>().expect("a note");
        assert_eq!(note.value, "hello");
        assert_eq!(note.language(), Some("en"));
        assert!(decoded.warnings.is_empty());
    }

    #[test]
    fn nameless_parameters_become_type() {
        let registry = ScribeRegistry::new();
        let mut decoder = CardDecoder::new(&registry, VCardVersion::V2_1);
        decoder.push(token(
            "X-PHONE",
            &[(None, "HOME"), (None, "VOICE")],
            WireValue::Raw("555".to_owned()),
        ));

        let card = decoder.finish().card;
        let raw = card.raw_properties("x-phone").next().expect("raw property");
        assert_eq!(raw.parameters().get_all("TYPE"), ["HOME", "VOICE"]);
    }

    #[test]
    fn unparseable_value_is_kept_raw() {
        let registry = ScribeRegistry::new();
        let mut decoder = CardDecoder::new(&registry, VCardVersion::V4);
        decoder.push(token("REV", &[], WireValue::Raw("someday".to_owned())));

        let decoded = decoder.finish();
        assert!(decoded.card.property::<Revision>().is_none());
        let raw = decoded.card.raw_properties("REV").next().expect("kept raw");
        assert_eq!(raw.value, WireValue::Raw("someday".to_owned()));
        assert_eq!(decoded.warnings.len(), 1);
        assert_eq!(decoded.warnings[0].kind, WarningKind::ParseFailure);
        assert_eq!(decoded.warnings[0].line, Some(3));
    }

    #[test]
    fn malformed_parameter_is_not_a_read_error() {
        let registry = ScribeRegistry::new();
        let mut decoder = CardDecoder::new(&registry, VCardVersion::V4);
        decoder.push(token(
            "NOTE",
            &[(Some("PREF"), "abc")],
            WireValue::Text("hi".to_owned()),
        ));

        let decoded = decoder.finish();
        let note = decoded.card.property::<Note>().expect("a note");
        assert!(note.pref().is_err());
        assert_eq!(note.parameters().get("PREF"), Some("abc"));
        assert!(decoded.warnings.is_empty());
    }

    #[test]
    fn declared_data_type_is_kept_when_not_the_default() {
        let registry = ScribeRegistry::new();
        let mut decoder = CardDecoder::new(&registry, VCardVersion::V4);
        let mut uid = token("UID", &[], WireValue::Raw("abc".to_owned()));
        uid.data_type = Some(ValueType::Text);
        decoder.push(uid);

        let card = decoder.finish().card;
        assert_eq!(card.properties()[0].parameters().get("VALUE"), Some("text"));
    }

    #[test]
    fn without_fallback_unknown_names_are_skipped() {
        let registry = ScribeRegistry::empty();
        let mut decoder = CardDecoder::new(&registry, VCardVersion::V4);
        decoder.push(token("X-FOO", &[], WireValue::Raw("bar".to_owned())));

        let decoded = decoder.finish();
        assert!(decoded.card.is_empty());
        assert_eq!(decoded.warnings[0].kind, WarningKind::UnregisteredType);
    }
}
