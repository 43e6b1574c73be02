//! Scribe registry.
//!
//! ## Summary
//! Maps property types to scribes for writing and property names to scribes
//! for reading. A registry is built once, then shared read-only; every lookup
//! takes `&self`, so a registry can serve any number of threads.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::{Arc, LazyLock};

use super::{
    RawScribe, RevisionScribe, Scribe, StructuredNameScribe, TextListScribe, TextScribe,
    TypedScribe, UriScribe,
};
use crate::error::{VCardError, VCardResult};
use crate::model::{
    Categories, Email, Expertise, FormattedName, FreeBusyUrl, Hobby, Interest, Language, Note,
    ProductId, PropertyType, RawProperty, Uid, Url, VCardProperty, VCardVersion, ValueType,
    VersionSet,
};

#[derive(Debug, Clone)]
struct Binding {
    scribe: Arc<dyn Scribe>,
    versions: VersionSet,
}

/// Registry of scribes keyed by property type and by property name.
#[derive(Debug, Clone)]
pub struct ScribeRegistry {
    by_type: HashMap<TypeId, Binding>,
    by_name: HashMap<String, TypeId>,
    fallback: Option<Arc<dyn Scribe>>,
}

static SHARED: LazyLock<ScribeRegistry> = LazyLock::new(ScribeRegistry::new);

impl ScribeRegistry {
    /// ## Summary
    /// Creates a registry with every built-in scribe and the raw fallback.
    #[must_use]
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry
            .register(TextScribe::<FormattedName>::new())
            .register(StructuredNameScribe)
            .register(TextScribe::<Note>::new())
            .register(TextScribe::<Email>::new().legacy_pref())
            .register(UriScribe::<Url>::new().legacy_pref())
            .register(TextListScribe::<Categories>::new())
            .register(TextScribe::<Language>::typed(ValueType::LanguageTag))
            .register(UriScribe::<FreeBusyUrl>::new())
            .register(TextScribe::<Hobby>::new())
            .register(TextScribe::<Interest>::new())
            .register(TextScribe::<Expertise>::new())
            .register(RevisionScribe)
            .register(TextScribe::<Uid>::typed(ValueType::Uri).before_v4(ValueType::Text))
            .register(TextScribe::<ProductId>::new());
        registry.set_fallback(Some(Arc::new(RawScribe)));
        registry
    }

    /// Creates a registry with no scribes and no fallback.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            by_type: HashMap::new(),
            by_name: HashMap::new(),
            fallback: None,
        }
    }

    /// The process-wide default registry, built on first use.
    #[must_use]
    pub fn shared() -> &'static Self {
        &SHARED
    }

    /// Registers a scribe for its property type, replacing any previous one.
    pub fn register<S>(&mut self, scribe: S) -> &mut Self
    where
        S: TypedScribe + 'static,
    {
        self.register_as::<S::Property>(Arc::new(scribe))
    }

    /// ## Summary
    /// Registers `scribe` for property type `P`, replacing any previous one.
    ///
    /// The scribe's property name is bound to `P` for reading. A name claimed
    /// by another type is taken over; the other type can still be written.
    pub fn register_as<P: PropertyType>(&mut self, scribe: Arc<dyn Scribe>) -> &mut Self {
        let type_id = TypeId::of::<P>();
        let name = scribe.property_name().to_ascii_uppercase();

        let previous = self.by_type.insert(
            type_id,
            Binding {
                scribe,
                versions: P::SUPPORTED_VERSIONS,
            },
        );
        if let Some(previous) = previous {
            let previous_name = previous.scribe.property_name().to_ascii_uppercase();
            if previous_name != name && self.by_name.get(&previous_name) == Some(&type_id) {
                self.by_name.remove(&previous_name);
            }
        }

        tracing::trace!(property = %name, type_name = std::any::type_name::<P>(), "Registered scribe");
        self.by_name.insert(name, type_id);
        self
    }

    /// Removes the scribe for `P`. Returns `true` if one was registered.
    pub fn unregister<P: PropertyType>(&mut self) -> bool {
        let type_id = TypeId::of::<P>();
        let Some(binding) = self.by_type.remove(&type_id) else {
            return false;
        };
        let name = binding.scribe.property_name().to_ascii_uppercase();
        if self.by_name.get(&name) == Some(&type_id) {
            self.by_name.remove(&name);
        }
        true
    }

    /// Sets the scribe used for unknown property names and raw properties.
    pub fn set_fallback(&mut self, scribe: Option<Arc<dyn Scribe>>) {
        self.fallback = scribe;
    }

    #[must_use]
    pub fn fallback(&self) -> Option<&dyn Scribe> {
        self.fallback.as_deref()
    }

    /// Number of registered property types, not counting the fallback.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_type.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_type.is_empty()
    }

    /// The scribe registered for a property type, falling back to the
    /// fallback scribe.
    #[must_use]
    pub fn lookup_by_type(&self, type_id: TypeId) -> Option<&dyn Scribe> {
        self.by_type
            .get(&type_id)
            .map(|binding| binding.scribe.as_ref())
            .or_else(|| self.fallback())
    }

    /// ## Summary
    /// The scribe that writes `property`.
    ///
    /// ## Errors
    /// Returns `VCardError::UnregisteredType` if the property's type has no
    /// scribe and there is no fallback.
    pub fn scribe_for(&self, property: &dyn VCardProperty) -> VCardResult<&dyn Scribe> {
        self.lookup_by_type(Any::type_id(property.as_any()))
            .ok_or(VCardError::UnregisteredType {
                type_name: property.type_name(),
            })
    }

    /// The scribe that reads property `name`, compared case-insensitively.
    /// Unknown names go to the fallback.
    #[must_use]
    pub fn lookup_by_name(&self, name: &str, version: VCardVersion) -> Option<&dyn Scribe> {
        let binding = self
            .by_name
            .get(&name.to_ascii_uppercase())
            .and_then(|type_id| self.by_type.get(type_id));

        match binding {
            Some(binding) => {
                if !binding.versions.contains(version) {
                    tracing::trace!(property = %name, %version, "Reading property outside its declared versions");
                }
                Some(binding.scribe.as_ref())
            }
            None => self.fallback(),
        }
    }

    /// Versions a registered property type may be written in.
    #[must_use]
    pub fn supported_versions(&self, type_id: TypeId) -> Option<VersionSet> {
        self.by_type.get(&type_id).map(|binding| binding.versions)
    }

    /// Whether `property` may be written in `version`.
    ///
    /// Unregistered types, raw properties included, answer from their own
    /// declaration.
    #[must_use]
    pub fn is_supported(&self, property: &dyn VCardProperty, version: VCardVersion) -> bool {
        self.supported_versions(Any::type_id(property.as_any()))
            .unwrap_or_else(|| property.supported_versions())
            .contains(version)
    }

    /// Whether a scribe other than the fallback reads `name`.
    #[must_use]
    pub fn is_registered_name(&self, name: &str) -> bool {
        self.by_name.contains_key(&name.to_ascii_uppercase())
    }

    /// Whether property type `P` has its own scribe.
    #[must_use]
    pub fn is_registered<P: PropertyType>(&self) -> bool {
        self.by_type.contains_key(&TypeId::of::<P>())
    }

    /// Whether raw properties can be read and written.
    #[must_use]
    pub fn has_fallback(&self) -> bool {
        self.fallback.is_some() || self.by_type.contains_key(&TypeId::of::<RawProperty>())
    }
}

impl Default for ScribeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::*;
    use crate::error::ParseFailure;
    use crate::model::{ParameterBag, TextValued, ValueShape, WireValue};

    crate::property_type! {
        struct Mood(String) {
            name: "X-MOOD",
            versions: VersionSet::V4_ONLY,
            text: |mood| mood.value.clone(),
        }
    }

    impl TextValued for Mood {
        fn from_text(text: String) -> Self {
            Self::new(text)
        }

        fn text(&self) -> &str {
            &self.value
        }
    }

    #[derive(Debug)]
    struct LoudNoteScribe;

    impl Scribe for LoudNoteScribe {
        fn property_name(&self) -> &str {
            "NOTE"
        }

        fn default_data_type(&self, _version: VCardVersion) -> ValueType {
            ValueType::Text
        }

        fn write_value(&self, property: &dyn VCardProperty, _version: VCardVersion) -> WireValue {
            WireValue::Text(property.text_value().to_uppercase())
        }

        fn parse_value(
            &self,
            value: WireValue,
            _parameters: &ParameterBag,
            _version: VCardVersion,
        ) -> Result<Box<dyn VCardProperty>, ParseFailure> {
            Ok(Box::new(Note::new(value.into_text().to_lowercase())))
        }
    }

    #[test]
    fn builtins_are_registered() {
        let registry = ScribeRegistry::new();

        for name in [
            "FN", "n", "Note", "EMAIL", "URL", "CATEGORIES", "LANG", "FBURL", "HOBBY", "INTEREST",
            "EXPERTISE", "REV", "UID", "PRODID",
        ] {
            assert!(registry.is_registered_name(name), "{name} should be registered");
        }
        assert!(registry.is_registered::<FormattedName>());
        assert!(registry.has_fallback());
    }

    #[test]
    fn name_lookup_is_case_insensitive() {
        let registry = ScribeRegistry::new();
        let scribe = registry
            .lookup_by_name("fn", VCardVersion::V4)
            .expect("FN is built in");

        assert_eq!(scribe.property_name(), "FN");
    }

    #[test]
    fn unknown_names_use_the_fallback() {
        let registry = ScribeRegistry::new();
        let scribe = registry
            .lookup_by_name("X-UNKNOWN", VCardVersion::V4)
            .expect("fallback is installed");

        assert_eq!(scribe.value_shape(), ValueShape::Raw);
        assert_eq!(scribe.default_data_type(VCardVersion::V4), ValueType::Unknown);
        assert_eq!(scribe.default_data_type(VCardVersion::V3), ValueType::Text);

        assert!(ScribeRegistry::empty()
            .lookup_by_name("X-UNKNOWN", VCardVersion::V4)
            .is_none());
    }

    #[test]
    fn unregistered_type_without_fallback_is_an_error() {
        let registry = ScribeRegistry::empty();

        let err = registry
            .scribe_for(&Note::new("x"))
            .expect_err("empty registry");
        assert!(matches!(err, VCardError::UnregisteredType { type_name: "Note" }));
    }

    #[test]
    fn registering_again_replaces_the_scribe() {
        let mut registry = ScribeRegistry::new();
        registry.register_as::<Note>(Arc::new(LoudNoteScribe));

        let scribe = registry
            .scribe_for(&Note::new("quiet"))
            .expect("note is registered");
        assert_eq!(
            scribe.write_value(&Note::new("quiet"), VCardVersion::V4),
            WireValue::Text("QUIET".to_owned())
        );
        assert_eq!(registry.len(), ScribeRegistry::new().len());
    }

    #[test]
    fn third_party_types_can_be_registered_and_removed() {
        let mut registry = ScribeRegistry::new();
        registry.register(TextScribe::<Mood>::new());

        assert!(registry.is_registered_name("x-mood"));
        assert_eq!(
            registry.supported_versions(TypeId::of::<Mood>()),
            Some(VersionSet::V4_ONLY)
        );
        assert!(!registry.is_supported(&Mood::new("happy"), VCardVersion::V3));
        assert_eq!(
            Mood::new("happy").in_group("item1").group(),
            Some("item1")
        );

        assert!(registry.unregister::<Mood>());
        assert!(!registry.is_registered_name("X-MOOD"));
        assert!(!registry.unregister::<Mood>());
    }

    #[test]
    fn raw_properties_answer_from_their_own_declaration() {
        let registry = ScribeRegistry::new();
        let raw = RawProperty::text("X-ANYTHING", "value");

        assert!(registry.is_supported(&raw, VCardVersion::V2_1));
        assert!(registry.scribe_for(&raw).is_ok());
    }

    #[test]
    fn shared_registry_serves_many_threads() {
        let handles: Vec<_> = (0..8)
            .map(|_| {
                thread::spawn(|| {
                    let registry = ScribeRegistry::shared();
                    registry
                        .lookup_by_name("EMAIL", VCardVersion::V3)
                        .map(|scribe| scribe.property_name().to_owned())
                })
            })
            .collect();

        for handle in handles {
            let name = handle.join().expect("lookup thread should not panic");
            assert_eq!(name.as_deref(), Some("EMAIL"));
        }
        assert!(std::ptr::eq(ScribeRegistry::shared(), ScribeRegistry::shared()));
    }
}
