//! Structured name (`N`).

use crate::model::capability::{HasAltId, HasLanguage};
use crate::model::parameter::keys;
use crate::model::version::VersionSet;
use crate::model::VCardProperty;

/// Components of a structured name. Each component may hold several values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersonName {
    pub family: Vec<String>,
    pub given: Vec<String>,
    pub additional: Vec<String>,
    pub prefixes: Vec<String>,
    pub suffixes: Vec<String>,
}

impl PersonName {
    /// Creates a name with a single family and given name.
    #[must_use]
    pub fn simple(family: impl Into<String>, given: impl Into<String>) -> Self {
        Self {
            family: vec![family.into()],
            given: vec![given.into()],
            ..Self::default()
        }
    }

    /// Builds a name from wire components; missing trailing components are
    /// empty and extra ones are ignored.
    #[must_use]
    pub fn from_components(components: Vec<Vec<String>>) -> Self {
        let mut components = components.into_iter();
        let mut next = || components.next().unwrap_or_default();
        Self {
            family: next(),
            given: next(),
            additional: next(),
            prefixes: next(),
            suffixes: next(),
        }
    }

    #[must_use]
    pub fn to_components(&self) -> Vec<Vec<String>> {
        vec![
            self.family.clone(),
            self.given.clone(),
            self.additional.clone(),
            self.prefixes.clone(),
            self.suffixes.clone(),
        ]
    }
}

crate::property_type! {
    /// Structured name of the card's subject (`N`).
    pub struct StructuredName(PersonName) {
        name: "N",
        versions: VersionSet::ALL,
        text: |name| name
            .value
            .to_components()
            .iter()
            .map(|component| component.join(","))
            .collect::<Vec<_>>()
            .join(";"),
    }
}

impl StructuredName {
    /// Sort keys from the `SORT-AS` parameter.
    #[must_use]
    pub fn sort_as(&self) -> &[String] {
        self.parameters().get_all(keys::SORT_AS)
    }

    /// Replaces the `SORT-AS` values; an empty slice removes the parameter.
    pub fn set_sort_as(&mut self, sort_keys: &[&str]) {
        self.parameters_mut()
            .set_all(keys::SORT_AS, sort_keys.iter().copied());
    }
}

impl HasAltId for StructuredName {}
impl HasLanguage for StructuredName {}
