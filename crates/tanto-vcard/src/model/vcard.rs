//! The card container.

use super::parameter::{keys, parameter_versions};
use super::pid::Pid;
use super::property::{FormattedName, RawProperty, VCardProperty};
use super::version::VCardVersion;
use crate::error::{MalformedParameter, VCardError};
use crate::scribe::ScribeRegistry;

/// A vCard: a version and an ordered list of properties.
///
/// Properties keep insertion order, and that order is the order they are
/// written in. Cloning a card deep-copies every property.
#[derive(Debug, Clone, Default)]
pub struct VCard {
    version: VCardVersion,
    properties: Vec<Box<dyn VCardProperty>>,
}

impl VCard {
    /// Creates an empty vCard 4.0.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_version(version: VCardVersion) -> Self {
        Self {
            version,
            properties: Vec::new(),
        }
    }

    #[must_use]
    pub fn version(&self) -> VCardVersion {
        self.version
    }

    pub fn set_version(&mut self, version: VCardVersion) {
        self.version = version;
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Appends a property.
    pub fn add_property<P: VCardProperty>(&mut self, property: P) {
        self.properties.push(Box::new(property));
    }

    /// Appends an already boxed property.
    pub fn add_boxed(&mut self, property: Box<dyn VCardProperty>) {
        self.properties.push(property);
    }

    /// All properties in order.
    #[must_use]
    pub fn properties(&self) -> &[Box<dyn VCardProperty>] {
        &self.properties
    }

    pub fn properties_mut(&mut self) -> &mut [Box<dyn VCardProperty>] {
        &mut self.properties
    }

    /// Every property of type `P`, in order.
    pub fn properties_of<P: VCardProperty>(&self) -> impl Iterator<Item = &P> {
        self.properties
            .iter()
            .filter_map(|property| property.downcast_ref::<P>())
    }

    /// The first property of type `P`.
    #[must_use]
    pub fn property<P: VCardProperty>(&self) -> Option<&P> {
        self.properties_of::<P>().next()
    }

    pub fn property_mut<P: VCardProperty>(&mut self) -> Option<&mut P> {
        self.properties
            .iter_mut()
            .find_map(|property| property.downcast_mut::<P>())
    }

    /// Removes every property of type `P` and returns how many were removed.
    pub fn remove_properties<P: VCardProperty>(&mut self) -> usize {
        let before = self.properties.len();
        self.properties
            .retain(|property| !property.as_any().is::<P>());
        before - self.properties.len()
    }

    /// Keeps only the properties for which `keep` returns `true`.
    pub fn retain(&mut self, mut keep: impl FnMut(&dyn VCardProperty) -> bool) {
        self.properties.retain(|property| keep(property.as_ref()));
    }

    /// Raw properties with the given name, compared case-insensitively.
    pub fn raw_properties<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a RawProperty> {
        self.properties_of::<RawProperty>()
            .filter(move |raw| raw.property_name().eq_ignore_ascii_case(name))
    }

    /// The value of the first `FN` property.
    #[must_use]
    pub fn formatted_name(&self) -> Option<&str> {
        self.property::<FormattedName>()
            .map(|name| name.value.as_str())
    }

    /// ## Summary
    /// Checks the card against `version` without writing it.
    ///
    /// Reports properties and parameters the version does not accept, and
    /// `PREF`, `INDEX` or `PID` values that do not parse.
    #[must_use]
    pub fn validate(&self, registry: &ScribeRegistry, version: VCardVersion) -> Vec<VCardError> {
        let mut problems = Vec::new();

        for property in &self.properties {
            let property = property.as_ref();
            let name = property.property_name();

            match registry.scribe_for(property) {
                Err(_) => problems.push(VCardError::UnregisteredType {
                    type_name: property.type_name(),
                }),
                Ok(_) if !registry.is_supported(property, version) => {
                    problems.push(VCardError::VersionMismatch {
                        property: name.to_owned(),
                        version,
                    });
                }
                Ok(_) => {}
            }

            for (parameter, values) in property.parameters().iter() {
                if !parameter_versions(parameter).contains(version) {
                    problems.push(VCardError::VersionMismatch {
                        property: format!("{name} parameter {parameter}"),
                        version,
                    });
                }
                problems.extend(
                    check_values(parameter, values)
                        .err()
                        .map(VCardError::MalformedParameter),
                );
            }
        }

        problems
    }
}

fn check_values(parameter: &str, values: &[String]) -> Result<(), MalformedParameter> {
    match parameter.to_ascii_uppercase().as_str() {
        keys::PREF => check_integers(keys::PREF, values),
        keys::INDEX => check_integers(keys::INDEX, values),
        keys::PID => values.iter().try_for_each(|value| {
            value
                .parse::<Pid>()
                .map(drop)
                .map_err(|e| MalformedParameter::new(keys::PID, value.as_str(), e.to_string()))
        }),
        _ => Ok(()),
    }
}

fn check_integers(name: &'static str, values: &[String]) -> Result<(), MalformedParameter> {
    values.iter().try_for_each(|value| {
        value
            .trim()
            .parse::<u32>()
            .map(drop)
            .map_err(|e| MalformedParameter::new(name, value.as_str(), e.to_string()))
    })
}

impl<P: VCardProperty> Extend<P> for VCard {
    fn extend<I: IntoIterator<Item = P>>(&mut self, iter: I) {
        for property in iter {
            self.add_property(property);
        }
    }
}
