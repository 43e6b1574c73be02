//! Properties without a registered scribe.

use std::any::Any;

use crate::model::value::{ValueType, WireValue};
use crate::model::version::VersionSet;
use crate::model::{ParameterBag, VCardProperty};

/// A property kept in wire form.
///
/// Produced when reading a property name no scribe is registered for, or
/// when a scribe fails to parse a value. Writing it reproduces the original
/// name, parameters and value.
#[derive(Debug, Clone, PartialEq)]
pub struct RawProperty {
    name: String,
    pub value: WireValue,
    group: Option<String>,
    parameters: ParameterBag,
}

impl RawProperty {
    #[must_use]
    pub fn new(name: impl Into<String>, value: WireValue) -> Self {
        Self {
            name: name.into(),
            value,
            group: None,
            parameters: ParameterBag::new(),
        }
    }

    /// Creates a raw property with a plain text value.
    #[must_use]
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(name, WireValue::Raw(value.into()))
    }

    /// Rebuilds a raw property from every part of a wire token.
    #[must_use]
    pub fn from_parts(
        group: Option<String>,
        name: impl Into<String>,
        parameters: ParameterBag,
        value: WireValue,
    ) -> Self {
        Self {
            name: name.into(),
            value,
            group,
            parameters,
        }
    }

    /// The declared `VALUE` data type, if any.
    #[must_use]
    pub fn data_type(&self) -> Option<ValueType> {
        self.parameters
            .get(crate::model::parameter::keys::VALUE)
            .map(ValueType::parse)
    }
}

impl VCardProperty for RawProperty {
    fn property_name(&self) -> &str {
        &self.name
    }

    fn type_name(&self) -> &'static str {
        "RawProperty"
    }

    fn supported_versions(&self) -> VersionSet {
        VersionSet::ALL
    }

    fn group(&self) -> Option<&str> {
        self.group.as_deref()
    }

    fn set_group(&mut self, group: Option<String>) {
        self.group = group;
    }

    fn parameters(&self) -> &ParameterBag {
        &self.parameters
    }

    fn parameters_mut(&mut self) -> &mut ParameterBag {
        &mut self.parameters
    }

    fn copy(&self) -> Box<dyn VCardProperty> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn text_value(&self) -> String {
        self.value.clone().into_text()
    }
}
