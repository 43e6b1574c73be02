//! Scribes translate typed properties to and from wire tokens.
//!
//! ## Summary
//! A [`Scribe`] knows one property name. It writes a property as a
//! [`WireToken`] (name, a copy of the parameters, a data type and a
//! [`WireValue`]) and parses a token back into a typed property. Scribes never
//! see a document format; the adapters in [`crate::io`] do the lexical work.
//!
//! The [`ScribeRegistry`] maps property types and property names to scribes.

mod name;
mod raw;
mod registry;
mod revision;
mod text;

pub use name::StructuredNameScribe;
pub use raw::RawScribe;
pub use registry::ScribeRegistry;
pub use revision::RevisionScribe;
pub use text::{TextListScribe, TextScribe, UriScribe};

use std::fmt;

use crate::error::ParseFailure;
use crate::model::{
    ParameterBag, PropertyType, VCardProperty, VCardVersion, ValueShape, ValueType, WireValue, keys,
};

/// A property in wire form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WireToken {
    pub group: Option<String>,
    pub name: String,
    pub parameters: ParameterBag,
    pub data_type: ValueType,
    pub value: WireValue,
}

/// Reads and writes one property name.
///
/// Implementations provide the value conversion; the provided `write` and
/// `parse` take care of groups, parameters and the declared data type.
pub trait Scribe: fmt::Debug + Send + Sync {
    /// Property name this scribe handles, e.g. `FN`.
    fn property_name(&self) -> &str;

    fn value_shape(&self) -> ValueShape {
        ValueShape::Text
    }

    /// Names of the components of a structured value, used by xCard.
    fn component_labels(&self) -> &'static [&'static str] {
        &[]
    }

    /// Data type written when the property has no `VALUE` parameter.
    fn default_data_type(&self, version: VCardVersion) -> ValueType;

    /// Renders the property's value. A property of an unexpected type is
    /// written as its text value.
    fn write_value(&self, property: &dyn VCardProperty, version: VCardVersion) -> WireValue;

    /// Builds a property from a wire value.
    ///
    /// ## Errors
    /// Returns `ParseFailure` when the value cannot be represented by the
    /// property type.
    fn parse_value(
        &self,
        value: WireValue,
        parameters: &ParameterBag,
        version: VCardVersion,
    ) -> Result<Box<dyn VCardProperty>, ParseFailure>;

    /// Adjusts a copy of the parameters before writing for `version`.
    fn prepare_parameters(&self, _parameters: &mut ParameterBag, _version: VCardVersion) {}

    /// Reverses [`prepare_parameters`](Scribe::prepare_parameters) after reading.
    fn restore_parameters(&self, _parameters: &mut ParameterBag, _version: VCardVersion) {}

    /// Name written on the wire for `property`.
    fn wire_name(&self, _property: &dyn VCardProperty) -> String {
        self.property_name().to_owned()
    }

    /// Writes a property as a wire token. The property is not modified.
    fn write(&self, property: &dyn VCardProperty, version: VCardVersion) -> WireToken {
        let mut parameters = property.parameters().clone();
        self.prepare_parameters(&mut parameters, version);
        let data_type = parameters
            .get(keys::VALUE)
            .map_or_else(|| self.default_data_type(version), ValueType::parse);

        WireToken {
            group: property.group().map(str::to_owned),
            name: self.wire_name(property),
            parameters,
            data_type,
            value: self.write_value(property, version),
        }
    }

    /// Parses a wire token into a property carrying the token's group and
    /// parameters.
    ///
    /// ## Errors
    /// Returns `ParseFailure` when the value cannot be parsed.
    fn parse(
        &self,
        token: WireToken,
        version: VCardVersion,
    ) -> Result<Box<dyn VCardProperty>, ParseFailure> {
        let WireToken {
            group,
            mut parameters,
            value,
            ..
        } = token;
        self.restore_parameters(&mut parameters, version);

        let mut property = self.parse_value(value, &parameters, version)?;
        *property.parameters_mut() = parameters;
        property.set_group(group);
        Ok(property)
    }
}

/// A scribe bound to one property type, so registration can infer the type.
pub trait TypedScribe: Scribe {
    type Property: PropertyType;
}

/// Before 4.0 preference is a `TYPE=pref` value rather than a `PREF` rank.
pub(crate) fn pref_to_type(parameters: &mut ParameterBag, version: VCardVersion) {
    if version == VCardVersion::V4 {
        return;
    }
    if parameters.remove(keys::PREF).is_some() {
        parameters.add(keys::TYPE, "pref");
    }
}

pub(crate) fn type_to_pref(parameters: &mut ParameterBag, version: VCardVersion) {
    if version == VCardVersion::V4 {
        return;
    }
    if parameters.remove_value(keys::TYPE, "pref") {
        parameters.set(keys::PREF, "1");
    }
}
