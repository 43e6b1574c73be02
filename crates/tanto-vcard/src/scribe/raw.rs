use super::{Scribe, WireToken};
use crate::error::ParseFailure;
use crate::model::{
    ParameterBag, RawProperty, VCardProperty, VCardVersion, ValueShape, ValueType, WireValue,
};

/// Fallback scribe for property names without a registered scribe.
///
/// Values pass through untouched, so an unknown property is written back
/// exactly as it was read.
#[derive(Debug, Default)]
pub struct RawScribe;

impl Scribe for RawScribe {
    fn property_name(&self) -> &'static str {
        ""
    }

    fn value_shape(&self) -> ValueShape {
        ValueShape::Raw
    }

    fn default_data_type(&self, version: VCardVersion) -> ValueType {
        match version {
            VCardVersion::V4 => ValueType::Unknown,
            VCardVersion::V2_1 | VCardVersion::V3 => ValueType::Text,
        }
    }

    fn wire_name(&self, property: &dyn VCardProperty) -> String {
        property.property_name().to_owned()
    }

    fn write_value(&self, property: &dyn VCardProperty, _version: VCardVersion) -> WireValue {
        property
            .downcast_ref::<RawProperty>()
            .map_or_else(|| WireValue::Raw(property.text_value()), |raw| raw.value.clone())
    }

    fn parse_value(
        &self,
        value: WireValue,
        _parameters: &ParameterBag,
        _version: VCardVersion,
    ) -> Result<Box<dyn VCardProperty>, ParseFailure> {
        Ok(Box::new(RawProperty::new("", value)))
    }

    fn parse(
        &self,
        token: WireToken,
        _version: VCardVersion,
    ) -> Result<Box<dyn VCardProperty>, ParseFailure> {
        Ok(Box::new(RawProperty::from_parts(
            token.group,
            token.name,
            token.parameters,
            token.value,
        )))
    }
}
