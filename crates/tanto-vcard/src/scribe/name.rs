use super::{Scribe, TypedScribe};
use crate::error::ParseFailure;
use crate::model::{
    ParameterBag, PersonName, PropertyType, StructuredName, VCardProperty, VCardVersion,
    ValueShape, ValueType, WireValue,
};

/// Scribe for `N`.
#[derive(Debug, Default)]
pub struct StructuredNameScribe;

impl Scribe for StructuredNameScribe {
    fn property_name(&self) -> &str {
        StructuredName::NAME
    }

    fn value_shape(&self) -> ValueShape {
        ValueShape::Structured
    }

    fn component_labels(&self) -> &'static [&'static str] {
        &["surname", "given", "additional", "prefix", "suffix"]
    }

    fn default_data_type(&self, _version: VCardVersion) -> ValueType {
        ValueType::Text
    }

    fn write_value(&self, property: &dyn VCardProperty, _version: VCardVersion) -> WireValue {
        match property.downcast_ref::<StructuredName>() {
            Some(name) => WireValue::Structured(name.value.to_components()),
            None => WireValue::Structured(vec![vec![property.text_value()]]),
        }
    }

    fn parse_value(
        &self,
        value: WireValue,
        _parameters: &ParameterBag,
        _version: VCardVersion,
    ) -> Result<Box<dyn VCardProperty>, ParseFailure> {
        Ok(Box::new(StructuredName::new(PersonName::from_components(
            value.into_structured(),
        ))))
    }
}

impl TypedScribe for StructuredNameScribe {
    type Property = StructuredName;
}
