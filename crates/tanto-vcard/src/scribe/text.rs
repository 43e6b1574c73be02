//! Generic scribes for text, URI and text-list properties.

use std::marker::PhantomData;

use super::{Scribe, TypedScribe, pref_to_type, type_to_pref};
use crate::error::ParseFailure;
use crate::model::{
    ListValued, ParameterBag, TextValued, VCardProperty, VCardVersion, ValueShape, ValueType,
    WireValue,
};

/// Scribe for any [`TextValued`] property.
#[derive(Debug)]
pub struct TextScribe<P> {
    data_type: ValueType,
    legacy_data_type: Option<ValueType>,
    shape: ValueShape,
    legacy_pref: bool,
    marker: PhantomData<fn() -> P>,
}

impl<P: TextValued> TextScribe<P> {
    /// An escaped `text` value.
    #[must_use]
    pub fn new() -> Self {
        Self {
            data_type: ValueType::Text,
            legacy_data_type: None,
            shape: ValueShape::Text,
            legacy_pref: false,
            marker: PhantomData,
        }
    }

    /// An unescaped value of another data type, such as `language-tag`.
    #[must_use]
    pub fn typed(data_type: ValueType) -> Self {
        Self {
            data_type,
            shape: ValueShape::Raw,
            ..Self::new()
        }
    }

    /// Uses `data_type` instead when writing 2.1 or 3.0.
    #[must_use]
    pub fn before_v4(mut self, data_type: ValueType) -> Self {
        self.legacy_data_type = Some(data_type);
        self
    }

    /// Writes `PREF` as `TYPE=pref` in 2.1 and 3.0.
    #[must_use]
    pub fn legacy_pref(mut self) -> Self {
        self.legacy_pref = true;
        self
    }
}

impl<P: TextValued> Default for TextScribe<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: TextValued> Scribe for TextScribe<P> {
    fn property_name(&self) -> &str {
        P::NAME
    }

    fn value_shape(&self) -> ValueShape {
        self.shape
    }

    fn default_data_type(&self, version: VCardVersion) -> ValueType {
        match (&self.legacy_data_type, version) {
            (Some(legacy), VCardVersion::V2_1 | VCardVersion::V3) => legacy.clone(),
            _ => self.data_type.clone(),
        }
    }

    fn write_value(&self, property: &dyn VCardProperty, _version: VCardVersion) -> WireValue {
        let text = property
            .downcast_ref::<P>()
            .map_or_else(|| property.text_value(), |typed| typed.text().to_owned());
        match self.shape {
            ValueShape::Raw => WireValue::Raw(text),
            _ => WireValue::Text(text),
        }
    }

    fn parse_value(
        &self,
        value: WireValue,
        _parameters: &ParameterBag,
        _version: VCardVersion,
    ) -> Result<Box<dyn VCardProperty>, ParseFailure> {
        Ok(Box::new(P::from_text(value.into_text())))
    }

    fn prepare_parameters(&self, parameters: &mut ParameterBag, version: VCardVersion) {
        if self.legacy_pref {
            pref_to_type(parameters, version);
        }
    }

    fn restore_parameters(&self, parameters: &mut ParameterBag, version: VCardVersion) {
        if self.legacy_pref {
            type_to_pref(parameters, version);
        }
    }
}

impl<P: TextValued> TypedScribe for TextScribe<P> {
    type Property = P;
}

/// Scribe for a [`TextValued`] property holding a URI. URIs are written
/// without text escaping.
#[derive(Debug)]
pub struct UriScribe<P> {
    inner: TextScribe<P>,
}

impl<P: TextValued> UriScribe<P> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: TextScribe::typed(ValueType::Uri),
        }
    }

    /// Writes `PREF` as `TYPE=pref` in 2.1 and 3.0.
    #[must_use]
    pub fn legacy_pref(self) -> Self {
        Self {
            inner: self.inner.legacy_pref(),
        }
    }
}

impl<P: TextValued> Default for UriScribe<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: TextValued> Scribe for UriScribe<P> {
    fn property_name(&self) -> &str {
        self.inner.property_name()
    }

    fn value_shape(&self) -> ValueShape {
        self.inner.value_shape()
    }

    fn default_data_type(&self, version: VCardVersion) -> ValueType {
        self.inner.default_data_type(version)
    }

    fn write_value(&self, property: &dyn VCardProperty, version: VCardVersion) -> WireValue {
        self.inner.write_value(property, version)
    }

    fn parse_value(
        &self,
        value: WireValue,
        parameters: &ParameterBag,
        version: VCardVersion,
    ) -> Result<Box<dyn VCardProperty>, ParseFailure> {
        self.inner.parse_value(value, parameters, version)
    }

    fn prepare_parameters(&self, parameters: &mut ParameterBag, version: VCardVersion) {
        self.inner.prepare_parameters(parameters, version);
    }

    fn restore_parameters(&self, parameters: &mut ParameterBag, version: VCardVersion) {
        self.inner.restore_parameters(parameters, version);
    }
}

impl<P: TextValued> TypedScribe for UriScribe<P> {
    type Property = P;
}

/// Scribe for any [`ListValued`] property.
#[derive(Debug)]
pub struct TextListScribe<P> {
    marker: PhantomData<fn() -> P>,
}

impl<P: ListValued> TextListScribe<P> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            marker: PhantomData,
        }
    }
}

impl<P: ListValued> Default for TextListScribe<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: ListValued> Scribe for TextListScribe<P> {
    fn property_name(&self) -> &str {
        P::NAME
    }

    fn value_shape(&self) -> ValueShape {
        ValueShape::List
    }

    fn default_data_type(&self, _version: VCardVersion) -> ValueType {
        ValueType::Text
    }

    fn write_value(&self, property: &dyn VCardProperty, _version: VCardVersion) -> WireValue {
        match property.downcast_ref::<P>() {
            Some(typed) => WireValue::List(typed.values().to_vec()),
            None => WireValue::List(vec![property.text_value()]),
        }
    }

    fn parse_value(
        &self,
        value: WireValue,
        _parameters: &ParameterBag,
        _version: VCardVersion,
    ) -> Result<Box<dyn VCardProperty>, ParseFailure> {
        Ok(Box::new(P::from_list(value.into_list())))
    }
}

impl<P: ListValued> TypedScribe for TextListScribe<P> {
    type Property = P;
}
