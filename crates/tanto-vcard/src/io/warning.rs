use std::fmt;

use crate::model::VCardVersion;

/// Category of a [`Warning`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningKind {
    /// A property the target version does not accept was left out.
    PropertyOmitted,
    /// A parameter the target version does not accept was left out.
    ParameterOmitted,
    /// A property had no scribe and no fallback, and was skipped.
    UnregisteredType,
    /// A value could not be parsed; the property was kept raw.
    ParseFailure,
    /// A content line could not be tokenised and was skipped.
    MalformedLine,
    /// `VERSION` named no known version.
    UnsupportedVersion,
    /// The input ended before `END:VCARD`.
    UnterminatedCard,
    /// A jCard or xCard element did not have the expected structure.
    MalformedElement,
    /// A group, property or parameter name could not be written and was
    /// left out.
    InvalidName,
}

/// A problem that did not stop reading or writing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warning {
    pub kind: WarningKind,
    pub property: Option<String>,
    pub line: Option<usize>,
    pub message: String,
}

impl Warning {
    #[must_use]
    pub fn new(kind: WarningKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            property: None,
            line: None,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn for_property(mut self, property: impl Into<String>) -> Self {
        self.property = Some(property.into());
        self
    }

    #[must_use]
    pub fn at_line(mut self, line: Option<usize>) -> Self {
        self.line = line;
        self
    }

    pub(crate) fn property_omitted(property: &str, version: VCardVersion) -> Self {
        Self::new(
            WarningKind::PropertyOmitted,
            format!("{property} is not supported in vCard {version}"),
        )
        .for_property(property)
    }

    pub(crate) fn parameter_omitted(property: &str, parameter: &str, version: VCardVersion) -> Self {
        Self::new(
            WarningKind::ParameterOmitted,
            format!("parameter {parameter} is not supported in vCard {version}"),
        )
        .for_property(property)
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(line) = self.line {
            write!(f, "line {line}: ")?;
        }
        if let Some(property) = &self.property {
            write!(f, "{property}: ")?;
        }
        f.write_str(&self.message)
    }
}
