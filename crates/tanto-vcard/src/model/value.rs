//! Wire-level property values.
//!
//! Scribes translate between typed properties and these format-neutral
//! values. The format adapters only ever see [`WireValue`]s.

use std::fmt;

/// Declared data type of a property value (the `VALUE` parameter, the xCard
/// value element name, the jCard type slot).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ValueType {
    Text,
    Uri,
    Date,
    Time,
    DateTime,
    DateAndOrTime,
    Timestamp,
    Boolean,
    Integer,
    Float,
    UtcOffset,
    LanguageTag,
    Unknown,
    /// Any other type name, stored lowercase.
    Other(String),
}

impl ValueType {
    /// Parses a data type name, ignoring case.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Self::Text,
            "uri" => Self::Uri,
            "date" => Self::Date,
            "time" => Self::Time,
            "date-time" => Self::DateTime,
            "date-and-or-time" => Self::DateAndOrTime,
            "timestamp" => Self::Timestamp,
            "boolean" => Self::Boolean,
            "integer" => Self::Integer,
            "float" => Self::Float,
            "utc-offset" => Self::UtcOffset,
            "language-tag" => Self::LanguageTag,
            "unknown" => Self::Unknown,
            other => Self::Other(other.to_owned()),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Text => "text",
            Self::Uri => "uri",
            Self::Date => "date",
            Self::Time => "time",
            Self::DateTime => "date-time",
            Self::DateAndOrTime => "date-and-or-time",
            Self::Timestamp => "timestamp",
            Self::Boolean => "boolean",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::UtcOffset => "utc-offset",
            Self::LanguageTag => "language-tag",
            Self::Unknown => "unknown",
            Self::Other(name) => name,
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a scribe's values are laid out on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueShape {
    /// A single escaped text value.
    Text,
    /// A comma-separated list of text values.
    List,
    /// Semicolon-separated components, each a comma-separated list.
    Structured,
    /// A single value written without any escaping.
    Raw,
}

/// A property value in format-neutral form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WireValue {
    Text(String),
    List(Vec<String>),
    Structured(Vec<Vec<String>>),
    Raw(String),
}

impl WireValue {
    #[must_use]
    pub fn shape(&self) -> ValueShape {
        match self {
            Self::Text(_) => ValueShape::Text,
            Self::List(_) => ValueShape::List,
            Self::Structured(_) => ValueShape::Structured,
            Self::Raw(_) => ValueShape::Raw,
        }
    }

    /// Flattens the value into a single string.
    #[must_use]
    pub fn into_text(self) -> String {
        match self {
            Self::Text(text) | Self::Raw(text) => text,
            Self::List(values) => values.join(","),
            Self::Structured(components) => components
                .iter()
                .map(|component| component.join(","))
                .collect::<Vec<_>>()
                .join(";"),
        }
    }

    /// Converts the value into a list. An empty single value becomes an
    /// empty list.
    #[must_use]
    pub fn into_list(self) -> Vec<String> {
        match self {
            Self::List(values) => values,
            Self::Text(text) | Self::Raw(text) if text.is_empty() => Vec::new(),
            Self::Text(text) | Self::Raw(text) => vec![text],
            Self::Structured(components) => components.into_iter().flatten().collect(),
        }
    }

    /// Converts the value into components. A list becomes a single component.
    #[must_use]
    pub fn into_structured(self) -> Vec<Vec<String>> {
        match self {
            Self::Structured(components) => components,
            other => vec![other.into_list()],
        }
    }
}
