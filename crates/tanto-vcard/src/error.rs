//! Error types for vCard reading and writing.

use thiserror::Error;

use crate::model::VCardVersion;

/// A parameter value that does not parse as the type its accessor expects.
///
/// Raised when a typed accessor such as `pref()` meets a raw value like
/// `PREF=abc`. The raw value stays in the parameter bag untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("malformed {name} parameter {value:?}: {reason}")]
pub struct MalformedParameter {
    pub name: &'static str,
    pub value: String,
    pub reason: String,
}

impl MalformedParameter {
    #[must_use]
    pub fn new(name: &'static str, value: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            name,
            value: value.into(),
            reason: reason.into(),
        }
    }
}

/// A scribe could not turn a wire value into its property type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("cannot parse {property} value: {reason}")]
pub struct ParseFailure {
    pub property: String,
    pub reason: String,
}

impl ParseFailure {
    #[must_use]
    pub fn new(property: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            reason: reason.into(),
        }
    }
}

/// Errors produced while reading, writing or validating vCards.
#[derive(Error, Debug)]
pub enum VCardError {
    #[error("no scribe registered for property type {type_name}")]
    UnregisteredType { type_name: &'static str },

    #[error(transparent)]
    MalformedParameter(#[from] MalformedParameter),

    #[error(transparent)]
    ParseFailure(#[from] ParseFailure),

    #[error("{property} is not supported in vCard {version}")]
    VersionMismatch {
        property: String,
        version: VCardVersion,
    },

    #[error("line {line}: {message}")]
    Syntax { line: usize, message: String },

    #[error("XML error: {0}")]
    Xml(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid document: {0}")]
    InvalidDocument(String),
}

impl VCardError {
    /// Creates a syntax error for a content line.
    #[must_use]
    pub fn syntax(line: usize, message: impl Into<String>) -> Self {
        Self::Syntax {
            line,
            message: message.into(),
        }
    }
}

pub type VCardResult<T> = std::result::Result<T, VCardError>;
