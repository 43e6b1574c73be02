//! jCard (RFC 7095) reading and writing.
//!
//! A card is `["vcard", [property, ...]]` where each property is
//! `[name, {parameters}, type, value...]`. The group travels as the `group`
//! parameter and the data type slot stands in for `VALUE`. jCard documents
//! are always vCard 4.0.

mod reader;
mod writer;

pub use reader::{from_value, read};
pub use writer::{to_value, write, write_pretty, write_single};

use serde_json::Value;

use crate::error::VCardResult;
use crate::io::decode::Decoded;
use crate::io::encode::WriteOptions;
use crate::model::VCard;
use crate::scribe::ScribeRegistry;

/// Writes jCard with a fixed registry and options.
#[derive(Debug, Clone, Copy)]
pub struct JCardWriter<'r> {
    registry: &'r ScribeRegistry,
    options: WriteOptions,
    pretty: bool,
}

impl<'r> JCardWriter<'r> {
    #[must_use]
    pub fn new(registry: &'r ScribeRegistry) -> Self {
        Self {
            registry,
            options: WriteOptions::default(),
            pretty: false,
        }
    }

    #[must_use]
    pub fn strict(mut self, strict: bool) -> Self {
        self.options.strict = strict;
        self
    }

    #[must_use]
    pub fn add_prod_id(mut self, add_prod_id: bool) -> Self {
        self.options.add_prod_id = add_prod_id;
        self
    }

    /// Indent the output.
    #[must_use]
    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// ## Errors
    /// See [`write`].
    pub fn write(&self, cards: &[VCard]) -> VCardResult<String> {
        if self.pretty {
            write_pretty(cards, self.registry, &self.options)
        } else {
            write(cards, self.registry, &self.options)
        }
    }

    /// ## Errors
    /// See [`to_value`].
    pub fn to_value(&self, cards: &[VCard]) -> VCardResult<Value> {
        to_value(cards, self.registry, &self.options)
    }
}

impl Default for JCardWriter<'static> {
    fn default() -> Self {
        Self::new(ScribeRegistry::shared())
    }
}

/// Reads jCard with a fixed registry.
#[derive(Debug, Clone, Copy)]
pub struct JCardReader<'r> {
    registry: &'r ScribeRegistry,
}

impl<'r> JCardReader<'r> {
    #[must_use]
    pub fn new(registry: &'r ScribeRegistry) -> Self {
        Self { registry }
    }

    /// ## Errors
    /// See [`read`].
    pub fn read(&self, input: &str) -> VCardResult<Vec<Decoded>> {
        read(input, self.registry)
    }

    /// ## Errors
    /// See [`from_value`].
    pub fn from_value(&self, value: &Value) -> VCardResult<Vec<Decoded>> {
        from_value(value, self.registry)
    }
}

impl Default for JCardReader<'static> {
    fn default() -> Self {
        Self::new(ScribeRegistry::shared())
    }
}
