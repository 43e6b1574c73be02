//! Parameter capabilities.
//!
//! ## Summary
//! Each trait exposes typed accessors for one well-known parameter. A property
//! type opts in with an empty `impl`, so a property that does not support a
//! parameter has no accessor for it at all:
//!
//! ```compile_fail
//! use tanto_vcard::model::{HasPref, Revision};
//!
//! let mut revision = Revision::new(chrono::Utc::now());
//! revision.set_pref(Some(1));
//! ```
//!
//! Every accessor reads and writes the property's [`ParameterBag`], so a value
//! set through a trait is the same value seen by raw bag access.
//!
//! Numeric getters distinguish an absent parameter (`Ok(None)`) from one whose
//! raw value does not parse (`Err(MalformedParameter)`). Setting `None`
//! removes the parameter.

use super::parameter::{ParameterBag, keys};
use super::pid::Pid;
use super::property::VCardProperty;
use crate::error::MalformedParameter;

fn integer(parameters: &ParameterBag, name: &'static str) -> Result<Option<u32>, MalformedParameter> {
    parameters
        .get(name)
        .map(|raw| {
            raw.trim()
                .parse::<u32>()
                .map_err(|e| MalformedParameter::new(name, raw, e.to_string()))
        })
        .transpose()
}

fn set_optional(parameters: &mut ParameterBag, name: &str, value: Option<String>) {
    match value {
        Some(value) => parameters.set(name, value),
        None => {
            parameters.remove(name);
        }
    }
}

/// `PREF`: preference rank, 1 being the most preferred.
pub trait HasPref: VCardProperty {
    /// ## Errors
    /// Returns `MalformedParameter` if `PREF` is not an unsigned integer.
    fn pref(&self) -> Result<Option<u32>, MalformedParameter> {
        integer(self.parameters(), keys::PREF)
    }

    fn set_pref(&mut self, pref: Option<u32>) {
        set_optional(self.parameters_mut(), keys::PREF, pref.map(|p| p.to_string()));
    }
}

/// `ALTID`: groups alternative representations of the same value.
pub trait HasAltId: VCardProperty {
    fn alt_id(&self) -> Option<&str> {
        self.parameters().get(keys::ALTID)
    }

    fn set_alt_id(&mut self, alt_id: Option<&str>) {
        set_optional(self.parameters_mut(), keys::ALTID, alt_id.map(str::to_owned));
    }
}

/// `PID`: identifies a property instance across synchronising clients.
pub trait HasPids: VCardProperty {
    /// ## Errors
    /// Returns `MalformedParameter` for the first `PID` value that is not
    /// `local[.client]`.
    fn pids(&self) -> Result<Vec<Pid>, MalformedParameter> {
        self.parameters()
            .get_all(keys::PID)
            .iter()
            .map(|raw| {
                raw.parse::<Pid>()
                    .map_err(|e| MalformedParameter::new(keys::PID, raw.as_str(), e.to_string()))
            })
            .collect()
    }

    fn add_pid(&mut self, pid: Pid) {
        self.parameters_mut().add(keys::PID, pid.to_string());
    }

    fn set_pids(&mut self, pids: &[Pid]) {
        self.parameters_mut()
            .set_all(keys::PID, pids.iter().map(ToString::to_string));
    }

    fn remove_pids(&mut self) {
        self.parameters_mut().remove(keys::PID);
    }
}

/// `LANGUAGE`: language tag of a text value.
pub trait HasLanguage: VCardProperty {
    fn language(&self) -> Option<&str> {
        self.parameters().get(keys::LANGUAGE)
    }

    fn set_language(&mut self, language: Option<&str>) {
        set_optional(self.parameters_mut(), keys::LANGUAGE, language.map(str::to_owned));
    }
}

/// `TYPE`, treated as a single tag. Setting replaces every existing value.
pub trait HasTypeTag: VCardProperty {
    fn type_tag(&self) -> Option<&str> {
        self.parameters().get(keys::TYPE)
    }

    fn set_type_tag(&mut self, type_tag: Option<&str>) {
        set_optional(self.parameters_mut(), keys::TYPE, type_tag.map(str::to_owned));
    }
}

/// `MEDIATYPE`: media type of the resource a URI points to.
pub trait HasMediaType: VCardProperty {
    fn media_type(&self) -> Option<&str> {
        self.parameters().get(keys::MEDIATYPE)
    }

    fn set_media_type(&mut self, media_type: Option<&str>) {
        set_optional(self.parameters_mut(), keys::MEDIATYPE, media_type.map(str::to_owned));
    }
}

/// `INDEX`: position of the value among properties of the same name.
pub trait HasIndex: VCardProperty {
    /// ## Errors
    /// Returns `MalformedParameter` if `INDEX` is not an unsigned integer.
    fn index(&self) -> Result<Option<u32>, MalformedParameter> {
        integer(self.parameters(), keys::INDEX)
    }

    fn set_index(&mut self, index: Option<u32>) {
        set_optional(self.parameters_mut(), keys::INDEX, index.map(|i| i.to_string()));
    }
}
