//! The card model: versions, parameters, capabilities and property types.

pub mod capability;
pub mod parameter;
pub mod pid;
pub mod property;
pub mod value;
pub mod vcard;
pub mod version;

pub use capability::{HasAltId, HasIndex, HasLanguage, HasMediaType, HasPids, HasPref, HasTypeTag};
pub use parameter::{ParameterBag, keys, parameter_versions};
pub use pid::Pid;
pub use property::{
    Categories, Email, Expertise, ExpertiseLevel, FormattedName, FreeBusyUrl, Hobby, Interest,
    InterestLevel, Language, ListValued, Note, PersonName, ProductId, PropertyType, RawProperty,
    Revision, StructuredName, TextValued, Uid, Url, VCardProperty,
};
pub use value::{ValueShape, ValueType, WireValue};
pub use vcard::VCard;
pub use version::{UnknownVersion, VCardVersion, VersionSet};
