//! Typed vCard properties.
//!
//! ## Summary
//! Every property is a concrete type implementing [`VCardProperty`]. Cards
//! hold them as `Box<dyn VCardProperty>`; callers get the concrete type back
//! with [`downcast_ref`](trait.VCardProperty.html#method.downcast_ref).
//!
//! ## Defining a property type
//!
//! [`property_type!`](crate::property_type) generates the struct and the
//! trait impls for a single-valued property:
//!
//! ```rust
//! use tanto_vcard::model::{HasLanguage, PropertyType, VersionSet};
//!
//! tanto_vcard::property_type! {
//!     /// Nickname of the card's subject.
//!     pub struct Nickname(String) {
//!         name: "NICKNAME",
//!         versions: VersionSet::V3_AND_LATER,
//!         text: |nickname| nickname.value.clone(),
//!     }
//! }
//!
//! impl HasLanguage for Nickname {}
//!
//! let mut nickname = Nickname::new("Jim");
//! nickname.set_language(Some("en"));
//! assert_eq!(Nickname::NAME, "NICKNAME");
//! assert_eq!(nickname.language(), Some("en"));
//! ```

use std::any::Any;
use std::fmt;

use super::version::VersionSet;
use super::ParameterBag;

/// Declares a single-valued property type.
///
/// The generated struct has a public `value` field, a `new` constructor,
/// `in_group`, and implementations of [`VCardProperty`](crate::model::VCardProperty)
/// and [`PropertyType`](crate::model::PropertyType). The `text` closure
/// renders the value as plain text.
#[macro_export]
macro_rules! property_type {
    (
        $(#[$meta:meta])*
        $vis:vis struct $ty:ident($value:ty) {
            name: $name:literal,
            versions: $versions:expr,
            text: |$this:ident| $text:expr $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        $vis struct $ty {
            pub value: $value,
            group: ::std::option::Option<::std::string::String>,
            parameters: $crate::model::ParameterBag,
        }

        impl $ty {
            #[must_use]
            pub fn new(value: impl ::std::convert::Into<$value>) -> Self {
                Self {
                    value: value.into(),
                    group: ::std::option::Option::None,
                    parameters: $crate::model::ParameterBag::new(),
                }
            }

            /// Places the property in `group`.
            #[must_use]
            pub fn in_group(mut self, group: impl ::std::convert::Into<::std::string::String>) -> Self {
                self.group = ::std::option::Option::Some(group.into());
                self
            }
        }

        impl $crate::model::PropertyType for $ty {
            const NAME: &'static str = $name;
            const SUPPORTED_VERSIONS: $crate::model::VersionSet = $versions;
        }

        impl $crate::model::VCardProperty for $ty {
            fn property_name(&self) -> &str {
                $name
            }

            fn type_name(&self) -> &'static str {
                ::std::stringify!($ty)
            }

            fn supported_versions(&self) -> $crate::model::VersionSet {
                $versions
            }

            fn group(&self) -> ::std::option::Option<&str> {
                self.group.as_deref()
            }

            fn set_group(&mut self, group: ::std::option::Option<::std::string::String>) {
                self.group = group;
            }

            fn parameters(&self) -> &$crate::model::ParameterBag {
                &self.parameters
            }

            fn parameters_mut(&mut self) -> &mut $crate::model::ParameterBag {
                &mut self.parameters
            }

            fn copy(&self) -> ::std::boxed::Box<dyn $crate::model::VCardProperty> {
                ::std::boxed::Box::new(::std::clone::Clone::clone(self))
            }

            fn as_any(&self) -> &dyn ::std::any::Any {
                self
            }

            fn as_any_mut(&mut self) -> &mut dyn ::std::any::Any {
                self
            }

            fn text_value(&self) -> ::std::string::String {
                let $this = self;
                $text
            }
        }
    };
}

mod level;
mod list;
mod name;
mod raw;
mod revision;
mod text;

pub use level::{ExpertiseLevel, InterestLevel};
pub use list::Categories;
pub use name::{PersonName, StructuredName};
pub use raw::RawProperty;
pub use revision::Revision;
pub use text::{
    Email, Expertise, FormattedName, FreeBusyUrl, Hobby, Interest, Language, Note, ProductId,
    Uid, Url,
};

/// A vCard property.
///
/// Parameters live in a single [`ParameterBag`]; the capability traits in
/// [`capability`](crate::model::capability) are views over it.
pub trait VCardProperty: Any + fmt::Debug + Send + Sync + 'static {
    /// Name written on the wire, e.g. `FN`.
    fn property_name(&self) -> &str;

    /// Rust type name, used in diagnostics.
    fn type_name(&self) -> &'static str;

    fn supported_versions(&self) -> VersionSet;

    fn group(&self) -> Option<&str>;

    fn set_group(&mut self, group: Option<String>);

    fn parameters(&self) -> &ParameterBag;

    fn parameters_mut(&mut self) -> &mut ParameterBag;

    /// Returns a deep copy. Mutating the copy never affects `self`.
    fn copy(&self) -> Box<dyn VCardProperty>;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// The value rendered as plain text.
    fn text_value(&self) -> String;
}

/// Compile-time facts about a property type.
pub trait PropertyType: VCardProperty + Clone {
    const NAME: &'static str;
    const SUPPORTED_VERSIONS: VersionSet;
}

/// A property whose value is a single string.
pub trait TextValued: PropertyType {
    fn from_text(text: String) -> Self;

    fn text(&self) -> &str;
}

/// A property whose value is a list of strings.
pub trait ListValued: PropertyType {
    fn from_list(values: Vec<String>) -> Self;

    fn values(&self) -> &[String];
}

impl dyn VCardProperty {
    #[must_use]
    pub fn is<P: VCardProperty>(&self) -> bool {
        self.as_any().is::<P>()
    }

    #[must_use]
    pub fn downcast_ref<P: VCardProperty>(&self) -> Option<&P> {
        self.as_any().downcast_ref::<P>()
    }

    pub fn downcast_mut<P: VCardProperty>(&mut self) -> Option<&mut P> {
        self.as_any_mut().downcast_mut::<P>()
    }
}

impl Clone for Box<dyn VCardProperty> {
    fn clone(&self) -> Self {
        (**self).copy()
    }
}
