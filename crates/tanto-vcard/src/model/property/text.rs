//! Properties whose value is a single string.

use super::level::{self, ExpertiseLevel, InterestLevel};
use super::TextValued;
use crate::error::MalformedParameter;
use crate::model::capability::{
    HasAltId, HasIndex, HasLanguage, HasMediaType, HasPids, HasPref, HasTypeTag,
};
use crate::model::version::VersionSet;
use crate::model::VCardProperty;

macro_rules! text_valued {
    ($($ty:ident),+ $(,)?) => {
        $(
            impl TextValued for $ty {
                fn from_text(text: String) -> Self {
                    Self::new(text)
                }

                fn text(&self) -> &str {
                    &self.value
                }
            }
        )+
    };
}

crate::property_type! {
    /// Formatted name (`FN`), the display name of the card's subject.
    pub struct FormattedName(String) {
        name: "FN",
        versions: VersionSet::ALL,
        text: |name| name.value.clone(),
    }
}

crate::property_type! {
    /// Free-form note (`NOTE`).
    pub struct Note(String) {
        name: "NOTE",
        versions: VersionSet::ALL,
        text: |note| note.value.clone(),
    }
}

crate::property_type! {
    /// Email address (`EMAIL`).
    pub struct Email(String) {
        name: "EMAIL",
        versions: VersionSet::ALL,
        text: |email| email.value.clone(),
    }
}

crate::property_type! {
    /// Web page associated with the card's subject (`URL`).
    pub struct Url(String) {
        name: "URL",
        versions: VersionSet::ALL,
        text: |url| url.value.clone(),
    }
}

crate::property_type! {
    /// Language the subject speaks (`LANG`), as a language tag.
    pub struct Language(String) {
        name: "LANG",
        versions: VersionSet::V4_ONLY,
        text: |language| language.value.clone(),
    }
}

crate::property_type! {
    /// Where to find the subject's free/busy time (`FBURL`).
    pub struct FreeBusyUrl(String) {
        name: "FBURL",
        versions: VersionSet::V4_ONLY,
        text: |url| url.value.clone(),
    }
}

crate::property_type! {
    /// A recreational activity the subject takes part in (`HOBBY`, RFC 6715).
    pub struct Hobby(String) {
        name: "HOBBY",
        versions: VersionSet::V4_ONLY,
        text: |hobby| hobby.value.clone(),
    }
}

crate::property_type! {
    /// Something the subject finds interesting without actively doing it
    /// (`INTEREST`, RFC 6715).
    pub struct Interest(String) {
        name: "INTEREST",
        versions: VersionSet::V4_ONLY,
        text: |interest| interest.value.clone(),
    }
}

crate::property_type! {
    /// A field the subject has knowledge of (`EXPERTISE`, RFC 6715).
    pub struct Expertise(String) {
        name: "EXPERTISE",
        versions: VersionSet::V4_ONLY,
        text: |expertise| expertise.value.clone(),
    }
}

crate::property_type! {
    /// Globally unique identifier of the card (`UID`).
    pub struct Uid(String) {
        name: "UID",
        versions: VersionSet::ALL,
        text: |uid| uid.value.clone(),
    }
}

crate::property_type! {
    /// Identifier of the product that created the card (`PRODID`).
    pub struct ProductId(String) {
        name: "PRODID",
        versions: VersionSet::V3_AND_LATER,
        text: |product| product.value.clone(),
    }
}

text_valued!(
    FormattedName,
    Note,
    Email,
    Url,
    Language,
    FreeBusyUrl,
    Hobby,
    Interest,
    Expertise,
    Uid,
    ProductId,
);

impl HasAltId for FormattedName {}
impl HasPref for FormattedName {}
impl HasTypeTag for FormattedName {}
impl HasLanguage for FormattedName {}
impl HasPids for FormattedName {}

impl HasAltId for Note {}
impl HasPref for Note {}
impl HasTypeTag for Note {}
impl HasLanguage for Note {}
impl HasPids for Note {}

impl HasAltId for Email {}
impl HasPref for Email {}
impl HasTypeTag for Email {}
impl HasPids for Email {}
impl HasIndex for Email {}

impl HasAltId for Url {}
impl HasPref for Url {}
impl HasTypeTag for Url {}
impl HasPids for Url {}
impl HasMediaType for Url {}
impl HasIndex for Url {}

impl HasAltId for Language {}
impl HasPref for Language {}
impl HasTypeTag for Language {}
impl HasPids for Language {}

impl HasAltId for FreeBusyUrl {}
impl HasPref for FreeBusyUrl {}
impl HasTypeTag for FreeBusyUrl {}
impl HasPids for FreeBusyUrl {}
impl HasMediaType for FreeBusyUrl {}

impl HasAltId for Hobby {}
impl HasPref for Hobby {}
impl HasTypeTag for Hobby {}
impl HasLanguage for Hobby {}
impl HasIndex for Hobby {}

impl HasAltId for Interest {}
impl HasPref for Interest {}
impl HasTypeTag for Interest {}
impl HasLanguage for Interest {}
impl HasIndex for Interest {}

impl HasAltId for Expertise {}
impl HasPref for Expertise {}
impl HasTypeTag for Expertise {}
impl HasLanguage for Expertise {}
impl HasIndex for Expertise {}

impl Hobby {
    /// ## Errors
    /// Returns `MalformedParameter` if `LEVEL` is not `low`, `medium` or `high`.
    pub fn level(&self) -> Result<Option<InterestLevel>, MalformedParameter> {
        level::level(self.parameters())
    }

    pub fn set_level(&mut self, level: Option<InterestLevel>) {
        level::set_level(self.parameters_mut(), level);
    }
}

impl Interest {
    /// ## Errors
    /// Returns `MalformedParameter` if `LEVEL` is not `low`, `medium` or `high`.
    pub fn level(&self) -> Result<Option<InterestLevel>, MalformedParameter> {
        level::level(self.parameters())
    }

    pub fn set_level(&mut self, level: Option<InterestLevel>) {
        level::set_level(self.parameters_mut(), level);
    }
}

impl Expertise {
    /// ## Errors
    /// Returns `MalformedParameter` if `LEVEL` is not `beginner`, `average`
    /// or `expert`.
    pub fn level(&self) -> Result<Option<ExpertiseLevel>, MalformedParameter> {
        level::level(self.parameters())
    }

    pub fn set_level(&mut self, level: Option<ExpertiseLevel>) {
        level::set_level(self.parameters_mut(), level);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{PropertyType, VCardVersion};

    #[test]
    fn declared_versions() {
        assert_eq!(FormattedName::SUPPORTED_VERSIONS, VersionSet::ALL);
        assert_eq!(Hobby::SUPPORTED_VERSIONS, VersionSet::V4_ONLY);
        assert!(!ProductId::SUPPORTED_VERSIONS.contains(VCardVersion::V2_1));
        assert_eq!(Language::NAME, "LANG");
        assert_eq!(FreeBusyUrl::new("x").property_name(), "FBURL");
    }

    #[test]
    fn hobby_level() {
        let mut hobby = Hobby::new("knitting");
        assert_eq!(hobby.level(), Ok(None));

        hobby.set_level(Some(InterestLevel::High));
        assert_eq!(hobby.parameters().get("LEVEL"), Some("high"));
        assert_eq!(hobby.level(), Ok(Some(InterestLevel::High)));

        hobby.parameters_mut().set("level", "MEDIUM");
        assert_eq!(hobby.level(), Ok(Some(InterestLevel::Medium)));

        hobby.parameters_mut().set("LEVEL", "expert");
        assert!(hobby.level().is_err());
    }

    #[test]
    fn expertise_level() {
        let mut expertise = Expertise::new("chemistry");
        expertise.set_level(Some(ExpertiseLevel::Expert));
        assert_eq!(expertise.level(), Ok(Some(ExpertiseLevel::Expert)));

        expertise.set_level(None);
        assert!(expertise.parameters().is_empty());
    }

    #[test]
    fn copies_are_independent() {
        let mut original = Hobby::new("chess");
        original.set_pref(Some(1));
        let mut copy = original.copy();

        let hobby = copy.downcast_mut::<Hobby>().expect("copy keeps its type");
        hobby.set_pref(Some(5));
        hobby.value = "go".to_owned();
        hobby.set_group(Some("item1".to_owned()));

        assert_eq!(original.pref(), Ok(Some(1)));
        assert_eq!(original.value, "chess");
        assert!(original.group().is_none());
    }
}
