use super::ListValued;
use crate::model::capability::{HasAltId, HasPids, HasPref, HasTypeTag};
use crate::model::version::VersionSet;

crate::property_type! {
    /// Tags describing the card's subject (`CATEGORIES`).
    pub struct Categories(Vec<String>) {
        name: "CATEGORIES",
        versions: VersionSet::V3_AND_LATER,
        text: |categories| categories.value.join(","),
    }
}

impl ListValued for Categories {
    fn from_list(values: Vec<String>) -> Self {
        Self::new(values)
    }

    fn values(&self) -> &[String] {
        &self.value
    }
}

impl HasAltId for Categories {}
impl HasPref for Categories {}
impl HasTypeTag for Categories {}
impl HasPids for Categories {}
