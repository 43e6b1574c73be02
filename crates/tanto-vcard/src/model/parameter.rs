//! Property parameters.
//!
//! ## Summary
//! A [`ParameterBag`] is the single store for every parameter of a property.
//! Names are matched case-insensitively but keep the spelling they were first
//! added with, and insertion order is preserved so documents can be written
//! back exactly as they were read.

use std::collections::HashMap;

use super::version::{VCardVersion, VersionSet};

/// Well-known parameter names.
pub mod keys {
    pub const ALTID: &str = "ALTID";
    pub const CALSCALE: &str = "CALSCALE";
    pub const CC: &str = "CC";
    pub const CHARSET: &str = "CHARSET";
    pub const ENCODING: &str = "ENCODING";
    pub const GEO: &str = "GEO";
    pub const INDEX: &str = "INDEX";
    pub const LABEL: &str = "LABEL";
    pub const LANGUAGE: &str = "LANGUAGE";
    pub const LEVEL: &str = "LEVEL";
    pub const MEDIATYPE: &str = "MEDIATYPE";
    pub const PID: &str = "PID";
    pub const PREF: &str = "PREF";
    pub const SORT_AS: &str = "SORT-AS";
    pub const TYPE: &str = "TYPE";
    pub const TZ: &str = "TZ";
    pub const VALUE: &str = "VALUE";
}

/// Returns the versions a parameter may be written in.
///
/// Names outside this table (including `X-` extensions) are allowed in every
/// version. `VALUE` is always allowed.
#[must_use]
pub fn parameter_versions(name: &str) -> VersionSet {
    const V4_ONLY: [&str; 12] = [
        keys::PREF,
        keys::PID,
        keys::ALTID,
        keys::INDEX,
        keys::MEDIATYPE,
        keys::LEVEL,
        keys::SORT_AS,
        keys::CALSCALE,
        keys::GEO,
        keys::TZ,
        keys::LABEL,
        keys::CC,
    ];

    if V4_ONLY.iter().any(|key| key.eq_ignore_ascii_case(name)) {
        VersionSet::V4_ONLY
    } else if keys::CHARSET.eq_ignore_ascii_case(name) {
        VersionSet::of(&[VCardVersion::V2_1])
    } else if keys::ENCODING.eq_ignore_ascii_case(name) {
        VersionSet::of(&[VCardVersion::V2_1, VCardVersion::V3])
    } else {
        VersionSet::ALL
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Entry {
    name: String,
    values: Vec<String>,
}

/// Ordered, case-insensitive multimap of parameter names to values.
///
/// A name that is present always has at least one value. An empty string is
/// a real value and is kept distinct from an absent parameter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterBag {
    entries: Vec<Entry>,
    index: HashMap<String, usize>,
}

fn key(name: &str) -> String {
    name.to_ascii_uppercase()
}

impl ParameterBag {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(&key(name))
    }

    /// Returns the first value of `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entry(name)
            .and_then(|entry| entry.values.first())
            .map(String::as_str)
    }

    /// Returns every value of `name`, or an empty slice when it is absent.
    #[must_use]
    pub fn get_all(&self, name: &str) -> &[String] {
        self.entry(name)
            .map_or(&[] as &[String], |entry| entry.values.as_slice())
    }

    /// Replaces every value of `name` with `value`.
    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        self.set_all(name, [value.into()]);
    }

    /// Replaces every value of `name`. An empty list removes the parameter.
    pub fn set_all<I, S>(&mut self, name: &str, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values: Vec<String> = values.into_iter().map(Into::into).collect();
        if values.is_empty() {
            self.remove(name);
            return;
        }

        match self.index.get(&key(name)) {
            Some(&position) => self.entries[position].values = values,
            None => self.push(name, values),
        }
    }

    /// Appends a value to `name`, creating it at the end when absent.
    pub fn add(&mut self, name: &str, value: impl Into<String>) {
        match self.index.get(&key(name)) {
            Some(&position) => self.entries[position].values.push(value.into()),
            None => self.push(name, vec![value.into()]),
        }
    }

    /// Removes `name` and returns its values.
    pub fn remove(&mut self, name: &str) -> Option<Vec<String>> {
        let position = self.index.remove(&key(name))?;
        let entry = self.entries.remove(position);
        for slot in self.index.values_mut() {
            if *slot > position {
                *slot -= 1;
            }
        }
        Some(entry.values)
    }

    /// Removes one value of `name`, compared case-insensitively.
    ///
    /// Returns `true` when a value was removed. The parameter disappears once
    /// its last value is gone.
    pub fn remove_value(&mut self, name: &str, value: &str) -> bool {
        let Some(&position) = self.index.get(&key(name)) else {
            return false;
        };
        let values = &mut self.entries[position].values;
        let Some(found) = values.iter().position(|v| v.eq_ignore_ascii_case(value)) else {
            return false;
        };
        values.remove(found);
        if values.is_empty() {
            self.remove(name);
        }
        true
    }

    /// Keeps only the parameters for which `keep` returns `true`.
    pub fn retain(&mut self, mut keep: impl FnMut(&str, &[String]) -> bool) {
        self.entries.retain(|entry| keep(&entry.name, &entry.values));
        self.reindex();
    }

    /// Parameter names in insertion order, with their original spelling.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.name.as_str())
    }

    /// Parameters in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|entry| (entry.name.as_str(), entry.values.as_slice()))
    }

    fn entry(&self, name: &str) -> Option<&Entry> {
        self.index
            .get(&key(name))
            .map(|&position| &self.entries[position])
    }

    fn push(&mut self, name: &str, values: Vec<String>) {
        self.index.insert(key(name), self.entries.len());
        self.entries.push(Entry {
            name: name.to_owned(),
            values,
        });
    }

    fn reindex(&mut self) {
        self.index = self
            .entries
            .iter()
            .enumerate()
            .map(|(position, entry)| (key(&entry.name), position))
            .collect();
    }
}

impl<'a> FromIterator<(&'a str, &'a str)> for ParameterBag {
    fn from_iter<I: IntoIterator<Item = (&'a str, &'a str)>>(iter: I) -> Self {
        let mut bag = Self::new();
        for (name, value) in iter {
            bag.add(name, value);
        }
        bag
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_case_insensitive_and_keeps_spelling() {
        let mut bag = ParameterBag::new();
        bag.add("Type", "home");
        bag.add("TYPE", "work");

        assert_eq!(bag.get("type"), Some("home"));
        assert_eq!(bag.get_all("TyPe"), ["home", "work"]);
        assert_eq!(bag.names().collect::<Vec<_>>(), ["Type"]);
    }

    #[test]
    fn empty_value_is_distinct_from_absent() {
        let mut bag = ParameterBag::new();
        bag.set("X-EMPTY", "");

        assert_eq!(bag.get("x-empty"), Some(""));
        assert!(bag.get("X-MISSING").is_none());
        assert!(bag.get_all("X-MISSING").is_empty());
    }

    #[test]
    fn insertion_order_survives_removal() {
        let mut bag: ParameterBag = [("A", "1"), ("B", "2"), ("C", "3")].into_iter().collect();

        assert_eq!(bag.remove("b"), Some(vec!["2".to_owned()]));
        bag.add("D", "4");

        assert_eq!(bag.names().collect::<Vec<_>>(), ["A", "C", "D"]);
        assert_eq!(bag.get("C"), Some("3"));
        assert_eq!(bag.get("D"), Some("4"));
    }

    #[test]
    fn set_replaces_in_place() {
        let mut bag: ParameterBag = [("PREF", "1"), ("TYPE", "home")].into_iter().collect();
        bag.set("pref", "2");

        assert_eq!(bag.names().collect::<Vec<_>>(), ["PREF", "TYPE"]);
        assert_eq!(bag.get("PREF"), Some("2"));

        bag.set_all("TYPE", Vec::<String>::new());
        assert!(!bag.contains("TYPE"));
    }

    #[test]
    fn remove_value_drops_emptied_parameter() {
        let mut bag: ParameterBag = [("TYPE", "work"), ("TYPE", "pref")].into_iter().collect();

        assert!(bag.remove_value("TYPE", "PREF"));
        assert_eq!(bag.get_all("TYPE"), ["work"]);
        assert!(bag.remove_value("TYPE", "work"));
        assert!(bag.is_empty());
        assert!(!bag.remove_value("TYPE", "work"));
    }

    #[test]
    fn retain_reindexes() {
        let mut bag: ParameterBag = [("PREF", "1"), ("LANGUAGE", "en"), ("PID", "1")]
            .into_iter()
            .collect();
        bag.retain(|name, _| !name.eq_ignore_ascii_case("pref"));

        assert_eq!(bag.get("LANGUAGE"), Some("en"));
        assert_eq!(bag.get("PID"), Some("1"));
        assert_eq!(bag.len(), 2);
    }

    #[test]
    fn parameter_version_table() {
        assert_eq!(parameter_versions("pref"), VersionSet::V4_ONLY);
        assert!(parameter_versions("CHARSET").contains(VCardVersion::V2_1));
        assert!(!parameter_versions("CHARSET").contains(VCardVersion::V3));
        assert!(parameter_versions("ENCODING").contains(VCardVersion::V3));
        assert_eq!(parameter_versions("LANGUAGE"), VersionSet::ALL);
        assert_eq!(parameter_versions("VALUE"), VersionSet::ALL);
        assert_eq!(parameter_versions("X-CUSTOM"), VersionSet::ALL);
    }
}
