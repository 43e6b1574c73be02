//! vCard format versions.

use std::fmt;
use std::str::FromStr;

/// vCard format version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum VCardVersion {
    /// vCard 2.1 (versit consortium).
    V2_1,
    /// vCard 3.0 (RFC 2426).
    V3,
    /// vCard 4.0 (RFC 6350).
    #[default]
    V4,
}

impl VCardVersion {
    /// Every version, oldest first.
    pub const ALL: [Self; 3] = [Self::V2_1, Self::V3, Self::V4];

    /// Parses the value of a `VERSION` property.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "2.1" => Some(Self::V2_1),
            "3.0" => Some(Self::V3),
            "4.0" => Some(Self::V4),
            _ => None,
        }
    }

    /// Returns the version string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::V2_1 => "2.1",
            Self::V3 => "3.0",
            Self::V4 => "4.0",
        }
    }

    const fn bit(self) -> u8 {
        match self {
            Self::V2_1 => 0b001,
            Self::V3 => 0b010,
            Self::V4 => 0b100,
        }
    }
}

impl FromStr for VCardVersion {
    type Err = UnknownVersion;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| UnknownVersion(s.to_owned()))
    }
}

impl fmt::Display for VCardVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A `VERSION` value that names no known vCard version.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown vCard version {0:?}")]
pub struct UnknownVersion(pub String);

/// A set of vCard versions.
///
/// Property types and parameters declare the versions they may be written
/// in with one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct VersionSet(u8);

impl VersionSet {
    /// No version at all.
    pub const EMPTY: Self = Self(0);
    /// All three versions.
    pub const ALL: Self = Self(0b111);
    /// vCard 4.0 only.
    pub const V4_ONLY: Self = Self(0b100);
    /// vCard 3.0 and 4.0.
    pub const V3_AND_LATER: Self = Self(0b110);

    /// Builds a set from a list of versions.
    #[must_use]
    pub const fn of(versions: &[VCardVersion]) -> Self {
        let mut bits = 0;
        let mut i = 0;
        while i < versions.len() {
            bits |= versions[i].bit();
            i += 1;
        }
        Self(bits)
    }

    #[must_use]
    pub const fn contains(self, version: VCardVersion) -> bool {
        self.0 & version.bit() != 0
    }

    /// Returns a copy of the set that also contains `version`.
    #[must_use]
    pub const fn with(self, version: VCardVersion) -> Self {
        Self(self.0 | version.bit())
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Iterates over the members, oldest first.
    pub fn iter(self) -> impl Iterator<Item = VCardVersion> {
        VCardVersion::ALL
            .into_iter()
            .filter(move |version| self.contains(*version))
    }
}

impl FromIterator<VCardVersion> for VersionSet {
    fn from_iter<I: IntoIterator<Item = VCardVersion>>(iter: I) -> Self {
        iter.into_iter().fold(Self::EMPTY, Self::with)
    }
}
