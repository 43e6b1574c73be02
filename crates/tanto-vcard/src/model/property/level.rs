//! `LEVEL` parameter values.

use std::fmt;

use crate::error::MalformedParameter;
use crate::model::parameter::{ParameterBag, keys};

/// Degree of interest, used by `HOBBY` and `INTEREST`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InterestLevel {
    Low,
    Medium,
    High,
}

/// Degree of skill, used by `EXPERTISE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExpertiseLevel {
    Beginner,
    Average,
    Expert,
}

pub(crate) trait Level: Sized + Copy + 'static {
    const ALL: &'static [Self];

    fn as_str(self) -> &'static str;
}

impl InterestLevel {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl ExpertiseLevel {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Average => "average",
            Self::Expert => "expert",
        }
    }
}

impl Level for InterestLevel {
    const ALL: &'static [Self] = &[Self::Low, Self::Medium, Self::High];

    fn as_str(self) -> &'static str {
        Self::as_str(self)
    }
}

impl Level for ExpertiseLevel {
    const ALL: &'static [Self] = &[Self::Beginner, Self::Average, Self::Expert];

    fn as_str(self) -> &'static str {
        Self::as_str(self)
    }
}

impl fmt::Display for InterestLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for ExpertiseLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reads `LEVEL`, matching the known values case-insensitively.
pub(crate) fn level<L: Level>(parameters: &ParameterBag) -> Result<Option<L>, MalformedParameter> {
    let Some(raw) = parameters.get(keys::LEVEL) else {
        return Ok(None);
    };
    L::ALL
        .iter()
        .copied()
        .find(|level| level.as_str().eq_ignore_ascii_case(raw.trim()))
        .map(Some)
        .ok_or_else(|| {
            let expected: Vec<_> = L::ALL.iter().copied().map(Level::as_str).collect();
            MalformedParameter::new(
                keys::LEVEL,
                raw,
                format!("expected one of {}", expected.join(", ")),
            )
        })
}

pub(crate) fn set_level<L: Level>(parameters: &mut ParameterBag, level: Option<L>) {
    match level {
        Some(level) => parameters.set(keys::LEVEL, level.as_str()),
        None => {
            parameters.remove(keys::LEVEL);
        }
    }
}
