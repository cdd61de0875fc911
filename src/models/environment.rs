//! Workspace environment enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Workspace environments a Genie Space can be promoted to.
///
/// Each environment appears as an identifier suffix (`_dev`, `_tst`, `_stg`,
/// `_prd`) inside the serialized space blob.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Development workspace.
    Dev,
    /// Test workspace.
    Tst,
    /// Staging workspace.
    Stg,
    /// Production workspace.
    Prd,
}

impl Environment {
    /// Returns all environment variants.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Dev, Self::Tst, Self::Stg, Self::Prd]
    }

    /// Returns the environment as a string slice.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Dev => "dev",
            Self::Tst => "tst",
            Self::Stg => "stg",
            Self::Prd => "prd",
        }
    }

    /// Returns the identifier suffix embedded in serialized space blobs.
    #[must_use]
    pub const fn tag(&self) -> &'static str {
        match self {
            Self::Dev => "_dev",
            Self::Tst => "_tst",
            Self::Stg => "_stg",
            Self::Prd => "_prd",
        }
    }

    /// Parses an environment from a string, case-insensitively.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "dev" => Some(Self::Dev),
            "tst" => Some(Self::Tst),
            "stg" => Some(Self::Stg),
            "prd" => Some(Self::Prd),
            _ => None,
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use test_case::test_case;

    #[test_case("dev", Environment::Dev)]
    #[test_case("tst", Environment::Tst)]
    #[test_case("stg", Environment::Stg)]
    #[test_case("PRD", Environment::Prd)]
    fn test_parse_valid(input: &str, expected: Environment) {
        assert_eq!(Environment::parse(input), Some(expected));
    }

    #[test_case("prod")]
    #[test_case("")]
    #[test_case("development")]
    fn test_parse_invalid(input: &str) {
        assert_eq!(Environment::parse(input), None);
    }

    #[test]
    fn test_all_covers_four_environments() {
        assert_eq!(Environment::all().len(), 4);
    }

    #[test]
    fn test_tag_matches_display() {
        for env in Environment::all() {
            assert_eq!(env.tag(), format!("_{env}"));
        }
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&Environment::Stg).unwrap();
        assert_eq!(json, "\"stg\"");
        let parsed: Environment = serde_json::from_str("\"prd\"").unwrap();
        assert_eq!(parsed, Environment::Prd);
    }
}
