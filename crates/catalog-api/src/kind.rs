//! # Resource Kinds
//!
//! The catalog exposes three collections. Each one lives under its own path
//! segment of the base endpoint.

use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

/// One of the three catalog categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    #[default]
    Character,
    Episode,
    Location,
}

impl ResourceKind {
    /// Every kind, in display order.
    pub const ALL: [ResourceKind; 3] = [
        ResourceKind::Character,
        ResourceKind::Episode,
        ResourceKind::Location,
    ];

    /// Path segment appended to the base endpoint.
    pub fn path(self) -> &'static str {
        match self {
            ResourceKind::Character => "character",
            ResourceKind::Episode => "episode",
            ResourceKind::Location => "location",
        }
    }

    /// Plural label used by front ends ("Characters", ...).
    pub fn label(self) -> &'static str {
        match self {
            ResourceKind::Character => "Characters",
            ResourceKind::Episode => "Episodes",
            ResourceKind::Location => "Locations",
        }
    }
}

impl Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path())
    }
}

/// Returned when a string names no known resource kind.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("unknown resource kind: {0}")]
pub struct UnknownKind(pub String);

impl FromStr for ResourceKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "character" | "characters" => Ok(ResourceKind::Character),
            "episode" | "episodes" => Ok(ResourceKind::Episode),
            "location" | "locations" => Ok(ResourceKind::Location),
            _ => Err(UnknownKind(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_match_endpoints() {
        assert_eq!(ResourceKind::Character.path(), "character");
        assert_eq!(ResourceKind::Episode.path(), "episode");
        assert_eq!(ResourceKind::Location.path(), "location");
    }

    #[test]
    fn test_parse_accepts_singular_and_plural() {
        assert_eq!("Characters".parse::<ResourceKind>(), Ok(ResourceKind::Character));
        assert_eq!("episode".parse::<ResourceKind>(), Ok(ResourceKind::Episode));
        assert_eq!(" LOCATIONS ".parse::<ResourceKind>(), Ok(ResourceKind::Location));
        assert!("planet".parse::<ResourceKind>().is_err());
    }
}
