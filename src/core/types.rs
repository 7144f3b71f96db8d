//! Classification vocabularies returned by the Arachnid Shield API.
//!
//! Both enums are closed. A token outside the vocabulary is an error and is
//! never coerced to a known variant: treating an unrecognized classification
//! as `NoKnownMatch` could hide harmful content.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A token that does not belong to a closed vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized {kind} '{token}'")]
pub struct UnknownToken {
    /// Which vocabulary was being parsed.
    pub kind: &'static str,
    /// The raw token.
    pub token: String,
}

/// The technology used to verify a match between the scanned media and
/// media in the database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchType {
    /// Exact cryptographic hash match (SHA1).
    Exact,
    /// Visual near-match (perceptual hash).
    Near,
}

impl MatchType {
    /// All variants, in declaration order.
    pub const ALL: [MatchType; 2] = [Self::Exact, Self::Near];

    /// Returns the wire token for this variant.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::Near => "near",
        }
    }

    /// Parses a nullable wire value. `None` (JSON null) means no match.
    pub fn from_wire(token: Option<&str>) -> Result<Option<Self>, UnknownToken> {
        token.map(str::parse::<Self>).transpose()
    }
}

impl FromStr for MatchType {
    type Err = UnknownToken;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "exact" => Ok(Self::Exact),
            "near" => Ok(Self::Near),
            other => Err(UnknownToken {
                kind: "match type",
                token: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for MatchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The category a scanned image or video resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MediaClassification {
    /// Child sexual abuse material.
    Csam,

    /// Content harmful to children: material associated with an abusive
    /// incident, or nude/partially nude imagery of children used in a
    /// sexualized context.
    HarmfulToChildren,

    /// The content did not match any known media.
    NoKnownMatch,
}

impl MediaClassification {
    /// All variants, in declaration order.
    pub const ALL: [MediaClassification; 3] =
        [Self::Csam, Self::HarmfulToChildren, Self::NoKnownMatch];

    /// Returns the wire token for this variant.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Csam => "csam",
            Self::HarmfulToChildren => "harmful-to-children",
            Self::NoKnownMatch => "no-known-match",
        }
    }

    /// Returns `true` for every classification other than `NoKnownMatch`.
    pub fn is_known_match(&self) -> bool {
        !matches!(self, Self::NoKnownMatch)
    }
}

impl FromStr for MediaClassification {
    type Err = UnknownToken;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "csam" => Ok(Self::Csam),
            "harmful-to-children" => Ok(Self::HarmfulToChildren),
            "no-known-match" => Ok(Self::NoKnownMatch),
            other => Err(UnknownToken {
                kind: "media classification",
                token: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for MediaClassification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
