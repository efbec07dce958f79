//! Core type definitions with validation.

use std::fmt;
use std::str::FromStr;

use serde::de::{self, IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Validation errors for core types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The filter name is not one of `all`, `low`, `medium`, `high`.
    #[error("unknown confidence filter: {value} (expected all, low, medium or high)")]
    UnknownFilter { value: String },
}

/// The motion service's self-reported certainty in a classification.
///
/// `Unknown` is the sentinel for raw values the service may add in the future.
/// It never matches a specific confidence filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Confidence {
    Low,
    Medium,
    High,
    Unknown,
}

impl Confidence {
    /// Maps the platform's integer confidence code.
    #[must_use]
    pub const fn from_code(code: i64) -> Self {
        match code {
            0 => Self::Low,
            1 => Self::Medium,
            2 => Self::High,
            _ => Self::Unknown,
        }
    }

    /// Maps a confidence name, falling back to the sentinel.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "low" => Self::Low,
            "medium" => Self::Medium,
            "high" => Self::High,
            _ => Self::Unknown,
        }
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for Confidence {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

/// Accepts either a name or the integer code. Anything unrecognized is the sentinel.
impl<'de> Deserialize<'de> for Confidence {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ConfidenceVisitor;

        impl<'a> Visitor<'a> for ConfidenceVisitor {
            type Value = Confidence;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a confidence name or integer code")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Confidence, E> {
                Ok(Confidence::from_name(v))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Confidence, E> {
                Ok(Confidence::from_code(v))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Confidence, E> {
                Ok(i64::try_from(v).map_or(Confidence::Unknown, Confidence::from_code))
            }

            fn visit_f64<E: de::Error>(self, _v: f64) -> Result<Confidence, E> {
                Ok(Confidence::Unknown)
            }

            fn visit_bool<E: de::Error>(self, _v: bool) -> Result<Confidence, E> {
                Ok(Confidence::Unknown)
            }

            fn visit_unit<E: de::Error>(self) -> Result<Confidence, E> {
                Ok(Confidence::Unknown)
            }

            fn visit_seq<A: SeqAccess<'a>>(self, mut seq: A) -> Result<Confidence, A::Error> {
                while seq.next_element::<IgnoredAny>()?.is_some() {}
                Ok(Confidence::Unknown)
            }

            fn visit_map<A: MapAccess<'a>>(self, mut map: A) -> Result<Confidence, A::Error> {
                while map.next_entry::<IgnoredAny, IgnoredAny>()?.is_some() {}
                Ok(Confidence::Unknown)
            }
        }

        deserializer.deserialize_any(ConfidenceVisitor)
    }
}

/// The confidence level selected in the accuracy picker.
///
/// Deserialization goes through [`FromStr`], so names are case-insensitive everywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum ConfidenceFilter {
    #[default]
    All,
    Low,
    Medium,
    High,
}

impl ConfidenceFilter {
    /// Picker order.
    pub const ALL: [Self; 4] = [Self::All, Self::Low, Self::Medium, Self::High];

    /// Whether an event with `confidence` is visible under this filter.
    #[must_use]
    pub const fn matches(self, confidence: Confidence) -> bool {
        matches!(
            (self, confidence),
            (Self::All, _)
                | (Self::Low, Confidence::Low)
                | (Self::Medium, Confidence::Medium)
                | (Self::High, Confidence::High)
        )
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for ConfidenceFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ConfidenceFilter {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(ValidationError::UnknownFilter {
                value: s.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for ConfidenceFilter {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
