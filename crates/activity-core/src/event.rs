//! Activity events as delivered by the motion service.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::Confidence;

/// The resolved activity classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
    Running,
    Walking,
    Automotive,
    Cycling,
    Stationary,
    Unknown,
}

impl ActivityKind {
    /// Resolves the raw activity flags.
    ///
    /// Several flags may be set at once; the first match in the order
    /// running, walking, automotive, cycling, stationary wins.
    #[must_use]
    pub const fn from_flags(raw: &RawActivity) -> Self {
        if raw.running {
            Self::Running
        } else if raw.walking {
            Self::Walking
        } else if raw.automotive {
            Self::Automotive
        } else if raw.cycling {
            Self::Cycling
        } else if raw.stationary {
            Self::Stationary
        } else {
            Self::Unknown
        }
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Running => "running",
            Self::Walking => "walking",
            Self::Automotive => "automotive",
            Self::Cycling => "cycling",
            Self::Stationary => "stationary",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A notification from the motion service, before classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawActivity {
    /// When the activity began.
    pub start_time: DateTime<Utc>,
    #[serde(default)]
    pub stationary: bool,
    #[serde(default)]
    pub walking: bool,
    #[serde(default)]
    pub running: bool,
    #[serde(default)]
    pub automotive: bool,
    #[serde(default)]
    pub cycling: bool,
    /// Set by the service when it could not classify the motion.
    #[serde(default)]
    pub unknown: bool,
    #[serde(default = "unknown_confidence")]
    pub confidence: Confidence,
}

const fn unknown_confidence() -> Confidence {
    Confidence::Unknown
}

impl RawActivity {
    /// A notification with no activity flags set.
    pub const fn new(start_time: DateTime<Utc>, confidence: Confidence) -> Self {
        Self {
            start_time,
            stationary: false,
            walking: false,
            running: false,
            automotive: false,
            cycling: false,
            unknown: false,
            confidence,
        }
    }
}

/// A classified activity observation.
///
/// Events are immutable once built; the store only appends or clears them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ActivityEvent {
    start_time: DateTime<Utc>,
    kind: ActivityKind,
    confidence: Confidence,
}

impl ActivityEvent {
    pub const fn new(start_time: DateTime<Utc>, kind: ActivityKind, confidence: Confidence) -> Self {
        Self {
            start_time,
            kind,
            confidence,
        }
    }

    pub const fn start_time(&self) -> DateTime<Utc> {
        self.start_time
    }

    pub const fn kind(&self) -> ActivityKind {
        self.kind
    }

    pub const fn confidence(&self) -> Confidence {
        self.confidence
    }
}

impl From<&RawActivity> for ActivityEvent {
    fn from(raw: &RawActivity) -> Self {
        Self::new(raw.start_time, ActivityKind::from_flags(raw), raw.confidence)
    }
}

impl From<RawActivity> for ActivityEvent {
    fn from(raw: RawActivity) -> Self {
        Self::from(&raw)
    }
}
