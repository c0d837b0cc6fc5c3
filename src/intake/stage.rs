//! Registration stage machine — tracks which step of the dialogue a
//! participant occupies.

use serde::{Deserialize, Serialize};

/// The stages of the registration dialogue.
///
/// Progresses linearly: Start → AwaitingFullname → AwaitingBirthday →
/// AwaitingPosition → AwaitingExperience → Complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Start,
    AwaitingFullname,
    AwaitingBirthday,
    AwaitingPosition,
    AwaitingExperience,
    Complete,
}

impl Stage {
    /// Check if a transition from `self` to `target` is valid.
    pub fn can_transition_to(&self, target: Stage) -> bool {
        use Stage::*;
        matches!(
            (self, target),
            (Start, AwaitingFullname)
                | (AwaitingFullname, AwaitingBirthday)
                | (AwaitingBirthday, AwaitingPosition)
                | (AwaitingPosition, AwaitingExperience)
                | (AwaitingExperience, Complete)
        )
    }

    /// Whether this stage is terminal (registration is done).
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Complete)
    }

    /// Whether this stage expects a field answer from the participant.
    pub fn awaits_field(&self) -> bool {
        !matches!(self, Self::Start | Self::Complete)
    }

    /// Get the next stage in the linear progression, if any.
    pub fn next(&self) -> Option<Stage> {
        use Stage::*;
        match self {
            Start => Some(AwaitingFullname),
            AwaitingFullname => Some(AwaitingBirthday),
            AwaitingBirthday => Some(AwaitingPosition),
            AwaitingPosition => Some(AwaitingExperience),
            AwaitingExperience => Some(Complete),
            Complete => None,
        }
    }

    /// Canonical string used in the store and in logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::AwaitingFullname => "awaiting_fullname",
            Self::AwaitingBirthday => "awaiting_birthday",
            Self::AwaitingPosition => "awaiting_position",
            Self::AwaitingExperience => "awaiting_experience",
            Self::Complete => "complete",
        }
    }
}

impl Default for Stage {
    fn default() -> Self {
        Self::Start
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Stage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "start" => Ok(Self::Start),
            "awaiting_fullname" => Ok(Self::AwaitingFullname),
            "awaiting_birthday" => Ok(Self::AwaitingBirthday),
            "awaiting_position" => Ok(Self::AwaitingPosition),
            "awaiting_experience" => Ok(Self::AwaitingExperience),
            "complete" => Ok(Self::Complete),
            other => Err(format!("Unknown stage: {other}")),
        }
    }
}
