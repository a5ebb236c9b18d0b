//! validated rating score.

use std::fmt;

use serde::{Deserialize, Serialize};

/// lowest accepted rating score.
pub const SCORE_MIN: u8 = 1;

/// highest accepted rating score.
pub const SCORE_MAX: u8 = 5;

/// a rating score, guaranteed to be within 1..=5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Score(u8);

impl Score {
    /// create a new score, rejecting values outside 1..=5.
    pub fn new(value: u8) -> Result<Self, ScoreError> {
        if (SCORE_MIN..=SCORE_MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(ScoreError::OutOfRange { got: value })
        }
    }

    /// get the raw score value.
    pub fn value(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u8> for Score {
    type Error = ScoreError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Score> for u8 {
    fn from(score: Score) -> Self {
        score.0
    }
}

/// error type for invalid rating scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ScoreError {
    /// score is outside the accepted 1..=5 range.
    #[error("rating score must be between {SCORE_MIN} and {SCORE_MAX}, got {got}")]
    OutOfRange {
        /// the rejected value.
        got: u8,
    },
}

// serde implementation - deserialize with validation
impl<'de> Deserialize<'de> for Score {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = u8::deserialize(deserializer)?;
        Self::new(value).map_err(serde::de::Error::custom)
    }
}

impl Serialize for Score {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.0.serialize(serializer)
    }
}
