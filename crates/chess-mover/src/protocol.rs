//! Wire format of the move selector.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Body of a move request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRequest {
    /// Position string of the current position.
    pub board: String,
    /// Search depth.
    pub depth: u32,
    /// Thinking time budget in milliseconds.
    #[serde(rename = "moveTime")]
    pub move_time: u64,
}

/// Body of a move response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveResponse {
    /// The chosen move in coordinate form, e.g. `e7e5`.
    #[serde(rename = "move")]
    pub mv: String,
    #[serde(default)]
    pub evaluation: Option<f64>,
    #[serde(default)]
    pub thinking_time: Option<f64>,
}

/// Strength of the external side, mapped to a search depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
    Expert,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Easy,
        Difficulty::Medium,
        Difficulty::Hard,
        Difficulty::Expert,
    ];

    /// Search depth requested from the selector.
    pub const fn depth(self) -> u32 {
        match self {
            Difficulty::Easy => 4,
            Difficulty::Medium => 6,
            Difficulty::Hard => 8,
            Difficulty::Expert => 10,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
            Difficulty::Expert => "expert",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Difficulty::ALL
            .into_iter()
            .find(|d| d.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown difficulty: {}", s))
    }
}
