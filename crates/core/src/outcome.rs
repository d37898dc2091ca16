//! Canonical outcome labels.
//!
//! Cross-venue matching happens on a closed label vocabulary. Venue outcomes
//! whose label falls outside it are invisible to the detector.

use serde::{Deserialize, Serialize};

/// Canonical label of a settleable market outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeLabel {
    HomeWin,
    AwayWin,
    Draw,
    Over,
    Under,
    Yes,
    No,
}

impl OutcomeLabel {
    /// Every canonical label, in the order leg selection walks them.
    pub const CANONICAL: [Self; 7] = [
        Self::HomeWin,
        Self::AwayWin,
        Self::Draw,
        Self::Over,
        Self::Under,
        Self::Yes,
        Self::No,
    ];

    /// Parses a stored label, returning `None` outside the vocabulary.
    #[must_use]
    pub fn parse(label: &str) -> Option<Self> {
        match label {
            "home_win" => Some(Self::HomeWin),
            "away_win" => Some(Self::AwayWin),
            "draw" => Some(Self::Draw),
            "over" => Some(Self::Over),
            "under" => Some(Self::Under),
            "yes" => Some(Self::Yes),
            "no" => Some(Self::No),
            _ => None,
        }
    }

    /// Returns the stored string form.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::HomeWin => "home_win",
            Self::AwayWin => "away_win",
            Self::Draw => "draw",
            Self::Over => "over",
            Self::Under => "under",
            Self::Yes => "yes",
            Self::No => "no",
        }
    }
}

impl std::fmt::Display for OutcomeLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
