use std::{ops::RangeInclusive, str::FromStr};

use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::Word;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Self; 3] = [Self::Easy, Self::Medium, Self::Hard];

    /// Word lengths allowed at this difficulty, in characters.
    pub const fn lengths(self) -> RangeInclusive<usize> {
        match self {
            Self::Easy => 4..=6,
            Self::Medium => 6..=9,
            Self::Hard => 8..=12,
        }
    }

    pub fn random_length(self, rng: &mut impl Rng) -> usize {
        rng.gen_range(self.lengths())
    }

    pub fn allows(self, word: &Word) -> bool {
        self.lengths().contains(&word.len())
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }

    pub const fn title(self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
#[error("`{0}` is not a difficulty, expected easy, medium or hard")]
pub struct ParseDifficultyError(String);

impl FromStr for Difficulty {
    type Err = ParseDifficultyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|difficulty| s.eq_ignore_ascii_case(difficulty.name()))
            .ok_or_else(|| ParseDifficultyError(s.to_owned()))
    }
}
