mod difficulty;
pub use difficulty::{Difficulty, ParseDifficultyError};

mod word;
pub use word::{ParseWordError, Scrambled, Word};
