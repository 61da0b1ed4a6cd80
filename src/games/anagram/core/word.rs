use std::{ops::Deref, str::FromStr};

use rand::{seq::SliceRandom, Rng};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const VOWELS: &[u8] = b"aeiou";
const CONSONANTS: &[u8] = b"bcdfghjklmnpqrstvwxyz";

/// Extra shuffles tried when a scramble comes out identical to its word.
const RESHUFFLES: usize = 3;

/// A lowercase, purely alphabetic word.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Word(String);

impl Word {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Length in characters, not bytes.
    pub fn len(&self) -> usize {
        self.0.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether a chat message is this word, ignoring case and surrounding whitespace.
    pub fn matches(&self, text: &str) -> bool {
        text.trim().to_lowercase() == self.0
    }

    pub fn prefix(&self, count: usize) -> String {
        self.0.chars().take(count).collect()
    }

    /// Alternates consonants and vowels, starting with a consonant.
    pub fn synthesize(length: usize, rng: &mut impl Rng) -> Self {
        let word = (0..length)
            .map(|i| {
                let set = if i % 2 == 0 { CONSONANTS } else { VOWELS };
                char::from(*set.choose(rng).expect("letter sets are not empty"))
            })
            .collect();

        Self(word)
    }

    pub fn scramble(&self, rng: &mut impl Rng) -> Scrambled {
        let mut letters: Vec<char> = self.0.chars().collect();
        letters.shuffle(rng);

        for _ in 0..RESHUFFLES {
            if letters.iter().copied().ne(self.0.chars()) {
                break;
            }

            letters.shuffle(rng);
        }

        Scrambled(letters.into_iter().collect())
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ParseWordError {
    #[error("word is empty")]
    Empty,

    #[error("word `{0}` contains characters that are not letters")]
    NotAlphabetic(String),
}

impl FromStr for Word {
    type Err = ParseWordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let word = s.trim().to_lowercase();

        if word.is_empty() {
            return Err(ParseWordError::Empty);
        }

        if !word.chars().all(char::is_alphabetic) {
            return Err(ParseWordError::NotAlphabetic(s.to_owned()));
        }

        Ok(Self(word))
    }
}

impl TryFrom<String> for Word {
    type Error = ParseWordError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_str(&value)
    }
}

impl From<Word> for String {
    fn from(value: Word) -> Self {
        value.0
    }
}

impl std::fmt::Display for Word {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Word {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// The letters of a [`Word`] in shuffled order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scrambled(String);

impl Scrambled {
    pub fn is_anagram_of(&self, word: &Word) -> bool {
        let mut ours: Vec<char> = self.0.chars().collect();
        let mut theirs: Vec<char> = word.0.chars().collect();
        ours.sort_unstable();
        theirs.sort_unstable();

        ours == theirs
    }
}

impl Deref for Scrambled {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl std::fmt::Display for Scrambled {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::{ParseWordError, Word};
    use pretty_assertions::assert_eq;

    #[test]
    fn parse() {
        assert_eq!("  Puzzle ".parse::<Word>().map(String::from), Ok("puzzle".to_owned()));
        assert_eq!("".parse::<Word>(), Err(ParseWordError::Empty));
        assert!(matches!(
            "don't".parse::<Word>(),
            Err(ParseWordError::NotAlphabetic(_))
        ));
    }

    #[test]
    fn matches_ignores_case() {
        let word: Word = "puzzle".parse().expect("valid word");

        assert!(word.matches("PUZZLE"));
        assert!(word.matches(" Puzzle\n"));
        assert!(!word.matches("puzzles"));
        assert!(!word.matches("puz zle"));
    }

    #[test]
    fn synthesized_words_alternate() {
        let mut rng = rand::thread_rng();

        for length in 4..=12 {
            let word = Word::synthesize(length, &mut rng);
            assert_eq!(word.len(), length);

            for (i, letter) in word.as_str().chars().enumerate() {
                assert_eq!("aeiou".contains(letter), i % 2 == 1, "{word}");
            }
        }
    }

    #[test]
    fn scramble_keeps_letters() {
        let mut rng = rand::thread_rng();

        for _ in 0..1000 {
            let word = Word::synthesize(8, &mut rng);
            let scrambled = word.scramble(&mut rng);

            assert!(scrambled.is_anagram_of(&word), "{scrambled} / {word}");
        }
    }

    #[test]
    fn prefix() {
        let word: Word = "puzzle".parse().expect("valid word");

        assert_eq!(word.prefix(0), "");
        assert_eq!(word.prefix(3), "puz");
        assert_eq!(word.prefix(10), "puzzle");
    }
}
