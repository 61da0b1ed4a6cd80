use std::{collections::HashMap, fs, io, path::Path, sync::Arc};

use rand::seq::SliceRandom;
use tracing::{debug, info, warn};

use super::{
    core::{Difficulty, Word},
    services::{DefinitionSupplier, WordSupplier, NO_DEFINITION},
};

/// Words grouped by length, with optional definitions.
///
/// The file has one entry per line: a word, optionally followed by a tab and its
/// definition. Blank lines and lines starting with `#` are skipped, as are entries
/// that aren't purely alphabetic.
#[derive(Debug, Clone, Default)]
pub struct WordsList(Arc<Inner>);

#[derive(Debug, Default)]
struct Inner {
    by_length: HashMap<usize, Vec<Word>>,
    definitions: HashMap<Word, String>,
}

impl WordsList {
    /// A list with nothing in it, so every round gets a made-up word.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn load(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref();
        let list = Self::parse(&fs::read_to_string(path)?);

        info!(path = %path.display(), words = list.len(), "loaded word list");

        Ok(list)
    }

    pub fn parse(contents: &str) -> Self {
        let mut inner = Inner::default();

        for line in contents.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (word, definition) = match line.split_once('\t') {
                Some((word, definition)) => (word, Some(definition.trim())),
                None => (line, None),
            };

            let word: Word = match word.parse() {
                Ok(word) => word,
                Err(err) => {
                    debug!(%err, "skipping word list entry");
                    continue;
                }
            };

            if let Some(definition) = definition.filter(|d| !d.is_empty()) {
                inner.definitions.insert(word.clone(), definition.to_owned());
            }

            inner.by_length.entry(word.len()).or_default().push(word);
        }

        Self(Arc::new(inner))
    }

    pub fn len(&self) -> usize {
        self.0.by_length.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// A random word of exactly `length` letters, else of any length `difficulty` allows.
    pub fn random_word(&self, difficulty: Difficulty, length: usize) -> Option<Word> {
        let mut rng = rand::thread_rng();

        if let Some(word) = self
            .0
            .by_length
            .get(&length)
            .and_then(|words| words.choose(&mut rng))
        {
            return Some(word.clone());
        }

        let fitting: Vec<&Word> = difficulty
            .lengths()
            .filter_map(|length| self.0.by_length.get(&length))
            .flatten()
            .collect();

        let word = fitting.choose(&mut rng).map(|&word| word.clone());

        if word.is_none() && !self.is_empty() {
            warn!(%difficulty, "word list has nothing for this difficulty");
        }

        word
    }

    pub fn definition(&self, word: &Word) -> Option<&str> {
        self.0.definitions.get(word).map(String::as_str)
    }
}

impl WordSupplier for WordsList {
    async fn fetch(&self, difficulty: Difficulty, length: usize) -> Option<Word> {
        self.random_word(difficulty, length)
    }
}

impl DefinitionSupplier for WordsList {
    async fn fetch(&self, word: &Word) -> String {
        self.definition(word).unwrap_or(NO_DEFINITION).to_owned()
    }
}
