//! Things the game needs from the outside world.
//!
//! Transports implement these for whatever platform they talk to. Everything here
//! is best effort from the game's point of view: a supplier with nothing to offer
//! is worked around, never reported to players.

use std::{collections::HashMap, future::Future};

use super::{
    core::{Difficulty, Word},
    message::Outgoing,
};
use crate::utils::UserId;

pub const NO_DEFINITION: &str = "No definition available";

pub trait WordSupplier: Send + Sync + 'static {
    /// A word of `length` letters, or `None` if this source has nothing suitable.
    fn fetch(
        &self,
        difficulty: Difficulty,
        length: usize,
    ) -> impl Future<Output = Option<Word>> + Send;
}

/// Tries the first source, then the second.
impl<A: WordSupplier, B: WordSupplier> WordSupplier for (A, B) {
    async fn fetch(&self, difficulty: Difficulty, length: usize) -> Option<Word> {
        match self.0.fetch(difficulty, length).await {
            Some(word) => Some(word),
            None => self.1.fetch(difficulty, length).await,
        }
    }
}

/// Makes up pronounceable nonsense of the requested length.
#[derive(Debug, Clone, Copy, Default)]
pub struct Synthesize;

impl WordSupplier for Synthesize {
    async fn fetch(&self, _difficulty: Difficulty, length: usize) -> Option<Word> {
        Some(Word::synthesize(length, &mut rand::thread_rng()))
    }
}

pub trait DefinitionSupplier: Send + Sync + 'static {
    /// Never fails; falls back to [`NO_DEFINITION`].
    fn fetch(&self, word: &Word) -> impl Future<Output = String> + Send;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoDefinitions;

impl DefinitionSupplier for NoDefinitions {
    async fn fetch(&self, _word: &Word) -> String {
        NO_DEFINITION.to_owned()
    }
}

pub trait UserDirectory: Send + Sync + 'static {
    fn display_name(&self, user: UserId) -> impl Future<Output = String> + Send;
}

impl UserDirectory for HashMap<UserId, String> {
    async fn display_name(&self, user: UserId) -> String {
        self.get(&user)
            .cloned()
            .unwrap_or_else(|| format!("user {user}"))
    }
}

pub trait MessageEmitter: Send + Sync + 'static {
    type Error: std::error::Error + Send + Sync + 'static;

    fn send(&self, message: Outgoing) -> impl Future<Output = Result<(), Self::Error>> + Send;
}

#[cfg(test)]
mod tests {
    use super::{DefinitionSupplier, NoDefinitions, UserDirectory, NO_DEFINITION};
    use crate::{games::anagram::core::Word, utils::UserId};
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    #[tokio::test]
    async fn unknown_users_get_a_placeholder() {
        let names = HashMap::from([(UserId::new(1), "alice".to_owned())]);

        assert_eq!(names.display_name(UserId::new(1)).await, "alice");
        assert_eq!(names.display_name(UserId::new(9)).await, "user 9");
    }

    #[tokio::test]
    async fn no_definitions() {
        let word: Word = "puzzle".parse().expect("valid word");
        assert_eq!(NoDefinitions.fetch(&word).await, NO_DEFINITION);
    }
}
