use std::collections::HashMap;

use tokio::sync::RwLock;
use tracing::trace;

use super::core::Word;
use crate::utils::{ChatId, UserId};

pub const PLACEHOLDER: char = '_';

/// Per-chat, per-user count of letters revealed in the current round.
#[derive(Debug, Default)]
pub struct HintTracker(RwLock<HashMap<ChatId, HashMap<UserId, usize>>>);

impl HintTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reveals one more letter of `word` to `user`, up to the whole word.
    pub async fn next_hint(&self, chat: ChatId, user: UserId, word: &Word) -> Hint {
        let mut guard = self.0.write().await;
        let revealed = guard.entry(chat).or_default().entry(user).or_default();

        *revealed = (*revealed + 1).min(word.len());
        trace!(%chat, %user, revealed = *revealed, "hint");

        Hint::new(word, *revealed)
    }

    pub async fn revealed(&self, chat: ChatId, user: UserId) -> usize {
        let guard = self.0.read().await;
        guard
            .get(&chat)
            .and_then(|users| users.get(&user))
            .copied()
            .unwrap_or_default()
    }

    /// Forgets every user's progress in `chat`.
    pub async fn reset(&self, chat: ChatId) {
        let mut guard = self.0.write().await;
        guard.remove(&chat);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hint {
    revealed: usize,
    total: usize,
    prefix: String,
}

impl Hint {
    fn new(word: &Word, revealed: usize) -> Self {
        Self {
            revealed,
            total: word.len(),
            prefix: word.prefix(revealed),
        }
    }

    pub fn revealed(&self) -> usize {
        self.revealed
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// The prefix followed by one placeholder per hidden letter.
    pub fn masked(&self) -> String {
        let hidden = self.total - self.revealed;
        let mut masked = self.prefix.clone();
        masked.extend(std::iter::repeat(PLACEHOLDER).take(hidden));
        masked
    }
}

#[cfg(test)]
mod tests {
    use super::HintTracker;
    use crate::{
        games::anagram::core::Word,
        utils::{ChatId, UserId},
    };
    use pretty_assertions::assert_eq;

    const CHAT: ChatId = ChatId::new(-100);
    const OTHER_CHAT: ChatId = ChatId::new(-200);
    const ALICE: UserId = UserId::new(1);
    const BOB: UserId = UserId::new(2);

    fn puzzle() -> Word {
        "puzzle".parse().expect("valid word")
    }

    #[tokio::test]
    async fn reveals_one_letter_per_call() {
        let hints = HintTracker::new();
        let word = puzzle();

        let mut prefixes = Vec::new();
        for _ in 0..4 {
            prefixes.push(hints.next_hint(CHAT, ALICE, &word).await.prefix().to_owned());
        }

        assert_eq!(prefixes, ["p", "pu", "puz", "puzz"]);
        assert_eq!(hints.revealed(CHAT, ALICE).await, 4);
    }

    #[tokio::test]
    async fn masks_the_rest() {
        let hints = HintTracker::new();
        let word = puzzle();

        let hint = hints.next_hint(CHAT, ALICE, &word).await;
        assert_eq!(hint.masked(), "p_____");

        let hint = hints.next_hint(CHAT, ALICE, &word).await;
        assert_eq!(hint.masked(), "pu____");
        assert_eq!((hint.revealed(), hint.total()), (2, 6));
    }

    #[tokio::test]
    async fn caps_at_word_length() {
        let hints = HintTracker::new();
        let word = puzzle();

        for _ in 0..10 {
            hints.next_hint(CHAT, ALICE, &word).await;
        }

        let hint = hints.next_hint(CHAT, ALICE, &word).await;
        assert_eq!(hint.revealed(), 6);
        assert_eq!(hint.masked(), "puzzle");
    }

    #[tokio::test]
    async fn users_and_chats_are_independent() {
        let hints = HintTracker::new();
        let word = puzzle();

        hints.next_hint(CHAT, ALICE, &word).await;
        hints.next_hint(CHAT, ALICE, &word).await;

        assert_eq!(hints.next_hint(CHAT, BOB, &word).await.prefix(), "p");
        assert_eq!(hints.next_hint(OTHER_CHAT, ALICE, &word).await.prefix(), "p");
    }

    #[tokio::test]
    async fn reset_clears_only_that_chat() {
        let hints = HintTracker::new();
        let word = puzzle();

        hints.next_hint(CHAT, ALICE, &word).await;
        hints.next_hint(OTHER_CHAT, ALICE, &word).await;
        hints.reset(CHAT).await;

        assert_eq!(hints.revealed(CHAT, ALICE).await, 0);
        assert_eq!(hints.revealed(OTHER_CHAT, ALICE).await, 1);
        assert_eq!(hints.next_hint(CHAT, ALICE, &word).await.prefix(), "p");
    }
}
