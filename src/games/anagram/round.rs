use std::time::Duration;

use tokio::time::Instant;
use tracing::{debug, info, instrument, warn};

use super::{
    core::{Difficulty, Scrambled, Word},
    hints::HintTracker,
    services::WordSupplier,
    session::Session,
};
use crate::utils::ChatId;

/// One word to unscramble.
#[derive(Debug, Clone)]
pub struct Round {
    word: Word,
    scrambled: Scrambled,
    started: Instant,
}

impl Round {
    pub fn new(word: Word) -> Self {
        let scrambled = word.scramble(&mut rand::thread_rng());

        Self {
            word,
            scrambled,
            started: Instant::now(),
        }
    }

    pub fn word(&self) -> &Word {
        &self.word
    }

    pub fn scrambled(&self) -> &Scrambled {
        &self.scrambled
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}

#[derive(Debug, Clone)]
pub struct RoundManager<W> {
    words: W,
}

impl<W: WordSupplier> RoundManager<W> {
    pub fn new(words: W) -> Self {
        Self { words }
    }

    /// Always produces a word that fits `difficulty`, making one up if the supplier can't.
    #[instrument(skip(self))]
    pub async fn word(&self, difficulty: Difficulty) -> Word {
        let length = difficulty.random_length(&mut rand::thread_rng());

        match self.words.fetch(difficulty, length).await {
            Some(word) if difficulty.allows(&word) => word,
            Some(word) => {
                warn!(%word, "supplied word is the wrong length, making one up instead");
                Word::synthesize(length, &mut rand::thread_rng())
            }
            None => {
                debug!(length, "no word supplied, making one up");
                Word::synthesize(length, &mut rand::thread_rng())
            }
        }
    }

    /// Picks a fresh word for `chat` and clears everyone's hints there.
    pub async fn start(&self, chat: ChatId, difficulty: Difficulty, hints: &HintTracker) -> Round {
        let round = Round::new(self.word(difficulty).await);
        hints.reset(chat).await;
        round
    }

    pub async fn start_round(&self, session: &mut Session, hints: &HintTracker) {
        let round = self
            .start(session.chat(), session.difficulty(), hints)
            .await;

        session.begin_round(round);

        info!(
            chat = %session.chat(),
            round = session.round_number(),
            max = session.max_rounds(),
            "round started"
        );
    }
}
