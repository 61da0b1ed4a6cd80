use std::{collections::BTreeMap, time::Duration};

use tokio::time::Instant;

use super::{
    core::{Difficulty, Scrambled, Word},
    round::Round,
};
use crate::utils::{ChatId, UserId};

/// Everything about one game in one chat.
#[derive(Debug)]
pub struct Session {
    chat: ChatId,
    difficulty: Difficulty,
    solo: Option<UserId>,

    /// Points this game, in the order players first scored.
    players: Vec<(UserId, u32)>,

    round_number: u32,
    max_rounds: u32,
    round: Round,
    words_used: Vec<Word>,
    solved_by: BTreeMap<u32, UserId>,

    started: Instant,
    finished: bool,
}

impl Session {
    /// Starts at round one with `first` as its word.
    pub fn new(
        chat: ChatId,
        difficulty: Difficulty,
        max_rounds: u32,
        solo: Option<UserId>,
        first: Round,
    ) -> Self {
        Self {
            chat,
            difficulty,
            solo,
            players: Vec::new(),
            round_number: 1,
            max_rounds,
            words_used: vec![first.word().clone()],
            round: first,
            solved_by: BTreeMap::new(),
            started: Instant::now(),
            finished: false,
        }
    }

    pub fn chat(&self) -> ChatId {
        self.chat
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn is_solo(&self) -> bool {
        self.solo.is_some()
    }

    pub fn solo_player(&self) -> Option<UserId> {
        self.solo
    }

    pub fn round_number(&self) -> u32 {
        self.round_number
    }

    pub fn max_rounds(&self) -> u32 {
        self.max_rounds
    }

    pub fn word(&self) -> &Word {
        self.round.word()
    }

    pub fn scrambled(&self) -> &Scrambled {
        self.round.scrambled()
    }

    /// Time since the current round started.
    pub fn elapsed(&self) -> Duration {
        self.round.elapsed()
    }

    /// Time since the game started.
    pub fn duration(&self) -> Duration {
        self.started.elapsed()
    }

    pub fn words_used(&self) -> &[Word] {
        &self.words_used
    }

    pub fn solved_by(&self) -> &BTreeMap<u32, UserId> {
        &self.solved_by
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn finish(&mut self) {
        self.finished = true;
    }

    /// Whether `text` from `user` solves the current round.
    ///
    /// Always false once the game is over, and for anyone but the player of a solo game.
    pub fn accepts(&self, user: UserId, text: &str) -> bool {
        if self.finished {
            return false;
        }

        if self.solo.is_some_and(|solo| solo != user) {
            return false;
        }

        self.word().matches(text)
    }

    pub fn points(&self, user: UserId) -> u32 {
        self.players
            .iter()
            .find_map(|&(id, points)| (id == user).then_some(points))
            .unwrap_or_default()
    }

    /// Adds to `user`'s points and returns their new total for this game.
    pub fn award(&mut self, user: UserId, points: u32) -> u32 {
        if self.solo.is_some_and(|solo| solo != user) {
            return 0;
        }

        if let Some((_, total)) = self.players.iter_mut().find(|(id, _)| *id == user) {
            *total += points;
            *total
        } else {
            self.players.push((user, points));
            points
        }
    }

    pub fn record_solver(&mut self, user: UserId) {
        self.solved_by.insert(self.round_number, user);
    }

    /// Moves the counter on; true when that was the last round.
    pub fn advance(&mut self) -> bool {
        self.round_number += 1;
        self.round_number > self.max_rounds
    }

    pub fn begin_round(&mut self, round: Round) {
        self.words_used.push(round.word().clone());
        self.round = round;
    }

    /// Players by points, highest first. Equal scores keep the order players joined in.
    pub fn standings(&self) -> Vec<(UserId, u32)> {
        let mut standings = self.players.clone();
        standings.sort_by(|(_, a), (_, b)| b.cmp(a));
        standings
    }

    /// Rounds solved per player, most first. Equal counts keep the order players joined in.
    pub fn solved_counts(&self) -> Vec<(UserId, usize)> {
        let mut counts: Vec<(UserId, usize)> = self
            .players
            .iter()
            .map(|&(user, _)| {
                let count = self.solved_by.values().filter(|&&id| id == user).count();
                (user, count)
            })
            .filter(|&(_, count)| count > 0)
            .collect();

        counts.sort_by(|(_, a), (_, b)| b.cmp(a));
        counts
    }

    /// The first of the longest words played.
    pub fn longest_word(&self) -> Option<&Word> {
        self.words_used
            .iter()
            .fold(None, |longest: Option<&Word>, word| match longest {
                Some(longest) if longest.len() >= word.len() => Some(longest),
                _ => Some(word),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::Session;
    use crate::{
        games::anagram::{
            core::{Difficulty, Word},
            round::Round,
        },
        utils::{ChatId, UserId},
    };
    use pretty_assertions::assert_eq;

    const CHAT: ChatId = ChatId::new(-1);
    const A: UserId = UserId::new(1);
    const B: UserId = UserId::new(2);
    const C: UserId = UserId::new(3);

    fn round(word: &str) -> Round {
        Round::new(word.parse::<Word>().expect("valid word"))
    }

    fn group(max_rounds: u32) -> Session {
        Session::new(CHAT, Difficulty::Medium, max_rounds, None, round("puzzle"))
    }

    #[test]
    fn starts_at_round_one() {
        let session = group(10);

        assert_eq!(session.round_number(), 1);
        assert_eq!(session.words_used().len(), 1);
        assert!(session.scrambled().is_anagram_of(session.word()));
    }

    #[test]
    fn accepts_only_the_word() {
        let session = group(10);

        assert!(session.accepts(A, "Puzzle"));
        assert!(!session.accepts(A, "puzzles"));
        assert!(!session.accepts(A, "hello everyone"));
    }

    #[test]
    fn finished_sessions_accept_nothing() {
        let mut session = group(10);
        session.finish();

        assert!(!session.accepts(A, "puzzle"));
    }

    #[test]
    fn solo_sessions_ignore_others() {
        let mut session = Session::new(CHAT, Difficulty::Easy, 10, Some(A), round("puzzle"));

        assert!(session.accepts(A, "puzzle"));
        assert!(!session.accepts(B, "puzzle"));

        session.award(A, 8);
        assert_eq!(session.award(B, 10), 0);
        assert_eq!(session.standings(), [(A, 8)]);
    }

    #[test]
    fn award_accumulates() {
        let mut session = group(10);

        assert_eq!(session.award(A, 7), 7);
        assert_eq!(session.award(A, 3), 10);
        assert_eq!(session.points(A), 10);
        assert_eq!(session.points(B), 0);
    }

    #[test]
    fn standings_are_descending() {
        let mut session = group(10);
        session.award(A, 30);
        session.award(B, 45);
        session.award(C, 10);

        let order: Vec<UserId> = session.standings().into_iter().map(|(id, _)| id).collect();
        assert_eq!(order, [B, A, C]);
    }

    #[test]
    fn ties_keep_join_order() {
        let mut session = group(10);
        session.award(C, 5);
        session.award(A, 5);
        session.award(B, 9);

        let order: Vec<UserId> = session.standings().into_iter().map(|(id, _)| id).collect();
        assert_eq!(order, [B, C, A]);
    }

    #[test]
    fn advance_reports_last_round() {
        let mut session = group(2);

        assert!(!session.advance());
        assert_eq!(session.round_number(), 2);
        assert!(session.advance());
    }

    #[test]
    fn solved_counts() {
        let mut session = group(10);

        for user in [A, B, B, A, B] {
            session.award(user, 1);
            session.record_solver(user);
            session.advance();
        }

        assert_eq!(session.solved_counts(), [(B, 3), (A, 2)]);
        assert_eq!(session.solved_by().len(), 5);
    }

    #[test]
    fn longest_word_prefers_first() {
        let mut session = group(10);
        session.begin_round(round("anagram"));
        session.begin_round(round("letters"));
        session.begin_round(round("cat"));

        assert_eq!(session.longest_word().map(Word::as_str), Some("anagram"));
        assert_eq!(session.words_used().len(), 4);
    }
}
