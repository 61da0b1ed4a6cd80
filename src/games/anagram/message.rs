//! Everything players get to read.

use std::{fmt::Write, time::Duration};

use super::{core::Difficulty, core::Word, hints::Hint, session::Session};
use crate::{
    stats::Record,
    utils::{ChatId, FormatDuration},
};

pub const APOLOGY: &str = "An error occurred. Please try again.";
pub const NO_ACTIVE_GAME: &str = "No active game! Start a new game with /newgame or /newplay";
pub const NO_DIFFICULTY: &str =
    "Please start a new game and select difficulty first! Use /newgame or /newplay";
pub const NO_WINNERS: &str = "Game ended with no winners.";
pub const NO_LEADERBOARD: &str = "No leaderboard data yet. Be the first to play!";
pub const SOLO_IN_GROUP: &str = "This is for private chat only! Use /newgame in groups.";
pub const GROUP_IN_PRIVATE: &str = "Use /newplay for solo games in private chat!";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    #[default]
    Plain,
    Markdown,
}

/// An inline choice. `data` comes back to the game as a callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    pub label: String,
    pub data: String,
}

impl Button {
    fn new(label: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            data: data.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outgoing {
    pub chat: ChatId,
    pub text: String,
    pub format: Format,
    pub buttons: Vec<Button>,
}

impl Outgoing {
    pub fn new(chat: ChatId, text: impl Into<String>) -> Self {
        Self {
            chat,
            text: text.into(),
            format: Format::Plain,
            buttons: Vec::new(),
        }
    }

    pub fn markdown(mut self) -> Self {
        self.format = Format::Markdown;
        self
    }

    pub fn buttons(mut self, buttons: Vec<Button>) -> Self {
        self.buttons = buttons;
        self
    }
}

pub fn welcome(name: &str) -> String {
    format!(
        "🌟 Welcome {name} to Anagram Challenge! 🌟\n\n\
         🧠 Test your word skills by unscrambling letters!\n\n\
         📌 Available Commands:\n\
         /help - How to play\n\
         /newgame - Start a new game in groups\n\
         /newplay - Play solo in private chat\n\
         /leaderboard - Top players of all time\n\
         /stats - Your personal statistics\n\n\
         🏆 Compete with friends and climb the leaderboard!"
    )
}

pub fn help() -> &'static str {
    "📖 How to Play Anagram Challenge:\n\n\
     1. Start a game with /newgame (in groups) or /newplay (in private)\n\
     2. You'll see scrambled letters of a word\n\
     3. Type the correct word to earn points\n\
     4. Faster answers earn more points!\n\n\
     💡 Tips:\n\
     - Use /hint to get help with the current word\n\
     - Use /stop to end a game early\n\
     - Check /leaderboard to see top players\n\
     - Your points accumulate across all games!"
}

pub fn choose_difficulty(chat: ChatId, solo: bool) -> Outgoing {
    let text = if solo {
        "Choose difficulty for your solo game:"
    } else {
        "Choose difficulty:"
    };

    let buttons = Difficulty::ALL
        .into_iter()
        .map(|difficulty| {
            let data = if solo {
                format!("{}_solo", difficulty.name())
            } else {
                difficulty.name().to_owned()
            };

            Button::new(difficulty.title(), data)
        })
        .collect();

    Outgoing::new(chat, text).buttons(buttons)
}

pub fn choose_rounds(chat: ChatId, difficulty: Difficulty, choices: &[u32]) -> Outgoing {
    let text = format!(
        "Difficulty: {}\n\nNow select the number of rounds:",
        difficulty.title()
    );

    let buttons = choices
        .iter()
        .map(|rounds| Button::new(format!("{rounds} Rounds"), rounds.to_string()))
        .collect();

    Outgoing::new(chat, text).buttons(buttons)
}

pub fn invalid_rounds(choices: &[u32]) -> String {
    let choices: Vec<String> = choices.iter().map(u32::to_string).collect();
    format!("Please pick one of {} rounds.", choices.join(", "))
}

pub fn round(session: &Session) -> Outgoing {
    let mut text = format!(
        "🔤 Round {}/{}\nUnscramble this word: {}\n\n",
        session.round_number(),
        session.max_rounds(),
        session.scrambled()
    );

    if session.is_solo() {
        text += "⏳ Faster answers earn more points!\n💡 Use /hint to get help";
    } else {
        text += "⏳ Fastest correct answer wins points!\n💡 Use /hint to get help";
    }

    Outgoing::new(session.chat(), text)
}

pub fn correct(
    session: &Session,
    name: &str,
    elapsed: Duration,
    points: u32,
    total: u32,
) -> Outgoing {
    let word = session.word();
    let time = elapsed.format_seconds();

    let text = if session.is_solo() {
        format!(
            "✅ Correct! ✅\n\
             🎯 Word: {word}\n\
             ⏱️ Time: {time} (+{points} points)\n\
             💰 Total this game: {total} points\n\n\
             Next word coming up..."
        )
    } else {
        format!(
            "🏆 {name} got it!\n\
             ✅ Word: {word}\n\
             ⏱️ Time: {time} (+{points} points)\n\n\
             Next round starting soon..."
        )
    };

    Outgoing::new(session.chat(), text)
}

pub fn definition(chat: ChatId, word: &Word, definition: &str) -> Outgoing {
    Outgoing::new(chat, format!("📖 Definition of {word}: {definition}"))
}

pub fn hint(hint: &Hint, scrambled: &str) -> String {
    format!(
        "💡 Hint ({}/{}):\nThe word starts with: {}\n\nOriginal scrambled: {scrambled}",
        hint.revealed(),
        hint.total(),
        hint.masked()
    )
}

pub fn solo_summary(chat: ChatId, name: &str, score: u32) -> Outgoing {
    let text = format!(
        "🎉 Game Over! 🎉\n\n\
         👤 Player: {name}\n\
         🏆 Total Score: {score} points\n\n\
         Check /stats to see your updated total points!"
    );

    Outgoing::new(chat, text)
}

/// Final scores for a group game. Names are paired with points or solve counts, in display order.
pub fn group_summary(
    session: &Session,
    standings: &[(String, u32)],
    solved: &[(String, usize)],
) -> Outgoing {
    let mut text = "🏆 *Final Scores* 🏆\n\n".to_owned();

    for (rank, (name, points)) in standings.iter().enumerate() {
        let _ = writeln!(text, "{}. {name}: {points} points", rank + 1);
    }

    text += "\n🔹 *Game Statistics:*\n";

    for (name, count) in solved {
        let _ = writeln!(text, "🔸 {name} solved {count} words");
    }

    if let Some(longest) = session.longest_word() {
        let _ = write!(
            text,
            "\n📏 Longest word: {longest} ({} letters)",
            longest.len()
        );
    }

    let _ = write!(
        text,
        "\n⏲️ Played for {}",
        session.duration().format_largest()
    );

    Outgoing::new(session.chat(), text).markdown()
}

pub fn stats(total: u64, games_played: u32, current: u32) -> String {
    format!(
        "📊 Your Statistics 📊\n\n\
         🏆 Total Points: {total}\n\
         🎮 Games Played: {games_played}\n\
         🔥 Current Game Points: {current}\n\n\
         Keep playing to climb the leaderboard! 🚀"
    )
}

/// `own` is the asking user's 1-based position and points, when they are off the board.
pub fn leaderboard(top: &[Record], own: Option<(usize, u64)>) -> String {
    let mut text = "🏆 All-Time Leaderboard 🏆\n\n".to_owned();

    for (rank, record) in top.iter().enumerate() {
        let _ = writeln!(text, "{}. {}: {} points", rank + 1, record.name, record.points);
    }

    if let Some((position, points)) = own {
        let _ = write!(text, "\nYour position: {position} with {points} points");
    }

    text
}
