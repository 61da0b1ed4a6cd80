use super::{core::Difficulty, message::Outgoing};
use crate::utils::{ChatId, ChatKind, UserId};

/// Who did something, and where.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Context {
    pub chat: ChatId,
    pub kind: ChatKind,
    pub user: UserId,
}

impl Context {
    pub const fn new(chat: ChatId, kind: ChatKind, user: UserId) -> Self {
        Self { chat, kind, user }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Start,
    Help,
    NewGame,
    NewPlay,
    Difficulty { difficulty: Difficulty, solo: bool },
    Rounds(u32),
    Hint,
    Stats,
    Leaderboard,
    Stop,
    Text(String),
}

impl Event {
    /// Parses the data attached to a [`Button`](super::message::Button).
    pub fn from_callback(data: &str) -> Option<Self> {
        if let Ok(rounds) = data.parse() {
            return Some(Self::Rounds(rounds));
        }

        let (name, solo) = match data.strip_suffix("_solo") {
            Some(name) => (name, true),
            None => (data, false),
        };

        name.parse()
            .ok()
            .map(|difficulty| Self::Difficulty { difficulty, solo })
    }

    /// Parses a `/command`, also accepting any button's data as a command.
    pub fn from_command(command: &str) -> Option<Self> {
        let command = command.strip_prefix('/').unwrap_or(command);
        let command = command.split_whitespace().next().unwrap_or_default();

        let event = match command {
            "start" => Self::Start,
            "help" => Self::Help,
            "newgame" => Self::NewGame,
            "newplay" => Self::NewPlay,
            "hint" => Self::Hint,
            "stats" => Self::Stats,
            "leaderboard" => Self::Leaderboard,
            "stop" => Self::Stop,
            other => return Self::from_callback(other),
        };

        Some(event)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Help => "help",
            Self::NewGame => "newgame",
            Self::NewPlay => "newplay",
            Self::Difficulty { .. } => "difficulty",
            Self::Rounds(_) => "rounds",
            Self::Hint => "hint",
            Self::Stats => "stats",
            Self::Leaderboard => "leaderboard",
            Self::Stop => "stop",
            Self::Text(_) => "text",
        }
    }
}

/// What a handler changed about the game in its chat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    DifficultySelected { difficulty: Difficulty, solo: bool },
    GameStarted { rounds: u32 },
    RoundAdvanced { round: u32 },
    GameEnded,
}

/// Messages to send, in order, and what happened.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Response {
    pub messages: Vec<Outgoing>,
    pub transition: Option<Transition>,
}

impl Response {
    /// Nothing to say. A valid outcome, e.g. for chatter that isn't an answer.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn reply(chat: ChatId, text: impl Into<String>) -> Self {
        Self::message(Outgoing::new(chat, text))
    }

    pub fn message(message: Outgoing) -> Self {
        Self {
            messages: vec![message],
            transition: None,
        }
    }

    pub fn with(mut self, transition: Transition) -> Self {
        self.transition = Some(transition);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty() && self.transition.is_none()
    }
}
