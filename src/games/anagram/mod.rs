//! Multiplayer anagram game: unscramble the word, fastest answer scores most.

pub mod cache;
pub mod core;
pub mod event;
pub mod game;
pub mod hints;
pub mod message;
pub mod round;
pub mod score;
pub mod services;
pub mod session;
pub mod words_list;


pub use self::core::{Difficulty, Word};
pub use event::{Context, Event, Response, Transition};
pub use game::Game;
pub use services::{DefinitionSupplier, MessageEmitter, UserDirectory, WordSupplier};
pub use words_list::WordsList;
