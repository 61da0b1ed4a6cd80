//! Plays the game in a terminal: one chat, one player, stdin in and stdout out.

use std::io;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, info};

use crate::{
    errors::Error,
    games::anagram::{
        message::{Format, Outgoing},
        services::{DefinitionSupplier, MessageEmitter, UserDirectory, WordSupplier},
        Context, Event, Game,
    },
    stats,
};

pub const UNKNOWN_COMMAND: &str = "Unknown command. Try /help";

#[derive(Debug, Clone, Copy, Default)]
pub struct Console;

impl MessageEmitter for Console {
    type Error = io::Error;

    async fn send(&self, message: Outgoing) -> io::Result<()> {
        let mut stdout = tokio::io::stdout();
        stdout.write_all(render(&message).as_bytes()).await?;
        stdout.flush().await
    }
}

/// Text as a player would see it, with buttons listed as the commands that press them.
pub fn render(message: &Outgoing) -> String {
    let mut rendered = match message.format {
        Format::Plain => message.text.clone(),
        Format::Markdown => message.text.replace('*', ""),
    };

    for button in &message.buttons {
        rendered += &format!("\n  [{}] /{}", button.label, button.data);
    }

    rendered + "\n\n"
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    Event(Event),
    Unknown,
    Blank,
}

pub fn parse(line: &str) -> Line {
    let line = line.trim();

    if line.is_empty() {
        Line::Blank
    } else if line.starts_with('/') {
        Event::from_command(line).map_or(Line::Unknown, Line::Event)
    } else {
        Line::Event(Event::Text(line.to_owned()))
    }
}

/// Feeds stdin to `game` as `ctx` until end of input.
pub async fn run<W, D, U, B>(game: &Game<W, D, U, Console, B>, ctx: Context) -> io::Result<()>
where
    W: WordSupplier,
    D: DefinitionSupplier,
    U: UserDirectory,
    B: stats::Backend,
{
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    info!(chat = %ctx.chat, user = %ctx.user, "console ready");

    while let Some(line) = lines.next_line().await? {
        let event = match parse(&line) {
            Line::Event(event) => event,
            Line::Unknown => {
                game.emitter()
                    .send(Outgoing::new(ctx.chat, UNKNOWN_COMMAND))
                    .await?;
                continue;
            }
            Line::Blank => continue,
        };

        let response = game.handle(ctx, event).await;
        debug!(transition = ?response.transition, messages = response.messages.len());

        for message in response.messages {
            if let Err(err) = game.emitter().send(message).await {
                Error::send(err).trace();
            }
        }
    }

    info!("end of input");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{parse, render, Line};
    use crate::{
        games::anagram::{
            core::Difficulty,
            message::{self, Outgoing},
            Event,
        },
        utils::ChatId,
    };
    use pretty_assertions::assert_eq;

    #[test]
    fn lines() {
        assert_eq!(parse("  "), Line::Blank);
        assert_eq!(parse("/hint"), Line::Event(Event::Hint));
        assert_eq!(
            parse("/hard_solo"),
            Line::Event(Event::Difficulty {
                difficulty: Difficulty::Hard,
                solo: true
            })
        );
        assert_eq!(parse("/fly"), Line::Unknown);
        assert_eq!(parse(" Puzzle "), Line::Event(Event::Text("Puzzle".to_owned())));
    }

    #[test]
    fn buttons_become_commands() {
        let rendered = render(&message::choose_difficulty(ChatId::new(1), true));

        assert!(rendered.contains("[Easy] /easy_solo"));
        assert!(rendered.contains("[Hard] /hard_solo"));
    }

    #[test]
    fn markdown_is_stripped() {
        let rendered = render(&Outgoing::new(ChatId::new(1), "*bold*").markdown());
        assert_eq!(rendered, "bold\n\n");
    }
}
