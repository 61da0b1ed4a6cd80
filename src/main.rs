#![warn(clippy::perf)]
#![warn(clippy::unwrap_used)]

use std::collections::HashMap;

use anagram_bot::{
    framework::{
        self,
        config::GameConfig,
        console::{self, Console},
        Config,
    },
    games::anagram::{Context, Event, Game, MessageEmitter, WordsList},
    stats::{self, Stats},
    utils::{ChatId, ChatKind, UserId},
};
use anyhow::Context as _;
use clap::Parser;
use tracing::{info, warn};
use tracing_unwrap::ResultExt;

mod cli;
use cli::{Cli, Command};

/// The terminal is a single chat with a single player.
const CHAT: ChatId = ChatId::new(1);
const PLAYER: UserId = UserId::new(1);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let path = Config::path(cli.config.as_deref());
    let config = Config::load(&path)
        .with_context(|| format!("failed to load config from {}", path.display()))?;

    framework::logging::init_tracing(config.logs.filter());
    info!(path = %path.display(), "loaded config");

    if cli.command() == Command::Config {
        println!("{config:#?}");
        return Ok(());
    }

    if let Some(flavor_text) = config.logs.flavor_text() {
        info!("{flavor_text}");
    }

    let words = match &config.words.path {
        Some(path) => WordsList::load(path).expect_or_log("word list should be readable"),
        None => {
            warn!("no word list configured, every word will be made up");
            WordsList::empty()
        }
    };

    match &config.db {
        Some(db) => {
            let db = framework::db::database(db)
                .await
                .expect_or_log("database url should be valid");

            let stats = Stats::mongodb(&db)
                .await
                .expect_or_log("stats collection should be reachable");

            play(&cli, config.game, words, stats).await
        }
        None => play(&cli, config.game, words, Stats::new()).await,
    }
}

async fn play<B: stats::Backend>(
    cli: &Cli,
    config: GameConfig,
    words: WordsList,
    stats: Stats<B>,
) -> anyhow::Result<()> {
    let kind = if cli.group {
        ChatKind::Group
    } else {
        ChatKind::Private
    };

    let users = HashMap::from([(PLAYER, cli.name.clone())]);
    let game = Game::new(config, words.clone(), words, users, Console, stats);
    let ctx = Context::new(CHAT, kind, PLAYER);

    for message in game.handle(ctx, Event::Start).await.messages {
        game.emitter().send(message).await?;
    }

    console::run(&game, ctx).await?;

    Ok(())
}
