use std::{collections::HashMap, sync::Arc};

use tokio::sync::RwLock;
use tracing::{debug, info, instrument, warn, Instrument};

use super::{
    cache::{SessionHandle, Sessions},
    core::{Difficulty, Word},
    event::{Context, Event, Response, Transition},
    hints::HintTracker,
    message::{self, Outgoing},
    round::RoundManager,
    score::score,
    services::{DefinitionSupplier, MessageEmitter, UserDirectory, WordSupplier},
    session::Session,
};
use crate::{
    errors::Error,
    framework::config::GameConfig,
    stats::{self, Stats},
    utils::{ChatId, UserId},
};

type Result<T, E = Error> = std::result::Result<T, E>;

/// A difficulty picked by someone who hasn't chosen a round count yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Setup {
    difficulty: Difficulty,
    solo: bool,
}

/// Runs anagram games in any number of chats.
///
/// Per chat: `Idle → DifficultySelected → RoundsSelected → InProgress → Ended`.
/// Answers are checked and rounds advanced while holding that chat's session lock,
/// so each round is won exactly once.
pub struct Game<W, D, U, E, B = stats::HashMap> {
    config: GameConfig,
    rounds: RoundManager<W>,
    definitions: Arc<D>,
    users: U,
    emitter: Arc<E>,
    stats: Stats<B>,
    sessions: Sessions,
    hints: HintTracker,
    pending: RwLock<HashMap<(ChatId, UserId), Setup>>,
}

impl<W, D, U, E, B> Game<W, D, U, E, B>
where
    W: WordSupplier,
    D: DefinitionSupplier,
    U: UserDirectory,
    E: MessageEmitter,
    B: stats::Backend,
{
    pub fn new(
        config: GameConfig,
        words: W,
        definitions: D,
        users: U,
        emitter: E,
        stats: Stats<B>,
    ) -> Self {
        Self {
            config,
            rounds: RoundManager::new(words),
            definitions: Arc::new(definitions),
            users,
            emitter: Arc::new(emitter),
            stats,
            sessions: Sessions::new(),
            hints: HintTracker::new(),
            pending: RwLock::default(),
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn emitter(&self) -> &E {
        &self.emitter
    }

    pub fn stats(&self) -> &Stats<B> {
        &self.stats
    }

    pub fn sessions(&self) -> &Sessions {
        &self.sessions
    }

    /// Runs the handler for `event`. Internal errors are logged and answered with an apology.
    #[instrument(skip_all, fields(chat = %ctx.chat, user = %ctx.user, event = event.name()))]
    pub async fn handle(&self, ctx: Context, event: Event) -> Response {
        let result = match event {
            Event::Start => Ok(self.handle_welcome(ctx).await),
            Event::Help => Ok(self.handle_help(ctx)),
            Event::NewGame => Ok(self.handle_new_game(ctx, false)),
            Event::NewPlay => Ok(self.handle_new_game(ctx, true)),
            Event::Difficulty { difficulty, solo } => {
                Ok(self.handle_difficulty_choice(ctx, difficulty, solo).await)
            }
            Event::Rounds(rounds) => Ok(self.handle_rounds_choice(ctx, rounds).await),
            Event::Hint => Ok(self.handle_hint_request(ctx).await),
            Event::Stats => self.handle_stats_query(ctx).await,
            Event::Leaderboard => self.handle_leaderboard_query(ctx).await,
            Event::Stop => self.handle_stop(ctx).await,
            Event::Text(text) => self.handle_text_submission(ctx, &text).await,
        };

        result.unwrap_or_else(|err| {
            err.trace();
            Response::reply(ctx.chat, message::APOLOGY)
        })
    }

    pub async fn handle_welcome(&self, ctx: Context) -> Response {
        let name = self.users.display_name(ctx.user).await;
        Response::reply(ctx.chat, message::welcome(&name))
    }

    pub fn handle_help(&self, ctx: Context) -> Response {
        Response::reply(ctx.chat, message::help())
    }

    /// Offers the difficulty choices. Solo games are for private chats, the rest for groups.
    pub fn handle_new_game(&self, ctx: Context, solo: bool) -> Response {
        match (solo, ctx.kind.is_private()) {
            (true, false) => Response::reply(ctx.chat, message::SOLO_IN_GROUP),
            (false, true) => Response::reply(ctx.chat, message::GROUP_IN_PRIVATE),
            _ => Response::message(message::choose_difficulty(ctx.chat, solo)),
        }
    }

    #[instrument(skip_all, fields(chat = %ctx.chat, user = %ctx.user, difficulty = %difficulty, solo = solo))]
    pub async fn handle_difficulty_choice(
        &self,
        ctx: Context,
        difficulty: Difficulty,
        solo: bool,
    ) -> Response {
        match (solo, ctx.kind.is_private()) {
            (true, false) => return Response::reply(ctx.chat, message::SOLO_IN_GROUP),
            (false, true) => return Response::reply(ctx.chat, message::GROUP_IN_PRIVATE),
            _ => (),
        }

        self.pending
            .write()
            .await
            .insert((ctx.chat, ctx.user), Setup { difficulty, solo });

        debug!("difficulty selected");

        Response::message(message::choose_rounds(
            ctx.chat,
            difficulty,
            &self.config.round_choices,
        ))
        .with(Transition::DifficultySelected { difficulty, solo })
    }

    /// Starts a game with the difficulty `ctx.user` picked earlier in this chat.
    #[instrument(skip_all, fields(chat = %ctx.chat, user = %ctx.user, rounds = rounds))]
    pub async fn handle_rounds_choice(&self, ctx: Context, rounds: u32) -> Response {
        if !self.config.round_choices.contains(&rounds) {
            return Response::reply(ctx.chat, message::invalid_rounds(&self.config.round_choices));
        }

        let setup = {
            let mut pending = self.pending.write().await;
            let setup = pending.remove(&(ctx.chat, ctx.user));

            // a started game consumes every pending choice in its chat
            if setup.is_some() {
                pending.retain(|&(chat, _), _| chat != ctx.chat);
            }

            setup
        };

        let Some(Setup { difficulty, solo }) = setup else {
            return Response::reply(ctx.chat, message::NO_DIFFICULTY);
        };

        let first = self.rounds.start(ctx.chat, difficulty, &self.hints).await;
        let solo = solo.then_some(ctx.user);
        let session = Session::new(ctx.chat, difficulty, rounds, solo, first);
        let announcement = message::round(&session);

        self.sessions.create(ctx.chat, session).await;
        info!(%difficulty, solo = solo.is_some(), "game started");

        Response::message(announcement).with(Transition::GameStarted { rounds })
    }

    /// Checks a chat message against the current word. Anything but the answer is ignored.
    #[instrument(skip_all, fields(chat = %ctx.chat, user = %ctx.user))]
    pub async fn handle_text_submission(&self, ctx: Context, text: &str) -> Result<Response> {
        let Some(handle) = self.sessions.get(ctx.chat).await else {
            return Ok(Response::none());
        };

        let mut session = handle.lock().await;

        if !session.accepts(ctx.user, text) {
            return Ok(Response::none());
        }

        let elapsed = session.elapsed();
        let points = score(elapsed);
        let total = session.award(ctx.user, points);
        session.record_solver(ctx.user);

        info!(word = %session.word(), points, ?elapsed, "round solved");

        let name = self.users.display_name(ctx.user).await;
        let mut response = Response::message(message::correct(
            &session, &name, elapsed, points, total,
        ));

        self.send_definition_later(ctx.chat, session.word().clone());

        if session.advance() {
            let summary = self.end(&handle, &mut session).await?;
            response.messages.extend(summary);
            return Ok(response.with(Transition::GameEnded));
        }

        // replaced while we waited for the lock; the new game owns this chat now
        if !self.sessions.is_current(ctx.chat, &handle).await {
            debug!("game was replaced, not starting another round");
            return Ok(response);
        }

        self.rounds.start_round(&mut session, &self.hints).await;
        response.messages.push(message::round(&session));

        Ok(response.with(Transition::RoundAdvanced {
            round: session.round_number(),
        }))
    }

    #[instrument(skip_all, fields(chat = %ctx.chat, user = %ctx.user))]
    pub async fn handle_hint_request(&self, ctx: Context) -> Response {
        let Some(handle) = self.sessions.get(ctx.chat).await else {
            return Response::reply(ctx.chat, message::NO_ACTIVE_GAME);
        };

        let session = handle.lock().await;

        if session.is_finished() {
            return Response::reply(ctx.chat, message::NO_ACTIVE_GAME);
        }

        let hint = self
            .hints
            .next_hint(ctx.chat, ctx.user, session.word())
            .await;

        Response::reply(ctx.chat, message::hint(&hint, session.scrambled()))
    }

    /// Ends the game in this chat early, keeping the points scored so far.
    #[instrument(skip_all, fields(chat = %ctx.chat, user = %ctx.user))]
    pub async fn handle_stop(&self, ctx: Context) -> Result<Response> {
        let Some(handle) = self.sessions.get(ctx.chat).await else {
            return Ok(Response::reply(ctx.chat, message::NO_ACTIVE_GAME));
        };

        let mut session = handle.lock().await;

        if session.is_finished() {
            return Ok(Response::reply(ctx.chat, message::NO_ACTIVE_GAME));
        }

        let summary = self.end(&handle, &mut session).await?;

        Ok(Response {
            messages: summary,
            transition: Some(Transition::GameEnded),
        })
    }

    #[instrument(skip_all, fields(user = %ctx.user))]
    pub async fn handle_stats_query(&self, ctx: Context) -> Result<Response> {
        let record = self.stats.get(ctx.user).await?;
        let (total, games_played) = record.map_or((0, 0), |r| (r.points, r.games_played));

        let mut current = 0;
        for handle in self.sessions.all().await {
            current += handle.lock().await.points(ctx.user);
        }

        let text = message::stats(total + u64::from(current), games_played, current);
        Ok(Response::reply(ctx.chat, text))
    }

    #[instrument(skip_all, fields(user = %ctx.user))]
    pub async fn handle_leaderboard_query(&self, ctx: Context) -> Result<Response> {
        let records = self.stats.leaderboard().await?;

        if records.is_empty() {
            return Ok(Response::reply(ctx.chat, message::NO_LEADERBOARD));
        }

        let size = self.config.leaderboard_size;
        let own = records
            .iter()
            .position(|record| record.user == ctx.user)
            .filter(|&index| index >= size)
            .map(|index| (index + 1, records[index].points));

        let top = &records[..size.min(records.len())];

        Ok(Response::reply(ctx.chat, message::leaderboard(top, own)))
    }

    /// Tears the game down, saves everyone's points and builds the summary.
    ///
    /// The session is finished and unregistered before stats are written, so a
    /// failed write can't leave a game that awards points twice.
    async fn end(&self, handle: &SessionHandle, session: &mut Session) -> Result<Vec<Outgoing>> {
        let chat = session.chat();

        session.finish();
        if self.sessions.remove(chat, handle).await {
            self.hints.reset(chat).await;
        }

        let standings = session.standings();
        info!(%chat, players = standings.len(), "game ended");

        if standings.is_empty() {
            return Ok(vec![Outgoing::new(chat, message::NO_WINNERS)]);
        }

        let mut named = Vec::with_capacity(standings.len());
        let mut failed = None;

        for &(user, points) in &standings {
            let name = self.users.display_name(user).await;

            if let Err(err) = self.stats.record_game(user, points, name.clone()).await {
                warn!(%user, points, %err, "failed to save stats");
                failed.get_or_insert(err);
            }

            named.push((user, name, points));
        }

        if let Some(err) = failed {
            return Err(err.into());
        }

        let summary = if let Some(player) = session.solo_player() {
            let (name, score) = named
                .iter()
                .find(|(user, ..)| *user == player)
                .map(|(_, name, points)| (name.as_str(), *points))
                .unwrap_or(("", 0));

            message::solo_summary(chat, name, score)
        } else {
            let name_of = |user: UserId| {
                named
                    .iter()
                    .find(|(id, ..)| *id == user)
                    .map(|(_, name, _)| name.clone())
                    .unwrap_or_default()
            };

            let standings: Vec<(String, u32)> = named
                .iter()
                .map(|(_, name, points)| (name.clone(), *points))
                .collect();

            let solved: Vec<(String, usize)> = session
                .solved_counts()
                .into_iter()
                .map(|(user, count)| (name_of(user), count))
                .collect();

            message::group_summary(session, &standings, &solved)
        };

        Ok(vec![summary])
    }

    /// Sends the word's definition after a short delay, without holding anything up.
    fn send_definition_later(&self, chat: ChatId, word: Word) {
        let definitions = Arc::clone(&self.definitions);
        let emitter = Arc::clone(&self.emitter);
        let delay = self.config.definition_delay();

        let task = async move {
            tokio::time::sleep(delay).await;

            let definition = definitions.fetch(&word).await;

            if let Err(err) = emitter
                .send(message::definition(chat, &word, &definition))
                .await
            {
                warn!(%err, %word, "failed to send definition");
            }
        };

        tokio::spawn(task.in_current_span());
    }
}

impl<W, D, U, E, B> std::fmt::Debug for Game<W, D, U, E, B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Game")
            .field("config", &self.config)
            .field("sessions", &self.sessions)
            .finish_non_exhaustive()
    }
}
