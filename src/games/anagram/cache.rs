use std::{collections::HashMap, sync::Arc};

use tokio::sync::{Mutex, RwLock};
use tracing::info;

use super::session::Session;
use crate::utils::ChatId;

pub type SessionHandle = Arc<Mutex<Session>>;

/// Active games, one per chat.
///
/// Locking a handle is what serialises play within a chat. Code holding a session
/// lock may take this map's lock, never the other way round.
#[derive(Clone, Debug, Default)]
pub struct Sessions(Arc<RwLock<HashMap<ChatId, SessionHandle>>>);

impl Sessions {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, chat: ChatId) -> Option<SessionHandle> {
        let guard = self.0.read().await;
        guard.get(&chat).cloned()
    }

    /// Registers a new game for `chat`, replacing any game already running there.
    pub async fn create(&self, chat: ChatId, session: Session) -> SessionHandle {
        let handle = Arc::new(Mutex::new(session));

        let replaced = {
            let mut guard = self.0.write().await;
            guard.insert(chat, handle.clone())
        };

        if let Some(old) = replaced {
            old.lock().await.finish();
            info!(%chat, "replaced a game that was still running");
        }

        handle
    }

    pub async fn delete(&self, chat: ChatId) -> Option<SessionHandle> {
        let mut guard = self.0.write().await;
        guard.remove(&chat)
    }

    /// Whether `handle` is the game registered for `chat`.
    pub async fn is_current(&self, chat: ChatId, handle: &SessionHandle) -> bool {
        let guard = self.0.read().await;
        guard
            .get(&chat)
            .is_some_and(|current| Arc::ptr_eq(current, handle))
    }

    /// Removes `handle` if it is still the game registered for `chat`, returning whether it was.
    pub async fn remove(&self, chat: ChatId, handle: &SessionHandle) -> bool {
        let mut guard = self.0.write().await;

        let current = guard
            .get(&chat)
            .is_some_and(|current| Arc::ptr_eq(current, handle));

        if current {
            guard.remove(&chat);
        }

        current
    }

    pub async fn all(&self) -> Vec<SessionHandle> {
        let guard = self.0.read().await;
        guard.values().cloned().collect()
    }
}
