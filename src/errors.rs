use thiserror::Error as ThisError;
use tracing::{error, warn, Level};

/// Anything that can go wrong inside the game that players shouldn't have to hear about.
#[derive(Debug, ThisError)]
pub enum Error {
    #[error("error from stats store: {0}")]
    Stats(#[from] crate::stats::Error),

    #[error("error sending message: {0}")]
    Send(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
    pub fn send(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Send(Box::new(err))
    }

    pub fn level(&self) -> Level {
        match self {
            Self::Stats(_) => Level::ERROR,
            Self::Send(_) => Level::WARN,
        }
    }

    /// Logs this error at its own level.
    pub fn trace(&self) {
        if self.level() == Level::ERROR {
            error!(err = %self, "game error");
        } else {
            warn!(err = %self, "game error");
        }
    }
}
