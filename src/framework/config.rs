use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use rand::seq::IteratorRandom;
use serde::Deserialize;
use tracing::warn;

pub type Error = ::config::ConfigError;

const DEFAULT_PATH: &str = "./anagram.toml";

#[derive(Deserialize, Debug, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub game: GameConfig,
    #[serde(default)]
    pub words: WordsConfig,
    #[serde(default)]
    pub db: Option<DbConfig>,
    #[serde(default)]
    pub logs: LogsConfig,
}

impl Config {
    /// `explicit`, else `ANAGRAM_TOML`, else `./anagram.toml`.
    pub fn path(explicit: Option<&Path>) -> PathBuf {
        if let Some(path) = explicit {
            path.to_path_buf()
        } else if let Ok(path) = std::env::var("ANAGRAM_TOML") {
            PathBuf::from(path)
        } else {
            PathBuf::from(DEFAULT_PATH)
        }
    }

    /// Reads the TOML file at `path`, then `ANAGRAM__*` environment overrides.
    ///
    /// A missing file is fine; every setting has a default.
    pub fn load(path: &Path) -> Result<Self, Error> {
        ::config::Config::builder()
            .add_source(
                ::config::File::new(&path.to_string_lossy(), ::config::FileFormat::Toml)
                    .required(false),
            )
            .add_source(::config::Environment::with_prefix("ANAGRAM").separator("__"))
            .build()?
            .try_deserialize()
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct GameConfig {
    #[serde(default = "GameConfig::default_round_choices")]
    pub round_choices: Vec<u32>,
    #[serde(default = "GameConfig::default_leaderboard_size")]
    pub leaderboard_size: usize,
    #[serde(default = "GameConfig::default_definition_delay_ms")]
    pub definition_delay_ms: u64,
}

impl GameConfig {
    fn default_round_choices() -> Vec<u32> {
        vec![10, 30, 50]
    }

    const fn default_leaderboard_size() -> usize {
        10
    }

    const fn default_definition_delay_ms() -> u64 {
        500
    }

    pub fn definition_delay(&self) -> Duration {
        Duration::from_millis(self.definition_delay_ms)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            round_choices: Self::default_round_choices(),
            leaderboard_size: Self::default_leaderboard_size(),
            definition_delay_ms: Self::default_definition_delay_ms(),
        }
    }
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct WordsConfig {
    pub path: Option<PathBuf>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct DbConfig {
    url: String,
    #[serde(default = "DbConfig::default_database")]
    database: String,
}

impl DbConfig {
    fn default_database() -> String {
        "anagram".to_owned()
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn database(&self) -> &str {
        &self.database
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct LogsConfig {
    #[serde(default = "LogsConfig::default_filter")]
    filter: String,
    #[serde(default)]
    flavor_texts: Vec<String>,
}

impl LogsConfig {
    fn default_filter() -> String {
        "anagram_bot=info".to_owned()
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    pub fn flavor_text(&self) -> Option<&str> {
        let flavor_text = self
            .flavor_texts
            .iter()
            .choose(&mut rand::thread_rng())
            .map(|s| s.as_str());

        if flavor_text.is_none() {
            warn!("no flavor texts provided in config :(");
        }

        flavor_text
    }
}

impl Default for LogsConfig {
    fn default() -> Self {
        Self {
            filter: Self::default_filter(),
            flavor_texts: Vec::new(),
        }
    }
}
