use std::path::PathBuf;

#[derive(clap::Parser, Debug)]
#[command(version, about = "Unscramble words against the clock")]
pub struct Cli {
    /// Config file. Defaults to `$ANAGRAM_TOML`, then `./anagram.toml`.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Play a group game instead of a solo one.
    #[arg(long)]
    pub group: bool,

    /// Your display name.
    #[arg(long, default_value = "player")]
    pub name: String,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(clap::Subcommand, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Print the loaded config and exit.
    Config,

    #[default]
    Play,
}

impl Cli {
    pub fn command(&self) -> Command {
        self.command.unwrap_or_default()
    }
}
