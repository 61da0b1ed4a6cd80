pub mod config;
pub use config::Config;

pub mod console;
pub mod db;
pub mod logging;
