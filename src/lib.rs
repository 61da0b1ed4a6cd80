#![warn(clippy::perf)]
#![warn(clippy::unwrap_used)]

pub mod errors;
pub mod framework;
pub mod games;
pub mod stats;
pub mod utils;

pub use errors::Error;
pub use framework::Config;
