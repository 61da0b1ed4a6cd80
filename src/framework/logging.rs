use tracing_subscriber::{
    prelude::__tracing_subscriber_SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

use tracing::{instrument, trace};

/// `RUST_LOG` wins over the configured filter when set.
#[instrument]
pub fn init_tracing(filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(filter))
        .unwrap_or_else(|err| {
            eprintln!("invalid log filter `{filter}` ({err}), using the default");
            EnvFilter::new("anagram_bot=info")
        });

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(filter)
        .init();

    trace!("finished");
}
