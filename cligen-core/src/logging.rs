use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter (`RUST_LOG` syntax).
pub const LOG_ENV: &str = "CLIGEN_LOG";

/// Initialise the global `tracing` subscriber with a `fmt` layer on stderr.
///
/// The filter comes from `CLIGEN_LOG`, then `RUST_LOG`, and falls back to
/// `info`. Calling this more than once is harmless: only the first call
/// installs a subscriber.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("info"))
}
