use tracing_subscriber::EnvFilter;

/// Filter directive for the given `-v` count.
///
/// A configured level only applies when no `-v` flag was passed.
fn default_directive(verbosity: u8, configured: Option<&str>) -> &str {
    match (verbosity, configured) {
        (0, Some(level)) if !level.trim().is_empty() => level,
        (0, _) => "warn",
        (1, _) => "info",
        (2, _) => "debug",
        _ => "trace",
    }
}

/// Install the stderr subscriber. `RUST_LOG` wins over everything else.
pub fn init(verbosity: u8, configured: Option<&str>) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity, configured)));

    // A second init (tests) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
