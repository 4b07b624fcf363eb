use tracing_subscriber::EnvFilter;

/// Install the stderr subscriber.
///
/// Precedence: `--log-level`, then `RUST_LOG`, then the configured default.
/// Stdout is left to command output.
pub fn init(explicit: Option<&str>, default_filter: &str) {
    let filter = explicit
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .or_else(|| EnvFilter::try_from_default_env().ok())
        .or_else(|| EnvFilter::try_new(default_filter).ok())
        .unwrap_or_else(|| EnvFilter::new("warn"));

    // A subscriber may already be installed (tests); keep it.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
