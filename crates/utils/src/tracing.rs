use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

type InitError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Pick the filter directive: an explicit level, then `RUST_LOG`, then the default
pub(crate) fn build_filter(level: Option<&str>, default_level: &str) -> Result<EnvFilter, InitError> {
    let filter = match level {
        Some(level) => EnvFilter::try_new(level)?,
        None => EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(default_level))?,
    };
    Ok(filter)
}

/// Initialize the tracing system
///
/// Diagnostics go to stderr so stdout stays free for command output.
pub fn init(level: Option<&str>, default_level: &str) -> Result<(), InitError> {
    let filter = build_filter(level, default_level)?;

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(is_tty())
        .compact()
        .with_target(false)
        .with_thread_ids(false)
        .with_level(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}

/// Check if we're running in a TTY environment
fn is_tty() -> bool {
    std::io::IsTerminal::is_terminal(&std::io::stderr())
}
