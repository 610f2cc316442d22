use crate::types::LogLevel;

/// Install the stderr log subscriber. Call once, before any command runs.
pub fn init(level: LogLevel) {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_max_level(tracing::Level::from(level))
        .compact()
        .init();
}
