use std::io;

use tracing::Level;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

/// Installs the global subscriber. `tilt*` targets log at `level`, everything
/// else at WARN. Output goes to stderr so stdout stays free for command
/// results.
pub fn setup_tracing(level: LevelFilter) {
    let filter_layer = tracing_subscriber::filter::filter_fn(move |metadata| {
        is_enabled(level, metadata.target(), *metadata.level())
    });
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .with_writer(io::stderr);

    tracing_subscriber::registry()
        .with(fmt_layer.with_filter(filter_layer))
        .init();
}

pub fn parse_level(text: &str) -> Result<LevelFilter, String> {
    text.parse::<LevelFilter>()
        .map_err(|err| format!("invalid log level '{text}': {err}"))
}

fn is_enabled(level: LevelFilter, target: &str, event_level: Level) -> bool {
    let effective_level = if target.starts_with("tilt") {
        match level.into_level() {
            Some(level) => level,
            None => return false,
        }
    } else {
        Level::WARN
    };
    event_level <= effective_level
}
