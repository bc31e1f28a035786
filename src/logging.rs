// File: ./src/logging.rs
use log::LevelFilter;
use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode};

/// Parse a level name ("warn", "DEBUG", ...). Unknown names fall back to info.
pub fn parse_level(name: &str) -> LevelFilter {
    name.trim().parse().unwrap_or(LevelFilter::Info)
}

/// Install the terminal logger on stderr. Records from the HTTP stack are
/// dropped.
pub fn init(level_name: &str) {
    let level = parse_level(level_name);
    let config = ConfigBuilder::new()
        .add_filter_ignore_str("hyper")
        .add_filter_ignore_str("reqwest")
        .add_filter_ignore_str("rustls")
        .set_time_format_rfc3339()
        .build();

    if TermLogger::init(level, config, TerminalMode::Stderr, ColorChoice::Auto).is_err() {
        // A logger is already installed (tests, embedding).
        log::debug!("Logger already initialized");
    }
}
