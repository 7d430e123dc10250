//! Log level selection and the startup preamble.
//!
//! Verbosity uses the numeric levels 1, 10, 20, 30 and 40 (trace, debug,
//! info, warning, error).

use log::LevelFilter;

/// Environment variable holding the numeric verbosity level.
pub const VERBOSE_ENV: &str = "ZONE_OVERLAY_VERBOSE";

/// Level used when no verbosity is given.
pub const DEFAULT_LEVEL: LevelFilter = LevelFilter::Info;

/// Maps a numeric verbosity level to a log filter.
pub fn level_filter(verbosity: u32) -> Option<LevelFilter> {
    match verbosity {
        1 => Some(LevelFilter::Trace),
        10 => Some(LevelFilter::Debug),
        20 => Some(LevelFilter::Info),
        30 => Some(LevelFilter::Warn),
        40 => Some(LevelFilter::Error),
        _ => None,
    }
}

/// Parses a verbosity setting such as `"10"`.
pub fn parse_verbosity(value: &str) -> Option<LevelFilter> {
    value.trim().parse().ok().and_then(level_filter)
}

/// Logs the program name, version and target at startup.
pub fn preamble() {
    log::info!(
        "{} {} ({} / {})",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        std::env::consts::ARCH,
        std::env::consts::OS
    );
}
