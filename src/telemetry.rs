//! Tracing subscriber setup.
//!
//! - `LOG_LEVEL` sets the filter (`"debug"`, or directives such as
//!   `"info,session=debug,strategy=debug"`).
//! - `LOG_FORMAT=json` switches to structured JSON lines; anything else is the
//!   pretty formatter.
//!
//! Log targets used by the crate: `session`, `strategy`, `persistence`.

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info,session=info,strategy=info,persistence=info";

/// Install the global subscriber. Safe to call more than once; later calls
/// are no-ops.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_env("LOG_LEVEL")
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(true)
        .with_line_number(true);

    let installed = match std::env::var("LOG_FORMAT").as_deref() {
        Ok("json") => builder.json().try_init(),
        _ => builder.try_init(),
    };
    // Err only means a subscriber is already set.
    let _ = installed;
}
