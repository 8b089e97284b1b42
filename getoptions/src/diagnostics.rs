//! Process-wide diagnostic logging.
//!
//! The parser only talks to the `log` facade. Installing a sink is up to the
//! program, either through [`init`] or any other `log` backend.

use log::LevelFilter;

/// Environment variable overriding the configured level filter,
/// using `env_logger` filter syntax (e.g. `GETOPT_LOG=getoptions=trace`).
pub const ENV_VAR: &str = "GETOPT_LOG";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Sink {
    #[default]
    Stderr,
    Stdout,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Diagnostics {
    pub enabled: bool,
    pub level: LevelFilter,
    pub sink: Sink,
}

impl Default for Diagnostics {
    fn default() -> Self {
        Diagnostics {
            enabled: false,
            level: LevelFilter::Debug,
            sink: Sink::Stderr,
        }
    }
}

/// Install an `env_logger` backend. Returns false if a logger was already
/// installed in this process.
pub fn init(config: Diagnostics) -> bool {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(if config.enabled {
        config.level
    } else {
        LevelFilter::Off
    });
    builder.parse_env(ENV_VAR);
    builder.format_timestamp(None);
    builder.target(match config.sink {
        Sink::Stderr => env_logger::Target::Stderr,
        Sink::Stdout => env_logger::Target::Stdout,
    });
    builder.try_init().is_ok()
}
