//! tracing-subscriber setup
//!
//! The filter comes from `ASTVIEW_LOG` when set, otherwise from the `logging.filter` config key.
//! Batch commands log to stderr. The viewer owns the terminal, so it logs to a file or not at
//! all.

use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

pub const LOG_ENV_VAR: &str = "ASTVIEW_LOG";

pub enum LogTarget<'a> {
    Stderr,
    File(&'a Path),
    Off,
}

fn env_filter(default_filter: &str) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV_VAR)
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

pub fn init(default_filter: &str, target: LogTarget<'_>) -> io::Result<()> {
    let builder = tracing_subscriber::fmt().with_env_filter(env_filter(default_filter));

    let result = match target {
        LogTarget::Off => return Ok(()),
        LogTarget::Stderr => builder.with_writer(io::stderr).try_init(),
        LogTarget::File(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
    };

    result.map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))
}
