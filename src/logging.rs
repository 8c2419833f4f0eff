//! Logging setup. The terminal belongs to the game, so records go to
//! ~/.pippin/pippin.log instead of stderr.

use crate::utils::persistence::data_path;
use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;

pub const LOG_FILE: &str = "pippin.log";
pub const LOG_FILTER_ENV: &str = "PIPPIN_LOG";

/// Install the global logger writing to the log file. Returns its path.
///
/// Filter comes from `PIPPIN_LOG`, defaulting to `info`.
pub fn init() -> io::Result<PathBuf> {
    let path = data_path(LOG_FILE)?;
    let file = OpenOptions::new().create(true).append(true).open(&path)?;

    env_logger::Builder::from_env(env_logger::Env::default().filter_or(LOG_FILTER_ENV, "info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init()
        .map_err(|e| io::Error::new(io::ErrorKind::AlreadyExists, e))?;

    Ok(path)
}
