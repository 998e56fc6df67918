//! Error types for configuration loading.
use std::{io, path::PathBuf, result::Result as StdResult};

use thiserror::Error;

/// Convenient result type used throughout this crate.
pub type Result<T> = StdResult<T, Error>;

/// Errors produced while loading the hotkey config.
#[derive(Debug, Error)]
pub enum Error {
    /// The config source could not be opened or read. Callers must keep the
    /// previously installed mapping; a broken edit never clears hotkeys.
    #[error("cannot read {}: {source}", path.display())]
    Unreadable {
        /// Path we tried to read.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
}
