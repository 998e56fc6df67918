//! Error types for the engine.
use std::io;

use thiserror::Error;

/// Errors from the launch consumer.
#[derive(Debug, Error)]
pub enum LaunchError {
    /// The spawn call itself failed. The request is dropped and the consumer
    /// moves on; a bad target must never stop future launches.
    #[error("failed to spawn '{target}': {source}")]
    SpawnFailed {
        /// Identifier we tried to launch.
        target: String,
        /// Underlying OS error.
        source: io::Error,
    },
}
