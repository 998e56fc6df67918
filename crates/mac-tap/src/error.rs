//! Error types and result alias for the mac-tap crate.
use std::result::Result as StdResult;

use thiserror::Error;

/// Convenient result type used throughout this crate.
pub type Result<T> = StdResult<T, Error>;

/// Error variants produced by this crate.
#[derive(Error, Debug)]
pub enum Error {
    /// Event tap could not be created or initialized.
    #[error("Event tap failed to start")]
    EventTapStart,
    /// Missing or denied system permission.
    #[error("Permission denied: {0}")]
    PermissionDenied(&'static str),
}
