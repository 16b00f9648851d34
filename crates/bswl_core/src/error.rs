//! Error types for scanning and ordering operations.
//!
//! Only two kinds of failure surface from this crate: problems that make the
//! whole workshop feature unavailable (the root folder cannot be derived or
//! read) and invalid requests against an [`Ordering`](crate::Ordering).
//! Per-folder problems during a scan are never errors; they are reported as
//! [`SkippedFolder`](crate::SkippedFolder) entries instead.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// Filesystem I/O failed (writing the ordering file, etc.).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The running executable does not live under a `steamapps/common` folder.
    #[error("ERROR! Could not find the steamapps folder from the running RocketLeague.exe path.")]
    SteamappsNotFound { executable: Option<Utf8PathBuf> },

    /// The workshop content folder does not exist (no workshop map was ever
    /// downloaded, or the derived path is wrong).
    #[error("ERROR! Steam workshop folder not found at {0}")]
    WorkshopDirNotFound(Utf8PathBuf),

    /// The workshop content folder exists in theory but could not be listed.
    #[error("ERROR! Could not read the Steam workshop folder at {path}: {source}")]
    WorkshopDirUnreadable {
        path: Utf8PathBuf,
        #[source]
        source: walkdir::Error,
    },

    /// A move was requested for an index outside the ordering.
    #[error("Cannot move item at index {index}: ordering only has {len} items")]
    MoveOutOfRange { index: usize, len: usize },

    /// A move direction other than -1 or +1.
    #[error("Invalid move direction: {0} (expected -1 or 1)")]
    InvalidDirection(i32),
}
