//! Workshop item model.

use camino::{Utf8Path, Utf8PathBuf};
use std::fmt;

/// Numeric Steam Workshop id, taken verbatim from the item's folder name.
///
/// The id is kept as the original string rather than parsed into an integer
/// so that it round-trips through the ordering file byte for byte.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WorkshopId(String);

impl WorkshopId {
    /// Returns `Some` if `value` is non-empty and made of ASCII digits only.
    pub fn parse(value: &str) -> Option<Self> {
        if is_valid_workshop_id(value) {
            Some(Self(value.to_string()))
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WorkshopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for WorkshopId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Validates a workshop folder name: decimal digits only.
pub fn is_valid_workshop_id(value: &str) -> bool {
    !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit())
}

/// Where a workshop item's title and preview came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewSource {
    /// Bundled `database/<id>.jpg` + `database/<id>.txt`.
    Database,
    /// First `.jpg`/`.png` found inside the workshop folder.
    Local,
    /// Shared "no preview" image.
    Placeholder,
}

/// A validated workshop download.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkshopItem {
    pub id: WorkshopId,
    /// Folder the item was found in.
    pub folder: Utf8PathBuf,
    /// The `.udk` map file passed to `load_workshop`.
    pub map_file: Utf8PathBuf,
    pub title: String,
    pub preview: Utf8PathBuf,
    pub preview_source: PreviewSource,
    /// Not part of any previously saved ordering. Cleared once the overlay
    /// has been closed.
    pub is_new: bool,
}

impl WorkshopItem {
    /// Title used when no curated entry exists: `[<map file name>] #<id>`.
    pub fn synthesized_title(map_file: &Utf8Path, id: &WorkshopId) -> String {
        format!("[{}] #{}", map_file.file_name().unwrap_or_default(), id)
    }
}
