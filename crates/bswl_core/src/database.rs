//! Curated title/preview database.
//!
//! The database is a plain folder shipped next to the plugin data, holding
//! `<id>.jpg` (preview) and `<id>.txt` (title on the first line) for well
//! known workshop maps. It is generated separately and only ever read here.

use crate::item::WorkshopId;
use camino::{Utf8Path, Utf8PathBuf};
use std::fs::File;
use std::io::{self, BufRead, BufReader};

/// A curated title and preview for one workshop id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseEntry {
    pub title: String,
    pub preview: Utf8PathBuf,
}

#[derive(Debug, Clone)]
pub struct CuratedDatabase {
    dir: Utf8PathBuf,
}

impl CuratedDatabase {
    pub fn new(dir: impl Into<Utf8PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Utf8Path {
        &self.dir
    }

    pub fn preview_path(&self, id: &WorkshopId) -> Utf8PathBuf {
        self.dir.join(format!("{id}.jpg"))
    }

    pub fn title_path(&self, id: &WorkshopId) -> Utf8PathBuf {
        self.dir.join(format!("{id}.txt"))
    }

    /// Look up the curated entry for `id`.
    ///
    /// An entry only counts when both the preview and the title file exist.
    pub fn lookup(&self, id: &WorkshopId) -> Option<DatabaseEntry> {
        let preview = self.preview_path(id);
        let title_path = self.title_path(id);
        if !preview.is_file() || !title_path.is_file() {
            return None;
        }

        let title = read_first_line(&title_path);
        Some(DatabaseEntry { title, preview })
    }
}

/// First line of a text file, without its line terminator.
///
/// Bytes that are not UTF-8 are replaced rather than rejected, since the
/// curated titles have no declared encoding. Unreadable files yield an empty
/// string.
pub(crate) fn read_first_line(path: &Utf8Path) -> String {
    match read_first_line_bytes(path) {
        Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
        Err(e) => {
            tracing::debug!("Could not read {}: {}", path, e);
            String::new()
        }
    }
}

fn read_first_line_bytes(path: &Utf8Path) -> io::Result<Vec<u8>> {
    let mut line = Vec::new();
    BufReader::new(File::open(path)?).read_until(b'\n', &mut line)?;
    while matches!(line.last(), Some(b'\n' | b'\r')) {
        line.pop();
    }
    Ok(line)
}
