//! Ordering persistence (`ids.sav`).
//!
//! The file holds one line of comma-separated workshop ids with no trailing
//! delimiter, e.g. `2235912853,814218628,1398484271`. Only the first line is
//! ever read.

use crate::database::read_first_line;
use crate::error::Result;
use crate::item::WorkshopId;
use crate::ordering::Ordering;
use camino::{Utf8Path, Utf8PathBuf};
use std::fs::{self, File};
use std::io::Write;

/// File name of the saved ordering inside the plugin data folder.
pub const ORDERING_FILE_NAME: &str = "ids.sav";

#[derive(Debug, Clone)]
pub struct OrderingStore {
    path: Utf8PathBuf,
}

impl OrderingStore {
    pub fn new(path: impl Into<Utf8PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// Read the saved sequence.
    ///
    /// A missing or empty file yields an empty sequence. Tokens that are not
    /// workshop ids could never match a scanned folder and are dropped.
    pub fn load(&self) -> Vec<WorkshopId> {
        let line = read_first_line(&self.path);
        tracing::info!("Saved ordering: {}", line);

        parse_line(&line)
    }

    /// Overwrite the file with `ordering`.
    ///
    /// The file is truncated first; an empty ordering leaves it empty.
    pub fn save(&self, ordering: &Ordering) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut file = File::create(&self.path)?;
        if ordering.is_empty() {
            return Ok(());
        }

        let line = ordering.to_line();
        tracing::info!("Saving ordering: {}", line);
        file.write_all(line.as_bytes())?;
        Ok(())
    }
}

fn parse_line(line: &str) -> Vec<WorkshopId> {
    if line.is_empty() {
        return Vec::new();
    }

    line.split(',')
        .filter_map(|token| {
            let id = WorkshopId::parse(token);
            if id.is_none() {
                tracing::warn!("Ignoring invalid id in saved ordering: {:?}", token);
            }
            id
        })
        .collect()
}
