//! Workshop folder scanning.
//!
//! A scan walks the direct children of the workshop content folder. Each
//! child folder named by a numeric id and holding a `.udk` map becomes a
//! [`WorkshopItem`]; everything else is skipped without aborting the scan.
//!
//! "First match" rules (which map file, which preview image) follow the
//! directory iteration order of the filesystem unless
//! [`CandidateOrder::Sorted`] is requested.

use crate::database::CuratedDatabase;
use crate::error::{Error, Result};
use crate::item::{PreviewSource, WorkshopId, WorkshopItem};
use camino::{Utf8Path, Utf8PathBuf};
use walkdir::WalkDir;

/// Extension of Unreal map packages.
pub const MAP_EXTENSION: &str = "udk";

/// Extensions accepted as a local preview image, in no particular priority.
pub const PREVIEW_EXTENSIONS: [&str; 2] = ["jpg", "png"];

/// How directory entries are ordered before picking the first match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CandidateOrder {
    /// Whatever order the filesystem yields. Stable within a run, not across
    /// filesystems.
    #[default]
    Filesystem,
    /// Sort entries by file name first. Deterministic everywhere, but may pick
    /// a different map/preview than [`CandidateOrder::Filesystem`] would.
    Sorted,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// Valid id, but no `.udk` file inside.
    MissingMapFile,
    /// The folder itself could not be listed.
    Unreadable(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedFolder {
    pub path: Utf8PathBuf,
    pub reason: SkipReason,
}

/// Result of a full scan.
#[derive(Debug, Clone, Default)]
pub struct ScanOutcome {
    /// Valid items, in discovery order.
    pub items: Vec<WorkshopItem>,
    /// Numeric folders that were rejected.
    pub skipped: Vec<SkippedFolder>,
}

impl ScanOutcome {
    pub fn ids(&self) -> Vec<WorkshopId> {
        self.items.iter().map(|item| item.id.clone()).collect()
    }
}

#[derive(Debug, Clone)]
pub struct WorkshopScanner {
    database: CuratedDatabase,
    placeholder: Utf8PathBuf,
    order: CandidateOrder,
}

impl WorkshopScanner {
    /// # Arguments
    ///
    /// * `database` - Curated titles/previews, consulted first
    /// * `placeholder` - Preview used when neither the database nor the folder has one
    pub fn new(database: CuratedDatabase, placeholder: impl Into<Utf8PathBuf>) -> Self {
        Self {
            database,
            placeholder: placeholder.into(),
            order: CandidateOrder::default(),
        }
    }

    pub fn with_order(mut self, order: CandidateOrder) -> Self {
        self.order = order;
        self
    }

    /// Scan every child folder of `root`.
    ///
    /// Fails only when `root` itself is missing or cannot be listed.
    pub fn scan(&self, root: &Utf8Path) -> Result<ScanOutcome> {
        if !root.is_dir() {
            return Err(Error::WorkshopDirNotFound(root.to_path_buf()));
        }

        tracing::info!("Scanning workshop folder: {}", root);

        let mut outcome = ScanOutcome::default();
        for entry in self.walk(root) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) if e.depth() == 0 => {
                    return Err(Error::WorkshopDirUnreadable {
                        path: root.to_path_buf(),
                        source: e,
                    });
                }
                Err(e) => {
                    tracing::warn!("Skipping unreadable entry in {}: {}", root, e);
                    continue;
                }
            };

            if entry.depth() == 0 || !entry.file_type().is_dir() {
                continue;
            }

            let Some(folder) = Utf8Path::from_path(entry.path()) else {
                tracing::debug!("Ignoring non UTF-8 folder: {}", entry.path().display());
                continue;
            };

            match self.scan_folder(folder) {
                Ok(Some(item)) => outcome.items.push(item),
                Ok(None) => {}
                Err(reason) => {
                    outcome.skipped.push(SkippedFolder {
                        path: folder.to_path_buf(),
                        reason,
                    });
                }
            }
        }

        tracing::info!(
            "Workshop scan done: {} valid, {} skipped",
            outcome.items.len(),
            outcome.skipped.len()
        );
        Ok(outcome)
    }

    /// Validate one workshop folder and resolve its metadata.
    ///
    /// Returns `Ok(None)` for folders whose name is not a workshop id; those
    /// are ignored silently.
    pub fn scan_folder(
        &self,
        folder: &Utf8Path,
    ) -> std::result::Result<Option<WorkshopItem>, SkipReason> {
        let Some(id) = folder.file_name().and_then(WorkshopId::parse) else {
            tracing::debug!("Ignoring non-workshop folder: {}", folder);
            return Ok(None);
        };

        let files = self.list_files(folder).map_err(|e| {
            tracing::warn!("Workshop folder at {} could not be read: {}. Skip.", folder, e);
            SkipReason::Unreadable(e.to_string())
        })?;

        let Some(map_file) = first_with_extension(&files, &[MAP_EXTENSION]) else {
            tracing::warn!(
                "Workshop folder at {} does not contain any udk map file. Skip.",
                folder
            );
            return Err(SkipReason::MissingMapFile);
        };

        tracing::info!(
            "Found valid workshop folder at {} with udk map file: {}",
            folder,
            map_file.file_name().unwrap_or_default()
        );

        let (title, preview, preview_source) = match self.database.lookup(&id) {
            Some(entry) => (entry.title, entry.preview, PreviewSource::Database),
            None => {
                let title = WorkshopItem::synthesized_title(map_file, &id);
                match first_with_extension(&files, &PREVIEW_EXTENSIONS) {
                    Some(local) => (title, local.clone(), PreviewSource::Local),
                    None => (title, self.placeholder.clone(), PreviewSource::Placeholder),
                }
            }
        };

        Ok(Some(WorkshopItem {
            id,
            folder: folder.to_path_buf(),
            map_file: map_file.clone(),
            title,
            preview,
            preview_source,
            is_new: false,
        }))
    }

    /// `dir` itself (depth 0) followed by its direct children.
    fn walk(&self, dir: &Utf8Path) -> walkdir::IntoIter {
        let walker = WalkDir::new(dir).max_depth(1).follow_links(true);
        match self.order {
            CandidateOrder::Filesystem => walker.into_iter(),
            CandidateOrder::Sorted => walker.sort_by_file_name().into_iter(),
        }
    }

    /// Files directly inside `folder`, in candidate order.
    fn list_files(&self, folder: &Utf8Path) -> std::result::Result<Vec<Utf8PathBuf>, walkdir::Error> {
        let mut files = Vec::new();
        for entry in self.walk(folder) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) if e.depth() == 0 => return Err(e),
                Err(_) => continue,
            };
            if entry.depth() == 0 || !entry.file_type().is_file() {
                continue;
            }
            if let Ok(path) = Utf8PathBuf::from_path_buf(entry.into_path()) {
                files.push(path);
            }
        }
        Ok(files)
    }
}

fn first_with_extension<'a>(files: &'a [Utf8PathBuf], extensions: &[&str]) -> Option<&'a Utf8PathBuf> {
    files
        .iter()
        .find(|path| path.extension().is_some_and(|ext| extensions.contains(&ext)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    struct Fixture {
        _temp: tempfile::TempDir,
        root: Utf8PathBuf,
        data: Utf8PathBuf,
    }

    impl Fixture {
        fn new() -> Self {
            let temp = tempfile::tempdir().unwrap();
            let base = Utf8Path::from_path(temp.path()).unwrap().to_path_buf();
            let root = base.join("252950");
            let data = base.join("data");
            fs::create_dir_all(&root).unwrap();
            fs::create_dir_all(data.join("database")).unwrap();
            Self {
                _temp: temp,
                root,
                data,
            }
        }

        fn scanner(&self) -> WorkshopScanner {
            WorkshopScanner::new(
                CuratedDatabase::new(self.data.join("database")),
                self.data.join("no_preview.jpg"),
            )
            .with_order(CandidateOrder::Sorted)
        }

        fn folder(&self, name: &str, files: &[&str]) -> Utf8PathBuf {
            let dir = self.root.join(name);
            fs::create_dir_all(&dir).unwrap();
            for file in files {
                fs::write(dir.join(file), b"x").unwrap();
            }
            dir
        }
    }

    #[test]
    fn test_non_numeric_folders_yield_empty_result() {
        let fx = Fixture::new();
        fx.folder("maps", &["Map.udk"]);
        fx.folder("12ab", &["Map.udk"]);
        fx.folder(".hidden", &[]);

        let outcome = fx.scanner().scan(&fx.root).unwrap();
        assert!(outcome.items.is_empty());
        assert!(outcome.skipped.is_empty());
    }

    #[test]
    fn test_files_at_root_are_ignored() {
        let fx = Fixture::new();
        fs::write(fx.root.join("123"), b"not a folder").unwrap();

        let outcome = fx.scanner().scan(&fx.root).unwrap();
        assert!(outcome.items.is_empty());
        assert!(outcome.skipped.is_empty());
    }

    #[test]
    fn test_folder_without_map_is_skipped() {
        let fx = Fixture::new();
        let dir = fx.folder("111", &["preview.jpg", "readme.txt"]);
        fx.folder("222", &["Course.udk"]);

        let outcome = fx.scanner().scan(&fx.root).unwrap();
        assert_eq!(outcome.ids(), vec![WorkshopId::parse("222").unwrap()]);
        assert_eq!(
            outcome.skipped,
            vec![SkippedFolder {
                path: dir,
                reason: SkipReason::MissingMapFile,
            }]
        );
    }

    #[test]
    fn test_local_preview_and_synthesized_title() {
        let fx = Fixture::new();
        let dir = fx.folder("555", &["Course.udk", "thumb.png"]);

        let outcome = fx.scanner().scan(&fx.root).unwrap();
        let item = &outcome.items[0];
        assert_eq!(item.map_file, dir.join("Course.udk"));
        assert_eq!(item.title, "[Course.udk] #555");
        assert_eq!(item.preview, dir.join("thumb.png"));
        assert_eq!(item.preview_source, PreviewSource::Local);
        assert!(!item.is_new);
    }

    #[test]
    fn test_placeholder_when_no_preview() {
        let fx = Fixture::new();
        fx.folder("777", &["Course.udk", "notes.txt"]);

        let outcome = fx.scanner().scan(&fx.root).unwrap();
        let item = &outcome.items[0];
        assert_eq!(item.title, "[Course.udk] #777");
        assert_eq!(item.preview, fx.data.join("no_preview.jpg"));
        assert_eq!(item.preview_source, PreviewSource::Placeholder);
    }

    #[test]
    fn test_database_entry_wins_over_local_preview() {
        let fx = Fixture::new();
        fx.folder("999", &["Course.udk", "local.jpg"]);
        fs::write(fx.data.join("database/999.jpg"), b"jpg").unwrap();
        fs::write(fx.data.join("database/999.txt"), "Lethamyr's Ring Map\n").unwrap();

        let outcome = fx.scanner().scan(&fx.root).unwrap();
        let item = &outcome.items[0];
        assert_eq!(item.title, "Lethamyr's Ring Map");
        assert_eq!(item.preview, fx.data.join("database/999.jpg"));
        assert_eq!(item.preview_source, PreviewSource::Database);
    }

    #[test]
    fn test_sorted_order_picks_first_by_name() {
        let fx = Fixture::new();
        let dir = fx.folder("1", &["b.udk", "a.udk", "z.png", "c.jpg"]);

        let item = fx.scanner().scan_folder(&dir).unwrap().unwrap();
        assert_eq!(item.map_file, dir.join("a.udk"));
        assert_eq!(item.preview, dir.join("c.jpg"));
    }

    #[test]
    fn test_sorted_discovery_order() {
        let fx = Fixture::new();
        fx.folder("30", &["m.udk"]);
        fx.folder("10", &["m.udk"]);
        fx.folder("20", &["m.udk"]);

        let outcome = fx.scanner().scan(&fx.root).unwrap();
        let ids: Vec<String> = outcome.ids().iter().map(|id| id.to_string()).collect();
        assert_eq!(ids, vec!["10", "20", "30"]);
    }

    #[test]
    fn test_default_order_scans_real_folder() {
        let fx = Fixture::new();
        let dir = fx.folder("4242", &["Course.udk", "thumb.jpg", "notes.txt"]);
        fx.folder("docs", &["Other.udk"]);

        let scanner = WorkshopScanner::new(
            CuratedDatabase::new(fx.data.join("database")),
            fx.data.join("no_preview.jpg"),
        );
        let outcome = scanner.scan(&fx.root).unwrap();

        assert_eq!(outcome.ids(), vec![WorkshopId::parse("4242").unwrap()]);
        let item = &outcome.items[0];
        assert_eq!(item.map_file, dir.join("Course.udk"));
        assert_eq!(item.preview, dir.join("thumb.jpg"));
        assert_eq!(item.preview_source, PreviewSource::Local);
        assert!(outcome.skipped.is_empty());
    }

    #[test]
    fn test_udk_directory_is_not_a_map_file() {
        let fx = Fixture::new();
        let dir = fx.folder("42", &[]);
        fs::create_dir_all(dir.join("fake.udk")).unwrap();

        assert_eq!(fx.scanner().scan_folder(&dir), Err(SkipReason::MissingMapFile));
    }

    #[test]
    fn test_missing_root_is_fatal() {
        let fx = Fixture::new();
        let missing = fx.root.join("nope");

        let err = fx.scanner().scan(&missing).unwrap_err();
        assert!(matches!(err, Error::WorkshopDirNotFound(path) if path == missing));
    }
}
