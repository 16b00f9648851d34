//! The loaded workshop library: scanned items plus their display order.

use crate::database::CuratedDatabase;
use crate::error::Result;
use crate::item::{WorkshopId, WorkshopItem};
use crate::ordering::{merge_ordering, Direction, Ordering};
use crate::scanner::{CandidateOrder, SkippedFolder, WorkshopScanner};
use crate::store::{OrderingStore, ORDERING_FILE_NAME};
use camino::{Utf8Path, Utf8PathBuf};
use std::collections::HashMap;

/// Well-known locations inside the plugin's private data folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryPaths {
    data_dir: Utf8PathBuf,
}

impl LibraryPaths {
    /// Sub-folder of the host data folder owned by this plugin.
    pub const DATA_DIR_NAME: &'static str = "BetterSteamWorkshopLoader";

    pub fn new(data_dir: impl Into<Utf8PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// `<host data folder>/BetterSteamWorkshopLoader`
    pub fn from_host_data_folder(host_data: &Utf8Path) -> Self {
        Self::new(host_data.join(Self::DATA_DIR_NAME))
    }

    pub fn data_dir(&self) -> &Utf8Path {
        &self.data_dir
    }

    pub fn ordering_file(&self) -> Utf8PathBuf {
        self.data_dir.join(ORDERING_FILE_NAME)
    }

    pub fn database_dir(&self) -> Utf8PathBuf {
        self.data_dir.join("database")
    }

    pub fn placeholder_preview(&self) -> Utf8PathBuf {
        self.data_dir.join("no_preview.jpg")
    }

    pub fn config_file(&self) -> Utf8PathBuf {
        self.data_dir.join("config.toml")
    }

    pub fn log_dir(&self) -> Utf8PathBuf {
        self.data_dir.join("logs")
    }
}

/// Application state for one loaded session.
///
/// Built wholesale by [`WorkshopLibrary::load`]; afterwards only the order
/// and the "new" flags change.
#[derive(Debug)]
pub struct WorkshopLibrary {
    items: HashMap<WorkshopId, WorkshopItem>,
    ordering: Ordering,
    store: OrderingStore,
    skipped: Vec<SkippedFolder>,
}

impl WorkshopLibrary {
    /// Read the saved order, scan `workshop_root` and merge both.
    ///
    /// Fails only if `workshop_root` cannot be listed.
    pub fn load(paths: LibraryPaths, workshop_root: &Utf8Path, order: CandidateOrder) -> Result<Self> {
        let store = OrderingStore::new(paths.ordering_file());
        let saved = store.load();

        let scanner = WorkshopScanner::new(
            CuratedDatabase::new(paths.database_dir()),
            paths.placeholder_preview(),
        )
        .with_order(order);
        let outcome = scanner.scan(workshop_root)?;

        let merged = merge_ordering(&outcome.ids(), &saved);
        let items = outcome
            .items
            .into_iter()
            .map(|mut item| {
                item.is_new = merged.is_new(&item.id);
                (item.id.clone(), item)
            })
            .collect();

        tracing::info!(
            "Loaded {} workshop items ({} new)",
            merged.ordering.len(),
            merged.new_ids.len()
        );

        Ok(Self {
            items,
            ordering: merged.ordering,
            store,
            skipped: outcome.skipped,
        })
    }

    pub fn len(&self) -> usize {
        self.ordering.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordering.is_empty()
    }

    pub fn ordering(&self) -> &Ordering {
        &self.ordering
    }

    pub fn item(&self, id: &WorkshopId) -> Option<&WorkshopItem> {
        self.items.get(id)
    }

    /// Items in display order.
    pub fn ordered_items(&self) -> impl Iterator<Item = &WorkshopItem> {
        self.ordering.iter().filter_map(|id| self.items.get(id))
    }

    /// Numeric folders the scan rejected.
    pub fn skipped(&self) -> &[SkippedFolder] {
        &self.skipped
    }

    /// Move one item and persist the new order.
    ///
    /// A failed save is logged and the in-memory order is kept; the next
    /// successful save overwrites the file.
    pub fn move_item(&mut self, index: usize, direction: Direction) -> Result<()> {
        self.ordering.move_item(index, direction)?;
        if let Err(e) = self.save() {
            tracing::error!("Error saving the ordering to {}: {}. Won't save.", self.store.path(), e);
        }
        Ok(())
    }

    pub fn save(&self) -> Result<()> {
        self.store.save(&self.ordering)
    }

    /// Forget which items were discovered this session.
    pub fn clear_new_flags(&mut self) {
        for item in self.items.values_mut() {
            item.is_new = false;
        }
    }
}
