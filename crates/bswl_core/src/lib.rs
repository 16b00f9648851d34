//! Core logic for the Better Steam Workshop Loader.
//!
//! This crate knows how to find the Rocket League workshop folder on disk,
//! turn each downloaded workshop item into a [`WorkshopItem`] and keep the
//! user's display order across sessions. It has no knowledge of the game's
//! plugin host or of any rendering layer; see `bswl_plugin` for that.
//!
//! - **Scanning**: validate numeric workshop folders and resolve map file,
//!   title and preview image for each one
//! - **Curated database**: prefer bundled titles/previews over local guesses
//! - **Ordering**: merge freshly found items with the saved order, with
//!   wrap-around single-step moves
//! - **Persistence**: the order is stored as a single comma-separated line
//!
//! # Example
//!
//! ```no_run
//! use bswl_core::{CandidateOrder, Direction, LibraryPaths, WorkshopLibrary};
//! use camino::Utf8PathBuf;
//!
//! # fn main() -> bswl_core::Result<()> {
//! let paths = LibraryPaths::new(Utf8PathBuf::from("C:/bakkesmod/data/BetterSteamWorkshopLoader"));
//! let root = Utf8PathBuf::from("C:/Steam/steamapps/workshop/content/252950");
//!
//! let mut library = WorkshopLibrary::load(paths, &root, CandidateOrder::Filesystem)?;
//! for item in library.ordered_items() {
//!     println!("{} -> {}", item.title, item.map_file);
//! }
//! library.move_item(0, Direction::Right)?;
//! # Ok(())
//! # }
//! ```

pub mod database;
pub mod error;
pub mod item;
pub mod library;
pub mod ordering;
pub mod scanner;
pub mod steam_path;
pub mod store;

pub use database::{CuratedDatabase, DatabaseEntry};
pub use error::{Error, Result};
pub use item::{PreviewSource, WorkshopId, WorkshopItem};
pub use library::{LibraryPaths, WorkshopLibrary};
pub use ordering::{merge_ordering, Direction, MergedOrdering, Ordering};
pub use scanner::{CandidateOrder, ScanOutcome, SkipReason, SkippedFolder, WorkshopScanner};
pub use steam_path::{
    detect_game_executable, locate_workshop_dir, steamapps_from_executable, workshop_content_dir,
    ROCKET_LEAGUE_APP_ID,
};
pub use store::OrderingStore;
