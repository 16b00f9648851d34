//! Services the game's plugin host provides to the loader.
//!
//! The real host (console variables, console commands, texture upload, log
//! window) lives outside this workspace. These traits are the only surface
//! the plugin consumes, which keeps everything here testable with fakes.

use crate::error::Result;
use camino::{Utf8Path, Utf8PathBuf};
use std::sync::Arc;

/// An integer console variable with inclusive bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CvarSpec {
    pub name: &'static str,
    pub default: i32,
    pub min: i32,
    pub max: i32,
}

impl CvarSpec {
    pub fn clamp(&self, value: i32) -> i32 {
        value.clamp(self.min, self.max)
    }
}

/// Key-value store of host-persisted settings.
pub trait ConsoleVariables {
    fn register_int(&mut self, spec: &CvarSpec);
    fn get_int(&self, name: &str) -> Option<i32>;
    fn set_int(&mut self, name: &str, value: i32);
}

/// Sink for user-triggered actions.
pub trait CommandSink {
    /// Run a host console command, e.g. `togglemenu <name>`.
    fn execute_command(&mut self, command: &str);
    /// Run a raw engine command, e.g. `start MENU_Main_p?close`.
    fn execute_engine_command(&mut self, command: &str);
    fn set_bind(&mut self, key: &str, command: &str);
    fn is_in_freeplay(&self) -> bool;
}

/// Opaque handle of a texture uploaded by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureId(pub u64);

/// A decoded, displayable image and its intrinsic size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Texture {
    pub id: TextureId,
    pub width: u32,
    pub height: u32,
}

pub trait TextureLoader {
    fn load_texture(&mut self, path: &Utf8Path) -> Result<Texture>;
}

/// Fire-and-forget host log window.
pub trait LogSink: Send + Sync {
    fn log(&self, message: &str);
}

pub type SharedLogSink = Arc<dyn LogSink>;

/// Everything the plugin needs from its host.
pub trait Host: ConsoleVariables + CommandSink + TextureLoader {
    /// Host-wide data folder; the plugin keeps its files in a sub-folder.
    fn data_folder(&self) -> Utf8PathBuf;

    fn is_using_steam_version(&self) -> bool;

    fn log_sink(&self) -> SharedLogSink;

    /// Path of the running game executable.
    fn game_executable(&self) -> Option<Utf8PathBuf> {
        bswl_core::detect_game_executable()
    }
}
