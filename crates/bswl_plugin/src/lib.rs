//! Better Steam Workshop Loader: the in-game half.
//!
//! [`WorkshopLoaderPlugin`] implements the three capability groups a plugin
//! host drives: [`PluginLifecycle`], [`SettingsWindow`] and
//! [`OverlayWindow`]. The host itself is abstracted behind [`Host`] and
//! drawing behind [`Ui`], so a binding only has to forward its callbacks:
//!
//! ```no_run
//! use bswl_plugin::{Host, OverlayWindow, PluginLifecycle, Ui, WorkshopLoaderPlugin};
//!
//! fn frame(plugin: &mut WorkshopLoaderPlugin, host: &mut dyn Host, ui: &mut dyn Ui) {
//!     if plugin.is_window_open() {
//!         plugin.render(host, ui);
//!     }
//! }
//!
//! fn load(host: &mut dyn Host) -> WorkshopLoaderPlugin {
//!     let mut plugin = WorkshopLoaderPlugin::new();
//!     plugin.on_load(host);
//!     plugin
//! }
//! ```

pub mod config;
pub mod error;
pub mod host;
pub mod logging;
pub mod plugin;
pub mod settings;
pub mod texture;
pub mod ui;

pub use config::LoaderConfig;
pub use error::{Error, Result};
pub use host::{
    CommandSink, ConsoleVariables, CvarSpec, Host, LogSink, SharedLogSink, Texture, TextureId,
    TextureLoader,
};
pub use plugin::{
    LoadState, LoadedSession, OverlayWindow, PluginLifecycle, SettingsWindow,
    WorkshopLoaderPlugin,
};
pub use settings::{PreviewSize, Settings};
pub use texture::{decode_preview, DecodedImage, PreviewTextures};
pub use ui::{Color, Ui};
