//! The plugin proper: load/unload, the settings page and the workshop grid
//! overlay.

use crate::config::LoaderConfig;
use crate::error::Result;
use crate::host::Host;
use crate::logging;
use crate::settings::{PreviewSize, Settings, COLUMNS_COUNT};
use crate::texture::PreviewTextures;
use crate::ui::{Color, Ui, FULL_WIDTH, MOVE_BUTTON_HUE, NEW_BADGE_HUE};
use bswl_core::{locate_workshop_dir, Direction, LibraryPaths, WorkshopItem, WorkshopLibrary};
use camino::Utf8PathBuf;
use tracing_appender::non_blocking::WorkerGuard;

pub const PLUGIN_NAME: &str = "Better Steam Workshop Loader";
pub const MENU_NAME: &str = "BetterSteamWorkshopLoader";
pub const DISABLED_MESSAGE: &str = "PLUGIN DISABLED. ONLY WORKS WITH STEAM VERSION.";
pub const DEFAULT_KEYBIND: &str = "F3";

const MAIN_MENU_COMMAND: &str = "start MENU_Main_p?close";
const WINDOW_SIZE: [f32; 2] = [1120.0, 700.0];
/// Card height on top of the preview: title line and Play button.
const CARD_EXTRA_HEIGHT: f32 = 56.0;
const MOVE_BUTTON_PADDING: f32 = 8.0;

pub fn toggle_menu_command() -> String {
    format!("togglemenu {}", MENU_NAME)
}

pub fn close_menu_command() -> String {
    format!("closemenu {}", MENU_NAME)
}

pub fn load_workshop_command(item: &WorkshopItem) -> String {
    format!("load_workshop \"{}\"", item.map_file)
}

/// Load and unload notifications from the host.
pub trait PluginLifecycle {
    fn on_load(&mut self, host: &mut dyn Host);
    fn on_unload(&mut self, host: &mut dyn Host);
}

/// The plugin's page in the host settings menu.
pub trait SettingsWindow {
    fn plugin_name(&self) -> &str;
    fn render_settings(&mut self, host: &mut dyn Host, ui: &mut dyn Ui);
}

/// A toggleable window drawn over the game.
pub trait OverlayWindow {
    /// Name used by `togglemenu`/`closemenu`.
    fn menu_name(&self) -> &str;
    fn menu_title(&self) -> &str;
    /// Keep clicks and key presses from reaching the game.
    fn should_block_input(&self, ui: &dyn Ui) -> bool;
    fn is_active_overlay(&self) -> bool;
    fn on_open(&mut self);
    fn on_close(&mut self);
    fn render(&mut self, host: &mut dyn Host, ui: &mut dyn Ui);
}

/// Everything built by a successful load.
#[derive(Debug)]
pub struct LoadedSession {
    pub library: WorkshopLibrary,
    pub textures: PreviewTextures,
}

#[derive(Debug, Default)]
pub enum LoadState {
    #[default]
    Unloaded,
    /// Not the Steam version of the game.
    Disabled,
    /// The workshop folder could not be resolved or listed.
    Failed(String),
    Loaded(LoadedSession),
}

pub struct WorkshopLoaderPlugin {
    state: LoadState,
    config: LoaderConfig,
    keybind: String,
    is_window_open: bool,
    log_guard: Option<WorkerGuard>,
}

impl Default for WorkshopLoaderPlugin {
    fn default() -> Self {
        Self::new()
    }
}

impl WorkshopLoaderPlugin {
    pub fn new() -> Self {
        Self {
            state: LoadState::Unloaded,
            config: LoaderConfig::default(),
            keybind: DEFAULT_KEYBIND.to_string(),
            is_window_open: false,
            log_guard: None,
        }
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn library(&self) -> Option<&WorkshopLibrary> {
        match &self.state {
            LoadState::Loaded(session) => Some(&session.library),
            _ => None,
        }
    }

    pub fn is_window_open(&self) -> bool {
        self.is_window_open
    }

    fn load_session(&self, host: &mut dyn Host, paths: LibraryPaths) -> Result<LoadedSession> {
        let workshop_root = match &self.config.workshop_dir {
            Some(dir) => {
                tracing::info!("Using configured workshop folder {}", dir);
                dir.clone()
            }
            None => resolve_workshop_root(host)?,
        };

        let placeholder = paths.placeholder_preview();
        let library = WorkshopLibrary::load(paths, &workshop_root, self.config.candidate_order())?;
        for skipped in library.skipped() {
            tracing::debug!("Skipped {}: {:?}", skipped.path, skipped.reason);
        }
        let textures = PreviewTextures::load(host, &library, &placeholder);

        Ok(LoadedSession { library, textures })
    }
}

fn resolve_workshop_root(host: &dyn Host) -> Result<Utf8PathBuf> {
    let executable = host
        .game_executable()
        .ok_or(bswl_core::Error::SteamappsNotFound { executable: None })?;
    Ok(locate_workshop_dir(&executable)?)
}

impl PluginLifecycle for WorkshopLoaderPlugin {
    fn on_load(&mut self, host: &mut dyn Host) {
        let paths = LibraryPaths::from_host_data_folder(&host.data_folder());
        if self.log_guard.is_none() {
            self.log_guard = logging::init_logging(host.log_sink(), Some(&paths.log_dir()));
        }

        self.config = LoaderConfig::load(&paths.config_file());
        if !host.is_using_steam_version() && !self.config.allow_non_steam {
            tracing::warn!("{}", DISABLED_MESSAGE);
            self.state = LoadState::Disabled;
            return;
        }

        Settings::register(host);

        self.state = match self.load_session(host, paths) {
            Ok(session) => LoadState::Loaded(session),
            Err(e) => {
                tracing::error!("{}", e);
                LoadState::Failed(e.to_string())
            }
        };
    }

    fn on_unload(&mut self, _host: &mut dyn Host) {
        if let LoadState::Loaded(session) = &self.state {
            if let Err(e) = session.library.save() {
                tracing::error!("Error saving the ordering: {}. Won't save.", e);
            }
        }
        self.state = LoadState::Unloaded;
        self.is_window_open = false;
    }
}

impl SettingsWindow for WorkshopLoaderPlugin {
    fn plugin_name(&self) -> &str {
        PLUGIN_NAME
    }

    fn render_settings(&mut self, host: &mut dyn Host, ui: &mut dyn Ui) {
        match &self.state {
            LoadState::Loaded(_) => {}
            LoadState::Disabled => {
                ui.text_colored(Color::RED, DISABLED_MESSAGE);
                return;
            }
            LoadState::Failed(message) => {
                ui.text_colored(Color::RED, message);
                return;
            }
            LoadState::Unloaded => return,
        }

        if ui.button("Open Workshop Loader") {
            host.execute_command(&toggle_menu_command());
        }

        ui.separator();
        ui.separator();

        // Shortcut for `bind F3 "togglemenu BetterSteamWorkshopLoader"`.
        if ui.button("Set Keybind") {
            tracing::info!("Binding {} to the workshop loader", self.keybind);
            host.set_bind(&self.keybind, &toggle_menu_command());
        }
        ui.same_line();
        ui.input_text("##keybind", &mut self.keybind);

        ui.separator();

        let current = Settings::read(&*host);
        let mut updated = current;

        ui.text("Columns count: ");
        ui.same_line();
        ui.input_int("##ColumnsCountInput", &mut updated.columns_count);
        ui.same_line();
        ui.text("(max 10)");
        updated.columns_count = COLUMNS_COUNT.clamp(updated.columns_count);

        ui.text("Preview size: ");
        for size in PreviewSize::ALL {
            ui.same_line();
            if ui.radio_button(size.label(), updated.preview_size == size) {
                updated.preview_size = size;
            }
        }

        updated.apply(&current, host);
    }
}

impl OverlayWindow for WorkshopLoaderPlugin {
    fn menu_name(&self) -> &str {
        MENU_NAME
    }

    fn menu_title(&self) -> &str {
        PLUGIN_NAME
    }

    fn should_block_input(&self, ui: &dyn Ui) -> bool {
        ui.wants_input()
    }

    fn is_active_overlay(&self) -> bool {
        true
    }

    fn on_open(&mut self) {
        self.is_window_open = true;
    }

    fn on_close(&mut self) {
        // The NEW badges only last until the window has been seen once.
        if let LoadState::Loaded(session) = &mut self.state {
            session.library.clear_new_flags();
        }
        self.is_window_open = false;
    }

    fn render(&mut self, host: &mut dyn Host, ui: &mut dyn Ui) {
        let LoadState::Loaded(session) = &mut self.state else {
            return;
        };

        let settings = Settings::read(&*host);

        if !ui.begin_window(PLUGIN_NAME, WINDOW_SIZE, &mut self.is_window_open) {
            ui.end_window();
            return;
        }

        if ui.button("Exit to Main Menu (freeplay/workshop only)") && host.is_in_freeplay() {
            host.execute_engine_command(MAIN_MENU_COMMAND);
            host.execute_command(&close_menu_command());
        }

        ui.begin_child("WorkshopList", [0.0, 0.0], false);

        if let Some((index, direction)) = render_grid(ui, host, session, &settings) {
            if let Err(e) = session.library.move_item(index, direction) {
                tracing::warn!("Ignoring move of item {}: {}", index, e);
            }
        }

        ui.end_child();
        ui.end_window();

        if !self.is_window_open {
            host.execute_command(&toggle_menu_command());
        }
    }
}

/// Draw one card per item. Returns the last move requested this frame.
fn render_grid(
    ui: &mut dyn Ui,
    host: &mut dyn Host,
    session: &LoadedSession,
    settings: &Settings,
) -> Option<(usize, Direction)> {
    let preview_size = settings.preview_size.dimensions();
    let card_height = preview_size[1] + CARD_EXTRA_HEIGHT;
    let mut requested_move = None;

    ui.columns(settings.columns_count);
    for (index, item) in session.library.ordered_items().enumerate() {
        ui.begin_child(item.id.as_str(), [0.0, card_height], true);

        if let Some(texture) = session.textures.get(&item.id) {
            ui.image(texture, preview_size);
        }

        ui.same_line_at(MOVE_BUTTON_PADDING);
        if ui.button_hued(" < ", MOVE_BUTTON_HUE) {
            requested_move = Some((index, Direction::Left));
        }
        ui.same_line();
        if ui.button_hued(" > ", MOVE_BUTTON_HUE) {
            requested_move = Some((index, Direction::Right));
        }

        if item.is_new {
            ui.same_line();
            ui.button_hued("NEW", NEW_BADGE_HUE);
        }

        ui.text(&item.title);
        if ui.button_sized("Play", [FULL_WIDTH, 0.0]) {
            let command = load_workshop_command(item);
            tracing::info!("{}", command);
            host.execute_command(&command);
            host.execute_command(&close_menu_command());
        }

        ui.end_child();
        ui.next_column();
    }
    ui.columns(1);

    requested_move
}
