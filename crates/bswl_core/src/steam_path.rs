//! Steam workshop folder detection.
//!
//! The workshop folder is never configured by the player. It is derived from
//! the path of the running game, which for Steam installs looks like
//! `[...]/steamapps/common/rocketleague/Binaries/Win64/RocketLeague.exe`.
//! As long as the `steamapps/common` pair is present, the rest of the path
//! may change between game updates without breaking detection.

use crate::error::{Error, Result};
use camino::{Utf8Path, Utf8PathBuf};
use sysinfo::System;

/// Steam app id of Rocket League; the workshop content folder is named after it.
pub const ROCKET_LEAGUE_APP_ID: &str = "252950";

/// Returns the `steamapps` folder containing the given executable.
///
/// The right-most `steamapps` component directly followed by `common` wins.
pub fn steamapps_from_executable(exe: &Utf8Path) -> Option<Utf8PathBuf> {
    let components: Vec<&str> = exe.components().map(|c| c.as_str()).collect();
    let count = components.len();
    if count < 2 {
        return None;
    }

    for i in (0..count - 1).rev() {
        if components[i].eq_ignore_ascii_case("steamapps")
            && components[i + 1].eq_ignore_ascii_case("common")
        {
            return exe.ancestors().nth(count - i - 1).map(Utf8Path::to_path_buf);
        }
    }

    None
}

/// `<steamapps>/workshop/content/252950`
pub fn workshop_content_dir(steamapps: &Utf8Path) -> Utf8PathBuf {
    steamapps
        .join("workshop")
        .join("content")
        .join(ROCKET_LEAGUE_APP_ID)
}

/// Derive the Rocket League workshop folder from the game executable path.
pub fn locate_workshop_dir(exe: &Utf8Path) -> Result<Utf8PathBuf> {
    let steamapps = steamapps_from_executable(exe).ok_or_else(|| Error::SteamappsNotFound {
        executable: Some(exe.to_path_buf()),
    })?;
    tracing::info!("Found steamapps folder at path: {}", steamapps);

    Ok(workshop_content_dir(&steamapps))
}

/// Path of the executable hosting this process.
///
/// Looks the current process up through `sysinfo` first and falls back to
/// [`std::env::current_exe`]. Non UTF-8 paths are treated as not found.
pub fn detect_game_executable() -> Option<Utf8PathBuf> {
    detect_from_running_process().or_else(detect_from_current_exe)
}

fn detect_from_running_process() -> Option<Utf8PathBuf> {
    let pid = sysinfo::get_current_pid().ok()?;
    let system = System::new_all();
    let exe = system.process(pid)?.exe()?;

    Utf8PathBuf::from_path_buf(exe.to_path_buf()).ok()
}

fn detect_from_current_exe() -> Option<Utf8PathBuf> {
    let exe = std::env::current_exe().ok()?;
    Utf8PathBuf::from_path_buf(exe).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_steamapps_from_typical_install() {
        let exe = Utf8Path::new(
            "/games/Steam/steamapps/common/rocketleague/Binaries/Win64/RocketLeague.exe",
        );
        assert_eq!(
            steamapps_from_executable(exe),
            Some(Utf8PathBuf::from("/games/Steam/steamapps"))
        );
    }

    #[test]
    fn test_steamapps_rightmost_pair_wins() {
        let exe = Utf8Path::new(
            "/steamapps/common/backup/steamapps/common/rocketleague/RocketLeague.exe",
        );
        assert_eq!(
            steamapps_from_executable(exe),
            Some(Utf8PathBuf::from("/steamapps/common/backup/steamapps"))
        );
    }

    #[test]
    fn test_steamapps_legacy_casing() {
        let exe = Utf8Path::new("/Steam/SteamApps/common/rocketleague/RocketLeague.exe");
        assert_eq!(
            steamapps_from_executable(exe),
            Some(Utf8PathBuf::from("/Steam/SteamApps"))
        );
    }

    #[test]
    fn test_steamapps_missing() {
        let epic = Utf8Path::new("/Epic Games/rocketleague/Binaries/Win64/RocketLeague.exe");
        assert_eq!(steamapps_from_executable(epic), None);

        // `steamapps` must be directly followed by `common`
        let no_common = Utf8Path::new("/Steam/steamapps/rocketleague/RocketLeague.exe");
        assert_eq!(steamapps_from_executable(no_common), None);

        // Trailing `steamapps` with nothing after it
        assert_eq!(steamapps_from_executable(Utf8Path::new("/Steam/steamapps")), None);
    }

    #[test]
    fn test_locate_workshop_dir() {
        let exe = Utf8Path::new("/Steam/steamapps/common/rocketleague/Binaries/Win64/RocketLeague.exe");
        let dir = locate_workshop_dir(exe).unwrap();
        assert_eq!(dir, Utf8PathBuf::from("/Steam/steamapps/workshop/content/252950"));
    }

    #[test]
    fn test_locate_workshop_dir_error_message() {
        let err = locate_workshop_dir(Utf8Path::new("/opt/rl/RocketLeague.exe")).unwrap_err();
        assert!(matches!(err, Error::SteamappsNotFound { .. }));
        assert_eq!(
            err.to_string(),
            "ERROR! Could not find the steamapps folder from the running RocketLeague.exe path."
        );
    }
}
