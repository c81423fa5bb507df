//! Mute and do-not-disturb marker files.
//!
//! Playback suppression is signalled by presence files inside the sounds
//! directory, so the playback script can check them without parsing JSON.
//! `.muted` is empty; `.dnd` carries the process watchlist, one name per
//! line — while any listed process is running, playback stays silent.

use std::fs;

use crate::error::Result;
use crate::paths::Paths;

/// Processes whose presence means "in a meeting" — playback is suppressed
/// while any of them runs. CptHost is Zoom's capture host.
pub const DND_DEFAULTS: &[&str] = &[
    "CptHost",
    "zoom.us",
    "FaceTime",
    "Microsoft Teams",
    "Webex",
];

/// True when the mute marker exists.
pub fn is_muted(paths: &Paths) -> bool {
    paths.mute_marker().exists()
}

/// Create or remove the mute marker. Idempotent in both directions.
pub fn set_muted(muted: bool, paths: &Paths) -> Result<()> {
    let marker = paths.mute_marker();
    if muted {
        fs::create_dir_all(&paths.sounds_dir)?;
        fs::write(&marker, "")?;
    } else if marker.exists() {
        fs::remove_file(&marker)?;
    }
    Ok(())
}

/// True when the DND marker exists.
pub fn is_dnd(paths: &Paths) -> bool {
    paths.dnd_marker().exists()
}

/// Create or remove the DND marker. Enabling writes the default process
/// watchlist; disabling when already disabled is a no-op.
pub fn set_dnd(enabled: bool, paths: &Paths) -> Result<()> {
    let marker = paths.dnd_marker();
    if enabled {
        fs::create_dir_all(&paths.sounds_dir)?;
        fs::write(&marker, format!("{}\n", DND_DEFAULTS.join("\n")))?;
    } else if marker.exists() {
        fs::remove_file(&marker)?;
    }
    Ok(())
}
