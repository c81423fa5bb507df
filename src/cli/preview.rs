//! Detached sound preview.
//!
//! During customization the user can audition sounds. Playback runs as a
//! detached child process; starting a new preview kills the previous one
//! (last-preview-wins, no queueing), and whatever is playing is killed
//! when the player is dropped.

use std::path::Path;
use std::process::{Child, Command, Stdio};

/// Spawns and replaces detached audio playback processes.
pub struct PreviewPlayer {
    player: &'static str,
    child: Option<Child>,
}

impl PreviewPlayer {
    /// Preview via `afplay` (the required audio player).
    pub fn new() -> Self {
        Self::with_player("afplay")
    }

    /// Preview via an arbitrary binary. Used by tests.
    pub fn with_player(player: &'static str) -> Self {
        Self {
            player,
            child: None,
        }
    }

    /// Play `path`, killing any preview still running. Nonexistent paths
    /// and spawn failures are ignored — preview is best-effort.
    pub fn play(&mut self, path: &Path) {
        self.stop();
        if !path.exists() {
            return;
        }
        self.child = Command::new(self.player)
            .arg(path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .ok();
    }

    /// Kill the current preview, if any. Idempotent.
    pub fn stop(&mut self) {
        if let Some(mut child) = self.child.take() {
            let _ = child.kill();
            let _ = child.wait();
        }
    }

    /// True while a spawned preview hasn't been stopped or replaced.
    pub fn is_active(&self) -> bool {
        self.child.is_some()
    }
}

impl Default for PreviewPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for PreviewPlayer {
    fn drop(&mut self) {
        self.stop();
    }
}
