//! Install state — the `.installed.json` record, the mute/DND marker
//! files, and existing-install detection.

pub mod detect;
pub mod markers;
pub mod store;

pub use detect::{detect_existing_install, ExistingInstall};
pub use markers::{is_dnd, is_muted, set_dnd, set_muted, DND_DEFAULTS};
pub use store::{read_install_state, write_install_state, InstallMode, InstallState};
