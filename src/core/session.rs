//! # Session Identifier
//!
//! A stable per-installation identifier attributing submitted queries to a
//! user, mirroring the web front end's persisted session id. Generated as a
//! uuid on first run and stored at `~/.solaris/session_id`.
//!
//! The id is read once at startup and injected into `App`; nothing else in
//! the codebase touches this file.

use std::fs;
use std::path::{Path, PathBuf};

use log::{info, warn};

/// Returns the path to `~/.solaris/session_id`.
pub fn session_id_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".solaris").join("session_id"))
}

/// Loads the persisted session id, creating a fresh uuid on first run.
///
/// Falls back to an unpersisted uuid if the home directory is unavailable
/// or the file can't be written — the app still works, the id just won't
/// be stable across runs.
pub fn load_or_create_session_id() -> String {
    match session_id_path() {
        Some(path) => load_or_create_at(&path),
        None => {
            warn!("Could not determine home directory, using ephemeral session id");
            uuid::Uuid::new_v4().to_string()
        }
    }
}

/// Same as [`load_or_create_session_id`] with an explicit path, so tests
/// don't touch the real home directory.
pub fn load_or_create_at(path: &Path) -> String {
    if let Ok(contents) = fs::read_to_string(path) {
        let id = contents.trim();
        if !id.is_empty() {
            return id.to_string();
        }
    }

    let id = uuid::Uuid::new_v4().to_string();
    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create session directory: {}", e);
            return id;
        }
    }
    match fs::write(path, &id) {
        Ok(()) => info!("Created session id at {}", path.display()),
        Err(e) => warn!("Failed to persist session id: {}", e),
    }
    id
}
