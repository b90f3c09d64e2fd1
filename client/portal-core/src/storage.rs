use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Slot holding the serialized [`Session`](crate::models::session::Session).
pub const SESSION_SLOT: &str = "user";

/// Companion flag slot written on login and cleared with the session.
pub const AUTH_FLAG_SLOT: &str = "isAuthenticated";

/// File-backed key-value slots standing in for the console's persisted
/// client storage. One slot per key, stored as `<dir>/<key>.json`.
///
/// Reads never fail: a missing, unreadable or empty slot is simply absent.
/// The authorization gate builds its fail-closed behavior on top of that.
#[derive(Debug, Clone)]
pub struct SessionStore {
    dir: PathBuf,
}

impl SessionStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Raw contents of a slot, or `None` when absent or unreadable.
    pub fn get(&self, key: &str) -> Option<String> {
        let path = self.slot_path(key);
        match fs::read_to_string(&path) {
            Ok(contents) if !contents.trim().is_empty() => Some(contents),
            Ok(_) => None,
            Err(e) if e.kind() == io::ErrorKind::NotFound => None,
            Err(e) => {
                tracing::warn!(slot = key, error = %e, "failed to read storage slot");
                None
            }
        }
    }

    /// Writes a slot through a temp file rename so a torn write cannot leave
    /// a half-written slot behind.
    pub fn set(&self, key: &str, value: &str) -> io::Result<()> {
        fs::create_dir_all(&self.dir)?;
        let path = self.slot_path(key);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    /// Removes a slot. Removing an absent slot is not an error.
    pub fn remove(&self, key: &str) {
        let path = self.slot_path(key);
        if let Err(e) = fs::remove_file(&path) {
            if e.kind() != io::ErrorKind::NotFound {
                tracing::warn!(slot = key, error = %e, "failed to remove storage slot");
            }
        }
    }

    fn slot_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}
