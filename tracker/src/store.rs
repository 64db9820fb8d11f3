//! Persistence seam: string-keyed, JSON-shaped blobs.
//!
//! The store is a best-effort cache of last resort for restarts. Writes are
//! fire-and-forget: a failure is logged and swallowed, never retried, and
//! never rolls back the in-memory session.

use punto_types::SessionSnapshot;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::PathBuf;
use tracing::warn;

/// Storage key for the session snapshot.
pub const STATE_KEY: &str = "baccarat-game-state";

/// Storage key for the dark-mode preference.
pub const DARK_MODE_KEY: &str = "baccarat-dark-mode";

/// Key-value persistence collaborator.
///
/// No atomicity or durability guarantees. A missing or undecodable value
/// reads back as `None`.
pub trait StateStore {
    fn load_flag(&self, key: &str) -> Option<bool>;
    fn save_flag(&mut self, key: &str, value: bool);
    fn load_snapshot(&self, key: &str) -> Option<SessionSnapshot>;
    fn save_snapshot(&mut self, key: &str, snapshot: &SessionSnapshot);
    fn clear(&mut self, key: &str);
}

/// In-memory store for tests and ephemeral runs. Holds the same JSON blobs
/// a persistent store would.
#[derive(Debug, Default)]
pub struct MemoryStore {
    blobs: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw blob access, for inspecting what would hit disk.
    pub fn blob(&self, key: &str) -> Option<&str> {
        self.blobs.get(key).map(String::as_str)
    }
}

impl StateStore for MemoryStore {
    fn load_flag(&self, key: &str) -> Option<bool> {
        self.blobs.get(key).and_then(|blob| blob.parse().ok())
    }

    fn save_flag(&mut self, key: &str, value: bool) {
        self.blobs.insert(key.to_string(), value.to_string());
    }

    fn load_snapshot(&self, key: &str) -> Option<SessionSnapshot> {
        let blob = self.blobs.get(key)?;
        match serde_json::from_str(blob) {
            Ok(snapshot) => Some(snapshot),
            Err(err) => {
                warn!(key, %err, "undecodable snapshot blob");
                None
            }
        }
    }

    fn save_snapshot(&mut self, key: &str, snapshot: &SessionSnapshot) {
        match serde_json::to_string(snapshot) {
            Ok(blob) => {
                self.blobs.insert(key.to_string(), blob);
            }
            Err(err) => warn!(key, %err, "failed to encode snapshot"),
        }
    }

    fn clear(&mut self, key: &str) {
        self.blobs.remove(key);
    }
}

/// File-backed store: one `<key>.json` file per key under a root directory.
#[derive(Debug)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Open a store rooted at `root`, creating the directory if needed.
    pub fn open(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        if let Err(err) = fs::create_dir_all(&root) {
            warn!(root = %root.display(), %err, "failed to create store directory");
        }
        Self { root }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }

    fn read(&self, key: &str) -> Option<String> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(blob) => Some(blob),
            Err(err) if err.kind() == io::ErrorKind::NotFound => None,
            Err(err) => {
                warn!(key, %err, "failed to read store file");
                None
            }
        }
    }

    fn write(&self, key: &str, blob: &str) {
        if let Err(err) = fs::write(self.path_for(key), blob) {
            warn!(key, %err, "failed to write store file");
        }
    }
}

impl StateStore for FileStore {
    fn load_flag(&self, key: &str) -> Option<bool> {
        let blob = self.read(key)?;
        match blob.trim().parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(key, "undecodable flag blob");
                None
            }
        }
    }

    fn save_flag(&mut self, key: &str, value: bool) {
        self.write(key, if value { "true" } else { "false" });
    }

    fn load_snapshot(&self, key: &str) -> Option<SessionSnapshot> {
        let blob = self.read(key)?;
        match serde_json::from_str(&blob) {
            Ok(snapshot) => Some(snapshot),
            Err(err) => {
                warn!(key, %err, "undecodable snapshot blob");
                None
            }
        }
    }

    fn save_snapshot(&mut self, key: &str, snapshot: &SessionSnapshot) {
        match serde_json::to_string(snapshot) {
            Ok(blob) => self.write(key, &blob),
            Err(err) => warn!(key, %err, "failed to encode snapshot"),
        }
    }

    fn clear(&mut self, key: &str) {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => {}
            Err(err) if err.kind() == io::ErrorKind::NotFound => {}
            Err(err) => warn!(key, %err, "failed to remove store file"),
        }
    }
}
