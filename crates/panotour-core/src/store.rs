//! Durable key/value persistence seam.
//!
//! The tour map definition, the progress snapshot, and the project registry
//! are each one durable entry under a well-known key. Durability is
//! best-effort: callers treat a failed write as a lost nicety, never as a
//! session failure, and a missing or unreadable entry as "start fresh".

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Key for the hierarchical tour map definition.
pub const MAP_KEY: &str = "360:map";
/// Key for the persisted progress snapshot.
pub const PROGRESS_KEY: &str = "360:progress";
/// Key for the project registry.
pub const PROJECTS_KEY: &str = "360:projects";

/// Errors a gateway write can report. Callers swallow these (best-effort
/// durability), at most logging them.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// An I/O error occurred.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Durable key/value store for serialized entries.
pub trait StorageGateway {
    /// Persist `value` under `key`, replacing any previous entry.
    fn save(&mut self, key: &str, value: &str) -> Result<(), GatewayError>;

    /// Read the entry under `key`. Missing entries are `None`; so are
    /// unreadable ones, since the caller falls back to fresh state either
    /// way.
    fn load(&self, key: &str) -> Option<String>;
}

/// A mutable borrow works as a gateway, so one store can outlive the
/// sessions that write through it.
impl<G: StorageGateway + ?Sized> StorageGateway for &mut G {
    fn save(&mut self, key: &str, value: &str) -> Result<(), GatewayError> {
        (**self).save(key, value)
    }

    fn load(&self, key: &str) -> Option<String> {
        (**self).load(key)
    }
}

// ---------------------------------------------------------------------------
// In-memory gateway
// ---------------------------------------------------------------------------

/// Volatile gateway for tests and single-session embedding.
#[derive(Debug, Default)]
pub struct MemoryGateway {
    entries: HashMap<String, String>,
}

impl MemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageGateway for MemoryGateway {
    fn save(&mut self, key: &str, value: &str) -> Result<(), GatewayError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn load(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }
}

// ---------------------------------------------------------------------------
// File-backed gateway
// ---------------------------------------------------------------------------

/// One file per key under a root directory. Key characters outside
/// `[A-Za-z0-9_-]` are mapped to `_` for the file name.
#[derive(Debug)]
pub struct FileGateway {
    root: PathBuf,
}

impl FileGateway {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        FileGateway { root: root.into() }
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        let name: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        self.root.join(format!("{name}.json"))
    }
}

impl StorageGateway for FileGateway {
    fn save(&mut self, key: &str, value: &str) -> Result<(), GatewayError> {
        fs::create_dir_all(&self.root)?;
        fs::write(self.entry_path(key), value)?;
        Ok(())
    }

    fn load(&self, key: &str) -> Option<String> {
        read_entry(&self.entry_path(key))
    }
}

fn read_entry(path: &Path) -> Option<String> {
    match fs::read_to_string(path) {
        Ok(value) => Some(value),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
        Err(e) => {
            log::debug!("unreadable entry {}: {e}", path.display());
            None
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_gateway_round_trip() {
        let mut gw = MemoryGateway::new();
        assert_eq!(gw.load(PROGRESS_KEY), None);
        gw.save(PROGRESS_KEY, "{}").unwrap();
        assert_eq!(gw.load(PROGRESS_KEY).as_deref(), Some("{}"));
        gw.save(PROGRESS_KEY, "{\"a\":1}").unwrap();
        assert_eq!(gw.load(PROGRESS_KEY).as_deref(), Some("{\"a\":1}"));
    }

    #[test]
    fn file_gateway_round_trip() {
        let dir = std::env::temp_dir().join(format!("panotour-store-{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);

        let mut gw = FileGateway::new(&dir);
        assert_eq!(gw.load(MAP_KEY), None);
        gw.save(MAP_KEY, "{\"nodes\":{}}").unwrap();
        assert_eq!(gw.load(MAP_KEY).as_deref(), Some("{\"nodes\":{}}"));

        // Keys with separators map to distinct sanitized files.
        gw.save(PROGRESS_KEY, "p").unwrap();
        assert_eq!(gw.load(PROGRESS_KEY).as_deref(), Some("p"));
        assert_eq!(gw.load(MAP_KEY).as_deref(), Some("{\"nodes\":{}}"));

        let _ = fs::remove_dir_all(&dir);
    }
}
