use crate::error::Result;
use std::path::PathBuf;

/// Abstract interface for raw storage I/O.
///
/// Modeled on a browser's local storage: string values under string keys.
/// This trait handles the "how" of storage (filesystem vs memory), while
/// `EntityStore` handles the "what" (tables, merging, queries).
pub trait StorageBackend {
    /// Read the value stored under `key`.
    /// Returns Ok(None) if nothing is stored there.
    fn read(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value stored under `key`.
    /// MUST be atomic so a crash never leaves a half-written snapshot.
    fn write(&self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<()>;

    /// Where `key` lives. For FsBackend a real path, for MemBackend a virtual one.
    fn location(&self, key: &str) -> PathBuf;
}
