use crate::errors::StorageError;
use std::{
    collections::{BTreeMap, HashMap},
    fs, io,
    path::{Path, PathBuf},
    sync::{
        Mutex,
        atomic::{AtomicBool, Ordering},
    },
};

/// String-valued key/value storage with local-storage semantics: one value per
/// key, whole-value reads and writes.
pub trait KeyValueStorage: Send + Sync + 'static {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Keeps every key in a single JSON object on disk. A missing file reads as an
/// empty storage.
pub struct FileStorage {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> Result<BTreeMap<String, String>, StorageError> {
        match fs::read(&self.path) {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(err) => Err(err.into()),
        }
    }
}

impl KeyValueStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let _guard = self.lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        Ok(self.read_entries()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let _guard = self.lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        // A corrupt file is replaced rather than blocking every later write.
        let mut entries = match self.read_entries() {
            Ok(entries) => entries,
            Err(StorageError::Serialization(_)) => BTreeMap::new(),
            Err(err) => return Err(err),
        };
        entries.insert(key.to_string(), value.to_string());
        let payload = serde_json::to_vec_pretty(&entries)?;

        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, payload)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

/// In-process storage. Reads and writes can be made to fail on demand.
#[derive(Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StorageError::Unavailable("reads disabled".into()));
        }
        Ok(lock(&self.entries).get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::Unavailable("quota exceeded".into()));
        }
        lock(&self.entries).insert(key.to_string(), value.to_string());
        Ok(())
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_storage_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("absent.json"));
        assert_eq!(storage.get("habit-tracker:data").unwrap(), None);
    }

    #[test]
    fn file_storage_keeps_keys_independent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        let storage = FileStorage::new(&path);
        storage.set("a", "[1]").unwrap();
        storage.set("b", "\"two\"").unwrap();
        storage.set("a", "[]").unwrap();

        let reopened = FileStorage::new(&path);
        assert_eq!(reopened.get("a").unwrap().as_deref(), Some("[]"));
        assert_eq!(reopened.get("b").unwrap().as_deref(), Some("\"two\""));
        assert!(!path.with_extension("tmp").exists());
    }

    #[test]
    fn file_storage_reports_corrupt_file_and_recovers_on_write() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        fs::write(&path, b"{not json").unwrap();
        let storage = FileStorage::new(&path);

        assert!(matches!(
            storage.get("a"),
            Err(StorageError::Serialization(_))
        ));

        storage.set("a", "ok").unwrap();
        assert_eq!(storage.get("a").unwrap().as_deref(), Some("ok"));
    }

    #[test]
    fn file_storage_write_fails_when_existing_file_is_unreadable() {
        let dir = tempfile::tempdir().unwrap();
        // A directory in place of the file cannot be read as entries.
        let path = dir.path().join("store.json");
        fs::create_dir(&path).unwrap();
        let storage = FileStorage::new(&path);

        assert!(matches!(storage.set("a", "ok"), Err(StorageError::Io(_))));
        assert!(!path.with_extension("tmp").exists());
        assert!(path.is_dir());
    }

    #[test]
    fn memory_storage_failure_switches() {
        let storage = MemoryStorage::new();
        storage.set("k", "v").unwrap();

        storage.fail_reads(true);
        assert!(storage.get("k").is_err());
        storage.fail_reads(false);
        assert_eq!(storage.get("k").unwrap().as_deref(), Some("v"));

        storage.fail_writes(true);
        assert!(storage.set("k", "w").is_err());
        assert_eq!(storage.get("k").unwrap().as_deref(), Some("v"));
    }
}
