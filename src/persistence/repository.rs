use super::files::{atomic_write, read_file};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::marker::PhantomData;
use std::path::PathBuf;
use thiserror::Error;

/// Schema version written into every snapshot envelope
pub const SCHEMA_VERSION: u32 = 1;

/// Failure taxonomy for snapshot load/save
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    #[error("malformed snapshot in {path}: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("unsupported snapshot version {found} in {path} (expected {expected})")]
    UnsupportedVersion {
        path: PathBuf,
        found: u32,
        expected: u32,
    },
}

/// Versioned envelope wrapped around every persisted snapshot
#[derive(Debug, Serialize, Deserialize)]
struct Versioned<T> {
    version: u32,
    data: T,
}

/// Load/save boundary for a store's snapshot.
///
/// Stores call `save` after every mutation, fire-and-forget; a `load`
/// failure of any kind means the store starts from its defaults.
pub trait Repository<T> {
    /// Load the snapshot; Ok(None) means nothing has been saved yet
    fn load(&self) -> Result<Option<T>, RepositoryError>;

    /// Persist the snapshot
    fn save(&self, snapshot: &T) -> Result<(), RepositoryError>;
}

/// JSON file repository using atomic writes
pub struct JsonRepository<T> {
    path: PathBuf,
    _marker: PhantomData<T>,
}

impl<T> JsonRepository<T> {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            _marker: PhantomData,
        }
    }
}

impl<T> Repository<T> for JsonRepository<T>
where
    T: Serialize + DeserializeOwned,
{
    fn load(&self) -> Result<Option<T>, RepositoryError> {
        let content = read_file(&self.path).map_err(|source| RepositoryError::Io {
            path: self.path.clone(),
            source: source.into(),
        })?;
        if content.is_empty() {
            return Ok(None);
        }

        let envelope: Versioned<T> =
            serde_json::from_str(&content).map_err(|source| RepositoryError::Malformed {
                path: self.path.clone(),
                source,
            })?;

        if envelope.version != SCHEMA_VERSION {
            return Err(RepositoryError::UnsupportedVersion {
                path: self.path.clone(),
                found: envelope.version,
                expected: SCHEMA_VERSION,
            });
        }

        Ok(Some(envelope.data))
    }

    fn save(&self, snapshot: &T) -> Result<(), RepositoryError> {
        let envelope = Versioned {
            version: SCHEMA_VERSION,
            data: snapshot,
        };
        let json =
            serde_json::to_string_pretty(&envelope).map_err(|source| RepositoryError::Malformed {
                path: self.path.clone(),
                source,
            })?;
        atomic_write(&self.path, &json).map_err(|source| RepositoryError::Io {
            path: self.path.clone(),
            source: source.into(),
        })
    }
}

/// In-memory repository for tests and ephemeral runs
#[derive(Default)]
pub struct MemoryRepository<T> {
    snapshot: RefCell<Option<T>>,
}

impl<T> MemoryRepository<T> {
    pub fn new() -> Self {
        Self {
            snapshot: RefCell::new(None),
        }
    }
}

impl<T: Clone> Repository<T> for MemoryRepository<T> {
    fn load(&self) -> Result<Option<T>, RepositoryError> {
        Ok(self.snapshot.borrow().clone())
    }

    fn save(&self, snapshot: &T) -> Result<(), RepositoryError> {
        *self.snapshot.borrow_mut() = Some(snapshot.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Task;
    use std::collections::BTreeMap;

    #[test]
    fn test_load_missing_file_is_none() {
        let temp_dir = tempfile::tempdir().unwrap();
        let repo: JsonRepository<Vec<Task>> =
            JsonRepository::new(temp_dir.path().join("tasks.json"));

        assert!(repo.load().unwrap().is_none());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let temp_dir = tempfile::tempdir().unwrap();
        let repo: JsonRepository<Vec<Task>> =
            JsonRepository::new(temp_dir.path().join("tasks.json"));

        let tasks = vec![Task::new("Persist me".to_string(), 30)];
        repo.save(&tasks).unwrap();

        let loaded = repo.load().unwrap().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].title, "Persist me");
        assert_eq!(loaded[0].id, tasks[0].id);
    }

    #[test]
    fn test_envelope_carries_version() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("checkins.json");
        let repo: JsonRepository<BTreeMap<String, u64>> = JsonRepository::new(path.clone());

        let mut days = BTreeMap::new();
        days.insert("2024-01-15".to_string(), 3600);
        repo.save(&days).unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["version"], SCHEMA_VERSION);
        assert_eq!(value["data"]["2024-01-15"], 3600);
    }

    #[test]
    fn test_unsupported_version_is_rejected() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("tasks.json");
        std::fs::write(&path, r#"{"version": 99, "data": []}"#).unwrap();

        let repo: JsonRepository<Vec<Task>> = JsonRepository::new(path);
        match repo.load() {
            Err(RepositoryError::UnsupportedVersion { found, expected, .. }) => {
                assert_eq!(found, 99);
                assert_eq!(expected, SCHEMA_VERSION);
            }
            other => panic!("expected UnsupportedVersion, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_malformed_snapshot_is_rejected() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("tasks.json");
        std::fs::write(&path, "not json at all").unwrap();

        let repo: JsonRepository<Vec<Task>> = JsonRepository::new(path);
        assert!(matches!(repo.load(), Err(RepositoryError::Malformed { .. })));
    }

    #[test]
    fn test_memory_repository() {
        let repo: MemoryRepository<Vec<u32>> = MemoryRepository::new();
        assert!(repo.load().unwrap().is_none());

        repo.save(&vec![1, 2, 3]).unwrap();
        assert_eq!(repo.load().unwrap().unwrap(), vec![1, 2, 3]);
    }
}
