//! Durable lock journal
//!
//! Append-only record file holding every lock acquire and release, with no
//! in-place updates. Current lock state is rebuilt by replaying the journal
//! on open; latest record wins per version id.
//!
//! Record framing:
//!
//! ```text
//! +------------------+
//! | Payload Length   | (u32 LE)
//! +------------------+
//! | Payload          | (JSON-encoded record)
//! +------------------+
//! | Checksum         | (u32 LE, crc32 of payload)
//! +------------------+
//! ```
//!
//! Checksum mismatch is corruption and halts the open; the journal is not
//! trusted past the damaged record. Every append is fsynced before the
//! in-memory state is updated.

use std::collections::HashMap;
use std::fs::{self, File, OpenOptions};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::errors::{JournalError, LockError, LockResult};
use super::record::VersionLock;
use super::store::LockStore;

const JOURNAL_FILE: &str = "locks.journal";

/// One journal entry: a lock acquire or release.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
enum JournalRecord {
    Acquire {
        version_id: Uuid,
        created_by: Uuid,
        created: DateTime<Utc>,
    },
    Release {
        version_id: Uuid,
    },
}

#[derive(Debug)]
struct JournalInner {
    file: File,
    locks: HashMap<Uuid, VersionLock>,
}

/// Lock store persisted as an append-only journal.
#[derive(Debug)]
pub struct JournalLockStore {
    path: PathBuf,
    inner: Mutex<JournalInner>,
}

impl JournalLockStore {
    /// Open or create `<data_dir>/locks.journal` and replay it.
    pub fn open(data_dir: &Path) -> Result<Self, JournalError> {
        if !data_dir.exists() {
            fs::create_dir_all(data_dir).map_err(|e| JournalError::Open {
                path: data_dir.to_path_buf(),
                source: e,
            })?;
        }

        let path = data_dir.join(JOURNAL_FILE);
        let mut file = OpenOptions::new()
            .create(true)
            .read(true)
            .append(true)
            .open(&path)
            .map_err(|e| JournalError::Open {
                path: path.clone(),
                source: e,
            })?;

        let locks = Self::replay(&mut file)?;

        Ok(Self {
            path,
            inner: Mutex::new(JournalInner { file, locks }),
        })
    }

    /// Path to the journal file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of currently held locks.
    pub fn len(&self) -> LockResult<usize> {
        let inner = self.lock_inner()?;
        Ok(inner.locks.len())
    }

    /// Returns true if no locks are currently held.
    pub fn is_empty(&self) -> LockResult<bool> {
        Ok(self.len()? == 0)
    }

    fn lock_inner(&self) -> LockResult<std::sync::MutexGuard<'_, JournalInner>> {
        self.inner
            .lock()
            .map_err(|_| LockError::Store("Lock poisoned".to_string()))
    }

    /// Replay all records into a lock map. Latest record wins.
    fn replay(file: &mut File) -> Result<HashMap<Uuid, VersionLock>, JournalError> {
        let mut bytes = Vec::new();
        file.read_to_end(&mut bytes).map_err(JournalError::Read)?;

        let mut locks = HashMap::new();
        let mut offset: usize = 0;
        let total = bytes.len();

        while offset < total {
            if offset + 4 > total {
                return Err(JournalError::Truncated {
                    offset: offset as u64,
                });
            }
            let len_bytes: [u8; 4] = bytes[offset..offset + 4]
                .try_into()
                .map_err(|_| JournalError::Truncated {
                    offset: offset as u64,
                })?;
            let len = u32::from_le_bytes(len_bytes) as usize;

            let payload_start = offset + 4;
            let checksum_start = payload_start + len;
            if checksum_start + 4 > total {
                return Err(JournalError::Truncated {
                    offset: offset as u64,
                });
            }

            let payload = &bytes[payload_start..checksum_start];
            let stored_bytes: [u8; 4] = bytes[checksum_start..checksum_start + 4]
                .try_into()
                .map_err(|_| JournalError::Truncated {
                    offset: offset as u64,
                })?;
            let stored = u32::from_le_bytes(stored_bytes);
            if crc32fast::hash(payload) != stored {
                return Err(JournalError::ChecksumMismatch {
                    offset: offset as u64,
                });
            }

            let record: JournalRecord =
                serde_json::from_slice(payload).map_err(|e| JournalError::Decode {
                    offset: offset as u64,
                    source: e,
                })?;
            match record {
                JournalRecord::Acquire {
                    version_id,
                    created_by,
                    created,
                } => {
                    locks.insert(
                        version_id,
                        VersionLock {
                            version_id,
                            created_by,
                            created,
                        },
                    );
                }
                JournalRecord::Release { version_id } => {
                    locks.remove(&version_id);
                }
            }

            offset = checksum_start + 4;
        }

        Ok(locks)
    }

    /// Append one record and fsync before returning.
    fn append(inner: &mut JournalInner, record: &JournalRecord) -> Result<(), JournalError> {
        let payload = serde_json::to_vec(record).map_err(JournalError::Encode)?;
        let checksum = crc32fast::hash(&payload);

        let mut framed = Vec::with_capacity(payload.len() + 8);
        framed.extend_from_slice(&(payload.len() as u32).to_le_bytes());
        framed.extend_from_slice(&payload);
        framed.extend_from_slice(&checksum.to_le_bytes());

        inner.file.write_all(&framed).map_err(JournalError::Write)?;
        inner.file.sync_data().map_err(JournalError::Write)?;
        Ok(())
    }
}

impl LockStore for JournalLockStore {
    fn create(&self, version_id: Uuid, created_by: Uuid) -> LockResult<VersionLock> {
        let mut inner = self.lock_inner()?;
        if inner.locks.contains_key(&version_id) {
            return Err(LockError::Conflict);
        }

        let lock = VersionLock::new(version_id, created_by);
        Self::append(
            &mut inner,
            &JournalRecord::Acquire {
                version_id,
                created_by,
                created: lock.created,
            },
        )?;
        inner.locks.insert(version_id, lock.clone());
        Ok(lock)
    }

    fn remove(&self, version_id: Uuid) -> LockResult<Option<VersionLock>> {
        let mut inner = self.lock_inner()?;
        if !inner.locks.contains_key(&version_id) {
            return Ok(None);
        }

        Self::append(&mut inner, &JournalRecord::Release { version_id })?;
        Ok(inner.locks.remove(&version_id))
    }

    fn get(&self, version_id: Uuid) -> LockResult<Option<VersionLock>> {
        let inner = self.lock_inner()?;
        Ok(inner.locks.get(&version_id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_creates_empty_journal() {
        let dir = tempfile::tempdir().unwrap();
        let store = JournalLockStore::open(dir.path()).unwrap();
        assert!(store.is_empty().unwrap());
        assert!(store.path().exists());
    }

    #[test]
    fn test_create_is_visible_and_unique() {
        let dir = tempfile::tempdir().unwrap();
        let store = JournalLockStore::open(dir.path()).unwrap();
        let version_id = Uuid::new_v4();

        store.create(version_id, Uuid::new_v4()).unwrap();
        assert!(store.get(version_id).unwrap().is_some());
        assert!(matches!(
            store.create(version_id, Uuid::new_v4()),
            Err(LockError::Conflict)
        ));
    }

    #[test]
    fn test_release_record_wins_on_replay() {
        let dir = tempfile::tempdir().unwrap();
        let version_id = Uuid::new_v4();

        {
            let store = JournalLockStore::open(dir.path()).unwrap();
            store.create(version_id, Uuid::new_v4()).unwrap();
            store.remove(version_id).unwrap();
        }

        let reopened = JournalLockStore::open(dir.path()).unwrap();
        assert!(reopened.get(version_id).unwrap().is_none());
        assert!(reopened.is_empty().unwrap());
    }
}
