//! Per-device session state kept in a [`KeyValueStore`].

use crate::config::DEFAULT_LETTERS;
use crate::storage::{KeyValueStore, StorageResult};
use uuid::Uuid;

/// Key under which the rack is stored, as a JSON array with one entry per
/// slot and `null` for an empty slot.
pub const RACK_KEY: &str = "wheeltileRack";
/// Key under which the device identity is stored.
pub const IDENTITY_KEY: &str = "device_identity";

/// Remembers the rack and the device identity between runs.
pub struct SessionStore<S> {
    storage: S,
}

impl<S: KeyValueStore> SessionStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Stored rack slots, or the default `A..G` when nothing usable is
    /// stored.
    pub fn load_rack(&self) -> Vec<Option<char>> {
        match self.storage.get_json::<Vec<Option<char>>>(RACK_KEY) {
            Ok(Some(slots)) => {
                log::debug!("Loaded rack from storage: {:?}", slots);
                slots
            }
            Ok(None) => default_rack(),
            Err(e) => {
                log::warn!("Ignoring stored rack: {}", e);
                default_rack()
            }
        }
    }

    pub fn save_rack(&self, slots: &[Option<char>]) -> StorageResult<()> {
        self.storage.set_json(RACK_KEY, slots)
    }

    /// The device identity, created and stored on first use.
    pub fn device_identity(&self) -> StorageResult<Uuid> {
        if let Some(stored) = self.storage.get(IDENTITY_KEY)? {
            match Uuid::parse_str(stored.trim()) {
                Ok(id) => return Ok(id),
                Err(e) => log::warn!("Replacing malformed device identity: {}", e),
            }
        }
        let id = Uuid::new_v4();
        self.storage.set(IDENTITY_KEY, &id.to_string())?;
        log::info!("Created device identity {}", id);
        Ok(id)
    }

    /// Delete the stored identity so the next call creates a new one.
    pub fn forget_identity(&self) -> StorageResult<()> {
        self.storage.remove(IDENTITY_KEY)
    }
}

fn default_rack() -> Vec<Option<char>> {
    DEFAULT_LETTERS.iter().copied().map(Some).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    #[test]
    fn test_rack_defaults_when_missing() {
        let session = SessionStore::new(MemoryStorage::new());
        let letters: Vec<char> = session.load_rack().into_iter().flatten().collect();
        assert_eq!(letters, vec!['A', 'B', 'C', 'D', 'E', 'F', 'G']);
    }

    #[test]
    fn test_rack_keeps_empty_slots() {
        let session = SessionStore::new(MemoryStorage::new());
        session.save_rack(&[Some('Q'), None, Some('I')]).unwrap();
        assert_eq!(
            session.storage().get(RACK_KEY).unwrap().as_deref(),
            Some("[\"Q\",null,\"I\"]")
        );
        assert_eq!(session.load_rack(), vec![Some('Q'), None, Some('I')]);
    }

    #[test]
    fn test_rack_reads_plain_letter_array() {
        let storage = MemoryStorage::new();
        storage.set(RACK_KEY, "[\"Q\",\"I\"]").unwrap();
        let session = SessionStore::new(storage);
        assert_eq!(session.load_rack(), vec![Some('Q'), Some('I')]);
    }

    #[test]
    fn test_corrupt_rack_falls_back() {
        let storage = MemoryStorage::new();
        storage.set(RACK_KEY, "{broken").unwrap();
        let session = SessionStore::new(storage);
        assert_eq!(session.load_rack(), default_rack());
    }

    #[test]
    fn test_identity_is_stable() {
        let session = SessionStore::new(MemoryStorage::new());
        let first = session.device_identity().unwrap();
        let second = session.device_identity().unwrap();
        assert_eq!(first, second);

        session.forget_identity().unwrap();
        assert_ne!(session.device_identity().unwrap(), first);
    }

    #[test]
    fn test_malformed_identity_replaced() {
        let storage = MemoryStorage::new();
        storage.set(IDENTITY_KEY, "not-a-uuid").unwrap();
        let session = SessionStore::new(storage);

        let id = session.device_identity().unwrap();
        assert_eq!(
            session.storage().get(IDENTITY_KEY).unwrap(),
            Some(id.to_string())
        );
    }
}
