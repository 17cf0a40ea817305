use std::sync::Arc;

use storage::repository::KeyValueStore;
use tracing::{info, warn};
use tracker_core::model::{ProgressRecord, TopicId, TopicKey, UnitId};

use crate::error::{ExportError, ImportError};
use crate::persistence::{Persistence, Stored};

/// Key under which the encoded `ProgressRecord` is kept.
pub const PROGRESS_KEY: &str = "dataMiningProgress";

/// File name offered for progress exports.
pub const EXPORT_FILE_NAME: &str = "data_mining_progress.json";

/// Loads, saves, imports and exports the single persisted `ProgressRecord`.
#[derive(Clone)]
pub struct ProgressStore {
    kv: Arc<dyn KeyValueStore>,
}

impl ProgressStore {
    #[must_use]
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self { kv }
    }

    /// Read the persisted record.
    ///
    /// Never fails: a missing entry, unparseable data, or an unreachable
    /// backend all yield an empty record. Only the last one is reported as
    /// `InMemoryOnly`.
    pub async fn load(&self) -> Stored<ProgressRecord> {
        let raw = match self.kv.get(PROGRESS_KEY).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return Stored::new(ProgressRecord::new(), Persistence::Persisted),
            Err(err) => {
                warn!(error = %err, "progress storage unavailable, starting empty");
                return Stored::new(ProgressRecord::new(), Persistence::InMemoryOnly);
            }
        };

        let record = ProgressRecord::from_json_bytes(raw.as_bytes()).unwrap_or_else(|err| {
            warn!(error = %err, "discarding malformed persisted progress");
            ProgressRecord::new()
        });
        Stored::new(record, Persistence::Persisted)
    }

    /// Persist the full record, replacing whatever was stored.
    pub async fn save(&self, record: &ProgressRecord) -> Persistence {
        let encoded = match record.to_json() {
            Ok(encoded) => encoded,
            Err(err) => {
                warn!(error = %err, "could not encode progress record");
                return Persistence::InMemoryOnly;
            }
        };

        match self.kv.set(PROGRESS_KEY, &encoded).await {
            Ok(()) => Persistence::Persisted,
            Err(err) => {
                warn!(error = %err, "progress not persisted, keeping it in memory");
                Persistence::InMemoryOnly
            }
        }
    }

    /// Returns `record` with the topic's completion set.
    #[must_use]
    pub fn set_topic(
        record: ProgressRecord,
        unit_id: &UnitId,
        topic_id: &TopicId,
        completed: bool,
    ) -> ProgressRecord {
        record.with_topic(&TopicKey::new(unit_id, topic_id), completed)
    }

    /// Clear persisted progress and return an empty record.
    pub async fn reset(&self) -> Stored<ProgressRecord> {
        let persistence = match self.kv.remove(PROGRESS_KEY).await {
            Ok(()) => {
                info!("progress reset");
                Persistence::Persisted
            }
            Err(err) => {
                warn!(error = %err, "could not clear persisted progress");
                Persistence::InMemoryOnly
            }
        };
        Stored::new(ProgressRecord::new(), persistence)
    }

    /// Encode `record` for download, in the same format as persisted state.
    ///
    /// # Errors
    ///
    /// Returns `ExportError` if the record cannot be encoded.
    pub fn export(&self, record: &ProgressRecord) -> Result<Vec<u8>, ExportError> {
        Ok(record.to_json_pretty()?.into_bytes())
    }

    /// Decode an import without touching storage.
    ///
    /// # Errors
    ///
    /// Returns `ImportError::MalformedInput` unless `bytes` hold a flat JSON
    /// object of string keys to booleans.
    pub fn decode(bytes: &[u8]) -> Result<ProgressRecord, ImportError> {
        Ok(ProgressRecord::from_json_bytes(bytes)?)
    }

    /// Replace the stored record with the one decoded from `bytes`.
    ///
    /// This is a full replace: topics missing from the import end up
    /// incomplete.
    ///
    /// # Errors
    ///
    /// Returns `ImportError::MalformedInput` if decoding fails; storage is left
    /// untouched in that case.
    pub async fn import(&self, bytes: &[u8]) -> Result<Stored<ProgressRecord>, ImportError> {
        let record = Self::decode(bytes)?;
        let persistence = self.save(&record).await;
        info!(entries = record.len(), "progress imported");
        Ok(Stored::new(record, persistence))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use storage::repository::{InMemoryRepository, StorageError};

    struct UnavailableStore;

    #[async_trait]
    impl KeyValueStore for UnavailableStore {
        async fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Unavailable("disk gone".to_string()))
        }

        async fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable("disk gone".to_string()))
        }

        async fn remove(&self, _key: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable("disk gone".to_string()))
        }
    }

    fn ids(unit: &str, topic: &str) -> (UnitId, TopicId) {
        (UnitId::new(unit).unwrap(), TopicId::new(topic).unwrap())
    }

    fn store() -> (ProgressStore, InMemoryRepository) {
        let repo = InMemoryRepository::new();
        (ProgressStore::new(Arc::new(repo.clone())), repo)
    }

    #[tokio::test]
    async fn load_without_state_is_empty() {
        let (store, _) = store();
        assert!(store.load().await.value.is_empty());
    }

    #[tokio::test]
    async fn save_then_load_roundtrips() {
        let (store, repo) = store();
        let (u, t) = ids("unit1", "topic2");
        let record = ProgressStore::set_topic(ProgressRecord::new(), &u, &t, true);

        assert_eq!(store.save(&record).await, Persistence::Persisted);
        assert_eq!(store.load().await.value, record);
        assert_eq!(
            repo.get(PROGRESS_KEY).await.unwrap().as_deref(),
            Some(r#"{"unit1-topic2":true}"#)
        );
    }

    #[tokio::test]
    async fn malformed_persisted_state_loads_empty() {
        let (store, repo) = store();
        repo.set(PROGRESS_KEY, "{not json").await.unwrap();
        let loaded = store.load().await;
        assert!(loaded.value.is_empty());
        assert!(loaded.persistence.is_persisted());
    }

    #[test]
    fn set_topic_is_idempotent() {
        let (u, t) = ids("unit4", "topic1");
        let once = ProgressStore::set_topic(ProgressRecord::new(), &u, &t, true);
        let twice = ProgressStore::set_topic(once.clone(), &u, &t, true);
        assert_eq!(once, twice);
    }

    #[tokio::test]
    async fn reset_clears_storage() {
        let (store, repo) = store();
        let (u, t) = ids("unit1", "topic1");
        let record = ProgressStore::set_topic(ProgressRecord::new(), &u, &t, true);
        let _ = store.save(&record).await;

        let reset = store.reset().await;
        assert!(reset.value.is_empty());
        assert!(reset.persistence.is_persisted());
        assert_eq!(repo.get(PROGRESS_KEY).await.unwrap(), None);
    }

    #[tokio::test]
    async fn import_of_export_roundtrips() {
        let (store, _) = store();
        let (u1, t1) = ids("unit1", "topic1");
        let (u2, t2) = ids("unit2", "topic3");
        let record = ProgressStore::set_topic(ProgressRecord::new(), &u1, &t1, true);
        let record = ProgressStore::set_topic(record, &u2, &t2, false);

        let bytes = store.export(&record).unwrap();
        let imported = store.import(&bytes).await.unwrap();
        assert_eq!(imported.value, record);
        assert_eq!(store.load().await.value, record);
    }

    #[tokio::test]
    async fn import_replaces_instead_of_merging() {
        let (store, _) = store();
        let (u, t) = ids("unit1", "topic1");
        let _ = store
            .save(&ProgressStore::set_topic(ProgressRecord::new(), &u, &t, true))
            .await;

        let imported = store.import(br#"{"unit3-topic2": true}"#).await.unwrap();
        assert_eq!(imported.value.len(), 1);
        let loaded = store.load().await.value;
        assert!(!loaded.is_completed(&TopicKey::new(&u, &t)));
    }

    #[tokio::test]
    async fn malformed_import_leaves_storage_untouched() {
        let (store, _) = store();
        let (u, t) = ids("unit1", "topic1");
        let before = ProgressStore::set_topic(ProgressRecord::new(), &u, &t, true);
        let _ = store.save(&before).await;

        let err = store.import(br#"{"unit1-topic1": 1}"#).await.unwrap_err();
        assert!(matches!(err, ImportError::MalformedInput(_)));
        assert_eq!(store.load().await.value, before);
    }

    #[tokio::test]
    async fn unavailable_backend_degrades_without_failing() {
        let store = ProgressStore::new(Arc::new(UnavailableStore));
        let (u, t) = ids("unit1", "topic1");
        let record = ProgressStore::set_topic(ProgressRecord::new(), &u, &t, true);

        let loaded = store.load().await;
        assert!(loaded.value.is_empty());
        assert_eq!(loaded.persistence, Persistence::InMemoryOnly);
        assert_eq!(store.save(&record).await, Persistence::InMemoryOnly);
        assert_eq!(store.reset().await.persistence, Persistence::InMemoryOnly);

        let imported = store.import(br#"{"unit1-topic1": true}"#).await.unwrap();
        assert_eq!(imported.value, record);
        assert_eq!(imported.persistence, Persistence::InMemoryOnly);
    }
}
