// src/storage/file.rs
// DOCUMENTATION: In-process object store, optionally backed by a JSON file
// PURPOSE: Default storage engine; `save()` rewrites the whole file

use crate::errors::ApiError;
use crate::models::{Entity, Record};
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::PathBuf;
use tokio::sync::{Mutex, RwLock};

/// Object map keyed by `<Class>.<id>`
/// DOCUMENTATION: Mutations are visible immediately; `save()` makes them durable
pub struct FileStorage {
    path: Option<PathBuf>,
    objects: RwLock<HashMap<String, Record>>,
    /// Serializes concurrent `save()` calls so the file is never interleaved
    write_lock: Mutex<()>,
}

impl FileStorage {
    /// Store that never touches the filesystem
    pub fn in_memory() -> Self {
        FileStorage {
            path: None,
            objects: RwLock::new(HashMap::new()),
            write_lock: Mutex::new(()),
        }
    }

    /// Store persisted at `path`, loaded from it when the file already exists
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, ApiError> {
        let storage = FileStorage {
            path: Some(path.into()),
            objects: RwLock::new(HashMap::new()),
            write_lock: Mutex::new(()),
        };
        storage.reload().await?;
        Ok(storage)
    }

    /// Replace the in-memory map with the file contents
    pub async fn reload(&self) -> Result<(), ApiError> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        let bytes = match tokio::fs::read(path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::info!("Storage file {} not found, starting empty", path.display());
                return Ok(());
            }
            Err(e) => {
                log::error!("Failed to read {}: {}", path.display(), e);
                return Err(ApiError::StorageError(e.to_string()));
            }
        };

        let loaded: HashMap<String, Record> = serde_json::from_slice(&bytes).map_err(|e| {
            log::error!("Failed to parse {}: {}", path.display(), e);
            ApiError::StorageError(e.to_string())
        })?;

        log::info!("Loaded {} objects from {}", loaded.len(), path.display());
        *self.objects.write().await = loaded;
        Ok(())
    }

    pub async fn get<T: Entity>(&self, id: &str) -> Option<T> {
        let objects = self.objects.read().await;
        objects
            .get(&T::KIND.key(id))
            .and_then(T::from_record)
            .cloned()
    }

    /// Every record of type `T`, oldest first
    pub async fn all<T: Entity>(&self) -> Vec<T> {
        let objects = self.objects.read().await;
        let mut found: Vec<T> = objects
            .values()
            .filter_map(T::from_record)
            .cloned()
            .collect();
        found.sort_by(|a, b| {
            a.base()
                .created_at
                .cmp(&b.base().created_at)
                .then_with(|| a.id().cmp(b.id()))
        });
        found
    }

    pub async fn count<T: Entity>(&self) -> usize {
        let objects = self.objects.read().await;
        objects.values().filter(|record| record.kind() == T::KIND).count()
    }

    /// Insert or replace
    pub async fn new<T: Entity>(&self, obj: T) {
        let record = obj.into_record();
        log::debug!("Staging {}", record.key());
        self.objects.write().await.insert(record.key(), record);
    }

    pub async fn delete<T: Entity>(&self, obj: &T) {
        let key = T::KIND.key(obj.id());
        if self.objects.write().await.remove(&key).is_some() {
            log::debug!("Removed {}", key);
        }
    }

    /// Write the whole map to the backing file (no-op in memory)
    pub async fn save(&self) -> Result<(), ApiError> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        let _guard = self.write_lock.lock().await;
        let bytes = {
            let objects = self.objects.read().await;
            serde_json::to_vec(&*objects).map_err(|e| {
                log::error!("Failed to serialize objects: {}", e);
                ApiError::StorageError(e.to_string())
            })?
        };

        tokio::fs::write(path, bytes).await.map_err(|e| {
            log::error!("Failed to write {}: {}", path.display(), e);
            ApiError::StorageError(e.to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Amenity, City, State};

    #[tokio::test]
    async fn test_get_is_typed() {
        let storage = FileStorage::in_memory();
        let state = State::new("Nevada".to_string());
        let id = state.base.id.clone();
        storage.new(state).await;

        assert!(storage.get::<State>(&id).await.is_some());
        assert!(storage.get::<City>(&id).await.is_none());
        assert!(storage.get::<State>("missing").await.is_none());
    }

    #[tokio::test]
    async fn test_all_is_ordered_by_creation() {
        let storage = FileStorage::in_memory();
        let names = ["Wifi", "Pool", "Kitchen"];
        let start = chrono::Utc::now();
        for (offset, name) in names.iter().enumerate().rev() {
            let mut amenity = Amenity::new(name.to_string());
            amenity.base.created_at = start + chrono::Duration::seconds(offset as i64);
            storage.new(amenity).await;
        }
        storage.new(State::new("Texas".to_string())).await;

        let amenities = storage.all::<Amenity>().await;
        let found: Vec<&str> = amenities.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(found, names);
        assert_eq!(storage.count::<Amenity>().await, 3);
        assert_eq!(storage.count::<State>().await, 1);
    }

    #[tokio::test]
    async fn test_delete_removes_record() {
        let storage = FileStorage::in_memory();
        let state = State::new("Ohio".to_string());
        storage.new(state.clone()).await;
        storage.delete(&state).await;
        assert!(storage.get::<State>(&state.base.id).await.is_none());
    }

    #[tokio::test]
    async fn test_save_and_reload_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("file.json");

        let storage = FileStorage::open(&path).await.unwrap();
        let state = State::new("Oregon".to_string());
        let city = City::new(state.base.id.clone(), "Portland".to_string());
        storage.new(state.clone()).await;
        storage.new(city.clone()).await;
        storage.save().await.unwrap();

        let reopened = FileStorage::open(&path).await.unwrap();
        assert_eq!(reopened.get::<State>(&state.base.id).await, Some(state));
        assert_eq!(reopened.get::<City>(&city.base.id).await, Some(city));
    }

    #[tokio::test]
    async fn test_open_reports_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("file.json");
        std::fs::write(&path, b"{not json").unwrap();

        let result = FileStorage::open(&path).await;
        assert!(matches!(result, Err(ApiError::StorageError(_))));
    }
}
