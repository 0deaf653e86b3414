// src/storage/mod.rs
// DOCUMENTATION: Storage facade shared by every handler
// PURPOSE: get/all/new/save/delete over whichever engine the config selects

pub mod file;
pub mod postgres;

pub use file::FileStorage;
pub use postgres::DbStorage;

use crate::config::{init_db_pool, Config, StorageType};
use crate::errors::ApiError;
use crate::models::Entity;

/// Storage facade
/// DOCUMENTATION: Created once in main.rs and passed to handlers as `web::Data<Storage>`.
/// `new` and `delete` stage a change, `save` makes staged changes durable
pub enum Storage {
    File(FileStorage),
    Db(DbStorage),
}

impl Storage {
    /// Non-persistent store, used by tests and STORAGE_TYPE=memory
    pub fn in_memory() -> Self {
        Storage::File(FileStorage::in_memory())
    }

    /// Build the engine selected by STORAGE_TYPE
    pub async fn from_config(config: &Config) -> Result<Self, ApiError> {
        match config.storage_type {
            StorageType::Memory => Ok(Self::in_memory()),
            StorageType::File => Ok(Storage::File(FileStorage::open(&config.storage_file).await?)),
            StorageType::Db => {
                let pool = init_db_pool(config).await.map_err(|e| {
                    log::error!("Failed to connect to database: {}", e);
                    ApiError::DatabaseError(e.to_string())
                })?;
                Ok(Storage::Db(DbStorage::connect(pool).await?))
            }
        }
    }

    pub async fn get<T: Entity>(&self, id: &str) -> Result<Option<T>, ApiError> {
        match self {
            Storage::File(engine) => Ok(engine.get(id).await),
            Storage::Db(engine) => engine.get(id).await,
        }
    }

    pub async fn all<T: Entity>(&self) -> Result<Vec<T>, ApiError> {
        match self {
            Storage::File(engine) => Ok(engine.all().await),
            Storage::Db(engine) => engine.all().await,
        }
    }

    pub async fn count<T: Entity>(&self) -> Result<usize, ApiError> {
        match self {
            Storage::File(engine) => Ok(engine.count::<T>().await),
            Storage::Db(engine) => engine.count::<T>().await,
        }
    }

    pub async fn new<T: Entity>(&self, obj: T) {
        match self {
            Storage::File(engine) => engine.new(obj).await,
            Storage::Db(engine) => engine.new(obj).await,
        }
    }

    pub async fn delete<T: Entity>(&self, obj: &T) {
        match self {
            Storage::File(engine) => engine.delete(obj).await,
            Storage::Db(engine) => engine.delete(obj).await,
        }
    }

    pub async fn save(&self) -> Result<(), ApiError> {
        match self {
            Storage::File(engine) => engine.save().await,
            Storage::Db(engine) => engine.save().await,
        }
    }

    /// Write one object durably; the db engine commits it in its own
    /// transaction, apart from staged changes
    pub async fn persist<T: Entity>(&self, obj: T) -> Result<(), ApiError> {
        match self {
            Storage::File(engine) => {
                engine.new(obj).await;
                engine.save().await
            }
            Storage::Db(engine) => engine.persist(obj).await,
        }
    }

    /// Delete one object durably
    pub async fn remove<T: Entity>(&self, obj: &T) -> Result<(), ApiError> {
        match self {
            Storage::File(engine) => {
                engine.delete(obj).await;
                engine.save().await
            }
            Storage::Db(engine) => engine.remove(obj).await,
        }
    }

    /// Flush and release engine resources
    pub async fn close(&self) -> Result<(), ApiError> {
        self.save().await?;
        if let Storage::Db(engine) = self {
            engine.close().await;
        }
        Ok(())
    }
}
