// src/storage/postgres.rs
// DOCUMENTATION: PostgreSQL storage engine
// PURPOSE: Records stored as JSONB documents; `new`/`delete` are staged and
// applied in a single transaction by `save()`

use crate::errors::ApiError;
use crate::models::{Entity, EntityKind, Record};
use sqlx::types::Json;
use sqlx::PgPool;
use std::collections::HashSet;
use tokio::sync::Mutex;

const CREATE_OBJECTS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS objects (
        class TEXT NOT NULL,
        id TEXT NOT NULL,
        data JSONB NOT NULL,
        created_at TIMESTAMPTZ NOT NULL,
        PRIMARY KEY (class, id)
    )
"#;

/// Change waiting for the next `save()`
#[derive(Debug, PartialEq)]
enum PendingChange {
    Upsert(Record),
    Delete { kind: EntityKind, id: String },
}

impl PendingChange {
    fn key(&self) -> (EntityKind, &str) {
        match self {
            PendingChange::Upsert(record) => (record.kind(), record.id()),
            PendingChange::Delete { kind, id } => (*kind, id.as_str()),
        }
    }
}

/// Keep only the last staged change per record, in the order those changes were staged
fn coalesce(changes: Vec<PendingChange>) -> Vec<PendingChange> {
    let mut seen = HashSet::new();
    let mut kept: Vec<PendingChange> = changes
        .into_iter()
        .rev()
        .filter(|change| {
            let (kind, id) = change.key();
            seen.insert((kind, id.to_string()))
        })
        .collect();
    kept.reverse();
    kept
}

/// Storage engine backed by a single `objects` table
pub struct DbStorage {
    pool: PgPool,
    pending: Mutex<Vec<PendingChange>>,
}

fn database_error(e: sqlx::Error) -> ApiError {
    log::error!("Database operation failed: {}", e);
    ApiError::DatabaseError(e.to_string())
}

impl DbStorage {
    /// Wrap a pool, creating the objects table when it is missing
    pub async fn connect(pool: PgPool) -> Result<Self, ApiError> {
        sqlx::query(CREATE_OBJECTS_TABLE)
            .execute(&pool)
            .await
            .map_err(database_error)?;

        Ok(DbStorage {
            pool,
            pending: Mutex::new(Vec::new()),
        })
    }

    pub async fn get<T: Entity>(&self, id: &str) -> Result<Option<T>, ApiError> {
        let row = sqlx::query_as::<_, (Json<T>,)>(
            "SELECT data FROM objects WHERE class = $1 AND id = $2",
        )
        .bind(T::KIND.as_str())
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?;

        Ok(row.map(|(Json(obj),)| obj))
    }

    /// Every record of type `T`, oldest first
    pub async fn all<T: Entity>(&self) -> Result<Vec<T>, ApiError> {
        let rows = sqlx::query_as::<_, (Json<T>,)>(
            "SELECT data FROM objects WHERE class = $1 ORDER BY created_at, id",
        )
        .bind(T::KIND.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(database_error)?;

        Ok(rows.into_iter().map(|(Json(obj),)| obj).collect())
    }

    pub async fn count<T: Entity>(&self) -> Result<usize, ApiError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM objects WHERE class = $1")
            .bind(T::KIND.as_str())
            .fetch_one(&self.pool)
            .await
            .map_err(database_error)?;

        Ok(usize::try_from(count).unwrap_or_default())
    }

    pub async fn new<T: Entity>(&self, obj: T) {
        self.pending
            .lock()
            .await
            .push(PendingChange::Upsert(obj.into_record()));
    }

    pub async fn delete<T: Entity>(&self, obj: &T) {
        self.pending.lock().await.push(PendingChange::Delete {
            kind: T::KIND,
            id: obj.id().to_string(),
        });
    }

    /// Upsert one record in its own transaction, independent of staged changes
    pub async fn persist<T: Entity>(&self, obj: T) -> Result<(), ApiError> {
        self.apply(vec![PendingChange::Upsert(obj.into_record())])
            .await
    }

    /// Delete one record in its own transaction, independent of staged changes
    pub async fn remove<T: Entity>(&self, obj: &T) -> Result<(), ApiError> {
        self.apply(vec![PendingChange::Delete {
            kind: T::KIND,
            id: obj.id().to_string(),
        }])
        .await
    }

    /// Flush staged changes in one transaction
    pub async fn save(&self) -> Result<(), ApiError> {
        let changes = coalesce(std::mem::take(&mut *self.pending.lock().await));
        if changes.is_empty() {
            return Ok(());
        }
        self.apply(changes).await
    }

    async fn apply(&self, changes: Vec<PendingChange>) -> Result<(), ApiError> {
        let mut tx = self.pool.begin().await.map_err(database_error)?;
        let applied = changes.len();

        for change in changes {
            match change {
                PendingChange::Upsert(record) => {
                    let kind = record.kind();
                    let id = record.id().to_string();
                    let created_at = record.base().created_at;
                    sqlx::query(
                        r#"
                        INSERT INTO objects (class, id, data, created_at)
                        VALUES ($1, $2, $3, $4)
                        ON CONFLICT (class, id) DO UPDATE SET data = EXCLUDED.data
                        "#,
                    )
                    .bind(kind.as_str())
                    .bind(id)
                    .bind(Json(record))
                    .bind(created_at)
                    .execute(&mut *tx)
                    .await
                    .map_err(database_error)?;
                }
                PendingChange::Delete { kind, id } => {
                    sqlx::query("DELETE FROM objects WHERE class = $1 AND id = $2")
                        .bind(kind.as_str())
                        .bind(id)
                        .execute(&mut *tx)
                        .await
                        .map_err(database_error)?;
                }
            }
        }

        tx.commit().await.map_err(database_error)?;
        log::debug!("Committed {} changes", applied);
        Ok(())
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Amenity, State};
    use sqlx::postgres::PgPoolOptions;

    /// Engine over a pool that never connects unless a query runs
    fn offline_storage() -> DbStorage {
        let pool = PgPoolOptions::new()
            .connect_lazy("postgres://hbnb@localhost/hbnb_offline")
            .unwrap();
        DbStorage {
            pool,
            pending: Mutex::new(Vec::new()),
        }
    }

    #[tokio::test]
    async fn test_new_and_delete_are_staged_in_order() {
        let storage = offline_storage();
        let state = State::new("Oregon".to_string());
        let amenity = Amenity::new("Wifi".to_string());

        storage.new(state.clone()).await;
        storage.new(amenity.clone()).await;
        storage.delete(&state).await;

        let pending = storage.pending.lock().await;
        assert_eq!(
            *pending,
            vec![
                PendingChange::Upsert(state.clone().into_record()),
                PendingChange::Upsert(amenity.into_record()),
                PendingChange::Delete {
                    kind: EntityKind::State,
                    id: state.base.id.clone(),
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_save_without_staged_changes_skips_the_database() {
        let storage = offline_storage();
        assert!(storage.save().await.is_ok());
    }

    #[test]
    fn test_coalesce_keeps_last_change_per_record() {
        let mut oregon = State::new("Oregon".to_string());
        let idaho = State::new("Idaho".to_string());
        let wifi = Amenity::new("Wifi".to_string());
        let first = PendingChange::Upsert(oregon.clone().into_record());
        oregon.name = "OR".to_string();

        let changes = vec![
            first,
            PendingChange::Upsert(idaho.clone().into_record()),
            PendingChange::Upsert(oregon.clone().into_record()),
            PendingChange::Upsert(wifi.clone().into_record()),
            PendingChange::Delete {
                kind: EntityKind::State,
                id: idaho.base.id.clone(),
            },
        ];

        assert_eq!(
            coalesce(changes),
            vec![
                PendingChange::Upsert(oregon.into_record()),
                PendingChange::Upsert(wifi.into_record()),
                PendingChange::Delete {
                    kind: EntityKind::State,
                    id: idaho.base.id,
                },
            ]
        );
    }

    #[test]
    fn test_coalesce_tells_classes_apart() {
        let state = State::new("Maine".to_string());
        let mut amenity = Amenity::new("Sauna".to_string());
        amenity.base.id = state.base.id.clone();

        let changes = vec![
            PendingChange::Upsert(state.clone().into_record()),
            PendingChange::Upsert(amenity.clone().into_record()),
        ];
        assert_eq!(coalesce(changes).len(), 2);
    }
}
