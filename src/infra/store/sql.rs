//! SQLite record store through SeaORM.
//!
//! Documents are kept as JSON text in `records`; every declared index value
//! is mirrored into `record_indexes` in the same transaction as the document
//! write, so a lookup never sees a half-written record.

use std::collections::HashMap;

use async_trait::async_trait;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use tokio::sync::RwLock;

use super::entities::{record, record_index};
use super::{index_key, CollectionSpec, Document, RecordStore, WriteBatch, WriteOp};
use crate::errors::{AppError, AppResult};

/// Record store persisted in a SQL database
pub struct SqlStore {
    db: DatabaseConnection,
    specs: RwLock<HashMap<String, CollectionSpec>>,
}

impl SqlStore {
    /// Wrap a migrated connection. Collections still have to be opened.
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            db,
            specs: RwLock::new(HashMap::new()),
        }
    }

    async fn spec(&self, collection: &str) -> AppResult<CollectionSpec> {
        self.specs
            .read()
            .await
            .get(collection)
            .cloned()
            .ok_or_else(|| AppError::store(format!("unknown collection '{}'", collection)))
    }

    /// Rebuild the index rows of a collection from its stored bodies.
    async fn reindex(&self, spec: &CollectionSpec) -> AppResult<usize> {
        let txn = self.db.begin().await?;

        record_index::Entity::delete_many()
            .filter(record_index::Column::Collection.eq(spec.name))
            .exec(&txn)
            .await?;

        let rows = record::Entity::find()
            .filter(record::Column::Collection.eq(spec.name))
            .all(&txn)
            .await?;

        for row in &rows {
            let document: Document = serde_json::from_str(&row.body)?;
            insert_index_rows(&txn, spec, &row.id, &document).await?;
        }

        txn.commit().await?;
        Ok(rows.len())
    }
}

fn decode(rows: Vec<record::Model>) -> AppResult<Vec<Document>> {
    rows.into_iter()
        .map(|row| serde_json::from_str(&row.body).map_err(AppError::from))
        .collect()
}

async fn insert_index_rows<C: ConnectionTrait>(
    conn: &C,
    spec: &CollectionSpec,
    id: &str,
    document: &Document,
) -> AppResult<()> {
    let rows: Vec<record_index::ActiveModel> = spec
        .indexes
        .iter()
        .filter_map(|index| {
            index_key(document, index.key_path).map(|value| record_index::ActiveModel {
                collection: Set(spec.name.to_string()),
                index_name: Set(index.name.to_string()),
                record_id: Set(id.to_string()),
                index_value: Set(value),
            })
        })
        .collect();

    if rows.is_empty() {
        return Ok(());
    }

    record_index::Entity::insert_many(rows)
        .exec_without_returning(conn)
        .await?;
    Ok(())
}

async fn remove_index_rows<C: ConnectionTrait>(
    conn: &C,
    collection: &str,
    id: &str,
) -> AppResult<()> {
    record_index::Entity::delete_many()
        .filter(record_index::Column::Collection.eq(collection))
        .filter(record_index::Column::RecordId.eq(id))
        .exec(conn)
        .await?;
    Ok(())
}

async fn check_unique<C: ConnectionTrait>(
    conn: &C,
    spec: &CollectionSpec,
    id: &str,
    document: &Document,
) -> AppResult<()> {
    for index in spec.indexes.iter().filter(|index| index.unique) {
        let Some(value) = index_key(document, index.key_path) else {
            continue;
        };

        let holder = record_index::Entity::find()
            .filter(record_index::Column::Collection.eq(spec.name))
            .filter(record_index::Column::IndexName.eq(index.name))
            .filter(record_index::Column::IndexValue.eq(value.as_str()))
            .filter(record_index::Column::RecordId.ne(id))
            .one(conn)
            .await?;

        if holder.is_some() {
            return Err(AppError::conflict(format!(
                "{} '{}' already exists in {}",
                index.key_path, value, spec.name
            )));
        }
    }
    Ok(())
}

async fn write_document<C: ConnectionTrait>(
    conn: &C,
    spec: &CollectionSpec,
    document: Document,
) -> AppResult<()> {
    let id = spec.document_id(&document)?;
    check_unique(conn, spec, &id, &document).await?;

    let row = record::ActiveModel {
        collection: Set(spec.name.to_string()),
        id: Set(id.clone()),
        body: Set(serde_json::to_string(&document)?),
    };

    record::Entity::insert(row)
        .on_conflict(
            OnConflict::columns([record::Column::Collection, record::Column::Id])
                .update_column(record::Column::Body)
                .to_owned(),
        )
        .exec_without_returning(conn)
        .await?;

    remove_index_rows(conn, spec.name, &id).await?;
    insert_index_rows(conn, spec, &id, &document).await
}

async fn delete_document<C: ConnectionTrait>(conn: &C, collection: &str, id: &str) -> AppResult<()> {
    remove_index_rows(conn, collection, id).await?;
    record::Entity::delete_many()
        .filter(record::Column::Collection.eq(collection))
        .filter(record::Column::Id.eq(id))
        .exec(conn)
        .await?;
    Ok(())
}

#[async_trait]
impl RecordStore for SqlStore {
    async fn open_collection(&self, spec: CollectionSpec) -> AppResult<()> {
        self.specs
            .write()
            .await
            .insert(spec.name.to_string(), spec.clone());

        let count = self.reindex(&spec).await?;
        tracing::debug!("Opened collection {} ({} records)", spec.name, count);
        Ok(())
    }

    async fn put(&self, collection: &str, document: Document) -> AppResult<()> {
        let spec = self.spec(collection).await?;

        let txn = self.db.begin().await?;
        match write_document(&txn, &spec, document).await {
            Ok(()) => {
                txn.commit().await?;
                Ok(())
            }
            Err(e) => {
                if let Err(rollback_err) = txn.rollback().await {
                    tracing::error!("Rollback failed: {}", rollback_err);
                }
                Err(e)
            }
        }
    }

    async fn get(&self, collection: &str, id: &str) -> AppResult<Option<Document>> {
        self.spec(collection).await?;

        let row = record::Entity::find_by_id((collection.to_string(), id.to_string()))
            .one(&self.db)
            .await?;

        match row {
            Some(row) => Ok(Some(serde_json::from_str(&row.body)?)),
            None => Ok(None),
        }
    }

    async fn get_all(&self, collection: &str) -> AppResult<Vec<Document>> {
        self.spec(collection).await?;

        let rows = record::Entity::find()
            .filter(record::Column::Collection.eq(collection))
            .order_by_asc(record::Column::Id)
            .all(&self.db)
            .await?;

        decode(rows)
    }

    async fn query_by_index(
        &self,
        collection: &str,
        index: &str,
        value: &str,
    ) -> AppResult<Vec<Document>> {
        let spec = self.spec(collection).await?;
        spec.index(index)?;

        let ids: Vec<String> = record_index::Entity::find()
            .filter(record_index::Column::Collection.eq(collection))
            .filter(record_index::Column::IndexName.eq(index))
            .filter(record_index::Column::IndexValue.eq(value))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|row| row.record_id)
            .collect();

        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = record::Entity::find()
            .filter(record::Column::Collection.eq(collection))
            .filter(record::Column::Id.is_in(ids))
            .order_by_asc(record::Column::Id)
            .all(&self.db)
            .await?;

        decode(rows)
    }

    async fn delete(&self, collection: &str, id: &str) -> AppResult<()> {
        self.spec(collection).await?;

        let txn = self.db.begin().await?;
        delete_document(&txn, collection, id).await?;
        txn.commit().await?;
        Ok(())
    }

    async fn apply(&self, batch: WriteBatch) -> AppResult<()> {
        let mut specs = HashMap::new();
        for op in batch.ops() {
            let name = op.collection();
            if !specs.contains_key(name) {
                specs.insert(name.to_string(), self.spec(name).await?);
            }
        }

        let txn = self.db.begin().await?;
        let mut outcome = Ok(());

        for op in batch.into_ops() {
            outcome = match op {
                WriteOp::Put {
                    collection,
                    document,
                } => match specs.get(&collection) {
                    Some(spec) => write_document(&txn, spec, document).await,
                    None => Err(AppError::store(format!("unknown collection '{}'", collection))),
                },
                WriteOp::Delete { collection, id } => {
                    delete_document(&txn, &collection, &id).await
                }
            };
            if outcome.is_err() {
                break;
            }
        }

        match outcome {
            Ok(()) => {
                txn.commit().await?;
                Ok(())
            }
            Err(e) => {
                if let Err(rollback_err) = txn.rollback().await {
                    tracing::error!("Batch rollback failed: {}", rollback_err);
                }
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, MEMORY_DATABASE_URL};
    use crate::infra::db::Database;
    use crate::infra::store::IndexSpec;
    use serde_json::json;

    fn reservations() -> CollectionSpec {
        CollectionSpec {
            name: "reservations",
            primary_key: "id",
            indexes: vec![
                IndexSpec::new("roomId", "roomId"),
                IndexSpec::unique("code", "code"),
            ],
        }
    }

    async fn store() -> SqlStore {
        let mut config = Config::default();
        config.database_url = MEMORY_DATABASE_URL.to_string();
        let db = Database::connect(&config).await.unwrap();
        let store = SqlStore::new(db.get_connection());
        store.open_collection(reservations()).await.unwrap();
        store
    }

    #[tokio::test]
    async fn test_put_get_and_index_lookup() {
        let store = store().await;
        store
            .put("reservations", json!({"id": "a", "roomId": "r1", "code": "A1"}))
            .await
            .unwrap();
        store
            .put("reservations", json!({"id": "b", "roomId": "r1", "code": "B1"}))
            .await
            .unwrap();

        assert_eq!(store.get("reservations", "a").await.unwrap().unwrap()["code"], "A1");
        assert_eq!(
            store.query_by_index("reservations", "roomId", "r1").await.unwrap().len(),
            2
        );

        // Replacing a document moves its index entry
        store
            .put("reservations", json!({"id": "a", "roomId": "r2", "code": "A1"}))
            .await
            .unwrap();
        assert_eq!(
            store.query_by_index("reservations", "roomId", "r1").await.unwrap().len(),
            1
        );
    }

    #[tokio::test]
    async fn test_failed_batch_rolls_back() {
        let store = store().await;
        store
            .put("reservations", json!({"id": "a", "roomId": "r1", "code": "A1"}))
            .await
            .unwrap();

        let mut batch = WriteBatch::new();
        batch
            .delete("reservations", "a")
            .put("reservations", json!({"id": "b", "roomId": "r1", "code": "B1"}))
            .put("reservations", json!({"id": "c", "roomId": "r1", "code": "B1"}));

        let result = store.apply(batch).await;
        assert!(matches!(result, Err(AppError::Conflict(_))));
        assert!(store.get("reservations", "a").await.unwrap().is_some());
        assert!(store.get("reservations", "b").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_reopen_rebuilds_indexes() {
        let store = store().await;
        store
            .put("reservations", json!({"id": "a", "roomId": "r1", "guestEmail": "g@x.com"}))
            .await
            .unwrap();

        let mut spec = reservations();
        spec.indexes.push(IndexSpec::new("guestEmail", "guestEmail"));
        store.open_collection(spec).await.unwrap();

        let found = store
            .query_by_index("reservations", "guestEmail", "g@x.com")
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
    }
}
