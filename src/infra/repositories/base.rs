//! Base repository traits following Interface Segregation Principle (ISP).
//!
//! Every entity is stored as a JSON document through [`RecordStore`]; these
//! traits turn typed records into documents and back so the per-entity
//! repositories only add their own lookups.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use uuid::Uuid;

use crate::config::PRIMARY_KEY;
use crate::errors::{AppResult, OptionExt};
use crate::infra::store::{CollectionSpec, Document, IndexSpec, RecordStore};

/// Entity that lives in its own store collection
pub trait Record: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    const COLLECTION: &'static str;
    /// Name used in not-found messages
    const ENTITY: &'static str;

    fn id(&self) -> Uuid;

    /// Secondary indexes declared when the collection is opened
    fn indexes() -> Vec<IndexSpec>;

    fn collection_spec() -> CollectionSpec {
        CollectionSpec {
            name: Self::COLLECTION,
            primary_key: PRIMARY_KEY,
            indexes: Self::indexes(),
        }
    }

    fn to_document(&self) -> AppResult<Document> {
        Ok(serde_json::to_value(self)?)
    }

    fn from_document(document: Document) -> AppResult<Self> {
        Ok(serde_json::from_value(document)?)
    }
}

/// Read operations (Query) - Single Responsibility
#[async_trait]
pub trait ReadRepository<R: Record>: Send + Sync {
    fn store(&self) -> &dyn RecordStore;

    /// Find record by primary key
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<R>> {
        match self.store().get(R::COLLECTION, &id.to_string()).await? {
            Some(document) => Ok(Some(R::from_document(document)?)),
            None => Ok(None),
        }
    }

    /// Like `find_by_id`, but absence is `NotFound`
    async fn get(&self, id: Uuid) -> AppResult<R> {
        self.find_by_id(id).await?.ok_or_not_found(R::ENTITY)
    }

    async fn find_all(&self) -> AppResult<Vec<R>> {
        self.store()
            .get_all(R::COLLECTION)
            .await?
            .into_iter()
            .map(R::from_document)
            .collect()
    }

    /// Records whose `index` equals `value`
    async fn find_by_index(&self, index: &str, value: &str) -> AppResult<Vec<R>> {
        self.store()
            .query_by_index(R::COLLECTION, index, value)
            .await?
            .into_iter()
            .map(R::from_document)
            .collect()
    }

    async fn count(&self) -> AppResult<u64> {
        Ok(self.store().get_all(R::COLLECTION).await?.len() as u64)
    }
}

/// Write operations (Command) - Single Responsibility
#[async_trait]
pub trait WriteRepository<R: Record>: Send + Sync {
    fn store(&self) -> &dyn RecordStore;

    /// Insert or replace a record
    async fn save(&self, record: &R) -> AppResult<()> {
        self.store()
            .put(R::COLLECTION, record.to_document()?)
            .await
    }
}

/// Delete operations - Single Responsibility
#[async_trait]
pub trait DeleteRepository<R: Record>: Send + Sync {
    fn store(&self) -> &dyn RecordStore;

    async fn delete_by_id(&self, id: Uuid) -> AppResult<()> {
        self.store().delete(R::COLLECTION, &id.to_string()).await
    }
}

/// Full CRUD repository - Combines all operations
pub trait CrudRepository<R: Record>:
    ReadRepository<R> + WriteRepository<R> + DeleteRepository<R>
{
}

impl<T, R> CrudRepository<R> for T
where
    T: ReadRepository<R> + WriteRepository<R> + DeleteRepository<R>,
    R: Record,
{
}
