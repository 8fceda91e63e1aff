//! In-process record store.
//!
//! Used for tests and throwaway sessions. Batches are staged on copies of the
//! touched collections and swapped in only when every operation succeeded.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{index_key, CollectionSpec, Document, RecordStore, WriteBatch, WriteOp};
use crate::errors::{AppError, AppResult};

#[derive(Debug, Clone)]
struct MemCollection {
    spec: CollectionSpec,
    records: BTreeMap<String, Document>,
}

impl MemCollection {
    fn new(spec: CollectionSpec) -> Self {
        Self {
            spec,
            records: BTreeMap::new(),
        }
    }

    fn put(&mut self, document: Document) -> AppResult<()> {
        let id = self.spec.document_id(&document)?;
        self.check_unique(&id, &document)?;
        self.records.insert(id, document);
        Ok(())
    }

    fn check_unique(&self, id: &str, document: &Document) -> AppResult<()> {
        for index in self.spec.indexes.iter().filter(|index| index.unique) {
            let Some(key) = index_key(document, index.key_path) else {
                continue;
            };
            let taken = self.records.iter().any(|(other_id, other)| {
                other_id != id && index_key(other, index.key_path).as_deref() == Some(key.as_str())
            });
            if taken {
                return Err(AppError::conflict(format!(
                    "{} '{}' already exists in {}",
                    index.key_path, key, self.spec.name
                )));
            }
        }
        Ok(())
    }
}

/// Record store kept entirely in memory
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, MemCollection>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn unknown_collection(name: &str) -> AppError {
    AppError::store(format!("unknown collection '{}'", name))
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn open_collection(&self, spec: CollectionSpec) -> AppResult<()> {
        let mut collections = self.collections.write().await;
        match collections.get_mut(spec.name) {
            Some(existing) => existing.spec = spec,
            None => {
                tracing::debug!("Opened in-memory collection {}", spec.name);
                collections.insert(spec.name.to_string(), MemCollection::new(spec));
            }
        }
        Ok(())
    }

    async fn put(&self, collection: &str, document: Document) -> AppResult<()> {
        let mut collections = self.collections.write().await;
        collections
            .get_mut(collection)
            .ok_or_else(|| unknown_collection(collection))?
            .put(document)
    }

    async fn get(&self, collection: &str, id: &str) -> AppResult<Option<Document>> {
        let collections = self.collections.read().await;
        let target = collections
            .get(collection)
            .ok_or_else(|| unknown_collection(collection))?;
        Ok(target.records.get(id).cloned())
    }

    async fn get_all(&self, collection: &str) -> AppResult<Vec<Document>> {
        let collections = self.collections.read().await;
        let target = collections
            .get(collection)
            .ok_or_else(|| unknown_collection(collection))?;
        Ok(target.records.values().cloned().collect())
    }

    async fn query_by_index(
        &self,
        collection: &str,
        index: &str,
        value: &str,
    ) -> AppResult<Vec<Document>> {
        let collections = self.collections.read().await;
        let target = collections
            .get(collection)
            .ok_or_else(|| unknown_collection(collection))?;
        let key_path = target.spec.index(index)?.key_path;

        Ok(target
            .records
            .values()
            .filter(|document| index_key(document, key_path).as_deref() == Some(value))
            .cloned()
            .collect())
    }

    async fn delete(&self, collection: &str, id: &str) -> AppResult<()> {
        let mut collections = self.collections.write().await;
        collections
            .get_mut(collection)
            .ok_or_else(|| unknown_collection(collection))?
            .records
            .remove(id);
        Ok(())
    }

    async fn apply(&self, batch: WriteBatch) -> AppResult<()> {
        let mut collections = self.collections.write().await;

        let mut staged: HashMap<String, MemCollection> = HashMap::new();
        for op in batch.ops() {
            let name = op.collection();
            if !staged.contains_key(name) {
                let current = collections
                    .get(name)
                    .ok_or_else(|| unknown_collection(name))?;
                staged.insert(name.to_string(), current.clone());
            }
        }

        for op in batch.into_ops() {
            match op {
                WriteOp::Put {
                    collection,
                    document,
                } => {
                    if let Some(target) = staged.get_mut(&collection) {
                        target.put(document)?;
                    }
                }
                WriteOp::Delete { collection, id } => {
                    if let Some(target) = staged.get_mut(&collection) {
                        target.records.remove(&id);
                    }
                }
            }
        }

        collections.extend(staged);
        Ok(())
    }
}
