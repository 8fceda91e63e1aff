//! Persistent store - durable key-value storage of JSON documents.
//!
//! Documents live in named collections, keyed by a primary key field and
//! reachable through secondary indexes declared when the collection is
//! opened. Writes that must land together go through [`WriteBatch`], which
//! every backend applies all-or-nothing.

use async_trait::async_trait;
use serde_json::Value;

use crate::errors::{AppError, AppResult};

mod entities;
mod memory;
mod sql;

pub use memory::MemoryStore;
pub use sql::SqlStore;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// A stored record as the store sees it.
pub type Document = Value;

/// Secondary lookup declared on a collection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexSpec {
    pub name: &'static str,
    /// Top-level document field the index reads
    pub key_path: &'static str,
    pub unique: bool,
}

impl IndexSpec {
    pub const fn new(name: &'static str, key_path: &'static str) -> Self {
        Self {
            name,
            key_path,
            unique: false,
        }
    }

    pub const fn unique(name: &'static str, key_path: &'static str) -> Self {
        Self {
            name,
            key_path,
            unique: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionSpec {
    pub name: &'static str,
    pub primary_key: &'static str,
    pub indexes: Vec<IndexSpec>,
}

impl CollectionSpec {
    pub fn index(&self, name: &str) -> AppResult<&IndexSpec> {
        self.indexes
            .iter()
            .find(|index| index.name == name)
            .ok_or_else(|| {
                AppError::store(format!("collection '{}' has no index '{}'", self.name, name))
            })
    }

    /// Primary key of a document, which must be a non-empty string.
    pub fn document_id(&self, document: &Document) -> AppResult<String> {
        match document.get(self.primary_key) {
            Some(Value::String(id)) if !id.is_empty() => Ok(id.clone()),
            _ => Err(AppError::store(format!(
                "document in '{}' lacks a string '{}' key",
                self.name, self.primary_key
            ))),
        }
    }
}

/// Value a document exposes under an index, if any. Scalars are indexed by
/// their string form; missing, null and composite fields are not indexed.
pub fn index_key(document: &Document, key_path: &str) -> Option<String> {
    match document.get(key_path)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum WriteOp {
    Put {
        collection: String,
        document: Document,
    },
    Delete {
        collection: String,
        id: String,
    },
}

impl WriteOp {
    pub fn collection(&self) -> &str {
        match self {
            WriteOp::Put { collection, .. } | WriteOp::Delete { collection, .. } => collection,
        }
    }
}

/// Ordered writes applied atomically, possibly across collections.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WriteBatch {
    ops: Vec<WriteOp>,
}

impl WriteBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put(&mut self, collection: impl Into<String>, document: Document) -> &mut Self {
        self.ops.push(WriteOp::Put {
            collection: collection.into(),
            document,
        });
        self
    }

    pub fn delete(&mut self, collection: impl Into<String>, id: impl Into<String>) -> &mut Self {
        self.ops.push(WriteOp::Delete {
            collection: collection.into(),
            id: id.into(),
        });
        self
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn ops(&self) -> &[WriteOp] {
        &self.ops
    }

    pub fn into_ops(self) -> Vec<WriteOp> {
        self.ops
    }
}

/// Store contract shared by every backend.
///
/// Failures (unknown collection, duplicate unique key, backend errors) come
/// back as errors; nothing here retries.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Declare a collection; reopening replaces its index set.
    async fn open_collection(&self, spec: CollectionSpec) -> AppResult<()>;

    /// Insert or replace a document by primary key
    async fn put(&self, collection: &str, document: Document) -> AppResult<()>;

    async fn get(&self, collection: &str, id: &str) -> AppResult<Option<Document>>;

    async fn get_all(&self, collection: &str) -> AppResult<Vec<Document>>;

    /// All documents whose index value equals `value`, in no particular order
    async fn query_by_index(
        &self,
        collection: &str,
        index: &str,
        value: &str,
    ) -> AppResult<Vec<Document>>;

    /// Deleting a missing id is not an error
    async fn delete(&self, collection: &str, id: &str) -> AppResult<()>;

    /// Apply every operation or none of them
    async fn apply(&self, batch: WriteBatch) -> AppResult<()>;
}
