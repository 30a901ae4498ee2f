//! In-memory document store

use crate::error::{JournalError, Result};
use crate::infrastructure::store::{
    CollectionPath, Document, DocumentPath, DocumentRef, DocumentStore, Value, WriteBatch,
    WriteField,
};
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

/// In-memory [`DocumentStore`] with the same merge/set/list semantics as a
/// hosted backend. Server timestamps resolve to the wall clock at write time.
///
/// This is the substitution target the repository is tested against.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    documents: Mutex<BTreeMap<String, Document>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        InMemoryStore::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, BTreeMap<String, Document>>> {
        self.documents
            .lock()
            .map_err(|_| JournalError::Store("store mutex poisoned".to_string()))
    }

    /// Resolve write sentinels into concrete values.
    fn resolve(fields: WriteBatch) -> Document {
        fields
            .into_iter()
            .map(|(name, field)| {
                let value = match field {
                    WriteField::ServerTimestamp => Value::Timestamp(Utc::now()),
                    WriteField::Value(value) => value,
                };
                (name, value)
            })
            .collect()
    }
}

impl DocumentStore for InMemoryStore {
    fn upsert_merge(&self, path: &DocumentPath, fields: WriteBatch) -> Result<()> {
        let resolved = Self::resolve(fields);
        let mut documents = self.lock()?;
        documents
            .entry(path.as_str().to_string())
            .or_default()
            .extend(resolved);
        Ok(())
    }

    fn set(&self, path: &DocumentPath, fields: WriteBatch) -> Result<DocumentRef> {
        let resolved = Self::resolve(fields);
        let mut documents = self.lock()?;
        documents.insert(path.as_str().to_string(), resolved);
        Ok(DocumentRef { path: path.clone() })
    }

    fn get(&self, path: &DocumentPath) -> Result<Option<Document>> {
        let documents = self.lock()?;
        Ok(documents.get(path.as_str()).cloned())
    }

    fn delete(&self, path: &DocumentPath) -> Result<()> {
        let mut documents = self.lock()?;
        documents.remove(path.as_str());
        Ok(())
    }

    fn list(&self, collection: &CollectionPath) -> Result<Vec<(String, Document)>> {
        let prefix = format!("{}/", collection.as_str());
        let documents = self.lock()?;

        Ok(documents
            .iter()
            .filter_map(|(key, document)| {
                let id = key.strip_prefix(&prefix)?;
                // Only direct children; deeper paths belong to sub-collections
                if id.contains('/') {
                    return None;
                }
                Some((id.to_string(), document.clone()))
            })
            .collect())
    }
}
