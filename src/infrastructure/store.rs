//! Document store boundary

use crate::error::Result;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::fmt;

/// A value stored in a document field.
///
/// Timestamps are a native variant rather than encoded text: hosted document
/// stores hand server-assigned times back as structured values, and the
/// listing code needs to tell the two apart.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Integer(i64),
    Text(String),
    Timestamp(DateTime<Utc>),
    Array(Vec<Value>),
    Map(BTreeMap<String, Value>),
}

impl Value {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(text) => Some(text),
            _ => None,
        }
    }
}

/// A field in a write payload.
///
/// The server-timestamp sentinel is resolved by the store at write time,
/// never by the caller.
#[derive(Debug, Clone, PartialEq)]
pub enum WriteField {
    ServerTimestamp,
    Value(Value),
}

impl WriteField {
    pub fn text(value: &str) -> Self {
        WriteField::Value(Value::Text(value.to_string()))
    }
}

/// Ordered field map for a single document write.
pub type WriteBatch = BTreeMap<String, WriteField>;

/// Decoded contents of a single document.
pub type Document = BTreeMap<String, Value>;

/// Path to a collection, e.g. `users` or `users/UID_12345/journalEntries`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CollectionPath(String);

impl CollectionPath {
    /// A top-level collection
    pub fn root(name: &str) -> Self {
        CollectionPath(name.to_string())
    }

    /// Address a document inside this collection
    pub fn doc(&self, id: &str) -> DocumentPath {
        DocumentPath(format!("{}/{}", self.0, id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CollectionPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Path to a document, e.g. `users/UID_12345/journalEntries/postID_67890`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocumentPath(String);

impl DocumentPath {
    /// Address a sub-collection under this document
    pub fn collection(&self, name: &str) -> CollectionPath {
        CollectionPath(format!("{}/{}", self.0, name))
    }

    /// The final path segment: the document identifier
    pub fn id(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or(&self.0)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Handle to a written document, returned by [`DocumentStore::set`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentRef {
    pub path: DocumentPath,
}

impl DocumentRef {
    pub fn id(&self) -> &str {
        self.path.id()
    }
}

/// Abstract hierarchical document store.
///
/// The five primitives a backend must provide. Implementations own all
/// connection, timeout, and retry policy; this layer adds none, and any
/// backend fault propagates to the caller unchanged.
pub trait DocumentStore {
    /// Create the document or update only the given fields, leaving other
    /// existing fields untouched.
    fn upsert_merge(&self, path: &DocumentPath, fields: WriteBatch) -> Result<()>;

    /// Replace the entire document at `path` with `fields`, discarding any
    /// fields not in the new payload.
    fn set(&self, path: &DocumentPath, fields: WriteBatch) -> Result<DocumentRef>;

    /// Fetch one document, `None` if absent.
    fn get(&self, path: &DocumentPath) -> Result<Option<Document>>;

    /// Remove the document if present; removing an absent document is not an
    /// error.
    fn delete(&self, path: &DocumentPath) -> Result<()>;

    /// All documents directly inside a collection, as `(id, document)` pairs.
    fn list(&self, collection: &CollectionPath) -> Result<Vec<(String, Document)>>;
}

impl<S: DocumentStore + ?Sized> DocumentStore for &S {
    fn upsert_merge(&self, path: &DocumentPath, fields: WriteBatch) -> Result<()> {
        (**self).upsert_merge(path, fields)
    }

    fn set(&self, path: &DocumentPath, fields: WriteBatch) -> Result<DocumentRef> {
        (**self).set(path, fields)
    }

    fn get(&self, path: &DocumentPath) -> Result<Option<Document>> {
        (**self).get(path)
    }

    fn delete(&self, path: &DocumentPath) -> Result<()> {
        (**self).delete(path)
    }

    fn list(&self, collection: &CollectionPath) -> Result<Vec<(String, Document)>> {
        (**self).list(collection)
    }
}
