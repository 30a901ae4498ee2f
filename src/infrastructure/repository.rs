//! Journal repository facade

use crate::domain::entry::{word_count, Distortion, EntryListing, NewEntry, StoredEntry};
use crate::domain::timestamp::{sort_newest_first, Timestamp};
use crate::error::{JournalError, Result};
use crate::infrastructure::config::Config;
use crate::infrastructure::store::{
    CollectionPath, Document, DocumentPath, DocumentRef, DocumentStore, Value, WriteBatch,
    WriteField,
};
use tracing::{debug, info};

const FIELD_EMAIL: &str = "email";
const FIELD_TITLE: &str = "title";
const FIELD_CONTENT: &str = "post_content";
const FIELD_TIME_CREATED: &str = "time_created";
const FIELD_TIME_LAST_EDITED: &str = "time_last_edited";
const FIELD_DISTORTIONS: &str = "distortions";

/// Data-access facade for one user's journal.
///
/// Bound at construction to a store handle, a top-level collection, and a
/// user identifier; every operation addresses documents under
/// `<collection>/<user_id>/<entries_subcollection>/`.
///
/// The facade is stateless beyond the bound identifiers. Store faults
/// propagate unchanged; no retries are performed here.
pub struct JournalRepository<S> {
    store: S,
    collection: String,
    entries_subcollection: String,
    user_id: String,
}

impl<S: DocumentStore> JournalRepository<S> {
    /// Bind a repository to a store, collection, and user identifier.
    pub fn new(store: S, collection: &str, user_id: &str) -> Self {
        JournalRepository {
            store,
            collection: collection.to_string(),
            entries_subcollection: "journalEntries".to_string(),
            user_id: user_id.to_string(),
        }
    }

    /// Bind a repository using configured collection names.
    pub fn with_config(store: S, config: &Config, user_id: &str) -> Self {
        JournalRepository {
            store,
            collection: config.collection(),
            entries_subcollection: config.entries_subcollection.clone(),
            user_id: user_id.to_string(),
        }
    }

    fn user_doc(&self) -> DocumentPath {
        CollectionPath::root(&self.collection).doc(&self.user_id)
    }

    fn entries(&self) -> CollectionPath {
        self.user_doc().collection(&self.entries_subcollection)
    }

    fn entry_doc(&self, entry_id: &str) -> DocumentPath {
        self.entries().doc(entry_id)
    }

    /// Upsert the user's email with merge semantics: existing fields on the
    /// user document survive, and repeat calls are a no-op at the store.
    ///
    /// If an initial entry is supplied it is written via [`Self::add_entry`].
    /// The two writes are not atomic together.
    pub fn create_user(&self, email: &str, initial_entry: Option<NewEntry>) -> Result<()> {
        let mut fields = WriteBatch::new();
        fields.insert(FIELD_EMAIL.to_string(), WriteField::text(email));

        self.store.upsert_merge(&self.user_doc(), fields)?;
        info!(user_id = %self.user_id, email, "user record upserted");

        if let Some(entry) = initial_entry {
            self.add_entry(&entry)?;
        }
        Ok(())
    }

    /// Write an entry document, replacing any existing entry with the same
    /// identifier in full. Creation and last-edited times are assigned by
    /// the store at write time.
    ///
    /// Entry identifier uniqueness is the caller's responsibility; a
    /// colliding identifier silently overwrites.
    pub fn add_entry(&self, entry: &NewEntry) -> Result<DocumentRef> {
        let distortions = match &entry.distortion {
            Some(distortion) => Value::Array(vec![
                Value::Text(distortion.dominant.clone()),
                Value::Text(distortion.secondary.clone()),
            ]),
            None => Value::Null,
        };

        let mut fields = WriteBatch::new();
        fields.insert(FIELD_TITLE.to_string(), WriteField::text(&entry.title));
        fields.insert(FIELD_CONTENT.to_string(), WriteField::text(&entry.content));
        fields.insert(FIELD_TIME_CREATED.to_string(), WriteField::ServerTimestamp);
        fields.insert(
            FIELD_TIME_LAST_EDITED.to_string(),
            WriteField::ServerTimestamp,
        );
        fields.insert(
            FIELD_DISTORTIONS.to_string(),
            WriteField::Value(distortions),
        );

        let doc_ref = self.store.set(&self.entry_doc(&entry.entry_id), fields)?;
        info!(user_id = %self.user_id, entry_id = %entry.entry_id, "journal entry written");
        Ok(doc_ref)
    }

    /// Remove an entry. Deleting an absent entry is silent.
    pub fn delete_entry(&self, entry_id: &str) -> Result<()> {
        self.store.delete(&self.entry_doc(entry_id))?;
        debug!(user_id = %self.user_id, entry_id, "journal entry deleted");
        Ok(())
    }

    /// Fetch one entry, `None` if absent.
    pub fn get_entry(&self, entry_id: &str) -> Result<Option<StoredEntry>> {
        let path = self.entry_doc(entry_id);
        match self.store.get(&path)? {
            Some(document) => Ok(Some(decode_entry(&path, &document)?)),
            None => Ok(None),
        }
    }

    /// Every entry for the bound user, newest first.
    ///
    /// Creation times arrive as native store timestamps or string encodings;
    /// ordering uses the UTC-normalized instant while the returned records
    /// keep the stored values untouched. Entries without a creation time
    /// sort last.
    pub fn list_entries(&self) -> Result<Vec<EntryListing>> {
        let documents = self.store.list(&self.entries())?;
        debug!(user_id = %self.user_id, count = documents.len(), "listing journal entries");

        let mut listings = Vec::with_capacity(documents.len());
        for (entry_id, document) in documents {
            let path = self.entry_doc(&entry_id);
            let entry = decode_entry(&path, &document)?;
            listings.push(EntryListing {
                entry_id,
                word_count: word_count(&entry.content),
                title: entry.title,
                content: entry.content,
                time_created: entry.time_created,
                time_last_edited: entry.time_last_edited,
                distortions: entry.distortions,
            });
        }

        sort_newest_first(listings)
    }
}

fn malformed(path: &DocumentPath, reason: String) -> JournalError {
    JournalError::MalformedDocument {
        path: path.as_str().to_string(),
        reason,
    }
}

fn decode_entry(path: &DocumentPath, document: &Document) -> Result<StoredEntry> {
    Ok(StoredEntry {
        title: require_text(path, document, FIELD_TITLE)?,
        content: require_text(path, document, FIELD_CONTENT)?,
        time_created: decode_timestamp(path, document, FIELD_TIME_CREATED)?,
        time_last_edited: decode_timestamp(path, document, FIELD_TIME_LAST_EDITED)?,
        distortions: decode_distortions(path, document)?,
    })
}

fn require_text(path: &DocumentPath, document: &Document, field: &str) -> Result<String> {
    match document.get(field) {
        Some(Value::Text(text)) => Ok(text.clone()),
        Some(_) => Err(malformed(path, format!("field '{}' is not text", field))),
        None => Err(malformed(path, format!("missing field '{}'", field))),
    }
}

fn decode_timestamp(
    path: &DocumentPath,
    document: &Document,
    field: &str,
) -> Result<Option<Timestamp>> {
    match document.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Timestamp(instant)) => Ok(Some(Timestamp::Instant(*instant))),
        Some(Value::Text(text)) => Ok(Some(Timestamp::Text(text.clone()))),
        Some(_) => Err(malformed(
            path,
            format!("field '{}' is not a timestamp", field),
        )),
    }
}

fn decode_distortions(path: &DocumentPath, document: &Document) -> Result<Option<Distortion>> {
    match document.get(FIELD_DISTORTIONS) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Array(labels)) => match labels.as_slice() {
            [Value::Text(dominant), Value::Text(secondary)] => Ok(Some(Distortion {
                dominant: dominant.clone(),
                secondary: secondary.clone(),
            })),
            _ => Err(malformed(
                path,
                "'distortions' is not a pair of labels".to_string(),
            )),
        },
        Some(_) => Err(malformed(path, "'distortions' is not an array".to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn doc(fields: &[(&str, Value)]) -> Document {
        fields
            .iter()
            .map(|(name, value)| (name.to_string(), value.clone()))
            .collect()
    }

    fn entry_path() -> DocumentPath {
        CollectionPath::root("users")
            .doc("u1")
            .collection("journalEntries")
            .doc("e1")
    }

    #[test]
    fn test_decode_full_entry() {
        let created = Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap();
        let document = doc(&[
            ("title", Value::Text("My Day".to_string())),
            ("post_content", Value::Text("Today I...".to_string())),
            ("time_created", Value::Timestamp(created)),
            ("time_last_edited", Value::Timestamp(created)),
            (
                "distortions",
                Value::Array(vec![
                    Value::Text("Catastrophizing".to_string()),
                    Value::Text("Overgeneralization".to_string()),
                ]),
            ),
        ]);

        let entry = decode_entry(&entry_path(), &document).unwrap();
        assert_eq!(entry.title, "My Day");
        assert_eq!(entry.content, "Today I...");
        assert_eq!(entry.time_created, Some(Timestamp::Instant(created)));
        assert_eq!(
            entry.distortions,
            Some(Distortion {
                dominant: "Catastrophizing".to_string(),
                secondary: "Overgeneralization".to_string(),
            })
        );
    }

    #[test]
    fn test_decode_null_distortions() {
        let document = doc(&[
            ("title", Value::Text("t".to_string())),
            ("post_content", Value::Text("c".to_string())),
            ("distortions", Value::Null),
        ]);

        let entry = decode_entry(&entry_path(), &document).unwrap();
        assert_eq!(entry.distortions, None);
        assert_eq!(entry.time_created, None);
    }

    #[test]
    fn test_decode_text_timestamp_stays_text() {
        let document = doc(&[
            ("title", Value::Text("t".to_string())),
            ("post_content", Value::Text("c".to_string())),
            (
                "time_created",
                Value::Text("2024-01-01T10:00:00Z".to_string()),
            ),
        ]);

        let entry = decode_entry(&entry_path(), &document).unwrap();
        assert_eq!(
            entry.time_created,
            Some(Timestamp::Text("2024-01-01T10:00:00Z".to_string()))
        );
    }

    #[test]
    fn test_decode_missing_title_fails() {
        let document = doc(&[("post_content", Value::Text("c".to_string()))]);

        let result = decode_entry(&entry_path(), &document);
        match result {
            Err(JournalError::MalformedDocument { reason, .. }) => {
                assert!(reason.contains("title"));
            }
            other => panic!("Expected MalformedDocument, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_single_label_distortions_fails() {
        let document = doc(&[
            ("title", Value::Text("t".to_string())),
            ("post_content", Value::Text("c".to_string())),
            (
                "distortions",
                Value::Array(vec![Value::Text("Catastrophizing".to_string())]),
            ),
        ]);

        let result = decode_entry(&entry_path(), &document);
        assert!(matches!(
            result,
            Err(JournalError::MalformedDocument { .. })
        ));
    }

    #[test]
    fn test_decode_non_timestamp_field_fails() {
        let document = doc(&[
            ("title", Value::Text("t".to_string())),
            ("post_content", Value::Text("c".to_string())),
            ("time_created", Value::Integer(42)),
        ]);

        let result = decode_entry(&entry_path(), &document);
        assert!(matches!(
            result,
            Err(JournalError::MalformedDocument { .. })
        ));
    }
}
