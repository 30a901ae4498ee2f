//! Journal entry records

use crate::domain::timestamp::Timestamp;
use serde::{Deserialize, Serialize};

/// Cognitive-distortion classification attached to an entry.
///
/// Serde field names mirror the classifier payload verbatim, so the struct
/// deserializes straight from the upstream JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Distortion {
    #[serde(rename = "Dominant Distortion")]
    pub dominant: String,
    #[serde(rename = "Secondary Distortion (Optional)")]
    pub secondary: String,
}

/// Payload for writing a new journal entry.
///
/// The entry identifier is caller-supplied; writing an identifier that
/// already exists replaces that entry in full.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEntry {
    pub entry_id: String,
    pub title: String,
    pub content: String,
    pub distortion: Option<Distortion>,
}

/// A single decoded entry document, as returned by a point read.
///
/// Timestamps are `None` when the stored field is absent or null.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredEntry {
    pub title: String,
    pub content: String,
    pub time_created: Option<Timestamp>,
    pub time_last_edited: Option<Timestamp>,
    pub distortions: Option<Distortion>,
}

/// One record of a `list_entries` result.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryListing {
    pub entry_id: String,
    pub title: String,
    pub content: String,
    pub time_created: Option<Timestamp>,
    pub time_last_edited: Option<Timestamp>,
    pub distortions: Option<Distortion>,
    pub word_count: usize,
}

/// Character length of the entry content.
///
/// Kept as a character count rather than a whitespace split to preserve the
/// behavior callers already rely on; the field name predates the mismatch.
pub fn word_count(content: &str) -> usize {
    content.chars().count()
}
