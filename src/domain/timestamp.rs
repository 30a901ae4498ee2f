//! Creation-time parsing and listing order

use crate::domain::entry::EntryListing;
use crate::error::{JournalError, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use std::cmp::Ordering;

/// A creation or edit time as it arrives from the store.
///
/// Server-assigned fields come back as native timestamp values, but entries
/// written by older clients carry string encodings, with or without an
/// offset. The union keeps both forms explicit instead of sniffing types at
/// runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Timestamp {
    /// Structured timestamp straight from the store
    Instant(DateTime<Utc>),
    /// String-encoded timestamp, parsed during sorting
    Text(String),
}

impl Timestamp {
    /// Normalize to a UTC instant.
    ///
    /// Text values carrying an offset are converted to the equivalent UTC
    /// instant. Text values without an offset are taken to already be UTC:
    /// the clock value is kept and only the marker attached.
    pub fn to_utc(&self) -> Result<DateTime<Utc>> {
        match self {
            Timestamp::Instant(instant) => Ok(*instant),
            Timestamp::Text(text) => parse_text_timestamp(text),
        }
    }
}

/// Offset-less encodings accepted from older clients.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Offset-bearing encodings not covered by RFC 3339 (e.g. "+0000").
const OFFSET_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f%z", "%Y-%m-%d %H:%M:%S%.f%z"];

fn parse_text_timestamp(text: &str) -> Result<DateTime<Utc>> {
    let trimmed = text.trim();

    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(parsed.with_timezone(&Utc));
    }
    if let Ok(parsed) = DateTime::parse_from_rfc2822(trimmed) {
        return Ok(parsed.with_timezone(&Utc));
    }
    for format in OFFSET_FORMATS {
        if let Ok(parsed) = DateTime::parse_from_str(trimmed, format) {
            return Ok(parsed.with_timezone(&Utc));
        }
    }

    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(naive.and_utc());
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        if let Some(naive) = date.and_hms_opt(0, 0, 0) {
            return Ok(naive.and_utc());
        }
    }

    Err(JournalError::InvalidTimestamp(text.to_string()))
}

/// Sort listings by UTC-normalized creation time, newest first.
///
/// Entries without a creation time sort last. The sort is stable, so entries
/// with equal instants keep their input order. Normalization only drives the
/// ordering; the `time_created` values in the returned records are untouched.
///
/// An unparseable text timestamp fails the whole call rather than producing a
/// silently wrong order.
pub fn sort_newest_first(entries: Vec<EntryListing>) -> Result<Vec<EntryListing>> {
    let mut keyed = Vec::with_capacity(entries.len());
    for entry in entries {
        let instant = match &entry.time_created {
            Some(timestamp) => Some(timestamp.to_utc()?),
            None => None,
        };
        keyed.push((instant, entry));
    }

    keyed.sort_by(|(a, _), (b, _)| match (a, b) {
        (Some(ta), Some(tb)) => tb.cmp(ta), // Reverse order for descending
        (Some(_), None) => Ordering::Less,  // Timestamped before untimestamped
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });

    Ok(keyed.into_iter().map(|(_, entry)| entry).collect())
}
