//! Domain layer - Entry records and creation-time normalization

pub mod entry;
pub mod timestamp;

pub use entry::{Distortion, EntryListing, NewEntry, StoredEntry};
pub use timestamp::Timestamp;
