use journal_store::domain::{Distortion, NewEntry};
use journal_store::infrastructure::{InMemoryStore, JournalRepository};

pub const USER_ID: &str = "UID_12345";

pub fn repository(store: &InMemoryStore) -> JournalRepository<&InMemoryStore> {
    JournalRepository::new(store, "users", USER_ID)
}

pub fn entry(entry_id: &str, title: &str, content: &str) -> NewEntry {
    NewEntry {
        entry_id: entry_id.to_string(),
        title: title.to_string(),
        content: content.to_string(),
        distortion: None,
    }
}

pub fn classified_entry(
    entry_id: &str,
    title: &str,
    content: &str,
    dominant: &str,
    secondary: &str,
) -> NewEntry {
    NewEntry {
        distortion: Some(Distortion {
            dominant: dominant.to_string(),
            secondary: secondary.to_string(),
        }),
        ..entry(entry_id, title, content)
    }
}
