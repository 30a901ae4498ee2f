//! Infrastructure layer - Store boundary and persistence

pub mod config;
pub mod memory;
pub mod repository;
pub mod store;

pub use config::Config;
pub use memory::InMemoryStore;
pub use repository::JournalRepository;
pub use store::{
    CollectionPath, Document, DocumentPath, DocumentRef, DocumentStore, Value, WriteBatch,
    WriteField,
};
