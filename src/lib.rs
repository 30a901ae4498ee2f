//! journal-store - Data-access layer for a personal journaling application
//!
//! Shapes queries and documents for a hierarchical document store: a user
//! record keyed by user identifier, holding a sub-collection of journal
//! entries keyed by entry identifier. Persistence itself is delegated to a
//! [`infrastructure::DocumentStore`] backend injected at construction.

pub mod domain;
pub mod error;
pub mod infrastructure;

pub use error::JournalError;
