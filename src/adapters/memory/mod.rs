//! In-memory adapters.
//!
//! Backing store for tests and for running without a database.

mod store;

pub use store::InMemoryStore;
