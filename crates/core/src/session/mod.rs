//! Persisted session identifiers.
//!
//! The ticket page keeps a single cookie named `ticket` so that reopening it
//! does not lose track of the ticket. `SessionStore` abstracts where that
//! cookie lives; `FileSessionStore` keeps it in a small JSON cookie jar on
//! disk and `MemorySessionStore` keeps it in process.

mod file_store;
mod memory_store;
mod types;

pub use file_store::FileSessionStore;
pub use memory_store::MemorySessionStore;
pub use types::*;
