//! Rarity Storage Layer
//!
//! Implements the `CompositeStore` and `CollectionLookup` traits.
//!
//! # Architecture
//!
//! - [`MemoryStore`]: populations held in memory, for tests and embedding
//! - [`JsonFileStore`]: a single JSON document on disk, written atomically on flush
//!
//! Both adapters guard their state with a `RwLock` and never hold it across
//! an await point, so concurrent updates from one ranking run are safe.
//!
//! # Examples
//!
//! ```no_run
//! use rarity_store::JsonFileStore;
//!
//! let store = JsonFileStore::open("composites.json").unwrap();
//! // Store is now ready for ranking runs
//! ```

#![warn(missing_docs)]

mod json_file;
mod memory;

pub use json_file::{CompositeGroup, JsonFileStore, StoreDocument};
pub use memory::MemoryStore;

use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Population or composite not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// File access error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed or unwritable document
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A writer panicked while holding the store lock
    #[error("Store lock poisoned")]
    Poisoned,
}
