//! Trait definitions for external interactions
//!
//! These traits define the boundaries between the ranking logic and
//! persistence. Implementations live in other crates (`rarity-store`).

use crate::{Collection, CollectionId, Composite, CompositeScope};
use async_trait::async_trait;
use std::fmt::Display;

/// Trait for reading and writing the composites of a population
///
/// Implemented by the infrastructure layer (rarity-store)
#[async_trait]
pub trait CompositeStore: Send + Sync {
    /// Error type for store operations
    type Error: Display + Send + Sync;

    /// Read the full population for a scope as a point-in-time snapshot
    async fn list_all(&self, scope: &CompositeScope) -> Result<Vec<Composite>, Self::Error>;

    /// Persist one composite, returning the stored version
    ///
    /// Each call succeeds or fails independently of any other update.
    async fn update(
        &self,
        composite: Composite,
        scope: &CompositeScope,
    ) -> Result<Composite, Self::Error>;

    /// Make every accepted update durable
    ///
    /// Called once after a batch of updates. Stores that persist on every
    /// `update` keep the default no-op.
    async fn flush(&self) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Trait for resolving a collection by id
///
/// Implemented by the infrastructure layer (rarity-store)
#[async_trait]
pub trait CollectionLookup: Send + Sync {
    /// Error type for lookup operations
    type Error: Display + Send + Sync;

    /// Get a collection, or `None` if it does not exist
    async fn get(
        &self,
        collection_id: &CollectionId,
        project_id: &str,
    ) -> Result<Option<Collection>, Self::Error>;
}
