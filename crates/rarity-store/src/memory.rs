//! In-memory implementation of the store traits

use crate::StoreError;
use async_trait::async_trait;
use rarity_domain::traits::{CollectionLookup, CompositeStore};
use rarity_domain::{Collection, CollectionId, Composite, CompositeScope};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::RwLock;

/// In-memory store of collections and their composite populations
///
/// # Examples
///
/// ```
/// use rarity_domain::{Composite, CompositeScope};
/// use rarity_store::MemoryStore;
///
/// let store = MemoryStore::new();
/// let scope = CompositeScope::new("project", "collection", "group");
/// store.insert_composites(&scope, vec![Composite::new("c1", vec![])]);
///
/// assert_eq!(store.composites(&scope).len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<(String, CollectionId), Collection>>,
    populations: RwLock<HashMap<CompositeScope, Vec<Composite>>>,
    writes: AtomicUsize,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a collection
    pub fn insert_collection(&self, collection: Collection) {
        if let Ok(mut collections) = self.collections.write() {
            collections.insert(
                (collection.project_id.clone(), collection.id.clone()),
                collection,
            );
        }
    }

    /// Add composites to a scope's population, keeping insertion order
    pub fn insert_composites(&self, scope: &CompositeScope, composites: Vec<Composite>) {
        if let Ok(mut populations) = self.populations.write() {
            populations.entry(scope.clone()).or_default().extend(composites);
        }
    }

    /// Snapshot of a scope's population (empty if unknown)
    pub fn composites(&self, scope: &CompositeScope) -> Vec<Composite> {
        self.populations
            .read()
            .ok()
            .and_then(|populations| populations.get(scope).cloned())
            .unwrap_or_default()
    }

    /// Number of successful updates since creation
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CompositeStore for MemoryStore {
    type Error = StoreError;

    async fn list_all(&self, scope: &CompositeScope) -> Result<Vec<Composite>, Self::Error> {
        let populations = self.populations.read().map_err(|_| StoreError::Poisoned)?;
        Ok(populations.get(scope).cloned().unwrap_or_default())
    }

    async fn update(
        &self,
        composite: Composite,
        scope: &CompositeScope,
    ) -> Result<Composite, Self::Error> {
        let mut populations = self.populations.write().map_err(|_| StoreError::Poisoned)?;

        let slot = populations
            .get_mut(scope)
            .and_then(|population| population.iter_mut().find(|c| c.id == composite.id))
            .ok_or_else(|| StoreError::NotFound(format!("composite {} in {}", composite.id, scope)))?;

        *slot = composite.clone();
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(composite)
    }
}

#[async_trait]
impl CollectionLookup for MemoryStore {
    type Error = StoreError;

    async fn get(
        &self,
        collection_id: &CollectionId,
        project_id: &str,
    ) -> Result<Option<Collection>, Self::Error> {
        let collections = self.collections.read().map_err(|_| StoreError::Poisoned)?;
        Ok(collections
            .get(&(project_id.to_string(), collection_id.clone()))
            .cloned())
    }
}
