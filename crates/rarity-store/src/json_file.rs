//! JSON document implementation of the store traits

use crate::StoreError;
use async_trait::async_trait;
use rarity_domain::traits::{CollectionLookup, CompositeStore};
use rarity_domain::{Collection, CollectionId, Composite, CompositeScope, Extra};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;

/// On-disk layout of a [`JsonFileStore`]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreDocument {
    /// Known collections
    #[serde(default)]
    pub collections: Vec<Collection>,

    /// Composite populations, one per (project, collection, group)
    #[serde(default)]
    pub groups: Vec<CompositeGroup>,

    /// Top-level keys the store does not interpret
    #[serde(flatten)]
    pub extra: Extra,
}

/// One population inside a [`StoreDocument`]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompositeGroup {
    /// Project identifier
    pub project_id: String,

    /// Collection identifier
    pub collection_id: CollectionId,

    /// Composite group identifier
    pub group_id: String,

    /// Composites in stored order
    #[serde(default)]
    pub composites: Vec<Composite>,

    /// Group keys the store does not interpret
    #[serde(flatten)]
    pub extra: Extra,
}

impl CompositeGroup {
    /// Create the population for a scope
    pub fn new(scope: &CompositeScope, composites: Vec<Composite>) -> Self {
        Self {
            project_id: scope.project_id.clone(),
            collection_id: scope.collection_id.clone(),
            group_id: scope.group_id.clone(),
            composites,
            extra: Extra::new(),
        }
    }

    fn matches(&self, scope: &CompositeScope) -> bool {
        self.project_id == scope.project_id
            && self.collection_id == scope.collection_id
            && self.group_id == scope.group_id
    }
}

impl StoreDocument {
    fn group(&self, scope: &CompositeScope) -> Option<&CompositeGroup> {
        self.groups.iter().find(|group| group.matches(scope))
    }

    fn group_mut(&mut self, scope: &CompositeScope) -> Option<&mut CompositeGroup> {
        self.groups.iter_mut().find(|group| group.matches(scope))
    }
}

/// Store backed by a single pretty-printed JSON file
///
/// Reads and updates are served from memory. [`CompositeStore::flush`]
/// writes the whole document once, to a staging file that is then renamed
/// over the original, so the file on disk is always either the old or the
/// new document. Updates that are never flushed are lost when the store is
/// dropped.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    document: RwLock<StoreDocument>,
    dirty: AtomicBool,
    flush_lock: tokio::sync::Mutex<()>,
}

impl JsonFileStore {
    /// Load an existing document
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read or is not a valid store document.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let contents = fs::read_to_string(&path)?;
        let document: StoreDocument = serde_json::from_str(&contents)?;

        tracing::debug!(
            "Opened store {} ({} collections, {} groups)",
            path.display(),
            document.collections.len(),
            document.groups.len()
        );

        Ok(Self::with_document(path, document))
    }

    /// Start a new document at `path`, writing it immediately
    pub fn create<P: AsRef<Path>>(path: P, document: StoreDocument) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        write_atomic(&path, &serde_json::to_vec_pretty(&document)?)?;
        Ok(Self::with_document(path, document))
    }

    fn with_document(path: PathBuf, document: StoreDocument) -> Self {
        Self {
            path,
            document: RwLock::new(document),
            dirty: AtomicBool::new(false),
            flush_lock: tokio::sync::Mutex::new(()),
        }
    }

    /// Snapshot of the in-memory document
    pub fn document(&self) -> Result<StoreDocument, StoreError> {
        self.document
            .read()
            .map(|document| document.clone())
            .map_err(|_| StoreError::Poisoned)
    }

    async fn write_snapshot(&self) -> Result<(), StoreError> {
        let contents = {
            let document = self.document.read().map_err(|_| StoreError::Poisoned)?;
            serde_json::to_vec_pretty(&*document)?
        };

        let path = self.path.clone();
        tokio::task::spawn_blocking(move || write_atomic(&path, &contents))
            .await
            .map_err(|e| StoreError::Io(io::Error::other(e)))?
    }
}

/// Sibling file the document is staged in before it replaces `path`
fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

fn write_atomic(path: &Path, contents: &[u8]) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let staging = staging_path(path);
    let staged = fs::File::create(&staging).and_then(|mut file| {
        file.write_all(contents)?;
        file.sync_all()
    });

    if let Err(e) = staged.and_then(|_| fs::rename(&staging, path)) {
        let _ = fs::remove_file(&staging);
        return Err(e.into());
    }
    Ok(())
}

#[async_trait]
impl CompositeStore for JsonFileStore {
    type Error = StoreError;

    async fn list_all(&self, scope: &CompositeScope) -> Result<Vec<Composite>, Self::Error> {
        let document = self.document.read().map_err(|_| StoreError::Poisoned)?;
        Ok(document
            .group(scope)
            .map(|group| group.composites.clone())
            .unwrap_or_default())
    }

    async fn update(
        &self,
        composite: Composite,
        scope: &CompositeScope,
    ) -> Result<Composite, Self::Error> {
        let mut document = self.document.write().map_err(|_| StoreError::Poisoned)?;

        let slot = document
            .group_mut(scope)
            .and_then(|group| group.composites.iter_mut().find(|c| c.id == composite.id))
            .ok_or_else(|| StoreError::NotFound(format!("composite {} in {}", composite.id, scope)))?;

        *slot = composite.clone();
        self.dirty.store(true, Ordering::SeqCst);

        tracing::debug!("Updated composite {} in {}", composite.id, scope);
        Ok(composite)
    }

    async fn flush(&self) -> Result<(), Self::Error> {
        let _guard = self.flush_lock.lock().await;
        if !self.dirty.swap(false, Ordering::SeqCst) {
            return Ok(());
        }

        match self.write_snapshot().await {
            Ok(()) => {
                tracing::debug!("Flushed store to {}", self.path.display());
                Ok(())
            }
            Err(e) => {
                // Memory is still ahead of disk; a later flush retries
                self.dirty.store(true, Ordering::SeqCst);
                Err(e)
            }
        }
    }
}

#[async_trait]
impl CollectionLookup for JsonFileStore {
    type Error = StoreError;

    async fn get(
        &self,
        collection_id: &CollectionId,
        project_id: &str,
    ) -> Result<Option<Collection>, Self::Error> {
        let document = self.document.read().map_err(|_| StoreError::Poisoned)?;
        Ok(document
            .collections
            .iter()
            .find(|c| &c.id == collection_id && c.project_id == project_id)
            .cloned())
    }
}
