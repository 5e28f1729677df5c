//! Trait definitions - the named axes of variation

use crate::ids::TraitId;
use crate::Extra;
use serde::{Deserialize, Serialize};

/// A named axis of variation, e.g. "Background" or "Eyes"
///
/// Immutable once created. The `id` is the join key used throughout scoring;
/// two pairings refer to the same trait exactly when their ids match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TraitDefinition {
    /// Unique identifier
    pub id: TraitId,

    /// Display name
    pub name: String,

    /// Draw order; higher layers render on top
    pub z_index: i32,

    /// Trait sets this trait belongs to
    #[serde(default)]
    pub trait_set_ids: Vec<String>,

    /// Written to metadata but never rendered as artwork
    #[serde(default)]
    pub is_metadata_only: bool,

    /// Rendered as artwork but left out of metadata
    #[serde(default)]
    pub is_artwork_only: bool,

    /// Every composite must carry a distinct value for this trait
    #[serde(default)]
    pub is_always_unique: bool,

    /// Ignored when detecting duplicate composites
    #[serde(default)]
    pub exclude_from_duplicate_detection: bool,

    /// Keys this model does not interpret
    #[serde(flatten)]
    pub extra: Extra,
}

impl TraitDefinition {
    /// Create a plain trait definition with every flag cleared
    pub fn new(id: impl Into<TraitId>, name: impl Into<String>, z_index: i32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            z_index,
            trait_set_ids: Vec::new(),
            is_metadata_only: false,
            is_artwork_only: false,
            is_always_unique: false,
            exclude_from_duplicate_detection: false,
            extra: Extra::new(),
        }
    }
}
