//! Composites, collections, and the scope that addresses a population

use crate::ids::{CollectionId, CompositeId};
use crate::Extra;
use crate::rank::{self, RankLabel};
use crate::trait_value::TraitValuePairing;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One generated artwork instance
///
/// `traits` is kept in draw order. Ordering is irrelevant to scoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Composite {
    /// Unique identifier
    pub id: CompositeId,

    /// Trait selections in draw order
    #[serde(default)]
    pub traits: Vec<TraitValuePairing>,

    /// Keys this model does not interpret
    #[serde(flatten)]
    pub extra: Extra,
}

impl Composite {
    /// Create a composite from its pairings
    pub fn new(id: impl Into<CompositeId>, traits: Vec<TraitValuePairing>) -> Self {
        Self {
            id: id.into(),
            traits,
            extra: Extra::new(),
        }
    }

    /// Pairings that take part in rarity scoring
    ///
    /// Rank pairings written by an earlier run are excluded.
    pub fn scored_pairings(&self) -> impl Iterator<Item = &TraitValuePairing> {
        self.traits
            .iter()
            .filter(|pairing| !rank::is_rank_trait(&pairing.trait_def))
    }

    /// Whether any scored pairing carries a present value
    pub fn has_present_values(&self) -> bool {
        self.scored_pairings().any(|pairing| pairing.trait_value.is_some())
    }

    /// The rank label assigned by the most recent ranking run, if any
    pub fn rank(&self) -> Option<RankLabel> {
        self.traits
            .iter()
            .rev()
            .filter(|pairing| rank::is_rank_trait(&pairing.trait_def))
            .find_map(|pairing| pairing.value().and_then(|v| RankLabel::parse(&v.name)))
    }
}

/// A collection of composites within a project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Collection {
    /// Unique identifier
    pub id: CollectionId,

    /// Owning project
    pub project_id: String,

    /// Display name
    pub name: String,

    /// Keys this model does not interpret
    #[serde(flatten)]
    pub extra: Extra,
}

impl Collection {
    /// Create a collection
    pub fn new(
        id: impl Into<CollectionId>,
        project_id: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            project_id: project_id.into(),
            name: name.into(),
            extra: Extra::new(),
        }
    }
}

/// Addresses one population: (project, collection, composite group)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompositeScope {
    /// Project identifier
    pub project_id: String,

    /// Collection identifier
    pub collection_id: CollectionId,

    /// Composite group identifier
    pub group_id: String,
}

impl CompositeScope {
    /// Create a scope
    pub fn new(
        project_id: impl Into<String>,
        collection_id: impl Into<CollectionId>,
        group_id: impl Into<String>,
    ) -> Self {
        Self {
            project_id: project_id.into(),
            collection_id: collection_id.into(),
            group_id: group_id.into(),
        }
    }
}

impl fmt::Display for CompositeScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.project_id, self.collection_id, self.group_id)
    }
}
