//! Rarity Domain Layer
//!
//! This crate contains the data model and the scoring logic for ranking
//! generated composites by rarity. It defines the fundamental concepts,
//! value objects, and the trait interfaces that the store and ranker layers
//! depend upon.
//!
//! ## Key Concepts
//!
//! - **Composite**: One generated artwork with a specific combination of trait values
//! - **TraitDefinition**: A named axis of variation (e.g. "Background")
//! - **TraitValue**: One concrete option for a trait, with a designer-assigned rarity weight
//! - **Population**: The fixed snapshot of composites ranked together
//! - **RankLabel**: Ordinal tier (Legendary → Rare → Uncommon → Common)
//!
//! ## Architecture
//!
//! - Pure business logic only, no I/O
//! - Persistence lives in `rarity-store`, orchestration in `rarity-ranker`
//! - Trait definitions for all external interactions
//! - Documents keep keys the model does not interpret ([`Extra`]), so a
//!   read-modify-write never drops data

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod composite;
pub mod ids;
pub mod rank;
pub mod scoring;
pub mod trait_definition;
pub mod trait_value;
pub mod traits;

/// Document keys a model does not interpret, carried through unchanged
pub type Extra = serde_json::Map<String, serde_json::Value>;

// Re-exports for convenience
pub use composite::{Collection, Composite, CompositeScope};
pub use ids::{CollectionId, CompositeId, TraitId, TraitValueId};
pub use rank::{is_rank_trait, rank_trait, RankAssignment, RankLabel};
pub use scoring::{RarityScorer, ScoreOrder, ScoringStrategy};
pub use trait_definition::TraitDefinition;
pub use trait_value::{ImageLayer, TraitValue, TraitValuePairing};
