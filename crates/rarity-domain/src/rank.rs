//! Rank module - ordinal tier labels and the synthetic Rank trait

use crate::composite::Composite;
use crate::ids::TraitValueId;
use crate::trait_definition::TraitDefinition;
use crate::trait_value::{TraitValue, TraitValuePairing};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Well-known identity of the synthetic Rank trait
pub const RANK_TRAIT_ID: &str = "rank";

/// Display name of the synthetic Rank trait
pub const RANK_TRAIT_NAME: &str = "Rank";

/// Draw order of the Rank trait (above every artwork layer)
pub const RANK_Z_INDEX: i32 = 99;

/// Rank label assigned by ordinal position in the rarity-sorted population
///
/// Variants are declared rarest first, so the derived ordering runs
/// Legendary < Rare < Uncommon < Common.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RankLabel {
    /// The top `legendary` composites
    Legendary,

    /// The next `rare` composites
    Rare,

    /// The next `uncommon` composites
    Uncommon,

    /// Everything else
    Common,
}

impl RankLabel {
    /// All labels, rarest first
    pub const ALL: [RankLabel; 4] = [
        RankLabel::Legendary,
        RankLabel::Rare,
        RankLabel::Uncommon,
        RankLabel::Common,
    ];

    /// Get the label name as written into composite metadata
    pub fn as_str(&self) -> &'static str {
        match self {
            RankLabel::Legendary => "Legendary",
            RankLabel::Rare => "Rare",
            RankLabel::Uncommon => "Uncommon",
            RankLabel::Common => "Common",
        }
    }

    /// Parse a label (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "legendary" => Some(RankLabel::Legendary),
            "rare" => Some(RankLabel::Rare),
            "uncommon" => Some(RankLabel::Uncommon),
            "common" => Some(RankLabel::Common),
            _ => None,
        }
    }
}

impl fmt::Display for RankLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for RankLabel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid rank label: {}", s))
    }
}

/// The synthetic Rank trait definition
///
/// Metadata-only and excluded from duplicate detection, so it never affects
/// rendering or uniqueness checks.
pub fn rank_trait() -> TraitDefinition {
    TraitDefinition {
        is_metadata_only: true,
        exclude_from_duplicate_detection: true,
        ..TraitDefinition::new(RANK_TRAIT_ID, RANK_TRAIT_NAME, RANK_Z_INDEX)
    }
}

/// Whether a trait definition is the synthetic Rank trait
///
/// Older runs minted the Rank trait with a random id, so a metadata-only
/// trait named "Rank" also counts.
pub fn is_rank_trait(def: &TraitDefinition) -> bool {
    def.id.as_str() == RANK_TRAIT_ID || (def.is_metadata_only && def.name == RANK_TRAIT_NAME)
}

/// Builds the rank pairing written back onto each composite
pub struct RankAssignment;

impl RankAssignment {
    /// A fresh rank pairing for a label
    ///
    /// The value gets a new identity every time and carries `rarity = 1`.
    pub fn pairing(label: RankLabel) -> TraitValuePairing {
        TraitValuePairing::new(
            rank_trait(),
            Some(TraitValue::new(TraitValueId::new(), label.as_str(), 1.0)),
        )
    }

    /// Append a rank pairing to a composite
    ///
    /// A rank pairing left by an earlier run is replaced, so the composite
    /// always ends up with exactly one.
    pub fn apply(mut composite: Composite, label: RankLabel) -> Composite {
        composite
            .traits
            .retain(|pairing| !is_rank_trait(&pairing.trait_def));
        composite.traits.push(Self::pairing(label));
        composite
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_round_trip() {
        for label in RankLabel::ALL {
            assert_eq!(RankLabel::parse(label.as_str()), Some(label));
            assert_eq!(label.to_string().parse::<RankLabel>(), Ok(label));
        }
        assert_eq!(RankLabel::parse("LEGENDARY"), Some(RankLabel::Legendary));
        assert!("mythic".parse::<RankLabel>().is_err());
    }

    #[test]
    fn test_labels_ordered_rarest_first() {
        assert!(RankLabel::Legendary < RankLabel::Rare);
        assert!(RankLabel::Rare < RankLabel::Uncommon);
        assert!(RankLabel::Uncommon < RankLabel::Common);
    }

    #[test]
    fn test_rank_trait_flags() {
        let def = rank_trait();
        assert_eq!(def.name, "Rank");
        assert_eq!(def.z_index, 99);
        assert!(def.is_metadata_only);
        assert!(!def.is_artwork_only);
        assert!(!def.is_always_unique);
        assert!(def.exclude_from_duplicate_detection);
        assert!(is_rank_trait(&def));
    }

    #[test]
    fn test_pairing_shape() {
        let pairing = RankAssignment::pairing(RankLabel::Uncommon);
        let value = pairing.value().unwrap();

        assert_eq!(value.name, "Uncommon");
        assert_eq!(value.rarity, 1.0);
        assert!(pairing.image_layer.is_none());
        assert_ne!(
            value.id,
            RankAssignment::pairing(RankLabel::Uncommon).value().unwrap().id
        );
    }

    #[test]
    fn test_apply_appends_and_replaces() {
        let base = TraitValuePairing::new(
            TraitDefinition::new("bg", "Background", 0),
            Some(TraitValue::new("red", "Red", 0.5)),
        );
        let composite = Composite::new("c1", vec![base.clone()]);

        let first = RankAssignment::apply(composite, RankLabel::Common);
        assert_eq!(first.traits.len(), 2);
        assert_eq!(first.traits[0], base);

        let second = RankAssignment::apply(first, RankLabel::Legendary);
        assert_eq!(second.traits.len(), 2);
        assert_eq!(second.traits[0], base);
        assert_eq!(second.rank(), Some(RankLabel::Legendary));
    }

    #[test]
    fn test_legacy_rank_trait_is_replaced() {
        let legacy = TraitValuePairing::new(
            TraitDefinition {
                is_metadata_only: true,
                ..TraitDefinition::new("0190a8f2-7c1e-7d3a-9b4c-2f1e0d9c8b7a", "Rank", 99)
            },
            Some(TraitValue::new("v-old", "Rare", 1.0)),
        );
        let base = TraitValuePairing::new(
            TraitDefinition::new("bg", "Background", 0),
            Some(TraitValue::new("red", "Red", 0.5)),
        );
        let composite = Composite::new("c1", vec![base.clone(), legacy]);

        assert_eq!(composite.rank(), Some(RankLabel::Rare));
        assert_eq!(composite.scored_pairings().count(), 1);

        let ranked = RankAssignment::apply(composite, RankLabel::Common);
        assert_eq!(ranked.traits.len(), 2);
        assert_eq!(ranked.traits[0], base);
        assert_eq!(ranked.traits[1].trait_def.id.as_str(), RANK_TRAIT_ID);
        assert_eq!(ranked.rank(), Some(RankLabel::Common));
    }

    #[test]
    fn test_artwork_trait_named_rank_is_scored() {
        let def = TraitDefinition::new("t-rank", "Rank", 3);
        assert!(!is_rank_trait(&def));
    }
}
