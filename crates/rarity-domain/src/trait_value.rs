//! Trait values and the per-composite pairings that select them

use crate::ids::{TraitId, TraitValueId};
use crate::trait_definition::TraitDefinition;
use crate::Extra;
use serde::{Deserialize, Serialize};

/// One concrete option for a trait
///
/// `rarity` is the designer-assigned base weight of this value. Smaller
/// weights are rarer under the weight-product strategy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraitValue {
    /// Unique identifier
    pub id: TraitValueId,

    /// Display name
    pub name: String,

    /// Designer-assigned weight (positive)
    pub rarity: f64,

    /// Keys this model does not interpret
    #[serde(flatten)]
    pub extra: Extra,
}

impl TraitValue {
    /// Create a trait value
    pub fn new(id: impl Into<TraitValueId>, name: impl Into<String>, rarity: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            rarity,
            extra: Extra::new(),
        }
    }
}

/// Reference to the artwork layer a pairing is drawn with
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageLayer {
    /// Layer identifier
    pub id: String,

    /// Layer file or display name
    pub name: String,

    /// Keys this model does not interpret
    #[serde(flatten)]
    pub extra: Extra,
}

/// A composite's selection for one trait
///
/// A missing `trait_value` means the trait is not present on the composite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TraitValuePairing {
    /// The trait being selected
    #[serde(rename = "trait")]
    pub trait_def: TraitDefinition,

    /// The selected value, if any
    #[serde(default)]
    pub trait_value: Option<TraitValue>,

    /// Artwork layer, if the pairing is rendered
    #[serde(default)]
    pub image_layer: Option<ImageLayer>,

    /// Keys this model does not interpret
    #[serde(flatten)]
    pub extra: Extra,
}

impl TraitValuePairing {
    /// Create a pairing without an image layer
    pub fn new(trait_def: TraitDefinition, trait_value: Option<TraitValue>) -> Self {
        Self {
            trait_def,
            trait_value,
            image_layer: None,
            extra: Extra::new(),
        }
    }

    /// Identity of the paired trait
    pub fn trait_id(&self) -> &TraitId {
        &self.trait_def.id
    }

    /// The selected value, if present
    pub fn value(&self) -> Option<&TraitValue> {
        self.trait_value.as_ref()
    }
}
