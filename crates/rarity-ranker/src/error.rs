//! Error types for ranking runs

use thiserror::Error;

/// Errors that abort a ranking run
#[derive(Error, Debug)]
pub enum RankError {
    /// The collection to rank does not exist
    #[error("Collection {collection_id} not found in project {project_id}")]
    CollectionNotFound {
        /// Requested collection
        collection_id: String,
        /// Project it was looked up in
        project_id: String,
    },

    /// Storage layer error while reading the population or collection
    #[error("Storage error: {0}")]
    Store(String),
}

/// A tier configuration that cannot be applied
///
/// Reported as a warning; the run is skipped before any composite is touched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TierViolation {
    /// `legendary > rare`
    #[error("Legendary count {legendary} is greater than Rare count {rare}")]
    LegendaryExceedsRare {
        /// Configured legendary count
        legendary: usize,
        /// Configured rare count
        rare: usize,
    },

    /// `rare > uncommon`
    #[error("Rare count {rare} is greater than Uncommon count {uncommon}")]
    RareExceedsUncommon {
        /// Configured rare count
        rare: usize,
        /// Configured uncommon count
        uncommon: usize,
    },

    /// A tier size is not a non-negative integer
    #[error("{tier} count {value:?} is not a non-negative integer")]
    NotNumeric {
        /// Which tier was malformed
        tier: &'static str,
        /// The raw configured value
        value: String,
    },
}
