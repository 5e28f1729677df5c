//! Rarity Ranker
//!
//! Scores a population of generated composites, orders it rarest first, and
//! writes a rank label back onto every composite.
//!
//! # Overview
//!
//! The ranker is responsible for:
//! - **Tier validation**: rejecting tier sizes that break `legendary ≤ rare ≤ uncommon`
//! - **Scoring**: applying the configured strategy over the whole population snapshot
//! - **Assignment**: labelling composites by their position in rarest-first order
//! - **Persistence**: appending a Rank trait to each composite, then flushing the store once
//! - **Metrics collection**: counting labels, persisted and failed updates
//!
//! ## Tier Boundaries
//!
//! | Position `i` (zero-based) | Label |
//! |---------------------------|-------|
//! | `i < legendary` | **Legendary** |
//! | `i < legendary + rare` | **Rare** |
//! | `i < legendary + rare + uncommon` | **Uncommon** |
//! | otherwise | **Common** |
//!
//! # Usage
//!
//! ## One-time Run
//!
//! ```no_run
//! use rarity_domain::CompositeScope;
//! use rarity_ranker::RarityGenerator;
//! use rarity_store::JsonFileStore;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let store = JsonFileStore::open("composites.json")?;
//! let scope = CompositeScope::new("project", "collection", "group");
//! let mut generator = RarityGenerator::default_config();
//!
//! let outcome = generator.generate(&store, &store, &scope).await?;
//! println!("ranked {} composites", outcome.results().len());
//! println!("{}", generator.metrics().summary());
//! # Ok(())
//! # }
//! ```
//!
//! ## Pure Ranking
//!
//! ```
//! use rarity_domain::{Composite, ScoringStrategy};
//! use rarity_ranker::{RankAssigner, TierConfig};
//!
//! let assigner = RankAssigner::new(TierConfig::new(1, 2, 3), ScoringStrategy::Frequency).unwrap();
//! let ranked = assigner.rank(vec![Composite::new("c1", vec![])]);
//! assert_eq!(ranked.len(), 1);
//! ```
//!
//! ## Configuration Presets
//!
//! ```
//! use rarity_ranker::RankerConfig;
//!
//! // Default: 1 Legendary, 5 Rare, 20 Uncommon
//! let config = RankerConfig::default();
//!
//! // Strict: narrow tiers for small drops
//! let config = RankerConfig::strict();
//!
//! // Generous: wide tiers for large collections
//! let config = RankerConfig::generous();
//! ```

#![warn(missing_docs)]

mod assigner;
mod config;
mod error;
mod generator;
mod metrics;

pub use assigner::{RankAssigner, RankedComposite};
pub use config::{RankerConfig, TierConfig, TierSettings, TierValue};
pub use error::{RankError, TierViolation};
pub use generator::{RankOutcome, RankUpdate, RarityGenerator};
pub use metrics::RankMetrics;
