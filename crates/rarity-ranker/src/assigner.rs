//! Rank assignment: score, sort, and label a population

use crate::{TierConfig, TierViolation};
use rarity_domain::{Composite, RankLabel, ScoringStrategy};

/// A composite with its score and the label its position earned
#[derive(Debug, Clone, PartialEq)]
pub struct RankedComposite {
    /// The composite, unchanged
    pub composite: Composite,

    /// Score under the run's strategy
    pub score: f64,

    /// Zero-based position in rarest-first order
    pub position: usize,

    /// Assigned label
    pub label: RankLabel,
}

/// Orders a population by rarity and applies tier boundaries
///
/// Pure: performs no I/O and never mutates the composites it is given.
///
/// # Examples
///
/// ```
/// use rarity_domain::{Composite, RankLabel, ScoringStrategy};
/// use rarity_ranker::{RankAssigner, TierConfig};
///
/// let assigner = RankAssigner::new(TierConfig::new(1, 1, 1), ScoringStrategy::Frequency).unwrap();
/// let ranked = assigner.rank(vec![Composite::new("a", vec![]), Composite::new("b", vec![])]);
///
/// assert_eq!(ranked[0].label, RankLabel::Legendary);
/// assert_eq!(ranked[1].label, RankLabel::Rare);
/// ```
#[derive(Debug, Clone)]
pub struct RankAssigner {
    tiers: TierConfig,
    strategy: ScoringStrategy,
}

impl RankAssigner {
    /// Create an assigner, rejecting tier sizes that violate `legendary ≤ rare ≤ uncommon`
    pub fn new(tiers: TierConfig, strategy: ScoringStrategy) -> Result<Self, TierViolation> {
        tiers.validate()?;
        Ok(Self { tiers, strategy })
    }

    /// The validated tier sizes
    pub fn tiers(&self) -> TierConfig {
        self.tiers
    }

    /// The scoring strategy
    pub fn strategy(&self) -> ScoringStrategy {
        self.strategy
    }

    /// Score the whole population and sort it rarest first
    ///
    /// The sort is stable, so equal scores keep population order. Composites
    /// with no present trait values go last under either polarity.
    pub fn sort(&self, population: Vec<Composite>) -> Vec<(Composite, f64)> {
        let scorer = self.strategy.scorer(&population);
        let order = scorer.order();

        let mut scored: Vec<(Composite, f64, bool)> = population
            .into_iter()
            .map(|composite| {
                let score = scorer.score(&composite);
                let present = composite.has_present_values();
                (composite, score, present)
            })
            .collect();

        scored.sort_by(|a, b| b.2.cmp(&a.2).then_with(|| order.rarest_first(a.1, b.1)));

        scored
            .into_iter()
            .map(|(composite, score, _)| (composite, score))
            .collect()
    }

    /// Score, sort, and label the whole population
    pub fn rank(&self, population: Vec<Composite>) -> Vec<RankedComposite> {
        self.sort(population)
            .into_iter()
            .enumerate()
            .map(|(position, (composite, score))| RankedComposite {
                composite,
                score,
                position,
                label: self.tiers.label_for(position),
            })
            .collect()
    }
}
