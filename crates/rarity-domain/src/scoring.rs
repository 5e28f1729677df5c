//! Rarity scoring strategies
//!
//! Turns a composite's trait selections into one comparable number. Every
//! strategy declares its polarity through [`ScoreOrder`] so the ranker can
//! sort rarest-first without knowing which strategy produced the scores.
//!
//! Two strategies exist:
//! - **Frequency** (default): sums `normalizer / count` over the present
//!   trait values, where `count` is how many composites in the population
//!   share that value. Higher is rarer.
//! - **Product**: multiplies the designer-assigned `rarity` weights and
//!   scales by 100. Lower is rarer.

use crate::composite::Composite;
use crate::ids::{TraitId, TraitValueId};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;

/// Scale applied to the weight product
pub const PRODUCT_SCALE: f64 = 100.0;

/// Which direction of the score means "rarer"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreOrder {
    /// Lower scores are rarer
    Ascending,

    /// Higher scores are rarer
    Descending,
}

impl ScoreOrder {
    /// Compare two scores so that the rarer one orders first
    ///
    /// Uses `f64::total_cmp`, so the comparison is a total order.
    pub fn rarest_first(&self, a: f64, b: f64) -> Ordering {
        match self {
            ScoreOrder::Ascending => a.total_cmp(&b),
            ScoreOrder::Descending => b.total_cmp(&a),
        }
    }
}

/// Computes a rarity score for composites of one population snapshot
pub trait RarityScorer: Send + Sync {
    /// Polarity of the scores this scorer produces
    fn order(&self) -> ScoreOrder;

    /// Score a single composite
    fn score(&self, composite: &Composite) -> f64;
}

/// What the frequency strategy divides by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Normalizer {
    /// The count of the most common bucket for the trait (absent included)
    ModalCount,

    /// The number of composites in the population
    PopulationSize,
}

/// Occurrence counts of every (trait, value) bucket in a population
///
/// Built once per run and shared by every composite's score, so scoring the
/// whole population is O(n·t) instead of rescanning per pairing.
#[derive(Debug, Clone, Default)]
pub struct TraitValueCounts {
    buckets: HashMap<TraitId, HashMap<Option<TraitValueId>, usize>>,
    population: usize,
}

impl TraitValueCounts {
    /// Count every trait's value buckets across a population
    ///
    /// Each composite resolves a trait through its first pairing for it. A
    /// composite without a pairing, or with an empty one, lands in the `None`
    /// bucket for that trait.
    pub fn from_population(population: &[Composite]) -> Self {
        let resolved: Vec<HashMap<&TraitId, Option<&TraitValueId>>> = population
            .iter()
            .map(|composite| {
                let mut first = HashMap::new();
                for pairing in composite.scored_pairings() {
                    first
                        .entry(pairing.trait_id())
                        .or_insert_with(|| pairing.value().map(|v| &v.id));
                }
                first
            })
            .collect();

        let mut buckets: HashMap<TraitId, HashMap<Option<TraitValueId>, usize>> = HashMap::new();
        for trait_id in resolved.iter().flat_map(|first| first.keys()) {
            buckets.entry((*trait_id).clone()).or_default();
        }

        for (trait_id, counts) in buckets.iter_mut() {
            for first in &resolved {
                let bucket = first.get(trait_id).copied().flatten().cloned();
                *counts.entry(bucket).or_insert(0) += 1;
            }
        }

        Self {
            buckets,
            population: population.len(),
        }
    }

    /// Number of composites in the counted population
    pub fn population_size(&self) -> usize {
        self.population
    }

    /// How many composites resolve `trait_id` to `value_id`
    pub fn count(&self, trait_id: &TraitId, value_id: &TraitValueId) -> usize {
        self.buckets
            .get(trait_id)
            .and_then(|counts| counts.get(&Some(value_id.clone())))
            .copied()
            .unwrap_or(0)
    }

    /// Size of the largest bucket for a trait, the absent bucket included
    pub fn modal_count(&self, trait_id: &TraitId) -> usize {
        self.buckets
            .get(trait_id)
            .and_then(|counts| counts.values().max().copied())
            .unwrap_or(self.population)
    }

    /// The normalizer for a trait under the given policy
    pub fn normalizer(&self, trait_id: &TraitId, normalizer: Normalizer) -> usize {
        match normalizer {
            Normalizer::ModalCount => self.modal_count(trait_id),
            Normalizer::PopulationSize => self.population,
        }
    }
}

/// Weight-product score: `100 × ∏ rarity` over the present values
///
/// Absent values contribute a factor of 1. A composite with no present
/// values scores 0.
pub fn score_product(composite: &Composite) -> f64 {
    let mut weights = composite
        .scored_pairings()
        .filter_map(|pairing| pairing.value())
        .map(|value| value.rarity)
        .peekable();

    if weights.peek().is_none() {
        return 0.0;
    }

    weights.product::<f64>() * PRODUCT_SCALE
}

/// Frequency score: `Σ normalizer / count` over the present values
///
/// Only the first pairing per trait counts. Values that do not occur in the
/// counted population contribute nothing, so the sum never divides by zero.
pub fn score_frequency(
    composite: &Composite,
    counts: &TraitValueCounts,
    normalizer: Normalizer,
) -> f64 {
    let mut seen: Vec<&TraitId> = Vec::new();
    let mut total = 0.0;

    for pairing in composite.scored_pairings() {
        let trait_id = pairing.trait_id();
        if seen.contains(&trait_id) {
            continue;
        }
        seen.push(trait_id);

        let Some(value) = pairing.value() else {
            continue;
        };

        let count = counts.count(trait_id, &value.id);
        if count == 0 {
            continue;
        }

        total += counts.normalizer(trait_id, normalizer) as f64 / count as f64;
    }

    total
}

/// Frequency-normalized scorer (higher is rarer)
#[derive(Debug, Clone)]
pub struct FrequencyScorer {
    counts: TraitValueCounts,
    normalizer: Normalizer,
}

impl FrequencyScorer {
    /// Precompute the population's counts
    pub fn new(population: &[Composite], normalizer: Normalizer) -> Self {
        Self {
            counts: TraitValueCounts::from_population(population),
            normalizer,
        }
    }
}

impl RarityScorer for FrequencyScorer {
    fn order(&self) -> ScoreOrder {
        ScoreOrder::Descending
    }

    fn score(&self, composite: &Composite) -> f64 {
        score_frequency(composite, &self.counts, self.normalizer)
    }
}

/// Weight-product scorer (lower is rarer)
#[derive(Debug, Clone, Copy, Default)]
pub struct ProductScorer;

impl RarityScorer for ProductScorer {
    fn order(&self) -> ScoreOrder {
        ScoreOrder::Ascending
    }

    fn score(&self, composite: &Composite) -> f64 {
        score_product(composite)
    }
}

/// Scoring strategy selected when a ranking run is configured
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScoringStrategy {
    /// Frequency score normalized by the modal bucket count
    #[default]
    Frequency,

    /// Frequency score normalized by the population size
    FrequencyPopulation,

    /// Designer weight product
    Product,
}

impl ScoringStrategy {
    /// Build a scorer over a population snapshot
    pub fn scorer(&self, population: &[Composite]) -> Box<dyn RarityScorer> {
        match self {
            ScoringStrategy::Frequency => {
                Box::new(FrequencyScorer::new(population, Normalizer::ModalCount))
            }
            ScoringStrategy::FrequencyPopulation => {
                Box::new(FrequencyScorer::new(population, Normalizer::PopulationSize))
            }
            ScoringStrategy::Product => Box::new(ProductScorer),
        }
    }

    /// Polarity of this strategy's scores
    pub fn order(&self) -> ScoreOrder {
        match self {
            ScoringStrategy::Frequency | ScoringStrategy::FrequencyPopulation => {
                ScoreOrder::Descending
            }
            ScoringStrategy::Product => ScoreOrder::Ascending,
        }
    }

    /// Get the strategy name as used in configuration
    pub fn as_str(&self) -> &'static str {
        match self {
            ScoringStrategy::Frequency => "frequency",
            ScoringStrategy::FrequencyPopulation => "frequency-population",
            ScoringStrategy::Product => "product",
        }
    }

    /// Parse a strategy name
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "frequency" => Some(ScoringStrategy::Frequency),
            "frequency-population" => Some(ScoringStrategy::FrequencyPopulation),
            "product" => Some(ScoringStrategy::Product),
            _ => None,
        }
    }
}

impl std::str::FromStr for ScoringStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid scoring strategy: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trait_definition::TraitDefinition;
    use crate::trait_value::{TraitValue, TraitValuePairing};

    fn pairing(trait_id: &str, value: Option<(&str, f64)>) -> TraitValuePairing {
        TraitValuePairing::new(
            TraitDefinition::new(trait_id, trait_id, 0),
            value.map(|(id, rarity)| TraitValue::new(id, id, rarity)),
        )
    }

    fn background(id: &str, value: &str) -> Composite {
        Composite::new(id, vec![pairing("bg", Some((value, 0.5)))])
    }

    /// A×5, B×3, C×2 on a single trait
    fn abc_population() -> Vec<Composite> {
        let mut population = Vec::new();
        for (value, n) in [("A", 5), ("B", 3), ("C", 2)] {
            for i in 0..n {
                population.push(background(&format!("{}{}", value, i), value));
            }
        }
        population
    }

    #[test]
    fn test_counts() {
        let population = abc_population();
        let counts = TraitValueCounts::from_population(&population);
        let bg = TraitId::from("bg");

        assert_eq!(counts.population_size(), 10);
        assert_eq!(counts.count(&bg, &TraitValueId::from("A")), 5);
        assert_eq!(counts.count(&bg, &TraitValueId::from("B")), 3);
        assert_eq!(counts.count(&bg, &TraitValueId::from("C")), 2);
        assert_eq!(counts.count(&bg, &TraitValueId::from("Z")), 0);
        assert_eq!(counts.modal_count(&bg), 5);
    }

    #[test]
    fn test_modal_count_includes_absent_bucket() {
        let mut population = vec![background("c0", "A"), background("c1", "B")];
        for i in 0..3 {
            population.push(Composite::new(format!("n{}", i), vec![pairing("bg", None)]));
        }
        population.push(Composite::new("bare", vec![]));

        let counts = TraitValueCounts::from_population(&population);
        let bg = TraitId::from("bg");

        // 3 explicit absences + 1 composite without the pairing
        assert_eq!(counts.modal_count(&bg), 4);
        assert_eq!(counts.normalizer(&bg, Normalizer::PopulationSize), 6);
    }

    #[test]
    fn test_frequency_rewards_scarce_values() {
        let population = abc_population();
        let scorer = FrequencyScorer::new(&population, Normalizer::ModalCount);

        let a = scorer.score(&population[0]);
        let b = scorer.score(&population[5]);
        let c = scorer.score(&population[8]);

        assert_eq!(a, 1.0);
        assert!((b - 5.0 / 3.0).abs() < 1e-12);
        assert_eq!(c, 2.5);
        assert!(c > b && b > a);
    }

    #[test]
    fn test_frequency_population_normalizer() {
        let population = abc_population();
        let scorer = FrequencyScorer::new(&population, Normalizer::PopulationSize);

        assert_eq!(scorer.score(&population[0]), 2.0);
        assert_eq!(scorer.score(&population[8]), 5.0);
    }

    #[test]
    fn test_frequency_sums_across_traits() {
        let population = vec![
            Composite::new("c0", vec![pairing("bg", Some(("A", 1.0))), pairing("eyes", Some(("x", 1.0)))]),
            Composite::new("c1", vec![pairing("bg", Some(("A", 1.0))), pairing("eyes", Some(("y", 1.0)))]),
        ];
        let scorer = FrequencyScorer::new(&population, Normalizer::ModalCount);

        // bg: 2/2, eyes: 1/1
        assert_eq!(scorer.score(&population[0]), 2.0);
    }

    #[test]
    fn test_absent_only_trait_contributes_nothing() {
        let population = vec![
            Composite::new("c0", vec![pairing("bg", Some(("A", 1.0))), pairing("hat", None)]),
            Composite::new("c1", vec![pairing("bg", Some(("A", 1.0))), pairing("hat", None)]),
        ];
        let scorer = FrequencyScorer::new(&population, Normalizer::ModalCount);

        for composite in &population {
            let score = scorer.score(composite);
            assert!(score.is_finite());
            assert_eq!(score, 1.0);
        }
    }

    #[test]
    fn test_identical_population_is_finite() {
        let population: Vec<Composite> = (0..4).map(|i| background(&format!("c{}", i), "A")).collect();
        let scorer = FrequencyScorer::new(&population, Normalizer::ModalCount);

        for composite in &population {
            assert_eq!(scorer.score(composite), 1.0);
        }
    }

    #[test]
    fn test_duplicate_pairing_for_same_trait_ignored() {
        let composite = Composite::new(
            "c0",
            vec![pairing("bg", Some(("A", 1.0))), pairing("bg", Some(("B", 1.0)))],
        );
        let population = vec![composite.clone(), background("c1", "A")];
        let scorer = FrequencyScorer::new(&population, Normalizer::ModalCount);

        assert_eq!(scorer.score(&composite), 1.0);
    }

    #[test]
    fn test_empty_composite_scores_zero() {
        let empty = Composite::new("empty", vec![]);
        let population = vec![background("c0", "A"), empty.clone()];

        assert_eq!(ScoringStrategy::Frequency.scorer(&population).score(&empty), 0.0);
        assert_eq!(ScoringStrategy::FrequencyPopulation.scorer(&population).score(&empty), 0.0);
        assert_eq!(ScoringStrategy::Product.scorer(&population).score(&empty), 0.0);
    }

    #[test]
    fn test_empty_population() {
        let counts = TraitValueCounts::from_population(&[]);
        assert_eq!(counts.population_size(), 0);
        assert_eq!(counts.modal_count(&TraitId::from("bg")), 0);
    }

    #[test]
    fn test_product_score() {
        let composite = Composite::new(
            "c0",
            vec![
                pairing("bg", Some(("A", 0.5))),
                pairing("eyes", Some(("x", 0.2))),
                pairing("hat", None),
            ],
        );

        assert!((score_product(&composite) - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_product_ignores_rank_pairing() {
        let composite = crate::rank::RankAssignment::apply(
            Composite::new("c0", vec![pairing("bg", Some(("A", 0.5)))]),
            crate::rank::RankLabel::Common,
        );

        assert_eq!(score_product(&composite), 50.0);
    }

    #[test]
    fn test_strategy_polarity() {
        assert_eq!(ScoringStrategy::Frequency.order(), ScoreOrder::Descending);
        assert_eq!(ScoringStrategy::FrequencyPopulation.order(), ScoreOrder::Descending);
        assert_eq!(ScoringStrategy::Product.order(), ScoreOrder::Ascending);

        for strategy in [
            ScoringStrategy::Frequency,
            ScoringStrategy::FrequencyPopulation,
            ScoringStrategy::Product,
        ] {
            assert_eq!(strategy.scorer(&[]).order(), strategy.order());
        }
    }

    #[test]
    fn test_rarest_first() {
        assert_eq!(ScoreOrder::Descending.rarest_first(3.0, 1.0), Ordering::Less);
        assert_eq!(ScoreOrder::Ascending.rarest_first(3.0, 1.0), Ordering::Greater);
        assert_eq!(ScoreOrder::Ascending.rarest_first(2.0, 2.0), Ordering::Equal);
    }

    #[test]
    fn test_strategy_parse() {
        assert_eq!(ScoringStrategy::default(), ScoringStrategy::Frequency);
        assert_eq!("product".parse::<ScoringStrategy>(), Ok(ScoringStrategy::Product));
        assert_eq!(
            ScoringStrategy::parse("Frequency-Population"),
            Some(ScoringStrategy::FrequencyPopulation)
        );
        assert!("median".parse::<ScoringStrategy>().is_err());
    }
}
