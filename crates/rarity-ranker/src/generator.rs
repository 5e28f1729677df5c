//! Ranking runs against the store collaborators

use crate::{RankAssigner, RankError, RankMetrics, RankedComposite, RankerConfig, TierViolation};
use futures::future::join_all;
use rarity_domain::traits::{CollectionLookup, CompositeStore};
use rarity_domain::{Collection, Composite, CompositeId, CompositeScope, RankAssignment, RankLabel};
use std::time::Instant;

/// What a ranking run did for one composite
#[derive(Debug, Clone, PartialEq)]
pub struct RankUpdate {
    /// Composite the label was computed for
    pub id: CompositeId,

    /// Label the composite earned
    pub label: RankLabel,

    /// The composite as the store accepted it; `None` if the update failed
    pub stored: Option<Composite>,
}

impl RankUpdate {
    /// Whether the store accepted the update
    pub fn is_persisted(&self) -> bool {
        self.stored.is_some()
    }
}

/// Result of a ranking run that was allowed to start
#[derive(Debug, Clone, PartialEq)]
pub enum RankOutcome<T> {
    /// The population was ranked; entries are in rarest-first order
    Ranked(Vec<T>),

    /// The tier configuration was rejected and nothing was touched
    Skipped(TierViolation),
}

impl<T> RankOutcome<T> {
    /// Entries in rank order; empty for a skipped run
    pub fn results(&self) -> &[T] {
        match self {
            RankOutcome::Ranked(results) => results,
            RankOutcome::Skipped(_) => &[],
        }
    }

    /// Whether the run was skipped by a tier violation
    pub fn is_skipped(&self) -> bool {
        matches!(self, RankOutcome::Skipped(_))
    }

    /// The violation that skipped the run, if any
    pub fn violation(&self) -> Option<&TierViolation> {
        match self {
            RankOutcome::Skipped(violation) => Some(violation),
            RankOutcome::Ranked(_) => None,
        }
    }
}

/// Drives a ranking run: look up, load, rank, persist
///
/// # Examples
///
/// ```no_run
/// use rarity_domain::CompositeScope;
/// use rarity_ranker::{RankOutcome, RankerConfig, RarityGenerator};
/// use rarity_store::JsonFileStore;
///
/// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
/// let store = JsonFileStore::open("composites.json")?;
/// let scope = CompositeScope::new("project", "collection", "group");
/// let mut generator = RarityGenerator::new(RankerConfig::default());
///
/// match generator.generate(&store, &store, &scope).await? {
///     RankOutcome::Ranked(results) => println!("ranked {}", results.len()),
///     RankOutcome::Skipped(violation) => println!("skipped: {}", violation),
/// }
/// # Ok(())
/// # }
/// ```
pub struct RarityGenerator {
    config: RankerConfig,
    metrics: RankMetrics,
}

impl RarityGenerator {
    /// Create a generator with the given configuration
    pub fn new(config: RankerConfig) -> Self {
        Self {
            config,
            metrics: RankMetrics::new(),
        }
    }

    /// Create a generator with default configuration
    pub fn default_config() -> Self {
        Self::new(RankerConfig::default())
    }

    /// Get a reference to the current metrics
    pub fn metrics(&self) -> &RankMetrics {
        &self.metrics
    }

    /// Reset metrics counters
    pub fn reset_metrics(&mut self) {
        self.metrics.reset();
    }

    /// Rank a population and persist every composite's label
    ///
    /// 1. Resolves the collection (fails fast if it is missing)
    /// 2. Resolves the tier sizes (skips the run on a violation)
    /// 3. Loads, scores, sorts, and labels the full population
    /// 4. Issues all updates concurrently and waits for every one
    /// 5. Flushes the store once
    ///
    /// A failed update is reported at its position with no stored composite;
    /// siblings still run. A failed flush fails the whole run.
    pub async fn generate<S, L>(
        &mut self,
        store: &S,
        lookup: &L,
        scope: &CompositeScope,
    ) -> Result<RankOutcome<RankUpdate>, RankError>
    where
        S: CompositeStore,
        L: CollectionLookup,
    {
        let start = Instant::now();

        let ranked = match self.prepare(store, lookup, scope).await? {
            RankOutcome::Ranked(ranked) => ranked,
            RankOutcome::Skipped(violation) => {
                self.metrics.record_skipped();
                return Ok(RankOutcome::Skipped(violation));
            }
        };

        let population = ranked.len();
        let updates = ranked.into_iter().map(|ranked| {
            let id = ranked.composite.id.clone();
            let label = ranked.label;
            let updated = RankAssignment::apply(ranked.composite, label);
            async move {
                let stored = match store.update(updated, scope).await {
                    Ok(stored) => {
                        tracing::debug!("Composite {} ranked {}", id, label);
                        Some(stored)
                    }
                    Err(e) => {
                        tracing::warn!("Failed to persist rank {} for composite {}: {}", label, id, e);
                        None
                    }
                };
                RankUpdate { id, label, stored }
            }
        });

        let results = join_all(updates).await;

        if let Err(e) = store.flush().await {
            tracing::warn!("Failed to flush ranks for {}: {}", scope, e);
            return Err(RankError::Store(e.to_string()));
        }

        for update in &results {
            self.metrics.record_label(update.label);
            self.metrics.record_update(update.is_persisted());
        }

        self.metrics.record_run(population);
        self.metrics.total_runtime_ms += start.elapsed().as_millis() as u64;

        tracing::info!(
            "Ranked {} composites in {} ({} persisted, {} failed)",
            population,
            scope,
            results.iter().filter(|r| r.is_persisted()).count(),
            results.iter().filter(|r| !r.is_persisted()).count()
        );

        Ok(RankOutcome::Ranked(results))
    }

    /// Rank a population without writing anything back (dry run)
    pub async fn preview<S, L>(
        &self,
        store: &S,
        lookup: &L,
        scope: &CompositeScope,
    ) -> Result<RankOutcome<RankedComposite>, RankError>
    where
        S: CompositeStore,
        L: CollectionLookup,
    {
        let outcome = self.prepare(store, lookup, scope).await?;
        if let RankOutcome::Ranked(ranked) = &outcome {
            tracing::info!("DRY RUN: Would rank {} composites in {}", ranked.len(), scope);
        }
        Ok(outcome)
    }

    /// Everything up to, but not including, persistence
    async fn prepare<S, L>(
        &self,
        store: &S,
        lookup: &L,
        scope: &CompositeScope,
    ) -> Result<RankOutcome<RankedComposite>, RankError>
    where
        S: CompositeStore,
        L: CollectionLookup,
    {
        let collection = self.collection(lookup, scope).await?;

        tracing::info!(
            "Generate rarity for project: {} collection: {} ({})",
            scope.project_id,
            collection.name,
            collection.id
        );

        let assigner = match self
            .config
            .tiers
            .resolve()
            .and_then(|tiers| RankAssigner::new(tiers, self.config.strategy))
        {
            Ok(assigner) => assigner,
            Err(violation) => {
                tracing::warn!("{}", violation);
                return Ok(RankOutcome::Skipped(violation));
            }
        };

        let tiers = assigner.tiers();
        tracing::info!("Legendary count: {}", tiers.legendary);
        tracing::info!("Rare count: {}", tiers.rare);
        tracing::info!("Uncommon count: {}", tiers.uncommon);
        tracing::info!("Scoring strategy: {}", assigner.strategy().as_str());

        let population = store
            .list_all(scope)
            .await
            .map_err(|e| RankError::Store(e.to_string()))?;

        Ok(RankOutcome::Ranked(assigner.rank(population)))
    }

    async fn collection<L>(&self, lookup: &L, scope: &CompositeScope) -> Result<Collection, RankError>
    where
        L: CollectionLookup,
    {
        lookup
            .get(&scope.collection_id, &scope.project_id)
            .await
            .map_err(|e| RankError::Store(e.to_string()))?
            .ok_or_else(|| RankError::CollectionNotFound {
                collection_id: scope.collection_id.to_string(),
                project_id: scope.project_id.clone(),
            })
    }
}
