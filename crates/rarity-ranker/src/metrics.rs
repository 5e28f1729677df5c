//! Metrics collection for ranking runs

use rarity_domain::RankLabel;
use std::collections::HashMap;

/// Metrics collected across ranking runs
///
/// Tracks composites ranked per label, persistence outcomes, and run counts.
#[derive(Debug, Clone, Default)]
pub struct RankMetrics {
    /// Composites assigned each label
    pub labeled: HashMap<RankLabel, usize>,

    /// Composites scored across all runs
    pub scored: usize,

    /// Updates the store accepted
    pub persisted: usize,

    /// Updates the store rejected
    pub failed: usize,

    /// Runs that completed ranking
    pub run_count: usize,

    /// Runs skipped because of a tier violation
    pub skipped_runs: usize,

    /// Total runtime in milliseconds
    pub total_runtime_ms: u64,
}

impl RankMetrics {
    /// Create new empty metrics
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one composite receiving a label
    pub fn record_label(&mut self, label: RankLabel) {
        *self.labeled.entry(label).or_insert(0) += 1;
    }

    /// Record the outcome of one store update
    pub fn record_update(&mut self, persisted: bool) {
        if persisted {
            self.persisted += 1;
        } else {
            self.failed += 1;
        }
    }

    /// Record a completed run over `population` composites
    pub fn record_run(&mut self, population: usize) {
        self.run_count += 1;
        self.scored += population;
    }

    /// Record a run skipped by a tier violation
    pub fn record_skipped(&mut self) {
        self.skipped_runs += 1;
    }

    /// Composites assigned a given label
    pub fn count(&self, label: RankLabel) -> usize {
        self.labeled.get(&label).copied().unwrap_or(0)
    }

    /// Total composites labeled across all tiers
    pub fn total_labeled(&self) -> usize {
        self.labeled.values().sum()
    }

    /// Reset all metrics
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Generate a summary report of metrics
    pub fn summary(&self) -> String {
        let mut lines = vec![
            "Rank Metrics Summary".to_string(),
            "====================".to_string(),
            format!("Runs: {} ({} skipped)", self.run_count, self.skipped_runs),
            format!("Composites scored: {}", self.scored),
            format!("Total runtime: {}ms", self.total_runtime_ms),
            String::new(),
        ];

        if !self.labeled.is_empty() {
            lines.push("Labels:".to_string());
            for label in RankLabel::ALL {
                lines.push(format!("  {}: {}", label, self.count(label)));
            }
            lines.push(format!("  Total: {}", self.total_labeled()));
            lines.push(String::new());
        }

        lines.push(format!("Persisted: {}", self.persisted));
        lines.push(format!("Failed updates: {}", self.failed));

        lines.join("\n")
    }
}
