//! Rank command implementation.

use crate::cli::{RankArgs, StrategyArg, TierArgs};
use crate::config::{Config, OutputFormat};
use crate::error::Result;
use crate::output::Formatter;
use rarity_ranker::{RankOutcome, RankerConfig, RarityGenerator, TierValue};
use rarity_store::JsonFileStore;
use std::path::Path;

/// Merge command-line overrides onto the configured ranking settings.
///
/// Tier flags are kept as raw text so malformed values are reported by the
/// run itself rather than rejected by argument parsing.
pub fn ranker_config(
    base: &RankerConfig,
    strategy: Option<StrategyArg>,
    tiers: &TierArgs,
) -> RankerConfig {
    let mut config = base.clone();

    if let Some(strategy) = strategy {
        config.strategy = strategy.into();
    }
    if let Some(legendary) = &tiers.legendary {
        config.tiers.legendary = TierValue::from(legendary.as_str());
    }
    if let Some(rare) = &tiers.rare {
        config.tiers.rare = TierValue::from(rare.as_str());
    }
    if let Some(uncommon) = &tiers.uncommon {
        config.tiers.uncommon = TierValue::from(uncommon.as_str());
    }

    config
}

/// What a rank run prints.
#[derive(Debug)]
struct RankReport {
    /// Results, or nothing for a skipped run (stdout)
    output: Option<String>,
    /// Status line (stdout in table mode, stderr for a skipped run)
    status: Option<String>,
    /// Metrics summary (stderr)
    summary: String,
}

/// Execute the rank command.
pub async fn execute_rank(
    args: RankArgs,
    config: &Config,
    store_path: &Path,
    formatter: &Formatter,
) -> Result<()> {
    let report = run_rank(args, config, store_path, formatter).await?;

    match report.output {
        Some(output) => {
            println!("{}", output);
            if let Some(status) = report.status {
                println!("{}", status);
            }
        }
        None => {
            if let Some(status) = report.status {
                eprintln!("{}", status);
            }
        }
    }
    eprintln!("{}", report.summary);

    Ok(())
}

async fn run_rank(
    args: RankArgs,
    config: &Config,
    store_path: &Path,
    formatter: &Formatter,
) -> Result<RankReport> {
    let store = JsonFileStore::open(store_path)?;
    let scope = args.scope.scope();
    let mut generator =
        RarityGenerator::new(ranker_config(&config.rank, args.strategy, &args.tiers));

    let (output, status) = match generator.generate(&store, &store, &scope).await? {
        RankOutcome::Ranked(results) => {
            let output = formatter.format_persisted(&results)?;

            let status = (formatter.format() == OutputFormat::Table).then(|| {
                let metrics = generator.metrics();
                let message = format!(
                    "Ranked {} composite(s) in {} ({} persisted, {} failed)",
                    results.len(),
                    scope,
                    metrics.persisted,
                    metrics.failed
                );
                if metrics.failed == 0 {
                    formatter.success(&message)
                } else {
                    formatter.warning(&message)
                }
            });
            (Some(output), status)
        }
        RankOutcome::Skipped(violation) => (
            None,
            Some(formatter.warning(&format!("Run skipped: {}", violation))),
        ),
    };

    Ok(RankReport {
        output,
        status,
        summary: generator.metrics().summary(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::ScopeArgs;
    use crate::commands::fixtures::seed_store;
    use rarity_domain::{RankLabel, ScoringStrategy};
    use rarity_ranker::TierConfig;
    use tempfile::TempDir;

    fn tiers(legendary: Option<&str>, rare: Option<&str>, uncommon: Option<&str>) -> TierArgs {
        TierArgs {
            legendary: legendary.map(String::from),
            rare: rare.map(String::from),
            uncommon: uncommon.map(String::from),
        }
    }

    fn args(legendary: Option<&str>, rare: Option<&str>, uncommon: Option<&str>) -> RankArgs {
        RankArgs {
            scope: ScopeArgs {
                project: "p1".to_string(),
                collection: "col1".to_string(),
                group: "g1".to_string(),
            },
            strategy: None,
            tiers: tiers(legendary, rare, uncommon),
        }
    }

    fn labels(path: &Path) -> Vec<(String, Option<RankLabel>)> {
        let store = JsonFileStore::open(path).unwrap();
        let document = store.document().unwrap();
        document.groups[0]
            .composites
            .iter()
            .map(|c| (c.id.to_string(), c.rank()))
            .collect()
    }

    #[test]
    fn test_overrides_replace_config_values() {
        let config = ranker_config(
            &RankerConfig::default(),
            Some(StrategyArg::Product),
            &tiers(Some("2"), None, Some(" 9 ")),
        );
        assert_eq!(config.strategy, ScoringStrategy::Product);
        assert_eq!(config.tiers.resolve(), Ok(TierConfig::new(2, 5, 9)));
    }

    #[test]
    fn test_no_overrides_keeps_config() {
        let base = RankerConfig::strict();
        assert_eq!(ranker_config(&base, None, &TierArgs::default()), base);
    }

    #[tokio::test]
    async fn test_rank_writes_labels_to_store() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("store.json");
        seed_store(&path);
        let formatter = Formatter::new(OutputFormat::Json, false);

        execute_rank(args(Some("1"), Some("2"), Some("2")), &Config::default(), &path, &formatter)
            .await
            .unwrap();

        let labels = labels(&path);
        assert_eq!(labels[3], ("c3".to_string(), Some(RankLabel::Legendary)));
        assert_eq!(labels[1].1, Some(RankLabel::Rare));
        assert_eq!(labels[4].1, Some(RankLabel::Rare));
        assert!(labels.iter().all(|(_, label)| label.is_some()));
    }

    #[tokio::test]
    async fn test_report_includes_metrics_summary() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("store.json");
        seed_store(&path);
        let formatter = Formatter::new(OutputFormat::Table, false);

        let report = run_rank(args(Some("1"), Some("2"), Some("2")), &Config::default(), &path, &formatter)
            .await
            .unwrap();

        assert!(report.output.unwrap().contains("c3"));
        assert!(report.status.unwrap().contains("6 persisted, 0 failed"));
        assert!(report.summary.contains("Runs: 1 (0 skipped)"));
        assert!(report.summary.contains("Legendary: 1"));
        assert!(report.summary.contains("Persisted: 6"));
    }

    #[tokio::test]
    async fn test_json_report_has_no_status_line() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("store.json");
        seed_store(&path);
        let formatter = Formatter::new(OutputFormat::Json, false);

        let report = run_rank(args(None, None, None), &Config::default(), &path, &formatter)
            .await
            .unwrap();

        let value: serde_json::Value = serde_json::from_str(&report.output.unwrap()).unwrap();
        assert_eq!(value.as_array().unwrap().len(), 6);
        assert!(report.status.is_none());
        assert!(report.summary.contains("Persisted: 6"));
    }

    #[tokio::test]
    async fn test_invalid_tiers_leave_store_untouched() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("store.json");
        seed_store(&path);
        let formatter = Formatter::new(OutputFormat::Table, false);

        let report = run_rank(args(Some("5"), Some("3"), Some("10")), &Config::default(), &path, &formatter)
            .await
            .unwrap();

        assert!(report.output.is_none());
        assert!(report.status.unwrap().contains("Run skipped"));
        assert!(report.summary.contains("Runs: 0 (1 skipped)"));
        assert!(labels(&path).iter().all(|(_, label)| label.is_none()));
    }

    #[tokio::test]
    async fn test_unknown_collection_is_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("store.json");
        seed_store(&path);
        let formatter = Formatter::new(OutputFormat::Table, false);

        let mut args = args(None, None, None);
        args.scope.collection = "missing".to_string();

        let result = execute_rank(args, &Config::default(), &path, &formatter).await;
        assert!(matches!(result, Err(crate::CliError::Rank(_))));
        assert!(labels(&path).iter().all(|(_, label)| label.is_none()));
    }

    #[tokio::test]
    async fn test_missing_store_is_error() {
        let dir = TempDir::new().unwrap();
        let formatter = Formatter::new(OutputFormat::Table, false);

        let result = execute_rank(
            args(None, None, None),
            &Config::default(),
            &dir.path().join("absent.json"),
            &formatter,
        )
        .await;
        assert!(matches!(result, Err(crate::CliError::Store(_))));
    }
}
