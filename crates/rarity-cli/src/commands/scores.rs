//! Scores command implementation.

use crate::cli::ScoresArgs;
use crate::commands::rank::ranker_config;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use rarity_ranker::{RankOutcome, RankedComposite, RarityGenerator};
use rarity_store::JsonFileStore;
use std::path::Path;

/// Execute the scores command (dry run, nothing is written).
pub async fn execute_scores(
    args: ScoresArgs,
    config: &Config,
    store_path: &Path,
    formatter: &Formatter,
) -> Result<()> {
    match preview(args, config, store_path).await? {
        RankOutcome::Ranked(ranked) => {
            println!("{}", formatter.format_ranked(&ranked)?);
        }
        RankOutcome::Skipped(violation) => {
            eprintln!("{}", formatter.warning(&format!("Run skipped: {}", violation)));
        }
    }

    Ok(())
}

async fn preview(
    args: ScoresArgs,
    config: &Config,
    store_path: &Path,
) -> Result<RankOutcome<RankedComposite>> {
    let store = JsonFileStore::open(store_path)?;
    let scope = args.scope.scope();
    let generator = RarityGenerator::new(ranker_config(&config.rank, args.strategy, &args.tiers));

    Ok(generator.preview(&store, &store, &scope).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{ScopeArgs, StrategyArg, TierArgs};
    use crate::commands::fixtures::seed_store;
    use crate::config::OutputFormat;
    use rarity_domain::RankLabel;
    use rarity_ranker::TierViolation;
    use tempfile::TempDir;

    fn args(strategy: Option<StrategyArg>) -> ScoresArgs {
        ScoresArgs {
            scope: ScopeArgs {
                project: "p1".to_string(),
                collection: "col1".to_string(),
                group: "g1".to_string(),
            },
            strategy,
            tiers: TierArgs::default(),
        }
    }

    fn count(ranked: &[RankedComposite], label: RankLabel) -> usize {
        ranked.iter().filter(|r| r.label == label).count()
    }

    #[tokio::test]
    async fn test_scores_do_not_write() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("store.json");
        seed_store(&path);
        let before = std::fs::read_to_string(&path).unwrap();
        let formatter = Formatter::new(OutputFormat::Table, false);

        for strategy in [None, Some(StrategyArg::FrequencyPopulation), Some(StrategyArg::Product)] {
            execute_scores(args(strategy), &Config::default(), &path, &formatter)
                .await
                .unwrap();
        }

        assert_eq!(std::fs::read_to_string(&path).unwrap(), before);
    }

    #[tokio::test]
    async fn test_tier_flags_change_preview_labels() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("store.json");
        seed_store(&path);

        let outcome = preview(args(None), &Config::default(), &path).await.unwrap();
        assert_eq!(count(outcome.results(), RankLabel::Legendary), 1);

        let mut args = args(None);
        args.tiers.legendary = Some("2".to_string());
        args.tiers.rare = Some("2".to_string());
        args.tiers.uncommon = Some("2".to_string());

        let outcome = preview(args, &Config::default(), &path).await.unwrap();
        let ranked = outcome.results();
        assert_eq!(count(ranked, RankLabel::Legendary), 2);
        assert_eq!(count(ranked, RankLabel::Rare), 2);
        assert_eq!(count(ranked, RankLabel::Uncommon), 2);
        assert_eq!(count(ranked, RankLabel::Common), 0);
    }

    #[tokio::test]
    async fn test_invalid_tier_flags_skip_preview() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("store.json");
        seed_store(&path);

        let mut args = args(None);
        args.tiers.rare = Some("many".to_string());

        let outcome = preview(args, &Config::default(), &path).await.unwrap();
        assert!(matches!(
            outcome.violation(),
            Some(TierViolation::NotNumeric { tier: "Rare", .. })
        ));
    }

    #[tokio::test]
    async fn test_scores_unknown_collection_is_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("store.json");
        seed_store(&path);
        let formatter = Formatter::new(OutputFormat::Json, false);

        let mut args = args(None);
        args.scope.collection = "missing".to_string();

        let result = execute_scores(args, &Config::default(), &path, &formatter).await;
        assert!(matches!(result, Err(crate::CliError::Rank(_))));
    }
}
