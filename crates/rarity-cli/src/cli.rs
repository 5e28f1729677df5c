//! CLI command definitions and argument parsing.

use clap::{Args, Parser, Subcommand};
use rarity_domain::{CompositeScope, ScoringStrategy};

/// Rarity CLI - Rank generated composites by rarity.
#[derive(Debug, Parser)]
#[command(name = "rarity")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Composite store (JSON document) path
    #[arg(short, long, global = true, env = "RARITY_STORE")]
    pub store: Option<String>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Rank a population and write labels back to the store
    Rank(RankArgs),

    /// Show scores and the labels a run would assign, without writing
    Scores(ScoresArgs),
}

/// Which population to rank.
#[derive(Debug, Clone, Args)]
pub struct ScopeArgs {
    /// Project ID
    #[arg(short, long)]
    pub project: String,

    /// Collection ID
    #[arg(long)]
    pub collection: String,

    /// Composite group ID
    #[arg(short, long)]
    pub group: String,
}

impl ScopeArgs {
    /// The population scope these arguments name.
    pub fn scope(&self) -> CompositeScope {
        CompositeScope::new(
            self.project.as_str(),
            self.collection.as_str(),
            self.group.as_str(),
        )
    }
}

/// Tier size overrides, kept as raw text so the run reports bad values.
#[derive(Debug, Clone, Default, Args)]
pub struct TierArgs {
    /// Number of Legendary composites (overrides config)
    #[arg(long, env = "RARITY_RANK_LEGENDARY")]
    pub legendary: Option<String>,

    /// Number of Rare composites (overrides config)
    #[arg(long, env = "RARITY_RANK_RARE")]
    pub rare: Option<String>,

    /// Number of Uncommon composites (overrides config)
    #[arg(long, env = "RARITY_RANK_UNCOMMON")]
    pub uncommon: Option<String>,
}

/// Arguments for the rank command.
#[derive(Debug, Parser)]
pub struct RankArgs {
    #[command(flatten)]
    pub scope: ScopeArgs,

    /// Scoring strategy (overrides config)
    #[arg(long, value_enum)]
    pub strategy: Option<StrategyArg>,

    #[command(flatten)]
    pub tiers: TierArgs,
}

/// Arguments for the scores command.
#[derive(Debug, Parser)]
pub struct ScoresArgs {
    #[command(flatten)]
    pub scope: ScopeArgs,

    /// Scoring strategy (overrides config)
    #[arg(long, value_enum)]
    pub strategy: Option<StrategyArg>,

    #[command(flatten)]
    pub tiers: TierArgs,
}

/// Scoring strategy argument.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum StrategyArg {
    /// Frequency score normalized by the modal count
    Frequency,
    /// Frequency score normalized by the population size
    FrequencyPopulation,
    /// Product of designer rarity weights
    Product,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
        }
    }
}

impl From<StrategyArg> for ScoringStrategy {
    fn from(strategy: StrategyArg) -> Self {
        match strategy {
            StrategyArg::Frequency => ScoringStrategy::Frequency,
            StrategyArg::FrequencyPopulation => ScoringStrategy::FrequencyPopulation,
            StrategyArg::Product => ScoringStrategy::Product,
        }
    }
}
