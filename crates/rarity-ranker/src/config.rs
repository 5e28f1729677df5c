//! Configuration for ranking runs
//!
//! Defines the tier sizes and the scoring strategy.

use crate::TierViolation;
use rarity_domain::{RankLabel, ScoringStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Validated tier sizes
///
/// The top `legendary` composites are Legendary, the next `rare` are Rare,
/// the next `uncommon` are Uncommon, and the rest are Common.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierConfig {
    /// Number of Legendary composites
    pub legendary: usize,

    /// Number of Rare composites
    pub rare: usize,

    /// Number of Uncommon composites
    pub uncommon: usize,
}

impl TierConfig {
    /// Create a tier configuration (not yet validated)
    pub fn new(legendary: usize, rare: usize, uncommon: usize) -> Self {
        Self {
            legendary,
            rare,
            uncommon,
        }
    }

    /// Check `legendary ≤ rare ≤ uncommon`
    pub fn validate(&self) -> Result<(), TierViolation> {
        if self.legendary > self.rare {
            return Err(TierViolation::LegendaryExceedsRare {
                legendary: self.legendary,
                rare: self.rare,
            });
        }
        if self.rare > self.uncommon {
            return Err(TierViolation::RareExceedsUncommon {
                rare: self.rare,
                uncommon: self.uncommon,
            });
        }
        Ok(())
    }

    /// Label for the composite at zero-based position `index` in rarest-first order
    pub fn label_for(&self, index: usize) -> RankLabel {
        let rare_end = self.legendary.saturating_add(self.rare);
        let uncommon_end = rare_end.saturating_add(self.uncommon);

        if index < self.legendary {
            RankLabel::Legendary
        } else if index < rare_end {
            RankLabel::Rare
        } else if index < uncommon_end {
            RankLabel::Uncommon
        } else {
            RankLabel::Common
        }
    }
}

/// A raw tier size as written in configuration
///
/// Accepts integers or strings so that malformed values surface as a
/// [`TierViolation`] at run time instead of failing to load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TierValue {
    /// An integer literal
    Count(i64),

    /// Text to be parsed
    Text(String),
}

impl TierValue {
    fn resolve(&self, tier: &'static str) -> Result<usize, TierViolation> {
        let not_numeric = || TierViolation::NotNumeric {
            tier,
            value: self.to_string(),
        };

        match self {
            TierValue::Count(n) => usize::try_from(*n).map_err(|_| not_numeric()),
            TierValue::Text(s) => s.trim().parse::<usize>().map_err(|_| not_numeric()),
        }
    }
}

impl fmt::Display for TierValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TierValue::Count(n) => write!(f, "{}", n),
            TierValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<usize> for TierValue {
    fn from(n: usize) -> Self {
        i64::try_from(n)
            .map(TierValue::Count)
            .unwrap_or_else(|_| TierValue::Text(n.to_string()))
    }
}

impl From<&str> for TierValue {
    fn from(s: &str) -> Self {
        TierValue::Text(s.to_string())
    }
}

/// Tier sizes exactly as configured, before parsing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierSettings {
    /// Raw legendary count
    pub legendary: TierValue,

    /// Raw rare count
    pub rare: TierValue,

    /// Raw uncommon count
    pub uncommon: TierValue,
}

impl TierSettings {
    /// Create raw settings from any convertible values
    pub fn new(
        legendary: impl Into<TierValue>,
        rare: impl Into<TierValue>,
        uncommon: impl Into<TierValue>,
    ) -> Self {
        Self {
            legendary: legendary.into(),
            rare: rare.into(),
            uncommon: uncommon.into(),
        }
    }

    /// Parse and validate into a [`TierConfig`]
    pub fn resolve(&self) -> Result<TierConfig, TierViolation> {
        let tiers = TierConfig::new(
            self.legendary.resolve("Legendary")?,
            self.rare.resolve("Rare")?,
            self.uncommon.resolve("Uncommon")?,
        );
        tiers.validate()?;
        Ok(tiers)
    }
}

impl From<TierConfig> for TierSettings {
    fn from(tiers: TierConfig) -> Self {
        Self::new(tiers.legendary, tiers.rare, tiers.uncommon)
    }
}

/// Configuration for a ranking run
///
/// # Examples
///
/// ```
/// use rarity_ranker::RankerConfig;
///
/// let config = RankerConfig::default();
/// let tiers = config.tiers.resolve().unwrap();
/// assert_eq!(tiers.legendary, 1);
/// assert_eq!(tiers.rare, 5);
/// assert_eq!(tiers.uncommon, 20);
/// ```
///
/// Loaded from TOML as:
///
/// ```toml
/// [rank]
/// strategy = "frequency"
/// legendary = 1
/// rare = 5
/// uncommon = 20
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankerConfig {
    /// Scoring strategy
    /// Default: frequency (modal-count normalizer)
    #[serde(default)]
    pub strategy: ScoringStrategy,

    /// Tier sizes
    #[serde(flatten)]
    pub tiers: TierSettings,
}

impl Default for RankerConfig {
    /// Balanced tiers: 1 Legendary, 5 Rare, 20 Uncommon
    fn default() -> Self {
        Self {
            strategy: ScoringStrategy::Frequency,
            tiers: TierSettings::new(1usize, 5usize, 20usize),
        }
    }
}

impl RankerConfig {
    /// Create a configuration from a strategy and validated tiers
    pub fn new(strategy: ScoringStrategy, tiers: TierConfig) -> Self {
        Self {
            strategy,
            tiers: tiers.into(),
        }
    }

    /// Narrow tiers for small drops: 1 Legendary, 2 Rare, 5 Uncommon
    pub fn strict() -> Self {
        Self::new(ScoringStrategy::Frequency, TierConfig::new(1, 2, 5))
    }

    /// Wide tiers for large collections: 10 Legendary, 50 Rare, 200 Uncommon
    pub fn generous() -> Self {
        Self::new(ScoringStrategy::Frequency, TierConfig::new(10, 50, 200))
    }
}
