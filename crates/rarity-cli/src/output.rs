//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use rarity_domain::RankLabel;
use rarity_ranker::{RankUpdate, RankedComposite};
use colored::*;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// The selected output format.
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Format a dry-run ranking: position, id, score and prospective label.
    pub fn format_ranked(&self, ranked: &[RankedComposite]) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let entries: Vec<serde_json::Value> = ranked
                    .iter()
                    .map(|r| {
                        serde_json::json!({
                            "position": r.position,
                            "id": r.composite.id.as_str(),
                            "score": r.score,
                            "label": r.label.as_str(),
                        })
                    })
                    .collect();
                Ok(serde_json::to_string_pretty(&entries)?)
            }
            OutputFormat::Table => {
                if ranked.is_empty() {
                    return Ok(self.colorize("No composites found.", "yellow"));
                }

                let mut builder = Builder::default();
                builder.push_record(["#", "Composite", "Score", "Label"]);
                for r in ranked {
                    builder.push_record([
                        (r.position + 1).to_string(),
                        r.composite.id.to_string(),
                        format!("{:.4}", r.score),
                        r.label.to_string(),
                    ]);
                }

                let labels: Vec<RankLabel> = ranked.iter().map(|r| r.label).collect();
                Ok(format!("{}\n{}", self.table(builder), self.tally(&labels)))
            }
        }
    }

    /// Format persisted results of a ranking run, in rank order.
    ///
    /// Updates the store rejected keep their id and the label they earned.
    pub fn format_persisted(&self, results: &[RankUpdate]) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let entries: Vec<serde_json::Value> = results
                    .iter()
                    .enumerate()
                    .map(|(position, update)| {
                        serde_json::json!({
                            "position": position,
                            "id": update.id.as_str(),
                            "label": update.label.as_str(),
                            "persisted": update.is_persisted(),
                        })
                    })
                    .collect();
                Ok(serde_json::to_string_pretty(&entries)?)
            }
            OutputFormat::Table => {
                if results.is_empty() {
                    return Ok(self.colorize("No composites found.", "yellow"));
                }

                let mut builder = Builder::default();
                builder.push_record(["#", "Composite", "Label", "Status"]);
                for (position, update) in results.iter().enumerate() {
                    let status = if update.is_persisted() { "saved" } else { "update failed" };
                    builder.push_record([
                        (position + 1).to_string(),
                        update.id.to_string(),
                        update.label.to_string(),
                        status.to_string(),
                    ]);
                }

                let labels: Vec<RankLabel> = results
                    .iter()
                    .filter(|update| update.is_persisted())
                    .map(|update| update.label)
                    .collect();
                Ok(format!("{}\n{}", self.table(builder), self.tally(&labels)))
            }
        }
    }

    /// One line counting each label, colored by tier.
    pub fn tally(&self, labels: &[RankLabel]) -> String {
        RankLabel::ALL
            .iter()
            .map(|label| {
                let count = labels.iter().filter(|l| *l == label).count();
                self.label(*label, &format!("{}: {}", label, count))
            })
            .collect::<Vec<_>>()
            .join("  ")
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    fn table(&self, builder: Builder) -> String {
        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));
        table.to_string()
    }

    fn label(&self, label: RankLabel, text: &str) -> String {
        match label {
            RankLabel::Legendary => self.colorize(text, "magenta"),
            RankLabel::Rare => self.colorize(text, "cyan"),
            RankLabel::Uncommon => self.colorize(text, "green"),
            RankLabel::Common => text.to_string(),
        }
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "green" => text.green().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            "magenta" => text.magenta().to_string(),
            _ => text.to_string(),
        }
    }
}
