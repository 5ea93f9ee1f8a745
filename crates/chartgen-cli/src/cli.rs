//! CLI argument definitions for chartgen.

use std::path::PathBuf;

use chartgen_core::{Difficulty, ReductionConfig};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "chartgen")]
#[command(about = "Generate Easy, Medium and Hard tracks from Expert charts", version)]
pub struct Args {
    /// Chart file to parse (a directory with --batch)
    pub path: PathBuf,

    /// Read all .chart files under the given directory
    #[arg(long)]
    pub batch: bool,

    /// Modify files in place instead of writing <name>_easy.chart
    #[arg(long)]
    pub in_place: bool,

    /// Give 2 to fix songs charted at half BPM
    #[arg(long, value_name = "FACTOR")]
    pub bpm_multiplier: Option<f64>,

    /// Only generate Easy (combinable with --medium/--hard)
    #[arg(long)]
    pub easy: bool,

    /// Only generate Medium (combinable with --easy/--hard)
    #[arg(long)]
    pub medium: bool,

    /// Only generate Hard (combinable with --easy/--medium)
    #[arg(long)]
    pub hard: bool,

    /// Mark kicks closer than this many ms as double kicks on Expert drums
    /// (150 works well, negative reverts existing marks)
    #[arg(long, value_name = "MS", allow_negative_numbers = true)]
    pub doublekick: Option<i64>,

    /// Replace parts that already exist
    #[arg(long)]
    pub force: bool,

    /// TOML settings file, command line flags take precedence
    #[arg(short, long, value_name = "FILE", env = "CHARTGEN_CONFIG")]
    pub config: Option<PathBuf>,

    /// Number of files processed in parallel
    #[arg(short, long, default_value = "1")]
    pub jobs: usize,

    /// Answer yes to every confirmation prompt
    #[arg(short, long)]
    pub yes: bool,

    /// Verbose logs
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Difficulties selected by flags, if any.
    pub fn difficulties(&self) -> Vec<Difficulty> {
        [
            (self.easy, Difficulty::Easy),
            (self.medium, Difficulty::Medium),
            (self.hard, Difficulty::Hard),
        ]
        .into_iter()
        .filter_map(|(selected, difficulty)| selected.then_some(difficulty))
        .collect()
    }

    /// Apply flags on top of settings loaded from a file.
    pub fn apply_to(&self, mut config: ReductionConfig) -> ReductionConfig {
        let difficulties = self.difficulties();
        if !difficulties.is_empty() {
            config.difficulties = difficulties;
        }
        if let Some(multiplier) = self.bpm_multiplier {
            config.bpm_multiplier = multiplier;
        }
        if let Some(threshold) = self.doublekick {
            config.double_kick_ms = threshold;
        }
        config.force |= self.force;
        config
    }
}
