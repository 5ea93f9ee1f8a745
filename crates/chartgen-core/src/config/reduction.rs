use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

use crate::chart::Difficulty;
use crate::config::drums::FAST_BPM_CUTOFF;
use crate::error::{Error, Result};

/// Options for one generation run.
///
/// Loadable from a TOML settings file; every field is optional there:
///
/// ```toml
/// difficulties = ["easy", "medium"]
/// bpm_multiplier = 2.0
/// double_kick_ms = 150
/// force = false
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReductionConfig {
    /// Difficulties to generate. Empty means all of them.
    pub difficulties: Vec<Difficulty>,
    /// Resolution correction for songs charted at half or double BPM.
    pub bpm_multiplier: f64,
    /// Double kick threshold in real milliseconds. 0 disables, negative reverts.
    pub double_kick_ms: i64,
    /// Replace tracks that already exist in the chart.
    pub force: bool,
    /// Effective BPM above which Medium drums thin out on-beats.
    pub fast_drum_bpm: f64,
}

impl Default for ReductionConfig {
    fn default() -> Self {
        Self {
            difficulties: Vec::new(),
            bpm_multiplier: 1.0,
            double_kick_ms: 0,
            force: false,
            fast_drum_bpm: FAST_BPM_CUTOFF,
        }
    }
}

impl ReductionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load settings from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse settings from TOML content
    pub fn parse(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.bpm_multiplier.is_finite() || self.bpm_multiplier <= 0.0 {
            return Err(Error::InvalidConfig(format!(
                "bpm multiplier must be a positive number, got {}",
                self.bpm_multiplier
            )));
        }
        if !self.fast_drum_bpm.is_finite() {
            return Err(Error::InvalidConfig(format!(
                "fast drum bpm must be finite, got {}",
                self.fast_drum_bpm
            )));
        }
        Ok(())
    }

    /// Difficulties to generate, always in Easy, Medium, Hard order.
    pub fn target_difficulties(&self) -> Vec<Difficulty> {
        Difficulty::iter()
            .filter(|d| self.difficulties.is_empty() || self.difficulties.contains(d))
            .collect()
    }

    pub fn with_difficulties(mut self, difficulties: impl IntoIterator<Item = Difficulty>) -> Self {
        self.difficulties = difficulties.into_iter().collect();
        self
    }

    pub fn with_bpm_multiplier(mut self, multiplier: f64) -> Self {
        self.bpm_multiplier = multiplier;
        self
    }

    pub fn with_double_kick_ms(mut self, threshold: i64) -> Self {
        self.double_kick_ms = threshold;
        self
    }

    pub fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    pub fn has_multiplier(&self) -> bool {
        self.bpm_multiplier != 1.0
    }
}
