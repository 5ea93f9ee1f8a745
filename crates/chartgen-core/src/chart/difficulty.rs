use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

use crate::chart::Tick;
use crate::config::chart::SOURCE_DIFFICULTY;

/// Difficulties generated from an Expert track.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    EnumIter,
    EnumString,
    IntoStaticStr,
    Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(ascii_case_insensitive)]
pub enum Difficulty {
    #[serde(alias = "Easy")]
    Easy,
    #[serde(alias = "Medium")]
    Medium,
    #[serde(alias = "Hard")]
    Hard,
}

impl Difficulty {
    /// Capitalized name used in section headers (e.g., "Easy")
    pub fn name(&self) -> &'static str {
        self.into()
    }

    /// Whether a silent stretch of `gap` ticks forces the next candidate on-beat.
    ///
    /// Easy waits longer than three beats, Medium longer than two, Hard one
    /// full beat.
    pub fn needs_catch_up(&self, gap: Tick, resolution: Tick) -> bool {
        match self {
            Self::Easy => gap > resolution * 3,
            Self::Medium => gap > resolution * 2,
            Self::Hard => gap >= resolution,
        }
    }

    /// Name of the generated section for an Expert section name.
    ///
    /// `ExpertDrums` becomes `EasyDrums`. Only the first occurrence is replaced.
    pub fn track_name(&self, expert_name: &str) -> String {
        expert_name.replacen(SOURCE_DIFFICULTY, self.name(), 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn test_difficulty_from_str() {
        assert_eq!(Difficulty::from_str("easy"), Ok(Difficulty::Easy));
        assert_eq!(Difficulty::from_str("Medium"), Ok(Difficulty::Medium));
        assert_eq!(Difficulty::from_str("HARD"), Ok(Difficulty::Hard));
        assert!(Difficulty::from_str("expert").is_err());
    }

    #[test]
    fn test_difficulty_order() {
        let all: Vec<_> = Difficulty::iter().collect();
        assert_eq!(all, vec![Difficulty::Easy, Difficulty::Medium, Difficulty::Hard]);
    }

    #[test]
    fn test_track_name() {
        assert_eq!(Difficulty::Easy.track_name("ExpertDrums"), "EasyDrums");
        assert_eq!(Difficulty::Hard.track_name("ExpertSingle"), "HardSingle");
        assert_eq!(
            Difficulty::Medium.track_name("ExpertDoubleBass"),
            "MediumDoubleBass"
        );
    }

    #[test]
    fn test_catch_up_thresholds() {
        assert!(!Difficulty::Easy.needs_catch_up(576, 192));
        assert!(Difficulty::Easy.needs_catch_up(577, 192));
        assert!(!Difficulty::Medium.needs_catch_up(384, 192));
        assert!(Difficulty::Medium.needs_catch_up(385, 192));
        assert!(!Difficulty::Hard.needs_catch_up(191, 192));
        assert!(Difficulty::Hard.needs_catch_up(192, 192));
    }

    #[test]
    fn test_display() {
        assert_eq!(Difficulty::Medium.to_string(), "Medium");
    }
}
