//! Configuration and tuning constants.
//!
//! This module contains:
//! - `ReductionConfig` - per-run generation options (difficulties, multiplier, double kick)
//! - Chart format defaults
//! - Timing and drum rule constants

mod reduction;

pub use reduction::*;

/// Chart format defaults.
pub mod chart {
    /// Ticks per quarter note when `[Song]` has no usable `Resolution`.
    pub const DEFAULT_RESOLUTION: u32 = 192;

    /// Difficulty prefix of the source tracks.
    pub const SOURCE_DIFFICULTY: &str = "Expert";

    /// Section holding song metadata.
    pub const SONG_SECTION: &str = "Song";

    /// Section holding tempo and time signature events.
    pub const SYNC_TRACK_SECTION: &str = "SyncTrack";
}

/// Tempo map and beat phase constants.
pub mod timing {
    /// Elapsed time reported when no tempo is active at the earlier tick.
    ///
    /// Only a marker: the double kick pass checks for an active tempo itself
    /// and never compares thresholds against this value.
    pub const NO_TEMPO_ELAPSED_MS: f64 = 99_999.0;

    /// Beats per measure assumed before the first time signature event.
    pub const DEFAULT_BEATS_PER_MEASURE: u32 = 4;
}

/// Drum reduction constants.
pub mod drums {
    /// Effective BPM above which Medium drums only keep on-beats at measure start.
    pub const FAST_BPM_CUTOFF: f64 = 150.0;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chart_constants() {
        assert_eq!(chart::DEFAULT_RESOLUTION, 192);
        assert_eq!(chart::SOURCE_DIFFICULTY, "Expert");
    }

    #[test]
    fn test_sentinel_exceeds_any_sane_threshold() {
        assert!(timing::NO_TEMPO_ELAPSED_MS > 60_000.0);
    }
}
