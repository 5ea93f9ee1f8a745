use tracing::info;

use crate::chart::{BASS_LANE, DOUBLE_KICK_LANE, ExpertTrack, Tick};
use crate::timing::TempoMap;

/// Marks closely spaced kicks of an Expert drum track as double kicks.
///
/// Spacing is measured in real milliseconds through the tempo map, so the
/// same threshold works across tempo changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DoubleKickAnnotator {
    threshold_ms: i64,
}

impl DoubleKickAnnotator {
    /// Positive thresholds annotate, negative ones revert, 0 disables.
    pub fn new(threshold_ms: i64) -> Self {
        Self { threshold_ms }
    }

    pub fn is_enabled(&self) -> bool {
        self.threshold_ms != 0
    }

    /// Rewrite kick lanes in place. Returns the number of notes changed.
    ///
    /// The track is marked modified when anything changed; callers must
    /// regroup it before reducing.
    pub fn annotate(&self, track: &mut ExpertTrack, tempo_map: &TempoMap) -> usize {
        let changed = if self.threshold_ms > 0 {
            self.mark(track, tempo_map)
        } else if self.threshold_ms < 0 {
            Self::revert(track)
        } else {
            0
        };

        if changed > 0 {
            track.mark_modified();
        }
        changed
    }

    fn mark(&self, track: &mut ExpertTrack, tempo_map: &TempoMap) -> usize {
        let threshold = self.threshold_ms as f64;
        let mut kicks: Vec<_> = track.notes_mut().filter(|n| n.is_bass()).collect();
        kicks.sort_by_key(|n| n.tick);

        let mut anchor: Option<Tick> = None;
        let mut changed = 0;
        for kick in kicks {
            let Some(previous) = anchor else {
                anchor = Some(kick.tick);
                continue;
            };

            // no tempo at the anchor means arbitrarily distant, whatever the threshold
            if tempo_map.tempo_at(previous).is_none() {
                anchor = Some(kick.tick);
                continue;
            }
            let elapsed = tempo_map.elapsed_real_ms(kick.tick, previous);
            if elapsed < threshold {
                info!("{}: {:.1}ms after last kick, converting to 2x kick", kick.tick, elapsed);
                kick.lane = DOUBLE_KICK_LANE;
                changed += 1;
            } else {
                anchor = Some(kick.tick);
            }
        }
        changed
    }

    fn revert(track: &mut ExpertTrack) -> usize {
        let mut changed = 0;
        for note in track.notes_mut().filter(|n| n.is_double_kick()) {
            info!("{}: converting 2x kick to normal", note.tick);
            note.lane = BASS_LANE;
            changed += 1;
        }
        changed
    }
}
