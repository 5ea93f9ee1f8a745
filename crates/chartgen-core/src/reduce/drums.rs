//! Reduction rules for drum kits.

use crate::chart::{Difficulty, NoteEvent};
use crate::reduce::TickContext;

/// Bass alone at measure start, otherwise the first pad note.
fn bass_or_single(
    ctx: &TickContext,
    notes: &[NoteEvent],
    remap: impl Fn(u32) -> u32,
) -> Vec<NoteEvent> {
    if ctx.phase.is_measure_start() {
        if let Some(bass) = notes.iter().find(|n| n.is_bass()) {
            return vec![*bass];
        }
    }
    notes
        .iter()
        .find(|n| !n.is_bass())
        .map(|n| vec![n.with_lane(remap(n.lane))])
        .unwrap_or_default()
}

fn easy_lane(lane: u32) -> u32 {
    match lane {
        3 | 4 => 2,
        other => other,
    }
}

fn medium_lane(lane: u32) -> u32 {
    match lane {
        4 => 3,
        other => other,
    }
}

/// Notes kept at one tick of a drum track.
pub fn select(difficulty: Difficulty, ctx: &TickContext, notes: &[NoteEvent]) -> Vec<NoteEvent> {
    let beat = ctx.beat(difficulty);

    match difficulty {
        Difficulty::Easy => {
            if !beat.on {
                return Vec::new();
            }
            bass_or_single(ctx, notes, easy_lane)
        }
        Difficulty::Medium => {
            if !beat.is_whole() {
                return Vec::new();
            }
            if beat.on {
                if ctx.is_fast_drums() && !ctx.phase.is_measure_start() {
                    return Vec::new();
                }
                bass_or_single(ctx, notes, medium_lane)
            } else {
                notes
                    .iter()
                    .filter(|n| !n.is_bass())
                    .take(2)
                    .map(|n| n.with_lane(medium_lane(n.lane)))
                    .collect()
            }
        }
        Difficulty::Hard => {
            if beat.on {
                notes
                    .iter()
                    .find(|n| n.is_bass())
                    .into_iter()
                    .chain(notes.iter().find(|n| !n.is_bass()))
                    .copied()
                    .collect()
            } else if beat.off {
                let crowded = notes.len() > 2;
                notes
                    .iter()
                    .take(2)
                    .filter(|n| !(crowded && n.is_bass()))
                    .copied()
                    .collect()
            } else {
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timing::BeatPhase;

    const RES: u64 = 192;

    fn ctx(phase_ticks: u64, gap: u64) -> TickContext {
        TickContext {
            phase: BeatPhase::new(phase_ticks, RES),
            gap,
            resolution: RES,
            effective_bpm: 120.0,
            fast_drum_bpm: 150.0,
        }
    }

    fn fast(mut ctx: TickContext) -> TickContext {
        ctx.effective_bpm = 180.0;
        ctx
    }

    fn notes(lanes: &[u32]) -> Vec<NoteEvent> {
        lanes.iter().map(|&l| NoteEvent::new(0, l, 0)).collect()
    }

    fn lanes(selected: Vec<NoteEvent>) -> Vec<u32> {
        selected.into_iter().map(|n| n.lane).collect()
    }

    #[test]
    fn test_easy_bass_only_at_measure_start() {
        let picked = select(Difficulty::Easy, &ctx(0, 0), &notes(&[1, 0]));
        assert_eq!(lanes(picked), vec![0]);

        // beat 2: bass is skipped in favor of the first pad
        let picked = select(Difficulty::Easy, &ctx(384, 0), &notes(&[0, 4]));
        assert_eq!(lanes(picked), vec![2]);
    }

    #[test]
    fn test_easy_remaps_cymbals_and_toms() {
        let picked = select(Difficulty::Easy, &ctx(0, 0), &notes(&[3, 1]));
        assert_eq!(lanes(picked), vec![2]);
    }

    #[test]
    fn test_easy_lone_bass_off_measure_start_is_dropped() {
        assert!(select(Difficulty::Easy, &ctx(384, 0), &notes(&[0])).is_empty());
    }

    #[test]
    fn test_easy_ignores_off_beats() {
        assert!(select(Difficulty::Easy, &ctx(192, 10_000), &notes(&[1])).is_empty());
    }

    #[test]
    fn test_medium_on_beat() {
        let picked = select(Difficulty::Medium, &ctx(0, 0), &notes(&[2, 0]));
        assert_eq!(lanes(picked), vec![0]);

        let picked = select(Difficulty::Medium, &ctx(384, 0), &notes(&[0, 4, 2]));
        assert_eq!(lanes(picked), vec![3]);
    }

    #[test]
    fn test_medium_off_beat_excludes_bass() {
        let picked = select(Difficulty::Medium, &ctx(192, 0), &notes(&[0, 4, 1, 2]));
        assert_eq!(lanes(picked), vec![3, 1]);

        assert!(select(Difficulty::Medium, &ctx(192, 0), &notes(&[0])).is_empty());
    }

    #[test]
    fn test_medium_fast_song_keeps_only_measure_start_on_beats() {
        assert!(select(Difficulty::Medium, &fast(ctx(384, 0)), &notes(&[1])).is_empty());
        let picked = select(Difficulty::Medium, &fast(ctx(0, 0)), &notes(&[1]));
        assert_eq!(lanes(picked), vec![1]);
        // off-beats are unaffected
        let picked = select(Difficulty::Medium, &fast(ctx(192, 0)), &notes(&[1]));
        assert_eq!(lanes(picked), vec![1]);
    }

    #[test]
    fn test_medium_fast_suppression_applies_to_catch_up() {
        assert!(select(Difficulty::Medium, &fast(ctx(96, 10_000)), &notes(&[1])).is_empty());
    }

    #[test]
    fn test_hard_on_beat_bass_plus_one() {
        let picked = select(Difficulty::Hard, &ctx(0, 0), &notes(&[2, 3, 0]));
        assert_eq!(lanes(picked), vec![0, 2]);

        let picked = select(Difficulty::Hard, &ctx(384, 0), &notes(&[2, 3]));
        assert_eq!(lanes(picked), vec![2]);
    }

    #[test]
    fn test_hard_off_beat() {
        let picked = select(Difficulty::Hard, &ctx(192, 0), &notes(&[0, 2]));
        assert_eq!(lanes(picked), vec![0, 2]);

        let picked = select(Difficulty::Hard, &ctx(192, 0), &notes(&[0, 2, 3]));
        assert_eq!(lanes(picked), vec![2]);
    }

    #[test]
    fn test_hard_catch_up_after_one_beat() {
        assert!(select(Difficulty::Hard, &ctx(96, 191), &notes(&[1])).is_empty());
        assert_eq!(select(Difficulty::Hard, &ctx(96, 192), &notes(&[1])).len(), 1);
    }

    #[test]
    fn test_double_kick_lane_is_not_bass() {
        let picked = select(Difficulty::Easy, &ctx(384, 0), &notes(&[32]));
        assert_eq!(lanes(picked), vec![32]);
    }
}
