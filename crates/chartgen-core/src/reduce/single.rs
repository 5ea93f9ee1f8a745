//! Reduction rules for fretted ("single") instruments.

use crate::chart::{Difficulty, NoteEvent};
use crate::reduce::TickContext;
use crate::timing::Beat;

/// Easy folds the orange and open/purple lanes down, and blue onto red.
fn easy_lane(lane: u32) -> u32 {
    match lane {
        4 | 7 => 0,
        3 => 1,
        other => other,
    }
}

fn medium_lane(lane: u32) -> u32 {
    match lane {
        4 | 7 => 0,
        other => other,
    }
}

/// Notes kept at one tick of a fretted track.
pub fn select(difficulty: Difficulty, ctx: &TickContext, notes: &[NoteEvent]) -> Vec<NoteEvent> {
    let beat = ctx.beat(difficulty);

    match difficulty {
        Difficulty::Easy => {
            if !beat.on {
                return Vec::new();
            }
            notes
                .iter()
                .take(1)
                .map(|n| n.with_lane(easy_lane(n.lane)))
                .collect()
        }
        Difficulty::Medium => {
            if !beat.is_whole() {
                return Vec::new();
            }
            notes
                .iter()
                .take(2)
                .map(|n| n.with_lane(medium_lane(n.lane)))
                .collect()
        }
        Difficulty::Hard => {
            let beat = Beat {
                on: beat.on || ctx.phase.is_half(),
                ..beat
            };
            if !beat.is_whole() {
                return Vec::new();
            }
            notes.to_vec()
        }
    }
}
