//! Difficulty reduction engine.
//!
//! - `DifficultyReducer` - walks an Expert track tick by tick and emits
//!   Easy/Medium/Hard sections
//! - `single`, `drums` - per-instrument selection rules
//! - `DoubleKickAnnotator` - kick lane rewriting that runs before reduction

mod double_kick;
pub mod drums;
pub mod single;

pub use double_kick::*;

use std::collections::HashMap;

use tracing::{debug, info};

use crate::chart::{Difficulty, ExpertTrack, InstrumentClass, NoteEvent, Tick};
use crate::config::ReductionConfig;
use crate::format::SectionBlock;
use crate::timing::{Beat, BeatClassifier, BeatPhase, TempoMap};

/// Everything a selection rule needs to know about one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickContext {
    pub phase: BeatPhase,
    /// Ticks since the last note emitted for the difficulty being built
    pub gap: Tick,
    pub resolution: Tick,
    /// Active tempo times the resolution multiplier
    pub effective_bpm: f64,
    pub fast_drum_bpm: f64,
}

impl TickContext {
    /// Beat classification with the difficulty's catch-up rule applied.
    pub fn beat(&self, difficulty: Difficulty) -> Beat {
        Beat::of(self.phase).catch_up(difficulty.needs_catch_up(self.gap, self.resolution))
    }

    pub fn is_fast_drums(&self) -> bool {
        self.effective_bpm > self.fast_drum_bpm
    }
}

/// Notes kept for `difficulty` at one tick, dispatched by instrument class.
pub fn select_notes(
    class: InstrumentClass,
    difficulty: Difficulty,
    ctx: &TickContext,
    notes: &[NoteEvent],
) -> Vec<NoteEvent> {
    match class {
        InstrumentClass::Fretted => single::select(difficulty, ctx, notes),
        InstrumentClass::Drums => drums::select(difficulty, ctx, notes),
    }
}

/// Builds lower difficulty sections from Expert tracks of one chart.
pub struct DifficultyReducer<'a> {
    classifier: BeatClassifier<'a>,
    config: &'a ReductionConfig,
    multiplier_logged: bool,
}

impl<'a> DifficultyReducer<'a> {
    pub fn new(tempo_map: &'a TempoMap, config: &'a ReductionConfig) -> Self {
        Self {
            classifier: BeatClassifier::new(tempo_map, config.bpm_multiplier),
            config,
            multiplier_logged: false,
        }
    }

    fn log_multiplier_once(&mut self, tick: Tick) {
        if self.multiplier_logged || !self.config.has_multiplier() {
            return;
        }
        info!(
            "Using bpm multiplier {} (bpm {})",
            self.config.bpm_multiplier,
            self.classifier.tempo_map().bpm_at(tick)
        );
        self.multiplier_logged = true;
    }

    /// One section per configured difficulty, in Easy, Medium, Hard order.
    ///
    /// Every section is present even when no note survives.
    pub fn reduce(&mut self, track: &ExpertTrack) -> Vec<SectionBlock> {
        debug!("Reducing {} ({})", track.name(), track.class());
        let difficulties = self.config.target_difficulties();
        let resolution = self.classifier.tempo_map().resolution() as Tick;
        let grouping = track.group_by_tick();

        let mut lines: HashMap<Difficulty, Vec<String>> = HashMap::new();
        let mut last_emitted: HashMap<Difficulty, Tick> = HashMap::new();

        for group in grouping.iter() {
            self.log_multiplier_once(group.tick);
            let phase = self.classifier.beat_phase(group.tick);
            let effective_bpm = self.classifier.effective_bpm(group.tick);

            for &difficulty in &difficulties {
                let out = lines.entry(difficulty).or_default();
                out.extend(
                    group
                        .events
                        .iter()
                        .map(|value| format!("{} = {}", group.tick, value)),
                );

                let last = last_emitted.get(&difficulty).copied().unwrap_or(0);
                let ctx = TickContext {
                    phase,
                    gap: group.tick.saturating_sub(last),
                    resolution,
                    effective_bpm,
                    fast_drum_bpm: self.config.fast_drum_bpm,
                };

                let selected = select_notes(track.class(), difficulty, &ctx, &group.notes);
                if !selected.is_empty() {
                    last_emitted.insert(difficulty, group.tick);
                    out.extend(selected.iter().map(NoteEvent::to_line));
                }
            }
        }

        difficulties
            .into_iter()
            .map(|difficulty| {
                let body = lines.remove(&difficulty).unwrap_or_default();
                let name = track.generated_name(difficulty);
                debug!("Got new part {} (lines: {})", name, body.len());
                SectionBlock::new(name, body)
            })
            .collect()
    }
}
