use std::fmt;

use crate::chart::Tick;
use crate::config::timing::DEFAULT_BEATS_PER_MEASURE;
use crate::timing::TempoMap;

/// Position of a tick inside its measure, in beats, as an exact fraction.
///
/// The value is `numer / denom` and always lies in `[0, beats_per_measure)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BeatPhase {
    numer: u64,
    denom: u64,
}

impl BeatPhase {
    pub fn new(numer: u64, denom: u64) -> Self {
        Self {
            numer,
            denom: denom.max(1),
        }
    }

    pub fn is_whole(&self) -> bool {
        self.numer % self.denom == 0
    }

    /// Whole or exactly halfway between two beats.
    pub fn is_half(&self) -> bool {
        (self.numer * 2) % self.denom == 0
    }

    /// Whole beat with an even index (0, 2, ...).
    pub fn is_on_beat(&self) -> bool {
        self.is_whole() && (self.numer / self.denom) % 2 == 0
    }

    /// Whole beat with an odd index (1, 3, ...).
    pub fn is_off_beat(&self) -> bool {
        self.is_whole() && (self.numer / self.denom) % 2 == 1
    }

    pub fn is_measure_start(&self) -> bool {
        self.numer == 0
    }

    pub fn as_f64(&self) -> f64 {
        self.numer as f64 / self.denom as f64
    }
}

impl fmt::Display for BeatPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_f64())
    }
}

/// On/off-beat classification of one tick for one reduction rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Beat {
    pub on: bool,
    pub off: bool,
}

impl Beat {
    pub fn of(phase: BeatPhase) -> Self {
        Self {
            on: phase.is_on_beat(),
            off: phase.is_off_beat(),
        }
    }

    /// Catch-up rule: after a long enough silence every tick that is not
    /// off-beat counts as on-beat.
    pub fn catch_up(mut self, silence_exceeded: bool) -> Self {
        if silence_exceeded && !self.off {
            self.on = true;
        }
        self
    }

    /// Either on- or off-beat.
    pub fn is_whole(&self) -> bool {
        self.on || self.off
    }
}

/// Maps ticks to beat phases, with the resolution correction multiplier applied.
#[derive(Debug, Clone, Copy)]
pub struct BeatClassifier<'a> {
    tempo_map: &'a TempoMap,
    multiplier: f64,
}

impl<'a> BeatClassifier<'a> {
    pub fn new(tempo_map: &'a TempoMap, multiplier: f64) -> Self {
        Self {
            tempo_map,
            multiplier,
        }
    }

    pub fn tempo_map(&self) -> &'a TempoMap {
        self.tempo_map
    }

    /// Beats per measure and resolution after correction.
    ///
    /// Both are truncated to whole numbers (at least 1) when a multiplier is in use.
    fn corrected(&self, beats_per_measure: u32) -> (u64, u64) {
        let resolution = self.tempo_map.resolution() as u64;
        let beats = beats_per_measure as u64;
        if self.multiplier == 1.0 {
            return (beats.max(1), resolution);
        }
        let beats = (beats as f64 * self.multiplier) as u64;
        let resolution = (resolution as f64 / self.multiplier) as u64;
        (beats.max(1), resolution.max(1))
    }

    /// Phase of `tick` relative to the active time signature.
    ///
    /// Before the first time signature event, 4 beats per measure from tick 0
    /// are assumed.
    pub fn beat_phase(&self, tick: Tick) -> BeatPhase {
        let (beats_per_measure, since) = self
            .tempo_map
            .time_signature_at(tick)
            .map(|ts| (ts.beats_per_measure, ts.tick))
            .unwrap_or((DEFAULT_BEATS_PER_MEASURE, 0));
        let (beats, resolution) = self.corrected(beats_per_measure);

        let delta = tick.saturating_sub(since);
        BeatPhase::new(delta % (beats * resolution), resolution)
    }

    pub fn is_on_beat(&self, tick: Tick) -> bool {
        self.beat_phase(tick).is_on_beat()
    }

    pub fn is_off_beat(&self, tick: Tick) -> bool {
        self.beat_phase(tick).is_off_beat()
    }

    /// Active BPM scaled by the multiplier, 0 before the first tempo event.
    pub fn effective_bpm(&self, tick: Tick) -> f64 {
        self.tempo_map.bpm_at(tick) * self.multiplier
    }
}
