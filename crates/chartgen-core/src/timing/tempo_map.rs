use tracing::debug;

use crate::chart::Tick;
use crate::config::chart::{DEFAULT_RESOLUTION, SYNC_TRACK_SECTION};
use crate::config::timing::NO_TEMPO_ELAPSED_MS;
use crate::error::{Error, Result};
use crate::format::SectionBlock;

/// `tick = B <milliBPM>` entry of the sync track.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TempoEvent {
    pub tick: Tick,
    pub milli_bpm: u64,
}

impl TempoEvent {
    pub fn bpm(&self) -> f64 {
        self.milli_bpm as f64 / 1000.0
    }
}

/// `tick = TS <numerator> [<denominator exponent>]` entry of the sync track.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeSignatureEvent {
    pub tick: Tick,
    pub beats_per_measure: u32,
}

/// Tempo and time signature context of one chart. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct TempoMap {
    resolution: u32,
    tempos: Vec<TempoEvent>,
    time_signatures: Vec<TimeSignatureEvent>,
}

impl TempoMap {
    /// Build from events. A resolution of 0 falls back to the default.
    pub fn new(
        resolution: u32,
        mut tempos: Vec<TempoEvent>,
        mut time_signatures: Vec<TimeSignatureEvent>,
    ) -> Self {
        // Stable: events sharing a tick keep file order, the last one wins.
        tempos.sort_by_key(|e| e.tick);
        time_signatures.sort_by_key(|e| e.tick);
        Self {
            resolution: if resolution == 0 {
                DEFAULT_RESOLUTION
            } else {
                resolution
            },
            tempos,
            time_signatures,
        }
    }

    /// Parse `B` and `TS` entries of a `[SyncTrack]` section. Other entries are ignored.
    pub fn from_sync_track(resolution: u32, section: &SectionBlock) -> Result<Self> {
        let mut tempos = Vec::new();
        let mut time_signatures = Vec::new();

        for (key, value) in section.entries() {
            let mut parts = value.split_whitespace();
            let kind = parts.next();
            if !matches!(kind, Some("B") | Some("TS")) {
                continue;
            }

            let tick: Tick = key
                .parse()
                .map_err(|_| Error::invalid_number(SYNC_TRACK_SECTION, "tick", key))?;
            let operand = parts.next().unwrap_or_default();

            if kind == Some("B") {
                let milli_bpm = operand
                    .parse()
                    .map_err(|_| Error::invalid_number(SYNC_TRACK_SECTION, "BPM", value))?;
                tempos.push(TempoEvent { tick, milli_bpm });
            } else {
                let beats_per_measure = operand.parse().map_err(|_| {
                    Error::invalid_number(SYNC_TRACK_SECTION, "time signature", value)
                })?;
                time_signatures.push(TimeSignatureEvent {
                    tick,
                    beats_per_measure,
                });
            }
        }

        debug!(
            "Sync track: {} tempo events, {} time signatures",
            tempos.len(),
            time_signatures.len()
        );
        Ok(Self::new(resolution, tempos, time_signatures))
    }

    pub fn resolution(&self) -> u32 {
        self.resolution
    }

    pub fn tempos(&self) -> &[TempoEvent] {
        &self.tempos
    }

    pub fn time_signatures(&self) -> &[TimeSignatureEvent] {
        &self.time_signatures
    }

    /// Latest tempo event at or before `tick`, if any.
    pub fn tempo_at(&self, tick: Tick) -> Option<&TempoEvent> {
        let idx = self.tempos.partition_point(|e| e.tick <= tick);
        idx.checked_sub(1).map(|i| &self.tempos[i])
    }

    /// Real BPM active at `tick`, 0 before the first tempo event.
    pub fn bpm_at(&self, tick: Tick) -> f64 {
        self.tempo_at(tick).map(TempoEvent::bpm).unwrap_or(0.0)
    }

    /// Latest time signature event at or before `tick`, if any.
    pub fn time_signature_at(&self, tick: Tick) -> Option<&TimeSignatureEvent> {
        let idx = self.time_signatures.partition_point(|e| e.tick <= tick);
        idx.checked_sub(1).map(|i| &self.time_signatures[i])
    }

    /// Approximate wall-clock milliseconds from `earlier` to `later`.
    ///
    /// Only the tempo active at `earlier` is used; tempo changes in between
    /// are ignored. Without an active tempo the result is
    /// [`NO_TEMPO_ELAPSED_MS`].
    pub fn elapsed_real_ms(&self, later: Tick, earlier: Tick) -> f64 {
        let bpm = self.bpm_at(earlier);
        if bpm <= 0.0 {
            return NO_TEMPO_ELAPSED_MS;
        }
        let ticks = later as f64 - earlier as f64;
        let beats = ticks / self.resolution as f64;
        let minutes = beats / bpm;
        minutes * 60_000.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sync(lines: &[&str]) -> SectionBlock {
        SectionBlock::new(
            SYNC_TRACK_SECTION,
            lines.iter().map(|s| s.to_string()).collect(),
        )
    }

    #[test]
    fn test_from_sync_track() {
        let map = TempoMap::from_sync_track(
            192,
            &sync(&["0 = TS 4", "0 = B 120000", "768 = TS 3 2", "768 = A 500000"]),
        )
        .unwrap();

        assert_eq!(map.resolution(), 192);
        assert_eq!(map.tempos(), &[TempoEvent { tick: 0, milli_bpm: 120000 }]);
        assert_eq!(map.time_signatures().len(), 2);
        assert_eq!(map.time_signatures()[1].beats_per_measure, 3);
    }

    #[test]
    fn test_zero_resolution_uses_default() {
        let map = TempoMap::new(0, Vec::new(), Vec::new());
        assert_eq!(map.resolution(), DEFAULT_RESOLUTION);
    }

    #[test]
    fn test_invalid_bpm_is_an_error() {
        let result = TempoMap::from_sync_track(192, &sync(&["0 = B fast"]));
        assert!(matches!(
            result,
            Err(Error::InvalidNumber { field: "BPM", .. })
        ));

        let result = TempoMap::from_sync_track(192, &sync(&["x = B 120000"]));
        assert!(matches!(
            result,
            Err(Error::InvalidNumber { field: "tick", .. })
        ));
    }

    #[test]
    fn test_tempo_at() {
        let map = TempoMap::from_sync_track(
            192,
            &sync(&["192 = B 100000", "960 = B 150000", "1920 = B 90500"]),
        )
        .unwrap();

        assert!(map.tempo_at(0).is_none());
        assert_eq!(map.bpm_at(0), 0.0);
        assert_eq!(map.bpm_at(192), 100.0);
        assert_eq!(map.bpm_at(959), 100.0);
        let active = map.tempo_at(1000).unwrap();
        assert_eq!(active.tick, 960);
        assert_eq!(active.bpm(), 150.0);
        assert_eq!(map.bpm_at(5000), 90.5);
    }

    #[test]
    fn test_time_signature_at() {
        let map = TempoMap::from_sync_track(192, &sync(&["0 = TS 4", "1536 = TS 7"])).unwrap();

        assert_eq!(map.time_signature_at(1535).unwrap().beats_per_measure, 4);
        let ts = map.time_signature_at(1536).unwrap();
        assert_eq!(ts.beats_per_measure, 7);
        assert_eq!(ts.tick, 1536);
    }

    #[test]
    fn test_elapsed_real_ms() {
        let map = TempoMap::from_sync_track(192, &sync(&["0 = B 120000"])).unwrap();

        assert_eq!(map.elapsed_real_ms(48, 0), 125.0);
        assert_eq!(map.elapsed_real_ms(384, 0), 1000.0);
    }

    #[test]
    fn test_elapsed_uses_tempo_at_earlier_tick_only() {
        let map =
            TempoMap::from_sync_track(192, &sync(&["0 = B 120000", "192 = B 60000"])).unwrap();

        // 2 beats at 120 BPM, the change at 192 is ignored
        assert_eq!(map.elapsed_real_ms(384, 0), 1000.0);
        assert_eq!(map.elapsed_real_ms(576, 384), 1000.0);
    }

    #[test]
    fn test_elapsed_without_tempo_is_sentinel() {
        let map = TempoMap::from_sync_track(192, &sync(&["768 = B 120000"])).unwrap();
        assert_eq!(map.elapsed_real_ms(800, 0), NO_TEMPO_ELAPSED_MS);
    }
}
