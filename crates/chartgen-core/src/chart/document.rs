use tracing::debug;

use crate::chart::ExpertTrack;
use crate::config::chart::{DEFAULT_RESOLUTION, SONG_SECTION, SYNC_TRACK_SECTION};
use crate::error::{Error, Result};
use crate::format::{SectionBlock, parse_sections};
use crate::timing::TempoMap;

/// A parsed chart: its sections in file order plus the timing context.
#[derive(Debug, Clone)]
pub struct ChartDocument {
    sections: Vec<SectionBlock>,
    resolution: u32,
    tempo_map: TempoMap,
}

impl ChartDocument {
    pub fn parse(text: &str) -> Result<Self> {
        Self::from_sections(parse_sections(text))
    }

    /// Build from already split sections.
    ///
    /// `[Song]` and `[SyncTrack]` may appear anywhere; a missing or zero
    /// `Resolution` falls back to 192.
    pub fn from_sections(sections: Vec<SectionBlock>) -> Result<Self> {
        let resolution = match sections.iter().find(|s| s.name == SONG_SECTION) {
            Some(song) => parse_resolution(song)?,
            None => None,
        }
        .filter(|&r| r > 0)
        .unwrap_or(DEFAULT_RESOLUTION);
        debug!("Resolution: {}", resolution);

        let tempo_map = match sections.iter().find(|s| s.name == SYNC_TRACK_SECTION) {
            Some(sync) => TempoMap::from_sync_track(resolution, sync)?,
            None => TempoMap::new(resolution, Vec::new(), Vec::new()),
        };

        Ok(Self {
            sections,
            resolution,
            tempo_map,
        })
    }

    pub fn resolution(&self) -> u32 {
        self.resolution
    }

    pub fn tempo_map(&self) -> &TempoMap {
        &self.tempo_map
    }

    pub fn sections(&self) -> &[SectionBlock] {
        &self.sections
    }

    pub fn section(&self, name: &str) -> Option<&SectionBlock> {
        self.sections.iter().find(|s| s.name == name)
    }

    /// Parse every Expert section. Fails on the first malformed entry.
    pub fn expert_tracks(&self) -> Result<Vec<ExpertTrack>> {
        self.sections
            .iter()
            .filter(|s| ExpertTrack::is_expert_section(&s.name))
            .map(ExpertTrack::parse)
            .collect()
    }
}

/// Last `Resolution` entry of `[Song]`, if any.
fn parse_resolution(song: &SectionBlock) -> Result<Option<u32>> {
    let mut resolution = None;
    for (key, value) in song.entries() {
        if key == "Resolution" {
            let parsed = value
                .parse()
                .map_err(|_| Error::invalid_number(SONG_SECTION, "Resolution", value))?;
            resolution = Some(parsed);
        }
    }
    Ok(resolution)
}
