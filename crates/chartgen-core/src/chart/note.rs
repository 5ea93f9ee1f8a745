use std::fmt;

use crate::chart::Tick;
use crate::error::{Error, Result};

/// Lane code of the bass pedal / kick.
pub const BASS_LANE: u32 = 0;

/// Lane code of an annotated double kick.
pub const DOUBLE_KICK_LANE: u32 = 32;

/// A single `N <lane> <sustain>` entry of a track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NoteEvent {
    pub tick: Tick,
    pub lane: u32,
    pub sustain: u64,
}

impl NoteEvent {
    pub fn new(tick: Tick, lane: u32, sustain: u64) -> Self {
        Self {
            tick,
            lane,
            sustain,
        }
    }

    /// Whether a track value (right-hand side of `tick = value`) is a note.
    pub fn is_note_value(value: &str) -> bool {
        value.starts_with("N ")
    }

    /// Parse the value part of a note line (`N 3 0`).
    pub fn parse(section: &str, tick: Tick, value: &str) -> Result<Self> {
        let malformed = || Error::MalformedNote {
            section: section.to_string(),
            tick,
            value: value.to_string(),
        };

        let mut parts = value.split_whitespace();
        if parts.next() != Some("N") {
            return Err(malformed());
        }
        let lane = parts
            .next()
            .and_then(|s| s.parse().ok())
            .ok_or_else(malformed)?;
        let sustain = parts
            .next()
            .and_then(|s| s.parse().ok())
            .ok_or_else(malformed)?;
        if parts.next().is_some() {
            return Err(malformed());
        }

        Ok(Self::new(tick, lane, sustain))
    }

    pub fn is_bass(&self) -> bool {
        self.lane == BASS_LANE
    }

    pub fn is_double_kick(&self) -> bool {
        self.lane == DOUBLE_KICK_LANE
    }

    /// Same note on another lane.
    pub fn with_lane(self, lane: u32) -> Self {
        Self { lane, ..self }
    }

    /// Full chart line (`192 = N 0 0`).
    pub fn to_line(&self) -> String {
        format!("{} = {}", self.tick, self)
    }
}

impl fmt::Display for NoteEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "N {} {}", self.lane, self.sustain)
    }
}
