use strum::Display;

/// Reduction rule family for a track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum InstrumentClass {
    /// Guitar, bass, keys and other fretted "single" style instruments
    Fretted,
    Drums,
}

impl InstrumentClass {
    /// Classify by the instrument part of a section name (e.g., "Drums", "DoubleBass").
    pub fn from_instrument(instrument: &str) -> Self {
        if instrument.contains("Drums") {
            Self::Drums
        } else {
            Self::Fretted
        }
    }

    pub fn is_drums(&self) -> bool {
        matches!(self, Self::Drums)
    }
}
