//! Tempo map and beat phase classification.
//!
//! - `TempoMap` - tempo and time signature events of a chart, tick to real time
//! - `BeatClassifier` - tick to beat phase, on-beat/off-beat tests

mod beat;
mod tempo_map;

pub use beat::*;
pub use tempo_map::*;
