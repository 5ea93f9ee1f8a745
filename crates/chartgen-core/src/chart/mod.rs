//! Chart model.
//!
//! This module contains the types a reduction reads and writes:
//! - `Difficulty` - generated difficulty levels (Easy, Medium, Hard)
//! - `InstrumentClass` - fretted vs drums rule family
//! - `NoteEvent` - a single note with lane code and sustain
//! - `ExpertTrack`, `TickGrouping` - source track and its per-tick view
//! - `ChartDocument` - a parsed chart with its tempo map

mod difficulty;
mod document;
mod instrument;
mod note;
mod track;

pub use difficulty::*;
pub use document::*;
pub use instrument::*;
pub use note::*;
pub use track::*;

/// Position on the chart timeline, in resolution units per quarter note.
pub type Tick = u64;
