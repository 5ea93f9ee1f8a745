//! # chartgen-core
//!
//! Generates Easy, Medium and Hard tracks from the Expert tracks of a
//! `.chart` file.
//!
//! This crate provides:
//! - Chart model and section parsing (`ChartDocument`, `ExpertTrack`)
//! - Tempo map and beat phase classification
//! - Per-instrument difficulty reduction rules and double kick annotation
//! - Merging generated tracks back into the chart

pub mod chart;
pub mod config;
pub mod error;
pub mod format;
pub mod generator;
pub mod reduce;
pub mod timing;

// Re-export from chart module
pub use chart::{
    ChartDocument, Difficulty, ExpertTrack, InstrumentClass, NoteEvent, Tick, TickGroup,
    TickGrouping,
};

// Re-export from config module
pub use config::ReductionConfig;

// Re-export from error module
pub use error::{Error, Result};

// Re-export from format module
pub use format::{MergeOutcome, SectionBlock, TrackMerger, parse_sections, sort_tick_region};

// Re-export from generator module
pub use generator::{ChartGenerator, Generation, decode_chart, is_generated_chart, output_path};

// Re-export from reduce module
pub use reduce::{DifficultyReducer, DoubleKickAnnotator, TickContext};

// Re-export from timing module
pub use timing::{BeatClassifier, BeatPhase, TempoMap};
