//! Chart text layout.
//!
//! - `parse_sections` - split chart text into `[Name] { ... }` blocks
//! - `TrackMerger` - combine original and generated sections, order tick lines

mod merge;
mod sections;

pub use merge::*;
pub use sections::*;
