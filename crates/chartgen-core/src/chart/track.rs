use std::collections::BTreeMap;

use crate::chart::{Difficulty, InstrumentClass, NoteEvent, Tick};
use crate::config::chart::SOURCE_DIFFICULTY;
use crate::error::{Error, Result};
use crate::format::{SectionBlock, split_entry};

/// One body line of an Expert track.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackLine {
    Note(NoteEvent),
    /// Any other `tick = value` entry (star power, solo markers, ...)
    Event { tick: Tick, value: String },
    /// Line without `=`, kept only for re-serialization
    Other(String),
}

impl TrackLine {
    pub fn to_line(&self) -> String {
        match self {
            Self::Note(note) => note.to_line(),
            Self::Event { tick, value } => format!("{} = {}", tick, value),
            Self::Other(line) => line.clone(),
        }
    }
}

/// Source track of a reduction (`[ExpertSingle]`, `[ExpertDrums]`, ...).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpertTrack {
    name: String,
    class: InstrumentClass,
    lines: Vec<TrackLine>,
    modified: bool,
}

impl ExpertTrack {
    /// Whether a section name denotes an Expert track.
    pub fn is_expert_section(name: &str) -> bool {
        name.starts_with(SOURCE_DIFFICULTY)
    }

    pub fn parse(section: &SectionBlock) -> Result<Self> {
        let instrument = section
            .name
            .strip_prefix(SOURCE_DIFFICULTY)
            .unwrap_or(&section.name);
        let mut lines = Vec::with_capacity(section.lines.len());

        for line in &section.lines {
            let Some((key, value)) = split_entry(line) else {
                lines.push(TrackLine::Other(line.clone()));
                continue;
            };
            let tick: Tick = key
                .parse()
                .map_err(|_| Error::invalid_number(&section.name, "tick", key))?;

            if NoteEvent::is_note_value(value) {
                lines.push(TrackLine::Note(NoteEvent::parse(&section.name, tick, value)?));
            } else {
                lines.push(TrackLine::Event {
                    tick,
                    value: value.to_string(),
                });
            }
        }

        Ok(Self {
            name: section.name.clone(),
            class: InstrumentClass::from_instrument(instrument),
            lines,
            modified: false,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn class(&self) -> InstrumentClass {
        self.class
    }

    /// Section name of the generated track for `difficulty`.
    pub fn generated_name(&self, difficulty: Difficulty) -> String {
        difficulty.track_name(&self.name)
    }

    pub fn notes(&self) -> impl Iterator<Item = &NoteEvent> {
        self.lines.iter().filter_map(|line| match line {
            TrackLine::Note(note) => Some(note),
            _ => None,
        })
    }

    /// Mutable access to notes, in file order.
    pub fn notes_mut(&mut self) -> impl Iterator<Item = &mut NoteEvent> {
        self.lines.iter_mut().filter_map(|line| match line {
            TrackLine::Note(note) => Some(note),
            _ => None,
        })
    }

    pub fn mark_modified(&mut self) {
        self.modified = true;
    }

    /// Whether lane codes were rewritten since parsing.
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// Entries grouped by tick, ascending. A snapshot: later edits to the
    /// track do not affect it.
    pub fn group_by_tick(&self) -> TickGrouping {
        let mut groups: BTreeMap<Tick, TickGroup> = BTreeMap::new();

        for line in &self.lines {
            match line {
                TrackLine::Note(note) => groups
                    .entry(note.tick)
                    .or_insert_with(|| TickGroup::new(note.tick))
                    .notes
                    .push(*note),
                TrackLine::Event { tick, value } => groups
                    .entry(*tick)
                    .or_insert_with(|| TickGroup::new(*tick))
                    .events
                    .push(value.clone()),
                TrackLine::Other(_) => {}
            }
        }

        TickGrouping {
            groups: groups.into_values().collect(),
        }
    }

    pub fn to_section(&self) -> SectionBlock {
        SectionBlock::new(
            self.name.clone(),
            self.lines.iter().map(TrackLine::to_line).collect(),
        )
    }
}

/// Everything a track holds at one tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickGroup {
    pub tick: Tick,
    pub notes: Vec<NoteEvent>,
    /// Non-note values, copied to every generated difficulty
    pub events: Vec<String>,
}

impl TickGroup {
    fn new(tick: Tick) -> Self {
        Self {
            tick,
            notes: Vec::new(),
            events: Vec::new(),
        }
    }
}

/// Immutable tick-ordered view of a track.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TickGrouping {
    groups: Vec<TickGroup>,
}

impl TickGrouping {
    pub fn iter(&self) -> impl Iterator<Item = &TickGroup> {
        self.groups.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn ticks(&self) -> impl Iterator<Item = Tick> + '_ {
        self.groups.iter().map(|g| g.tick)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(name: &str, lines: &[&str]) -> SectionBlock {
        SectionBlock::new(name, lines.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn test_parse_track() {
        let track = ExpertTrack::parse(&section(
            "ExpertDrums",
            &["0 = N 0 0", "0 = N 1 0", "0 = S 2 768", "192 = N 2 0"],
        ))
        .unwrap();

        assert_eq!(track.name(), "ExpertDrums");
        assert_eq!(track.class(), InstrumentClass::Drums);
        assert_eq!(track.notes().count(), 3);
        assert!(!track.is_modified());
        assert_eq!(track.generated_name(Difficulty::Easy), "EasyDrums");
    }

    #[test]
    fn test_bad_tick_is_an_error() {
        let result = ExpertTrack::parse(&section("ExpertSingle", &["abc = N 0 0"]));
        assert!(matches!(
            result,
            Err(Error::InvalidNumber { field: "tick", .. })
        ));
    }

    #[test]
    fn test_group_by_tick_sorts_and_splits() {
        let track = ExpertTrack::parse(&section(
            "ExpertSingle",
            &["384 = N 1 0", "0 = N 2 0", "0 = E solo", "0 = N 0 0", "384 = S 2 100"],
        ))
        .unwrap();

        let grouping = track.group_by_tick();
        assert_eq!(grouping.ticks().collect::<Vec<_>>(), vec![0, 384]);

        let first = grouping.iter().next().unwrap();
        assert_eq!(
            first.notes,
            vec![NoteEvent::new(0, 2, 0), NoteEvent::new(0, 0, 0)]
        );
        assert_eq!(first.events, vec!["E solo"]);
    }

    #[test]
    fn test_to_section_reflects_note_edits() {
        let mut track = ExpertTrack::parse(&section(
            "ExpertDrums",
            &["0 = N 0 0", "garbage", "48 = N 0 0"],
        ))
        .unwrap();
        let grouping_before = track.group_by_tick();

        if let Some(note) = track.notes_mut().nth(1) {
            note.lane = 32;
        }
        track.mark_modified();

        assert_eq!(
            track.to_section().lines,
            vec!["0 = N 0 0", "garbage", "48 = N 32 0"]
        );
        // earlier snapshot is unaffected
        assert_eq!(grouping_before.iter().nth(1).unwrap().notes[0].lane, 0);
        assert_eq!(track.group_by_tick().iter().nth(1).unwrap().notes[0].lane, 32);
    }

    #[test]
    fn test_empty_track() {
        let track = ExpertTrack::parse(&section("ExpertKeys", &[])).unwrap();
        assert!(track.group_by_tick().is_empty());
        assert_eq!(track.class(), InstrumentClass::Fretted);
    }
}
