use std::collections::HashSet;

use tracing::info;

use crate::format::SectionBlock;

/// Result of merging generated sections into a chart.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeOutcome {
    /// Final chart lines, tick region sorted
    pub lines: Vec<String>,
    /// Generated sections written for the first time
    pub added: Vec<String>,
    /// Existing sections overwritten (force only)
    pub replaced: Vec<String>,
    /// Generated sections dropped because the chart already had them
    pub skipped: Vec<String>,
}

impl MergeOutcome {
    /// Chart text, lines joined with `\n`, no trailing newline.
    pub fn render(&self) -> String {
        self.lines.join("\n")
    }
}

/// Combines original and generated sections under an overwrite policy.
#[derive(Debug, Clone, Copy, Default)]
pub struct TrackMerger {
    force: bool,
}

impl TrackMerger {
    pub fn new(force: bool) -> Self {
        Self { force }
    }

    /// Originals keep their order; generated sections follow in generation order.
    ///
    /// A generated section whose name already exists is dropped unless
    /// `force` is set, in which case the original is dropped instead.
    pub fn merge(&self, original: &[SectionBlock], generated: Vec<SectionBlock>) -> MergeOutcome {
        let generated_names: HashSet<&str> = generated.iter().map(|s| s.name.as_str()).collect();
        let original_names: HashSet<&str> = original.iter().map(|s| s.name.as_str()).collect();
        let mut outcome = MergeOutcome::default();
        let mut lines = Vec::new();

        for section in original {
            if generated_names.contains(section.name.as_str()) {
                if self.force {
                    info!("Replacing existing part {}", section.header());
                    outcome.replaced.push(section.name.clone());
                    continue;
                }
                info!("Part {} already exists, skipping", section.header());
                outcome.skipped.push(section.name.clone());
            }
            lines.extend(section.to_lines());
        }

        let mut written: HashSet<String> = HashSet::new();
        for section in generated {
            let exists = original_names.contains(section.name.as_str());
            if (exists && !self.force) || !written.insert(section.name.clone()) {
                continue;
            }
            if !exists {
                outcome.added.push(section.name.clone());
            }
            lines.extend(section.to_lines());
        }

        outcome.lines = sort_tick_region(lines);
        outcome
    }
}

/// Leading tick of a line, if it starts with a digit.
fn leading_tick(line: &str) -> Option<u64> {
    let digits = line.len() - line.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    if digits == 0 {
        return None;
    }
    Some(line[..digits].parse().unwrap_or(u64::MAX))
}

/// Stable-sort the first run of tick-prefixed lines by tick.
///
/// Lines before the run and everything after it keep their order.
pub fn sort_tick_region(lines: Vec<String>) -> Vec<String> {
    let Some(start) = lines.iter().position(|l| leading_tick(l).is_some()) else {
        return lines;
    };
    let end = lines[start..]
        .iter()
        .position(|l| leading_tick(l).is_none())
        .map_or(lines.len(), |offset| start + offset);

    let mut lines = lines;
    lines[start..end].sort_by_key(|l| leading_tick(l).unwrap_or(u64::MAX));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(name: &str, lines: &[&str]) -> SectionBlock {
        SectionBlock::new(name, lines.iter().map(|s| s.to_string()).collect())
    }

    fn original() -> Vec<SectionBlock> {
        vec![
            section("Song", &["Resolution = 192"]),
            section("ExpertSingle", &["0 = N 3 0"]),
            section("EasySingle", &["0 = N 4 0"]),
        ]
    }

    #[test]
    fn test_existing_section_is_kept_without_force() {
        let outcome = TrackMerger::new(false).merge(
            &original(),
            vec![
                section("EasySingle", &["0 = N 1 0"]),
                section("MediumSingle", &["0 = N 3 0"]),
            ],
        );

        assert_eq!(outcome.skipped, vec!["EasySingle"]);
        assert_eq!(outcome.added, vec!["MediumSingle"]);
        assert!(outcome.replaced.is_empty());
        assert_eq!(
            outcome.lines,
            vec![
                "[Song]",
                "{",
                "Resolution = 192",
                "}",
                "[ExpertSingle]",
                "{",
                "0 = N 3 0",
                "}",
                "[EasySingle]",
                "{",
                "0 = N 4 0",
                "}",
                "[MediumSingle]",
                "{",
                "0 = N 3 0",
                "}",
            ]
        );
    }

    #[test]
    fn test_force_replaces_and_appends() {
        let outcome =
            TrackMerger::new(true).merge(&original(), vec![section("EasySingle", &["0 = N 1 0"])]);

        assert_eq!(outcome.replaced, vec!["EasySingle"]);
        assert!(outcome.added.is_empty());
        assert_eq!(
            &outcome.lines[8..],
            &["[EasySingle]", "{", "0 = N 1 0", "}"]
        );
        assert!(!outcome.render().contains("0 = N 4 0"));
    }

    #[test]
    fn test_render_has_no_trailing_newline() {
        let outcome = TrackMerger::new(false).merge(&[section("Song", &[])], Vec::new());
        assert_eq!(outcome.render(), "[Song]\n{\n}");
    }

    #[test]
    fn test_sort_tick_region() {
        let lines: Vec<String> = [
            "[SyncTrack]",
            "{",
            "768 = B 100000",
            "0 = TS 4",
            "0 = B 120000",
            "}",
            "[ExpertSingle]",
            "{",
            "5 = N 0 0",
            "1 = N 0 0",
            "}",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();

        let sorted = sort_tick_region(lines);
        assert_eq!(
            &sorted[..6],
            &["[SyncTrack]", "{", "0 = TS 4", "0 = B 120000", "768 = B 100000", "}"]
        );
        // trailer is never reordered
        assert_eq!(&sorted[8..10], &["5 = N 0 0", "1 = N 0 0"]);
    }

    #[test]
    fn test_sort_without_tick_lines() {
        let lines = vec!["[Song]".to_string(), "{".to_string(), "}".to_string()];
        assert_eq!(sort_tick_region(lines.clone()), lines);
    }

    #[test]
    fn test_leading_tick() {
        assert_eq!(leading_tick("1920 = N 0 0"), Some(1920));
        assert_eq!(leading_tick("Resolution = 192"), None);
        assert_eq!(leading_tick("}"), None);
    }
}
