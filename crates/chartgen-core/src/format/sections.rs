use tracing::{debug, warn};

/// One `[Name] { ... }` block of a chart file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionBlock {
    /// Name without brackets (e.g., "ExpertDrums")
    pub name: String,
    /// Body lines between the braces, trimmed
    pub lines: Vec<String>,
}

impl SectionBlock {
    pub fn new(name: impl Into<String>, lines: Vec<String>) -> Self {
        Self {
            name: name.into(),
            lines,
        }
    }

    /// Header line (`[ExpertDrums]`)
    pub fn header(&self) -> String {
        format!("[{}]", self.name)
    }

    /// `key = value` pairs of the body, trimmed. Lines without `=` are skipped.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.lines.iter().filter_map(|line| split_entry(line))
    }

    /// Serialized block: header, `{`, body, `}`.
    pub fn to_lines(&self) -> Vec<String> {
        let mut out = Vec::with_capacity(self.lines.len() + 3);
        out.push(self.header());
        out.push("{".to_string());
        out.extend(self.lines.iter().cloned());
        out.push("}".to_string());
        out
    }
}

/// Split a body line into trimmed key and value.
pub fn split_entry(line: &str) -> Option<(&str, &str)> {
    line.split_once('=').map(|(k, v)| (k.trim(), v.trim()))
}

fn section_name(line: &str) -> Option<&str> {
    if line.contains('=') {
        return None;
    }
    line.strip_prefix('[')?.strip_suffix(']')
}

/// Split chart text into section blocks, in file order.
///
/// Lines are trimmed and stray byte order marks removed. Lines outside any
/// section are dropped. A section left open at end of input is kept.
pub fn parse_sections(text: &str) -> Vec<SectionBlock> {
    let mut sections = Vec::new();
    let mut current: Option<SectionBlock> = None;
    let mut opened = false;

    for raw in text.lines() {
        let line = raw.trim().trim_start_matches('\u{feff}').trim();

        if let Some(name) = section_name(line) {
            if let Some(section) = current.take() {
                warn!("Section [{}] is missing its closing brace", section.name);
                sections.push(section);
            }
            current = Some(SectionBlock::new(name, Vec::new()));
            opened = false;
            continue;
        }

        let Some(section) = current.as_mut() else {
            if !line.is_empty() {
                debug!("Skipping line outside of a section: {}", line);
            }
            continue;
        };

        match line {
            "{" if !opened => opened = true,
            "}" => sections.extend(current.take()),
            _ => section.lines.push(line.to_string()),
        }
    }

    if let Some(section) = current {
        warn!("Section [{}] is missing its closing brace", section.name);
        sections.push(section);
    }

    sections
}
