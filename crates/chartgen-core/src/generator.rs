//! Per-chart pipeline: parse, annotate, reduce, merge.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::chart::ChartDocument;
use crate::config::ReductionConfig;
use crate::error::Result;
use crate::format::TrackMerger;
use crate::reduce::{DifficultyReducer, DoubleKickAnnotator};

/// Suffix of generated chart files when not writing in place.
pub const GENERATED_SUFFIX: &str = "_easy";

/// Extension of chart files.
pub const CHART_EXTENSION: &str = "chart";

/// Outcome of one chart.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Generation {
    /// Complete output chart text
    pub output: String,
    pub added: Vec<String>,
    pub replaced: Vec<String>,
    pub skipped: Vec<String>,
    /// Kick notes relabeled in Expert tracks that were written back.
    ///
    /// Relabels on a track skipped for lack of `force` only reach the
    /// generated difficulties and are not counted.
    pub double_kicks: usize,
}

/// Generates lower difficulties for whole charts.
#[derive(Debug, Clone)]
pub struct ChartGenerator {
    config: ReductionConfig,
}

impl ChartGenerator {
    pub fn new(config: ReductionConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ReductionConfig {
        &self.config
    }

    /// Run the whole pipeline on chart text.
    ///
    /// Any malformed number fails the chart as a whole; nothing is produced.
    pub fn generate(&self, text: &str) -> Result<Generation> {
        let document = ChartDocument::parse(text)?;
        let tracks = document.expert_tracks()?;
        let annotator = DoubleKickAnnotator::new(self.config.double_kick_ms);
        let mut reducer = DifficultyReducer::new(document.tempo_map(), &self.config);

        let mut generated = Vec::new();
        let mut annotated: Vec<(String, usize)> = Vec::new();
        for mut track in tracks {
            debug!("parsing expert track {}", track.name());
            if track.class().is_drums() && annotator.is_enabled() {
                let changed = annotator.annotate(&mut track, document.tempo_map());
                if changed > 0 {
                    annotated.push((track.name().to_string(), changed));
                }
            }
            generated.extend(reducer.reduce(&track));
            if track.is_modified() {
                generated.push(track.to_section());
            }
        }

        let outcome = TrackMerger::new(self.config.force).merge(document.sections(), generated);
        let double_kicks = annotated
            .iter()
            .filter(|(name, _)| outcome.replaced.contains(name) || outcome.added.contains(name))
            .map(|(_, changed)| changed)
            .sum();
        Ok(Generation {
            output: outcome.render(),
            added: outcome.added,
            replaced: outcome.replaced,
            skipped: outcome.skipped,
            double_kicks,
        })
    }

    /// Read `input`, generate, and write the result to `output`.
    ///
    /// `output` is only touched when generation succeeded.
    pub fn process_file(&self, input: &Path, output: &Path) -> Result<Generation> {
        info!("Parsing file {}", input.display());
        let bytes = fs::read(input)?;
        let text = decode_chart(&bytes);
        let generation = self.generate(&text)?;
        fs::write(output, &generation.output)?;
        info!("Wrote file {}", output.display());
        Ok(generation)
    }
}

/// Decode chart bytes, honoring a UTF-8 or UTF-16 byte order mark.
pub fn decode_chart(bytes: &[u8]) -> String {
    let (text, encoding, had_errors) = encoding_rs::UTF_8.decode(bytes);
    if had_errors {
        warn!("Chart is not valid {}, invalid bytes replaced", encoding.name());
    }
    text.into_owned()
}

/// Where the generated chart for `input` is written.
///
/// `song.chart` becomes `song_easy.chart` unless writing in place.
pub fn output_path(input: &Path, in_place: bool) -> PathBuf {
    if in_place {
        return input.to_path_buf();
    }
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    input.with_file_name(format!("{stem}{GENERATED_SUFFIX}.{CHART_EXTENSION}"))
}

/// Whether a path names a chart produced by [`output_path`].
pub fn is_generated_chart(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.ends_with(&format!("{GENERATED_SUFFIX}.{CHART_EXTENSION}")))
}
