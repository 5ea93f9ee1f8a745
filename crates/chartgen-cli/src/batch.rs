//! Running the generator over a list of charts.

use std::path::{Path, PathBuf};

use anyhow::Result;
use chartgen_core::{ChartGenerator, Generation, output_path};
use owo_colors::OwoColorize;
use rayon::prelude::*;
use tracing::error;

/// Outcome of one input file.
#[derive(Debug)]
pub struct FileReport {
    pub input: PathBuf,
    pub output: PathBuf,
    pub result: std::result::Result<Generation, chartgen_core::Error>,
}

impl FileReport {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Outcome of a whole run, in input order.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub files: Vec<FileReport>,
}

impl BatchReport {
    pub fn succeeded(&self) -> usize {
        self.files.iter().filter(|f| f.is_ok()).count()
    }

    pub fn failed(&self) -> usize {
        self.files.len() - self.succeeded()
    }

    pub fn print_summary(&self) {
        for file in &self.files {
            match &file.result {
                Ok(generation) => {
                    let mut line = format!(
                        "{} {} ({} added",
                        "OK".green(),
                        file.output.display(),
                        generation.added.len()
                    );
                    if !generation.replaced.is_empty() {
                        line.push_str(&format!(", {} replaced", generation.replaced.len()));
                    }
                    if !generation.skipped.is_empty() {
                        line.push_str(&format!(
                            ", {} skipped",
                            generation.skipped.len().yellow()
                        ));
                    }
                    if generation.double_kicks > 0 {
                        line.push_str(&format!(", {} double kicks", generation.double_kicks));
                    }
                    line.push(')');
                    println!("{line}");
                }
                Err(e) => println!("{} {}: {}", "FAILED".red(), file.input.display(), e),
            }
        }
        println!(
            "{} processed, {} failed",
            self.succeeded().green(),
            if self.failed() > 0 {
                self.failed().red().to_string()
            } else {
                self.failed().to_string()
            }
        );
    }
}

fn process_one(generator: &ChartGenerator, input: &Path, in_place: bool) -> FileReport {
    let output = output_path(input, in_place);
    let result = generator.process_file(input, &output);
    if let Err(e) = &result {
        error!("Failed to process {}: {}", input.display(), e);
    }
    FileReport {
        input: input.to_path_buf(),
        output,
        result,
    }
}

/// Process every file, continuing past failures.
///
/// With `jobs > 1` files are processed on a dedicated thread pool; the
/// report keeps input order either way.
pub fn run_batch(
    generator: &ChartGenerator,
    files: &[PathBuf],
    in_place: bool,
    jobs: usize,
) -> Result<BatchReport> {
    let files: Vec<FileReport> = if jobs > 1 {
        let pool = rayon::ThreadPoolBuilder::new().num_threads(jobs).build()?;
        pool.install(|| {
            files
                .par_iter()
                .map(|input| process_one(generator, input, in_place))
                .collect()
        })
    } else {
        files
            .iter()
            .map(|input| process_one(generator, input, in_place))
            .collect()
    };
    Ok(BatchReport { files })
}
