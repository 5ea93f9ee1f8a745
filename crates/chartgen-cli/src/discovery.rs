//! Finding the chart files to process.

use std::path::{Path, PathBuf};

use anyhow::{Result, bail};
use chartgen_core::generator::CHART_EXTENSION;
use chartgen_core::is_generated_chart;
use tracing::warn;
use walkdir::WalkDir;

fn is_chart(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(CHART_EXTENSION))
}

/// Collect input charts.
///
/// With `batch`, `path` is searched recursively and previously generated
/// `_easy.chart` files are left out. Otherwise `path` must be a file.
pub fn find_charts(path: &Path, batch: bool) -> Result<Vec<PathBuf>> {
    let candidates = if batch {
        if !path.is_dir() {
            bail!("{} is not a directory", path.display());
        }
        let mut found = Vec::new();
        for entry in WalkDir::new(path).follow_links(true) {
            let entry = entry?;
            if entry.file_type().is_file() && !is_generated_chart(entry.path()) {
                found.push(entry.into_path());
            }
        }
        found.sort();
        found
    } else {
        if path.is_dir() {
            bail!("{} is a directory, use --batch", path.display());
        }
        if !path.exists() {
            bail!("{} does not exist", path.display());
        }
        vec![path.to_path_buf()]
    };

    if candidates.is_empty() {
        bail!("No files found in {}", path.display());
    }

    let charts: Vec<PathBuf> = candidates
        .into_iter()
        .filter(|p| {
            let keep = is_chart(p);
            if !keep && !batch {
                warn!("Skipping non-chart file {}", p.display());
            }
            keep
        })
        .collect();

    if charts.is_empty() {
        bail!("No .chart files found in {}", path.display());
    }
    Ok(charts)
}
