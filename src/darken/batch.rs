//! Level-major batch driver for the darkening transform.

use std::path::{Path, PathBuf};

use facetprep_common::paths::is_source_image;
use facetprep_common::{Error, Result};
use rayon::prelude::*;
use tracing::{debug, error, info, warn};
use walkdir::WalkDir;

use super::transform::{darken_file, EncodeOptions};
use super::DarknessLevel;

/// Resolve the levels to process.
///
/// An explicit level replaces the configured sequence entirely.
pub fn select_levels(explicit: Option<f32>, configured: &[f32]) -> Result<Vec<DarknessLevel>> {
    match explicit {
        Some(factor) => Ok(vec![DarknessLevel::new(factor)?]),
        None => {
            if configured.is_empty() {
                return Err(Error::invalid_input("no darkness levels configured"));
            }
            configured.iter().map(|&f| DarknessLevel::new(f)).collect()
        }
    }
}

/// List the source images directly inside `dir`, sorted by file name.
///
/// Subdirectories are not descended into and files without a `png`, `jpg` or
/// `jpeg` extension are skipped. Image entries that cannot be stat'ed (e.g.
/// dangling symlinks) are still listed and fail later as individual units.
pub fn collect_source_images(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(Error::invalid_input(format!(
            "source directory does not exist or is not a directory: {}",
            dir.display()
        )));
    }

    let mut images = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if e.depth() == 0 => return Err(std::io::Error::from(e).into()),
            Err(e) => {
                // A broken image entry stays in the list so it is reported as
                // a skipped unit at every level.
                match e.path() {
                    Some(path) if is_source_image(path) => {
                        warn!("Unreadable directory entry {}: {}", path.display(), e);
                        images.push(path.to_path_buf());
                    }
                    _ => debug!("Ignoring unreadable directory entry: {}", e),
                }
                continue;
            }
        };
        if entry.file_type().is_file() && is_source_image(entry.path()) {
            images.push(entry.into_path());
        }
    }

    Ok(images)
}

/// A fully resolved darkening run.
#[derive(Debug, Clone)]
pub struct DarkenJob {
    pub source_dir: PathBuf,
    pub output_dir: PathBuf,
    pub levels: Vec<DarknessLevel>,
    pub encode: EncodeOptions,
    /// Darken the files of a level on the rayon pool.
    pub parallel: bool,
}

/// One (level, file) unit of a dry run.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedOutput {
    pub level: DarknessLevel,
    pub source: PathBuf,
    pub destination: PathBuf,
}

impl DarkenJob {
    /// Directory receiving the outputs of `level`.
    pub fn level_dir(&self, level: DarknessLevel) -> PathBuf {
        self.output_dir.join(level.dir_name())
    }

    /// List every output the job would write, without touching the filesystem
    /// beyond listing the source directory.
    pub fn plan(&self) -> Result<Vec<PlannedOutput>> {
        let sources = collect_source_images(&self.source_dir)?;
        let mut planned = Vec::with_capacity(sources.len() * self.levels.len());
        for &level in &self.levels {
            let level_dir = self.level_dir(level);
            for source in &sources {
                let destination = destination_for(source, &level_dir)?;
                planned.push(PlannedOutput {
                    level,
                    source: source.clone(),
                    destination,
                });
            }
        }
        Ok(planned)
    }
}

/// A file that could not be darkened at some level.
#[derive(Debug)]
pub struct FileFailure {
    pub level: DarknessLevel,
    pub path: PathBuf,
    pub error: Error,
}

/// Outcome of [`run_batch`].
#[derive(Debug, Default)]
pub struct BatchSummary {
    /// Number of levels processed.
    pub levels: usize,
    /// (level, file) units written successfully.
    pub processed: usize,
    /// Units skipped, in level then file-name order.
    pub failures: Vec<FileFailure>,
}

impl BatchSummary {
    pub fn skipped(&self) -> usize {
        self.failures.len()
    }

    /// Whether every unit succeeded.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Darken every source image at every level of `job`.
///
/// Levels run one after another; within a level each file is independent and
/// a failing file is logged and recorded instead of aborting the run. Only a
/// source directory that cannot be listed or an output directory that cannot
/// be created is fatal.
pub fn run_batch(job: &DarkenJob) -> Result<BatchSummary> {
    let sources = collect_source_images(&job.source_dir)?;
    info!(
        "Found {} source images in {}",
        sources.len(),
        job.source_dir.display()
    );

    let mut summary = BatchSummary::default();

    for &level in &job.levels {
        let level_dir = job.level_dir(level);
        std::fs::create_dir_all(&level_dir)?;

        info!("--- Darkening at level {} -> {} ---", level, level_dir.display());

        let process = |source: &PathBuf| process_unit(source, &level_dir, level, &job.encode);
        let outcomes: Vec<Result<()>> = if job.parallel {
            sources.par_iter().map(process).collect()
        } else {
            sources.iter().map(process).collect()
        };

        for (source, outcome) in sources.iter().zip(outcomes) {
            match outcome {
                Ok(()) => summary.processed += 1,
                Err(error) => summary.failures.push(FileFailure {
                    level,
                    path: source.clone(),
                    error,
                }),
            }
        }
        summary.levels += 1;
    }

    Ok(summary)
}

fn process_unit(
    source: &Path,
    level_dir: &Path,
    level: DarknessLevel,
    options: &EncodeOptions,
) -> Result<()> {
    let result = destination_for(source, level_dir)
        .and_then(|destination| darken_file(source, &destination, level, options));

    match &result {
        Ok(()) => debug!("Darkened {} at level {}", source.display(), level),
        Err(e) if e.is_decode() => {
            warn!("Could not read image, skipping {}: {}", source.display(), e)
        }
        Err(e) => error!("Failed to darken {}: {}", source.display(), e),
    }

    result
}

fn destination_for(source: &Path, level_dir: &Path) -> Result<PathBuf> {
    let file_name = source.file_name().ok_or_else(|| {
        Error::invalid_input(format!("source has no file name: {}", source.display()))
    })?;
    Ok(level_dir.join(file_name))
}
