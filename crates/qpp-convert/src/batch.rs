//! Batch conversion across a resolved file set.

use std::collections::HashMap;
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::time::Instant;

use rayon::ThreadPoolBuilder;
use rayon::prelude::*;
use tracing::{info, info_span, warn};

use crate::convert::Converter;
use crate::naming::qpp_output_path;
use crate::outcome::{ConversionError, FileReport, Outcome};
use crate::paths::{PathError, resolve_patterns};

#[derive(Debug, Clone, Copy, Default)]
pub struct BatchOptions {
    /// Worker threads; `None` uses the available parallelism.
    pub jobs: Option<NonZeroUsize>,
}

impl BatchOptions {
    pub fn with_jobs(mut self, jobs: Option<NonZeroUsize>) -> Self {
        self.jobs = jobs;
        self
    }

    fn threads(&self) -> usize {
        self.jobs
            .or_else(|| std::thread::available_parallelism().ok())
            .map_or(1, NonZeroUsize::get)
    }
}

#[derive(Debug, Default)]
pub struct BatchReport {
    pub resolution_errors: Vec<PathError>,
    /// One report per resolved file, sorted by input path.
    pub files: Vec<FileReport>,
}

impl BatchReport {
    fn count(&self, predicate: impl Fn(&Outcome) -> bool) -> usize {
        self.files
            .iter()
            .filter(|report| predicate(&report.outcome))
            .count()
    }

    pub fn converted(&self) -> usize {
        self.count(Outcome::is_converted)
    }

    pub fn rejected(&self) -> usize {
        self.count(|outcome| matches!(outcome, Outcome::Rejected { .. }))
    }

    pub fn skipped(&self) -> usize {
        self.count(|outcome| matches!(outcome, Outcome::Skipped))
    }

    pub fn failed(&self) -> usize {
        self.count(|outcome| matches!(outcome, Outcome::Failed(_)))
    }

    /// True when any file was rejected, failed or skipped.
    pub fn has_failures(&self) -> bool {
        self.converted() != self.files.len()
    }

    /// `0` when every resolved file converted, `1` otherwise (including an
    /// empty batch).
    pub fn exit_code(&self) -> i32 {
        if self.files.is_empty() || self.has_failures() {
            1
        } else {
            0
        }
    }
}

/// Resolve `patterns` and convert every file found.
pub fn run_batch<S: AsRef<str>>(
    patterns: &[S],
    converter: &Converter<'_>,
    options: BatchOptions,
) -> BatchReport {
    let resolution = resolve_patterns(patterns);
    let mut report = convert_files(resolution.files, converter, options);
    report.resolution_errors = resolution.errors;
    report
}

/// Convert an already resolved file set.
pub fn convert_files(
    files: Vec<PathBuf>,
    converter: &Converter<'_>,
    options: BatchOptions,
) -> BatchReport {
    if files.is_empty() {
        info!("no files to convert");
        return BatchReport::default();
    }

    let span = info_span!("batch", files = files.len(), jobs = options.threads());
    let _guard = span.enter();
    let start = Instant::now();

    let (runnable, mut reports) = claim_outputs(files, converter);
    let convert_all = || {
        runnable
            .par_iter()
            .map(|input| converter.convert(input))
            .collect::<Vec<_>>()
    };
    let converted = match ThreadPoolBuilder::new()
        .num_threads(options.threads())
        .build()
    {
        Ok(pool) => pool.install(convert_all),
        Err(error) => {
            warn!(%error, "could not build worker pool, using the global pool");
            convert_all()
        }
    };
    reports.extend(converted);
    reports.sort_by(|left, right| left.input.cmp(&right.input));

    let report = BatchReport {
        resolution_errors: Vec::new(),
        files: reports,
    };
    info!(
        converted = report.converted(),
        rejected = report.rejected(),
        skipped = report.skipped(),
        failed = report.failed(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "batch finished"
    );
    report
}

/// Assign each derived output to the first input (in sorted order) that
/// produces it. Later inputs fail before any task runs.
fn claim_outputs(
    mut files: Vec<PathBuf>,
    converter: &Converter<'_>,
) -> (Vec<PathBuf>, Vec<FileReport>) {
    files.sort();
    let output_dir = &converter.config().output_dir;
    let mut owners: HashMap<PathBuf, PathBuf> = HashMap::new();
    let mut runnable = Vec::new();
    let mut collisions = Vec::new();

    for input in files {
        let output = qpp_output_path(&input, output_dir);
        match owners.get(&output) {
            Some(owner) => {
                warn!(
                    input = %input.display(),
                    other = %owner.display(),
                    "output name collision"
                );
                let failure = ConversionError::OutputCollision {
                    output,
                    other: owner.clone(),
                };
                collisions.push(FileReport {
                    input,
                    outcome: Outcome::Failed(failure),
                });
            }
            None => {
                owners.insert(output, input.clone());
                runnable.push(input);
            }
        }
    }
    (runnable, collisions)
}
