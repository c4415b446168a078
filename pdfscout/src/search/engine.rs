use ignore::WalkBuilder;
use rayon::prelude::*;
use std::num::NonZeroUsize;
use std::path::PathBuf;
use tracing::{debug, info, warn};

use super::processor::FileProcessor;
use super::scanner::Scanner;
use crate::config::ScanConfig;
use crate::errors::{SearchError, SearchResult};
use crate::filters::should_include_file;
use crate::results::ScanReport;

/// Sizes the global rayon pool. Must run before any parallel work starts.
pub fn configure_thread_pool(thread_count: NonZeroUsize) -> SearchResult<()> {
    rayon::ThreadPoolBuilder::new()
        .num_threads(thread_count.get())
        .thread_name(|i| format!("pdfscout-{}", i))
        .build_global()
        .map_err(|e| SearchError::thread_pool(e.to_string()))
}

/// Expands `paths` into the files to scan.
///
/// Files named explicitly are always kept. Directories are walked honoring
/// hidden-file and gitignore rules, then filtered by extension and ignore
/// globs. Paths that do not exist are returned separately.
fn collect_files(config: &ScanConfig, paths: &[PathBuf]) -> (Vec<PathBuf>, Vec<PathBuf>) {
    let mut files = Vec::new();
    let mut missing = Vec::new();

    for path in paths {
        if path.is_file() {
            files.push(path.clone());
        } else if path.is_dir() {
            let mut walker = WalkBuilder::new(path);
            walker
                .hidden(true)
                .ignore(true)
                .git_ignore(true)
                .git_global(true)
                .git_exclude(true);

            files.extend(
                walker
                    .build()
                    .filter_map(|entry| entry.ok())
                    .filter(|entry| entry.file_type().is_some_and(|ft| ft.is_file()))
                    .filter(|entry| {
                        should_include_file(
                            entry.path(),
                            &config.file_extensions,
                            &config.ignore_patterns,
                        )
                    })
                    .map(|entry| entry.into_path()),
            );
        } else {
            missing.push(path.clone());
        }
    }

    (files, missing)
}

/// Scans every file reachable from `paths` for the configured keyword
pub fn scan_paths(config: &ScanConfig, paths: &[PathBuf]) -> SearchResult<ScanReport> {
    info!(
        "Starting scan for {:?} across {} path(s)",
        config.keyword,
        paths.len()
    );

    let scanner = Scanner::new(config)?;
    let processor = FileProcessor::new(scanner).with_locate(config.locate);

    let (files, missing) = collect_files(config, paths);
    debug!("Found {} files to scan", files.len());

    let scanned = files
        .par_iter()
        .fold(ScanReport::new, |mut report, path| {
            match processor.process_file(path) {
                Ok(file_result) => report.add_file_result(file_result),
                Err(e) => {
                    warn!("Failed to scan {}: {}", path.display(), e);
                    report.add_failure(path.as_path(), e);
                }
            }
            report
        })
        .reduce(ScanReport::new, |mut left, right| {
            left.merge(right);
            left
        });

    let mut report = ScanReport::new();
    for path in missing {
        warn!("Skipping {}: not found", path.display());
        let err = SearchError::file_not_found(&path);
        report.add_failure(path, err);
    }
    report.merge(scanned);

    processor.metrics().log_stats();

    info!(
        "Scan complete. {} of {} files contain {:?}",
        report.encrypted_files, report.files_scanned, config.keyword
    );

    Ok(report)
}
