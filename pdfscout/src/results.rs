//! Result types for file-level scans.
//!
//! The scanning core answers one question per buffer: does the keyword occur?
//! These types carry that answer back out of the file layer together with
//! enough context (path, size, first offset) for a report.

use serde::Serialize;
use std::path::PathBuf;

/// Outcome of scanning a single file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileResult {
    /// The path to the file
    pub path: PathBuf,
    /// File size in bytes
    pub size: u64,
    /// Whether the keyword was found
    pub encrypted: bool,
    /// Byte offset of the first occurrence, when it was asked for
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<usize>,
}

/// A file that could not be scanned
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanFailure {
    pub path: PathBuf,
    pub error: String,
}

/// Aggregated results of a batch scan
#[derive(Debug, Clone, Default, Serialize)]
pub struct ScanReport {
    /// Results per file, in the order they were added
    pub file_results: Vec<FileResult>,
    /// Files that could not be read
    pub failures: Vec<ScanFailure>,
    /// Total number of files scanned successfully
    pub files_scanned: usize,
    /// Number of files in which the keyword was found
    pub encrypted_files: usize,
    /// Total bytes scanned
    pub bytes_scanned: u64,
}

impl ScanReport {
    pub fn new() -> Self {
        Default::default()
    }

    /// Adds a file result and updates the totals
    pub fn add_file_result(&mut self, file_result: FileResult) {
        self.files_scanned += 1;
        self.bytes_scanned += file_result.size;
        if file_result.encrypted {
            self.encrypted_files += 1;
        }
        self.file_results.push(file_result);
    }

    pub fn add_failure(&mut self, path: impl Into<PathBuf>, error: impl ToString) {
        self.failures.push(ScanFailure {
            path: path.into(),
            error: error.to_string(),
        });
    }

    /// Merges another report into this one
    pub fn merge(&mut self, other: ScanReport) {
        self.files_scanned += other.files_scanned;
        self.encrypted_files += other.encrypted_files;
        self.bytes_scanned += other.bytes_scanned;
        self.file_results.extend(other.file_results);
        self.failures.extend(other.failures);
    }

    /// Iterates over the files in which the keyword was found
    pub fn encrypted(&self) -> impl Iterator<Item = &FileResult> {
        self.file_results.iter().filter(|r| r.encrypted)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
