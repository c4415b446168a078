use memmap2::Mmap;
use std::fs::File;
use std::path::Path;
use tracing::{trace, warn};

use super::scanner::Scanner;
use crate::errors::{SearchError, SearchResult};
use crate::metrics::ScanMetrics;
use crate::results::FileResult;

pub(crate) const LARGE_FILE_THRESHOLD: u64 = 10 * 1024 * 1024; // 10MB

/// Loads files and hands their bytes to a [`Scanner`]
#[derive(Debug, Clone)]
pub struct FileProcessor {
    scanner: Scanner,
    locate: bool,
}

impl FileProcessor {
    pub fn new(scanner: Scanner) -> Self {
        Self {
            scanner,
            locate: false,
        }
    }

    /// Also report the offset of the first occurrence for matching files
    pub fn with_locate(mut self, locate: bool) -> Self {
        self.locate = locate;
        self
    }

    pub fn scanner(&self) -> &Scanner {
        &self.scanner
    }

    pub fn metrics(&self) -> &ScanMetrics {
        self.scanner.metrics()
    }

    fn scan_bytes(&self, path: &Path, bytes: &[u8]) -> FileResult {
        let encrypted = self.scanner.scan(bytes);
        let offset = if encrypted && self.locate {
            self.scanner.find(bytes)
        } else {
            None
        };
        FileResult {
            path: path.to_path_buf(),
            size: bytes.len() as u64,
            encrypted,
            offset,
        }
    }

    /// Reads the whole file into memory
    fn process_buffered(&self, path: &Path) -> SearchResult<FileResult> {
        trace!("Reading file into memory: {}", path.display());
        let bytes = std::fs::read(path).map_err(|e| SearchError::from_io(path, e))?;
        self.metrics().record_buffered_file();
        Ok(self.scan_bytes(path, &bytes))
    }

    /// Process a file using memory mapping
    fn process_mmap(&self, path: &Path) -> SearchResult<FileResult> {
        trace!("Memory mapping file: {}", path.display());
        let file = File::open(path).map_err(|e| SearchError::from_io(path, e))?;

        // SAFETY: the map is read-only and dropped before this call returns.
        // Truncation by another process while mapped is outside our control.
        let mmap = unsafe { Mmap::map(&file) }.map_err(SearchError::IoError)?;
        self.metrics().record_mmap(mmap.len() as u64);

        Ok(self.scan_bytes(path, &mmap))
    }

    /// Scans a file, choosing how to load it from its size
    pub fn process_file(&self, path: &Path) -> SearchResult<FileResult> {
        trace!("Processing file: {}", path.display());

        match path.metadata() {
            Ok(metadata) if metadata.len() >= LARGE_FILE_THRESHOLD => self.process_mmap(path),
            Ok(_) => self.process_buffered(path),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(SearchError::file_not_found(path))
            }
            Err(e) => {
                warn!("Failed to get metadata for {}: {}", path.display(), e);
                self.process_buffered(path)
            }
        }
    }
}
