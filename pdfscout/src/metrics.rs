use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, info};

/// Counters for scan activity, shared across worker threads
#[derive(Debug, Clone)]
pub struct ScanMetrics {
    // Scan metrics
    simple_scans: Arc<AtomicU64>,
    parallel_scans: Arc<AtomicU64>,
    chunks_dispatched: Arc<AtomicU64>,
    bytes_scanned: Arc<AtomicU64>,
    matches: Arc<AtomicU64>,

    // File loading metrics
    buffered_files: Arc<AtomicU64>,
    mmap_files: Arc<AtomicU64>,
    mmap_bytes: Arc<AtomicU64>,
}

impl ScanMetrics {
    pub fn new() -> Self {
        Self {
            simple_scans: Arc::new(AtomicU64::new(0)),
            parallel_scans: Arc::new(AtomicU64::new(0)),
            chunks_dispatched: Arc::new(AtomicU64::new(0)),
            bytes_scanned: Arc::new(AtomicU64::new(0)),
            matches: Arc::new(AtomicU64::new(0)),
            buffered_files: Arc::new(AtomicU64::new(0)),
            mmap_files: Arc::new(AtomicU64::new(0)),
            mmap_bytes: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Records a single-pass scan over `bytes` bytes
    pub fn record_simple_scan(&self, bytes: u64, found: bool) {
        self.simple_scans.fetch_add(1, Ordering::Relaxed);
        self.record_scan(bytes, found);
    }

    /// Records a chunked scan over `bytes` bytes split into `chunks` chunks
    pub fn record_parallel_scan(&self, bytes: u64, chunks: u64, found: bool) {
        self.parallel_scans.fetch_add(1, Ordering::Relaxed);
        self.chunks_dispatched.fetch_add(chunks, Ordering::Relaxed);
        self.record_scan(bytes, found);
    }

    fn record_scan(&self, bytes: u64, found: bool) {
        let total = self.bytes_scanned.fetch_add(bytes, Ordering::Relaxed) + bytes;
        if found {
            self.matches.fetch_add(1, Ordering::Relaxed);
        }
        debug!("Scanned {} bytes (found: {}), total: {} bytes", bytes, found, total);
    }

    /// Records a file read fully into memory
    pub fn record_buffered_file(&self) {
        self.buffered_files.fetch_add(1, Ordering::Relaxed);
    }

    /// Records a memory-mapped file
    pub fn record_mmap(&self, bytes: u64) {
        self.mmap_files.fetch_add(1, Ordering::Relaxed);
        let total = self.mmap_bytes.fetch_add(bytes, Ordering::Relaxed) + bytes;
        debug!(
            "Memory mapped: {} bytes, total mapped: {} bytes",
            bytes, total
        );
    }

    /// Gets a snapshot of the counters
    pub fn get_stats(&self) -> ScanStats {
        ScanStats {
            simple_scans: self.simple_scans.load(Ordering::Relaxed),
            parallel_scans: self.parallel_scans.load(Ordering::Relaxed),
            chunks_dispatched: self.chunks_dispatched.load(Ordering::Relaxed),
            bytes_scanned: self.bytes_scanned.load(Ordering::Relaxed),
            matches: self.matches.load(Ordering::Relaxed),
            buffered_files: self.buffered_files.load(Ordering::Relaxed),
            mmap_files: self.mmap_files.load(Ordering::Relaxed),
            mmap_bytes: self.mmap_bytes.load(Ordering::Relaxed),
        }
    }

    /// Logs the current counters
    pub fn log_stats(&self) {
        let stats = self.get_stats();
        info!(
            "Scan stats:\n\
             Scans (simple/parallel): {}/{}\n\
             Chunks dispatched: {}\n\
             Bytes scanned: {}\n\
             Matches: {}\n\
             Files loaded (buffered/mmap): {}/{}\n\
             Memory mapped: {} bytes",
            stats.simple_scans,
            stats.parallel_scans,
            stats.chunks_dispatched,
            stats.bytes_scanned,
            stats.matches,
            stats.buffered_files,
            stats.mmap_files,
            stats.mmap_bytes
        );
    }
}

impl Default for ScanMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Point-in-time copy of [`ScanMetrics`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanStats {
    pub simple_scans: u64,
    pub parallel_scans: u64,
    pub chunks_dispatched: u64,
    pub bytes_scanned: u64,
    pub matches: u64,
    pub buffered_files: u64,
    pub mmap_files: u64,
    pub mmap_bytes: u64,
}
