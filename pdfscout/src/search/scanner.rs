use rayon::prelude::*;
use std::num::NonZeroUsize;
use tracing::{debug, trace};

use super::chunker::{BoundaryMode, ChunkPlan};
use super::matcher::{contains_keyword, PatternMatcher};
use crate::config::{ScanConfig, ScanStrategy};
use crate::errors::SearchResult;
use crate::metrics::ScanMetrics;

/// Searches `buffer` for `keyword` by fanning out one task per chunk of `plan`.
///
/// Returns as soon as any chunk reports a match. Chunks still running are
/// left to finish their current comparison; no chunk is abandoned mid-slice
/// and the call does not return `false` until every chunk has been searched.
///
/// A plan laid out for a different length is re-laid over the whole of
/// `buffer` with the same chunk size.
pub fn scan_chunks(buffer: &[u8], keyword: &[u8], plan: &ChunkPlan, mode: BoundaryMode) -> bool {
    if keyword.is_empty() {
        return true;
    }

    let resized;
    let plan = if plan.buffer_len() == buffer.len() {
        plan
    } else {
        debug!(
            "Plan covers {} bytes but buffer has {}, re-laying chunks",
            plan.buffer_len(),
            buffer.len()
        );
        resized = ChunkPlan::new(buffer.len(), plan.chunk_size());
        &resized
    };

    (0..plan.len())
        .into_par_iter()
        .with_max_len(1)
        .any(|index| {
            let window = plan.search_window(index, keyword.len(), mode);
            contains_keyword(&buffer[window], keyword)
        })
}

/// Keyword scanner configured from a [`ScanConfig`].
///
/// Work runs on the current rayon pool; `thread_count` is the parallelism
/// hint used to size chunks.
#[derive(Debug, Clone)]
pub struct Scanner {
    matcher: PatternMatcher,
    parallelism: NonZeroUsize,
    oversubscription: NonZeroUsize,
    boundary_mode: BoundaryMode,
    strategy: ScanStrategy,
    parallel_threshold: u64,
    metrics: ScanMetrics,
}

impl Scanner {
    /// Creates a scanner. Fails if the configured keyword is empty.
    pub fn new(config: &ScanConfig) -> SearchResult<Self> {
        Self::with_metrics(config, ScanMetrics::new())
    }

    /// Creates a scanner that reports into `metrics`
    pub fn with_metrics(config: &ScanConfig, metrics: ScanMetrics) -> SearchResult<Self> {
        let matcher = PatternMatcher::new(config.keyword.as_bytes())?;
        Ok(Self {
            matcher,
            parallelism: config.thread_count,
            oversubscription: config.oversubscription,
            boundary_mode: config.boundary_mode,
            strategy: config.strategy,
            parallel_threshold: config.parallel_threshold,
            metrics,
        })
    }

    pub fn matcher(&self) -> &PatternMatcher {
        &self.matcher
    }

    pub fn metrics(&self) -> &ScanMetrics {
        &self.metrics
    }

    pub fn boundary_mode(&self) -> BoundaryMode {
        self.boundary_mode
    }

    /// Chunk layout used for a buffer of `len` bytes
    pub fn plan(&self, len: usize) -> ChunkPlan {
        ChunkPlan::for_parallelism(len, self.parallelism, self.oversubscription)
    }

    /// Scans with the configured [`ScanStrategy`]
    pub fn scan(&self, buffer: &[u8]) -> bool {
        match self.strategy {
            ScanStrategy::Simple => self.scan_simple(buffer),
            ScanStrategy::Parallel => self.scan_parallel(buffer),
            ScanStrategy::Auto => {
                if (buffer.len() as u64) < self.parallel_threshold {
                    trace!(
                        "Buffer of {} bytes below parallel threshold {}",
                        buffer.len(),
                        self.parallel_threshold
                    );
                    self.scan_simple(buffer)
                } else {
                    self.scan_parallel(buffer)
                }
            }
        }
    }

    /// Single pass over the whole buffer on the calling thread
    pub fn scan_simple(&self, buffer: &[u8]) -> bool {
        let found = self.matcher.is_match(buffer);
        self.metrics.record_simple_scan(buffer.len() as u64, found);
        found
    }

    /// Partitioned scan across the rayon pool
    pub fn scan_parallel(&self, buffer: &[u8]) -> bool {
        let plan = self.plan(buffer.len());
        debug!(
            "Scanning {} bytes in {} chunks of {} bytes ({:?})",
            buffer.len(),
            plan.len(),
            plan.chunk_size(),
            self.boundary_mode
        );

        let found = scan_chunks(buffer, self.matcher.keyword(), &plan, self.boundary_mode);
        self.metrics
            .record_parallel_scan(buffer.len() as u64, plan.len() as u64, found);
        found
    }

    /// Offset of the first occurrence in `buffer`, from a single pass
    pub fn find(&self, buffer: &[u8]) -> Option<usize> {
        self.matcher.find(buffer)
    }
}
