use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use std::ops::Range;

/// Chunks per worker thread. A little oversubscription keeps every thread busy
/// when some chunks finish early.
pub const DEFAULT_OVERSUBSCRIPTION: usize = 2;

/// How a chunk's search window relates to the chunk itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoundaryMode {
    /// Each chunk is searched strictly inside its own range. A keyword that
    /// straddles two chunks is not seen by either of them.
    Disjoint,
    /// Each chunk's window extends `keyword_len - 1` bytes into the next chunk,
    /// so every occurrence lies entirely inside at least one window.
    #[default]
    Overlap,
}

/// Nominal chunk size for a buffer of `len` bytes.
///
/// `len / (parallelism * oversubscription)`, never less than one byte.
pub fn chunk_size(len: usize, parallelism: NonZeroUsize, oversubscription: NonZeroUsize) -> usize {
    let target = parallelism.get().saturating_mul(oversubscription.get());
    (len / target).max(1)
}

/// Partition of `[0, len)` into contiguous, non-overlapping chunks.
///
/// All chunks are `chunk_size` bytes long except possibly the last one, which
/// ends at `len`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkPlan {
    buffer_len: usize,
    chunk_size: usize,
}

impl ChunkPlan {
    /// Creates a plan with an explicit chunk size (clamped to at least one byte)
    pub fn new(buffer_len: usize, chunk_size: usize) -> Self {
        Self {
            buffer_len,
            chunk_size: chunk_size.max(1),
        }
    }

    /// Creates a plan sized for `parallelism` workers
    pub fn for_parallelism(
        buffer_len: usize,
        parallelism: NonZeroUsize,
        oversubscription: NonZeroUsize,
    ) -> Self {
        Self::new(
            buffer_len,
            chunk_size(buffer_len, parallelism, oversubscription),
        )
    }

    pub fn buffer_len(&self) -> usize {
        self.buffer_len
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Number of chunks; zero for an empty buffer
    pub fn len(&self) -> usize {
        self.buffer_len.div_ceil(self.chunk_size)
    }

    pub fn is_empty(&self) -> bool {
        self.buffer_len == 0
    }

    /// The `index`-th chunk. `index` must be less than [`len`](Self::len).
    pub fn chunk(&self, index: usize) -> Range<usize> {
        let start = index * self.chunk_size;
        start..(start + self.chunk_size).min(self.buffer_len)
    }

    /// Iterates over all chunks in buffer order
    pub fn ranges(&self) -> impl Iterator<Item = Range<usize>> + '_ {
        (0..self.len()).map(move |index| self.chunk(index))
    }

    /// The byte range actually searched for the `index`-th chunk
    pub fn search_window(&self, index: usize, keyword_len: usize, mode: BoundaryMode) -> Range<usize> {
        let chunk = self.chunk(index);
        match mode {
            BoundaryMode::Disjoint => chunk,
            BoundaryMode::Overlap => {
                let end = chunk
                    .end
                    .saturating_add(keyword_len.saturating_sub(1))
                    .min(self.buffer_len);
                chunk.start..end
            }
        }
    }
}
