//! Keyword search over raw document bytes.
//!
//! # Layers
//!
//! 1. **Matcher** ([`matcher`]): exact single-keyword search using the
//!    bad-character rule. On a mismatch the cursor jumps ahead by a per-byte
//!    shift taken from a 256-entry table, so on typical input most bytes are
//!    never compared at all.
//!
//! 2. **Chunker** ([`chunker`]): splits `[0, len)` into contiguous chunks,
//!    `parallelism * oversubscription` of them, each at least one byte.
//!
//! 3. **Scanner** ([`scanner`]): runs one matcher invocation per chunk on the
//!    rayon pool and ORs the answers together. The reduction stops at the
//!    first `true`; a `false` is only returned once every chunk has finished.
//!
//! 4. **Processor and engine** ([`processor`], [`engine`]): load files
//!    (memory-mapping large ones) and fan out over many files.
//!
//! ```rust,ignore
//! let scanner = Scanner::new(&ScanConfig::default())?;
//! if scanner.scan(&bytes) {
//!     println!("password protected");
//! }
//! ```
//!
//! # Chunk boundaries
//!
//! With [`BoundaryMode::Disjoint`] every chunk is searched strictly inside its
//! own range, so an occurrence that starts in one chunk and ends in the next
//! is missed by the parallel path while the single-pass path still finds it.
//! [`BoundaryMode::Overlap`] (the default) lets each chunk's search window run
//! `keyword_len - 1` bytes past its end, which closes that gap without
//! changing the partition itself.

pub mod chunker;
pub mod engine;
pub mod matcher;
pub mod processor;
pub mod scanner;

pub use chunker::{BoundaryMode, ChunkPlan};
pub use engine::{configure_thread_pool, scan_paths};
pub use matcher::{contains_keyword, PatternMatcher, SkipTable};
pub use processor::FileProcessor;
pub use scanner::{scan_chunks, Scanner};
