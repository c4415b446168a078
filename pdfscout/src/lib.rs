pub mod config;
pub mod errors;
pub mod filters;
pub mod metrics;
pub mod results;
pub mod search;

pub use crate::config::{ScanConfig, ScanStrategy, ENCRYPT_KEYWORD};
pub use errors::{SearchError, SearchResult};
pub use results::{FileResult, ScanReport};
pub use search::{BoundaryMode, PatternMatcher, Scanner};

use crate::search::chunker::{ChunkPlan, DEFAULT_OVERSUBSCRIPTION};
use std::num::NonZeroUsize;

/// Checks `buffer` for `/Encrypt` using every available core
pub fn scan_parallel(buffer: &[u8]) -> bool {
    let parallelism = NonZeroUsize::new(num_cpus::get()).unwrap_or(NonZeroUsize::MIN);
    let oversubscription =
        NonZeroUsize::new(DEFAULT_OVERSUBSCRIPTION).unwrap_or(NonZeroUsize::MIN);
    let plan = ChunkPlan::for_parallelism(buffer.len(), parallelism, oversubscription);
    search::scan_chunks(
        buffer,
        ENCRYPT_KEYWORD.as_bytes(),
        &plan,
        BoundaryMode::default(),
    )
}

/// Checks `buffer` for `/Encrypt` in a single pass on the calling thread
pub fn scan_simple(buffer: &[u8]) -> bool {
    search::contains_keyword(buffer, ENCRYPT_KEYWORD.as_bytes())
}

/// Returns true if a PDF's bytes carry an encryption dictionary reference
pub fn is_password_protected(bytes: &[u8]) -> bool {
    scan_parallel(bytes)
}
