use config::{Config as ConfigBuilder, ConfigError, File};
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use crate::search::chunker::{BoundaryMode, DEFAULT_OVERSUBSCRIPTION};

/// Marker whose presence means a PDF has an encryption dictionary
pub const ENCRYPT_KEYWORD: &str = "/Encrypt";

/// Buffers smaller than this are scanned on the calling thread by
/// [`ScanStrategy::Auto`]
pub const DEFAULT_PARALLEL_THRESHOLD: u64 = 32 * 1024; // 32KB

/// Which scan path to use for a buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanStrategy {
    /// Simple below `parallel_threshold`, parallel at or above it
    #[default]
    Auto,
    /// Always partition and fan out
    Parallel,
    /// Always a single pass on the calling thread
    Simple,
}

/// Configuration for a scan.
///
/// # Configuration Locations
///
/// Loaded from, in increasing order of precedence:
/// 1. Global `$CONFIG_DIR/pdfscout/config.yaml`
/// 2. Local `.pdfscout.yaml` in the current directory
/// 3. A file passed explicitly (for the CLI, `--config`)
///
/// # Configuration Format
///
/// ```yaml
/// # Byte sequence to look for
/// keyword: "/Encrypt"
///
/// # Worker threads (default: CPU cores)
/// thread_count: 8
///
/// # Chunks per worker thread
/// oversubscription: 2
///
/// # disjoint | overlap
/// boundary_mode: overlap
///
/// # auto | parallel | simple
/// strategy: auto
///
/// # Buffers below this many bytes are scanned without fan-out (auto only)
/// parallel_threshold: 32768
///
/// # Only files with these extensions are picked up when walking directories
/// file_extensions: ["pdf"]
///
/// # Glob patterns to skip
/// ignore_patterns: ["archive/**"]
///
/// # Report where the keyword first occurs
/// locate: false
///
/// log_level: "warn"
/// ```
///
/// Command-line flags win over every file; see [`ScanConfig::merge_with_cli`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Byte sequence whose presence is reported
    #[serde(default = "default_keyword")]
    pub keyword: String,

    /// Number of worker threads; also the parallelism hint for chunking
    #[serde(default = "default_thread_count")]
    pub thread_count: NonZeroUsize,

    /// Chunks per worker thread
    #[serde(default = "default_oversubscription")]
    pub oversubscription: NonZeroUsize,

    #[serde(default)]
    pub boundary_mode: BoundaryMode,

    #[serde(default)]
    pub strategy: ScanStrategy,

    #[serde(default = "default_parallel_threshold")]
    pub parallel_threshold: u64,

    /// Extensions picked up when a directory is walked. `None` accepts every file.
    #[serde(default = "default_file_extensions")]
    pub file_extensions: Option<Vec<String>>,

    /// Glob patterns for paths to skip
    #[serde(default)]
    pub ignore_patterns: Vec<String>,

    /// Report the offset of the first occurrence in matching files
    #[serde(default)]
    pub locate: bool,

    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_keyword() -> String {
    ENCRYPT_KEYWORD.to_string()
}

fn default_thread_count() -> NonZeroUsize {
    NonZeroUsize::new(num_cpus::get()).unwrap_or(NonZeroUsize::MIN)
}

fn default_oversubscription() -> NonZeroUsize {
    NonZeroUsize::new(DEFAULT_OVERSUBSCRIPTION).unwrap_or(NonZeroUsize::MIN)
}

fn default_parallel_threshold() -> u64 {
    DEFAULT_PARALLEL_THRESHOLD
}

fn default_file_extensions() -> Option<Vec<String>> {
    Some(vec!["pdf".to_string()])
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            keyword: default_keyword(),
            thread_count: default_thread_count(),
            oversubscription: default_oversubscription(),
            boundary_mode: BoundaryMode::default(),
            strategy: ScanStrategy::default(),
            parallel_threshold: default_parallel_threshold(),
            file_extensions: default_file_extensions(),
            ignore_patterns: Vec::new(),
            locate: false,
            log_level: default_log_level(),
        }
    }
}

/// Values given on the command line. `None` leaves the file value alone.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub keyword: Option<String>,
    pub thread_count: Option<NonZeroUsize>,
    pub boundary_mode: Option<BoundaryMode>,
    pub strategy: Option<ScanStrategy>,
    pub file_extensions: Option<Vec<String>>,
    pub ignore_patterns: Vec<String>,
    pub locate: bool,
    pub log_level: Option<String>,
}

impl ScanConfig {
    /// Loads configuration from the default locations plus `config_path`,
    /// which must exist when given
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder();

        let defaults = [
            dirs::config_dir().map(|p| p.join("pdfscout/config.yaml")),
            Some(PathBuf::from(".pdfscout.yaml")),
        ];
        for path in defaults.iter().flatten() {
            if path.exists() {
                builder = builder.add_source(File::from(path.as_path()));
            }
        }

        if let Some(path) = config_path {
            builder = builder.add_source(File::from(path).required(true));
        }

        builder.build()?.try_deserialize()
    }

    /// Applies command-line values on top of file values
    pub fn merge_with_cli(mut self, cli: CliOverrides) -> Self {
        if let Some(keyword) = cli.keyword {
            self.keyword = keyword;
        }
        if let Some(thread_count) = cli.thread_count {
            self.thread_count = thread_count;
        }
        if let Some(mode) = cli.boundary_mode {
            self.boundary_mode = mode;
        }
        if let Some(strategy) = cli.strategy {
            self.strategy = strategy;
        }
        if cli.file_extensions.is_some() {
            self.file_extensions = cli.file_extensions;
        }
        if !cli.ignore_patterns.is_empty() {
            self.ignore_patterns = cli.ignore_patterns;
        }
        if cli.locate {
            self.locate = true;
        }
        if let Some(level) = cli.log_level {
            self.log_level = level;
        }
        self
    }
}
