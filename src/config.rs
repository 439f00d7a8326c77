/*!
 * Configuration handling for ctxdump
 */

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use clap::Parser;
use clap_complete::Shell;

use crate::ensure;
use crate::error::Result;
use crate::types::{ReadMode, ReadOptions};
use crate::utils::{
    DEFAULT_COMPOUND_SUFFIXES, DEFAULT_CONTENT_SUFFIXES, DEFAULT_IGNORE_DIRS,
    DEFAULT_IGNORE_PATTERNS, DEFAULT_LANGUAGES, DEFAULT_LISTING_ONLY_SUFFIXES,
    DEFAULT_RELEVANT_EXTENSIONS,
};

/// Default name of the output document
pub const DEFAULT_OUTPUT_FILE: &str = "context_output.txt";

/// Command-line arguments for ctxdump
#[derive(Parser, Debug, Clone)]
#[clap(
    name = "ctxdump",
    version = env!("CARGO_PKG_VERSION"),
    about = "Concatenate a directory tree and relevant file contents for LLM context",
    long_about = "Walks a directory, lists relevant files as a text tree and appends the contents of source and config files as fenced blocks into a single text document."
)]
pub struct Args {
    /// Root directory to process
    #[clap(default_value = ".")]
    pub directory_path: String,

    /// Output file name
    #[clap(default_value = DEFAULT_OUTPUT_FILE)]
    pub output_file: String,

    /// Comma-separated directory names to skip, in addition to the defaults
    #[clap(long, value_delimiter = ',')]
    pub ignore_dirs: Vec<String>,

    /// Comma-separated file name substrings to skip, in addition to the defaults
    #[clap(long, value_delimiter = ',')]
    pub ignore_patterns: Vec<String>,

    /// Only include the first N lines of each file
    #[clap(long, value_name = "N")]
    pub max_lines: Option<usize>,

    /// Report invalid UTF-8 as a read error instead of replacing it
    #[clap(long)]
    pub strict_utf8: bool,

    /// Do not print the summary report
    #[clap(long, short)]
    pub quiet: bool,

    /// Generate shell completions
    #[clap(long = "generate", value_enum)]
    pub generate: Option<Shell>,
}

/// Rule pruning `key=value` date partitions of large datasets
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PartitionRule {
    /// Prefix of the partition directory name
    pub marker_prefix: String,
    /// Parent name prefixes that qualify
    pub parent_prefixes: Vec<String>,
    /// Parent names that qualify exactly
    pub parent_names: Vec<String>,
}

impl Default for PartitionRule {
    fn default() -> Self {
        Self {
            marker_prefix: "d=".to_string(),
            parent_prefixes: vec!["bars_".to_string()],
            parent_names: vec!["btc_parquet_clean".to_string()],
        }
    }
}

impl PartitionRule {
    /// Whether `path` is a partition directory under a qualifying parent
    pub fn matches(&self, path: &Path) -> bool {
        let name = match path.file_name() {
            Some(name) => name.to_string_lossy(),
            None => return false,
        };
        if !name.starts_with(&self.marker_prefix) {
            return false;
        }

        let parent = path
            .parent()
            .and_then(Path::file_name)
            .map(|p| p.to_string_lossy().to_string())
            .unwrap_or_default();

        self.parent_prefixes.iter().any(|p| parent.starts_with(p.as_str()))
            || self.parent_names.iter().any(|n| *n == parent)
    }
}

/// Application configuration, built once and shared by reference
#[derive(Clone, Debug)]
pub struct Config {
    /// Root directory to process
    pub target_dir: PathBuf,

    /// Output file path
    pub output_file: PathBuf,

    /// Name under which the tool never lists itself
    pub tool_name: String,

    /// Directory names that are pruned
    pub ignore_dirs: BTreeSet<String>,

    /// Substrings that disqualify a file name
    pub ignore_patterns: Vec<String>,

    /// Extensions that make a file relevant
    pub relevant_extensions: BTreeSet<String>,

    /// Multi-part suffixes that make a file relevant
    pub compound_suffixes: Vec<String>,

    /// Suffixes that are listed but never dumped
    pub listing_only_suffixes: Vec<String>,

    /// Suffixes whose content is dumped
    pub content_suffixes: Vec<String>,

    /// Extension to language tag
    pub languages: BTreeMap<String, String>,

    /// Date-partition pruning rule
    pub partition: PartitionRule,

    /// Options for reading file contents
    pub read: ReadOptions,
}

impl Default for Config {
    fn default() -> Self {
        fn owned(items: &[&str]) -> Vec<String> {
            items.iter().map(|s| s.to_string()).collect()
        }

        Self {
            target_dir: PathBuf::from("."),
            output_file: PathBuf::from(DEFAULT_OUTPUT_FILE),
            tool_name: env!("CARGO_PKG_NAME").to_string(),
            ignore_dirs: owned(&DEFAULT_IGNORE_DIRS).into_iter().collect(),
            ignore_patterns: owned(&DEFAULT_IGNORE_PATTERNS),
            relevant_extensions: owned(&DEFAULT_RELEVANT_EXTENSIONS).into_iter().collect(),
            compound_suffixes: owned(&DEFAULT_COMPOUND_SUFFIXES),
            listing_only_suffixes: owned(&DEFAULT_LISTING_ONLY_SUFFIXES),
            content_suffixes: owned(&DEFAULT_CONTENT_SUFFIXES),
            languages: DEFAULT_LANGUAGES
                .iter()
                .map(|(ext, tag)| (ext.to_string(), tag.to_string()))
                .collect(),
            partition: PartitionRule::default(),
            read: ReadOptions::default(),
        }
    }
}

impl Config {
    /// Create configuration from command-line arguments
    pub fn from_args(args: Args) -> Self {
        let mut config = Self {
            target_dir: PathBuf::from(args.directory_path),
            output_file: PathBuf::from(args.output_file),
            ..Self::default()
        };

        config.ignore_dirs.extend(args.ignore_dirs);
        config.ignore_patterns.extend(args.ignore_patterns);
        config.read = ReadOptions {
            mode: args.max_lines.map_or(ReadMode::Full, ReadMode::Head),
            lossy: !args.strict_utf8,
        };

        config
    }

    /// File name of the output document, used to keep it out of the listing
    pub fn output_name(&self) -> String {
        self.output_file
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.target_dir.is_dir(),
            Config,
            "Target directory not found: {}",
            self.target_dir.display()
        );

        ensure!(
            !self.output_name().is_empty(),
            InvalidArgument,
            "Output path has no file name: {}",
            self.output_file.display()
        );

        if let Some(parent) = self.output_file.parent() {
            ensure!(
                parent.as_os_str().is_empty() || parent.is_dir(),
                Config,
                "Output directory not found: {}",
                parent.display()
            );
        }

        ensure!(
            self.read.mode != ReadMode::Head(0),
            InvalidArgument,
            "--max-lines must be greater than zero"
        );

        Ok(())
    }
}
