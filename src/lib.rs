/*!
 * ctxdump - Concatenate a directory tree and file contents for LLM context
 *
 * This library writes a single text document made of a tree listing of the
 * relevant files under a root directory, followed by fenced blocks holding
 * the contents of source and config files.
 */

pub mod config;
pub mod error;
pub mod filter;
pub mod language;
pub mod renderer;
pub mod report;
pub mod scanner;
pub mod types;
pub mod utils;
pub mod writer;


// Re-export main components for easier access
pub use config::{Config, PartitionRule};
pub use error::{ContextError, Result};
pub use filter::RelevanceFilter;
pub use language::language_tag;
pub use renderer::{read_file_content, Renderer};
pub use report::{FileReportInfo, Reporter, ScanReport};
pub use scanner::{ScanOutcome, Scanner};
pub use types::{
    ContentBlock, EntryKind, FileSystemEntry, Inclusion, ReadMode, ReadOptions, RelevantPath,
};
pub use utils::format_file_size;
pub use writer::{ContextWriter, RunSummary};

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Validate `config` and write its context document
pub fn run(config: &Config) -> Result<RunSummary> {
    config.validate()?;
    ContextWriter::new(config).run()
}
