/*!
 * Output document writer and run orchestration
 */

use std::fs::File;
use std::io::{BufWriter, Write};
use std::time::{Duration, Instant};

use tracing::info;

use crate::config::Config;
use crate::error::{ContextError, Result};
use crate::renderer::{write_block, Renderer};
use crate::report::{FileReportInfo, ScanReport};
use crate::scanner::Scanner;

/// Header of the tree section
pub const TREE_HEADER: &str = "--- File Tree Structure ---";

/// Statistics gathered while writing one document
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    /// Directory lines in the tree
    pub directories: usize,
    /// Relevant files listed in the tree
    pub relevant_files: usize,
    /// Content blocks written
    pub content_blocks: usize,
    /// Blocks whose content could not be read
    pub read_failures: usize,
    /// Bytes written to the output document
    pub bytes_written: u64,
    /// Wall time of the run
    pub duration: Duration,
    /// Per-file details in discovery order
    pub files: Vec<(String, FileReportInfo)>,
}

impl RunSummary {
    /// Convert into a report for the console
    pub fn into_report(self, config: &Config) -> ScanReport {
        ScanReport {
            output_file: config.output_file.display().to_string(),
            duration: self.duration,
            directories: self.directories,
            relevant_files: self.relevant_files,
            content_blocks: self.content_blocks,
            read_failures: self.read_failures,
            output_size: self.bytes_written,
            file_details: self.files,
        }
    }
}

/// Counts bytes passing through to the inner writer
struct CountingWriter<W> {
    inner: W,
    count: u64,
}

impl<W: Write> Write for CountingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let n = self.inner.write(buf)?;
        self.count += n as u64;
        Ok(n)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.inner.flush()
    }
}

/// Writes the context document for a configuration
pub struct ContextWriter<'a> {
    /// Writer configuration
    config: &'a Config,
}

impl<'a> ContextWriter<'a> {
    /// Create a new writer
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    /// Write the full document: tree section, then one block per eligible file.
    ///
    /// The output is flushed after the tree and after every block so an
    /// interrupted run leaves a readable prefix.
    pub fn run(&self) -> Result<RunSummary> {
        let start = Instant::now();
        info!("Starting: building file tree and collecting relevant paths...");

        let file = File::create(&self.config.output_file).map_err(|source| {
            ContextError::OutputCreate {
                path: self.config.output_file.clone(),
                source,
            }
        })?;
        let mut out = CountingWriter {
            inner: BufWriter::new(file),
            count: 0,
        };

        writeln!(out, "{}", TREE_HEADER)?;
        let outcome = Scanner::new(self.config).scan(&mut out)?;
        writeln!(out)?;
        out.flush()?;

        info!(
            "Tree build complete. Relevant files: {}",
            outcome.relevant.len()
        );
        info!("Processing file contents for context...");

        let renderer = Renderer::new(self.config);
        let mut summary = RunSummary {
            directories: outcome.directories,
            relevant_files: outcome.relevant.len(),
            ..RunSummary::default()
        };

        for relevant in &outcome.relevant {
            if !relevant.has_content() {
                continue;
            }
            info!("Including file: {}", relevant.relative);

            let block = match renderer.render(relevant) {
                Some(block) => block,
                None => continue,
            };
            write_block(&block, &mut out)?;
            out.flush()?;

            summary.content_blocks += 1;
            if block.failed {
                summary.read_failures += 1;
            }
            summary.files.push((
                block.relative.clone(),
                FileReportInfo {
                    lines: block.body.lines().count(),
                    chars: block.body.chars().count(),
                },
            ));
        }

        info!("File content collection complete.");
        info!(
            "Successfully wrote context to {}",
            self.config.output_file.display()
        );

        summary.bytes_written = out.count;
        summary.duration = start.elapsed();
        Ok(summary)
    }
}
