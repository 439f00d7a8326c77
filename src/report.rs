/*!
 * Reporting functionality for ctxdump
 *
 * Renders the end-of-run summary with the tabled library. The report goes to
 * stderr so it never mixes with anything a caller pipes from stdout.
 */

use std::time::Duration;

use tabled::{
    settings::{object::Columns, Alignment, Modify, Padding, Style},
    Table, Tabled,
};

use crate::utils::format_file_size;

/// Information about an included file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileReportInfo {
    /// Number of lines in the block
    pub lines: usize,
    /// Number of characters in the block
    pub chars: usize,
}

/// Statistics for one run
#[derive(Debug, Clone)]
pub struct ScanReport {
    /// Output file path
    pub output_file: String,
    /// Time taken to scan and write
    pub duration: Duration,
    /// Directories listed in the tree
    pub directories: usize,
    /// Relevant files listed in the tree
    pub relevant_files: usize,
    /// Content blocks written
    pub content_blocks: usize,
    /// Blocks that carry a read error
    pub read_failures: usize,
    /// Size of the output document in bytes
    pub output_size: u64,
    /// Details for each included file, in discovery order
    pub file_details: Vec<(String, FileReportInfo)>,
}

impl ScanReport {
    /// Total lines across all blocks
    pub fn total_lines(&self) -> usize {
        self.file_details.iter().map(|(_, info)| info.lines).sum()
    }

    /// Total characters across all blocks
    pub fn total_chars(&self) -> usize {
        self.file_details.iter().map(|(_, info)| info.chars).sum()
    }
}

/// Report generator for run results
pub struct Reporter;

impl Reporter {
    /// Create a new reporter
    pub fn new() -> Self {
        Self
    }

    /// Format a number with human-readable units
    fn format_number(&self, num: usize) -> String {
        if num >= 1_000_000 {
            format!("{:.1}M", num as f64 / 1_000_000.0)
        } else if num >= 1_000 {
            format!("{:.1}K", num as f64 / 1_000.0)
        } else {
            num.to_string()
        }
    }

    /// Generate the report string
    pub fn generate_report(&self, report: &ScanReport) -> String {
        let summary_table = self.create_summary_table(report);

        if report.file_details.is_empty() {
            return format!("✅  CONTEXT WRITTEN\n{}", summary_table);
        }

        let files_title = if report.file_details.len() > 15 {
            "📋  TOP 10 LARGEST FILES BY CHARACTER COUNT"
        } else {
            "📋  INCLUDED FILES"
        };

        format!(
            "{}\n{}\n\n✅  CONTEXT WRITTEN\n{}",
            files_title,
            self.create_files_table(report),
            summary_table
        )
    }

    /// Print the report to stderr
    pub fn print_report(&self, report: &ScanReport) {
        eprintln!("\n{}", self.generate_report(report));
    }

    fn create_summary_table(&self, report: &ScanReport) -> String {
        #[derive(Tabled)]
        struct SummaryRow {
            #[tabled(rename = "Metric")]
            key: &'static str,

            #[tabled(rename = "Value")]
            value: String,
        }

        let mut rows = vec![
            SummaryRow {
                key: "📂 Output File",
                value: report.output_file.clone(),
            },
            SummaryRow {
                key: "⏱️ Process Time",
                value: format!("{:.4?}", report.duration),
            },
            SummaryRow {
                key: "🗂️ Directories",
                value: self.format_number(report.directories),
            },
            SummaryRow {
                key: "📄 Relevant Files",
                value: self.format_number(report.relevant_files),
            },
            SummaryRow {
                key: "🧾 Content Blocks",
                value: self.format_number(report.content_blocks),
            },
            SummaryRow {
                key: "📝 Total Lines",
                value: self.format_number(report.total_lines()),
            },
            SummaryRow {
                key: "📦 LLM Tokens",
                value: format!(
                    "{} tokens (estimated)",
                    self.format_number(report.total_chars() / 4)
                ),
            },
            SummaryRow {
                key: "💾 Output Size",
                value: format_file_size(report.output_size),
            },
        ];

        if report.read_failures > 0 {
            rows.push(SummaryRow {
                key: "⚠️ Read Failures",
                value: report.read_failures.to_string(),
            });
        }

        let mut table = Table::new(rows);
        table
            .with(Style::rounded())
            .with(Padding::new(1, 1, 0, 0))
            .with(Modify::new(Columns::new(..)).with(Alignment::left()));

        table.to_string()
    }

    fn create_files_table(&self, report: &ScanReport) -> String {
        #[derive(Tabled)]
        struct FileRow {
            #[tabled(rename = "File Path")]
            path: String,

            #[tabled(rename = "Lines")]
            lines: String,

            #[tabled(rename = "Est. Tokens")]
            tokens: String,
        }

        let mut files: Vec<_> = report.file_details.iter().collect();
        if files.len() > 15 {
            files.sort_by(|(_, a), (_, b)| b.chars.cmp(&a.chars));
            files.truncate(10);
        }

        let rows: Vec<FileRow> = files
            .into_iter()
            .map(|(path, info)| FileRow {
                path: truncate_path(path, 60),
                lines: self.format_number(info.lines),
                tokens: self.format_number(info.chars / 4),
            })
            .collect();

        let mut table = Table::new(rows);
        table
            .with(Style::rounded())
            .with(Padding::new(1, 1, 0, 0))
            .with(Modify::new(Columns::new(..)).with(Alignment::left()));

        table.to_string()
    }
}

impl Default for Reporter {
    fn default() -> Self {
        Self::new()
    }
}

/// Keep the trailing path segments that fit in `max_len` characters
fn truncate_path(path: &str, max_len: usize) -> String {
    if path.chars().count() <= max_len {
        return path.to_string();
    }

    let mut segments = Vec::new();
    let mut len = 3;
    for part in path.rsplit('/') {
        let part_len = part.chars().count() + 1;
        if len + part_len > max_len {
            break;
        }
        segments.push(part);
        len += part_len;
    }

    if segments.is_empty() {
        let tail: String = path
            .chars()
            .rev()
            .take(max_len.saturating_sub(3))
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
            .collect();
        return format!("...{}", tail);
    }

    segments.reverse();
    format!(".../{}", segments.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_report(files: usize) -> ScanReport {
        ScanReport {
            output_file: "context_output.txt".to_string(),
            duration: Duration::from_millis(12),
            directories: 3,
            relevant_files: files + 2,
            content_blocks: files,
            read_failures: 0,
            output_size: 4096,
            file_details: (0..files)
                .map(|i| {
                    (
                        format!("pkg/mod_{}.py", i),
                        FileReportInfo {
                            lines: i + 1,
                            chars: (i + 1) * 40,
                        },
                    )
                })
                .collect(),
        }
    }

    #[test]
    fn test_totals() {
        let report = sample_report(3);
        assert_eq!(report.total_lines(), 6);
        assert_eq!(report.total_chars(), 240);
    }

    #[test]
    fn test_report_lists_files() {
        let text = Reporter::new().generate_report(&sample_report(2));
        assert!(text.contains("INCLUDED FILES"));
        assert!(text.contains("pkg/mod_1.py"));
        assert!(text.contains("4.00 KB"));
        assert!(!text.contains("Read Failures"));
    }

    #[test]
    fn test_report_keeps_top_ten() {
        let text = Reporter::new().generate_report(&sample_report(20));
        assert!(text.contains("TOP 10"));
        assert!(text.contains("pkg/mod_19.py"));
        assert!(!text.contains("pkg/mod_0.py"));
    }

    #[test]
    fn test_truncate_path() {
        assert_eq!(truncate_path("a/b.py", 60), "a/b.py");
        let long = format!("{}/inner/file.py", "x".repeat(80));
        assert_eq!(truncate_path(&long, 30), ".../inner/file.py");
    }
}
