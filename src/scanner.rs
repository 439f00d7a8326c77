/*!
 * Directory traversal and tree listing
 */

use std::io::{self, Write};
use std::path::Path;

use walkdir::{DirEntry, WalkDir};

use crate::config::Config;
use crate::filter::RelevanceFilter;
use crate::types::{EntryKind, FileSystemEntry, RelevantPath};
use crate::utils::relative_display;

/// Result of a traversal pass
#[derive(Debug, Clone, Default)]
pub struct ScanOutcome {
    /// Relevant files in discovery order
    pub relevant: Vec<RelevantPath>,
    /// Number of directory lines written
    pub directories: usize,
}

/// Walks the target directory and writes the tree section
pub struct Scanner<'a> {
    /// Scanner configuration
    config: &'a Config,
    filter: RelevanceFilter<'a>,
}

impl<'a> Scanner<'a> {
    /// Create a new scanner
    pub fn new(config: &'a Config) -> Self {
        Self {
            config,
            filter: RelevanceFilter::new(config),
        }
    }

    /// Write tree lines for the whole target directory into `out`.
    ///
    /// Each directory lists its subdirectories, then its relevant files,
    /// before any of its subdirectories are descended into.
    pub fn scan<W: Write>(&self, out: &mut W) -> io::Result<ScanOutcome> {
        let mut outcome = ScanOutcome::default();
        self.scan_directory(&self.config.target_dir, 0, out, &mut outcome)?;
        Ok(outcome)
    }

    fn scan_directory<W: Write>(
        &self,
        dir: &Path,
        depth: usize,
        out: &mut W,
        outcome: &mut ScanOutcome,
    ) -> io::Result<()> {
        let (dirs, files) = self.list_directory(dir, depth);

        for entry in &dirs {
            writeln!(out, "{}", entry.tree_line())?;
        }
        outcome.directories += dirs.len();

        for entry in files {
            let inclusion = match self.filter.classify(&entry.name) {
                Some(inclusion) => inclusion,
                None => continue,
            };
            writeln!(out, "{}", entry.tree_line())?;
            outcome.relevant.push(RelevantPath {
                relative: relative_display(&entry.path, &self.config.target_dir),
                entry,
                inclusion,
            });
        }

        for entry in dirs {
            // Symlinked directories are listed but not followed
            if entry.path.is_symlink() {
                continue;
            }
            self.scan_directory(&entry.path, depth + 1, out, outcome)?;
        }

        Ok(())
    }

    /// Sorted subdirectories and files directly under `dir`.
    ///
    /// Pruned directories are dropped here, before anything descends into
    /// them. An unreadable directory yields nothing.
    fn list_directory(
        &self,
        dir: &Path,
        depth: usize,
    ) -> (Vec<FileSystemEntry>, Vec<FileSystemEntry>) {
        let entries: Vec<FileSystemEntry> = WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_map(Result::ok)
            .map(|e| self.to_entry(dir, &e, depth))
            .filter(|e| !(e.kind == EntryKind::Directory && self.should_prune(&e.path)))
            .collect();

        entries
            .into_iter()
            .partition(|e| e.kind == EntryKind::Directory)
    }

    /// Pruning predicate, evaluated per directory before descent
    pub fn should_prune(&self, path: &Path) -> bool {
        self.filter.is_pruned_dir(path)
    }

    fn to_entry(&self, dir: &Path, entry: &DirEntry, depth: usize) -> FileSystemEntry {
        let name = entry.file_name().to_string_lossy().to_string();
        // Rebuild from the listed directory so paths stay root-relative as given
        let path = dir.join(entry.file_name());
        let is_dir = entry.file_type().is_dir()
            || (entry.file_type().is_symlink() && path.is_dir());

        FileSystemEntry {
            name,
            path,
            kind: if is_dir {
                EntryKind::Directory
            } else {
                EntryKind::File
            },
            depth,
        }
    }
}
