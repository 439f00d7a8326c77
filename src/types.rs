/*!
 * Core types and data structures for ctxdump
 */

use std::path::PathBuf;

/// Kind of a discovered filesystem entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// Directory (including symlinks that resolve to one)
    Directory,
    /// Anything else that can be opened as a file
    File,
}

/// A path discovered during traversal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSystemEntry {
    /// Entry name, lossily converted to UTF-8
    pub name: String,
    /// Root-joined path, not canonicalized
    pub path: PathBuf,
    /// Entry kind
    pub kind: EntryKind,
    /// Indentation level of the listing this entry belongs to
    pub depth: usize,
}

impl FileSystemEntry {
    /// Line for the tree section: four spaces per level, then `|-- `
    pub fn tree_line(&self) -> String {
        let suffix = match self.kind {
            EntryKind::Directory => "/",
            EntryKind::File => "",
        };
        format!("{}|-- {}{}", "    ".repeat(self.depth), self.name, suffix)
    }
}

/// What happens to a relevant file after it is listed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Inclusion {
    /// Shown in the tree only
    ListedOnly,
    /// Shown in the tree and dumped as a content block
    WithContent,
}

/// A file accepted by the relevance filter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelevantPath {
    /// The underlying entry
    pub entry: FileSystemEntry,
    /// Path relative to the scan root, as written in the block markers
    pub relative: String,
    /// Classification outcome
    pub inclusion: Inclusion,
}

impl RelevantPath {
    /// Whether this file gets a content block
    pub fn has_content(&self) -> bool {
        self.inclusion == Inclusion::WithContent
    }
}

/// How much of a file to read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReadMode {
    /// Whole file
    #[default]
    Full,
    /// At most this many lines, followed by a trailer note when short
    Head(usize),
}

/// Options for the read primitive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadOptions {
    /// Full or bounded read
    pub mode: ReadMode,
    /// Replace invalid UTF-8 with U+FFFD instead of failing
    pub lossy: bool,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            mode: ReadMode::Full,
            lossy: true,
        }
    }
}

/// A rendered content block, ready to be written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentBlock {
    /// Path relative to the root
    pub relative: String,
    /// Fence language tag, possibly empty
    pub language: String,
    /// File content or the inline error message
    pub body: String,
    /// True when `body` is an error placeholder
    pub failed: bool,
}
