/*!
 * Utility functions and default tables for ctxdump
 */

use std::collections::BTreeMap;
use std::path::Path;

use once_cell::sync::Lazy;

/// Format a human-readable file size
pub fn format_file_size(size: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if size >= GB {
        format!("{:.2} GB", size as f64 / GB as f64)
    } else if size >= MB {
        format!("{:.2} MB", size as f64 / MB as f64)
    } else if size >= KB {
        format!("{:.2} KB", size as f64 / KB as f64)
    } else {
        format!("{} bytes", size)
    }
}

/// Lowercased final extension of `name`, dot included (`"a.PY"` -> `".py"`).
///
/// Follows `Path::extension`, so dotfiles such as `.env` have no extension.
pub fn extension_of(name: &str) -> Option<String> {
    Path::new(name)
        .extension()
        .map(|ext| format!(".{}", ext.to_string_lossy().to_lowercase()))
}

/// Display form of `path` relative to `root`, falling back to the full path
pub fn relative_display(path: &Path, root: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .to_string()
}

/// Directory names that are never listed or descended into
pub static DEFAULT_IGNORE_DIRS: Lazy<Vec<&'static str>> =
    Lazy::new(|| vec![".venv", ".git", "__pycache__"]);

/// Substrings marking editor swap files and OS metadata
pub static DEFAULT_IGNORE_PATTERNS: Lazy<Vec<&'static str>> =
    Lazy::new(|| vec!["~", ".swp", ".DS_Store"]);

/// Extensions that make a file relevant for the tree listing
pub static DEFAULT_RELEVANT_EXTENSIONS: Lazy<Vec<&'static str>> = Lazy::new(|| {
    vec![
        // Code
        ".py",
        ".go",
        // Tabular and columnar data
        ".csv",
        ".parquet",
        // Config
        ".yaml",
        ".yml",
        ".env",
        // Checkpoints and tensors
        ".safetensors",
        ".pt",
        // Structured data
        ".json",
        // CUDA kernels
        ".cu",
        ".cuh",
        // Numeric archives
        ".npz",
    ]
});

/// Multi-part suffixes that are relevant on their own
pub static DEFAULT_COMPOUND_SUFFIXES: Lazy<Vec<&'static str>> = Lazy::new(|| vec![".csv.gz"]);

/// Bulk data formats: listed in the tree, never dumped
pub static DEFAULT_LISTING_ONLY_SUFFIXES: Lazy<Vec<&'static str>> =
    Lazy::new(|| vec![".csv", ".csv.gz", ".parquet", ".npz"]);

/// Formats whose full content goes into the document
pub static DEFAULT_CONTENT_SUFFIXES: Lazy<Vec<&'static str>> = Lazy::new(|| {
    vec![
        ".py",
        ".go",
        ".yaml",
        ".yml",
        ".env",
        ".cu",
        ".cuh",
        ".safetensors",
        ".pt",
        ".json",
    ]
});

/// Extension to fenced-block language tag
pub static DEFAULT_LANGUAGES: Lazy<BTreeMap<&'static str, &'static str>> = Lazy::new(|| {
    BTreeMap::from([
        (".py", "python"),
        (".yaml", "yaml"),
        (".yml", "yaml"),
        (".env", "bash"),
        (".csv", "csv"),
        (".go", "go"),
        (".js", "javascript"),
        (".ts", "typescript"),
        (".java", "java"),
        (".cpp", "cpp"),
        (".cc", "cpp"),
        (".cxx", "cpp"),
        (".c", "c"),
        (".cs", "csharp"),
        (".rb", "ruby"),
        (".php", "php"),
        (".swift", "swift"),
        (".rs", "rust"),
        (".sh", "bash"),
        (".sql", "sql"),
        (".json", "json"),
        (".xml", "xml"),
        (".html", "html"),
        (".css", "css"),
        (".md", "markdown"),
        (".cu", "cpp"),
        (".cuh", "cpp"),
        (".npz", "text"),
    ])
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_of() {
        assert_eq!(extension_of("main.PY").as_deref(), Some(".py"));
        assert_eq!(extension_of("a.b.json").as_deref(), Some(".json"));
        assert_eq!(extension_of("prod.env").as_deref(), Some(".env"));
        assert_eq!(extension_of(".env"), None);
        assert_eq!(extension_of("Makefile"), None);
    }

    #[test]
    fn test_relative_display() {
        let root = Path::new("./repo");
        assert_eq!(
            relative_display(&root.join("src").join("a.py"), root),
            Path::new("src").join("a.py").to_string_lossy()
        );
        assert_eq!(relative_display(Path::new("/elsewhere"), root), "/elsewhere");
    }

    #[test]
    fn test_format_file_size() {
        assert_eq!(format_file_size(512), "512 bytes");
        assert_eq!(format_file_size(2048), "2.00 KB");
        assert_eq!(format_file_size(3 * 1024 * 1024), "3.00 MB");
    }
}
