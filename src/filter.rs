/*!
 * Relevance rules for discovered files and directories
 *
 * Every predicate here is pure: callers decide what to do with a verdict.
 */

use std::path::Path;

use crate::config::Config;
use crate::types::Inclusion;
use crate::utils::extension_of;

/// Name-based relevance filter
pub struct RelevanceFilter<'a> {
    config: &'a Config,
    output_name: String,
}

impl<'a> RelevanceFilter<'a> {
    /// Create a filter over the given configuration
    pub fn new(config: &'a Config) -> Self {
        Self {
            config,
            output_name: config.output_name(),
        }
    }

    /// Whether the file `name` belongs in the tree listing
    pub fn is_relevant(&self, name: &str) -> bool {
        if name == self.config.tool_name || name == self.output_name {
            return false;
        }

        // Substring match, so `notes.py~` and `.a.py.swp` are both caught
        if self
            .config
            .ignore_patterns
            .iter()
            .any(|pattern| name.contains(pattern.as_str()))
        {
            return false;
        }

        let lower = name.to_lowercase();
        if self
            .config
            .compound_suffixes
            .iter()
            .any(|suffix| lower.ends_with(suffix.as_str()))
        {
            return true;
        }

        extension_of(name).map_or(false, |ext| self.config.relevant_extensions.contains(&ext))
    }

    /// Classify a file name, `None` when it is not relevant
    pub fn classify(&self, name: &str) -> Option<Inclusion> {
        if !self.is_relevant(name) {
            return None;
        }

        let lower = name.to_lowercase();
        let ends_with_any =
            |suffixes: &[String]| suffixes.iter().any(|s| lower.ends_with(s.as_str()));

        if ends_with_any(&self.config.listing_only_suffixes) {
            Some(Inclusion::ListedOnly)
        } else if ends_with_any(&self.config.content_suffixes) {
            Some(Inclusion::WithContent)
        } else {
            Some(Inclusion::ListedOnly)
        }
    }

    /// Whether a directory must be skipped together with everything below it
    pub fn is_pruned_dir(&self, path: &Path) -> bool {
        let name = path.file_name().unwrap_or_default().to_string_lossy();
        self.config.ignore_dirs.contains(&*name) || self.config.partition.matches(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_extension_relevance() {
        let config = Config::default();
        let filter = RelevanceFilter::new(&config);

        assert!(filter.is_relevant("train.py"));
        assert!(filter.is_relevant("MODEL.PT"));
        assert!(filter.is_relevant("kernel.cuh"));
        assert!(filter.is_relevant("prod.env"));
        assert!(!filter.is_relevant("README.md"));
        assert!(!filter.is_relevant("archive.gz"));
        assert!(!filter.is_relevant("Makefile"));
        // Dotfiles carry no extension
        assert!(!filter.is_relevant(".env"));
    }

    #[test]
    fn test_compound_suffix() {
        let config = Config::default();
        let filter = RelevanceFilter::new(&config);

        assert!(filter.is_relevant("ticks.csv.gz"));
        assert!(filter.is_relevant("TICKS.CSV.GZ"));
        assert!(!filter.is_relevant("main.py.gz"));
        assert_eq!(filter.classify("ticks.csv.gz"), Some(Inclusion::ListedOnly));
    }

    #[test]
    fn test_temp_and_self_names() {
        let config = Config::default();
        let filter = RelevanceFilter::new(&config);

        assert!(!filter.is_relevant("notes.py~"));
        assert!(!filter.is_relevant("~lock.json"));
        assert!(!filter.is_relevant(".main.py.swp"));
        assert!(!filter.is_relevant("x.DS_Store.json"));
        assert!(!filter.is_relevant(&config.tool_name));

        let config = Config {
            output_file: PathBuf::from("out/dump.json"),
            ..Config::default()
        };
        let filter = RelevanceFilter::new(&config);
        assert!(!filter.is_relevant("dump.json"));
        assert!(filter.is_relevant("other.json"));
    }

    #[test]
    fn test_classify() {
        let config = Config::default();
        let filter = RelevanceFilter::new(&config);

        assert_eq!(filter.classify("a.py"), Some(Inclusion::WithContent));
        assert_eq!(filter.classify("cfg.YML"), Some(Inclusion::WithContent));
        assert_eq!(filter.classify("w.safetensors"), Some(Inclusion::WithContent));
        assert_eq!(filter.classify("b.csv"), Some(Inclusion::ListedOnly));
        assert_eq!(filter.classify("x.parquet"), Some(Inclusion::ListedOnly));
        assert_eq!(filter.classify("arr.npz"), Some(Inclusion::ListedOnly));
        assert_eq!(filter.classify("notes.txt"), None);
    }

    #[test]
    fn test_pruned_dirs() {
        let config = Config::default();
        let filter = RelevanceFilter::new(&config);
        let root = Path::new(".");

        assert!(filter.is_pruned_dir(&root.join(".git")));
        assert!(filter.is_pruned_dir(&root.join("src").join("__pycache__")));
        assert!(filter.is_pruned_dir(&root.join("bars_5m").join("d=2024-01-01")));
        assert!(filter.is_pruned_dir(&root.join("btc_parquet_clean").join("d=1")));
        assert!(!filter.is_pruned_dir(&root.join("data").join("d=2024-01-01")));
        assert!(!filter.is_pruned_dir(&root.join("bars_5m").join("day=1")));
        assert!(!filter.is_pruned_dir(&root.join("btc_parquet_clean_v2").join("d=1")));
        assert!(!filter.is_pruned_dir(&root.join("bars_5m")));
    }
}
