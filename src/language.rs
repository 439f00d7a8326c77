//! Fence language tags

use crate::config::Config;
use crate::utils::extension_of;

/// Language tag for `name`, looked up by its inner extension when gzipped.
///
/// Unknown extensions yield an empty tag.
pub fn language_tag(config: &Config, name: &str) -> String {
    let lower = name.to_lowercase();
    let inner = lower.strip_suffix(".gz").unwrap_or(&lower);

    extension_of(inner)
        .and_then(|ext| config.languages.get(&ext).cloned())
        .unwrap_or_default()
}
