//! Resolves the change set handed over by the CI trigger.

use tracing::info;

/// Environment variable holding the newline-separated list of changed paths.
pub const CHANGED_FILES_VAR: &str = "CHANGED_FILES";

/// Splits a newline-delimited list into trimmed, non-empty paths.
/// Order is preserved and duplicates are kept.
pub fn parse_changed_files(raw: &str) -> Vec<String> {
    raw.split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Reads `CHANGED_FILES`. Unset and empty both give an empty list.
pub fn changed_files_from_env() -> Vec<String> {
    let raw = std::env::var(CHANGED_FILES_VAR).unwrap_or_default();
    let files = parse_changed_files(&raw);
    info!(count = files.len(), "[CHANGES] Resolved change set");
    files
}
