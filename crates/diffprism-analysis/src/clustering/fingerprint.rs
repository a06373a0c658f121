//! Per-file fingerprints: the set of normalized paths a file's differences touch.

use std::collections::{BTreeMap, BTreeSet};

use diffprism_core::FolderResult;

use crate::paths;

/// Normalized paths touched by one file pair.
pub type FileFingerprint = BTreeSet<String>;

/// Fingerprints of every pair reported as not equal, keyed by file id.
/// Repeated ids pool their paths.
pub fn build_fingerprints(folder: &FolderResult) -> BTreeMap<String, FileFingerprint> {
    let mut fingerprints: BTreeMap<String, FileFingerprint> = BTreeMap::new();
    for result in folder.files_with_differences() {
        let fingerprint = fingerprints.entry(result.file_id().to_string()).or_default();
        fingerprint.extend(
            result
                .differences
                .iter()
                .map(|d| paths::normalize(&d.property_path)),
        );
    }
    fingerprints
}
