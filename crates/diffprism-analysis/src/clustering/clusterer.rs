//! Greedy threshold clustering of files by estimated fingerprint similarity.
//!
//! Algorithm:
//! 1. MinHash signature per file (rayon)
//! 2. Estimated Jaccard for every file pair, keep pairs at or above the threshold
//! 3. Visit pairs by similarity desc; join the group of whichever member is
//!    already grouped, otherwise open a new group
//! 4. Files never paired become singleton groups
//!
//! The result is a partition but not an optimal one: near-ties can change
//! membership depending on visiting order.

use std::collections::{BTreeMap, BTreeSet};

use diffprism_core::config::ClusteringConfig;
use diffprism_core::FxHashMap;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::minhash::{estimate_jaccard, MinHashSignature, MinHasher};

/// Files sharing a similar difference fingerprint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarFileGroup {
    pub name: String,
    pub file_pairs: BTreeSet<String>,
    pub common_pattern_description: String,
    /// Paths touched by every member, sorted.
    pub common_paths: Vec<String>,
}

impl SimilarFileGroup {
    pub fn len(&self) -> usize {
        self.file_pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.file_pairs.is_empty()
    }

    pub fn is_singleton(&self) -> bool {
        self.file_pairs.len() == 1
    }
}

/// A candidate pair with its estimated similarity.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredPair {
    pub a: String,
    pub b: String,
    pub similarity: f64,
}

/// Clusters files whose fingerprints are approximately similar.
pub struct SimilarityClusterer {
    config: ClusteringConfig,
    hasher: MinHasher,
}

impl SimilarityClusterer {
    pub fn new(config: ClusteringConfig) -> Self {
        let hasher = MinHasher::new(config.num_hashes, config.seed);
        Self { config, hasher }
    }

    pub fn with_defaults() -> Self {
        Self::new(ClusteringConfig::default())
    }

    pub fn hasher(&self) -> &MinHasher {
        &self.hasher
    }

    /// Signatures for every fingerprint.
    pub fn signatures(
        &self,
        fingerprints: &BTreeMap<String, BTreeSet<String>>,
    ) -> BTreeMap<String, MinHashSignature> {
        fingerprints
            .par_iter()
            .map(|(file, paths)| (file.clone(), self.hasher.signature(paths)))
            .collect()
    }

    /// Pairs at or above the threshold, by similarity desc then file ids.
    pub fn scored_pairs(&self, signatures: &BTreeMap<String, MinHashSignature>) -> Vec<ScoredPair> {
        let entries: Vec<(&String, &MinHashSignature)> = signatures.iter().collect();
        let threshold = self.config.similarity_threshold;
        let mut pairs: Vec<ScoredPair> = (0..entries.len())
            .into_par_iter()
            .flat_map_iter(|i| {
                let (file_a, sig_a) = entries[i];
                entries[i + 1..].iter().filter_map(move |(file_b, sig_b)| {
                    let similarity = estimate_jaccard(sig_a, sig_b);
                    (similarity >= threshold).then(|| ScoredPair {
                        a: file_a.clone(),
                        b: (*file_b).clone(),
                        similarity,
                    })
                })
            })
            .collect();
        pairs.sort_by(|x, y| {
            y.similarity
                .total_cmp(&x.similarity)
                .then_with(|| x.a.cmp(&y.a))
                .then_with(|| x.b.cmp(&y.b))
        });
        pairs
    }

    /// Partition files into similarity groups.
    pub fn cluster(&self, fingerprints: &BTreeMap<String, BTreeSet<String>>) -> Vec<SimilarFileGroup> {
        let signatures = self.signatures(fingerprints);
        let pairs = self.scored_pairs(&signatures);

        let mut members: Vec<BTreeSet<String>> = Vec::new();
        let mut group_of: FxHashMap<String, usize> = FxHashMap::default();

        for pair in &pairs {
            match (group_of.get(&pair.a).copied(), group_of.get(&pair.b).copied()) {
                (Some(_), Some(_)) => {}
                (Some(g), None) => {
                    members[g].insert(pair.b.clone());
                    group_of.insert(pair.b.clone(), g);
                }
                (None, Some(g)) => {
                    members[g].insert(pair.a.clone());
                    group_of.insert(pair.a.clone(), g);
                }
                (None, None) => {
                    let g = members.len();
                    members.push(BTreeSet::from([pair.a.clone(), pair.b.clone()]));
                    group_of.insert(pair.a.clone(), g);
                    group_of.insert(pair.b.clone(), g);
                }
            }
        }
        let grouped = members.len();

        for file in fingerprints.keys() {
            if !group_of.contains_key(file) {
                group_of.insert(file.clone(), members.len());
                members.push(BTreeSet::from([file.clone()]));
            }
        }

        tracing::debug!(
            files = fingerprints.len(),
            candidate_pairs = pairs.len(),
            groups = grouped,
            singletons = members.len() - grouped,
            "file clustering complete"
        );

        members
            .into_iter()
            .enumerate()
            .map(|(i, files)| self.build_group(i, grouped, files, fingerprints))
            .collect()
    }

    fn build_group(
        &self,
        index: usize,
        grouped: usize,
        files: BTreeSet<String>,
        fingerprints: &BTreeMap<String, BTreeSet<String>>,
    ) -> SimilarFileGroup {
        let common = common_paths(&files, fingerprints);
        let name = if index < grouped {
            format!("Similar Files Group {}", index + 1)
        } else {
            let file = files.iter().next().map(String::as_str).unwrap_or_default();
            format!("Unique: {file}")
        };
        let common_pattern_description = describe_common(&common, self.config.max_example_paths);
        SimilarFileGroup {
            name,
            file_pairs: files,
            common_pattern_description,
            common_paths: common,
        }
    }
}

/// Intersection of the members' fingerprints.
fn common_paths(files: &BTreeSet<String>, fingerprints: &BTreeMap<String, BTreeSet<String>>) -> Vec<String> {
    let mut sets = files.iter().filter_map(|f| fingerprints.get(f));
    let Some(first) = sets.next() else {
        return Vec::new();
    };
    let mut common: BTreeSet<&String> = first.iter().collect();
    for set in sets {
        common.retain(|p| set.contains(*p));
    }
    common.into_iter().cloned().collect()
}

fn describe_common(common: &[String], max_examples: usize) -> String {
    if common.is_empty() {
        return String::from("No common difference paths");
    }
    let examples: Vec<&str> = common.iter().take(max_examples).map(String::as_str).collect();
    let noun = if common.len() == 1 { "path" } else { "paths" };
    format!(
        "{} common difference {noun}, e.g. {}",
        common.len(),
        examples.join(", ")
    )
}
