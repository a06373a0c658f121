//! MinHash signatures and Jaccard estimation.
//!
//! Slot `i` of a signature is `min(xxh3(element) ^ seed[i])` over the set. The
//! per-slot seeds come from a `StdRng` seeded with an explicit constant, so
//! signatures are reproducible for a given (hash count, seed) pair.

use std::collections::BTreeSet;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use xxhash_rust::xxh3::xxh3_64;

/// Fixed-length array of per-hash-function minimum values.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MinHashSignature(Vec<u64>);

impl MinHashSignature {
    pub fn slots(&self) -> &[u64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Signature of an empty set: every slot holds the `u64::MAX` sentinel.
    pub fn is_sentinel(&self) -> bool {
        self.0.iter().all(|&slot| slot == u64::MAX)
    }

    /// Estimated Jaccard similarity with another signature.
    pub fn similarity(&self, other: &MinHashSignature) -> f64 {
        estimate_jaccard(self, other)
    }
}

/// A family of `num_hashes` seeded hash functions.
#[derive(Debug, Clone)]
pub struct MinHasher {
    seeds: Vec<u64>,
    seed: u64,
}

impl MinHasher {
    pub fn new(num_hashes: usize, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let seeds = (0..num_hashes).map(|_| rng.random::<u64>()).collect();
        Self { seeds, seed }
    }

    pub fn num_hashes(&self) -> usize {
        self.seeds.len()
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Signature of a set of strings. Order and duplicates do not matter.
    pub fn signature<I, S>(&self, elements: I) -> MinHashSignature
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut slots = vec![u64::MAX; self.seeds.len()];
        for element in elements {
            let h = xxh3_64(element.as_ref().as_bytes());
            for (slot, seed) in slots.iter_mut().zip(&self.seeds) {
                let v = h ^ seed;
                if v < *slot {
                    *slot = v;
                }
            }
        }
        MinHashSignature(slots)
    }
}

/// Fraction of slots on which two signatures agree, in [0, 1].
///
/// Signatures of different lengths, or of length zero, are not comparable and
/// score 0.0.
pub fn estimate_jaccard(a: &MinHashSignature, b: &MinHashSignature) -> f64 {
    if a.0.len() != b.0.len() || a.0.is_empty() {
        return 0.0;
    }
    let agree = a.0.iter().zip(&b.0).filter(|(x, y)| x == y).count();
    agree as f64 / a.0.len() as f64
}

/// Exact Jaccard similarity. Two empty sets score 0.0.
pub fn jaccard_similarity<T: Ord>(a: &BTreeSet<T>, b: &BTreeSet<T>) -> f64 {
    let intersection = a.intersection(b).count();
    let union = a.len() + b.len() - intersection;
    if union == 0 {
        return 0.0;
    }
    intersection as f64 / union as f64
}
