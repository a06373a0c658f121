//! File similarity clustering over normalized-path fingerprints.

pub mod clusterer;
pub mod fingerprint;
pub mod minhash;

pub use clusterer::{SimilarFileGroup, SimilarityClusterer};
pub use fingerprint::{build_fingerprints, FileFingerprint};
pub use minhash::{estimate_jaccard, jaccard_similarity, MinHashSignature, MinHasher};
