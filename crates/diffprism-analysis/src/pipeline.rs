//! DifferenceAnalyzer, the end-to-end orchestrator.
//!
//! Chains the independent analyses over one folder result:
//! (1) StructuralMiner.mine()
//! (2) SemanticGrouper.analyze()
//! (3) build_fingerprints() + SimilarityClusterer.cluster()

use std::time::Instant;

use diffprism_core::{AnalysisConfig, DiffprismResult, FolderResult};
use serde::{Deserialize, Serialize};

use crate::clustering::{build_fingerprints, SimilarFileGroup, SimilarityClusterer};
use crate::semantic::{SemanticDifferenceAnalysis, SemanticGrouper};
use crate::structural::{StructuralAnalysisResult, StructuralMiner};

/// Combined output of all analyses.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub structural: StructuralAnalysisResult,
    pub semantic: SemanticDifferenceAnalysis,
    pub similar_groups: Vec<SimilarFileGroup>,
}

impl AnalysisReport {
    /// Render as pretty JSON for report collaborators.
    pub fn to_json(&self) -> DiffprismResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Runs every analysis with one validated configuration.
pub struct DifferenceAnalyzer {
    miner: StructuralMiner,
    grouper: SemanticGrouper,
    clusterer: SimilarityClusterer,
}

impl DifferenceAnalyzer {
    /// Create an analyzer after validating `config`.
    pub fn new(config: AnalysisConfig) -> DiffprismResult<Self> {
        config.validate()?;
        Ok(Self {
            miner: StructuralMiner::new(config.structural),
            grouper: SemanticGrouper::new(config.semantic),
            clusterer: SimilarityClusterer::new(config.clustering),
        })
    }

    /// Create with default configuration.
    pub fn with_defaults() -> Self {
        Self {
            miner: StructuralMiner::with_defaults(),
            grouper: SemanticGrouper::with_defaults(),
            clusterer: SimilarityClusterer::with_defaults(),
        }
    }

    pub fn miner(&self) -> &StructuralMiner {
        &self.miner
    }

    pub fn grouper(&self) -> &SemanticGrouper {
        &self.grouper
    }

    pub fn clusterer(&self) -> &SimilarityClusterer {
        &self.clusterer
    }

    /// Run the full analysis.
    pub fn analyze(&self, folder: &FolderResult) -> AnalysisReport {
        let start = Instant::now();

        let structural = self.miner.mine(folder);
        let semantic = self.grouper.analyze(&folder.file_pair_results);
        let fingerprints = build_fingerprints(folder);
        let similar_groups = self.clusterer.cluster(&fingerprints);

        tracing::info!(
            pairs = folder.file_pair_results.len(),
            patterns = structural.summary.pattern_count,
            semantic_groups = semantic.groups.len(),
            similar_groups = similar_groups.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "difference analysis complete"
        );

        AnalysisReport {
            structural,
            semantic,
            similar_groups,
        }
    }
}
