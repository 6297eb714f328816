//! Terminal artifact of one pipeline run

use crate::analysis::AnalysisResult;
use crate::scenario::TestScenario;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ulid::Ulid;

/// Unique run identifier (ULID for sortability)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RunId(pub Ulid);

impl RunId {
    /// Generate new run ID
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self(Ulid::new())
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RunId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Summary numbers for a successful run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationMetadata {
    /// Run identifier
    pub run_id: RunId,
    /// Completion time
    pub generated_at: DateTime<Utc>,
    /// Number of returned scenarios
    pub total_scenarios: usize,
    /// Sum of effective scenario durations, minutes
    pub estimated_duration: u32,
    /// Heuristic coverage, 0-100
    #[serde(alias = "coverage")]
    pub coverage_percent: u8,
    /// Non-fatal validation findings
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

/// Outcome of `generate_tests`
///
/// `metadata` is present iff `success`; on failure `scenarios` is empty and
/// `analysis` is absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationResult {
    /// Whether every stage completed
    pub success: bool,
    /// Optimized, validated scenarios
    pub scenarios: Vec<TestScenario>,
    /// Analysis the scenarios were generated from
    pub analysis: Option<AnalysisResult>,
    /// Summary numbers
    pub metadata: Option<GenerationMetadata>,
    /// Failure message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl GenerationResult {
    /// Successful result
    #[must_use]
    pub fn completed(
        scenarios: Vec<TestScenario>,
        analysis: AnalysisResult,
        metadata: GenerationMetadata,
    ) -> Self {
        Self {
            success: true,
            scenarios,
            analysis: Some(analysis),
            metadata: Some(metadata),
            error: None,
        }
    }

    /// Failed result carrying only a message
    #[must_use]
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            scenarios: Vec::new(),
            analysis: None,
            metadata: None,
            error: Some(error.into()),
        }
    }

    /// Total number of test cases across all scenarios
    #[inline]
    #[must_use]
    pub fn total_cases(&self) -> usize {
        self.scenarios.iter().map(|s| s.test_cases.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::Framework;

    #[test]
    fn failed_result_shape() {
        let result = GenerationResult::failed("boom");
        assert!(!result.success);
        assert!(result.scenarios.is_empty());
        assert!(result.analysis.is_none());
        assert!(result.metadata.is_none());
        assert_eq!(result.error.as_deref(), Some("boom"));
    }

    #[test]
    fn completed_result_serializes() {
        let metadata = GenerationMetadata {
            run_id: RunId::new(),
            generated_at: Utc::now(),
            total_scenarios: 0,
            estimated_duration: 0,
            coverage_percent: 0,
            warnings: Vec::new(),
        };
        let analysis = AnalysisResult::empty(Framework::React);
        let result = GenerationResult::completed(Vec::new(), analysis, metadata);

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["success"], true);
        assert!(json.get("error").is_none());
        assert!(json["metadata"].get("warnings").is_none());
        assert_eq!(json["metadata"]["coveragePercent"], 0);
    }
}
