//! Pipeline stages and progress events
//!
//! The engine reports progress as [`ProgressEvent`]s on an unbounded channel
//! instead of calling back into caller state. Sending never blocks; a dropped
//! receiver silently disables reporting.

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

/// Engine state machine
///
/// Transitions are strictly sequential:
/// `Idle → Analyzing → EnhancingContext → GeneratingScenarios →
/// GeneratingCases → Optimizing → Validating → {Complete | Failed}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStage {
    /// Not started
    Idle,
    /// Caller-side input preparation (file concatenation)
    Preparing,
    /// Running the analyzer
    Analyzing,
    /// Composing the enhanced context
    EnhancingContext,
    /// Prompting the model and parsing scenarios
    GeneratingScenarios,
    /// Expanding scenarios into test cases
    GeneratingCases,
    /// Running the optimizer chain
    Optimizing,
    /// Re-associating cases with scenarios
    Validating,
    /// Finished successfully
    Complete,
    /// Finished with an error
    Failed,
}

impl PipelineStage {
    /// Progress percentage reported on entering the stage
    ///
    /// `Idle` and `Failed` have no fixed value; callers report the last
    /// percentage seen instead.
    #[inline]
    #[must_use]
    pub fn percent(self) -> u8 {
        match self {
            PipelineStage::Idle | PipelineStage::Failed => 0,
            PipelineStage::Preparing => 5,
            PipelineStage::Analyzing => 15,
            PipelineStage::EnhancingContext => 30,
            PipelineStage::GeneratingScenarios => 45,
            PipelineStage::GeneratingCases => 65,
            PipelineStage::Optimizing => 80,
            PipelineStage::Validating => 90,
            PipelineStage::Complete => 100,
        }
    }

    /// Snake-case stage name, as serialized
    #[inline]
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            PipelineStage::Idle => "idle",
            PipelineStage::Preparing => "preparing",
            PipelineStage::Analyzing => "analyzing",
            PipelineStage::EnhancingContext => "enhancing_context",
            PipelineStage::GeneratingScenarios => "generating_scenarios",
            PipelineStage::GeneratingCases => "generating_cases",
            PipelineStage::Optimizing => "optimizing",
            PipelineStage::Validating => "validating",
            PipelineStage::Complete => "complete",
            PipelineStage::Failed => "failed",
        }
    }

    /// Human-readable step label
    #[inline]
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            PipelineStage::Idle => "Idle",
            PipelineStage::Preparing => "Processing code input...",
            PipelineStage::Analyzing => "Analyzing codebase...",
            PipelineStage::EnhancingContext => "Enhancing context...",
            PipelineStage::GeneratingScenarios => "Generating scenarios...",
            PipelineStage::GeneratingCases => "Generating test cases...",
            PipelineStage::Optimizing => "Optimizing scenarios...",
            PipelineStage::Validating => "Validating test cases...",
            PipelineStage::Complete => "Generation complete",
            PipelineStage::Failed => "Generation failed",
        }
    }
}

impl std::fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One progress notification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressEvent {
    /// Stage being entered
    pub stage: PipelineStage,
    /// Step label
    pub label: String,
    /// Overall progress, 0-100
    pub percent: u8,
}

impl ProgressEvent {
    /// Event for entering a stage at its fixed percentage
    #[inline]
    #[must_use]
    pub fn entering(stage: PipelineStage) -> Self {
        Self {
            stage,
            label: stage.label().to_string(),
            percent: stage.percent(),
        }
    }
}

/// Sending half of a progress channel
pub type ProgressSender = mpsc::UnboundedSender<ProgressEvent>;
