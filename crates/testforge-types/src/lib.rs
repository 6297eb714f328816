//! testforge shared types
//!
//! The data model that flows through the generation pipeline:
//! - Analysis records produced by analyzers
//! - Scenarios, test cases, steps and assertions
//! - Generation configuration and the framework/model keys
//! - Pipeline results, metadata and progress events
//! - Error types shared by every layer
//!
//! All records serialize with camelCase keys so a [`GenerationResult`] can be
//! handed to a caller as JSON without further mapping.

#![warn(unreachable_pub)]

pub mod analysis;
pub mod config;
pub mod error;
pub mod key;
pub mod progress;
pub mod result;
pub mod scenario;

pub use analysis::{
    AnalysisResult, ApiEndpoint, CodePattern, CodebaseInfo, ComplexityLevel, ComponentInfo,
    ComponentKind, FileKind, FileStructure, Parameter, RiskArea, SecurityLevel, Severity,
};
pub use config::{ComplexityTier, ConfigOverrides, GenerationConfig, ResilienceSettings};
pub use error::{BridgeError, ConfigError};
pub use key::{Framework, ModelId};
pub use progress::{PipelineStage, ProgressEvent, ProgressSender};
pub use result::{GenerationMetadata, GenerationResult, RunId};
pub use scenario::{
    Assertion, AssertionKind, CoverageArea, Priority, ScenarioType, StepAction, TestCase,
    TestScenario, TestStep,
};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with testforge types
    pub use crate::{
        AnalysisResult, BridgeError, ConfigError, Framework, GenerationConfig, GenerationResult,
        ModelId, Priority, ScenarioType, TestCase, TestScenario,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
