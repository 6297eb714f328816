//! Scenario generation for testforge
//!
//! Everything between an [`AnalysisResult`](testforge_types::AnalysisResult)
//! and a list of scenarios with attached test cases:
//!
//! - [`bridge`]: the [`ModelBridge`] contract, offline bridges and the
//!   model-keyed [`BridgeRegistry`]
//! - [`resilient`]: timeout and retry wrapper for any bridge
//! - [`prompt`]: deterministic prompt and context composition
//! - [`parser`]: lenient decoding of raw model text into scenarios
//! - [`cases`]: framework-keyed case generators
//!
//! # Example
//!
//! ```rust,ignore
//! use testforge_generator::{BridgeRegistry, JsonScenarioParser, ScenarioParser};
//!
//! let bridges = BridgeRegistry::with_defaults(ResilienceSettings::default());
//! let bridge = bridges.resolve(&ModelId::Claude)?;
//! let raw = bridge.invoke(&prompt).await?;
//! let scenarios = JsonScenarioParser::new().parse(&raw, &Framework::React);
//! ```

#![warn(unreachable_pub)]

pub mod bridge;
pub mod cases;
pub mod parser;
pub mod prompt;
pub mod resilient;

pub use bridge::{BridgeRegistry, ModelBridge, OfflineBridge};
pub use cases::{CaseGenerator, CaseGeneratorRegistry, ReactCaseGenerator, StubCaseGenerator};
pub use parser::{extract_json_candidates, JsonScenarioParser, ScenarioParser};
pub use prompt::{build_prompt, enhance_context};
pub use resilient::ResilientBridge;
