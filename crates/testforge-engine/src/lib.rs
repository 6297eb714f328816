//! testforge engine
//!
//! Orchestrates the generation pipeline:
//! - Resolves an analyzer and a model bridge at construction
//! - Runs analysis, prompting, case generation, optimization and validation
//! - Reports stage progress over a channel
//! - Folds every stage error into a failed [`GenerationResult`]
//!
//! # Example
//!
//! ```rust,ignore
//! use testforge_engine::{EngineFactory, TestGenerationService};
//! use testforge_types::GenerationConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut service = TestGenerationService::new();
//! service.initialize(GenerationConfig::for_framework("react"))?;
//!
//! let result = service
//!     .generate_tests("function LoginForm() { fetch('/auth/login') }", None, None)
//!     .await;
//! println!("{} scenarios", result.scenarios.len());
//! # Ok(())
//! # }
//! ```
//!
//! [`GenerationResult`]: testforge_types::GenerationResult

#![warn(unreachable_pub)]

pub mod engine;
pub mod error;
pub mod factory;
pub mod metadata;
pub mod plugin;
pub mod registry;
pub mod service;
pub mod validate;

pub use engine::{CodebaseInput, TestEngine};
pub use error::EngineError;
pub use factory::EngineFactory;
pub use metadata::{coverage_percent, total_duration};
pub use plugin::{BridgePlugin, FrameworkPlugin, TestPlugin};
pub use registry::Registries;
pub use service::{CodeInput, SourceFile, TestGenerationService};
pub use validate::{validate, Validated};
