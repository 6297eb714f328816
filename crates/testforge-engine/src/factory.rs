//! Engine construction from framework defaults

use crate::engine::TestEngine;
use crate::registry::Registries;
use testforge_types::{ConfigError, ConfigOverrides, Framework, GenerationConfig, ModelId};

/// Builds engines from full or partial configuration
#[derive(Debug, Clone, Copy, Default)]
pub struct EngineFactory;

impl EngineFactory {
    /// Factory defaults for a framework
    #[inline]
    #[must_use]
    pub fn default_config(framework: impl Into<Framework>) -> GenerationConfig {
        GenerationConfig::for_framework(framework)
    }

    /// Engine for a full config
    ///
    /// # Errors
    /// [`ConfigError`] if the framework or model is not registered.
    pub fn create(config: GenerationConfig) -> Result<TestEngine, ConfigError> {
        TestEngine::new(config)
    }

    /// Engine for a framework's defaults with overrides applied
    ///
    /// # Errors
    /// As [`EngineFactory::create`].
    pub fn create_for_framework(
        framework: impl Into<Framework>,
        overrides: &ConfigOverrides,
    ) -> Result<TestEngine, ConfigError> {
        Self::create(Self::default_config(framework).merged(overrides))
    }

    /// Frameworks the builtin registries support
    #[must_use]
    pub fn supported_frameworks() -> Vec<Framework> {
        Registries::default().frameworks()
    }

    /// Models the builtin registries support
    #[must_use]
    pub fn supported_models() -> Vec<ModelId> {
        Registries::default().models()
    }
}
