//! Engine registries
//!
//! Built once, cloned into each engine. Plugins install into a copy, so an
//! engine's registries never change after construction.

use std::sync::Arc;
use testforge_analyzer::AnalyzerRegistry;
use testforge_generator::{
    BridgeRegistry, CaseGeneratorRegistry, JsonScenarioParser, ScenarioParser,
};
use testforge_types::{Framework, ModelId, ResilienceSettings};

/// Everything an engine resolves from
#[derive(Debug, Clone)]
pub struct Registries {
    /// Framework → analyzer
    pub analyzers: AnalyzerRegistry,
    /// Framework → case generator
    pub generators: CaseGeneratorRegistry,
    /// Model id → bridge
    pub bridges: BridgeRegistry,
    /// Raw model text → scenarios
    pub parser: Arc<dyn ScenarioParser>,
}

impl Registries {
    /// Builtin analyzers, generators and bridges with the JSON parser
    #[must_use]
    pub fn with_defaults(resilience: ResilienceSettings) -> Self {
        Self {
            analyzers: AnalyzerRegistry::with_defaults(),
            generators: CaseGeneratorRegistry::with_defaults(),
            bridges: BridgeRegistry::with_defaults(resilience),
            parser: Arc::new(JsonScenarioParser::new()),
        }
    }

    /// Frameworks an engine can be built for
    #[inline]
    #[must_use]
    pub fn frameworks(&self) -> Vec<Framework> {
        self.analyzers.frameworks()
    }

    /// Models an engine can be built for
    #[inline]
    #[must_use]
    pub fn models(&self) -> Vec<ModelId> {
        self.bridges.models()
    }
}

impl Default for Registries {
    fn default() -> Self {
        Self::with_defaults(ResilienceSettings::default())
    }
}
