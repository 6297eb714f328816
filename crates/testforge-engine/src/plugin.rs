//! Plugin registration
//!
//! A plugin installs analyzers, case generators or bridges into a copy of
//! an engine's registries. [`TestEngine::with_plugin`](crate::TestEngine::with_plugin)
//! then builds a new engine from that copy; the original engine is untouched.

use crate::registry::Registries;
use std::sync::Arc;
use testforge_analyzer::CodeAnalyzer;
use testforge_generator::{CaseGenerator, ModelBridge};

/// Extension installed into engine registries
pub trait TestPlugin: Send + Sync + std::fmt::Debug {
    /// Plugin name
    fn name(&self) -> &str;

    /// Plugin version
    fn version(&self) -> &str;

    /// Register components
    fn install(&self, registries: &mut Registries);
}

/// Adds an analyzer and optionally a case generator for one framework
///
/// Typically used for a [`Framework::Custom`](testforge_types::Framework::Custom)
/// key; registering a builtin framework replaces the builtin analyzer.
#[derive(Debug, Clone)]
pub struct FrameworkPlugin {
    name: String,
    version: String,
    analyzer: Arc<dyn CodeAnalyzer>,
    generator: Option<Arc<dyn CaseGenerator>>,
}

impl FrameworkPlugin {
    /// Create plugin named after the analyzer's framework
    #[must_use]
    pub fn new(analyzer: Arc<dyn CodeAnalyzer>) -> Self {
        Self {
            name: format!("{}-framework", analyzer.framework()),
            version: "1.0.0".to_string(),
            analyzer,
            generator: None,
        }
    }

    /// With case generator
    #[inline]
    #[must_use]
    pub fn with_generator(mut self, generator: Arc<dyn CaseGenerator>) -> Self {
        self.generator = Some(generator);
        self
    }

    /// With version
    #[inline]
    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }
}

impl TestPlugin for FrameworkPlugin {
    fn name(&self) -> &str {
        &self.name
    }

    fn version(&self) -> &str {
        &self.version
    }

    fn install(&self, registries: &mut Registries) {
        registries.analyzers.register(Arc::clone(&self.analyzer));
        if let Some(generator) = &self.generator {
            registries.generators.register(Arc::clone(generator));
        }
    }
}

/// Adds a model bridge, typically for a `ModelId::Other` key
#[derive(Debug, Clone)]
pub struct BridgePlugin {
    name: String,
    bridge: Arc<dyn ModelBridge>,
}

impl BridgePlugin {
    /// Create plugin named after the bridge's model
    #[must_use]
    pub fn new(bridge: Arc<dyn ModelBridge>) -> Self {
        Self {
            name: format!("{}-bridge", bridge.model()),
            bridge,
        }
    }
}

impl TestPlugin for BridgePlugin {
    fn name(&self) -> &str {
        &self.name
    }

    fn version(&self) -> &str {
        "1.0.0"
    }

    fn install(&self, registries: &mut Registries) {
        registries.bridges.register(Arc::clone(&self.bridge));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use testforge_analyzer::StubAnalyzer;
    use testforge_generator::{OfflineBridge, StubCaseGenerator};
    use testforge_types::{Framework, ModelId};

    #[test]
    fn framework_plugin_installs_both() {
        let svelte = Framework::Custom("svelte".into());
        let plugin = FrameworkPlugin::new(Arc::new(StubAnalyzer::new(svelte.clone())))
            .with_generator(Arc::new(StubCaseGenerator::new(svelte.clone())))
            .with_version("0.2.0");
        assert_eq!(plugin.name(), "svelte-framework");
        assert_eq!(plugin.version(), "0.2.0");

        let mut registries = Registries::default();
        plugin.install(&mut registries);
        assert!(registries.analyzers.contains(&svelte));
        assert!(registries.generators.contains(&svelte));
    }

    #[test]
    fn bridge_plugin_installs_bridge() {
        let model = ModelId::Other("mistral".into());
        let plugin = BridgePlugin::new(Arc::new(OfflineBridge::new(model.clone())));
        assert_eq!(plugin.name(), "mistral-bridge");

        let mut registries = Registries::default();
        plugin.install(&mut registries);
        assert!(registries.bridges.contains(&model));
    }
}
