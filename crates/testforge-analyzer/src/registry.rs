//! Framework → analyzer lookup
//!
//! Built once with every builtin framework registered, then handed to the
//! engine. Only `Framework::Custom` keys can be missing, and only until a
//! plugin registers them.

use crate::analyzer::CodeAnalyzer;
use crate::react::ReactAnalyzer;
use crate::stub::StubAnalyzer;
use std::collections::HashMap;
use std::sync::Arc;
use testforge_types::{ConfigError, Framework};

/// Registry of analyzers keyed by framework
#[derive(Debug, Default, Clone)]
pub struct AnalyzerRegistry {
    analyzers: HashMap<Framework, Arc<dyn CodeAnalyzer>>,
}

impl AnalyzerRegistry {
    /// Create new empty registry
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            analyzers: HashMap::new(),
        }
    }

    /// Create registry with every builtin framework
    ///
    /// React gets the full extractor, the rest get stubs.
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        for framework in Framework::BUILTIN {
            match framework {
                Framework::React => registry.register(Arc::new(ReactAnalyzer::new())),
                other => registry.register(Arc::new(StubAnalyzer::new(other))),
            }
        }
        registry
    }

    /// Register an analyzer under its own framework, replacing any previous one
    pub fn register(&mut self, analyzer: Arc<dyn CodeAnalyzer>) {
        self.analyzers.insert(analyzer.framework(), analyzer);
    }

    /// Look up the analyzer for a framework
    ///
    /// # Errors
    /// [`ConfigError::UnsupportedFramework`] if nothing is registered.
    pub fn resolve(&self, framework: &Framework) -> Result<Arc<dyn CodeAnalyzer>, ConfigError> {
        self.analyzers
            .get(framework)
            .cloned()
            .ok_or_else(|| ConfigError::UnsupportedFramework(framework.clone()))
    }

    /// Check if framework is registered
    #[inline]
    #[must_use]
    pub fn contains(&self, framework: &Framework) -> bool {
        self.analyzers.contains_key(framework)
    }

    /// Registered frameworks, sorted
    #[must_use]
    pub fn frameworks(&self) -> Vec<Framework> {
        let mut frameworks: Vec<_> = self.analyzers.keys().cloned().collect();
        frameworks.sort();
        frameworks
    }

    /// Get number of registered analyzers
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.analyzers.len()
    }

    /// Check if registry is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.analyzers.is_empty()
    }
}
