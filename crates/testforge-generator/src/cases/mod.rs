//! Framework-keyed case generators
//!
//! A generator expands one scenario into ordered, assertable test cases.
//! Every case id it produces is `<scenario id>_<suffix>`. Scenario types a
//! generator does not handle produce an empty list, not an error.

mod react;
mod stub;

pub use react::ReactCaseGenerator;
pub use stub::StubCaseGenerator;

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use testforge_types::{Framework, TestCase, TestScenario};

/// Expands scenarios into test cases
///
/// Implementations read only the scenario they are given; the engine runs
/// them concurrently across scenarios.
#[async_trait]
pub trait CaseGenerator: Send + Sync + std::fmt::Debug {
    /// Framework this generator is registered under
    fn framework(&self) -> Framework;

    /// Cases for one scenario
    async fn generate_test_cases(&self, scenario: &TestScenario) -> Vec<TestCase>;
}

/// Registry of case generators keyed by framework
#[derive(Debug, Default, Clone)]
pub struct CaseGeneratorRegistry {
    generators: HashMap<Framework, Arc<dyn CaseGenerator>>,
}

impl CaseGeneratorRegistry {
    /// Create new empty registry
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            generators: HashMap::new(),
        }
    }

    /// Create registry with the builtin generators
    ///
    /// React gets the full generator; Vue and Angular get stubs. Node.js and
    /// Python have none.
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(ReactCaseGenerator::new()));
        registry.register(Arc::new(StubCaseGenerator::new(Framework::Vue)));
        registry.register(Arc::new(StubCaseGenerator::new(Framework::Angular)));
        registry
    }

    /// Register a generator under its own framework, replacing any previous one
    pub fn register(&mut self, generator: Arc<dyn CaseGenerator>) {
        self.generators.insert(generator.framework(), generator);
    }

    /// Generator for a framework, if any
    #[inline]
    #[must_use]
    pub fn get(&self, framework: &Framework) -> Option<Arc<dyn CaseGenerator>> {
        self.generators.get(framework).cloned()
    }

    /// Check if framework has a generator
    #[inline]
    #[must_use]
    pub fn contains(&self, framework: &Framework) -> bool {
        self.generators.contains_key(framework)
    }

    /// Frameworks with a generator, sorted
    #[must_use]
    pub fn frameworks(&self) -> Vec<Framework> {
        let mut frameworks: Vec<_> = self.generators.keys().cloned().collect();
        frameworks.sort();
        frameworks
    }

    /// Get number of registered generators
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.generators.len()
    }

    /// Check if registry is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.generators.is_empty()
    }
}
