//! Generators that register a framework without templates yet

use super::CaseGenerator;
use async_trait::async_trait;
use testforge_types::{Framework, TestCase, TestScenario};

/// Produces no cases; scenarios pass through with an empty case list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StubCaseGenerator {
    framework: Framework,
}

impl StubCaseGenerator {
    /// Create stub for a framework
    #[inline]
    #[must_use]
    pub fn new(framework: Framework) -> Self {
        Self { framework }
    }
}

#[async_trait]
impl CaseGenerator for StubCaseGenerator {
    fn framework(&self) -> Framework {
        self.framework.clone()
    }

    async fn generate_test_cases(&self, _scenario: &TestScenario) -> Vec<TestCase> {
        Vec::new()
    }
}
