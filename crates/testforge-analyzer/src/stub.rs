//! Minimal analyzers for frameworks without a full extractor

use crate::analyzer::CodeAnalyzer;
use testforge_types::{AnalysisResult, Framework};

/// Returns an empty but well-formed result for its framework
///
/// `analyze_structure` uses the trait default, so structural input still
/// passes through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StubAnalyzer {
    framework: Framework,
}

impl StubAnalyzer {
    /// Create stub for a framework
    #[inline]
    #[must_use]
    pub fn new(framework: Framework) -> Self {
        Self { framework }
    }
}

impl CodeAnalyzer for StubAnalyzer {
    fn framework(&self) -> Framework {
        self.framework.clone()
    }

    fn analyze_code(&self, _source: &str) -> AnalysisResult {
        AnalysisResult::empty(self.framework.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use testforge_types::{CodebaseInfo, ComplexityLevel, ComponentInfo, ComponentKind};

    #[test]
    fn code_analysis_is_empty() {
        let analyzer = StubAnalyzer::new(Framework::Vue);
        let result = analyzer.analyze_code("export default { name: 'LoginForm' }");
        assert_eq!(result, AnalysisResult::empty(Framework::Vue));
        assert_eq!(result.complexity, ComplexityLevel::Medium);
    }

    #[test]
    fn structure_still_passes_through() {
        let analyzer = StubAnalyzer::new(Framework::Python);
        let info = CodebaseInfo {
            components: vec![ComponentInfo::new("Worker", ComponentKind::Class)],
            ..CodebaseInfo::default()
        };
        let result = analyzer.analyze_structure(&info);
        assert_eq!(result.framework, Framework::Python);
        assert_eq!(result.components.len(), 1);
    }
}
