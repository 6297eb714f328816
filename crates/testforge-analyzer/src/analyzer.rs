//! Analyzer trait and shared scoring

use crate::risk::{identify_risk_areas, DEFAULT_RISK_RULES};
use testforge_types::{AnalysisResult, CodebaseInfo, ComplexityLevel, Framework};

/// Static analyzer for one framework
///
/// Implement this trait to add support for new frameworks. Implementations
/// must be deterministic: the same input yields the same result.
pub trait CodeAnalyzer: Send + Sync + std::fmt::Debug {
    /// Framework this analyzer is registered under
    fn framework(&self) -> Framework;

    /// Analyze raw source text
    fn analyze_code(&self, source: &str) -> AnalysisResult;

    /// Analyze pre-extracted structure
    ///
    /// The default passes components, endpoints and dependencies through,
    /// applies the default risk rules and rates complexity as medium.
    fn analyze_structure(&self, info: &CodebaseInfo) -> AnalysisResult {
        let mut dependencies: Vec<String> = Vec::with_capacity(info.dependencies.len());
        for dep in &info.dependencies {
            if !dependencies.contains(dep) {
                dependencies.push(dep.clone());
            }
        }

        let mut result = AnalysisResult::empty(self.framework());
        result.risk_areas = identify_risk_areas(&info.components, &info.apis, DEFAULT_RISK_RULES);
        result.components.clone_from(&info.components);
        result.apis.clone_from(&info.apis);
        result.dependencies = dependencies;
        result.complexity = ComplexityLevel::Medium;
        result
    }
}

/// Rate complexity from component and unique idiom counts
///
/// `score = components + 0.5 * idioms`; below 10 is low, below 25 medium,
/// otherwise high. Computed on doubled integers to stay exact.
#[inline]
#[must_use]
pub fn score_complexity(components: usize, unique_idioms: usize) -> ComplexityLevel {
    let doubled = components.saturating_mul(2).saturating_add(unique_idioms);
    if doubled < 20 {
        ComplexityLevel::Low
    } else if doubled < 50 {
        ComplexityLevel::Medium
    } else {
        ComplexityLevel::High
    }
}
