//! React extraction variant
//!
//! Independent regex heuristics over the raw source. Nothing here parses
//! JSX or JavaScript; the extractor only needs to be deterministic and to
//! degrade to empty collections on anything it does not recognize.

use crate::analyzer::{score_complexity, CodeAnalyzer};
use crate::risk::{identify_risk_areas, DEFAULT_RISK_RULES};
use once_cell::sync::Lazy;
use regex::Regex;
use testforge_types::{
    AnalysisResult, ApiEndpoint, CodePattern, ComponentInfo, ComponentKind, Framework,
};
use tracing::trace;

static COMPONENT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:function|const)\s+([A-Z][a-zA-Z0-9]*)\s*(?:\(|=)").expect("valid regex")
});

static CLASS_COMPONENT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"class\s+([A-Z][a-zA-Z0-9]*)\s+extends\s+(?:React\.)?(?:Pure)?Component\b")
        .expect("valid regex")
});

static HOOK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\buse[A-Z][a-zA-Z0-9]*").expect("valid regex"));

static ROUTE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"<Route[^>]*path=["']([^"']+)["']"#).expect("valid regex"));

static API_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?:fetch|axios\.(?:get|post|put|delete))\s*\(\s*["'`]([^"'`]+)["'`]"#)
        .expect("valid regex")
});

static IMPORT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"\bimport\b[^;]*?\bfrom\s+["']([^"']+)["']"#).expect("valid regex")
});

/// Recognized idioms: (identifier, pattern name)
const IDIOMS: &[(&str, &str)] = &[
    ("useState", "State Management"),
    ("useEffect", "Side Effects"),
    ("useContext", "Context Consumption"),
    ("useReducer", "Reducer State"),
];

/// Full-featured analyzer for React sources
#[derive(Debug, Clone, Copy, Default)]
pub struct ReactAnalyzer;

impl ReactAnalyzer {
    /// Create analyzer
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Function, arrow and class components in source order
    fn extract_components(source: &str) -> Vec<ComponentInfo> {
        let functional = COMPONENT_RE
            .captures_iter(source)
            .filter_map(|c| c.get(1))
            .map(|m| (m.start(), m.as_str(), ComponentKind::Functional));
        let classes = CLASS_COMPONENT_RE
            .captures_iter(source)
            .filter_map(|c| c.get(1))
            .map(|m| (m.start(), m.as_str(), ComponentKind::Class));

        let mut found: Vec<_> = functional.chain(classes).collect();
        found.sort_by_key(|(offset, _, _)| *offset);
        found
            .into_iter()
            .map(|(_, name, kind)| ComponentInfo::new(name, kind))
            .collect()
    }

    /// Unique idiom identifiers, first-seen order
    fn extract_idioms(source: &str) -> Vec<&str> {
        let mut idioms: Vec<&str> = Vec::new();
        for m in HOOK_RE.find_iter(source) {
            if !idioms.contains(&m.as_str()) {
                idioms.push(m.as_str());
            }
        }
        idioms
    }

    fn extract_routes(source: &str) -> Vec<String> {
        ROUTE_RE
            .captures_iter(source)
            .filter_map(|c| c.get(1))
            .map(|m| m.as_str().to_string())
            .collect()
    }

    fn extract_apis(source: &str) -> Vec<ApiEndpoint> {
        API_RE
            .captures_iter(source)
            .filter_map(|c| {
                let call = c.get(0)?.as_str();
                let path = c.get(1)?.as_str();
                Some(ApiEndpoint::new(path, infer_method(call)))
            })
            .collect()
    }

    fn extract_dependencies(source: &str) -> Vec<String> {
        let mut deps: Vec<String> = Vec::new();
        for module in IMPORT_RE.captures_iter(source).filter_map(|c| c.get(1)) {
            let module = module.as_str();
            if module.starts_with('.') || deps.iter().any(|d| d == module) {
                continue;
            }
            deps.push(module.to_string());
        }
        deps
    }

    fn identify_patterns(source: &str) -> Vec<CodePattern> {
        IDIOMS
            .iter()
            .filter_map(|(ident, name)| {
                let frequency = source.matches(ident).count();
                (frequency > 0).then(|| CodePattern {
                    name: (*name).to_string(),
                    kind: "hook".to_string(),
                    frequency,
                })
            })
            .collect()
    }
}

/// HTTP method from call-site shape
fn infer_method(call: &str) -> &'static str {
    if call.contains(".post") {
        "POST"
    } else if call.contains(".put") {
        "PUT"
    } else if call.contains(".delete") {
        "DELETE"
    } else {
        "GET"
    }
}

impl CodeAnalyzer for ReactAnalyzer {
    fn framework(&self) -> Framework {
        Framework::React
    }

    fn analyze_code(&self, source: &str) -> AnalysisResult {
        let components = Self::extract_components(source);
        let idioms = Self::extract_idioms(source);
        let apis = Self::extract_apis(source);

        trace!(
            components = components.len(),
            idioms = idioms.len(),
            apis = apis.len(),
            "react source scanned"
        );

        let mut result = AnalysisResult::empty(Framework::React);
        result.risk_areas = identify_risk_areas(&components, &apis, DEFAULT_RISK_RULES);
        result.complexity = score_complexity(components.len(), idioms.len());
        result.dependencies = Self::extract_dependencies(source);
        result.routes = Self::extract_routes(source);
        result.patterns = Self::identify_patterns(source);
        result.components = components;
        result.apis = apis;
        result
    }
}
