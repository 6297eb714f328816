//! Prompt and context composition
//!
//! Pure string composition with no I/O. The same analysis, context and
//! config always produce the same prompt, byte for byte.

use std::fmt::Write as _;
use testforge_types::{AnalysisResult, GenerationConfig};

/// Placeholder for empty lists
const NONE_DETECTED: &str = "none detected";

/// Caller context plus a summary of detected components
#[must_use]
pub fn enhance_context(analysis: &AnalysisResult, context: Option<&str>) -> String {
    let names: Vec<&str> = analysis.component_names().collect();
    format!(
        "{}\nDetected Components: {}",
        context.unwrap_or_default(),
        names.join(", ")
    )
}

fn join_or_none<I, S>(items: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let joined = items
        .into_iter()
        .map(|s| s.as_ref().to_string())
        .collect::<Vec<_>>()
        .join(", ");
    if joined.is_empty() {
        NONE_DETECTED.to_string()
    } else {
        joined
    }
}

/// Build the scenario-generation prompt
///
/// Embeds the analysis summary, focus areas and complexity tier. The three
/// `include*` flags and the per-category cap are passed to the model as
/// instructions only; no stage enforces them.
#[must_use]
pub fn build_prompt(analysis: &AnalysisResult, context: &str, config: &GenerationConfig) -> String {
    let mut prompt = String::new();

    // `write!` into a String cannot fail
    let _ = writeln!(
        prompt,
        "Analyze this {} application and generate comprehensive test scenarios.",
        analysis.framework
    );
    let _ = writeln!(prompt);
    let _ = writeln!(prompt, "Application Context: {}", context.trim());
    let _ = writeln!(prompt);

    let _ = writeln!(prompt, "Code Analysis:");
    let _ = writeln!(prompt, "- Components: {}", join_or_none(analysis.component_names()));
    let _ = writeln!(
        prompt,
        "- API Endpoints: {}",
        join_or_none(analysis.apis.iter().map(|a| format!("{} {}", a.method, a.path)))
    );
    let _ = writeln!(prompt, "- Routes: {}", join_or_none(&analysis.routes));
    let _ = writeln!(
        prompt,
        "- Risk Areas: {}",
        join_or_none(
            analysis
                .risk_areas
                .iter()
                .map(|r| format!("{} ({})", r.area, r.severity.as_str()))
        )
    );
    let _ = writeln!(prompt, "- Dependencies: {}", join_or_none(&analysis.dependencies));
    let _ = writeln!(prompt, "- Complexity: {}", analysis.complexity.as_str());
    let _ = writeln!(prompt);

    let mut goals = vec!["Happy path scenarios", "Integration points"];
    if config.include_edge_cases {
        goals.push("Edge cases and error handling");
    }
    if config.include_security_tests {
        goals.push("Security vulnerabilities");
    }
    if config.include_performance_tests {
        goals.push("Performance bottlenecks");
    }
    let _ = writeln!(prompt, "Generate test scenarios that cover:");
    for (i, goal) in goals.iter().enumerate() {
        let _ = writeln!(prompt, "{}. {goal}", i + 1);
    }
    let _ = writeln!(prompt);

    let _ = writeln!(prompt, "Focus on: {}", join_or_none(&config.focus_areas));
    let _ = writeln!(prompt, "Complexity Level: {}", config.complexity.as_str());
    let _ = writeln!(
        prompt,
        "Generate at most {} scenarios per category.",
        config.max_scenarios_per_category
    );

    if !config.custom_prompts.is_empty() {
        let _ = writeln!(prompt);
        let _ = writeln!(prompt, "Additional instructions:");
        for (category, text) in &config.custom_prompts {
            let _ = writeln!(prompt, "- {category}: {text}");
        }
    }

    let _ = writeln!(prompt);
    let _ = write!(
        prompt,
        "Respond with JSON of the form {{\"scenarios\": [{{\"id\", \"type\", \"category\", \
         \"title\", \"description\", \"priority\", \"confidence\", \"estimatedDuration\", \
         \"tags\", \"dependencies\"}}]}}."
    );

    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use testforge_types::{
        ApiEndpoint, ComponentInfo, ComponentKind, Framework, RiskArea, Severity,
    };

    fn analysis() -> AnalysisResult {
        let mut analysis = AnalysisResult::empty(Framework::React);
        analysis.components = vec![
            ComponentInfo::new("LoginForm", ComponentKind::Functional),
            ComponentInfo::new("Dashboard", ComponentKind::Class),
        ];
        analysis.apis = vec![ApiEndpoint::new("/auth/login", "POST")];
        analysis.risk_areas = vec![RiskArea {
            area: "Authentication".into(),
            severity: Severity::High,
            description: String::new(),
        }];
        analysis.routes = vec!["/login".into()];
        analysis
    }

    #[test]
    fn context_lists_components() {
        let enhanced = enhance_context(&analysis(), Some("Checkout flow"));
        assert_eq!(enhanced, "Checkout flow\nDetected Components: LoginForm, Dashboard");
    }

    #[test]
    fn missing_context_still_lists_components() {
        let enhanced = enhance_context(&AnalysisResult::empty(Framework::Vue), None);
        assert_eq!(enhanced, "\nDetected Components: ");
    }

    #[test]
    fn prompt_embeds_analysis_and_config() {
        let config = GenerationConfig::for_framework(Framework::React)
            .with_focus_areas(["security", "accessibility"])
            .with_custom_prompt("security", "Check for XSS");
        let prompt = build_prompt(&analysis(), "ctx", &config);

        assert!(prompt.starts_with("Analyze this react application"));
        assert!(prompt.contains("- Components: LoginForm, Dashboard\n"));
        assert!(prompt.contains("- API Endpoints: POST /auth/login\n"));
        assert!(prompt.contains("- Routes: /login\n"));
        assert!(prompt.contains("- Risk Areas: Authentication (high)\n"));
        assert!(prompt.contains("- Dependencies: none detected\n"));
        assert!(prompt.contains("Focus on: security, accessibility\n"));
        assert!(prompt.contains("Complexity Level: medium\n"));
        assert!(prompt.contains("at most 10 scenarios per category"));
        assert!(prompt.contains("- security: Check for XSS\n"));
        assert!(prompt.contains("5. Performance bottlenecks"));
    }

    #[test]
    fn disabled_flags_drop_goals() {
        let mut config = GenerationConfig::default();
        config.include_edge_cases = false;
        config.include_security_tests = false;
        config.include_performance_tests = false;
        let prompt = build_prompt(&analysis(), "", &config);

        assert!(prompt.contains("2. Integration points\n"));
        assert!(!prompt.contains("3. "));
        assert!(!prompt.contains("Additional instructions"));
    }

    #[test]
    fn prompt_is_deterministic() {
        let config = GenerationConfig::default()
            .with_custom_prompt("b", "second")
            .with_custom_prompt("a", "first");
        let first = build_prompt(&analysis(), "ctx", &config);
        let second = build_prompt(&analysis(), "ctx", &config);
        assert_eq!(first, second);
        let a = first.find("- a: first").unwrap();
        let b = first.find("- b: second").unwrap();
        assert!(a < b);
    }

    proptest! {
        #[test]
        fn prompt_names_every_component(
            names in prop::collection::vec("[A-Z][a-zA-Z]{0,12}", 0..6),
            context in "\\PC{0,40}",
        ) {
            let mut analysis = AnalysisResult::empty(Framework::React);
            analysis.components = names
                .iter()
                .map(|name| ComponentInfo::new(name.as_str(), ComponentKind::Functional))
                .collect();
            let config = GenerationConfig::default();

            let prompt = build_prompt(&analysis, &context, &config);
            prop_assert_eq!(&prompt, &build_prompt(&analysis, &context, &config));
            for name in &names {
                prop_assert!(prompt.contains(name.as_str()));
            }
        }
    }
}
