//! Scenarios and their test cases
//!
//! A [`TestScenario`] owns its [`TestCase`]s. Every case id starts with the
//! owning scenario id followed by `_`; validation uses this to re-associate
//! cases with scenarios.

use crate::key::Framework;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// Kind of test a scenario describes
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ScenarioType {
    /// Unit test
    Unit,
    /// Integration test
    Integration,
    /// End-to-end test
    E2e,
    /// API test
    Api,
    /// Performance test
    Performance,
    /// Security test
    Security,
    /// Anything else a model produced
    Other(String),
}

impl ScenarioType {
    /// Lowercase name
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            ScenarioType::Unit => "unit",
            ScenarioType::Integration => "integration",
            ScenarioType::E2e => "e2e",
            ScenarioType::Api => "api",
            ScenarioType::Performance => "performance",
            ScenarioType::Security => "security",
            ScenarioType::Other(name) => name,
        }
    }
}

impl From<String> for ScenarioType {
    fn from(value: String) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "unit" => ScenarioType::Unit,
            "integration" => ScenarioType::Integration,
            "e2e" | "end-to-end" | "end_to_end" => ScenarioType::E2e,
            "api" => ScenarioType::Api,
            "performance" => ScenarioType::Performance,
            "security" => ScenarioType::Security,
            _ => ScenarioType::Other(value),
        }
    }
}

impl From<ScenarioType> for String {
    fn from(value: ScenarioType) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for ScenarioType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Scenario priority
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Low
    Low,
    /// Medium
    #[default]
    Medium,
    /// High
    High,
    /// Critical
    Critical,
}

impl Priority {
    /// Ordering rank: critical=4, high=3, medium=2, low=1
    #[inline]
    #[must_use]
    pub fn rank(self) -> u8 {
        match self {
            Priority::Critical => 4,
            Priority::High => 3,
            Priority::Medium => 2,
            Priority::Low => 1,
        }
    }
}

/// Coverage claim for one area
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverageArea {
    /// Area label
    pub area: String,
    /// Claimed coverage percentage
    #[serde(default)]
    pub percentage: f64,
}

/// A grouped, prioritized unit of test intent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestScenario {
    /// Stable id, prefix of every owned case id
    pub id: String,
    /// Test kind
    #[serde(rename = "type")]
    pub kind: ScenarioType,
    /// Category label
    #[serde(default)]
    pub category: String,
    /// Short title
    pub title: String,
    /// Longer description
    #[serde(default)]
    pub description: String,
    /// Priority
    #[serde(default)]
    pub priority: Priority,
    /// Model confidence, 0-100
    #[serde(default)]
    pub confidence: u8,
    /// Estimated run time in minutes
    #[serde(
        default,
        rename = "estimatedDuration",
        alias = "estimatedDurationMinutes",
        skip_serializing_if = "Option::is_none"
    )]
    pub estimated_duration_minutes: Option<u32>,
    /// Framework the scenario targets
    pub framework: Framework,
    /// Owned test cases
    #[serde(default)]
    pub test_cases: Vec<TestCase>,
    /// Coverage claims
    #[serde(default)]
    pub coverage: Vec<CoverageArea>,
    /// Free-form tags
    #[serde(default)]
    pub tags: Vec<String>,
    /// Ids of scenarios that must run first
    #[serde(default)]
    pub dependencies: Vec<String>,
}

impl TestScenario {
    /// Create a scenario with defaults for the optional fields
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        kind: ScenarioType,
        title: impl Into<String>,
        framework: Framework,
    ) -> Self {
        Self {
            id: id.into(),
            kind,
            category: String::new(),
            title: title.into(),
            description: String::new(),
            priority: Priority::Medium,
            confidence: 0,
            estimated_duration_minutes: None,
            framework,
            test_cases: Vec::new(),
            coverage: Vec::new(),
            tags: Vec::new(),
            dependencies: Vec::new(),
        }
    }

    /// With category
    #[inline]
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// With priority
    #[inline]
    #[must_use]
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// With confidence, clamped to 0-100
    #[inline]
    #[must_use]
    pub fn with_confidence(mut self, confidence: u8) -> Self {
        self.confidence = confidence.min(100);
        self
    }

    /// With estimated duration
    #[inline]
    #[must_use]
    pub fn with_duration(mut self, minutes: u32) -> Self {
        self.estimated_duration_minutes = Some(minutes);
        self
    }

    /// Depends on another scenario
    #[inline]
    #[must_use]
    pub fn depends_on(mut self, id: impl Into<String>) -> Self {
        self.dependencies.push(id.into());
        self
    }

    /// Duration used for totals and budgets; absent or zero counts as 1
    #[inline]
    #[must_use]
    pub fn effective_duration(&self) -> u32 {
        match self.estimated_duration_minutes {
            Some(minutes) if minutes > 0 => minutes,
            _ => 1,
        }
    }

    /// Check whether a case id belongs to this scenario
    #[inline]
    #[must_use]
    pub fn owns_case_id(&self, case_id: &str) -> bool {
        case_id
            .strip_prefix(self.id.as_str())
            .is_some_and(|rest| rest.starts_with('_'))
    }

    /// Case id for this scenario with the given suffix
    #[inline]
    #[must_use]
    pub fn case_id(&self, suffix: &str) -> String {
        format!("{}_{}", self.id, suffix)
    }
}

/// One concrete, steppable test
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestCase {
    /// Id, prefixed with the owning scenario id
    pub id: String,
    /// Name
    pub name: String,
    /// Description
    #[serde(default)]
    pub description: String,
    /// Ordered steps
    #[serde(default)]
    pub steps: Vec<TestStep>,
    /// Checks
    #[serde(default)]
    pub assertions: Vec<Assertion>,
    /// Setup snippet
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub setup: Option<String>,
    /// Teardown snippet
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub teardown: Option<String>,
    /// Test data
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<BTreeMap<String, Value>>,
}

/// Step action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepAction {
    /// Navigate to a URL
    Navigate,
    /// Click an element
    Click,
    /// Type into an element
    Type,
    /// Wait
    Wait,
    /// Call an API
    ApiCall,
    /// Verify a condition
    Verify,
    /// Framework-specific action
    Custom,
}

/// One atomic action
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestStep {
    /// Action
    pub action: StepAction,
    /// Target selector or URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    /// Action argument
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    /// Description
    pub description: String,
}

impl TestStep {
    /// Create a step with only an action and description
    #[inline]
    #[must_use]
    pub fn new(action: StepAction, description: impl Into<String>) -> Self {
        Self {
            action,
            target: None,
            value: None,
            description: description.into(),
        }
    }

    /// With target
    #[inline]
    #[must_use]
    pub fn target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    /// With value
    #[inline]
    #[must_use]
    pub fn value(mut self, value: impl Into<Value>) -> Self {
        self.value = Some(value.into());
        self
    }
}

/// Assertion kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssertionKind {
    /// Element exists
    Exists,
    /// Element is visible
    Visible,
    /// Element text contains the expected value
    TextContains,
    /// URL contains the expected value
    UrlContains,
    /// Value equals the expected value
    Equals,
}

/// One pass/fail check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assertion {
    /// Kind
    #[serde(rename = "type")]
    pub kind: AssertionKind,
    /// Target selector
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    /// Expected value
    pub expected: Value,
}

impl Assertion {
    /// Create an assertion
    #[inline]
    #[must_use]
    pub fn new(kind: AssertionKind, target: Option<&str>, expected: impl Into<Value>) -> Self {
        Self {
            kind,
            target: target.map(str::to_string),
            expected: expected.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn priority_rank() {
        assert_eq!(Priority::Critical.rank(), 4);
        assert_eq!(Priority::High.rank(), 3);
        assert_eq!(Priority::Medium.rank(), 2);
        assert_eq!(Priority::Low.rank(), 1);
    }

    #[test]
    fn scenario_type_unknown_preserved() {
        let kind = ScenarioType::from("smoke".to_string());
        assert_eq!(kind, ScenarioType::Other("smoke".into()));
        assert_eq!(String::from(kind), "smoke");
        assert_eq!(ScenarioType::from("E2E".to_string()), ScenarioType::E2e);
    }

    #[test]
    fn effective_duration_defaults_to_one() {
        let s = TestScenario::new("s1", ScenarioType::Unit, "t", Framework::React);
        assert_eq!(s.effective_duration(), 1);
        assert_eq!(s.clone().with_duration(0).effective_duration(), 1);
        assert_eq!(s.with_duration(7).effective_duration(), 7);
    }

    #[test]
    fn owns_case_id_requires_separator() {
        let s = TestScenario::new("login", ScenarioType::Unit, "t", Framework::React);
        assert!(s.owns_case_id("login_unit_1"));
        assert!(!s.owns_case_id("login"));
        assert!(!s.owns_case_id("loginx_unit_1"));
        assert!(!s.owns_case_id("other_unit_1"));
        assert_eq!(s.case_id("unit_1"), "login_unit_1");
    }

    #[test]
    fn scenario_decodes_model_shape() {
        let json = r#"{
            "id": "s1",
            "type": "integration",
            "category": "auth",
            "title": "Login flow",
            "priority": "high",
            "confidence": 80,
            "estimatedDuration": 5,
            "framework": "react"
        }"#;
        let s: TestScenario = serde_json::from_str(json).unwrap();
        assert_eq!(s.kind, ScenarioType::Integration);
        assert_eq!(s.priority, Priority::High);
        assert_eq!(s.estimated_duration_minutes, Some(5));
        assert!(s.test_cases.is_empty());
    }

    #[test]
    fn step_serializes_snake_case_action() {
        let step = TestStep::new(StepAction::ApiCall, "call").target("/api");
        let json = serde_json::to_value(&step).unwrap();
        assert_eq!(json["action"], "api_call");
        assert!(json.get("value").is_none());
    }
}
