//! React case templates

use super::CaseGenerator;
use async_trait::async_trait;
use testforge_types::{
    Assertion, AssertionKind, Framework, ScenarioType, StepAction, TestCase, TestScenario,
    TestStep,
};

/// Case generator for React scenarios
///
/// - `unit` → one render smoke test
/// - `integration` → one navigate, interact, wait, verify flow
/// - `e2e` → one login journey ending on the dashboard
/// - anything else → no cases
#[derive(Debug, Clone, Copy, Default)]
pub struct ReactCaseGenerator;

impl ReactCaseGenerator {
    /// Create generator
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn unit_case(scenario: &TestScenario) -> TestCase {
        TestCase {
            id: scenario.case_id("unit_1"),
            name: "Component renders correctly".into(),
            description: "Verify component renders without crashing".into(),
            steps: vec![
                TestStep::new(StepAction::Custom, "Render component")
                    .value("render(<Component />)"),
                TestStep::new(StepAction::Verify, "Component exists").target("component"),
            ],
            assertions: vec![Assertion::new(AssertionKind::Exists, Some("component"), true)],
            setup: None,
            teardown: None,
            data: None,
        }
    }

    fn integration_case(scenario: &TestScenario) -> TestCase {
        const RESULT: &str = "[data-testid=\"result\"]";
        TestCase {
            id: scenario.case_id("integration_1"),
            name: "Component integration flow".into(),
            description: "Test component interaction with other components".into(),
            steps: vec![
                TestStep::new(StepAction::Custom, "Setup test environment"),
                TestStep::new(StepAction::Navigate, "Navigate to test page").target("/test-page"),
                TestStep::new(StepAction::Click, "Click submit button")
                    .target("[data-testid=\"submit-btn\"]"),
                TestStep::new(StepAction::Wait, "Wait for response").value(1000),
                TestStep::new(StepAction::Verify, "Verify result displayed").target(RESULT),
            ],
            assertions: vec![
                Assertion::new(AssertionKind::Visible, Some(RESULT), true),
                Assertion::new(AssertionKind::TextContains, Some(RESULT), "Success"),
            ],
            setup: None,
            teardown: None,
            data: None,
        }
    }

    fn e2e_case(scenario: &TestScenario) -> TestCase {
        TestCase {
            id: scenario.case_id("e2e_1"),
            name: "End-to-end user flow".into(),
            description: "Complete user journey through the application".into(),
            steps: vec![
                TestStep::new(StepAction::Navigate, "Visit homepage").target("/"),
                TestStep::new(StepAction::Click, "Click login")
                    .target("[data-testid=\"login-btn\"]"),
                TestStep::new(StepAction::Type, "Enter email")
                    .target("[name=\"email\"]")
                    .value("test@example.com"),
                TestStep::new(StepAction::Type, "Enter password")
                    .target("[name=\"password\"]")
                    .value("password123"),
                TestStep::new(StepAction::Click, "Submit form").target("[type=\"submit\"]"),
                TestStep::new(StepAction::Wait, "Wait for redirect").value(2000),
                TestStep::new(StepAction::Verify, "Verify dashboard loads")
                    .target("[data-testid=\"dashboard\"]"),
            ],
            assertions: vec![
                Assertion::new(AssertionKind::UrlContains, None, "/dashboard"),
                Assertion::new(AssertionKind::Visible, Some("[data-testid=\"user-menu\"]"), true),
            ],
            setup: None,
            teardown: None,
            data: None,
        }
    }
}

#[async_trait]
impl CaseGenerator for ReactCaseGenerator {
    fn framework(&self) -> Framework {
        Framework::React
    }

    async fn generate_test_cases(&self, scenario: &TestScenario) -> Vec<TestCase> {
        match scenario.kind {
            ScenarioType::Unit => vec![Self::unit_case(scenario)],
            ScenarioType::Integration => vec![Self::integration_case(scenario)],
            ScenarioType::E2e => vec![Self::e2e_case(scenario)],
            _ => Vec::new(),
        }
    }
}
