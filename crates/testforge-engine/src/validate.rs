//! Case re-association
//!
//! Every case id must read `<scenarioId>_...`. A case stays with the scenario
//! that holds it whenever that scenario owns its id. Any other case moves to
//! the scenario with the longest owning id, so a stray `login_2_unit_1` lands
//! on `login_2` even when `login` is also present. Cases without an owner are
//! dropped; scenarios left with no cases are kept and reported.

use testforge_types::{TestCase, TestScenario};
use tracing::warn;

/// Validation output
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Validated {
    /// Scenarios with re-associated cases, order unchanged
    pub scenarios: Vec<TestScenario>,
    /// Non-fatal findings
    pub warnings: Vec<String>,
}

/// Index of the scenario owning a stray `case_id`, preferring the longest id
fn owner_of(scenarios: &[TestScenario], case_id: &str) -> Option<usize> {
    scenarios
        .iter()
        .enumerate()
        .filter(|(_, s)| s.owns_case_id(case_id))
        .max_by_key(|(_, s)| s.id.len())
        .map(|(i, _)| i)
}

/// Re-associate cases and collect warnings
#[must_use]
pub fn validate(mut scenarios: Vec<TestScenario>) -> Validated {
    let mut stray: Vec<TestCase> = Vec::new();
    for scenario in &mut scenarios {
        let (owned, foreign): (Vec<_>, Vec<_>) = std::mem::take(&mut scenario.test_cases)
            .into_iter()
            .partition(|case| scenario.owns_case_id(&case.id));
        scenario.test_cases = owned;
        stray.extend(foreign);
    }
    let mut warnings = Vec::new();

    for case in stray {
        match owner_of(&scenarios, &case.id) {
            Some(index) => scenarios[index].test_cases.push(case),
            None => {
                warn!(case_id = %case.id, "dropping test case with no owning scenario");
                warnings.push(format!("dropped test case '{}': no owning scenario", case.id));
            }
        }
    }

    for scenario in scenarios.iter().filter(|s| s.test_cases.is_empty()) {
        warn!(scenario_id = %scenario.id, "scenario has no test cases");
        warnings.push(format!("scenario '{}' has no test cases", scenario.id));
    }

    Validated { scenarios, warnings }
}
