//! Priority ordering

use crate::ScenarioOptimizer;
use std::cmp::Reverse;
use testforge_types::TestScenario;

/// Stable sort, highest priority rank first
///
/// Scenarios with the same priority keep their input order.
#[derive(Debug, Clone, Copy, Default)]
pub struct PriorityOptimizer;

impl ScenarioOptimizer for PriorityOptimizer {
    fn name(&self) -> &'static str {
        "priority"
    }

    fn optimize(&self, mut scenarios: Vec<TestScenario>) -> Vec<TestScenario> {
        // sort_by_key is stable
        scenarios.sort_by_key(|s| Reverse(s.priority.rank()));
        scenarios
    }
}
