//! Execution-time budget

use crate::ScenarioOptimizer;
use std::collections::HashSet;
use testforge_types::TestScenario;
use tracing::debug;

/// Trims the list to a minute budget
///
/// Without a budget this is the identity. With one, scenarios are taken in
/// order while their cumulative effective duration fits; a scenario that
/// does not fit is skipped, and so is any later scenario depending on a
/// skipped one.
#[derive(Debug, Clone, Copy, Default)]
pub struct PerformanceOptimizer {
    budget_minutes: Option<u32>,
}

impl PerformanceOptimizer {
    /// Create optimizer with an optional budget
    #[inline]
    #[must_use]
    pub fn new(budget_minutes: Option<u32>) -> Self {
        Self { budget_minutes }
    }

    /// Budget in minutes
    #[inline]
    #[must_use]
    pub fn budget_minutes(&self) -> Option<u32> {
        self.budget_minutes
    }
}

impl ScenarioOptimizer for PerformanceOptimizer {
    fn name(&self) -> &'static str {
        "performance"
    }

    fn optimize(&self, scenarios: Vec<TestScenario>) -> Vec<TestScenario> {
        let Some(budget) = self.budget_minutes else {
            return scenarios;
        };

        let mut used: u32 = 0;
        let mut skipped: HashSet<String> = HashSet::new();
        let mut kept = Vec::with_capacity(scenarios.len());

        for scenario in scenarios {
            let blocked = scenario.dependencies.iter().any(|d| skipped.contains(d));
            let cost = scenario.effective_duration();
            if blocked || used.saturating_add(cost) > budget {
                debug!(
                    scenario = %scenario.id,
                    cost,
                    used,
                    budget,
                    blocked,
                    "over budget, skipped"
                );
                skipped.insert(scenario.id.clone());
                continue;
            }
            used += cost;
            kept.push(scenario);
        }
        kept
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use testforge_types::{Framework, ScenarioType};

    fn scenario(id: &str, minutes: u32) -> TestScenario {
        TestScenario::new(id, ScenarioType::E2e, id, Framework::React).with_duration(minutes)
    }

    fn ids(scenarios: &[TestScenario]) -> Vec<&str> {
        scenarios.iter().map(|s| s.id.as_str()).collect()
    }

    #[test]
    fn no_budget_is_identity() {
        let input = vec![scenario("a", 50), scenario("b", 50)];
        let output = PerformanceOptimizer::default().optimize(input.clone());
        assert_eq!(output, input);
    }

    #[test]
    fn skips_what_does_not_fit() {
        let input = vec![scenario("a", 5), scenario("big", 20), scenario("c", 4), scenario("d", 2)];
        let output = PerformanceOptimizer::new(Some(10)).optimize(input);
        assert_eq!(ids(&output), vec!["a", "c"]);
    }

    #[test]
    fn dependents_of_skipped_are_skipped() {
        let input = vec![
            scenario("big", 30),
            scenario("after_big", 1).depends_on("big"),
            scenario("small", 1),
        ];
        let output = PerformanceOptimizer::new(Some(10)).optimize(input);
        assert_eq!(ids(&output), vec!["small"]);
    }

    #[test]
    fn missing_duration_counts_as_one_minute() {
        let input = vec![
            TestScenario::new("x", ScenarioType::Unit, "x", Framework::React),
            TestScenario::new("y", ScenarioType::Unit, "y", Framework::React),
        ];
        let output = PerformanceOptimizer::new(Some(1)).optimize(input);
        assert_eq!(ids(&output), vec!["x"]);
    }

    proptest! {
        #[test]
        fn kept_total_within_budget(
            minutes in prop::collection::vec(0u32..40, 0..20),
            budget in 1u32..120,
        ) {
            let input: Vec<_> = minutes
                .iter()
                .enumerate()
                .map(|(i, m)| scenario(&format!("s{i}"), *m))
                .collect();
            let output = PerformanceOptimizer::new(Some(budget)).optimize(input.clone());
            let total: u32 = output.iter().map(TestScenario::effective_duration).sum();
            prop_assert!(total <= budget);
            prop_assert!(output.iter().all(|s| input.contains(s)));
        }
    }
}
