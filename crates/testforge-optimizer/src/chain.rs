//! Ordered optimizer composition

use crate::{
    DeduplicationOptimizer, DependencyOptimizer, PerformanceOptimizer, PriorityOptimizer,
    ScenarioOptimizer,
};
use std::sync::Arc;
use testforge_types::TestScenario;
use tracing::debug;

/// Optimizers applied in sequence, each to the previous output
#[derive(Debug, Clone, Default)]
pub struct OptimizerChain {
    optimizers: Vec<Arc<dyn ScenarioOptimizer>>,
}

impl OptimizerChain {
    /// Create an empty chain (identity)
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            optimizers: Vec::new(),
        }
    }

    /// Deduplication → Priority → Dependency → Performance
    #[must_use]
    pub fn standard(budget_minutes: Option<u32>) -> Self {
        Self::new()
            .with(DeduplicationOptimizer)
            .with(PriorityOptimizer)
            .with(DependencyOptimizer)
            .with(PerformanceOptimizer::new(budget_minutes))
    }

    /// Append an optimizer
    #[must_use]
    pub fn with(mut self, optimizer: impl ScenarioOptimizer + 'static) -> Self {
        self.optimizers.push(Arc::new(optimizer));
        self
    }

    /// Optimizer names in application order
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        self.optimizers.iter().map(|o| o.name()).collect()
    }

    /// Get number of optimizers
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.optimizers.len()
    }

    /// Check if chain is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.optimizers.is_empty()
    }

    /// Run every optimizer in order
    #[must_use]
    pub fn run(&self, scenarios: Vec<TestScenario>) -> Vec<TestScenario> {
        self.optimizers.iter().fold(scenarios, |current, optimizer| {
            let before = current.len();
            let next = optimizer.optimize(current);
            debug!(optimizer = optimizer.name(), before, after = next.len(), "optimizer applied");
            next
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use testforge_types::{Framework, Priority, ScenarioType};

    fn scenario(id: &str, title: &str, priority: Priority, confidence: u8) -> TestScenario {
        TestScenario::new(id, ScenarioType::Unit, title, Framework::React)
            .with_priority(priority)
            .with_confidence(confidence)
    }

    #[test]
    fn standard_order() {
        assert_eq!(
            OptimizerChain::standard(None).names(),
            vec!["deduplication", "priority", "dependency", "performance"]
        );
    }

    #[test]
    fn empty_chain_is_identity() {
        let input = vec![scenario("a", "A", Priority::Low, 1)];
        assert_eq!(OptimizerChain::new().run(input.clone()), input);
    }

    #[test]
    fn full_chain() {
        let input = vec![
            scenario("render", "Render", Priority::Low, 60),
            scenario("login", "Login", Priority::High, 40),
            scenario("login-2", "Login", Priority::High, 80).with_duration(3),
            scenario("pay", "Pay", Priority::Critical, 90).depends_on("login-2"),
        ];
        let output = OptimizerChain::standard(Some(4)).run(input);
        let ids: Vec<_> = output.iter().map(|s| s.id.as_str()).collect();
        // dedup keeps login-2, priority puts pay first, dependency pulls
        // login-2 ahead of it, budget 4 leaves room for one more minute
        assert_eq!(ids, vec!["login-2", "pay"]);
    }

    fn arb_scenarios() -> impl Strategy<Value = Vec<TestScenario>> {
        prop::collection::vec((0u8..4, 0u8..4, 0u8..=100, 0usize..8), 0..16).prop_map(|rows| {
            rows.into_iter()
                .enumerate()
                .map(|(i, (title, p, confidence, dep))| {
                    let priorities =
                        [Priority::Low, Priority::Medium, Priority::High, Priority::Critical];
                    let priority = priorities[usize::from(p)];
                    scenario(&format!("s{i}"), &format!("t{title}"), priority, confidence)
                        .depends_on(format!("s{dep}"))
                })
                .collect()
        })
    }

    proptest! {
        #[test]
        fn never_fabricates(input in arb_scenarios(), budget in prop::option::of(1u32..10)) {
            let output = OptimizerChain::standard(budget).run(input.clone());
            prop_assert!(output.len() <= input.len());
            for s in &output {
                prop_assert!(input.contains(s));
            }
        }

        #[test]
        fn deterministic(input in arb_scenarios()) {
            let chain = OptimizerChain::standard(None);
            prop_assert_eq!(chain.run(input.clone()), chain.run(input));
        }
    }
}
