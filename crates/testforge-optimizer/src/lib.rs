//! Scenario optimizer chain
//!
//! Four pure transforms applied in a fixed order:
//!
//! 1. [`DeduplicationOptimizer`]: fold by `(type, category, title)`
//! 2. [`PriorityOptimizer`]: stable sort by priority rank
//! 3. [`DependencyOptimizer`]: stable topological order over `dependencies`
//! 4. [`PerformanceOptimizer`]: trim to an optional minute budget
//!
//! No optimizer ever introduces a scenario that was not in its input.

#![warn(unreachable_pub)]

pub mod chain;
pub mod dedup;
pub mod dependency;
pub mod performance;
pub mod priority;

pub use chain::OptimizerChain;
pub use dedup::DeduplicationOptimizer;
pub use dependency::DependencyOptimizer;
pub use performance::PerformanceOptimizer;
pub use priority::PriorityOptimizer;

use testforge_types::TestScenario;

/// A pure transform over the scenario list
///
/// The same input list always yields the same output list. Implementations
/// take the list by value and hand back a new one; they may drop or reorder
/// scenarios but never fabricate them.
pub trait ScenarioOptimizer: Send + Sync + std::fmt::Debug {
    /// Short name for logs
    fn name(&self) -> &'static str;

    /// Transform the list
    fn optimize(&self, scenarios: Vec<TestScenario>) -> Vec<TestScenario>;
}
