//! Duplicate folding

use crate::ScenarioOptimizer;
use indexmap::map::Entry;
use indexmap::IndexMap;
use testforge_types::{ScenarioType, TestScenario};

/// Keeps one scenario per `(type, category, title)`
///
/// On collision the higher confidence wins; ties keep the first seen. The
/// survivor takes the position of the first scenario with its key.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeduplicationOptimizer;

impl ScenarioOptimizer for DeduplicationOptimizer {
    fn name(&self) -> &'static str {
        "deduplication"
    }

    fn optimize(&self, scenarios: Vec<TestScenario>) -> Vec<TestScenario> {
        let mut unique: IndexMap<(ScenarioType, String, String), TestScenario> =
            IndexMap::with_capacity(scenarios.len());

        for scenario in scenarios {
            let key = (
                scenario.kind.clone(),
                scenario.category.clone(),
                scenario.title.clone(),
            );
            match unique.entry(key) {
                Entry::Vacant(slot) => {
                    slot.insert(scenario);
                }
                Entry::Occupied(mut slot) => {
                    if slot.get().confidence < scenario.confidence {
                        slot.insert(scenario);
                    }
                }
            }
        }

        unique.into_values().collect()
    }
}
