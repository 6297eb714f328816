//! Dependency ordering
//!
//! Builds a digraph with an edge from each dependency to its dependent and
//! emits a stable topological order: among ready scenarios the one earliest
//! in the input goes first. Dependencies naming unknown ids are ignored.
//! Scenarios caught in a cycle follow all others, in input order.

use crate::ScenarioOptimizer;
use petgraph::graphmap::DiGraphMap;
use petgraph::Direction;
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};
use testforge_types::TestScenario;
use tracing::warn;

/// Stable topological reordering over `dependencies`
#[derive(Debug, Clone, Copy, Default)]
pub struct DependencyOptimizer;

impl DependencyOptimizer {
    /// Output order as input indices
    fn order(scenarios: &[TestScenario]) -> Vec<usize> {
        // first occurrence wins for duplicate ids
        let mut index_of: HashMap<&str, usize> = HashMap::with_capacity(scenarios.len());
        for (i, s) in scenarios.iter().enumerate() {
            index_of.entry(s.id.as_str()).or_insert(i);
        }

        let mut graph: DiGraphMap<usize, ()> = DiGraphMap::with_capacity(scenarios.len(), 0);
        for i in 0..scenarios.len() {
            graph.add_node(i);
        }
        for (i, s) in scenarios.iter().enumerate() {
            for dep in &s.dependencies {
                match index_of.get(dep.as_str()) {
                    Some(&d) if d != i => {
                        graph.add_edge(d, i, ());
                    }
                    Some(_) => {}
                    None => {
                        warn!(scenario = %s.id, dependency = %dep, "unknown dependency ignored");
                    }
                }
            }
        }

        let mut in_degree: Vec<usize> = (0..scenarios.len())
            .map(|i| graph.neighbors_directed(i, Direction::Incoming).count())
            .collect();
        let mut ready: BinaryHeap<Reverse<usize>> = in_degree
            .iter()
            .enumerate()
            .filter(|(_, deg)| **deg == 0)
            .map(|(i, _)| Reverse(i))
            .collect();

        let mut order = Vec::with_capacity(scenarios.len());
        let mut placed = vec![false; scenarios.len()];
        while let Some(Reverse(next)) = ready.pop() {
            order.push(next);
            placed[next] = true;
            for dependent in graph.neighbors_directed(next, Direction::Outgoing) {
                in_degree[dependent] -= 1;
                if in_degree[dependent] == 0 {
                    ready.push(Reverse(dependent));
                }
            }
        }

        if order.len() < scenarios.len() {
            warn!(
                cyclic = scenarios.len() - order.len(),
                "dependency cycle; keeping input order for cyclic scenarios"
            );
            order.extend((0..scenarios.len()).filter(|i| !placed[*i]));
        }
        order
    }
}

impl ScenarioOptimizer for DependencyOptimizer {
    fn name(&self) -> &'static str {
        "dependency"
    }

    fn optimize(&self, scenarios: Vec<TestScenario>) -> Vec<TestScenario> {
        let order = Self::order(&scenarios);
        let mut slots: Vec<Option<TestScenario>> = scenarios.into_iter().map(Some).collect();
        order.into_iter().filter_map(|i| slots[i].take()).collect()
    }
}
