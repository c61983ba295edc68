//! Dependency depth of each task, used to lay out network diagrams.

use rustc_hash::FxHashMap;

use crate::forward_pass::forward_pass;
use crate::graph::DependencyGraph;
use crate::models::Task;

/// Depth of every task in the dependency DAG.
///
/// Sources sit at level 0; any other task sits one level below its deepest
/// predecessor. Tasks that cannot be ordered (cycles) are parked at level
/// `tasks.len()`, below everything else.
pub fn dependency_levels(tasks: &[Task]) -> FxHashMap<String, usize> {
    let graph = DependencyGraph::build(tasks);
    let forward = forward_pass(&graph);

    let mut levels = vec![tasks.len(); tasks.len()];
    for &node in &forward.processing_order {
        let idx = node as usize;
        let level = graph.predecessors[idx]
            .iter()
            .map(|&pred| levels[pred as usize] + 1)
            .max()
            .unwrap_or(0);
        levels[idx] = level;
    }

    let mut by_id: FxHashMap<String, usize> =
        FxHashMap::with_capacity_and_hasher(tasks.len(), Default::default());
    for (task, level) in tasks.iter().zip(levels) {
        by_id.entry(task.id.clone()).or_insert(level);
    }
    by_id
}
