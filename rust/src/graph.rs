//! Dependency graph construction.
//!
//! Turns the flat task list into index-based adjacency lists so that the
//! passes get O(1) predecessor and successor lookup.

use rustc_hash::FxHashSet;

use crate::interner::{NodeId, TaskIdInterner};
use crate::models::Task;

/// Bidirectional adjacency over the tasks of one scheduling call.
///
/// Node `i` is `tasks[i]`. Only edges between tasks present in the set are
/// kept: unknown dependency ids and self-references are dropped.
#[derive(Debug, Clone)]
pub struct DependencyGraph<'a> {
    pub index: TaskIdInterner<'a>,
    /// Duration per node, copied from the tasks at build time.
    pub durations: Vec<f64>,
    /// Valid predecessors per node, in declaration order, deduplicated.
    pub predecessors: Vec<Vec<NodeId>>,
    /// Successors per node, in input order of the dependent tasks.
    pub successors: Vec<Vec<NodeId>>,
    /// Number of valid predecessors per node.
    pub in_degree: Vec<usize>,
    /// Dependency references that did not resolve to another task.
    pub dropped_edges: Vec<DroppedEdge<'a>>,
    /// Nodes whose id was already taken by an earlier task.
    pub duplicates: Vec<NodeId>,
}

/// A dependency reference left out of the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DroppedEdge<'a> {
    pub task_id: &'a str,
    pub dependency_id: &'a str,
    pub reason: DropReason,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropReason {
    UnknownTask,
    SelfReference,
}

impl<'a> DependencyGraph<'a> {
    pub fn build(tasks: &'a [Task]) -> Self {
        let n = tasks.len();
        let mut index = TaskIdInterner::with_capacity(n);
        let mut duplicates = Vec::new();
        for task in tasks {
            let (node, owns) = index.push(&task.id);
            if !owns {
                duplicates.push(node);
            }
        }

        let mut predecessors: Vec<Vec<NodeId>> = vec![Vec::new(); n];
        let mut successors: Vec<Vec<NodeId>> = vec![Vec::new(); n];
        let mut dropped_edges = Vec::new();
        let mut seen: FxHashSet<NodeId> = FxHashSet::default();

        for (node, task) in tasks.iter().enumerate() {
            let node = node as NodeId;
            seen.clear();
            for dep_id in &task.dependencies {
                let Some(dep) = index.get(dep_id) else {
                    dropped_edges.push(DroppedEdge {
                        task_id: &task.id,
                        dependency_id: dep_id,
                        reason: DropReason::UnknownTask,
                    });
                    continue;
                };
                // A self-edge would hold the in-degree above zero forever.
                if dep == node || dep_id == &task.id {
                    dropped_edges.push(DroppedEdge {
                        task_id: &task.id,
                        dependency_id: dep_id,
                        reason: DropReason::SelfReference,
                    });
                    continue;
                }
                if !seen.insert(dep) {
                    continue;
                }
                predecessors[node as usize].push(dep);
                successors[dep as usize].push(node);
            }
        }

        let in_degree = predecessors.iter().map(Vec::len).collect();
        let durations = tasks.iter().map(|task| task.duration).collect();

        Self {
            index,
            durations,
            predecessors,
            successors,
            in_degree,
            dropped_edges,
            duplicates,
        }
    }

    pub fn len(&self) -> usize {
        self.predecessors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.predecessors.is_empty()
    }

    /// Task id for a node.
    pub fn task_id(&self, node: NodeId) -> &'a str {
        self.index.resolve(node).unwrap_or_default()
    }
}
