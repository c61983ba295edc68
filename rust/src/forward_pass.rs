//! Forward pass: earliest start and finish times.

use std::collections::VecDeque;

use crate::graph::DependencyGraph;
use crate::interner::NodeId;

/// Earliest times for every node, plus the order nodes were resolved in.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ForwardPassResult {
    pub earliest_start: Vec<f64>,
    pub earliest_finish: Vec<f64>,
    /// Nodes in the order Kahn's algorithm completed them. Shorter than the
    /// task count when the graph contains a cycle.
    pub processing_order: Vec<NodeId>,
    /// Per-node flag: was this node reached by the traversal.
    pub resolved: Vec<bool>,
    /// Max earliest finish; 0.0 when there are no tasks.
    pub project_duration: f64,
}

impl ForwardPassResult {
    /// True when every node was placed in the topological order.
    pub fn is_complete(&self) -> bool {
        self.processing_order.len() == self.earliest_start.len()
    }
}

/// Compute ES/EF with Kahn's algorithm.
///
/// Ready nodes are processed FIFO, seeded in input order. A node's ES is
/// the max EF over its predecessors (all of which are done by the time the
/// node becomes ready), or 0 for sources. Nodes stuck behind a cycle are
/// never dequeued and keep ES = EF = 0; the loop ends once the queue drains.
pub fn forward_pass(graph: &DependencyGraph<'_>) -> ForwardPassResult {
    let n = graph.len();
    let mut earliest_start = vec![0.0; n];
    let mut earliest_finish = vec![0.0; n];
    let mut in_degree = graph.in_degree.clone();
    let mut processing_order: Vec<NodeId> = Vec::with_capacity(n);
    let mut resolved = vec![false; n];

    let mut queue: VecDeque<NodeId> = (0..n as NodeId)
        .filter(|&node| in_degree[node as usize] == 0)
        .collect();

    while let Some(node) = queue.pop_front() {
        let idx = node as usize;
        processing_order.push(node);
        resolved[idx] = true;

        let es = graph.predecessors[idx]
            .iter()
            .map(|&pred| earliest_finish[pred as usize])
            .fold(0.0, f64::max);
        earliest_start[idx] = es;
        earliest_finish[idx] = es + graph.durations[idx];

        for &succ in &graph.successors[idx] {
            let degree = &mut in_degree[succ as usize];
            *degree -= 1;
            if *degree == 0 {
                queue.push_back(succ);
            }
        }
    }

    let project_duration = earliest_finish.iter().copied().fold(0.0, f64::max);

    ForwardPassResult {
        earliest_start,
        earliest_finish,
        processing_order,
        resolved,
        project_duration,
    }
}
