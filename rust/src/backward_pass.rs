//! Backward pass: latest start and finish times.

use crate::forward_pass::ForwardPassResult;
use crate::graph::DependencyGraph;

/// Latest times for every node.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BackwardPassResult {
    pub latest_start: Vec<f64>,
    pub latest_finish: Vec<f64>,
}

/// Compute LS/LF by walking the forward pass's processing order in reverse.
///
/// A node's LF is the min LS over its successors, or the project duration
/// for sinks. Successors always come later in the processing order, so the
/// reverse walk has already fixed their LS. Successors that were never
/// resolved (cycle members) are ignored. Unresolved nodes keep LS = LF = 0.
pub fn backward_pass(
    graph: &DependencyGraph<'_>,
    forward: &ForwardPassResult,
) -> BackwardPassResult {
    let n = graph.len();
    let mut latest_start = vec![0.0; n];
    let mut latest_finish = vec![0.0; n];
    let resolved = &forward.resolved;

    for &node in forward.processing_order.iter().rev() {
        let idx = node as usize;

        let lf = graph.successors[idx]
            .iter()
            .filter(|&&succ| resolved[succ as usize])
            .map(|&succ| latest_start[succ as usize])
            .reduce(f64::min)
            .unwrap_or(forward.project_duration);

        latest_finish[idx] = lf;
        latest_start[idx] = lf - graph.durations[idx];
    }

    BackwardPassResult {
        latest_start,
        latest_finish,
    }
}
