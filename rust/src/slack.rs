//! Slack and critical path derivation.

use crate::backward_pass::BackwardPassResult;
use crate::forward_pass::ForwardPassResult;
use crate::graph::DependencyGraph;
use crate::interner::NodeId;

/// Slack and criticality for every node.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SlackResult {
    pub total_slack: Vec<f64>,
    pub free_slack: Vec<f64>,
    pub is_critical: Vec<bool>,
    /// Critical nodes in input order.
    pub critical_path: Vec<NodeId>,
}

/// Derive total slack, free slack and criticality in one pass over the nodes.
///
/// Free slack measures against the earliest successor start (or the project
/// duration for sinks) and never goes below zero. Unresolved nodes get NaN
/// slack, which never passes the tolerance check, so they are never critical.
pub fn derive_slack(
    graph: &DependencyGraph<'_>,
    forward: &ForwardPassResult,
    backward: &BackwardPassResult,
    tolerance: f64,
) -> SlackResult {
    let n = graph.len();
    let resolved = &forward.resolved;
    let mut total_slack = vec![f64::NAN; n];
    let mut free_slack = vec![f64::NAN; n];
    let mut is_critical = vec![false; n];
    let mut critical_path = Vec::new();

    for idx in (0..n).filter(|&idx| resolved[idx]) {
        let total = backward.latest_start[idx] - forward.earliest_start[idx];
        total_slack[idx] = total;

        let next_start = graph.successors[idx]
            .iter()
            .filter(|&&succ| resolved[succ as usize])
            .map(|&succ| forward.earliest_start[succ as usize])
            .reduce(f64::min)
            .unwrap_or(forward.project_duration);
        free_slack[idx] = (next_start - forward.earliest_finish[idx]).max(0.0);

        if total.abs() < tolerance {
            is_critical[idx] = true;
            critical_path.push(idx as NodeId);
        }
    }

    SlackResult {
        total_slack,
        free_slack,
        is_critical,
        critical_path,
    }
}
