//! Classification of tasks the forward pass could not order.

use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use rustc_hash::FxHashMap;

use crate::graph::DependencyGraph;
use crate::interner::NodeId;
use crate::models::SchedulingIssue;

/// Unresolved nodes split into cycles and their downstream victims.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CycleReport {
    /// Issue per node; `None` for nodes that were scheduled.
    pub issues: Vec<Option<SchedulingIssue>>,
    /// Each dependency cycle as its member nodes, sorted. Cycles are ordered
    /// by their smallest member.
    pub cycles: Vec<Vec<NodeId>>,
}

/// Find the strongly connected components among the unresolved nodes.
///
/// Every unresolved node has an unresolved predecessor, so it either sits on
/// a cycle (component of two or more nodes) or is downstream of one.
pub fn classify_unresolved(graph: &DependencyGraph<'_>, resolved: &[bool]) -> CycleReport {
    let mut issues = vec![None; graph.len()];
    if resolved.iter().all(|&r| r) {
        return CycleReport {
            issues,
            cycles: Vec::new(),
        };
    }

    let mut residual: DiGraph<NodeId, ()> = DiGraph::new();
    let mut to_residual: FxHashMap<NodeId, NodeIndex> = FxHashMap::default();
    for (node, _) in resolved.iter().enumerate().filter(|(_, &r)| !r) {
        let node = node as NodeId;
        to_residual.insert(node, residual.add_node(node));
    }
    for (&node, &from) in &to_residual {
        for succ in &graph.successors[node as usize] {
            if let Some(&to) = to_residual.get(succ) {
                residual.add_edge(from, to, ());
            }
        }
    }

    let mut cycles: Vec<Vec<NodeId>> = Vec::new();
    for component in tarjan_scc(&residual) {
        let mut members: Vec<NodeId> = component.iter().map(|&ix| residual[ix]).collect();
        let issue = if members.len() > 1 {
            SchedulingIssue::InCycle
        } else {
            SchedulingIssue::BlockedByCycle
        };
        for &member in &members {
            issues[member as usize] = Some(issue);
        }
        if members.len() > 1 {
            members.sort_unstable();
            cycles.push(members);
        }
    }
    cycles.sort_unstable_by_key(|members| members[0]);

    CycleReport { issues, cycles }
}
