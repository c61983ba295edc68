//! Boundary validation of a task set.
//!
//! The engine never rejects input: unknown references and self-edges are
//! dropped, cycles are flagged. Callers that want to refuse malformed input
//! before scheduling run these checks first.

use pyo3::prelude::*;
use rustc_hash::FxHashSet;
use thiserror::Error;

use crate::cycles::classify_unresolved;
use crate::forward_pass::forward_pass;
use crate::graph::{DependencyGraph, DropReason};
use crate::models::Task;

/// Category of a validation finding.
#[pyclass(eq, eq_int)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ValidationIssueKind {
    EmptyId,
    EmptyName,
    DuplicateId,
    InvalidDuration,
    SelfDependency,
    UnknownDependency,
    Cycle,
}

/// One problem found in the task set.
#[pyclass]
#[derive(Clone, Debug, PartialEq)]
pub struct ValidationIssue {
    #[pyo3(get)]
    pub kind: ValidationIssueKind,
    /// Task the issue is reported against (first member for cycles).
    #[pyo3(get)]
    pub task_id: String,
    /// Other ids involved: the missing dependency, or all cycle members.
    #[pyo3(get)]
    pub related_ids: Vec<String>,
    #[pyo3(get)]
    pub message: String,
}

impl ValidationIssue {
    fn new(
        kind: ValidationIssueKind,
        task_id: &str,
        related_ids: Vec<String>,
        message: String,
    ) -> Self {
        Self {
            kind,
            task_id: task_id.to_string(),
            related_ids,
            message,
        }
    }
}

#[pymethods]
impl ValidationIssue {
    fn __repr__(&self) -> String {
        format!(
            "ValidationIssue(kind={:?}, task_id={:?}, message={:?})",
            self.kind, self.task_id, self.message
        )
    }

    fn __str__(&self) -> String {
        self.message.clone()
    }
}

/// Errors raised when a task set fails validation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("task set failed validation: {}", join_messages(.0))]
    InvalidTasks(Vec<ValidationIssue>),
}

impl ValidationError {
    pub fn issues(&self) -> &[ValidationIssue] {
        match self {
            ValidationError::InvalidTasks(issues) => issues,
        }
    }
}

fn join_messages(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(|issue| issue.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Collect every problem in `tasks`.
///
/// Field problems (ids, names, durations) come first in input order, then
/// dependency references in input order, then one entry per cycle.
pub fn find_issues(tasks: &[Task]) -> Vec<ValidationIssue> {
    use ValidationIssueKind::*;

    let mut issues = Vec::new();
    let mut seen_ids: FxHashSet<&str> = FxHashSet::default();

    for (position, task) in tasks.iter().enumerate() {
        if task.id.trim().is_empty() {
            issues.push(ValidationIssue::new(
                EmptyId,
                &task.id,
                vec![],
                format!("task at position {} has an empty id", position),
            ));
        }
        if task.name.trim().is_empty() {
            issues.push(ValidationIssue::new(
                EmptyName,
                &task.id,
                vec![],
                format!("task {:?} has an empty name", task.id),
            ));
        }
        if !seen_ids.insert(task.id.as_str()) {
            issues.push(ValidationIssue::new(
                DuplicateId,
                &task.id,
                vec![],
                format!("task id {:?} is used more than once", task.id),
            ));
        }
        if !task.duration.is_finite() || task.duration < 0.0 {
            issues.push(ValidationIssue::new(
                InvalidDuration,
                &task.id,
                vec![],
                format!(
                    "task {:?} has invalid duration {} (must be finite and >= 0)",
                    task.id, task.duration
                ),
            ));
        }
    }

    let graph = DependencyGraph::build(tasks);
    for edge in &graph.dropped_edges {
        let issue = match edge.reason {
            DropReason::SelfReference => ValidationIssue::new(
                SelfDependency,
                edge.task_id,
                vec![edge.dependency_id.to_string()],
                format!("task {:?} depends on itself", edge.task_id),
            ),
            DropReason::UnknownTask => ValidationIssue::new(
                UnknownDependency,
                edge.task_id,
                vec![edge.dependency_id.to_string()],
                format!(
                    "task {:?} depends on unknown task {:?}",
                    edge.task_id, edge.dependency_id
                ),
            ),
        };
        issues.push(issue);
    }

    let forward = forward_pass(&graph);
    if !forward.is_complete() {
        let report = classify_unresolved(&graph, &forward.resolved);
        for cycle in report.cycles {
            let members: Vec<String> = cycle
                .iter()
                .map(|&node| graph.task_id(node).to_string())
                .collect();
            let first = members[0].clone();
            let message = format!("dependency cycle between tasks {}", members.join(", "));
            issues.push(ValidationIssue::new(Cycle, &first, members, message));
        }
    }

    issues
}

/// Fail with every issue found, or succeed on a clean task set.
pub fn validate_tasks(tasks: &[Task]) -> Result<(), ValidationError> {
    let issues = find_issues(tasks);
    if issues.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::InvalidTasks(issues))
    }
}
