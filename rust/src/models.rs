//! Core data types for the CPM engine.

use pyo3::prelude::*;

/// A task to be scheduled.
///
/// `dependencies` lists the ids of predecessor tasks that must finish before
/// this one starts. Successors are derived by the graph builder.
#[pyclass]
#[derive(Clone, Debug, PartialEq)]
pub struct Task {
    #[pyo3(get, set)]
    pub id: String,
    #[pyo3(get, set)]
    pub name: String,
    #[pyo3(get, set)]
    pub duration: f64,
    #[pyo3(get, set)]
    pub dependencies: Vec<String>,
}

#[pymethods]
impl Task {
    #[new]
    #[pyo3(signature = (id, name, duration, dependencies=Vec::new()))]
    pub fn new(id: String, name: String, duration: f64, dependencies: Vec<String>) -> Self {
        Self {
            id,
            name,
            duration,
            dependencies,
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "Task(id={:?}, name={:?}, duration={}, deps={:?})",
            self.id, self.name, self.duration, self.dependencies
        )
    }
}

/// Why a task could not be placed in a topological order.
#[pyclass(eq, eq_int)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SchedulingIssue {
    /// The task lies on a dependency cycle.
    InCycle,
    /// The task depends, directly or transitively, on a cycle member.
    BlockedByCycle,
}

impl std::fmt::Display for SchedulingIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SchedulingIssue::InCycle => write!(f, "task is part of a dependency cycle"),
            SchedulingIssue::BlockedByCycle => {
                write!(f, "task depends on a dependency cycle")
            }
        }
    }
}

/// A task annotated with its computed CPM times.
///
/// Tasks carrying a `scheduling_issue` were never reached by the forward
/// pass: their times are left at zero, both slack values are NaN and they
/// are never critical. For every task, `is_critical` holds exactly when
/// `total_slack` is within the critical tolerance of zero.
#[pyclass]
#[derive(Clone, Debug, PartialEq)]
pub struct ScheduledTask {
    #[pyo3(get, set)]
    pub id: String,
    #[pyo3(get, set)]
    pub name: String,
    #[pyo3(get, set)]
    pub duration: f64,
    #[pyo3(get, set)]
    pub dependencies: Vec<String>,
    #[pyo3(get)]
    pub earliest_start: f64,
    #[pyo3(get)]
    pub earliest_finish: f64,
    #[pyo3(get)]
    pub latest_start: f64,
    #[pyo3(get)]
    pub latest_finish: f64,
    #[pyo3(get)]
    pub total_slack: f64,
    #[pyo3(get)]
    pub free_slack: f64,
    #[pyo3(get)]
    pub is_critical: bool,
    #[pyo3(get)]
    pub scheduling_issue: Option<SchedulingIssue>,
}

impl ScheduledTask {
    /// Fresh, uncomputed entry for `task`. Any previously computed values on
    /// the caller's side are discarded.
    pub fn from_task(task: &Task) -> Self {
        Self {
            id: task.id.clone(),
            name: task.name.clone(),
            duration: task.duration,
            dependencies: task.dependencies.clone(),
            earliest_start: 0.0,
            earliest_finish: 0.0,
            latest_start: 0.0,
            latest_finish: 0.0,
            total_slack: 0.0,
            free_slack: 0.0,
            is_critical: false,
            scheduling_issue: None,
        }
    }

    /// Whether the engine produced reliable times for this task.
    pub fn is_resolved(&self) -> bool {
        self.scheduling_issue.is_none()
    }
}

#[pymethods]
impl ScheduledTask {
    #[getter]
    fn resolved(&self) -> bool {
        self.is_resolved()
    }

    fn __repr__(&self) -> String {
        format!(
            "ScheduledTask(id={:?}, es={}, ef={}, ls={}, lf={}, slack={}, critical={})",
            self.id,
            self.earliest_start,
            self.earliest_finish,
            self.latest_start,
            self.latest_finish,
            self.total_slack,
            self.is_critical
        )
    }
}

/// Output of one scheduling run.
#[pyclass]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScheduleResult {
    /// Scheduled tasks, ascending by earliest start (ties keep input order).
    #[pyo3(get)]
    pub tasks: Vec<ScheduledTask>,
    /// Ids of critical tasks, in input order.
    #[pyo3(get)]
    pub critical_path: Vec<String>,
    /// Largest earliest finish over all tasks; 0 for an empty task set.
    #[pyo3(get)]
    pub project_duration: f64,
}

impl ScheduleResult {
    /// Look up a scheduled task by id.
    pub fn get(&self, id: &str) -> Option<&ScheduledTask> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// True when at least one task could not be ordered (cycle).
    pub fn has_unresolved(&self) -> bool {
        self.tasks.iter().any(|t| !t.is_resolved())
    }

    pub fn unresolved_ids(&self) -> Vec<&str> {
        self.tasks
            .iter()
            .filter(|t| !t.is_resolved())
            .map(|t| t.id.as_str())
            .collect()
    }

    /// Critical tasks in schedule (earliest start) order.
    pub fn critical_tasks(&self) -> impl Iterator<Item = &ScheduledTask> {
        self.tasks.iter().filter(|t| t.is_critical)
    }
}

#[pymethods]
impl ScheduleResult {
    #[pyo3(name = "get")]
    fn py_get(&self, id: &str) -> Option<ScheduledTask> {
        self.get(id).cloned()
    }

    #[pyo3(name = "has_unresolved")]
    fn py_has_unresolved(&self) -> bool {
        self.has_unresolved()
    }

    #[pyo3(name = "unresolved_ids")]
    fn py_unresolved_ids(&self) -> Vec<String> {
        self.unresolved_ids()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// Names of the critical tasks in schedule order.
    fn critical_task_names(&self) -> Vec<String> {
        self.critical_tasks().map(|t| t.name.clone()).collect()
    }

    fn __len__(&self) -> usize {
        self.tasks.len()
    }

    fn __repr__(&self) -> String {
        format!(
            "ScheduleResult(tasks={}, critical_path={:?}, project_duration={})",
            self.tasks.len(),
            self.critical_path,
            self.project_duration
        )
    }
}
