//! Rust implementation of the CPM (Critical Path Method) scheduling engine.
//!
//! Given tasks with durations and finish-to-start dependencies, computes the
//! earliest and latest start/finish of every task, total and free slack, the
//! critical path and the project duration. The engine is a pure function of
//! its input and keeps no state between calls.

// Allow clippy warning triggered by PyO3 macro expansion
#![allow(clippy::useless_conversion)]

use pyo3::prelude::*;
use std::collections::HashMap;

pub mod backward_pass;
mod config;
pub mod cycles;
pub mod demo;
pub mod forward_pass;
pub mod graph;
pub mod interner;
pub mod levels;
pub mod logging;
mod models;
pub mod schedule;
pub mod slack;
pub mod validation;

pub use config::{ScheduleConfig, CRITICAL_SLACK_TOLERANCE};
pub use models::{ScheduleResult, ScheduledTask, SchedulingIssue, Task};
pub use schedule::{
    calculate_schedule, calculate_schedule_checked, calculate_schedule_with_config,
};
pub use validation::{
    find_issues, validate_tasks, ValidationError, ValidationIssue, ValidationIssueKind,
};

/// Compute the CPM schedule for a list of tasks.
///
/// # Arguments
/// * `tasks` - Tasks to schedule (any order)
/// * `config` - Engine configuration (defaults when omitted)
/// * `strict` - Validate the task set first and refuse malformed input
///
/// # Returns
/// * ScheduleResult with per-task times sorted by earliest start
///
/// # Raises
/// * ValueError if `strict` is set and validation finds any issue
#[pyfunction]
#[pyo3(name = "calculate_schedule", signature = (tasks, config=None, strict=false))]
fn py_calculate_schedule(
    tasks: Vec<Task>,
    config: Option<ScheduleConfig>,
    strict: bool,
) -> PyResult<ScheduleResult> {
    let config = config.unwrap_or_default();
    if strict {
        calculate_schedule_checked(&tasks, &config)
            .map_err(|e| pyo3::exceptions::PyValueError::new_err(e.to_string()))
    } else {
        Ok(calculate_schedule_with_config(&tasks, &config))
    }
}

/// List every problem in a task set (empty list when the set is clean).
#[pyfunction]
#[pyo3(name = "validate_tasks")]
fn py_validate_tasks(tasks: Vec<Task>) -> Vec<ValidationIssue> {
    find_issues(&tasks)
}

/// Dependency depth per task id, for laying out network diagrams.
#[pyfunction]
#[pyo3(name = "dependency_levels")]
fn py_dependency_levels(tasks: Vec<Task>) -> HashMap<String, usize> {
    // std HashMap for the PyO3 conversion
    levels::dependency_levels(&tasks).into_iter().collect()
}

/// The six-task sample project.
#[pyfunction]
#[pyo3(name = "demo_tasks")]
fn py_demo_tasks() -> Vec<Task> {
    demo::demo_tasks()
}

/// The cpm.rust Python module.
#[pymodule]
fn rust(m: &Bound<'_, PyModule>) -> PyResult<()> {
    // Core data types
    m.add_class::<Task>()?;
    m.add_class::<ScheduledTask>()?;
    m.add_class::<ScheduleResult>()?;
    m.add_class::<SchedulingIssue>()?;
    m.add_class::<ValidationIssue>()?;
    m.add_class::<ValidationIssueKind>()?;

    // Config
    m.add_class::<ScheduleConfig>()?;
    m.add("CRITICAL_SLACK_TOLERANCE", CRITICAL_SLACK_TOLERANCE)?;

    // Algorithms
    m.add_function(wrap_pyfunction!(py_calculate_schedule, m)?)?;
    m.add_function(wrap_pyfunction!(py_validate_tasks, m)?)?;
    m.add_function(wrap_pyfunction!(py_dependency_levels, m)?)?;
    m.add_function(wrap_pyfunction!(py_demo_tasks, m)?)?;

    Ok(())
}
