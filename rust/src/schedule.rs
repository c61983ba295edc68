//! Full CPM pipeline: graph build, forward pass, backward pass, slack.

use crate::backward_pass::backward_pass;
use crate::config::ScheduleConfig;
use crate::cycles::classify_unresolved;
use crate::forward_pass::forward_pass;
use crate::graph::DependencyGraph;
use crate::models::{ScheduleResult, ScheduledTask, Task};
use crate::slack::derive_slack;
use crate::validation::{validate_tasks, ValidationError};
use crate::{log_debug, log_phases, log_summary};

/// Schedule `tasks` with the default configuration.
pub fn calculate_schedule(tasks: &[Task]) -> ScheduleResult {
    calculate_schedule_with_config(tasks, &ScheduleConfig::default())
}

/// Compute the complete CPM schedule for `tasks`.
///
/// Never fails. Dependency ids that match no task and self-references are
/// ignored. If the graph has a cycle, the tasks that could not be ordered
/// come back with zero times, NaN slack and a `scheduling_issue`, and
/// everything else is scheduled normally.
///
/// The returned tasks are sorted by earliest start; equal starts keep input
/// order, so identical input always yields identical output.
pub fn calculate_schedule_with_config(tasks: &[Task], config: &ScheduleConfig) -> ScheduleResult {
    let verbosity = config.verbosity;
    if tasks.is_empty() {
        return ScheduleResult::default();
    }

    let graph = DependencyGraph::build(tasks);
    log_phases!(
        verbosity,
        "graph: {} tasks, {} dropped dependency references",
        graph.len(),
        graph.dropped_edges.len()
    );
    if !graph.duplicates.is_empty() {
        log_summary!(
            verbosity,
            "warning: {} tasks reuse an id already taken by an earlier task",
            graph.duplicates.len()
        );
    }
    for edge in &graph.dropped_edges {
        log_debug!(
            verbosity,
            "dropped {} -> {} ({:?})",
            edge.dependency_id,
            edge.task_id,
            edge.reason
        );
    }

    let forward = forward_pass(&graph);
    log_phases!(
        verbosity,
        "forward pass: {}/{} tasks ordered, project duration {}",
        forward.processing_order.len(),
        graph.len(),
        forward.project_duration
    );

    let backward = backward_pass(&graph, &forward);
    let slack = derive_slack(&graph, &forward, &backward, config.critical_tolerance);
    log_phases!(
        verbosity,
        "slack: {} critical tasks",
        slack.critical_path.len()
    );

    let cycle_report = classify_unresolved(&graph, &forward.resolved);
    if !forward.is_complete() {
        log_summary!(
            verbosity,
            "warning: {} tasks could not be ordered ({} dependency cycles)",
            graph.len() - forward.processing_order.len(),
            cycle_report.cycles.len()
        );
    }

    let mut scheduled: Vec<ScheduledTask> = tasks
        .iter()
        .enumerate()
        .map(|(idx, task)| {
            let mut entry = ScheduledTask::from_task(task);
            entry.scheduling_issue = cycle_report.issues[idx];
            if entry.scheduling_issue.is_none() {
                entry.earliest_start = forward.earliest_start[idx];
                entry.earliest_finish = forward.earliest_finish[idx];
                entry.latest_start = backward.latest_start[idx];
                entry.latest_finish = backward.latest_finish[idx];
            }
            entry.total_slack = slack.total_slack[idx];
            entry.free_slack = slack.free_slack[idx];
            entry.is_critical = slack.is_critical[idx];
            log_debug!(
                verbosity,
                "{}: es={} ef={} ls={} lf={} slack={} free={}{}",
                entry.id,
                entry.earliest_start,
                entry.earliest_finish,
                entry.latest_start,
                entry.latest_finish,
                entry.total_slack,
                entry.free_slack,
                if entry.is_critical { " [critical]" } else { "" }
            );
            entry
        })
        .collect();
    scheduled.sort_by(|a, b| a.earliest_start.total_cmp(&b.earliest_start));

    let critical_path: Vec<String> = slack
        .critical_path
        .iter()
        .map(|&node| tasks[node as usize].id.clone())
        .collect();

    log_summary!(
        verbosity,
        "project duration {}, critical path [{}]",
        forward.project_duration,
        critical_path.join(", ")
    );

    ScheduleResult {
        tasks: scheduled,
        critical_path,
        project_duration: forward.project_duration,
    }
}

/// Validate `tasks` and schedule them only if no issue is found.
pub fn calculate_schedule_checked(
    tasks: &[Task],
    config: &ScheduleConfig,
) -> Result<ScheduleResult, ValidationError> {
    validate_tasks(tasks)?;
    Ok(calculate_schedule_with_config(tasks, config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CRITICAL_SLACK_TOLERANCE;
    use crate::demo::demo_tasks;
    use crate::models::SchedulingIssue;

    const EPS: f64 = 1e-9;

    fn make_task(id: &str, duration: f64, deps: &[&str]) -> Task {
        Task {
            id: id.to_string(),
            name: format!("Task {}", id),
            duration,
            dependencies: deps.iter().map(|d| d.to_string()).collect(),
        }
    }

    fn task<'r>(result: &'r ScheduleResult, id: &str) -> &'r ScheduledTask {
        result
            .get(id)
            .unwrap_or_else(|| panic!("task {} missing from result", id))
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < EPS,
            "expected {}, got {}",
            expected,
            actual
        );
    }

    fn diamond() -> Vec<Task> {
        vec![
            make_task("A", 2.0, &[]),
            make_task("B", 4.0, &["A"]),
            make_task("C", 3.0, &["A"]),
            make_task("D", 5.0, &["B", "C"]),
        ]
    }

    #[test]
    fn test_empty_input() {
        let result = calculate_schedule(&[]);
        assert_eq!(result, ScheduleResult::default());
    }

    #[test]
    fn test_linear_chain() {
        let tasks = vec![
            make_task("A", 4.0, &[]),
            make_task("B", 2.0, &["A"]),
            make_task("C", 8.0, &["B"]),
        ];
        let result = calculate_schedule(&tasks);

        assert_close(result.project_duration, 14.0);
        for (id, es, ef) in [("A", 0.0, 4.0), ("B", 4.0, 6.0), ("C", 6.0, 14.0)] {
            let t = task(&result, id);
            assert_close(t.earliest_start, es);
            assert_close(t.earliest_finish, ef);
            assert_close(t.total_slack, 0.0);
            assert!(t.is_critical);
        }
        assert_eq!(result.critical_path, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_diamond() {
        let result = calculate_schedule(&diamond());

        assert_close(result.project_duration, 11.0);
        assert_close(task(&result, "A").earliest_start, 0.0);
        assert_close(task(&result, "B").earliest_start, 2.0);
        assert_close(task(&result, "C").earliest_start, 2.0);
        assert_close(task(&result, "B").earliest_finish, 6.0);
        assert_close(task(&result, "C").earliest_finish, 5.0);
        assert_close(task(&result, "D").earliest_start, 6.0);
        assert_close(task(&result, "D").earliest_finish, 11.0);
        assert_close(task(&result, "C").total_slack, 1.0);
        assert!(!task(&result, "C").is_critical);
        assert_eq!(result.critical_path, vec!["A", "B", "D"]);
    }

    #[test]
    fn test_disconnected_task_floats() {
        let mut tasks = diamond();
        tasks.push(make_task("F", 1.0, &[]));
        let result = calculate_schedule(&tasks);

        let f = task(&result, "F");
        assert_close(f.earliest_start, 0.0);
        assert_close(f.earliest_finish, 1.0);
        assert_close(f.latest_finish, 11.0);
        assert_close(f.total_slack, 10.0);
        assert_close(f.free_slack, 10.0);
        assert!(!f.is_critical);
    }

    #[test]
    fn test_demo_project() {
        let result = calculate_schedule(&demo_tasks());

        assert_close(result.project_duration, 13.0);
        assert_eq!(result.critical_path, vec!["A", "B", "D", "E"]);
        let names: Vec<&str> = result.critical_tasks().map(|t| t.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "A - Design UI",
                "B - Develop API",
                "D - Integrate API",
                "E - Testing"
            ]
        );
        assert!(!result.has_unresolved());
    }

    #[test]
    fn test_output_sorted_by_earliest_start_with_stable_ties() {
        let tasks = vec![
            make_task("late", 1.0, &["first"]),
            make_task("first", 3.0, &[]),
            make_task("other", 2.0, &[]),
        ];
        let result = calculate_schedule(&tasks);

        let order: Vec<&str> = result.tasks.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(order, vec!["first", "other", "late"]);
    }

    #[test]
    fn test_repeated_runs_are_identical() {
        let tasks = demo_tasks();
        assert_eq!(calculate_schedule(&tasks), calculate_schedule(&tasks));
    }

    #[test]
    fn test_input_order_does_not_change_times() {
        let forward = calculate_schedule(&demo_tasks());
        let mut reversed_input = demo_tasks();
        reversed_input.reverse();
        let reversed = calculate_schedule(&reversed_input);

        assert_close(forward.project_duration, reversed.project_duration);
        for t in &forward.tasks {
            let other = task(&reversed, &t.id);
            assert_eq!(t.earliest_start, other.earliest_start);
            assert_eq!(t.latest_finish, other.latest_finish);
            assert_eq!(t.total_slack, other.total_slack);
            assert_eq!(t.free_slack, other.free_slack);
            assert_eq!(t.is_critical, other.is_critical);
        }
    }

    #[test]
    fn test_slack_invariants_hold_on_acyclic_graph() {
        let tasks = vec![
            make_task("a", 3.0, &[]),
            make_task("b", 1.5, &["a"]),
            make_task("c", 7.0, &[]),
            make_task("d", 2.0, &["b", "c"]),
            make_task("e", 0.5, &["a"]),
            make_task("f", 4.0, &["e", "d"]),
            make_task("g", 1.0, &["e"]),
        ];
        let result = calculate_schedule(&tasks);

        let max_ef = result
            .tasks
            .iter()
            .map(|t| t.earliest_finish)
            .fold(0.0, f64::max);
        assert_close(result.project_duration, max_ef);

        for t in &result.tasks {
            assert!(t.total_slack >= -EPS, "{} has negative slack", t.id);
            assert!(t.free_slack <= t.total_slack + EPS, "{} free > total", t.id);
            assert_close(t.earliest_finish - t.earliest_start, t.duration);
            assert_close(t.latest_finish - t.latest_start, t.duration);
            assert_eq!(
                t.is_critical,
                result.critical_path.contains(&t.id),
                "{} critical flag disagrees with critical path",
                t.id
            );
        }
        // Sinks finish at the project horizon.
        for sink in ["f", "g"] {
            assert_close(task(&result, sink).latest_finish, result.project_duration);
        }
    }

    #[test]
    fn test_longer_duration_never_shortens_project() {
        let base = calculate_schedule(&demo_tasks()).project_duration;
        for i in 0..demo_tasks().len() {
            let mut tasks = demo_tasks();
            tasks[i].duration += 2.5;
            let longer = calculate_schedule(&tasks).project_duration;
            assert!(longer >= base, "growing task {} shortened the project", i);
        }
    }

    #[test]
    fn test_unknown_dependency_is_ignored() {
        let tasks = vec![make_task("a", 2.0, &[]), make_task("b", 3.0, &["ghost", "a"])];
        let result = calculate_schedule(&tasks);

        assert_close(task(&result, "b").earliest_start, 2.0);
        assert_close(result.project_duration, 5.0);
        assert!(!result.has_unresolved());
    }

    #[test]
    fn test_self_dependency_does_not_block() {
        let tasks = vec![make_task("a", 2.0, &["a"])];
        let result = calculate_schedule(&tasks);

        assert_close(result.project_duration, 2.0);
        assert!(task(&result, "a").is_critical);
        assert!(!result.has_unresolved());
    }

    #[test]
    fn test_cycle_is_flagged_without_failing() {
        // a -> b <-> c -> d, plus an independent x
        let tasks = vec![
            make_task("a", 2.0, &[]),
            make_task("b", 1.0, &["a", "c"]),
            make_task("c", 1.0, &["b"]),
            make_task("d", 1.0, &["c"]),
            make_task("x", 5.0, &[]),
        ];
        let result = calculate_schedule(&tasks);

        assert!(result.has_unresolved());
        assert_eq!(result.unresolved_ids().len(), 3);
        assert_eq!(
            task(&result, "b").scheduling_issue,
            Some(SchedulingIssue::InCycle)
        );
        assert_eq!(
            task(&result, "d").scheduling_issue,
            Some(SchedulingIssue::BlockedByCycle)
        );
        // Names are left untouched.
        assert_eq!(task(&result, "b").name, "Task b");

        for id in ["b", "c", "d"] {
            let t = task(&result, id);
            assert_eq!(t.earliest_finish, 0.0);
            assert_eq!(t.latest_finish, 0.0);
            assert!(t.total_slack.is_nan());
            assert!(t.free_slack.is_nan());
            assert!(!t.is_critical);
        }

        // The resolved part of the graph is still scheduled.
        assert_close(result.project_duration, 5.0);
        assert_close(task(&result, "a").total_slack, 3.0);
        assert_eq!(result.critical_path, vec!["x"]);
    }

    #[test]
    fn test_critical_flag_matches_zero_slack_with_cycle() {
        let tasks = vec![
            make_task("a", 1.0, &["b"]),
            make_task("b", 1.0, &["a"]),
            make_task("c", 3.0, &[]),
        ];
        let result = calculate_schedule(&tasks);

        for t in &result.tasks {
            assert_eq!(
                t.total_slack.abs() < CRITICAL_SLACK_TOLERANCE,
                t.is_critical,
                "{} has slack {} but is_critical={}",
                t.id,
                t.total_slack,
                t.is_critical
            );
            assert_eq!(result.critical_path.contains(&t.id), t.is_critical);
        }
        assert_eq!(result.critical_path, vec!["c"]);
    }

    #[test]
    fn test_zero_duration_milestone_is_critical() {
        let tasks = vec![
            make_task("work", 4.0, &[]),
            make_task("done", 0.0, &["work"]),
        ];
        let result = calculate_schedule(&tasks);

        let milestone = task(&result, "done");
        assert_close(milestone.earliest_start, 4.0);
        assert_close(milestone.latest_finish, 4.0);
        assert!(milestone.is_critical);
    }

    #[test]
    fn test_custom_tolerance() {
        let tasks = vec![make_task("a", 10.0, &[]), make_task("b", 9.99, &[])];
        let config = ScheduleConfig {
            critical_tolerance: 0.05,
            ..ScheduleConfig::default()
        };

        let strict = calculate_schedule(&tasks);
        let loose = calculate_schedule_with_config(&tasks, &config);

        assert!(!task(&strict, "b").is_critical);
        assert!(task(&loose, "b").is_critical);
    }

    #[test]
    fn test_checked_schedule_rejects_invalid_input() {
        let tasks = vec![make_task("a", 1.0, &["b"]), make_task("b", 1.0, &["a"])];
        let err = calculate_schedule_checked(&tasks, &ScheduleConfig::default()).unwrap_err();
        assert!(err.to_string().contains("dependency cycle"));

        let ok = calculate_schedule_checked(&demo_tasks(), &ScheduleConfig::default()).unwrap();
        assert_close(ok.project_duration, 13.0);
    }
}
