//! Sample project used for demos and tests.

use crate::models::Task;

/// Six-task software project: a diamond (A, B, C, D), a follow-up (E) and an
/// independent task (F).
pub fn demo_tasks() -> Vec<Task> {
    [
        ("A", "A - Design UI", 2.0, &[][..]),
        ("B", "B - Develop API", 4.0, &["A"][..]),
        ("C", "C - Frontend Logic", 3.0, &["A"][..]),
        ("D", "D - Integrate API", 5.0, &["B", "C"][..]),
        ("E", "E - Testing", 2.0, &["D"][..]),
        ("F", "F - Documentation", 1.0, &[][..]),
    ]
    .into_iter()
    .map(|(id, name, duration, deps)| Task {
        id: id.to_string(),
        name: name.to_string(),
        duration,
        dependencies: deps.iter().map(|d| d.to_string()).collect(),
    })
    .collect()
}
