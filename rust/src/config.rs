//! Configuration for the CPM engine.

use pyo3::prelude::*;

/// Slack below this magnitude counts as zero when deciding criticality.
///
/// Absorbs floating error accumulated across the forward and backward passes.
pub const CRITICAL_SLACK_TOLERANCE: f64 = 1e-3;

/// Engine configuration.
#[pyclass]
#[derive(Clone, Debug, PartialEq)]
pub struct ScheduleConfig {
    /// A task is critical when `|total_slack| < critical_tolerance`.
    #[pyo3(get, set)]
    pub critical_tolerance: f64,
    /// Verbosity level: 0=silent, 1=summary, 2=phases, 3=debug.
    #[pyo3(get, set)]
    pub verbosity: u8,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            critical_tolerance: CRITICAL_SLACK_TOLERANCE,
            verbosity: 0,
        }
    }
}

#[pymethods]
impl ScheduleConfig {
    #[new]
    #[pyo3(signature = (critical_tolerance=None, verbosity=None))]
    fn new(critical_tolerance: Option<f64>, verbosity: Option<u8>) -> Self {
        let defaults = Self::default();
        Self {
            critical_tolerance: critical_tolerance.unwrap_or(defaults.critical_tolerance),
            verbosity: verbosity.unwrap_or(defaults.verbosity),
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "ScheduleConfig(critical_tolerance={}, verbosity={})",
            self.critical_tolerance, self.verbosity
        )
    }
}
