//! Logging macros for the CPM engine with verbosity level control.
//!
//! Logging is free when disabled (verbosity=0). Output goes to stderr so the
//! Python host keeps stdout for itself.
//! - 0: SILENT (nothing)
//! - 1: SUMMARY (project duration, critical path, cycle warnings)
//! - 2: PHASES (per-phase progress: graph build, passes, derivation)
//! - 3: DEBUG (per-task values and dropped edges)

pub const VERBOSITY_SILENT: u8 = 0;
pub const VERBOSITY_SUMMARY: u8 = 1;
pub const VERBOSITY_PHASES: u8 = 2;
pub const VERBOSITY_DEBUG: u8 = 3;

/// Log at SUMMARY level (verbosity >= 1).
#[macro_export]
macro_rules! log_summary {
    ($verbosity:expr, $($arg:tt)*) => {
        if $verbosity >= $crate::logging::VERBOSITY_SUMMARY {
            eprintln!("[cpm] {}", format_args!($($arg)*));
        }
    };
}

/// Log at PHASES level (verbosity >= 2).
#[macro_export]
macro_rules! log_phases {
    ($verbosity:expr, $($arg:tt)*) => {
        if $verbosity >= $crate::logging::VERBOSITY_PHASES {
            eprintln!("[cpm]   {}", format_args!($($arg)*));
        }
    };
}

/// Log at DEBUG level (verbosity >= 3).
///
/// Used for per-task timings and dropped dependency references.
#[macro_export]
macro_rules! log_debug {
    ($verbosity:expr, $($arg:tt)*) => {
        if $verbosity >= $crate::logging::VERBOSITY_DEBUG {
            eprintln!("[cpm]     {}", format_args!($($arg)*));
        }
    };
}
