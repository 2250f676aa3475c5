//! Analysis settings and project-level options.

use serde::{Deserialize, Serialize};

/// Walker-facing analysis switches.
///
/// All five flags are forwarded opaquely to the walker, which uses them to
/// gate descriptor variants (whether `for..in` loops, short-circuit
/// disjunctions, switch cases, or catch clauses count as decision points).
/// `newmi` is the one switch the analyser itself consumes: it remaps the
/// maintainability index from the raw 171 scale onto 0-100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct Settings {
    /// Count `for..in` loops toward cyclomatic complexity.
    pub forin: bool,
    /// Count short-circuit disjunctions toward cyclomatic complexity.
    pub logicalor: bool,
    /// Remap the maintainability index to 0-100.
    pub newmi: bool,
    /// Count switch cases toward cyclomatic complexity.
    pub switchcase: bool,
    /// Count catch clauses toward cyclomatic complexity.
    pub trycatch: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            forin: false,
            logicalor: true,
            newmi: false,
            switchcase: true,
            trycatch: false,
        }
    }
}

/// Options for one project-level analysis run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectOptions {
    /// Per-module analysis settings.
    pub settings: Settings,
    /// Return bare module reports without matrices or project metrics.
    pub skip_calculation: bool,
    /// Skip the visibility matrix, change cost, and core size.
    pub no_core_size: bool,
}
