//! Walker-driven source complexity metrics.
//!
//! `complexion` computes per-function and per-module complexity reports
//! and project-level dependency-structure metrics. It owns no parser:
//! callers supply a syntax tree per module and a language walker that
//! drives the traversal, describing each node's metric contributions
//! through a descriptor table. The analyser is a pure callback recipient
//! that turns one walk into one report.
//!
//! # Per-module metrics
//!
//! - **Cyclomatic complexity**: 1 per function plus the walker's decision
//!   points, with a density relative to logical SLOC.
//! - **Halstead measures**: distinct/total operator and operand counts and
//!   the derived length, vocabulary, volume, difficulty, effort, bugs, and
//!   time scalars.
//! - **Logical SLOC**: statement counts as classified by the walker.
//! - **Maintainability index**:
//!   `171 - 3.42 ln(effort) - 0.23 ln(cyclomatic) - 16.2 ln(sloc)` over
//!   per-function averages, clamped to 171, optionally rescaled to 0-100.
//!
//! Every contribution is attributed twice: to the innermost open function
//! scope, and to the module aggregate.
//!
//! # Project metrics
//!
//! Module dependency records are resolved textually against the other
//! modules' paths to build an adjacency matrix; Floyd-Warshall over the
//! seeded distance matrix yields the visibility matrix (transitive
//! closure, zero diagonal), change cost (percentage of reachable cells),
//! and core size (percentage of modules with fan-in and fan-out at or
//! above the medians).

pub mod config;
pub mod error;
pub mod halstead;
pub mod module;
pub mod project;
pub mod report;
pub mod walker;

pub use config::{ProjectOptions, Settings};
pub use error::{Error, Result};
pub use halstead::{HalsteadMetrics, TokenBag};
pub use module::analyze_module;
pub use project::{analyze_project, process_results, Matrix, ModuleSource, ProjectAnalysis};
pub use report::{FunctionReport, ModuleReport, RiskLevel, Sloc};
pub use walker::{
    Count, Dependency, DependencyExtractor, DependencyYield, LineSpan, ScopeHandlers, SourceNode,
    SyntaxRules, TokenRule, TokenText, Walker,
};
