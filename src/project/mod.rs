//! Project-level analysis: per-module fan-out, dependency matrices, and
//! project averages.
//!
//! Every module analysis is a pure function of its syntax tree, the
//! walker, and the settings, so modules fan out across rayon and merge
//! afterwards. Matrix construction and Floyd-Warshall run once, after
//! every module has been analysed.

mod matrix;
mod resolve;

pub use matrix::Matrix;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::ProjectOptions;
use crate::error::{Error, Result};
use crate::module::analyze_module;
use crate::report::ModuleReport;
use crate::walker::Walker;

/// One module to analyse: its syntax tree and project-relative path.
#[derive(Debug, Clone)]
pub struct ModuleSource<N> {
    /// Parsed syntax tree of the module.
    pub ast: N,
    /// Module path; must be non-empty.
    pub path: String,
}

/// Project-level analysis result.
///
/// Matrix rows index `reports`, which is sorted by path once
/// [`process_results`] has run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectAnalysis {
    /// Per-module reports.
    pub reports: Vec<ModuleReport>,
    /// Direct dependency matrix.
    pub adjacency_matrix: Matrix,
    /// Transitive closure of the adjacency matrix, zero diagonal.
    pub visibility_matrix: Matrix,
    /// Percentage of direct dependencies among all module pairs.
    pub first_order_density: f64,
    /// Percentage of reachable cells in the distance matrix.
    pub change_cost: f64,
    /// Percentage of modules in the core component set.
    pub core_size: f64,
    /// Mean of the module `loc` averages.
    pub loc: f64,
    /// Mean of the module `cyclomatic` averages.
    pub cyclomatic: f64,
    /// Mean of the module `effort` averages.
    pub effort: f64,
    /// Mean of the module `params` averages.
    pub params: f64,
    /// Mean module maintainability index.
    pub maintainability: f64,
}

/// Analyse every module and derive the project metrics.
///
/// Modules are analysed in parallel; the first failure aborts the run
/// with the module's path wrapped around the underlying error, and no
/// partial results are returned. With `options.skip_calculation` the
/// reports come back unsorted, with empty matrices and zeroed project
/// metrics, ready for a later [`process_results`] pass.
///
/// # Errors
///
/// [`Error::InvalidInput`] for an empty module path;
/// [`Error::Module`] wrapping any per-module failure.
pub fn analyze_project<W>(
    modules: &[ModuleSource<W::Node>],
    walker: &W,
    options: &ProjectOptions,
) -> Result<ProjectAnalysis>
where
    W: Walker + Sync,
    W::Node: Sync,
{
    debug!(modules = modules.len(), "analyzing project");

    let reports: Vec<ModuleReport> = modules
        .par_iter()
        .map(|module| {
            if module.path.is_empty() {
                return Err(Error::InvalidInput("module path is empty".to_owned()));
            }
            let mut report = analyze_module(&module.ast, walker, &options.settings)
                .map_err(|source| Error::Module {
                    path: module.path.clone(),
                    source: Box::new(source),
                })?;
            report.path.clone_from(&module.path);
            Ok(report)
        })
        .collect::<Result<_>>()?;

    let mut analysis = ProjectAnalysis {
        reports,
        ..ProjectAnalysis::default()
    };
    if !options.skip_calculation {
        process_results(&mut analysis, options.no_core_size);
    }
    Ok(analysis)
}

/// Sort the reports, build the matrices, and fill in the project metrics.
///
/// Public so a run made with `skip_calculation` can be processed later.
/// Idempotent: the matrices are derived from the reports alone, so a
/// second pass reproduces them.
pub fn process_results(analysis: &mut ProjectAnalysis, no_core_size: bool) {
    analysis
        .reports
        .sort_by(|a, b| resolve::compare_paths(&a.path, &b.path));

    let adjacency = resolve::adjacency_matrix(&analysis.reports);
    analysis.first_order_density = matrix::density(&adjacency);
    debug!(
        modules = analysis.reports.len(),
        first_order_density = analysis.first_order_density,
        "adjacency matrix built"
    );

    if !no_core_size {
        let (visibility, change_cost) = matrix::visibility_matrix(&adjacency);
        analysis.core_size = matrix::core_size(&visibility, analysis.first_order_density);
        analysis.change_cost = change_cost;
        analysis.visibility_matrix = visibility;
    }
    analysis.adjacency_matrix = adjacency;

    let divisor = if analysis.reports.is_empty() {
        1.0
    } else {
        analysis.reports.len() as f64
    };
    let mut loc = 0.0;
    let mut cyclomatic = 0.0;
    let mut effort = 0.0;
    let mut params = 0.0;
    let mut maintainability = 0.0;
    for report in &analysis.reports {
        loc += report.loc;
        cyclomatic += report.cyclomatic;
        effort += report.effort;
        params += report.params;
        maintainability += report.maintainability;
    }
    analysis.loc = loc / divisor;
    analysis.cyclomatic = cyclomatic / divisor;
    analysis.effort = effort / divisor;
    analysis.params = params / divisor;
    analysis.maintainability = maintainability / divisor;
}
