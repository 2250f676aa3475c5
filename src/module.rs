//! Walker-driven per-module analysis.
//!
//! One [`analyze_module`] call runs a single pass over a syntax tree. The
//! walker drives traversal; the analyser maintains the scope stack,
//! attributes every contribution to the innermost open function (when one
//! is open) and to the module aggregate, and finalises the derived metrics
//! after the walk.

use tracing::debug;

use crate::config::Settings;
use crate::error::{Error, Result};
use crate::report::{FunctionReport, ModuleReport};
use crate::walker::{Dependency, DependencyYield, LineSpan, ScopeHandlers, SourceNode, SyntaxRules, Walker};

/// Analyse one module's syntax tree into a [`ModuleReport`].
///
/// The report's `path` is left empty; the project analyser owns path
/// assignment.
///
/// # Errors
///
/// Returns [`Error::ZeroCyclomatic`] if the maintainability index is
/// requested for an average cyclomatic complexity of zero.
pub fn analyze_module<W: Walker>(
    ast: &W::Node,
    walker: &W,
    settings: &Settings,
) -> Result<ModuleReport> {
    let mut state = ModuleState::new(FunctionReport::new(None, ast.line_span(), 0));
    walker.walk(ast, settings, &mut state);
    debug!(
        functions = state.functions.len(),
        dependencies = state.dependencies.len(),
        "module walk complete"
    );
    state.into_report(settings)
}

/// Mutable walk state.
///
/// The scope stack holds indices into `functions`; the innermost open
/// scope is the last entry. Keeping indices instead of references makes
/// the "current report" an explicit lookup rather than shared state, and
/// reports stay mutable only while their index is on the stack.
struct ModuleState {
    aggregate: FunctionReport,
    functions: Vec<FunctionReport>,
    dependencies: Vec<Dependency>,
    scopes: Vec<usize>,
    dependencies_seen: bool,
}

impl ModuleState {
    fn new(aggregate: FunctionReport) -> Self {
        Self {
            aggregate,
            functions: Vec::new(),
            dependencies: Vec::new(),
            scopes: Vec::new(),
            dependencies_seen: false,
        }
    }

    fn into_report(mut self, settings: &Settings) -> Result<ModuleReport> {
        finalize_scope(&mut self.aggregate);
        for function in &mut self.functions {
            finalize_scope(function);
        }

        let (sums, count) = if self.functions.is_empty() {
            (ScopeSums::of(&self.aggregate), 1.0)
        } else {
            let mut sums = ScopeSums::default();
            for function in &self.functions {
                sums.add(function);
            }
            (sums, self.functions.len() as f64)
        };

        let loc = sums.logical / count;
        let cyclomatic = sums.cyclomatic / count;
        let effort = sums.effort / count;
        let params = sums.params / count;
        let maintainability = maintainability_index(effort, cyclomatic, loc, settings.newmi)?;

        Ok(ModuleReport {
            path: String::new(),
            aggregate: self.aggregate,
            functions: self.functions,
            dependencies: self.dependencies,
            maintainability,
            loc,
            cyclomatic,
            effort,
            params,
        })
    }
}

impl<N> ScopeHandlers<N> for ModuleState {
    fn create_scope(&mut self, name: Option<String>, span: Option<LineSpan>, params: u32) {
        self.aggregate.params += params;
        self.functions.push(FunctionReport::new(name, span, params));
        self.scopes.push(self.functions.len() - 1);
    }

    fn pop_scope(&mut self) {
        self.scopes.pop();
    }

    fn process_node(&mut self, node: &N, rules: &SyntaxRules<N>) {
        if let Some(count) = &rules.lloc {
            let lloc = count.evaluate(node);
            if let Some(&current) = self.scopes.last() {
                self.functions[current].sloc.logical += lloc;
            }
            self.aggregate.sloc.logical += lloc;
        }

        if let Some(count) = &rules.cyclomatic {
            let cyclomatic = count.evaluate(node);
            if let Some(&current) = self.scopes.last() {
                self.functions[current].cyclomatic += cyclomatic;
            }
            self.aggregate.cyclomatic += cyclomatic;
        }

        for rule in &rules.operators {
            if rule.applies(node) {
                let identifier = rule.text.resolve(node);
                if let Some(&current) = self.scopes.last() {
                    self.functions[current].halstead.operators.record(&identifier);
                }
                self.aggregate.halstead.operators.record(&identifier);
            }
        }

        for rule in &rules.operands {
            if rule.applies(node) {
                let identifier = rule.text.resolve(node);
                if let Some(&current) = self.scopes.last() {
                    self.functions[current].halstead.operands.record(&identifier);
                }
                self.aggregate.halstead.operands.record(&identifier);
            }
        }

        if let Some(extract) = &rules.dependencies {
            // The latch flips on invocation, whatever the extractor returns.
            let first = !self.dependencies_seen;
            self.dependencies_seen = true;
            match extract(node, first) {
                DependencyYield::One(dependency) => self.dependencies.push(dependency),
                DependencyYield::Many(batch) => self.dependencies.extend(batch),
                DependencyYield::None => {}
            }
        }
    }
}

fn finalize_scope(report: &mut FunctionReport) {
    report.halstead.finalize();
    report.cyclomatic_density =
        f64::from(report.cyclomatic) / f64::from(report.sloc.logical) * 100.0;
}

#[derive(Default)]
struct ScopeSums {
    logical: f64,
    cyclomatic: f64,
    effort: f64,
    params: f64,
}

impl ScopeSums {
    fn add(&mut self, report: &FunctionReport) {
        self.logical += f64::from(report.sloc.logical);
        self.cyclomatic += f64::from(report.cyclomatic);
        self.effort += report.halstead.effort;
        self.params += f64::from(report.params);
    }

    fn of(report: &FunctionReport) -> Self {
        let mut sums = Self::default();
        sums.add(report);
        sums
    }
}

/// `MI = 171 - 3.42 ln(effort) - 0.23 ln(cyclomatic) - 16.2 ln(loc)`,
/// clamped to at most 171. Zero averages drive the logarithms to negative
/// infinity and the index pins at the clamp.
fn maintainability_index(effort: f64, cyclomatic: f64, loc: f64, newmi: bool) -> Result<f64> {
    if cyclomatic == 0.0 {
        return Err(Error::ZeroCyclomatic);
    }

    let mut index = 171.0 - 3.42 * effort.ln() - 0.23 * cyclomatic.ln() - 16.2 * loc.ln();
    index = index.min(171.0);
    if newmi {
        index = (index * 100.0 / 171.0).max(0.0);
    }
    Ok(index)
}
