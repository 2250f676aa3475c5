//! Report records produced by the module analyser.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::halstead::HalsteadMetrics;
use crate::walker::{Dependency, LineSpan};

/// Source-lines-of-code counts for one scope.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sloc {
    /// Physical line count; absent when the scope has no recorded location.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub physical: Option<u32>,
    /// Logical statement count, as determined by walker descriptors.
    pub logical: u32,
}

/// Metrics for one lexical scope: a function, or the module aggregate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionReport {
    /// Function name; `None` for anonymous functions and the aggregate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// First line; absent without a recorded location.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
    /// Declared parameter count.
    pub params: u32,
    /// Cyclomatic complexity. Starts at 1; every decision point adds.
    pub cyclomatic: u32,
    /// Line counts.
    pub sloc: Sloc,
    /// Halstead accumulators and derived scalars.
    pub halstead: HalsteadMetrics,
    /// Cyclomatic count per 100 logical source lines. Plain IEEE-754
    /// semantics apply when the scope has no logical lines; callers must
    /// tolerate infinity and NaN here.
    pub cyclomatic_density: f64,
}

impl FunctionReport {
    /// New report with baseline cyclomatic complexity 1 and empty bags.
    #[must_use]
    pub fn new(name: Option<String>, span: Option<LineSpan>, params: u32) -> Self {
        Self {
            name,
            line: span.map(|s| s.start),
            params,
            cyclomatic: 1,
            sloc: Sloc {
                physical: span.map(|s| s.physical_lines()),
                logical: 0,
            },
            halstead: HalsteadMetrics::default(),
            cyclomatic_density: 0.0,
        }
    }
}

/// Per-module analysis result.
///
/// The aggregate's Halstead bags are the first-seen-order union of every
/// function bag plus any tokens encountered outside all functions; its
/// totals are the corresponding sums.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleReport {
    /// Module path; attached by the project analyser, empty for a bare
    /// module analysis.
    pub path: String,
    /// Module-level aggregate across all scopes and top-level code.
    pub aggregate: FunctionReport,
    /// Per-function reports in creation order.
    pub functions: Vec<FunctionReport>,
    /// Dependency records captured during the walk.
    pub dependencies: Vec<Dependency>,
    /// Maintainability index: at most 171, or 0-100 under `newmi`.
    pub maintainability: f64,
    /// Mean logical SLOC per function.
    pub loc: f64,
    /// Mean cyclomatic complexity per function.
    pub cyclomatic: f64,
    /// Mean Halstead effort per function.
    pub effort: f64,
    /// Mean parameter count per function.
    pub params: f64,
}

impl ModuleReport {
    /// Risk classification of this module's maintainability index.
    ///
    /// The stored index is on the raw 171 scale unless the module was
    /// analysed with `newmi`; classification normalises before
    /// thresholding, so only call this on raw-scale reports. For `newmi`
    /// reports use [`RiskLevel::from_score`] directly.
    #[must_use]
    pub fn risk_level(&self) -> RiskLevel {
        RiskLevel::from_raw_index(self.maintainability)
    }
}

/// Risk classification for maintainability scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    /// Score 50-100: highly maintainable.
    Low,
    /// Score 20-49: moderately maintainable.
    Medium,
    /// Score 10-19: hard to maintain.
    High,
    /// Score 0-9: very hard to maintain.
    Critical,
}

impl RiskLevel {
    /// Classify a 0-100 maintainability score (the `newmi` scale).
    #[must_use]
    pub fn from_score(score: f64) -> Self {
        match score {
            s if s >= 50.0 => Self::Low,
            s if s >= 20.0 => Self::Medium,
            s if s >= 10.0 => Self::High,
            _ => Self::Critical,
        }
    }

    /// Classify a raw 171-scale maintainability index.
    #[must_use]
    pub fn from_raw_index(index: f64) -> Self {
        Self::from_score(index * 100.0 / 171.0)
    }

    /// Human-readable description of the risk level.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Low => "Highly maintainable",
            Self::Medium => "Moderately maintainable",
            Self::High => "Hard to maintain",
            Self::Critical => "Very hard to maintain",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
            Self::Critical => write!(f, "critical"),
        }
    }
}
