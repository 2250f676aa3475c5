//! The traversal contract between a language walker and the analyser.
//!
//! The analyser never inspects node structure beyond an optional line span.
//! A walker owns the traversal order and a descriptor table keyed by each
//! node's syntactic kind; for every node it visits it hands the analyser
//! the node together with the matching [`SyntaxRules`], and brackets
//! function bodies with [`ScopeHandlers::create_scope`] /
//! [`ScopeHandlers::pop_scope`].
//!
//! Descriptor closures are `Send + Sync` so one descriptor table can be
//! shared across a parallel project run.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::config::Settings;

// =============================================================================
// NODES
// =============================================================================

/// Inclusive 1-indexed line range of a syntax node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineSpan {
    /// First line of the node.
    pub start: u32,
    /// Last line of the node. Walkers guarantee `end >= start`.
    pub end: u32,
}

impl LineSpan {
    /// Number of physical lines covered.
    #[must_use]
    pub const fn physical_lines(&self) -> u32 {
        self.end - self.start + 1
    }
}

/// Minimal view of a syntax node required by the analyser.
pub trait SourceNode {
    /// Line range of this node, when the parser recorded one.
    fn line_span(&self) -> Option<LineSpan>;
}

// =============================================================================
// DESCRIPTORS
// =============================================================================

/// A dependency record emitted by a walker descriptor.
///
/// Opaque to the module analyser; the project analyser gives
/// `kind == "CommonJS"` relative-path semantics when matching modules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependency {
    /// Dependency mechanism, e.g. `"CommonJS"` or `"AMD"`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Path text as written in the source.
    pub path: String,
    /// Line the dependency appears on, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
}

/// What a dependency extractor produced for one node.
///
/// Only records and record batches are kept; an extractor with nothing to
/// report yields `None`.
pub enum DependencyYield {
    /// Nothing to record.
    None,
    /// A single dependency record.
    One(Dependency),
    /// A batch of dependency records.
    Many(Vec<Dependency>),
}

/// Extractor invoked once per node whose descriptor carries it. The
/// boolean is the first-invocation latch: `true` exactly once per walk.
pub type DependencyExtractor<N> = Box<dyn Fn(&N, bool) -> DependencyYield + Send + Sync>;

/// A count contribution: fixed, or computed from the node.
pub enum Count<N> {
    /// The same contribution for every node of this kind.
    Literal(u32),
    /// Contribution derived from the node, e.g. the number of switch cases.
    Computed(Box<dyn Fn(&N) -> u32 + Send + Sync>),
}

impl<N> Count<N> {
    pub(crate) fn evaluate(&self, node: &N) -> u32 {
        match self {
            Self::Literal(count) => *count,
            Self::Computed(f) => f(node),
        }
    }
}

/// Identifier text for a Halstead token: fixed, or computed from the node.
pub enum TokenText<N> {
    /// A fixed identifier, e.g. the keyword `"if"`.
    Literal(String),
    /// Identifier read off the node, e.g. a binary operator's symbol.
    Computed(Box<dyn Fn(&N) -> String + Send + Sync>),
}

impl<N> TokenText<N> {
    pub(crate) fn resolve(&self, node: &N) -> Cow<'_, str> {
        match self {
            Self::Literal(text) => Cow::Borrowed(text),
            Self::Computed(f) => Cow::Owned(f(node)),
        }
    }
}

/// One operator/operand production for a syntactic kind.
pub struct TokenRule<N> {
    /// Identifier recorded in the Halstead bags.
    pub text: TokenText<N>,
    /// Optional gate; the rule is skipped when it returns false.
    pub filter: Option<Box<dyn Fn(&N) -> bool + Send + Sync>>,
}

impl<N> TokenRule<N> {
    /// Rule that unconditionally records a fixed identifier.
    #[must_use]
    pub fn literal(text: impl Into<String>) -> Self {
        Self {
            text: TokenText::Literal(text.into()),
            filter: None,
        }
    }

    pub(crate) fn applies(&self, node: &N) -> bool {
        self.filter.as_ref().map_or(true, |filter| filter(node))
    }
}

/// Metric descriptor for one syntactic kind.
///
/// All fields are optional; an empty descriptor contributes nothing. Each
/// contribution is attributed to the innermost open function (when any)
/// and to the module aggregate.
pub struct SyntaxRules<N> {
    /// Logical source lines contributed by a node of this kind.
    pub lloc: Option<Count<N>>,
    /// Cyclomatic decision points contributed by a node of this kind.
    pub cyclomatic: Option<Count<N>>,
    /// Operator tokens produced by a node of this kind.
    pub operators: Vec<TokenRule<N>>,
    /// Operand tokens produced by a node of this kind.
    pub operands: Vec<TokenRule<N>>,
    /// Dependency extractor, for import-like kinds.
    pub dependencies: Option<DependencyExtractor<N>>,
}

impl<N> Default for SyntaxRules<N> {
    fn default() -> Self {
        Self {
            lloc: None,
            cyclomatic: None,
            operators: Vec::new(),
            operands: Vec::new(),
            dependencies: None,
        }
    }
}

// =============================================================================
// TRAVERSAL
// =============================================================================

/// Callbacks the walker invokes in traversal order.
pub trait ScopeHandlers<N> {
    /// A function scope opened: its name (`None` for anonymous functions),
    /// its span, and its declared parameter count.
    fn create_scope(&mut self, name: Option<String>, span: Option<LineSpan>, params: u32);

    /// The innermost open scope closed.
    fn pop_scope(&mut self);

    /// A node was visited; `rules` is the walker's descriptor for its kind.
    fn process_node(&mut self, node: &N, rules: &SyntaxRules<N>);
}

/// A language traversal driver.
pub trait Walker {
    /// Syntax node type this walker traverses.
    type Node: SourceNode;

    /// Walk `ast`, invoking `handlers` in traversal order. `settings` are
    /// forwarded opaquely; walkers use them to gate descriptor variants.
    fn walk(
        &self,
        ast: &Self::Node,
        settings: &Settings,
        handlers: &mut dyn ScopeHandlers<Self::Node>,
    );
}
