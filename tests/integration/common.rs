//! Shared toy-language walker fixture.
//!
//! A small JS-flavoured syntax tree with just enough structure to drive
//! the analyser end to end: functions open scopes, `if` contributes a
//! decision point (and an `else` operator behind a filter), single-token
//! nodes carry their own classification, and `require` emits CommonJS
//! dependency records.

use complexion::{
    Count, Dependency, DependencyYield, LineSpan, ScopeHandlers, Settings, SourceNode,
    SyntaxRules, TokenRule, TokenText, Walker,
};

pub enum Ast {
    Program {
        span: Option<LineSpan>,
        body: Vec<Ast>,
    },
    Function {
        name: Option<&'static str>,
        span: Option<LineSpan>,
        params: u32,
        body: Vec<Ast>,
    },
    If {
        has_else: bool,
        body: Vec<Ast>,
        else_body: Vec<Ast>,
    },
    Stmt {
        children: Vec<Ast>,
    },
    Op(&'static str),
    Operand(&'static str),
    Require {
        target: &'static str,
        line: u32,
    },
}

impl SourceNode for Ast {
    fn line_span(&self) -> Option<LineSpan> {
        match self {
            Ast::Program { span, .. } | Ast::Function { span, .. } => *span,
            _ => None,
        }
    }
}

pub struct ToyWalker {
    function_rules: SyntaxRules<Ast>,
    if_rules: SyntaxRules<Ast>,
    stmt_rules: SyntaxRules<Ast>,
    op_rules: SyntaxRules<Ast>,
    operand_rules: SyntaxRules<Ast>,
    require_rules: SyntaxRules<Ast>,
}

impl ToyWalker {
    pub fn new() -> Self {
        Self {
            function_rules: SyntaxRules {
                lloc: Some(Count::Literal(1)),
                operators: vec![TokenRule::literal("function")],
                ..SyntaxRules::default()
            },
            if_rules: SyntaxRules {
                lloc: Some(Count::Literal(1)),
                cyclomatic: Some(Count::Literal(1)),
                operators: vec![
                    TokenRule::literal("if"),
                    TokenRule {
                        text: TokenText::Literal("else".to_owned()),
                        filter: Some(Box::new(|node: &Ast| {
                            matches!(node, Ast::If { has_else: true, .. })
                        })),
                    },
                ],
                ..SyntaxRules::default()
            },
            stmt_rules: SyntaxRules {
                lloc: Some(Count::Literal(1)),
                ..SyntaxRules::default()
            },
            op_rules: SyntaxRules {
                operators: vec![TokenRule {
                    text: TokenText::Computed(Box::new(|node: &Ast| match node {
                        Ast::Op(symbol) => (*symbol).to_owned(),
                        _ => String::new(),
                    })),
                    filter: None,
                }],
                ..SyntaxRules::default()
            },
            operand_rules: SyntaxRules {
                operands: vec![TokenRule {
                    text: TokenText::Computed(Box::new(|node: &Ast| match node {
                        Ast::Operand(name) => (*name).to_owned(),
                        _ => String::new(),
                    })),
                    filter: None,
                }],
                ..SyntaxRules::default()
            },
            require_rules: SyntaxRules {
                lloc: Some(Count::Literal(1)),
                operators: vec![TokenRule::literal("require")],
                dependencies: Some(Box::new(|node: &Ast, _clear: bool| match node {
                    Ast::Require { target, line } => DependencyYield::One(Dependency {
                        kind: "CommonJS".to_owned(),
                        path: (*target).to_owned(),
                        line: Some(*line),
                    }),
                    _ => DependencyYield::None,
                })),
                ..SyntaxRules::default()
            },
        }
    }

    fn visit(&self, node: &Ast, handlers: &mut dyn ScopeHandlers<Ast>) {
        match node {
            Ast::Program { body, .. } => {
                for child in body {
                    self.visit(child, handlers);
                }
            }
            Ast::Function {
                name, span, params, body,
            } => {
                handlers.process_node(node, &self.function_rules);
                handlers.create_scope(name.map(str::to_owned), *span, *params);
                for child in body {
                    self.visit(child, handlers);
                }
                handlers.pop_scope();
            }
            Ast::If {
                body, else_body, ..
            } => {
                handlers.process_node(node, &self.if_rules);
                for child in body {
                    self.visit(child, handlers);
                }
                for child in else_body {
                    self.visit(child, handlers);
                }
            }
            Ast::Stmt { children } => {
                handlers.process_node(node, &self.stmt_rules);
                for child in children {
                    self.visit(child, handlers);
                }
            }
            Ast::Op(_) | Ast::Operand(_) => {
                let rules = match node {
                    Ast::Op(_) => &self.op_rules,
                    _ => &self.operand_rules,
                };
                handlers.process_node(node, rules);
            }
            Ast::Require { .. } => handlers.process_node(node, &self.require_rules),
        }
    }
}

impl Walker for ToyWalker {
    type Node = Ast;

    fn walk(&self, ast: &Ast, _settings: &Settings, handlers: &mut dyn ScopeHandlers<Ast>) {
        self.visit(ast, handlers);
    }
}

/// A module whose top level is just `require` statements.
pub fn require_module(requires: &[&'static str]) -> Ast {
    Ast::Program {
        span: Some(LineSpan {
            start: 1,
            end: requires.len().max(1) as u32,
        }),
        body: requires
            .iter()
            .enumerate()
            .map(|(index, target)| Ast::Require {
                target,
                line: index as u32 + 1,
            })
            .collect(),
    }
}
