//! CST-to-AST lowering.
//!
//! Each CST node kind has one rule registered on a [`Visitor`]. Rules pull the children they
//! care about, recurse through the visitor, and hand a [`Lowered`] value back to their parent;
//! the root rule produces the final [`Grammar`].

mod error;
mod fields;
mod lowered;
mod rules;


pub use error::LowerError;
pub use lowered::Lowered;

use std::sync::LazyLock;

use weft_core::{Children, CstNode, Grammar, Visitor};

use crate::Config;
use crate::parser::{NodeKind, role};

pub type LowerVisitor = Visitor<NodeKind, Lowered, LowerError>;

static DEFAULT_LOWERER: LazyLock<Lowerer> = LazyLock::new(|| Lowerer::new(Config::default()));

/// Lowers `root` with the default configuration.
pub fn lower(root: &CstNode<NodeKind>) -> Result<Grammar, LowerError> {
    DEFAULT_LOWERER.lower(root)
}

/// Configured lowering rules. Cheap to share across threads.
#[derive(Debug)]
pub struct Lowerer {
    visitor: LowerVisitor,
    nesting_limit: Option<u32>,
}

impl Default for Lowerer {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl Lowerer {
    pub fn new(config: Config) -> Self {
        let visitor = if config.strict {
            LowerVisitor::strict()
        } else {
            LowerVisitor::new()
        };
        Self {
            visitor: register_rules(visitor, config),
            nesting_limit: config.recursion_fuel,
        }
    }

    /// Lowers a CST rooted at an `r_root` node.
    ///
    /// Trees nested deeper than the recursion fuel allows are rejected before any rule runs,
    /// so a CST the parser accepted with the same fuel always fits.
    pub fn lower(&self, root: &CstNode<NodeKind>) -> Result<Grammar, LowerError> {
        if let Some(limit) = self.nesting_limit {
            let depth = root.depth_by(|kind| {
                matches!(kind, NodeKind::RuleBodyExpr | NodeKind::RuleBodyExprPth)
            });
            if depth > limit as usize {
                return Err(LowerError::NestingTooDeep { depth, limit });
            }
        }

        let grammar = self.visitor.visit(root)?.into_grammar()?;
        tracing::debug!(
            fields = grammar.fields.len(),
            tokens = grammar.tokens().count(),
            rules = grammar.rules().count(),
            "lowered grammar"
        );
        Ok(grammar)
    }

    /// The underlying visitor, for lowering a subtree. Visiting directly skips the nesting
    /// check.
    pub fn visitor(&self) -> &LowerVisitor {
        &self.visitor
    }
}

fn register_rules(visitor: LowerVisitor, config: Config) -> LowerVisitor {
    let policy = config.duplicate_options;
    let validate_regex = config.validate_regex;
    visitor
        .on(NodeKind::Root, fields::lower_root)
        .on(NodeKind::RootField, fields::lower_field)
        .on(NodeKind::Token, move |c, v| fields::lower_token(c, v, policy))
        .on(NodeKind::TokenOption, fields::lower_option)
        .on(NodeKind::TokenOptionValue, move |c, _| {
            fields::lower_option_value(c, validate_regex)
        })
        .on(NodeKind::Rules, rules::lower_rules)
        .on(NodeKind::Rule, rules::lower_rule)
        .on(NodeKind::RuleOrSequence, rules::lower_or_sequence)
        .on(NodeKind::RuleSequence, rules::lower_sequence)
        .on(NodeKind::RuleBodyExpr, rules::lower_expr)
        .on(NodeKind::RuleBodyExprBinary, rules::lower_binary)
        .on(NodeKind::RuleBodyExprUnary, rules::lower_unary)
        .on(NodeKind::RuleBodyExprScalar, rules::lower_scalar)
        .on(NodeKind::RuleBodyExprPth, rules::lower_pth)
}

fn required_name(children: &Children<NodeKind>, kind: NodeKind) -> Result<String, LowerError> {
    children
        .token(role::NAME)
        .map(|t| t.image.clone())
        .ok_or(LowerError::MissingChild {
            kind,
            role: role::NAME,
        })
}
