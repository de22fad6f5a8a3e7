//! Errors raised while lowering a CST.
//!
//! Every variant is fatal: lowering is all-or-nothing per document. Variants that describe a
//! malformed node carry its children rendered with the compact `role=child` summary.

use weft_core::UnhandledNode;

use crate::parser::NodeKind;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LowerError {
    /// None of the value roles of an option value node is populated.
    #[error("unrecognized option value: {children}")]
    UnrecognizedOptionValue { children: String },

    #[error("unrecognized scalar expression: {children}")]
    UnrecognizedScalar { children: String },

    /// A unary expression has no operand.
    #[error("unary expression without a value: {children}")]
    MissingScalar { children: String },

    #[error("parenthesized expression without a value: {children}")]
    MissingParenthesizedValue { children: String },

    #[error("{kind} node is missing its `{role}` child")]
    MissingChild { kind: NodeKind, role: &'static str },

    /// A child lowered to something its parent cannot use.
    #[error("expected {expected}, found {found}")]
    UnexpectedShape {
        expected: &'static str,
        found: &'static str,
    },

    #[error("invalid number `{image}`")]
    InvalidNumber { image: String },

    #[error("invalid regex `/{pattern}/`: {message}")]
    InvalidRegex { pattern: String, message: String },

    #[error("token `{token}` declares option `{option}` more than once")]
    DuplicateOption { token: String, option: String },

    /// More than one of `?`, `*`, `+` on one unary expression.
    #[error("conflicting repetition modifiers: {children}")]
    ConflictingModifiers { children: String },

    /// Expression nesting exceeds the configured recursion fuel.
    #[error("expression nesting depth {depth} exceeds the limit of {limit}")]
    NestingTooDeep { depth: usize, limit: u32 },

    #[error("no lowering rule for {kind} nodes")]
    UnhandledNode { kind: NodeKind },
}

impl From<UnhandledNode<NodeKind>> for LowerError {
    fn from(e: UnhandledNode<NodeKind>) -> Self {
        LowerError::UnhandledNode { kind: e.kind }
    }
}
