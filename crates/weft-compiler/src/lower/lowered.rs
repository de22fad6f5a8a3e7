//! Intermediate values exchanged between lowering handlers.

use weft_core::{BodyElement, CstNode, Field, Grammar, NamedValue, OptionValue, RuleDef, TokenDef};

use super::LowerError;
use crate::parser::NodeKind;

/// What a handler hands back to its parent.
#[derive(Debug, Clone, PartialEq)]
pub enum Lowered {
    Grammar(Grammar),
    Field(Field),
    Token(TokenDef),
    Option { name: String, value: OptionValue },
    OptionValue(OptionValue),
    Rule(RuleDef),
    /// One alternative of a leading-pipe rule body, merged into `Or` by the rule handler.
    OrBranch(Vec<BodyElement>),
    /// Rule-level sequence; `None` for an empty one.
    Sequence(Option<Vec<BodyElement>>),
    /// Elements to splice into the enclosing sequence.
    Elements(Vec<BodyElement>),
    Element(BodyElement),
    /// Operand of a unary expression.
    Operand(NamedValue),
    /// Node no rule applies to, returned unchanged.
    Node(CstNode<NodeKind>),
}

impl From<CstNode<NodeKind>> for Lowered {
    fn from(node: CstNode<NodeKind>) -> Self {
        Lowered::Node(node)
    }
}

impl Lowered {
    pub fn describe(&self) -> &'static str {
        match self {
            Lowered::Grammar(_) => "grammar",
            Lowered::Field(_) => "field",
            Lowered::Token(_) => "token",
            Lowered::Option { .. } => "option",
            Lowered::OptionValue(_) => "option value",
            Lowered::Rule(_) => "rule",
            Lowered::OrBranch(_) => "alternative",
            Lowered::Sequence(_) => "sequence",
            Lowered::Elements(_) => "element list",
            Lowered::Element(_) => "element",
            Lowered::Operand(_) => "operand",
            Lowered::Node(_) => "unlowered node",
        }
    }

    fn unexpected(&self, expected: &'static str) -> LowerError {
        LowerError::UnexpectedShape {
            expected,
            found: self.describe(),
        }
    }

    pub fn into_grammar(self) -> Result<Grammar, LowerError> {
        match self {
            Lowered::Grammar(grammar) => Ok(grammar),
            other => Err(other.unexpected("grammar")),
        }
    }

    pub fn into_field(self) -> Result<Field, LowerError> {
        match self {
            Lowered::Field(field) => Ok(field),
            other => Err(other.unexpected("field")),
        }
    }

    pub fn into_token(self) -> Result<TokenDef, LowerError> {
        match self {
            Lowered::Token(token) => Ok(token),
            other => Err(other.unexpected("token")),
        }
    }

    pub fn into_option(self) -> Result<(String, OptionValue), LowerError> {
        match self {
            Lowered::Option { name, value } => Ok((name, value)),
            other => Err(other.unexpected("option")),
        }
    }

    pub fn into_option_value(self) -> Result<OptionValue, LowerError> {
        match self {
            Lowered::OptionValue(value) => Ok(value),
            other => Err(other.unexpected("option value")),
        }
    }

    pub fn into_rule(self) -> Result<RuleDef, LowerError> {
        match self {
            Lowered::Rule(rule) => Ok(rule),
            other => Err(other.unexpected("rule")),
        }
    }

    pub fn into_sequence(self) -> Result<Option<Vec<BodyElement>>, LowerError> {
        match self {
            Lowered::Sequence(elements) => Ok(elements),
            other => Err(other.unexpected("sequence")),
        }
    }

    pub fn into_operand(self) -> Result<NamedValue, LowerError> {
        match self {
            Lowered::Operand(value) => Ok(value),
            other => Err(other.unexpected("operand")),
        }
    }

    /// Elements this value contributes to a flat body.
    pub fn into_elements(self) -> Result<Vec<BodyElement>, LowerError> {
        match self {
            Lowered::Elements(elements) => Ok(elements),
            Lowered::Element(element) => Ok(vec![element]),
            Lowered::Sequence(elements) => Ok(elements.unwrap_or_default()),
            other => Err(other.unexpected("body elements")),
        }
    }
}
