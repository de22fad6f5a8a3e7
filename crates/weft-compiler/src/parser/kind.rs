//! CST node kinds and the role labels children are filed under.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Kind tag of a CST node. Serialized as its `r_*` production name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    #[serde(rename = "r_root")]
    Root,
    #[serde(rename = "r_root_field")]
    RootField,
    #[serde(rename = "r_token")]
    Token,
    #[serde(rename = "r_token_option")]
    TokenOption,
    #[serde(rename = "r_token_option_value")]
    TokenOptionValue,
    #[serde(rename = "r_rules")]
    Rules,
    #[serde(rename = "r_rule")]
    Rule,
    #[serde(rename = "r_rule_or_sequence")]
    RuleOrSequence,
    #[serde(rename = "r_rule_sequence")]
    RuleSequence,
    #[serde(rename = "r_rule_body_expr")]
    RuleBodyExpr,
    #[serde(rename = "r_rule_body_expr_binary")]
    RuleBodyExprBinary,
    #[serde(rename = "r_rule_body_expr_unary")]
    RuleBodyExprUnary,
    #[serde(rename = "r_rule_body_expr_scalar")]
    RuleBodyExprScalar,
    #[serde(rename = "r_rule_body_expr_pth")]
    RuleBodyExprPth,
    /// Tokens skipped during error recovery.
    #[serde(rename = "r_error")]
    Error,
}

impl NodeKind {
    pub fn tag(self) -> &'static str {
        match self {
            NodeKind::Root => "r_root",
            NodeKind::RootField => "r_root_field",
            NodeKind::Token => "r_token",
            NodeKind::TokenOption => "r_token_option",
            NodeKind::TokenOptionValue => "r_token_option_value",
            NodeKind::Rules => "r_rules",
            NodeKind::Rule => "r_rule",
            NodeKind::RuleOrSequence => "r_rule_or_sequence",
            NodeKind::RuleSequence => "r_rule_sequence",
            NodeKind::RuleBodyExpr => "r_rule_body_expr",
            NodeKind::RuleBodyExprBinary => "r_rule_body_expr_binary",
            NodeKind::RuleBodyExprUnary => "r_rule_body_expr_unary",
            NodeKind::RuleBodyExprScalar => "r_rule_body_expr_scalar",
            NodeKind::RuleBodyExprPth => "r_rule_body_expr_pth",
            NodeKind::Error => "r_error",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Role labels.
pub mod role {
    pub const FIELDS: &str = "fields";
    pub const RULES: &str = "rules";
    pub const NAME: &str = "name";
    pub const TOKENS: &str = "tokens";
    pub const OPTIONS: &str = "options";
    pub const VALUE: &str = "value";
    pub const CONTENT: &str = "content";
    pub const KEYWORD: &str = "keyword";

    pub const NUMBER: &str = "number";
    pub const REGEX: &str = "regex";
    pub const DOUBLE_QUOTE_STRING: &str = "double_quote_string";
    pub const SINGLE_QUOTE_STRING: &str = "single_quote_string";
    pub const IDENTIFIER: &str = "identifier";
    pub const TRUE: &str = "true";
    pub const FALSE: &str = "false";

    pub const BODY: &str = "body";
    pub const EXPR: &str = "expr";
    pub const ELEMS: &str = "elems";
    pub const SCALAR: &str = "scalar";
    pub const PTH: &str = "pth";
    pub const OPTIONAL: &str = "optional";
    pub const MANY: &str = "many";
    pub const MANY1: &str = "many1";

    // Punctuation
    pub const LCURLY: &str = "lcurly";
    pub const RCURLY: &str = "rcurly";
    pub const LPAREN: &str = "lparen";
    pub const RPAREN: &str = "rparen";
    pub const COLON: &str = "colon";
    pub const COMMA: &str = "comma";
    pub const SEMICOLON: &str = "semicolon";
    pub const PIPE: &str = "pipe";
    pub const ERROR: &str = "error";
}
