//! Reference parser for weft grammar files.
//!
//! Produces the role-labeled CST consumed by [`crate::lower`]. Any other producer of the same
//! tree shape (for instance a JSON document deserialized into `CstNode<NodeKind>`) can be
//! lowered the same way.
//!
//! # Recovery
//!
//! The parser always produces a tree. Unexpected tokens are reported and wrapped in
//! `r_error` nodes; lists resynchronize at `,` and `}`, rules at `;` and `}`. Running out of
//! recursion fuel is the only fatal outcome.

pub mod kind;
pub mod lexer;

mod core;
mod grammar;

#[cfg(test)]
mod lexer_tests;
#[cfg(test)]
mod parser_tests;

pub use self::core::{ParseResult, Parser};
pub use kind::{NodeKind, role};

use weft_core::CstNode;

use crate::Config;
use crate::diagnostics::Diagnostics;

/// Parsed document. The tree is always complete; check `diagnostics` before trusting it.
#[derive(Debug, Clone)]
pub struct Parse {
    pub root: CstNode<NodeKind>,
    pub diagnostics: Diagnostics,
}

/// Parses with the default recursion fuel. Returns `Err` only on fuel exhaustion.
pub fn parse(source: &str) -> crate::Result<Parse> {
    parse_with(source, &Config::default())
}

pub fn parse_with(source: &str, config: &Config) -> crate::Result<Parse> {
    let tokens = lexer::lex(source);
    let token_count = tokens.len();
    let result = Parser::new(source, tokens)
        .with_recursion_fuel(config.recursion_fuel)
        .parse()?;
    tracing::debug!(
        tokens = token_count,
        fields = result.root.children.get(role::FIELDS).len(),
        errors = result.diagnostics.error_count(),
        warnings = result.diagnostics.warning_count(),
        "parsed grammar source"
    );
    Ok(Parse {
        root: result.root,
        diagnostics: result.diagnostics,
    })
}
