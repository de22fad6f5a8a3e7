//! weft compiler front end.
//!
//! - `parser` - logos lexer and the reference recursive-descent parser producing a role-labeled CST
//! - `lower` - lowering rules turning that CST into a [`weft_core::Grammar`]
//! - `diagnostics` - syntax error collection and rendering
//! - `dump` - indented text views of CSTs and grammar ASTs
//!
//! ```
//! let grammar = weft_compiler::lower_source(r"tokens { WS: { regex: /\s+/ } }").unwrap();
//! assert_eq!(grammar.token("WS").unwrap().options.len(), 1);
//! ```

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod config;
pub mod diagnostics;
pub mod dump;
pub mod lower;
pub mod parser;


pub use config::{Config, DuplicateOptionPolicy};
pub use diagnostics::{Diagnostics, DiagnosticsPrinter, Severity};
pub use lower::{LowerError, Lowerer};
pub use parser::{NodeKind, Parse};

use weft_core::Grammar;

/// Errors from parsing and lowering a grammar document.
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    /// Recursion fuel exhausted (input nested too deeply).
    #[error("recursion limit exceeded")]
    RecursionLimitExceeded,

    #[error("grammar parsing failed with {} errors", .0.error_count())]
    Parse(Diagnostics),

    #[error(transparent)]
    Lower(#[from] LowerError),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Parses `source` and lowers it with the default configuration.
pub fn lower_source(source: &str) -> Result<Grammar> {
    lower_source_with(source, Config::default())
}

/// Parses `source` and lowers it with `config`.
///
/// Documents with syntax errors are not lowered; their diagnostics come back in
/// [`Error::Parse`].
pub fn lower_source_with(source: &str, config: Config) -> Result<Grammar> {
    let parse = parser::parse_with(source, &config)?;
    if parse.diagnostics.has_errors() {
        return Err(Error::Parse(parse.diagnostics));
    }
    Ok(Lowerer::new(config).lower(&parse.root)?)
}
