pub mod ast;
pub mod check;
pub mod cst;
pub mod source_loader;

use weft_compiler::parser::{self, Parse};
use weft_compiler::{Config, LowerError};

use source_loader::LoadedSource;

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("grammar is required: use a FILE argument, \"-\" for stdin, or -g/--grammar")]
    MissingInput,

    #[error("failed to read {what}: {source}")]
    Read { what: String, source: std::io::Error },

    #[error("invalid CST document: {0}")]
    CstJson(serde_json::Error),

    #[error("failed to serialize output: {0}")]
    Output(#[from] serde_json::Error),

    #[error("could not lower grammar due to {count} previous errors")]
    Diagnostics { count: usize },

    #[error(transparent)]
    Compile(#[from] weft_compiler::Error),

    #[error(transparent)]
    Lower(#[from] LowerError),

    #[error(transparent)]
    Codec(#[from] weft_core::CodecError),
}

/// Parses `source`, printing any diagnostics to stderr.
pub(crate) fn parse_reported(
    source: &LoadedSource,
    config: &Config,
    color: bool,
) -> Result<Parse, CommandError> {
    let parse = parser::parse_with(&source.text, config)?;
    if !parse.diagnostics.is_empty() {
        eprintln!(
            "{}",
            parse
                .diagnostics
                .printer()
                .source(&source.text)
                .path(&source.name)
                .colored(color)
                .render()
        );
    }
    Ok(parse)
}

/// Fails when `parse` has errors; warnings pass.
pub(crate) fn ensure_no_errors(parse: &Parse) -> Result<(), CommandError> {
    if parse.diagnostics.has_errors() {
        return Err(CommandError::Diagnostics {
            count: parse.diagnostics.error_count(),
        });
    }
    Ok(())
}
