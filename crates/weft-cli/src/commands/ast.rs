//! Show the lowered AST of a grammar.

use weft_compiler::dump::GrammarPrinter;
use weft_compiler::{Config, DuplicateOptionPolicy, Lowerer, NodeKind};
use weft_core::{CstNode, Grammar};

use super::source_loader::{GrammarInput, LoadedSource};
use super::{CommandError, ensure_no_errors, parse_reported};

pub struct AstArgs {
    pub input: GrammarInput,
    pub json: bool,
    pub from_cst: bool,
    pub on_duplicate: DuplicateOptionPolicy,
    pub validate_regex: bool,
    pub color: bool,
}

pub fn run(args: AstArgs) -> Result<(), CommandError> {
    let source = args.input.load()?;
    let config = Config::new()
        .duplicate_options(args.on_duplicate)
        .validate_regex(args.validate_regex);

    let grammar = if args.from_cst {
        lower_cst_document(&source, config)?
    } else {
        let parse = parse_reported(&source, &config, args.color)?;
        ensure_no_errors(&parse)?;
        Lowerer::new(config).lower(&parse.root)?
    };

    if args.json {
        println!("{}", grammar.to_json()?);
    } else {
        print!("{}", GrammarPrinter::new(&grammar).dump());
    }
    Ok(())
}

/// Lowers a CST that an external parser serialized as JSON.
fn lower_cst_document(source: &LoadedSource, config: Config) -> Result<Grammar, CommandError> {
    let root: CstNode<NodeKind> =
        serde_json::from_str(&source.text).map_err(CommandError::CstJson)?;
    Ok(Lowerer::new(config).lower(&root)?)
}
