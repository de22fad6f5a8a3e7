//! Show the concrete syntax tree of a grammar.
//!
//! The tree is printed even when the source has syntax errors; recovered regions show up as
//! `r_error` nodes.

use weft_compiler::Config;
use weft_compiler::dump::CstPrinter;

use super::source_loader::GrammarInput;
use super::{CommandError, parse_reported};

pub struct CstArgs {
    pub input: GrammarInput,
    pub json: bool,
    pub raw: bool,
    pub spans: bool,
    pub color: bool,
}

pub fn run(args: CstArgs) -> Result<(), CommandError> {
    let source = args.input.load()?;
    let parse = parse_reported(&source, &Config::default(), args.color)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&parse.root)?);
        return Ok(());
    }

    let output = CstPrinter::new(&parse.root)
        .with_punctuation(args.raw)
        .with_spans(args.spans)
        .dump();
    print!("{output}");
    Ok(())
}
