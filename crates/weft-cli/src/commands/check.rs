use weft_compiler::{Config, DuplicateOptionPolicy, Lowerer};

use super::source_loader::GrammarInput;
use super::{CommandError, ensure_no_errors, parse_reported};

pub struct CheckArgs {
    pub input: GrammarInput,
    pub on_duplicate: DuplicateOptionPolicy,
    pub validate_regex: bool,
    pub color: bool,
}

pub fn run(args: CheckArgs) -> Result<(), CommandError> {
    let source = args.input.load()?;
    let config = Config::new()
        .duplicate_options(args.on_duplicate)
        .validate_regex(args.validate_regex);

    let parse = parse_reported(&source, &config, args.color)?;
    ensure_no_errors(&parse)?;
    let grammar = Lowerer::new(config).lower(&parse.root)?;

    tracing::info!(
        tokens = grammar.tokens().count(),
        rules = grammar.rules().count(),
        "grammar ok"
    );
    // Silent on success (like cargo check)
    Ok(())
}
