//! Shared argument builders for CLI commands.
//!
//! Each function returns a `clap::Arg` that commands compose as needed.

use std::path::PathBuf;

use clap::{Arg, ArgAction, value_parser};

/// Grammar file (positional). `-` reads stdin.
pub fn grammar_path_arg() -> Arg {
    Arg::new("grammar_path")
        .value_name("FILE")
        .value_parser(value_parser!(PathBuf))
        .help("Grammar file (use \"-\" for stdin)")
}

/// Inline grammar text (-g/--grammar).
pub fn grammar_text_arg() -> Arg {
    Arg::new("grammar_text")
        .short('g')
        .long("grammar")
        .value_name("TEXT")
        .conflicts_with("grammar_path")
        .help("Inline grammar text")
}

/// JSON output (--json).
pub fn json_arg() -> Arg {
    Arg::new("json")
        .long("json")
        .action(ArgAction::SetTrue)
        .help("Print JSON instead of an indented tree")
}

/// Input is a serialized CST (--from-cst).
pub fn from_cst_arg() -> Arg {
    Arg::new("from_cst")
        .long("from-cst")
        .action(ArgAction::SetTrue)
        .help("Read a JSON-serialized CST instead of grammar source")
}

/// Duplicate option handling (--on-duplicate).
pub fn on_duplicate_arg() -> Arg {
    Arg::new("on_duplicate")
        .long("on-duplicate")
        .value_name("POLICY")
        .default_value("last")
        .value_parser(["last", "first", "error"])
        .help("What to do when a token repeats an option")
}

/// Skip regex validation (--no-regex-check).
pub fn no_regex_check_arg() -> Arg {
    Arg::new("no_regex_check")
        .long("no-regex-check")
        .action(ArgAction::SetTrue)
        .help("Accept regex option values without checking them")
}

/// Show punctuation tokens (--raw).
pub fn raw_arg() -> Arg {
    Arg::new("raw")
        .long("raw")
        .action(ArgAction::SetTrue)
        .help("Include punctuation and keyword tokens")
}

/// Show source positions (--spans).
pub fn spans_arg() -> Arg {
    Arg::new("spans")
        .long("spans")
        .action(ArgAction::SetTrue)
        .help("Show source positions")
}

/// Color output control (--color).
pub fn color_arg() -> Arg {
    Arg::new("color")
        .long("color")
        .value_name("WHEN")
        .default_value("auto")
        .value_parser(["auto", "always", "never"])
        .help("Colorize diagnostics")
}
