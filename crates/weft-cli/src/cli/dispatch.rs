//! Dispatch logic: extract params from ArgMatches and convert to command args.
//!
//! - `*Params` structs hold what a command reads from clap
//! - `from_matches()` pulls those fields out of the matches
//! - `Into<*Args>` bridges to the command handlers, resolving terminal detection

use std::path::PathBuf;

use clap::ArgMatches;
use weft_compiler::DuplicateOptionPolicy;

use super::ColorChoice;
use crate::commands::ast::AstArgs;
use crate::commands::check::CheckArgs;
use crate::commands::cst::CstArgs;
use crate::commands::source_loader::GrammarInput;

pub struct AstParams {
    pub grammar_path: Option<PathBuf>,
    pub grammar_text: Option<String>,
    pub json: bool,
    pub from_cst: bool,
    pub on_duplicate: DuplicateOptionPolicy,
    pub validate_regex: bool,
    pub color: ColorChoice,
}

impl AstParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            grammar_path: m.get_one::<PathBuf>("grammar_path").cloned(),
            grammar_text: m.get_one::<String>("grammar_text").cloned(),
            json: m.get_flag("json"),
            from_cst: m.get_flag("from_cst"),
            on_duplicate: parse_on_duplicate(m),
            validate_regex: !m.get_flag("no_regex_check"),
            color: parse_color(m),
        }
    }
}

impl From<AstParams> for AstArgs {
    fn from(p: AstParams) -> Self {
        Self {
            input: GrammarInput::new(p.grammar_path, p.grammar_text),
            json: p.json,
            from_cst: p.from_cst,
            on_duplicate: p.on_duplicate,
            validate_regex: p.validate_regex,
            color: p.color.should_colorize(),
        }
    }
}

pub struct CstParams {
    pub grammar_path: Option<PathBuf>,
    pub grammar_text: Option<String>,
    pub json: bool,
    pub raw: bool,
    pub spans: bool,
    pub color: ColorChoice,
}

impl CstParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            grammar_path: m.get_one::<PathBuf>("grammar_path").cloned(),
            grammar_text: m.get_one::<String>("grammar_text").cloned(),
            json: m.get_flag("json"),
            raw: m.get_flag("raw"),
            spans: m.get_flag("spans"),
            color: parse_color(m),
        }
    }
}

impl From<CstParams> for CstArgs {
    fn from(p: CstParams) -> Self {
        Self {
            input: GrammarInput::new(p.grammar_path, p.grammar_text),
            json: p.json,
            raw: p.raw,
            spans: p.spans,
            color: p.color.should_colorize(),
        }
    }
}

pub struct CheckParams {
    pub grammar_path: Option<PathBuf>,
    pub grammar_text: Option<String>,
    pub on_duplicate: DuplicateOptionPolicy,
    pub validate_regex: bool,
    pub color: ColorChoice,
}

impl CheckParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            grammar_path: m.get_one::<PathBuf>("grammar_path").cloned(),
            grammar_text: m.get_one::<String>("grammar_text").cloned(),
            on_duplicate: parse_on_duplicate(m),
            validate_regex: !m.get_flag("no_regex_check"),
            color: parse_color(m),
        }
    }
}

impl From<CheckParams> for CheckArgs {
    fn from(p: CheckParams) -> Self {
        Self {
            input: GrammarInput::new(p.grammar_path, p.grammar_text),
            on_duplicate: p.on_duplicate,
            validate_regex: p.validate_regex,
            color: p.color.should_colorize(),
        }
    }
}

fn parse_color(m: &ArgMatches) -> ColorChoice {
    match m.get_one::<String>("color").map(|s| s.as_str()) {
        Some("always") => ColorChoice::Always,
        Some("never") => ColorChoice::Never,
        _ => ColorChoice::Auto,
    }
}

fn parse_on_duplicate(m: &ArgMatches) -> DuplicateOptionPolicy {
    match m.get_one::<String>("on_duplicate").map(|s| s.as_str()) {
        Some("first") => DuplicateOptionPolicy::FirstWins,
        Some("error") => DuplicateOptionPolicy::Reject,
        _ => DuplicateOptionPolicy::LastWins,
    }
}
