//! Command builders for the CLI.

use clap::Command;

use super::args::*;

/// Build the complete CLI with all subcommands.
pub fn build_cli() -> Command {
    Command::new("weft")
        .about("Lower grammar descriptions to a normalized AST")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(ast_command())
        .subcommand(cst_command())
        .subcommand(check_command())
}

/// Lower a grammar and print its AST.
pub fn ast_command() -> Command {
    Command::new("ast")
        .about("Show the lowered AST of a grammar")
        .override_usage(
            "\
  weft ast <FILE>
  weft ast -g <TEXT>
  weft ast --from-cst <FILE>",
        )
        .after_help(
            r#"EXAMPLES:
  weft ast calc.weft                          # indented AST
  weft ast calc.weft --json                   # AST as JSON
  weft ast -g 'rules { r: x; }'               # inline grammar
  weft ast --from-cst tree.json               # CST from an external parser
  weft ast calc.weft --on-duplicate error     # reject repeated token options"#,
        )
        .arg(grammar_path_arg())
        .arg(grammar_text_arg())
        .arg(json_arg())
        .arg(from_cst_arg())
        .arg(on_duplicate_arg())
        .arg(no_regex_check_arg())
        .arg(color_arg())
}

/// Parse a grammar and print its CST.
pub fn cst_command() -> Command {
    Command::new("cst")
        .about("Show the concrete syntax tree of a grammar")
        .override_usage(
            "\
  weft cst <FILE>
  weft cst -g <TEXT>",
        )
        .after_help(
            r#"EXAMPLES:
  weft cst calc.weft                  # role-labeled tree
  weft cst calc.weft --raw --spans    # with punctuation and byte ranges
  weft cst calc.weft --json           # input for `weft ast --from-cst`"#,
        )
        .arg(grammar_path_arg())
        .arg(grammar_text_arg())
        .arg(json_arg())
        .arg(raw_arg())
        .arg(spans_arg())
        .arg(color_arg())
}

/// Validate a grammar.
pub fn check_command() -> Command {
    Command::new("check")
        .about("Check that a grammar parses and lowers")
        .override_usage(
            "\
  weft check <FILE>
  weft check -g <TEXT>",
        )
        .after_help(
            r#"EXAMPLES:
  weft check calc.weft                # silent on success
  weft check - < calc.weft            # from stdin"#,
        )
        .arg(grammar_path_arg())
        .arg(grammar_text_arg())
        .arg(on_duplicate_arg())
        .arg(no_regex_check_arg())
        .arg(color_arg())
}
