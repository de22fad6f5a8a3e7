use indoc::indoc;

use super::{NodeKind, parse, parse_with, role};
use crate::dump::CstPrinter;
use crate::{Config, Error};

fn dump(input: &str) -> String {
    let parse = parse(input).unwrap();
    assert!(
        parse.diagnostics.is_empty(),
        "unexpected diagnostics:\n{}",
        parse.diagnostics.printer().render()
    );
    CstPrinter::new(&parse.root).dump()
}

fn diagnostics(input: &str) -> String {
    let parse = parse(input).unwrap();
    parse.diagnostics.printer().render()
}

#[test]
fn token_block() {
    let input = indoc! {r#"
    tokens {
      WS: { regex: /\s+/, ignore: true }
    }
    "#};

    insta::assert_snapshot!(dump(input), @r#"
    r_root
      fields: r_root_field
        name: "tokens"
        tokens: r_token
          name: "WS"
          options: r_token_option
            name: "regex"
            value: r_token_option_value
              regex: "/\\s+/"
          options: r_token_option
            name: "ignore"
            value: r_token_option_value
              true: "true"
    "#);
}

#[test]
fn token_block_trailing_comma() {
    let input = indoc! {r#"
    tokens {
      NUM: { regex: /[0-9]+/, priority: 2, },
      ID: { alias: NAME },
    }
    "#};

    insta::assert_snapshot!(dump(input), @r#"
    r_root
      fields: r_root_field
        name: "tokens"
        tokens: r_token
          name: "NUM"
          options: r_token_option
            name: "regex"
            value: r_token_option_value
              regex: "/[0-9]+/"
          options: r_token_option
            name: "priority"
            value: r_token_option_value
              number: "2"
        tokens: r_token
          name: "ID"
          options: r_token_option
            name: "alias"
            value: r_token_option_value
              identifier: "NAME"
    "#);
}

#[test]
fn rule_with_group_and_modifiers() {
    let input = indoc! {r#"
    rules {
      start: 'a' ('b' | 'c')+ 'd'?;
    }
    "#};

    insta::assert_snapshot!(dump(input), @r#"
    r_root
      fields: r_root_field
        rules: r_rules
          rules: r_rule
            name: "start"
            body: r_rule_sequence
              expr: r_rule_body_expr
                value: r_rule_body_expr_binary
                  elems: r_rule_body_expr_unary
                    scalar: r_rule_body_expr_scalar
                      single_quote_string: "'a'"
                  elems: r_rule_body_expr_unary
                    scalar: r_rule_body_expr_scalar
                      pth: r_rule_body_expr_pth
                        value: r_rule_body_expr
                          value: r_rule_body_expr_binary
                            elems: r_rule_body_expr_unary
                              scalar: r_rule_body_expr_scalar
                                single_quote_string: "'b'"
                            elems: "|"
                            elems: r_rule_body_expr_unary
                              scalar: r_rule_body_expr_scalar
                                single_quote_string: "'c'"
                    many1: "+"
                  elems: r_rule_body_expr_unary
                    scalar: r_rule_body_expr_scalar
                      single_quote_string: "'d'"
                    optional: "?"
    "#);
}

#[test]
fn leading_pipe_alternatives() {
    let input = indoc! {r#"
    rules {
      value:
        | NUM
        | 'x' y
        ;
    }
    "#};

    insta::assert_snapshot!(dump(input), @r#"
    r_root
      fields: r_root_field
        rules: r_rules
          rules: r_rule
            name: "value"
            body: r_rule_or_sequence
              value: r_rule_sequence
                expr: r_rule_body_expr
                  value: r_rule_body_expr_binary
                    elems: r_rule_body_expr_unary
                      scalar: r_rule_body_expr_scalar
                        identifier: "NUM"
            body: r_rule_or_sequence
              value: r_rule_sequence
                expr: r_rule_body_expr
                  value: r_rule_body_expr_binary
                    elems: r_rule_body_expr_unary
                      scalar: r_rule_body_expr_scalar
                        single_quote_string: "'x'"
                    elems: r_rule_body_expr_unary
                      scalar: r_rule_body_expr_scalar
                        identifier: "y"
    "#);
}

#[test]
fn labeled_element() {
    let input = indoc! {r#"
    rules {
      pair: key: ID ":" value: expr*;
    }
    "#};

    insta::assert_snapshot!(dump(input), @r#"
    r_root
      fields: r_root_field
        rules: r_rules
          rules: r_rule
            name: "pair"
            body: r_rule_sequence
              expr: r_rule_body_expr
                value: r_rule_body_expr_binary
                  elems: r_rule_body_expr_unary
                    name: "key"
                    scalar: r_rule_body_expr_scalar
                      identifier: "ID"
                  elems: r_rule_body_expr_unary
                    scalar: r_rule_body_expr_scalar
                      double_quote_string: "\":\""
                  elems: r_rule_body_expr_unary
                    name: "value"
                    scalar: r_rule_body_expr_scalar
                      identifier: "expr"
                    many: "*"
    "#);
}

#[test]
fn empty_rule_body() {
    insta::assert_snapshot!(dump("rules { nothing: ; }"), @r#"
    r_root
      fields: r_root_field
        rules: r_rules
          rules: r_rule
            name: "nothing"
            body: r_rule_sequence
    "#);
}

#[test]
fn punctuation_is_kept_in_tree() {
    let parse = parse("rules { a: x; }").unwrap();
    let out = CstPrinter::new(&parse.root).with_punctuation(true).dump();

    insta::assert_snapshot!(out, @r#"
    r_root
      fields: r_root_field
        rules: r_rules
          keyword: "rules"
          lcurly: "{"
          rules: r_rule
            name: "a"
            colon: ":"
            body: r_rule_sequence
              expr: r_rule_body_expr
                value: r_rule_body_expr_binary
                  elems: r_rule_body_expr_unary
                    scalar: r_rule_body_expr_scalar
                      identifier: "x"
            semicolon: ";"
          rcurly: "}"
    "#);
}

#[test]
fn other_field_with_value() {
    let parse = parse("start: expr").unwrap();
    let out = CstPrinter::new(&parse.root)
        .with_punctuation(true)
        .with_spans(true)
        .dump();

    insta::assert_snapshot!(out, @r#"
    r_root
      fields: r_root_field
        name: "start" [0..5]
        colon: ":" [5..6]
        value: r_token_option_value
          identifier: "expr" [7..11]
    "#);
}

#[test]
fn other_field_with_balanced_block() {
    insta::assert_snapshot!(dump("options { a b { c } }"), @r#"
    r_root
      fields: r_root_field
        name: "options"
        content: "a"
        content: "b"
        content: "{"
        content: "c"
        content: "}"
    "#);
}

#[test]
fn fields_keep_source_order() {
    let input = indoc! {r#"
    name: "calc"
    tokens { NUM: { regex: /[0-9]+/ } }
    rules { expr: NUM; }
    "#};
    let parse = parse(input).unwrap();
    let names: Vec<_> = parse
        .root
        .children
        .nodes(role::FIELDS)
        .inspect(|field| assert_eq!(field.kind, NodeKind::RootField))
        .map(|field| match field.children.token(role::NAME) {
            Some(name) => name.image.as_str(),
            None => "rules",
        })
        .collect();

    assert_eq!(names, ["name", "tokens", "rules"]);
    assert!(parse.diagnostics.is_empty());
}

#[test]
fn comments_between_rules() {
    let input = indoc! {r#"
    rules {
      // first
      a: x; /* inline */ b: y;
    }
    "#};
    let parse = parse(input).unwrap();
    let rules = parse.root.children.nodes(role::FIELDS).next().unwrap();
    let rules = rules.children.nodes(role::RULES).next().unwrap();

    assert_eq!(rules.children.nodes(role::RULES).count(), 2);
    assert!(parse.diagnostics.is_empty());
}

#[test]
fn error_missing_semicolon() {
    insta::assert_snapshot!(diagnostics("rules { a: x }"), @"error at 12..14: expected `;` (fix: terminate the rule with `;`)");
}

#[test]
fn error_unclosed_group() {
    insta::assert_snapshot!(diagnostics("rules { a: ('x' ; }"), @"error at 11..17: missing closing `)`; group is not closed (related: opened here at 11..12)");
}

#[test]
fn error_empty_group() {
    insta::assert_snapshot!(diagnostics("rules { a: (); }"), @"error at 11..13: empty `()` is not allowed");
}

#[test]
fn error_missing_colon_after_token_name() {
    insta::assert_snapshot!(diagnostics("tokens { WS { regex: /a/ } }"), @"error at 12..13: expected `:`, found `{`");
}

#[test]
fn error_missing_comma_between_tokens() {
    let input = "tokens { A: { x: 1 } B: { y: 2 } }";
    let parse = parse(input).unwrap();

    insta::assert_snapshot!(parse.diagnostics.printer().render(), @"error at 21..22: unexpected token: expected `,` between items");

    let field = parse.root.children.nodes(role::FIELDS).next().unwrap();
    assert_eq!(field.children.nodes(role::TOKENS).count(), 2);
}

#[test]
fn invalid_characters_and_empty_block() {
    insta::assert_snapshot!(diagnostics("$$ tokens {}"), @r"
    error at 0..2: invalid characters
    warning at 10..12: empty block: no tokens declared
    ");
}

#[test]
fn error_node_wraps_skipped_token() {
    let parse = parse("$$ rules { a: x; }").unwrap();
    let out = CstPrinter::new(&parse.root).dump();

    insta::assert_snapshot!(out, @r#"
    r_root
      error: r_error
        content: "$$"
      fields: r_root_field
        rules: r_rules
          rules: r_rule
            name: "a"
            body: r_rule_sequence
              expr: r_rule_body_expr
                value: r_rule_body_expr_binary
                  elems: r_rule_body_expr_unary
                    scalar: r_rule_body_expr_scalar
                      identifier: "x"
    "#);
}

#[test]
fn error_unclosed_rules_block() {
    let parse = parse("rules { a: x;").unwrap();
    let diag = parse.diagnostics.iter().next().unwrap();

    assert_eq!(parse.diagnostics.len(), 1);
    assert_eq!(diag.message(), "missing closing `}`; `rules` block is not closed");
}

#[test]
fn rendered_diagnostic_with_fix() {
    let input = "rules { a: x }";
    let parse = parse(input).unwrap();
    let out = parse.diagnostics.printer().source(input).render();

    assert!(out.contains("expected `;`"));
    assert!(out.contains("terminate the rule with `;`"));
    assert!(out.contains("rules { a: x }"));
}

#[test]
fn recursion_limit_is_fatal() {
    let depth = 10;
    let input = format!("rules {{ a: {}x{}; }}", "(".repeat(depth), ")".repeat(depth));
    let config = Config::default().recursion_fuel(Some(8));

    let err = parse_with(&input, &config).unwrap_err();
    assert!(matches!(err, Error::RecursionLimitExceeded));
}

#[test]
fn unbounded_fuel_parses_deep_nesting() {
    let depth = 100;
    let input = format!("rules {{ a: {}x{}; }}", "(".repeat(depth), ")".repeat(depth));
    let config = Config::default().recursion_fuel(None);

    let parse = parse_with(&input, &config).unwrap();
    assert!(parse.diagnostics.is_empty());
}
