use super::lexer::{TokenKind, lex, token_text};

fn snapshot(input: &str) -> String {
    lex(input)
        .into_iter()
        .filter(|t| !t.kind.is_trivia())
        .map(|t| format!("{:?} {:?}\n", t.kind, token_text(input, &t)))
        .collect()
}

fn snapshot_raw(input: &str) -> String {
    lex(input)
        .into_iter()
        .map(|t| format!("{:?} {:?}\n", t.kind, token_text(input, &t)))
        .collect()
}

#[test]
fn punctuation() {
    insta::assert_snapshot!(snapshot("{ } ( ) : ; , | ? * +"), @r#"
    BraceOpen "{"
    BraceClose "}"
    ParenOpen "("
    ParenClose ")"
    Colon ":"
    Semicolon ";"
    Comma ","
    Pipe "|"
    Question "?"
    Star "*"
    Plus "+"
    "#);
}

#[test]
fn option_values() {
    insta::assert_snapshot!(snapshot(r#"12 -3.5 /\s+/ "a\"b" 'c' true false"#), @r#"
    Number "12"
    Number "-3.5"
    Regex "/\\s+/"
    DoubleQuoteString "\"a\\\"b\""
    SingleQuoteString "'c'"
    KwTrue "true"
    KwFalse "false"
    "#);
}

#[test]
fn keyword_prefix_is_identifier() {
    insta::assert_snapshot!(snapshot("trueish falsey _id rules2"), @r#"
    Id "trueish"
    Id "falsey"
    Id "_id"
    Id "rules2"
    "#);
}

#[test]
fn regex_with_escaped_slash() {
    insta::assert_snapshot!(snapshot(r"/a\/b/"), @r#"Regex "/a\\/b/""#);
}

#[test]
fn trivia_is_kept_by_lex() {
    insta::assert_snapshot!(snapshot_raw("a // c\n/* b */ c"), @r#"
    Id "a"
    Whitespace " "
    LineComment "// c"
    Newline "\n"
    BlockComment "/* b */"
    Whitespace " "
    Id "c"
    "#);
}

#[test]
fn comments_are_not_regexes() {
    insta::assert_snapshot!(snapshot("/*x*/ /x/ //y"), @r#"Regex "/x/""#);
}

#[test]
fn garbage_coalesces() {
    insta::assert_snapshot!(snapshot("a $%^ b"), @r#"
    Id "a"
    Garbage "$%^"
    Id "b"
    "#);
}

#[test]
fn trailing_garbage() {
    let tokens = lex("x @@");
    let last = tokens.last().unwrap();
    assert_eq!(last.kind, TokenKind::Garbage);
    assert_eq!(last.span.start, 2);
    assert_eq!(last.span.end, 4);
}

#[test]
fn lone_minus_is_garbage() {
    insta::assert_snapshot!(snapshot("- 1"), @r#"
    Garbage "-"
    Number "1"
    "#);
}

#[test]
fn describe_names() {
    assert_eq!(TokenKind::Semicolon.describe(), "`;`");
    assert_eq!(TokenKind::SingleQuoteString.describe(), "string");
    assert_eq!(TokenKind::Eof.describe(), "end of input");
}
