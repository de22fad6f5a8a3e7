use weft_core::Span;

use super::*;

#[test]
fn severity_display() {
    insta::assert_snapshot!(format!("{}", Severity::Error), @"error");
    insta::assert_snapshot!(format!("{}", Severity::Warning), @"warning");
}

#[test]
fn report_with_default_message() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::ExpectedColon, Span::new(0, 5))
        .emit();

    assert_eq!(diagnostics.len(), 1);
    assert!(diagnostics.has_errors());
    assert_eq!(diagnostics.iter().next().unwrap().message(), "expected `:`");
}

#[test]
fn report_with_detail() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::ExpectedColon, Span::new(0, 5))
        .message("after token name `WS`")
        .emit();
    diagnostics
        .report(DiagnosticKind::UnclosedBlock, Span::new(6, 7))
        .message("`tokens` block opened here")
        .emit();

    let messages: Vec<_> = diagnostics.iter().map(|d| d.message()).collect();
    assert_eq!(
        messages,
        [
            "expected `:`: after token name `WS`",
            "missing closing `}`; `tokens` block opened here",
        ]
    );
}

#[test]
fn warnings_are_not_errors() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::EmptyBlock, Span::new(0, 2))
        .emit();

    assert!(!diagnostics.has_errors());
    assert!(diagnostics.has_warnings());
    assert_eq!(diagnostics.error_count(), 0);
    assert_eq!(diagnostics.warning_count(), 1);
}

#[test]
fn plain_format_without_source() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::ExpectedSemicolon, Span::new(7, 7))
        .fix("add `;`", Span::new(7, 7), ";")
        .emit();
    diagnostics
        .report(DiagnosticKind::UnclosedGroup, Span::new(0, 1))
        .related_to("opened here", Span::new(0, 1))
        .emit();

    insta::assert_snapshot!(diagnostics.printer().render(), @r"
    error at 0..1: missing closing `)` (related: opened here at 0..1)
    error at 7..7: expected `;` (fix: add `;`)
    ");
}

#[test]
fn plain_format_prefixes_path() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::EmptyBlock, Span::new(7, 9))
        .message("no tokens declared")
        .emit();

    insta::assert_snapshot!(
        diagnostics.printer().path("calc.weft").render(),
        @"calc.weft: warning at 7..9: empty block: no tokens declared"
    );
}

#[test]
fn builder_with_related() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::UnclosedGroup, Span::new(0, 5))
        .message("primary")
        .related_to("related info", Span::new(6, 10))
        .emit();

    let result = diagnostics.render("hello world!");
    insta::assert_snapshot!(result, @r"
    error: missing closing `)`; primary
      |
    1 | hello world!
      | ^^^^^ ---- related info
    ");
}

#[test]
fn render_empty() {
    assert_eq!(Diagnostics::new().render("tokens {}"), "");
}
