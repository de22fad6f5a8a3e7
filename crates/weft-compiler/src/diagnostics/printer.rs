//! Rendering of collected diagnostics.
//!
//! With a source attached, each diagnostic becomes an annotated snippet (plus a `help` patch
//! when it carries a fix). Without one, each becomes a single `severity at start..end` line.
//! Both forms list diagnostics in source order.

use std::fmt::Write;

use annotate_snippets::{AnnotationKind, Group, Level, Patch, Renderer, Snippet};
use weft_core::Span;

use super::Diagnostics;
use super::message::{DiagnosticMessage, Severity};

pub struct DiagnosticsPrinter<'d, 's> {
    diagnostics: &'d Diagnostics,
    source: Option<&'s str>,
    path: Option<&'s str>,
    colored: bool,
}

impl<'d, 's> DiagnosticsPrinter<'d, 's> {
    pub fn new(diagnostics: &'d Diagnostics) -> Self {
        Self {
            diagnostics,
            source: None,
            path: None,
            colored: false,
        }
    }

    pub fn source(mut self, source: &'s str) -> Self {
        self.source = Some(source);
        self
    }

    /// Name shown in snippet headers, or as a line prefix in plain output.
    pub fn path(mut self, path: &'s str) -> Self {
        self.path = Some(path);
        self
    }

    pub fn colored(mut self, value: bool) -> Self {
        self.colored = value;
        self
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = self.format(&mut out);
        out
    }

    pub fn format(&self, w: &mut impl Write) -> std::fmt::Result {
        let mut ordered: Vec<&DiagnosticMessage> = self.diagnostics.iter().collect();
        ordered.sort_by_key(|d| d.span.start);

        let Some(source) = self.source else {
            return self.format_lines(&ordered, w);
        };
        let renderer = if self.colored {
            Renderer::styled()
        } else {
            Renderer::plain()
        };

        for (i, diag) in ordered.into_iter().enumerate() {
            if i > 0 {
                w.write_char('\n')?;
            }
            let report = self.report(diag, source);
            write!(w, "{}", renderer.render(&report))?;
        }
        Ok(())
    }

    fn format_lines(&self, ordered: &[&DiagnosticMessage], w: &mut impl Write) -> std::fmt::Result {
        for (i, diag) in ordered.iter().enumerate() {
            if i > 0 {
                w.write_char('\n')?;
            }
            if let Some(path) = self.path {
                write!(w, "{path}: ")?;
            }
            write!(w, "{diag}")?;
        }
        Ok(())
    }

    fn report<'a>(&'a self, diag: &'a DiagnosticMessage, source: &'a str) -> Vec<Group<'a>> {
        let mut snippet = Snippet::source(source).line_start(1).annotation(
            AnnotationKind::Primary
                .span(visible_range(diag.span, source.len()))
                .label(&diag.message),
        );
        if let Some(path) = self.path {
            snippet = snippet.path(path);
        }
        for related in &diag.related {
            snippet = snippet.annotation(
                AnnotationKind::Context
                    .span(visible_range(related.span, source.len()))
                    .label(&related.message),
            );
        }

        let mut report = vec![level(diag.severity()).primary_title(&diag.message).element(snippet)];
        if let Some(fix) = &diag.fix {
            let patch = Snippet::source(source)
                .line_start(1)
                .patch(Patch::new(fix.span.range(), &fix.replacement));
            report.push(Level::HELP.secondary_title(&fix.description).element(patch));
        }
        report
    }
}

fn level(severity: Severity) -> Level<'static> {
    match severity {
        Severity::Error => Level::ERROR,
        Severity::Warning => Level::WARNING,
    }
}

/// Empty spans are widened to one character so the caret is visible.
fn visible_range(span: Span, limit: usize) -> std::ops::Range<usize> {
    let range = span.range();
    if range.is_empty() {
        return range.start..(range.start + 1).min(limit);
    }
    range
}

impl Diagnostics {
    pub fn printer(&self) -> DiagnosticsPrinter<'_, '_> {
        DiagnosticsPrinter::new(self)
    }
}
