//! Parser state and low-level operations.

use weft_core::{CstNode, Span, Token as CstToken};

use super::kind::{NodeKind, role};
use super::lexer::{Token, TokenKind, token_text};
use crate::Error;
use crate::diagnostics::{DiagnosticKind, Diagnostics};

#[derive(Debug)]
pub struct ParseResult {
    pub root: CstNode<NodeKind>,
    pub diagnostics: Diagnostics,
}

/// Recursive-descent parser over trivia-free tokens.
///
/// Each production builds and returns its own node; callers file it under a role.
pub struct Parser<'src> {
    pub(super) source: &'src str,
    pub(super) tokens: Vec<Token>,
    pub(super) pos: usize,
    pub(super) diagnostics: Diagnostics,
    pub(super) depth: u32,
    last_diagnostic_pos: Option<u32>,
    recursion_fuel_limit: Option<u32>,
    fatal_error: Option<Error>,
}

impl<'src> Parser<'src> {
    pub fn new(source: &'src str, tokens: Vec<Token>) -> Self {
        Self {
            source,
            tokens: tokens.into_iter().filter(|t| !t.kind.is_trivia()).collect(),
            pos: 0,
            diagnostics: Diagnostics::new(),
            depth: 0,
            last_diagnostic_pos: None,
            recursion_fuel_limit: None,
            fatal_error: None,
        }
    }

    pub fn with_recursion_fuel(mut self, limit: Option<u32>) -> Self {
        self.recursion_fuel_limit = limit;
        self
    }

    pub fn parse(mut self) -> Result<ParseResult, Error> {
        let root = self.parse_root();
        if let Some(err) = self.fatal_error {
            return Err(err);
        }
        Ok(ParseResult {
            root,
            diagnostics: self.diagnostics,
        })
    }

    pub(super) fn has_fatal_error(&self) -> bool {
        self.fatal_error.is_some()
    }

    pub(super) fn current(&self) -> TokenKind {
        self.nth(0)
    }

    pub(super) fn nth(&self, lookahead: usize) -> TokenKind {
        self.tokens
            .get(self.pos + lookahead)
            .map_or(TokenKind::Eof, |t| t.kind)
    }

    pub(super) fn current_span(&self) -> Span {
        self.tokens
            .get(self.pos)
            .map_or_else(|| Span::new(self.eof_offset(), self.eof_offset()), |t| t.span)
    }

    /// Text of the current token, empty at end of input.
    pub(super) fn current_text(&self) -> &'src str {
        self.tokens
            .get(self.pos)
            .map_or("", |t| token_text(self.source, t))
    }

    fn eof_offset(&self) -> u32 {
        self.source.len() as u32
    }

    pub(super) fn eof(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    pub(super) fn should_stop(&self) -> bool {
        self.eof() || self.has_fatal_error()
    }

    pub(super) fn currently_is(&self, kind: TokenKind) -> bool {
        self.current() == kind
    }

    pub(super) fn currently_is_one_of(&self, set: &[TokenKind]) -> bool {
        set.contains(&self.current())
    }

    /// End of the last consumed token, or 0 at the start.
    pub(super) fn prev_end(&self) -> u32 {
        self.pos
            .checked_sub(1)
            .and_then(|i| self.tokens.get(i))
            .map_or(0, |t| t.span.end)
    }

    /// Consumes the current token, returning it as a CST terminal.
    pub(super) fn bump(&mut self) -> CstToken {
        let Some(token) = self.tokens.get(self.pos).copied() else {
            return CstToken::with_span("", self.current_span());
        };
        self.pos += 1;
        CstToken::with_span(token_text(self.source, &token), token.span)
    }

    pub(super) fn bump_into(&mut self, node: &mut CstNode<NodeKind>, role: &str) {
        let token = self.bump();
        node.push_token(role, token);
    }

    pub(super) fn eat(
        &mut self,
        node: &mut CstNode<NodeKind>,
        kind: TokenKind,
        role: &str,
    ) -> bool {
        if self.currently_is(kind) {
            self.bump_into(node, role);
            true
        } else {
            false
        }
    }

    /// On mismatch: emit diagnostic but don't consume.
    pub(super) fn expect(
        &mut self,
        node: &mut CstNode<NodeKind>,
        kind: TokenKind,
        role: &str,
        diagnostic: DiagnosticKind,
    ) -> bool {
        if self.eat(node, kind, role) {
            return true;
        }
        let span = self.current_span();
        if self.should_report(span.start) {
            let found = self.current().describe();
            self.diagnostics.report(diagnostic, span).found(found).emit();
        }
        false
    }

    fn should_report(&mut self, pos: u32) -> bool {
        if self.last_diagnostic_pos == Some(pos) {
            return false;
        }
        self.last_diagnostic_pos = Some(pos);
        true
    }

    pub(super) fn error(&mut self, kind: DiagnosticKind) {
        let span = self.current_span();
        if !self.should_report(span.start) {
            return;
        }
        self.diagnostics.report(kind, span).emit();
    }

    pub(super) fn error_msg(&mut self, kind: DiagnosticKind, message: impl Into<String>) {
        let span = self.current_span();
        if !self.should_report(span.start) {
            return;
        }
        self.diagnostics.report(kind, span).message(message).emit();
    }

    pub(super) fn error_at(&mut self, kind: DiagnosticKind, span: Span) {
        if !self.should_report(span.start) {
            return;
        }
        self.diagnostics.report(kind, span).emit();
    }

    pub(super) fn error_unclosed(
        &mut self,
        kind: DiagnosticKind,
        message: impl Into<String>,
        open: Span,
    ) {
        let current = self.current_span();
        if !self.should_report(current.start) {
            return;
        }
        self.diagnostics
            .report(kind, Span::new(open.start, current.end))
            .message(message)
            .related_to("opened here", open)
            .emit();
    }

    pub(super) fn error_with_fix(
        &mut self,
        kind: DiagnosticKind,
        span: Span,
        fix_description: impl Into<String>,
        fix_replacement: impl Into<String>,
    ) {
        if !self.should_report(span.start) {
            return;
        }
        self.diagnostics
            .report(kind, span)
            .fix(fix_description, Span::new(span.start, span.start), fix_replacement)
            .emit();
    }

    /// Reports the current token and consumes it into an error node under `node`.
    pub(super) fn error_and_bump(&mut self, node: &mut CstNode<NodeKind>, message: &str) {
        if self.currently_is(TokenKind::Garbage) {
            self.error(DiagnosticKind::InvalidCharacters);
        } else {
            self.error_msg(DiagnosticKind::UnexpectedToken, message);
        }
        if self.eof() {
            return;
        }
        let mut error = CstNode::new(NodeKind::Error);
        self.bump_into(&mut error, role::CONTENT);
        node.push_node(role::ERROR, error);
    }

    /// Skips tokens into an error node until one in `recovery` (or end of input).
    pub(super) fn recover_until(&mut self, node: &mut CstNode<NodeKind>, recovery: &[TokenKind]) {
        if self.currently_is_one_of(recovery) || self.should_stop() {
            return;
        }
        let mut error = CstNode::new(NodeKind::Error);
        while !self.currently_is_one_of(recovery) && !self.should_stop() {
            self.bump_into(&mut error, role::CONTENT);
        }
        node.push_node(role::ERROR, error);
    }

    pub(super) fn enter_recursion(&mut self) -> bool {
        if let Some(limit) = self.recursion_fuel_limit
            && self.depth >= limit
        {
            if self.fatal_error.is_none() {
                self.fatal_error = Some(Error::RecursionLimitExceeded);
            }
            return false;
        }
        self.depth += 1;
        true
    }

    pub(super) fn exit_recursion(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }
}
