//! Grammar productions.
//!
//! ```text
//! root         = root_field*
//! root_field   = "rules" "{" rule* "}"
//!              | "tokens" "{" (token ("," token)* ","?)? "}"
//!              | Id ("{" balanced "}" | ":" option_value)
//! token        = Id ":" "{" (option ("," option)* ","?)? "}"
//! option       = Id ":" option_value
//! rule         = Id ":" ("|" sequence)+ ";"
//!              | Id ":" sequence ";"
//! sequence     = expr*
//! expr         = unary* ("|" unary*)*        // "|" only outside the leading-pipe form
//! unary        = (Id ":")? scalar ("?" | "*" | "+")?
//! scalar       = String | Id | "(" expr ")"
//! ```

use weft_core::{CstNode, Span};

use super::core::Parser;
use super::kind::{NodeKind, role};
use super::lexer::TokenKind;
use crate::diagnostics::DiagnosticKind;

const OPTION_VALUE_FIRST: &[TokenKind] = &[
    TokenKind::Number,
    TokenKind::Regex,
    TokenKind::DoubleQuoteString,
    TokenKind::SingleQuoteString,
    TokenKind::Id,
    TokenKind::KwTrue,
    TokenKind::KwFalse,
];

const SCALAR_FIRST: &[TokenKind] = &[
    TokenKind::SingleQuoteString,
    TokenKind::DoubleQuoteString,
    TokenKind::Id,
    TokenKind::ParenOpen,
];

const LIST_RECOVERY: &[TokenKind] = &[TokenKind::Comma, TokenKind::BraceClose];

const RULE_RECOVERY: &[TokenKind] = &[TokenKind::Semicolon, TokenKind::BraceClose];

impl Parser<'_> {
    pub(crate) fn parse_root(&mut self) -> CstNode<NodeKind> {
        let mut root = CstNode::new(NodeKind::Root);
        while !self.should_stop() {
            if self.currently_is(TokenKind::Id) {
                let field = self.parse_root_field();
                root.push_node(role::FIELDS, field);
            } else {
                self.error_and_bump(&mut root, "expected a field name");
            }
        }
        root
    }

    fn parse_root_field(&mut self) -> CstNode<NodeKind> {
        let mut node = CstNode::new(NodeKind::RootField);
        match self.current_text() {
            "rules" => {
                let rules = self.parse_rules();
                node.push_node(role::RULES, rules);
            }
            "tokens" => {
                self.bump_into(&mut node, role::NAME);
                self.parse_braced_list(&mut node, role::TOKENS, "tokens", Self::parse_token);
            }
            _ => {
                self.bump_into(&mut node, role::NAME);
                self.parse_other_field_body(&mut node);
            }
        }
        node
    }

    /// `{ item, item, ... }` with optional trailing comma. Items start with an identifier.
    fn parse_braced_list(
        &mut self,
        node: &mut CstNode<NodeKind>,
        item_role: &str,
        what: &str,
        parse_item: fn(&mut Self) -> CstNode<NodeKind>,
    ) {
        let open = self.current_span();
        if !self.expect(node, TokenKind::BraceOpen, role::LCURLY, DiagnosticKind::ExpectedBlock) {
            return;
        }

        if self.currently_is(TokenKind::BraceClose) {
            let close = self.current_span();
            self.diagnostics
                .report(DiagnosticKind::EmptyBlock, Span::new(open.start, close.end))
                .message(format!("no {what} declared"))
                .emit();
        }

        while !self.should_stop() && !self.currently_is(TokenKind::BraceClose) {
            if !self.currently_is(TokenKind::Id) {
                self.error_and_bump(node, "expected a name");
                continue;
            }
            let item = parse_item(self);
            node.push_node(item_role, item);

            if self.eat(node, TokenKind::Comma, role::COMMA) {
                continue;
            }
            if self.currently_is(TokenKind::Id) {
                self.error_msg(DiagnosticKind::UnexpectedToken, "expected `,` between items");
                continue;
            }
            if !self.currently_is(TokenKind::BraceClose) && !self.should_stop() {
                self.error_msg(DiagnosticKind::UnexpectedToken, "expected `,` or `}`");
                self.recover_until(node, LIST_RECOVERY);
                self.eat(node, TokenKind::Comma, role::COMMA);
            }
        }

        self.close_block(node, open, what);
    }

    fn close_block(&mut self, node: &mut CstNode<NodeKind>, open: Span, what: &str) {
        if self.eat(node, TokenKind::BraceClose, role::RCURLY) {
            return;
        }
        self.error_unclosed(
            DiagnosticKind::UnclosedBlock,
            format!("`{what}` block is not closed"),
            open,
        );
    }

    fn parse_other_field_body(&mut self, node: &mut CstNode<NodeKind>) {
        if self.eat(node, TokenKind::Colon, role::COLON) {
            self.parse_option_value_or_error(node);
            return;
        }
        if !self.currently_is(TokenKind::BraceOpen) {
            self.error_msg(
                DiagnosticKind::ExpectedBlock,
                "field name must be followed by `{` or `:`",
            );
            return;
        }

        let open = self.current_span();
        self.bump_into(node, role::LCURLY);
        let mut depth = 1usize;
        while !self.should_stop() {
            match self.current() {
                TokenKind::BraceOpen => depth += 1,
                TokenKind::BraceClose if depth == 1 => break,
                TokenKind::BraceClose => depth -= 1,
                _ => {}
            }
            self.bump_into(node, role::CONTENT);
        }
        self.close_block(node, open, "field");
    }

    fn parse_token(&mut self) -> CstNode<NodeKind> {
        let mut node = CstNode::new(NodeKind::Token);
        self.bump_into(&mut node, role::NAME);
        self.expect(&mut node, TokenKind::Colon, role::COLON, DiagnosticKind::ExpectedColon);
        self.parse_braced_list(&mut node, role::OPTIONS, "options", Self::parse_option);
        node
    }

    fn parse_option(&mut self) -> CstNode<NodeKind> {
        let mut node = CstNode::new(NodeKind::TokenOption);
        self.bump_into(&mut node, role::NAME);
        if self.expect(&mut node, TokenKind::Colon, role::COLON, DiagnosticKind::ExpectedColon) {
            self.parse_option_value_or_error(&mut node);
        }
        node
    }

    fn parse_option_value_or_error(&mut self, node: &mut CstNode<NodeKind>) {
        if !self.currently_is_one_of(OPTION_VALUE_FIRST) {
            self.error(DiagnosticKind::ExpectedOptionValue);
            return;
        }
        let value = self.parse_option_value();
        node.push_node(role::VALUE, value);
    }

    fn parse_option_value(&mut self) -> CstNode<NodeKind> {
        let mut node = CstNode::new(NodeKind::TokenOptionValue);
        let value_role = match self.current() {
            TokenKind::Number => role::NUMBER,
            TokenKind::Regex => role::REGEX,
            TokenKind::DoubleQuoteString => role::DOUBLE_QUOTE_STRING,
            TokenKind::SingleQuoteString => role::SINGLE_QUOTE_STRING,
            TokenKind::Id => role::IDENTIFIER,
            TokenKind::KwTrue => role::TRUE,
            TokenKind::KwFalse => role::FALSE,
            _ => return node,
        };
        self.bump_into(&mut node, value_role);
        node
    }

    fn parse_rules(&mut self) -> CstNode<NodeKind> {
        let mut node = CstNode::new(NodeKind::Rules);
        self.bump_into(&mut node, role::KEYWORD);

        let open = self.current_span();
        if !self.expect(
            &mut node,
            TokenKind::BraceOpen,
            role::LCURLY,
            DiagnosticKind::ExpectedBlock,
        ) {
            return node;
        }
        if self.currently_is(TokenKind::BraceClose) {
            let close = self.current_span();
            self.diagnostics
                .report(DiagnosticKind::EmptyBlock, Span::new(open.start, close.end))
                .message("no rules declared")
                .emit();
        }

        while !self.should_stop() && !self.currently_is(TokenKind::BraceClose) {
            if self.currently_is(TokenKind::Id) {
                let rule = self.parse_rule();
                node.push_node(role::RULES, rule);
            } else {
                self.error_and_bump(&mut node, "expected a rule name");
            }
        }

        self.close_block(&mut node, open, "rules");
        node
    }

    fn parse_rule(&mut self) -> CstNode<NodeKind> {
        let mut node = CstNode::new(NodeKind::Rule);
        self.bump_into(&mut node, role::NAME);
        if !self.expect(&mut node, TokenKind::Colon, role::COLON, DiagnosticKind::ExpectedColon) {
            self.recover_until(&mut node, RULE_RECOVERY);
            self.eat(&mut node, TokenKind::Semicolon, role::SEMICOLON);
            return node;
        }

        if self.currently_is(TokenKind::Pipe) {
            while self.currently_is(TokenKind::Pipe) && !self.should_stop() {
                let mut branch = CstNode::new(NodeKind::RuleOrSequence);
                self.bump_into(&mut branch, role::PIPE);
                let sequence = self.parse_sequence(false);
                branch.push_node(role::VALUE, sequence);
                node.push_node(role::BODY, branch);
            }
        } else {
            let sequence = self.parse_sequence(true);
            node.push_node(role::BODY, sequence);
        }

        if self.eat(&mut node, TokenKind::Semicolon, role::SEMICOLON) || self.has_fatal_error() {
            return node;
        }
        self.missing_semicolon();
        self.recover_until(&mut node, RULE_RECOVERY);
        self.eat(&mut node, TokenKind::Semicolon, role::SEMICOLON);
        node
    }

    fn missing_semicolon(&mut self) {
        let end = self.prev_end();
        let span = self.current_span();
        self.error_with_fix(
            DiagnosticKind::ExpectedSemicolon,
            Span::new(end, span.end.max(end)),
            "terminate the rule with `;`",
            ";",
        );
    }

    fn can_start_expr(&self, allow_pipe: bool) -> bool {
        self.currently_is_one_of(SCALAR_FIRST) || (allow_pipe && self.currently_is(TokenKind::Pipe))
    }

    fn parse_sequence(&mut self, allow_pipe: bool) -> CstNode<NodeKind> {
        let mut node = CstNode::new(NodeKind::RuleSequence);
        while !self.should_stop() && self.can_start_expr(allow_pipe) {
            let expr = self.parse_expr(allow_pipe);
            node.push_node(role::EXPR, expr);
        }
        node
    }

    fn parse_expr(&mut self, allow_pipe: bool) -> CstNode<NodeKind> {
        let mut node = CstNode::new(NodeKind::RuleBodyExpr);
        if !self.enter_recursion() {
            return node;
        }
        let binary = self.parse_binary(allow_pipe);
        node.push_node(role::VALUE, binary);
        self.exit_recursion();
        node
    }

    fn parse_binary(&mut self, allow_pipe: bool) -> CstNode<NodeKind> {
        let mut node = CstNode::new(NodeKind::RuleBodyExprBinary);
        while !self.should_stop() {
            if self.currently_is_one_of(SCALAR_FIRST) {
                let unary = self.parse_unary();
                node.push_node(role::ELEMS, unary);
            } else if allow_pipe && self.currently_is(TokenKind::Pipe) {
                self.bump_into(&mut node, role::ELEMS);
            } else {
                break;
            }
        }
        node
    }

    fn parse_unary(&mut self) -> CstNode<NodeKind> {
        let mut node = CstNode::new(NodeKind::RuleBodyExprUnary);
        if self.currently_is(TokenKind::Id) && self.nth(1) == TokenKind::Colon {
            self.bump_into(&mut node, role::NAME);
            self.bump_into(&mut node, role::COLON);
        }

        if self.currently_is_one_of(SCALAR_FIRST) {
            let scalar = self.parse_scalar();
            node.push_node(role::SCALAR, scalar);
        } else {
            self.error_msg(DiagnosticKind::ExpectedExpression, "label needs a value");
            return node;
        }

        let modifier_role = match self.current() {
            TokenKind::Question => role::OPTIONAL,
            TokenKind::Star => role::MANY,
            TokenKind::Plus => role::MANY1,
            _ => return node,
        };
        self.bump_into(&mut node, modifier_role);
        node
    }

    fn parse_scalar(&mut self) -> CstNode<NodeKind> {
        let mut node = CstNode::new(NodeKind::RuleBodyExprScalar);
        match self.current() {
            TokenKind::SingleQuoteString => self.bump_into(&mut node, role::SINGLE_QUOTE_STRING),
            TokenKind::DoubleQuoteString => self.bump_into(&mut node, role::DOUBLE_QUOTE_STRING),
            TokenKind::Id => self.bump_into(&mut node, role::IDENTIFIER),
            TokenKind::ParenOpen => {
                let pth = self.parse_pth();
                node.push_node(role::PTH, pth);
            }
            _ => {}
        }
        node
    }

    fn parse_pth(&mut self) -> CstNode<NodeKind> {
        let mut node = CstNode::new(NodeKind::RuleBodyExprPth);
        let open = self.current_span();
        self.bump_into(&mut node, role::LPAREN);

        if self.currently_is(TokenKind::ParenClose) {
            let close = self.current_span();
            self.error_at(DiagnosticKind::EmptyGroup, Span::new(open.start, close.end));
            self.bump_into(&mut node, role::RPAREN);
            return node;
        }

        if !self.enter_recursion() {
            return node;
        }
        let expr = self.parse_expr(true);
        node.push_node(role::VALUE, expr);
        self.exit_recursion();

        if !self.eat(&mut node, TokenKind::ParenClose, role::RPAREN) {
            self.error_unclosed(DiagnosticKind::UnclosedGroup, "group is not closed", open);
        }
        node
    }
}
