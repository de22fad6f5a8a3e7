//! Indented text views of CSTs and grammar ASTs.

use std::fmt::Write;

use weft_core::{BodyElement, CstChild, CstNode, Field, Grammar, NamedValue, Span};

use crate::parser::{NodeKind, role};

const PUNCTUATION_ROLES: &[&str] = &[
    role::LCURLY,
    role::RCURLY,
    role::LPAREN,
    role::RPAREN,
    role::COLON,
    role::COMMA,
    role::SEMICOLON,
    role::PIPE,
    role::KEYWORD,
];

/// Prints a CST one child per line as `role: kind` or `role: "image"`.
pub struct CstPrinter<'a> {
    root: &'a CstNode<NodeKind>,
    punctuation: bool,
    spans: bool,
}

impl<'a> CstPrinter<'a> {
    pub fn new(root: &'a CstNode<NodeKind>) -> Self {
        Self {
            root,
            punctuation: false,
            spans: false,
        }
    }

    /// Include delimiter and separator tokens.
    pub fn with_punctuation(mut self, value: bool) -> Self {
        self.punctuation = value;
        self
    }

    pub fn with_spans(mut self, value: bool) -> Self {
        self.spans = value;
        self
    }

    pub fn dump(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = self.format(&mut out);
        out
    }

    pub fn format(&self, w: &mut impl Write) -> std::fmt::Result {
        writeln!(w, "{}", self.root.kind)?;
        self.format_children(self.root, 1, w)
    }

    fn format_children(
        &self,
        node: &CstNode<NodeKind>,
        indent: usize,
        w: &mut impl Write,
    ) -> std::fmt::Result {
        let prefix = "  ".repeat(indent);
        for (role, children) in node.children.roles() {
            if !self.punctuation && PUNCTUATION_ROLES.contains(&role) {
                continue;
            }
            for child in children {
                match child {
                    CstChild::Node(n) => {
                        writeln!(w, "{prefix}{role}: {}", n.kind)?;
                        self.format_children(n, indent + 1, w)?;
                    }
                    CstChild::Token(t) => {
                        let span = self.span_str(t.span);
                        writeln!(w, "{prefix}{role}: {:?}{span}", t.image)?;
                    }
                }
            }
        }
        Ok(())
    }

    fn span_str(&self, span: Span) -> String {
        if !self.spans {
            return String::new();
        }
        format!(" [{}..{}]", span.start, span.end)
    }
}

/// Prints a grammar AST as an indented tree.
pub struct GrammarPrinter<'a> {
    grammar: &'a Grammar,
}

impl<'a> GrammarPrinter<'a> {
    pub fn new(grammar: &'a Grammar) -> Self {
        Self { grammar }
    }

    pub fn dump(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = self.format(&mut out);
        out
    }

    pub fn format(&self, w: &mut impl Write) -> std::fmt::Result {
        writeln!(w, "Grammar")?;
        for field in &self.grammar.fields {
            self.format_field(field, w)?;
        }
        Ok(())
    }

    fn format_field(&self, field: &Field, w: &mut impl Write) -> std::fmt::Result {
        match field {
            Field::Tokens(section) => {
                writeln!(w, "  Tokens")?;
                for token in &section.tokens {
                    writeln!(w, "    Token {}", token.name)?;
                    for (name, value) in &token.options {
                        writeln!(w, "      {name}: {value}")?;
                    }
                }
            }
            Field::Rules(section) => {
                writeln!(w, "  Rules")?;
                for rule in &section.rules {
                    writeln!(w, "    Rule {}", rule.name)?;
                    for element in &rule.body {
                        format_element(element, 3, w)?;
                    }
                }
            }
            Field::Other { name } => writeln!(w, "  Other {name}")?,
        }
        Ok(())
    }
}

fn format_element(element: &BodyElement, indent: usize, w: &mut impl Write) -> std::fmt::Result {
    let prefix = "  ".repeat(indent);
    match element {
        BodyElement::StringLiteral(text) => writeln!(w, "{prefix}Str {text:?}"),
        BodyElement::Ref(name) => writeln!(w, "{prefix}Ref {name}"),
        BodyElement::Or { branches } => {
            writeln!(w, "{prefix}Or")?;
            for branch in branches {
                writeln!(w, "{prefix}  Branch")?;
                for element in branch {
                    format_element(element, indent + 2, w)?;
                }
            }
            Ok(())
        }
        BodyElement::Named {
            label,
            value,
            modifier,
        } => {
            write!(w, "{prefix}Named")?;
            if let Some(label) = label {
                write!(w, " {label}:")?;
            }
            if let Some(modifier) = modifier {
                write!(w, " {modifier}")?;
            }
            writeln!(w)?;
            match value {
                NamedValue::Element(inner) => format_element(inner, indent + 1, w),
                NamedValue::Group(elements) => {
                    writeln!(w, "{prefix}  Group")?;
                    for element in elements {
                        format_element(element, indent + 2, w)?;
                    }
                    Ok(())
                }
            }
        }
    }
}
