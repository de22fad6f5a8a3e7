//! Lexer for weft grammar files.
//!
//! Produces span-based tokens; text is sliced from the source with [`token_text`].
//!
//! ## Error handling
//!
//! Consecutive unrecognized characters coalesce into a single `Garbage` token rather than one
//! error per character.

use logos::Logos;
use weft_core::Span;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    #[token("{")]
    BraceOpen,

    #[token("}")]
    BraceClose,

    #[token("(")]
    ParenOpen,

    #[token(")")]
    ParenClose,

    #[token(":")]
    Colon,

    #[token(";")]
    Semicolon,

    #[token(",")]
    Comma,

    #[token("|")]
    Pipe,

    #[token("?")]
    Question,

    #[token("*")]
    Star,

    #[token("+")]
    Plus,

    #[regex(r"-?[0-9]+(?:\.[0-9]+)?")]
    Number,

    /// `/pattern/`. A leading `*` would open a block comment, a leading `/` a line comment.
    #[regex(r"/(?:[^/*\\\n]|\\.)(?:[^/\\\n]|\\.)*/")]
    Regex,

    #[regex(r#""(?:[^"\\\n]|\\.)*""#)]
    DoubleQuoteString,

    #[regex(r"'(?:[^'\\\n]|\\.)*'")]
    SingleQuoteString,

    #[token("true")]
    KwTrue,

    #[token("false")]
    KwFalse,

    /// Defined after keywords so they take precedence.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Id,

    #[regex(r"[ \t]+")]
    Whitespace,

    #[token("\n")]
    #[token("\r\n")]
    Newline,

    #[regex(r"//[^\n]*", allow_greedy = true)]
    LineComment,

    #[regex(r"/\*(?:[^*]|\*[^/])*\*/")]
    BlockComment,

    /// Coalesced unrecognized characters
    Garbage,
    /// Past the last token; never produced by [`lex`]
    Eof,
}

impl TokenKind {
    pub fn is_trivia(self) -> bool {
        matches!(
            self,
            TokenKind::Whitespace
                | TokenKind::Newline
                | TokenKind::LineComment
                | TokenKind::BlockComment
        )
    }

    /// Human-readable name for diagnostics.
    pub fn describe(self) -> &'static str {
        match self {
            TokenKind::BraceOpen => "`{`",
            TokenKind::BraceClose => "`}`",
            TokenKind::ParenOpen => "`(`",
            TokenKind::ParenClose => "`)`",
            TokenKind::Colon => "`:`",
            TokenKind::Semicolon => "`;`",
            TokenKind::Comma => "`,`",
            TokenKind::Pipe => "`|`",
            TokenKind::Question => "`?`",
            TokenKind::Star => "`*`",
            TokenKind::Plus => "`+`",
            TokenKind::Number => "number",
            TokenKind::Regex => "regex",
            TokenKind::DoubleQuoteString | TokenKind::SingleQuoteString => "string",
            TokenKind::KwTrue => "`true`",
            TokenKind::KwFalse => "`false`",
            TokenKind::Id => "identifier",
            TokenKind::Whitespace | TokenKind::Newline => "whitespace",
            TokenKind::LineComment | TokenKind::BlockComment => "comment",
            TokenKind::Garbage => "invalid characters",
            TokenKind::Eof => "end of input",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    #[inline]
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }
}

fn span_of(range: std::ops::Range<usize>) -> Span {
    Span::new(range.start as u32, range.end as u32)
}

/// Tokenizes source, trivia included.
pub fn lex(source: &str) -> Vec<Token> {
    let mut tokens: Vec<Token> = Vec::new();
    for (result, range) in TokenKind::lexer(source).spanned() {
        let span = span_of(range);
        match result {
            Ok(kind) => tokens.push(Token::new(kind, span)),
            Err(()) => push_garbage(&mut tokens, span),
        }
    }
    tokens
}

/// Grows a directly preceding `Garbage` token instead of starting a new one.
fn push_garbage(tokens: &mut Vec<Token>, span: Span) {
    if let Some(last) = tokens.last_mut()
        && last.kind == TokenKind::Garbage
        && last.span.end == span.start
    {
        last.span.end = span.end;
        return;
    }
    tokens.push(Token::new(TokenKind::Garbage, span));
}

/// Text slice for a token.
#[inline]
pub fn token_text<'s>(source: &'s str, token: &Token) -> &'s str {
    &source[token.span.range()]
}
