use weft_core::Span;

/// Diagnostic kinds, most fundamental first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DiagnosticKind {
    // Unclosed delimiters swallow the rest of the document
    UnclosedBlock,
    UnclosedGroup,

    // Something required is missing
    ExpectedName,
    ExpectedColon,
    ExpectedBlock,
    ExpectedOptionValue,
    ExpectedExpression,
    ExpectedSemicolon,

    // Something is there that doesn't belong
    InvalidCharacters,
    UnexpectedToken,
    EmptyGroup,

    // Accepted, but probably not what was meant
    EmptyBlock,
}

impl DiagnosticKind {
    pub fn default_severity(&self) -> Severity {
        match self {
            Self::EmptyBlock => Severity::Warning,
            _ => Severity::Error,
        }
    }

    /// Base message for this kind, used when no detail is provided.
    pub fn fallback_message(&self) -> &'static str {
        match self {
            Self::UnclosedBlock => "missing closing `}`",
            Self::UnclosedGroup => "missing closing `)`",

            Self::ExpectedName => "expected a name",
            Self::ExpectedColon => "expected `:`",
            Self::ExpectedBlock => "expected `{`",
            Self::ExpectedOptionValue => "expected an option value",
            Self::ExpectedExpression => "expected an expression",
            Self::ExpectedSemicolon => "expected `;`",

            Self::InvalidCharacters => "invalid characters",
            Self::UnexpectedToken => "unexpected token",
            Self::EmptyGroup => "empty `()` is not allowed",

            Self::EmptyBlock => "empty block",
        }
    }

    /// Renders the final message: the fallback alone, or the fallback followed by `detail`.
    pub fn message(&self, detail: Option<&str>) -> String {
        match detail {
            None => self.fallback_message().to_string(),
            Some(detail) if self.is_unclosed() => format!("{}; {detail}", self.fallback_message()),
            Some(detail) => format!("{}: {detail}", self.fallback_message()),
        }
    }

    fn is_unclosed(&self) -> bool {
        matches!(self, Self::UnclosedBlock | Self::UnclosedGroup)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    #[default]
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// Suggested source edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fix {
    pub(crate) span: Span,
    pub(crate) replacement: String,
    pub(crate) description: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelatedInfo {
    pub(crate) span: Span,
    pub(crate) message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticMessage {
    pub(crate) kind: DiagnosticKind,
    /// Underlined in rendered output.
    pub(crate) span: Span,
    pub(crate) message: String,
    pub(crate) fix: Option<Fix>,
    pub(crate) related: Vec<RelatedInfo>,
}

impl DiagnosticMessage {
    pub(crate) fn new(kind: DiagnosticKind, span: Span) -> Self {
        Self {
            kind,
            span,
            message: kind.fallback_message().to_string(),
            fix: None,
            related: Vec::new(),
        }
    }

    pub fn kind(&self) -> DiagnosticKind {
        self.kind
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn severity(&self) -> Severity {
        self.kind.default_severity()
    }

    pub fn is_error(&self) -> bool {
        self.severity() == Severity::Error
    }

    pub fn is_warning(&self) -> bool {
        self.severity() == Severity::Warning
    }
}

impl std::fmt::Display for DiagnosticMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} at {}..{}: {}",
            self.severity(),
            self.span.start,
            self.span.end,
            self.message
        )?;
        if let Some(fix) = &self.fix {
            write!(f, " (fix: {})", fix.description)?;
        }
        for related in &self.related {
            write!(
                f,
                " (related: {} at {}..{})",
                related.message, related.span.start, related.span.end
            )?;
        }
        Ok(())
    }
}
