use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use super::CommandError;

/// Where a command reads its grammar from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrammarInput {
    path: Option<PathBuf>,
    text: Option<String>,
}

/// Loaded grammar text plus the name diagnostics refer to it by.
pub struct LoadedSource {
    pub name: String,
    pub text: String,
}

impl GrammarInput {
    pub fn new(path: Option<PathBuf>, text: Option<String>) -> Self {
        Self { path, text }
    }

    pub fn load(&self) -> Result<LoadedSource, CommandError> {
        if let Some(text) = &self.text {
            return Ok(LoadedSource {
                name: "<inline>".to_string(),
                text: text.clone(),
            });
        }

        let Some(path) = &self.path else {
            return Err(CommandError::MissingInput);
        };

        if path.as_os_str() == "-" {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .map_err(|source| CommandError::Read {
                    what: "stdin".to_string(),
                    source,
                })?;
            tracing::debug!(bytes = text.len(), "read grammar from stdin");
            return Ok(LoadedSource {
                name: "<stdin>".to_string(),
                text,
            });
        }

        let text = fs::read_to_string(path).map_err(|source| CommandError::Read {
            what: format!("'{}'", path.display()),
            source,
        })?;
        tracing::debug!(path = %path.display(), bytes = text.len(), "read grammar file");
        Ok(LoadedSource {
            name: path.display().to_string(),
            text,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inline_text_wins() {
        let input = GrammarInput::new(Some(PathBuf::from("missing.weft")), Some("rules {}".into()));
        let source = input.load().unwrap();

        assert_eq!(source.name, "<inline>");
        assert_eq!(source.text, "rules {}");
    }

    #[test]
    fn missing_input() {
        let err = GrammarInput::new(None, None).load().err().unwrap();
        insta::assert_snapshot!(err, @r#"grammar is required: use a FILE argument, "-" for stdin, or -g/--grammar"#);
    }

    #[test]
    fn unreadable_file() {
        let input = GrammarInput::new(Some(PathBuf::from("/nonexistent/weft/grammar.weft")), None);
        let err = input.load().err().unwrap();

        assert!(matches!(err, CommandError::Read { .. }));
        assert!(err.to_string().starts_with("failed to read '/nonexistent/weft/grammar.weft'"));
    }
}
