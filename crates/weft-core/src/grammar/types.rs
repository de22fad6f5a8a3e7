//! Grammar AST type definitions.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Lowered grammar document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Grammar {
    /// Top-level fields in source order.
    pub fields: Vec<Field>,
}

impl Grammar {
    pub fn new(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    /// Token declarations across all `tokens` fields, in source order.
    pub fn tokens(&self) -> impl Iterator<Item = &TokenDef> {
        self.fields.iter().flat_map(|field| match field {
            Field::Tokens(section) => section.tokens.as_slice(),
            _ => &[],
        })
    }

    /// Rules across all `rules` fields, in source order.
    pub fn rules(&self) -> impl Iterator<Item = &RuleDef> {
        self.fields.iter().flat_map(|field| match field {
            Field::Rules(section) => section.rules.as_slice(),
            _ => &[],
        })
    }

    pub fn token(&self, name: &str) -> Option<&TokenDef> {
        self.tokens().find(|t| t.name == name)
    }

    pub fn rule(&self, name: &str) -> Option<&RuleDef> {
        self.rules().find(|r| r.name == name)
    }
}

/// Top-level grammar field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Field {
    /// `tokens { ... }`
    Tokens(TokenSection),
    /// `rules { ... }`
    Rules(RulesSection),
    /// Any other field; only the name is kept.
    Other { name: String },
}

impl Field {
    pub fn name(&self) -> &str {
        match self {
            Field::Tokens(_) => "tokens",
            Field::Rules(_) => "rules",
            Field::Other { name } => name,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TokenSection {
    pub tokens: Vec<TokenDef>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RulesSection {
    pub rules: Vec<RuleDef>,
}

/// One token declaration. Option keys are unique and keep declaration order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenDef {
    pub name: String,
    pub options: IndexMap<String, OptionValue>,
}

impl TokenDef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            options: IndexMap::new(),
        }
    }

    pub fn with_option(mut self, name: impl Into<String>, value: OptionValue) -> Self {
        self.options.insert(name.into(), value);
        self
    }
}

/// Token option value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum OptionValue {
    Number(f64),
    /// Pattern text without the delimiting slashes.
    Regex(String),
    /// Quoted string as written, quotes included.
    StringLiteral(String),
    IdentifierRef(String),
    Boolean(bool),
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionValue::Number(n) => write!(f, "{n}"),
            OptionValue::Regex(pattern) => write!(f, "/{pattern}/"),
            OptionValue::StringLiteral(text) => f.write_str(text),
            OptionValue::IdentifierRef(name) => f.write_str(name),
            OptionValue::Boolean(b) => write!(f, "{b}"),
        }
    }
}

/// One production rule. The body is a flat element sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleDef {
    pub name: String,
    pub body: Vec<BodyElement>,
}

impl RuleDef {
    pub fn new(name: impl Into<String>, body: Vec<BodyElement>) -> Self {
        Self {
            name: name.into(),
            body,
        }
    }
}

/// Rule body element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BodyElement {
    /// Alternation; each branch is a flat sequence.
    Or { branches: Vec<Vec<BodyElement>> },
    /// Labeled and/or repeated element.
    Named {
        label: Option<String>,
        value: NamedValue,
        modifier: Option<Modifier>,
    },
    /// Literal matched verbatim, quotes stripped.
    StringLiteral(String),
    /// Reference to a token or rule.
    Ref(String),
}

impl BodyElement {
    pub fn literal(text: impl Into<String>) -> Self {
        BodyElement::StringLiteral(text.into())
    }

    pub fn reference(name: impl Into<String>) -> Self {
        BodyElement::Ref(name.into())
    }

    pub fn or(branches: Vec<Vec<BodyElement>>) -> Self {
        BodyElement::Or { branches }
    }

    pub fn named(label: Option<&str>, value: NamedValue, modifier: Option<Modifier>) -> Self {
        BodyElement::Named {
            label: label.map(str::to_owned),
            value,
            modifier,
        }
    }
}

/// Operand of a `Named` element: one element, or a parenthesized sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum NamedValue {
    Element(Box<BodyElement>),
    Group(Vec<BodyElement>),
}

impl NamedValue {
    pub fn element(element: BodyElement) -> Self {
        NamedValue::Element(Box::new(element))
    }

    /// Elements this operand stands for, in order.
    pub fn elements(&self) -> &[BodyElement] {
        match self {
            NamedValue::Element(element) => std::slice::from_ref(element.as_ref()),
            NamedValue::Group(elements) => elements,
        }
    }

    pub fn into_elements(self) -> Vec<BodyElement> {
        match self {
            NamedValue::Element(element) => vec![*element],
            NamedValue::Group(elements) => elements,
        }
    }
}

/// Repetition or optionality marker. Absent means exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Modifier {
    /// `?`
    Optional,
    /// `*`
    Many,
    /// `+`
    Many1,
}

impl Modifier {
    pub fn symbol(self) -> char {
        match self {
            Modifier::Optional => '?',
            Modifier::Many => '*',
            Modifier::Many1 => '+',
        }
    }
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Modifier::Optional => "optional",
            Modifier::Many => "many",
            Modifier::Many1 => "many1",
        })
    }
}
