//! Normalized grammar AST.
//!
//! This is the value handed to code generators: token declarations with their options and
//! rules whose bodies are flat element sequences. Serializes with external enum tagging so
//! both the JSON and the postcard encodings round-trip every variant.

mod binary;
mod json;
mod types;

#[cfg(test)]
mod json_tests;

pub use json::CodecError;
pub use types::{
    BodyElement, Field, Grammar, Modifier, NamedValue, OptionValue, RuleDef, RulesSection,
    TokenDef, TokenSection,
};
