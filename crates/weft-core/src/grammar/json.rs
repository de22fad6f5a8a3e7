//! JSON encoding for grammar ASTs.
//!
//! Enums use serde's external tagging: `{"Ref": "expr"}`, `{"Or": {"branches": [...]}}`.

use super::types::Grammar;

/// A grammar AST could not be read from or written to one of its encodings.
#[derive(Debug)]
pub enum CodecError {
    DecodeJson(serde_json::Error),
    EncodeJson(serde_json::Error),
    DecodeBinary(postcard::Error),
    EncodeBinary(postcard::Error),
}

impl CodecError {
    /// The input was rejected, as opposed to the output failing to serialize.
    pub fn is_decode(&self) -> bool {
        matches!(self, Self::DecodeJson(_) | Self::DecodeBinary(_))
    }
}

impl std::fmt::Display for CodecError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DecodeJson(e) => write!(f, "cannot read grammar JSON: {e}"),
            Self::EncodeJson(e) => write!(f, "cannot write grammar JSON: {e}"),
            Self::DecodeBinary(e) => write!(f, "cannot read binary grammar: {e}"),
            Self::EncodeBinary(e) => write!(f, "cannot write binary grammar: {e}"),
        }
    }
}

impl std::error::Error for CodecError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::DecodeJson(e) | Self::EncodeJson(e) => Some(e),
            Self::DecodeBinary(e) | Self::EncodeBinary(e) => Some(e),
        }
    }
}

impl Grammar {
    pub fn from_json(json: &str) -> Result<Self, CodecError> {
        serde_json::from_str(json).map_err(CodecError::DecodeJson)
    }

    /// Pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, CodecError> {
        serde_json::to_string_pretty(self).map_err(CodecError::EncodeJson)
    }
}
