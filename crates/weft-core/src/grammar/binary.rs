//! Compact binary encoding for grammar ASTs (postcard).
//!
//! Not self-describing: a buffer only decodes with the same type definitions that wrote it.

use super::json::CodecError;
use super::types::Grammar;

impl Grammar {
    pub fn from_binary(bytes: &[u8]) -> Result<Self, CodecError> {
        postcard::from_bytes(bytes).map_err(CodecError::DecodeBinary)
    }

    pub fn to_binary(&self) -> Result<Vec<u8>, CodecError> {
        postcard::to_allocvec(self).map_err(CodecError::EncodeBinary)
    }
}
