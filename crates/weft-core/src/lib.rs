#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core data structures for weft.
//!
//! Three layers, bottom-up:
//! - **CST shape** (`cst`): the role-labeled tree an upstream parser hands over
//! - **Dispatch** (`visit`): kind-keyed handler registry that lowers a CST into any value
//! - **Grammar AST** (`grammar`): the normalized output consumed by code generators
//!
//! `utils` holds the list algorithms the lowering rules are built from.

pub mod cst;
pub mod grammar;
pub mod utils;
pub mod visit;

#[cfg(test)]
mod utils_tests;
#[cfg(test)]
mod visit_tests;

pub use cst::{Children, CstChild, CstNode, Span, Token};
pub use grammar::{
    BodyElement, CodecError, Field, Grammar, Modifier, NamedValue, OptionValue, RuleDef,
    RulesSection, TokenDef, TokenSection,
};
pub use visit::{Handler, UnhandledNode, Visitor};
