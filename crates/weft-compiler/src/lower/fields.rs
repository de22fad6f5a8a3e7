//! Lowering rules for the document root, top-level fields and token declarations.

use indexmap::map::Entry;
use weft_core::{Children, Field, Grammar, OptionValue, TokenDef, TokenSection};

use super::{LowerError, LowerVisitor, Lowered, required_name};
use crate::DuplicateOptionPolicy;
use crate::parser::{NodeKind, role};

pub(super) fn lower_root(
    children: &Children<NodeKind>,
    v: &LowerVisitor,
) -> Result<Lowered, LowerError> {
    let fields = v
        .visit_all(children.nodes(role::FIELDS))?
        .into_iter()
        .map(Lowered::into_field)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Lowered::Grammar(Grammar::new(fields)))
}

pub(super) fn lower_field(
    children: &Children<NodeKind>,
    v: &LowerVisitor,
) -> Result<Lowered, LowerError> {
    if let Some(rules) = children.node(role::RULES) {
        return v.visit(rules);
    }

    let name = required_name(children, NodeKind::RootField)?;
    if name != "tokens" {
        return Ok(Lowered::Field(Field::Other { name }));
    }

    let tokens = v
        .visit_all(children.nodes(role::TOKENS))?
        .into_iter()
        .map(Lowered::into_token)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Lowered::Field(Field::Tokens(TokenSection { tokens })))
}

pub(super) fn lower_token(
    children: &Children<NodeKind>,
    v: &LowerVisitor,
    policy: DuplicateOptionPolicy,
) -> Result<Lowered, LowerError> {
    let mut token = TokenDef::new(required_name(children, NodeKind::Token)?);

    for option in children.nodes(role::OPTIONS) {
        let (name, value) = v.visit(option)?.into_option()?;
        match (token.options.entry(name), policy) {
            (Entry::Vacant(slot), _) => {
                slot.insert(value);
            }
            (Entry::Occupied(mut slot), DuplicateOptionPolicy::LastWins) => {
                slot.insert(value);
            }
            (Entry::Occupied(_), DuplicateOptionPolicy::FirstWins) => {}
            (Entry::Occupied(slot), DuplicateOptionPolicy::Reject) => {
                return Err(LowerError::DuplicateOption {
                    token: token.name.clone(),
                    option: slot.key().clone(),
                });
            }
        }
    }

    tracing::debug!(token = %token.name, options = token.options.len(), "lowered token");
    Ok(Lowered::Token(token))
}

pub(super) fn lower_option(
    children: &Children<NodeKind>,
    v: &LowerVisitor,
) -> Result<Lowered, LowerError> {
    let name = required_name(children, NodeKind::TokenOption)?;
    let value_node = children.node(role::VALUE).ok_or(LowerError::MissingChild {
        kind: NodeKind::TokenOption,
        role: role::VALUE,
    })?;
    let value = v.visit(value_node)?.into_option_value()?;
    Ok(Lowered::Option { name, value })
}

/// Classifies by the first populated value role, in priority order.
pub(super) fn lower_option_value(
    children: &Children<NodeKind>,
    validate_regex: bool,
) -> Result<Lowered, LowerError> {
    let token = |r: &str| children.token(r).map(|t| t.image.as_str());

    let value = if let Some(image) = token(role::NUMBER) {
        let number = image.parse::<f64>().map_err(|_| LowerError::InvalidNumber {
            image: image.to_owned(),
        })?;
        OptionValue::Number(number)
    } else if let Some(image) = token(role::REGEX) {
        let pattern = strip_delimiters(image);
        if validate_regex {
            check_regex(pattern)?;
        }
        OptionValue::Regex(pattern.to_owned())
    } else if let Some(image) = token(role::DOUBLE_QUOTE_STRING)
        .or_else(|| token(role::SINGLE_QUOTE_STRING))
    {
        // Option strings keep their quotes; only rule body literals are unquoted.
        OptionValue::StringLiteral(image.to_owned())
    } else if let Some(image) = token(role::IDENTIFIER) {
        OptionValue::IdentifierRef(image.to_owned())
    } else if children.has(role::TRUE) {
        OptionValue::Boolean(true)
    } else if children.has(role::FALSE) {
        OptionValue::Boolean(false)
    } else {
        return Err(LowerError::UnrecognizedOptionValue {
            children: children.to_string(),
        });
    };

    Ok(Lowered::OptionValue(value))
}

/// Drops the first and last character (body literal quotes or regex slashes). Shorter images
/// are kept.
pub(super) fn strip_delimiters(image: &str) -> &str {
    let mut chars = image.chars();
    match (chars.next(), chars.next_back()) {
        (Some(_), Some(_)) => chars.as_str(),
        _ => image,
    }
}

/// Validates a pattern with `regex-syntax`.
///
/// Look-around and backreferences are valid in the patterns grammars are written with but
/// outside what `regex-syntax` models, so a pattern using them is only checked up to that
/// point.
fn check_regex(pattern: &str) -> Result<(), LowerError> {
    let invalid = |message: String| LowerError::InvalidRegex {
        pattern: pattern.to_owned(),
        message,
    };

    match regex_syntax::ast::parse::Parser::new().parse(pattern) {
        Ok(_) => {}
        Err(e) if is_unmodelled(e.kind()) => return Ok(()),
        Err(e) => return Err(invalid(e.to_string())),
    }
    regex_syntax::Parser::new()
        .parse(pattern)
        .map(|_| ())
        .map_err(|e| invalid(e.to_string()))
}

fn is_unmodelled(kind: &regex_syntax::ast::ErrorKind) -> bool {
    use regex_syntax::ast::ErrorKind;
    matches!(
        kind,
        ErrorKind::UnsupportedLookAround | ErrorKind::UnsupportedBackreference
    )
}
