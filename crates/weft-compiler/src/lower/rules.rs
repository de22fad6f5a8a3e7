//! Lowering rules for `rules` blocks and rule bodies.
//!
//! Body shapes are normalized bottom-up:
//! - a binary expression splits at `|` markers; more than one group becomes an `Or`
//! - a unary expression without label or modifier dissolves into its operand
//! - adjacent leading-pipe alternatives of a rule merge into a single `Or`

use weft_core::utils::{merge_consecutive_by, partition_by};
use weft_core::{
    BodyElement, Children, CstChild, Field, Modifier, NamedValue, RuleDef, RulesSection,
};

use super::fields::strip_delimiters;
use super::{LowerError, LowerVisitor, Lowered, required_name};
use crate::parser::{NodeKind, role};

const MODIFIER_ROLES: [(&str, Modifier); 3] = [
    (role::OPTIONAL, Modifier::Optional),
    (role::MANY, Modifier::Many),
    (role::MANY1, Modifier::Many1),
];

pub(super) fn lower_rules(
    children: &Children<NodeKind>,
    v: &LowerVisitor,
) -> Result<Lowered, LowerError> {
    let rules = v
        .visit_all(children.nodes(role::RULES))?
        .into_iter()
        .map(Lowered::into_rule)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Lowered::Field(Field::Rules(RulesSection { rules })))
}

pub(super) fn lower_rule(
    children: &Children<NodeKind>,
    v: &LowerVisitor,
) -> Result<Lowered, LowerError> {
    let name = required_name(children, NodeKind::Rule)?;

    let parts: Vec<Lowered> = v
        .visit_all(children.nodes(role::BODY))?
        .into_iter()
        .filter(|part| !matches!(part, Lowered::Sequence(None)))
        .collect();

    let merged = merge_consecutive_by(
        parts,
        |part| matches!(part, Lowered::OrBranch(_)).then_some(()),
        |run| {
            let branches = run
                .into_iter()
                .filter_map(|part| match part {
                    Lowered::OrBranch(branch) => Some(branch),
                    _ => None,
                })
                .collect();
            Lowered::Element(BodyElement::or(branches))
        },
    );

    let mut body = Vec::new();
    for part in merged {
        match part {
            Lowered::OrBranch(branch) => body.push(BodyElement::or(vec![branch])),
            other => body.extend(other.into_elements()?),
        }
    }

    tracing::debug!(rule = %name, elements = body.len(), "lowered rule");
    Ok(Lowered::Rule(RuleDef::new(name, body)))
}

/// One leading-pipe alternative. An empty one is an empty branch.
pub(super) fn lower_or_sequence(
    children: &Children<NodeKind>,
    v: &LowerVisitor,
) -> Result<Lowered, LowerError> {
    let sequence = children.node(role::VALUE).ok_or(LowerError::MissingChild {
        kind: NodeKind::RuleOrSequence,
        role: role::VALUE,
    })?;
    let elements = v.visit(sequence)?.into_sequence()?;
    Ok(Lowered::OrBranch(elements.unwrap_or_default()))
}

pub(super) fn lower_sequence(
    children: &Children<NodeKind>,
    v: &LowerVisitor,
) -> Result<Lowered, LowerError> {
    if !children.has(role::EXPR) {
        return Ok(Lowered::Sequence(None));
    }
    let mut elements = Vec::new();
    for expr in children.nodes(role::EXPR) {
        elements.extend(v.visit(expr)?.into_elements()?);
    }
    Ok(Lowered::Sequence(Some(elements)))
}

pub(super) fn lower_expr(
    children: &Children<NodeKind>,
    v: &LowerVisitor,
) -> Result<Lowered, LowerError> {
    let value = children.node(role::VALUE).ok_or(LowerError::MissingChild {
        kind: NodeKind::RuleBodyExpr,
        role: role::VALUE,
    })?;
    v.visit(value)
}

/// Anything in `elems` other than a unary node separates alternatives.
pub(super) fn lower_binary(
    children: &Children<NodeKind>,
    v: &LowerVisitor,
) -> Result<Lowered, LowerError> {
    let elems: Vec<&CstChild<NodeKind>> = children.get(role::ELEMS).iter().collect();
    let groups = partition_by(elems, |child| !is_unary(child));

    let mut branches = Vec::with_capacity(groups.len());
    for group in groups {
        let mut branch = Vec::new();
        for child in group {
            if let CstChild::Node(node) = child {
                branch.extend(v.visit(node)?.into_elements()?);
            }
        }
        branches.push(branch);
    }

    match <[Vec<BodyElement>; 1]>::try_from(branches) {
        Ok([single]) => Ok(Lowered::Elements(single)),
        Err(branches) => Ok(Lowered::Element(BodyElement::or(branches))),
    }
}

fn is_unary(child: &CstChild<NodeKind>) -> bool {
    matches!(child, CstChild::Node(node) if node.kind == NodeKind::RuleBodyExprUnary)
}

pub(super) fn lower_unary(
    children: &Children<NodeKind>,
    v: &LowerVisitor,
) -> Result<Lowered, LowerError> {
    let label = children.token(role::NAME).map(|t| t.image.clone());
    let scalar = children
        .node(role::SCALAR)
        .ok_or_else(|| LowerError::MissingScalar {
            children: children.to_string(),
        })?;

    let mut present = MODIFIER_ROLES
        .iter()
        .filter(|(r, _)| children.has(r))
        .map(|&(_, modifier)| modifier);
    let modifier = present.next();
    if present.next().is_some() {
        return Err(LowerError::ConflictingModifiers {
            children: children.to_string(),
        });
    }

    let value = v.visit(scalar)?.into_operand()?;
    if label.is_none() && modifier.is_none() {
        return Ok(Lowered::Elements(value.into_elements()));
    }
    Ok(Lowered::Element(BodyElement::Named {
        label,
        value,
        modifier,
    }))
}

pub(super) fn lower_scalar(
    children: &Children<NodeKind>,
    v: &LowerVisitor,
) -> Result<Lowered, LowerError> {
    let element = if let Some(t) = children.token(role::SINGLE_QUOTE_STRING) {
        BodyElement::literal(strip_delimiters(&t.image))
    } else if let Some(t) = children.token(role::DOUBLE_QUOTE_STRING) {
        BodyElement::literal(strip_delimiters(&t.image))
    } else if let Some(t) = children.token(role::IDENTIFIER) {
        BodyElement::reference(t.image.as_str())
    } else if let Some(pth) = children.node(role::PTH) {
        return match v.visit(pth)? {
            Lowered::Element(element) => Ok(Lowered::Operand(NamedValue::element(element))),
            other => Ok(Lowered::Operand(group_operand(other.into_elements()?))),
        };
    } else {
        return Err(LowerError::UnrecognizedScalar {
            children: children.to_string(),
        });
    };
    Ok(Lowered::Operand(NamedValue::element(element)))
}

fn group_operand(mut elements: Vec<BodyElement>) -> NamedValue {
    match elements.len() {
        1 => NamedValue::element(elements.remove(0)),
        _ => NamedValue::Group(elements),
    }
}

/// Parentheses are transparent: the inner expression is returned as is.
pub(super) fn lower_pth(
    children: &Children<NodeKind>,
    v: &LowerVisitor,
) -> Result<Lowered, LowerError> {
    let value = children
        .node(role::VALUE)
        .ok_or_else(|| LowerError::MissingParenthesizedValue {
            children: children.to_string(),
        })?;
    v.visit(value)
}
