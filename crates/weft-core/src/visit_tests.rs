use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::cst::CstNode;
use crate::visit::{UnhandledNode, Visitor};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Kind {
    Sum,
    Num,
    Neg,
    Comment,
}

#[derive(Debug, PartialEq)]
enum Value {
    Int(i64),
    Node(CstNode<Kind>),
}

impl From<CstNode<Kind>> for Value {
    fn from(node: CstNode<Kind>) -> Self {
        Value::Node(node)
    }
}

#[derive(Debug, PartialEq)]
enum EvalError {
    Unhandled(Kind),
    NotANumber(String),
    Missing(&'static str),
}

impl From<UnhandledNode<Kind>> for EvalError {
    fn from(e: UnhandledNode<Kind>) -> Self {
        EvalError::Unhandled(e.kind)
    }
}

fn num(image: &str) -> CstNode<Kind> {
    CstNode::new(Kind::Num).with_token("digits", image)
}

fn sum(terms: Vec<CstNode<Kind>>) -> CstNode<Kind> {
    let mut node = CstNode::new(Kind::Sum);
    for (i, term) in terms.into_iter().enumerate() {
        if i > 0 {
            node.push_token("op", crate::Token::new("+"));
        }
        node.push_node("terms", term);
    }
    node
}

fn int(value: Value) -> Result<i64, EvalError> {
    match value {
        Value::Int(n) => Ok(n),
        Value::Node(node) => Err(EvalError::Unhandled(node.kind)),
    }
}

fn evaluator() -> Visitor<Kind, Value, EvalError> {
    Visitor::new()
        .on(Kind::Num, |children, _| {
            let digits = children.token("digits").ok_or(EvalError::Missing("digits"))?;
            digits
                .image
                .parse()
                .map(Value::Int)
                .map_err(|_| EvalError::NotANumber(digits.image.clone()))
        })
        .on(Kind::Sum, |children, v| {
            let mut total = 0;
            for term in children.nodes("terms") {
                total += int(v.visit(term)?)?;
            }
            Ok(Value::Int(total))
        })
}

#[test]
fn dispatches_by_kind_recursively() {
    let tree = sum(vec![num("1"), sum(vec![num("2"), num("3")]), num("4")]);

    assert_eq!(evaluator().visit(&tree), Ok(Value::Int(10)));
}

#[test]
fn unvisited_children_are_ignored() {
    // "op" tokens sit next to the terms but Sum never descends into them.
    let tree = sum(vec![num("7"), num("8")]);

    assert_eq!(tree.children.get("op").len(), 1);
    assert_eq!(evaluator().visit(&tree), Ok(Value::Int(15)));
}

#[test]
fn identity_fallback_returns_node_unchanged() {
    let comment = CstNode::new(Kind::Comment).with_token("text", "// hi");

    assert_eq!(evaluator().visit(&comment), Ok(Value::Node(comment.clone())));
}

#[test]
fn default_handler_runs_before_fallback() {
    let visitor =
        evaluator().with_default(|node, _| Ok(Value::Int(node.children.get("text").len() as i64)));
    let comment = CstNode::new(Kind::Comment)
        .with_token("text", "a")
        .with_token("text", "b");

    assert_eq!(visitor.visit(&comment), Ok(Value::Int(2)));
    assert_eq!(visitor.visit(&num("5")), Ok(Value::Int(5)));
}

#[test]
fn default_handler_can_recurse() {
    let visitor = evaluator().with_default(|node, v| {
        let inner = node.children.node("operand").ok_or(EvalError::Missing("operand"))?;
        Ok(Value::Int(-int(v.visit(inner)?)?))
    });
    let neg = CstNode::new(Kind::Neg).with_node("operand", num("3"));

    assert_eq!(visitor.visit(&neg), Ok(Value::Int(-3)));
}

#[test]
fn strict_rejects_unhandled_kind() {
    let visitor =
        Visitor::<Kind, Value, EvalError>::strict().on(Kind::Num, |_, _| Ok(Value::Int(0)));

    assert_eq!(visitor.visit(&num("1")), Ok(Value::Int(0)));
    assert_eq!(
        visitor.visit(&CstNode::new(Kind::Neg)),
        Err(EvalError::Unhandled(Kind::Neg))
    );
}

#[test]
fn handler_errors_propagate_unchanged() {
    let tree = sum(vec![num("1"), num("x"), num("2")]);

    assert_eq!(evaluator().visit(&tree), Err(EvalError::NotANumber("x".into())));
}

#[test]
fn visit_all_stops_at_first_error() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let visitor = Visitor::<Kind, Value, EvalError>::strict().on(Kind::Num, move |children, _| {
        counter.fetch_add(1, Ordering::SeqCst);
        let image = &children.token("digits").ok_or(EvalError::Missing("digits"))?.image;
        image
            .parse()
            .map(Value::Int)
            .map_err(|_| EvalError::NotANumber(image.clone()))
    });
    let nodes = [num("1"), num("?"), num("3")];

    assert_eq!(
        visitor.visit_all(&nodes),
        Err(EvalError::NotANumber("?".into()))
    );
    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert_eq!(visitor.visit_all(&nodes[..1]), Ok(vec![Value::Int(1)]));
}

#[test]
fn later_registration_replaces_handler() {
    let visitor = evaluator().on(Kind::Num, |_, _| Ok(Value::Int(42)));

    assert!(visitor.handles(Kind::Num));
    assert!(!visitor.handles(Kind::Neg));
    assert_eq!(visitor.visit(&num("1")), Ok(Value::Int(42)));
}

#[test]
fn visitor_is_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Visitor<Kind, Value, EvalError>>();

    let visitor = Arc::new(evaluator());
    let handles: Vec<_> = (1..=4)
        .map(|n| {
            let visitor = Arc::clone(&visitor);
            std::thread::spawn(move || visitor.visit(&num(&n.to_string())))
        })
        .collect();
    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    assert_eq!(
        results,
        [Ok(Value::Int(1)), Ok(Value::Int(2)), Ok(Value::Int(3)), Ok(Value::Int(4))]
    );
}
