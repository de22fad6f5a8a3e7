//! Kind-keyed dispatch over a role-labeled tree.
//!
//! A [`Visitor`] maps node kinds to handlers. Visiting a node runs, in order:
//! 1. the handler registered for `node.kind`, given the node's children and the visitor itself
//! 2. the default handler, given the whole node
//! 3. the fallback chosen at construction: identity ([`Visitor::new`]) or rejection
//!    ([`Visitor::strict`])
//!
//! Handlers decide which children to descend into by calling back into the visitor, so
//! punctuation and other irrelevant children are simply never visited. Handler errors are
//! returned as-is.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use crate::cst::{Children, CstNode};

/// Per-kind handler: receives the node's children and the visitor for recursion.
pub type Handler<K, V, E> =
    Box<dyn Fn(&Children<K>, &Visitor<K, V, E>) -> Result<V, E> + Send + Sync>;

type DefaultHandler<K, V, E> =
    Box<dyn Fn(&CstNode<K>, &Visitor<K, V, E>) -> Result<V, E> + Send + Sync>;

type Fallback<K, V, E> = fn(&CstNode<K>) -> Result<V, E>;

/// A node reached a strict visitor with no handler for its kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnhandledNode<K> {
    pub kind: K,
}

impl<K: fmt::Debug> fmt::Display for UnhandledNode<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "no handler registered for node kind {:?}", self.kind)
    }
}

impl<K: fmt::Debug> std::error::Error for UnhandledNode<K> {}

pub struct Visitor<K, V, E> {
    handlers: HashMap<K, Handler<K, V, E>>,
    default: Option<DefaultHandler<K, V, E>>,
    fallback: Fallback<K, V, E>,
}

impl<K, V, E> Visitor<K, V, E>
where
    K: Copy + Eq + Hash + fmt::Debug,
    V: From<CstNode<K>>,
{
    /// Visitor whose fallback returns unhandled nodes unchanged.
    pub fn new() -> Self {
        Self::with_fallback(|node| Ok(V::from(node.clone())))
    }
}

impl<K, V, E> Default for Visitor<K, V, E>
where
    K: Copy + Eq + Hash + fmt::Debug,
    V: From<CstNode<K>>,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, E> Visitor<K, V, E>
where
    K: Copy + Eq + Hash + fmt::Debug,
    E: From<UnhandledNode<K>>,
{
    /// Visitor whose fallback fails with [`UnhandledNode`].
    pub fn strict() -> Self {
        Self::with_fallback(|node| Err(E::from(UnhandledNode { kind: node.kind })))
    }
}

impl<K, V, E> Visitor<K, V, E>
where
    K: Copy + Eq + Hash + fmt::Debug,
{
    fn with_fallback(fallback: Fallback<K, V, E>) -> Self {
        Self {
            handlers: HashMap::new(),
            default: None,
            fallback,
        }
    }

    /// Registers `handler` for `kind`, replacing any previous one.
    pub fn on<F>(mut self, kind: K, handler: F) -> Self
    where
        F: Fn(&Children<K>, &Self) -> Result<V, E> + Send + Sync + 'static,
    {
        self.handlers.insert(kind, Box::new(handler));
        self
    }

    /// Installs the handler used for kinds without a registered one.
    pub fn with_default<F>(mut self, handler: F) -> Self
    where
        F: Fn(&CstNode<K>, &Self) -> Result<V, E> + Send + Sync + 'static,
    {
        self.default = Some(Box::new(handler));
        self
    }

    pub fn handles(&self, kind: K) -> bool {
        self.handlers.contains_key(&kind)
    }

    pub fn visit(&self, node: &CstNode<K>) -> Result<V, E> {
        if let Some(handler) = self.handlers.get(&node.kind) {
            tracing::trace!(kind = ?node.kind, "dispatch to handler");
            return handler(&node.children, self);
        }
        if let Some(default) = &self.default {
            tracing::trace!(kind = ?node.kind, "dispatch to default");
            return default(node, self);
        }
        tracing::trace!(kind = ?node.kind, "dispatch to fallback");
        (self.fallback)(node)
    }

    /// Visits each node in order, stopping at the first error.
    pub fn visit_all<'a, I>(&self, nodes: I) -> Result<Vec<V>, E>
    where
        I: IntoIterator<Item = &'a CstNode<K>>,
        K: 'a,
    {
        nodes.into_iter().map(|node| self.visit(node)).collect()
    }
}

impl<K: fmt::Debug, V, E> fmt::Debug for Visitor<K, V, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Visitor")
            .field("kinds", &self.handlers.keys().collect::<Vec<_>>())
            .field("has_default", &self.default.is_some())
            .finish()
    }
}
