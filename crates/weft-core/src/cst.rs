//! Concrete syntax tree shape consumed by the lowering engine.
//!
//! The tree is produced outside this crate (by `weft-compiler`'s reference parser or by any
//! other parser that serializes the same shape). A node carries a kind tag and an ordered
//! map from role label to the children playing that role. Several children may share a role.
//!
//! ```text
//! r_token_option
//!   name: "regex"
//!   value: r_token_option_value
//!     regex: "/\s+/"
//! ```

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Byte range in the source a token was read from.
///
/// Hand-built trees use the default empty span.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

impl Span {
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    pub fn range(self) -> std::ops::Range<usize> {
        self.start as usize..self.end as usize
    }
}

/// Terminal with its literal text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub image: String,
    #[serde(default)]
    pub span: Span,
}

impl Token {
    pub fn new(image: impl Into<String>) -> Self {
        Self {
            image: image.into(),
            span: Span::default(),
        }
    }

    pub fn with_span(image: impl Into<String>, span: Span) -> Self {
        Self {
            image: image.into(),
            span,
        }
    }
}

/// A child slot: either a nested node or a terminal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CstChild<K> {
    Node(CstNode<K>),
    Token(Token),
}

impl<K> CstChild<K> {
    pub fn as_node(&self) -> Option<&CstNode<K>> {
        match self {
            CstChild::Node(node) => Some(node),
            CstChild::Token(_) => None,
        }
    }

    pub fn as_token(&self) -> Option<&Token> {
        match self {
            CstChild::Token(token) => Some(token),
            CstChild::Node(_) => None,
        }
    }
}

/// Role label → ordered children. Roles keep first-insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Children<K> {
    roles: IndexMap<String, Vec<CstChild<K>>>,
}

impl<K> Default for Children<K> {
    fn default() -> Self {
        Self {
            roles: IndexMap::new(),
        }
    }
}

impl<K> Children<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a child under `role`, after any children already there.
    pub fn push(&mut self, role: impl Into<String>, child: CstChild<K>) {
        self.roles.entry(role.into()).or_default().push(child);
    }

    /// All children under `role`, empty when the role is not populated.
    pub fn get(&self, role: &str) -> &[CstChild<K>] {
        self.roles.get(role).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn has(&self, role: &str) -> bool {
        self.roles.get(role).is_some_and(|c| !c.is_empty())
    }

    /// First token under `role`.
    pub fn token(&self, role: &str) -> Option<&Token> {
        self.get(role).iter().find_map(CstChild::as_token)
    }

    /// First node under `role`.
    pub fn node(&self, role: &str) -> Option<&CstNode<K>> {
        self.get(role).iter().find_map(CstChild::as_node)
    }

    /// Node children under `role`, tokens skipped.
    pub fn nodes<'a>(&'a self, role: &str) -> impl Iterator<Item = &'a CstNode<K>> + use<'a, K> {
        self.get(role).iter().filter_map(CstChild::as_node)
    }

    pub fn roles(&self) -> impl Iterator<Item = (&str, &[CstChild<K>])> {
        self.roles.iter().map(|(r, c)| (r.as_str(), c.as_slice()))
    }

    pub fn is_empty(&self) -> bool {
        self.roles.values().all(Vec::is_empty)
    }
}

/// Compact role summary used in error messages: `name="WS" options=[r_token_option]`.
impl<K: fmt::Display> fmt::Display for Children<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("(no children)");
        }
        for (i, (role, children)) in self.roles().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{role}=")?;
            if let [single] = children {
                write_child(f, single)?;
                continue;
            }
            f.write_str("[")?;
            for (j, child) in children.iter().enumerate() {
                if j > 0 {
                    f.write_str(", ")?;
                }
                write_child(f, child)?;
            }
            f.write_str("]")?;
        }
        Ok(())
    }
}

fn write_child<K: fmt::Display>(f: &mut fmt::Formatter<'_>, child: &CstChild<K>) -> fmt::Result {
    match child {
        CstChild::Node(node) => write!(f, "{}", node.kind),
        CstChild::Token(token) => write!(f, "{:?}", token.image),
    }
}

/// Interior CST node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound(deserialize = "K: Deserialize<'de>"))]
pub struct CstNode<K> {
    pub kind: K,
    #[serde(default)]
    pub children: Children<K>,
}

impl<K> CstNode<K> {
    pub fn new(kind: K) -> Self {
        Self {
            kind,
            children: Children::new(),
        }
    }

    pub fn with_token(mut self, role: impl Into<String>, image: impl Into<String>) -> Self {
        self.children.push(role, CstChild::Token(Token::new(image)));
        self
    }

    pub fn with_node(mut self, role: impl Into<String>, node: CstNode<K>) -> Self {
        self.children.push(role, CstChild::Node(node));
        self
    }

    pub fn push_token(&mut self, role: impl Into<String>, token: Token) {
        self.children.push(role, CstChild::Token(token));
    }

    pub fn push_node(&mut self, role: impl Into<String>, node: CstNode<K>) {
        self.children.push(role, CstChild::Node(node));
    }

    /// Largest number of nodes of a `counted` kind on one path down from this node, itself
    /// included. Walks with an explicit stack, so arbitrarily deep trees are safe to measure.
    pub fn depth_by(&self, mut counted: impl FnMut(&K) -> bool) -> usize {
        let mut deepest = 0;
        let mut stack = vec![(self, 0usize)];
        while let Some((node, above)) = stack.pop() {
            let here = above + usize::from(counted(&node.kind));
            deepest = deepest.max(here);
            for (_, children) in node.children.roles() {
                stack.extend(children.iter().filter_map(CstChild::as_node).map(|c| (c, here)));
            }
        }
        deepest
    }
}
