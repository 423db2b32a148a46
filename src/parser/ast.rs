use super::printer::Chain;
use crate::span::Span;
use serde::Serialize;
use std::fmt;
use std::iter::FusedIterator;

/// Parsed S-expression text: the top-level sibling chain
///
/// An empty (or whitespace-only) source yields a tree with no root.
/// Serializes as its flat traversal records, see [`walk`](crate::walk).
#[derive(Default, PartialEq)]
pub struct Tree<'src> {
    root: Option<Box<SExpr<'src>>>,
}

impl<'src> Tree<'src> {
    /// Wraps a top-level chain
    pub fn new(root: Option<Box<SExpr<'src>>>) -> Self {
        Tree { root }
    }

    /// First top-level element
    pub fn root(&self) -> Option<&SExpr<'src>> {
        self.root.as_deref()
    }

    /// Hands the top-level chain over to the caller
    pub fn into_root(mut self) -> Option<Box<SExpr<'src>>> {
        self.root.take()
    }

    /// True when the source held no element at all
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Top-level elements in order
    pub fn iter(&self) -> Siblings<'_, 'src> {
        Siblings {
            current: self.root(),
        }
    }
}

/// Which variant a node is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum NodeKind {
    /// Bare or quoted text
    Atom,
    /// Parenthesised sequence
    List,
}

/// Payload of a tree node
pub enum Node<'src> {
    /// Indivisible text value borrowed from the source
    Atom {
        /// Text of the atom; quotes excluded
        value: &'src str,
        /// Whether the atom was written between double quotes
        quoted: bool,
    },
    /// Possibly empty list; `head` is `None` exactly for `()`
    List {
        /// First element of the list's contents
        head: Option<Box<SExpr<'src>>>,
    },
}

/// One node of the tree plus the link to its following sibling
///
/// Every node has exactly one owner: its predecessor's `next`, its parent
/// list's `head`, or the [`Tree`] root. The structure is read-only once the
/// parser hands it over.
pub struct SExpr<'src> {
    pub(crate) node: Node<'src>,
    pub(crate) span: Span,
    pub(crate) next: Option<Box<SExpr<'src>>>,
}

impl<'src> SExpr<'src> {
    /// Bare atom
    pub fn atom(value: &'src str) -> Self {
        SExpr::from_node(Node::Atom {
            value,
            quoted: false,
        })
    }

    /// Atom written between double quotes
    pub fn quoted(value: &'src str) -> Self {
        SExpr::from_node(Node::Atom {
            value,
            quoted: true,
        })
    }

    /// List whose contents are `children`, in order
    pub fn list(children: Vec<SExpr<'src>>) -> Self {
        SExpr::from_node(Node::List {
            head: SExpr::chain(children),
        })
    }

    /// Links `nodes` through their `next` slots and returns the first one
    ///
    /// Any `next` link the nodes already carried is replaced.
    pub fn chain(nodes: Vec<SExpr<'src>>) -> Option<Box<SExpr<'src>>> {
        let mut next = None;
        for mut node in nodes.into_iter().rev() {
            node.next = next;
            next = Some(Box::new(node));
        }
        next
    }

    /// Sets the source range this node covers
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    fn from_node(node: Node<'src>) -> Self {
        SExpr {
            node,
            span: Span::default(),
            next: None,
        }
    }

    /// Payload of this node
    pub fn node(&self) -> &Node<'src> {
        &self.node
    }

    /// Which variant this node is
    pub fn kind(&self) -> NodeKind {
        match self.node {
            Node::Atom { .. } => NodeKind::Atom,
            Node::List { .. } => NodeKind::List,
        }
    }

    /// Source range: the atom text, or a list from `(` through `)`
    pub fn span(&self) -> Span {
        self.span
    }

    /// True for bare and quoted atoms
    pub fn is_atom(&self) -> bool {
        matches!(self.node, Node::Atom { .. })
    }

    /// True for lists, empty ones included
    pub fn is_list(&self) -> bool {
        matches!(self.node, Node::List { .. })
    }

    /// Text of an atom; `None` for lists
    pub fn value(&self) -> Option<&'src str> {
        match self.node {
            Node::Atom { value, .. } => Some(value),
            Node::List { .. } => None,
        }
    }

    /// True only for atoms written between double quotes
    pub fn is_quoted(&self) -> bool {
        matches!(self.node, Node::Atom { quoted: true, .. })
    }

    /// First element of a list; `None` for `()` and for atoms
    pub fn head(&self) -> Option<&SExpr<'src>> {
        match &self.node {
            Node::List { head } => head.as_deref(),
            Node::Atom { .. } => None,
        }
    }

    /// Following sibling in the enclosing sequence
    pub fn next(&self) -> Option<&SExpr<'src>> {
        self.next.as_deref()
    }

    /// This node followed by every later sibling
    pub fn siblings(&self) -> Siblings<'_, 'src> {
        Siblings {
            current: Some(self),
        }
    }

    /// Contents of a list; empty for atoms
    pub fn children(&self) -> Siblings<'_, 'src> {
        Siblings {
            current: self.head(),
        }
    }
}

/// Structural equality: spans are ignored
impl PartialEq for SExpr<'_> {
    fn eq(&self, other: &Self) -> bool {
        let mut pending = vec![(self, other)];

        while let Some((left, right)) = pending.pop() {
            match (&left.node, &right.node) {
                (
                    Node::Atom {
                        value: lv,
                        quoted: lq,
                    },
                    Node::Atom {
                        value: rv,
                        quoted: rq,
                    },
                ) => {
                    if lv != rv || lq != rq {
                        return false;
                    }
                }
                (Node::List { head: lh }, Node::List { head: rh }) => {
                    match (lh.as_deref(), rh.as_deref()) {
                        (Some(l), Some(r)) => pending.push((l, r)),
                        (None, None) => {}
                        _ => return false,
                    }
                }
                _ => return false,
            }

            match (left.next(), right.next()) {
                (Some(l), Some(r)) => pending.push((l, r)),
                (None, None) => {}
                _ => return false,
            }
        }

        true
    }
}

impl Eq for SExpr<'_> {}

// Debug output goes through the printer, which never recurses into the tree

impl fmt::Debug for Tree<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Tree")
            .field(&format_args!("{}", Chain(self.root())))
            .finish()
    }
}

impl fmt::Debug for Node<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Atom { value, quoted } => f
                .debug_struct("Atom")
                .field("value", value)
                .field("quoted", quoted)
                .finish(),
            Node::List { head } => f
                .debug_tuple("List")
                .field(&format_args!("({})", Chain(head.as_deref())))
                .finish(),
        }
    }
}

impl fmt::Debug for SExpr<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SExpr")
            .field("kind", &self.kind())
            .field("text", &format_args!("{}", self))
            .field("span", &self.span)
            .field("has_next", &self.next.is_some())
            .finish()
    }
}

/// Iterative teardown so long chains and deep nesting never exhaust the stack
impl Drop for SExpr<'_> {
    fn drop(&mut self) {
        let mut pending: Vec<Box<SExpr<'_>>> = Vec::new();
        pending.extend(self.next.take());
        if let Node::List { head } = &mut self.node {
            pending.extend(head.take());
        }

        while let Some(mut node) = pending.pop() {
            pending.extend(node.next.take());
            if let Node::List { head } = &mut node.node {
                pending.extend(head.take());
            }
        }
    }
}

/// Iterator over a sibling chain
#[derive(Debug, Clone)]
pub struct Siblings<'t, 'src> {
    current: Option<&'t SExpr<'src>>,
}

impl<'t, 'src> Iterator for Siblings<'t, 'src> {
    type Item = &'t SExpr<'src>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.current?;
        self.current = node.next();
        Some(node)
    }
}

impl FusedIterator for Siblings<'_, '_> {}
