//! Tree-to-text printing
//!
//! [`Unparse`] walks a tree with an explicit stack and yields text fragments;
//! concatenated they form the canonical text of the tree: one space between
//! siblings, list contents wrapped in `(` `)`, quoted atoms in `"`.

use super::ast::{Node, SExpr, Tree};
use std::fmt;
use std::iter::FusedIterator;

enum Step<'t> {
    /// Print a node, then its following siblings if the flag is set
    Node(&'t SExpr<'t>, bool),
    Text(&'t str),
}

/// Lazy fragment sequence reconstructing text from a tree
///
/// Fragments borrow from the tree, and through it from the source.
pub struct Unparse<'t> {
    stack: Vec<Step<'t>>,
}

impl<'t> Unparse<'t> {
    /// Prints `root` and every sibling after it; `None` prints nothing
    pub fn chain(root: Option<&'t SExpr<'t>>) -> Self {
        Unparse {
            stack: root.map(|node| Step::Node(node, true)).into_iter().collect(),
        }
    }

    /// Prints one node without its following siblings
    pub fn node(node: &'t SExpr<'t>) -> Self {
        Unparse {
            stack: vec![Step::Node(node, false)],
        }
    }

    /// The same output as raw bytes
    pub fn bytes(self) -> impl Iterator<Item = u8> + 't {
        self.flat_map(str::bytes)
    }
}

impl<'t> Iterator for Unparse<'t> {
    type Item = &'t str;

    fn next(&mut self) -> Option<Self::Item> {
        match self.stack.pop()? {
            Step::Text(text) => Some(text),
            Step::Node(node, with_siblings) => {
                // Pushed in reverse: siblings print after this node
                if with_siblings {
                    if let Some(next) = node.next() {
                        self.stack.push(Step::Node(next, true));
                        self.stack.push(Step::Text(" "));
                    }
                }

                match node.node() {
                    Node::Atom {
                        value,
                        quoted: true,
                    } => {
                        self.stack.push(Step::Text("\""));
                        self.stack.push(Step::Text(*value));
                        Some("\"")
                    }
                    Node::Atom {
                        value,
                        quoted: false,
                    } => Some(*value),
                    Node::List { head } => {
                        self.stack.push(Step::Text(")"));
                        if let Some(head) = head.as_deref() {
                            self.stack.push(Step::Node(head, true));
                        }
                        Some("(")
                    }
                }
            }
        }
    }
}

impl FusedIterator for Unparse<'_> {}

impl fmt::Display for SExpr<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Unparse::node(self).try_for_each(|piece| f.write_str(piece))
    }
}

impl fmt::Display for Tree<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&Chain(self.root()), f)
    }
}

/// Displays a node and its following siblings
pub(crate) struct Chain<'t>(pub(crate) Option<&'t SExpr<'t>>);

impl fmt::Display for Chain<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Unparse::chain(self.0).try_for_each(|piece| f.write_str(piece))
    }
}

impl<'src> Tree<'src> {
    /// Canonical text of the whole tree as a lazy fragment sequence
    pub fn unparse(&self) -> Unparse<'_> {
        Unparse::chain(self.root())
    }
}
