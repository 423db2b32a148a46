//! Depth-first traversal with node numbering
//!
//! Diagram exporters plug in through [`DiagramSink`]: every node is reported
//! once, numbered in pre-order (node, its `head` subtree, then its `next`
//! chain), followed by the edge from whichever node owns it.

use super::ast::{NodeKind, SExpr, Tree};
use crate::span::Span;
use serde::{Serialize, Serializer};

/// One visited node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NodeRecord<'t> {
    /// Unique id, increasing in visit order from 0
    pub id: usize,
    /// Atom or list
    pub kind: NodeKind,
    /// Atom text; `None` for lists
    pub value: Option<&'t str>,
    /// Whether the atom was written between double quotes
    pub quoted: bool,
    /// Source bytes the node came from
    pub span: Span,
}

/// Which slot an edge leaves from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EdgeKind {
    /// Parent list to its first element
    Head,
    /// Node to its following sibling
    Next,
}

/// Ownership link between two visited nodes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EdgeRecord {
    /// Id of the owning node
    pub from: usize,
    /// Id of the owned node
    pub to: usize,
    /// Slot of `from` that holds `to`
    pub kind: EdgeKind,
}

/// Receiver of traversal output
pub trait DiagramSink<'t> {
    /// Called once per node, in pre-order
    fn node(&mut self, record: NodeRecord<'t>);
    /// Called right after the owned node's own record
    fn edge(&mut self, record: EdgeRecord);
}

/// Sink that keeps everything it is given
#[derive(Debug, Default, Serialize)]
pub struct Collect<'t> {
    /// Nodes in visit order, so `nodes[i].id == i`
    pub nodes: Vec<NodeRecord<'t>>,
    /// Edges in the order their target nodes were visited
    pub edges: Vec<EdgeRecord>,
}

impl<'t> DiagramSink<'t> for Collect<'t> {
    fn node(&mut self, record: NodeRecord<'t>) {
        self.nodes.push(record);
    }

    fn edge(&mut self, record: EdgeRecord) {
        self.edges.push(record);
    }
}

/// Visits `root` and all of its siblings, returning how many nodes were seen
///
/// The tree owns each node exactly once, so no node is ever reported twice.
pub fn walk<'t, S>(root: Option<&'t SExpr<'t>>, sink: &mut S) -> usize
where
    S: DiagramSink<'t> + ?Sized,
{
    let mut pending: Vec<(&'t SExpr<'t>, Option<(usize, EdgeKind)>)> =
        root.map(|node| (node, None)).into_iter().collect();
    let mut next_id = 0;

    while let Some((node, owner)) = pending.pop() {
        let id = next_id;
        next_id += 1;

        sink.node(NodeRecord {
            id,
            kind: node.kind(),
            value: node.value(),
            quoted: node.is_quoted(),
            span: node.span(),
        });
        if let Some((from, kind)) = owner {
            sink.edge(EdgeRecord { from, to: id, kind });
        }

        // Pushed in reverse so the head subtree is numbered first
        if let Some(next) = node.next() {
            pending.push((next, Some((id, EdgeKind::Next))));
        }
        if let Some(head) = node.head() {
            pending.push((head, Some((id, EdgeKind::Head))));
        }
    }

    next_id
}

/// A tree serializes as the flat `{ nodes, edges }` records of its walk
impl Serialize for Tree<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut records = Collect::default();
        walk(self.root(), &mut records);
        records.serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_walk_numbers_in_preorder() {
        // (a (b) c) d
        let root = SExpr::chain(vec![
            SExpr::list(vec![SExpr::atom("a"), SExpr::list(vec![SExpr::atom("b")]), SExpr::atom("c")]),
            SExpr::atom("d"),
        ]);

        let mut sink = Collect::default();
        let count = walk(root.as_deref(), &mut sink);

        assert_eq!(count, 6);
        let values: Vec<_> = sink.nodes.iter().map(|n| n.value).collect();
        assert_eq!(
            values,
            vec![None, Some("a"), None, Some("b"), Some("c"), Some("d")]
        );
        let ids: Vec<_> = sink.nodes.iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![0, 1, 2, 3, 4, 5]);

        assert_eq!(
            sink.edges,
            vec![
                EdgeRecord { from: 0, to: 1, kind: EdgeKind::Head },
                EdgeRecord { from: 1, to: 2, kind: EdgeKind::Next },
                EdgeRecord { from: 2, to: 3, kind: EdgeKind::Head },
                EdgeRecord { from: 2, to: 4, kind: EdgeKind::Next },
                EdgeRecord { from: 0, to: 5, kind: EdgeKind::Next },
            ]
        );
    }

    #[test]
    fn test_walk_empty_root() {
        let mut sink = Collect::default();
        assert_eq!(walk(None, &mut sink), 0);
        assert!(sink.nodes.is_empty());
        assert!(sink.edges.is_empty());
    }

    #[test]
    fn test_walk_deep_nesting() {
        let mut deep = SExpr::atom("x");
        for _ in 0..100_000 {
            deep = SExpr::list(vec![deep]);
        }
        let tree = Tree::new(SExpr::chain(vec![deep]));

        let mut sink = Collect::default();
        assert_eq!(walk(tree.root(), &mut sink), 100_001);
        assert_eq!(sink.edges.len(), 100_000);
        assert_eq!(sink.nodes.last().and_then(|n| n.value), Some("x"));
    }

    #[test]
    fn test_walk_reports_quoted_atoms() {
        let root = SExpr::quoted("hi there");
        let mut sink = Collect::default();
        walk(Some(&root), &mut sink);

        assert_eq!(sink.nodes[0].kind, NodeKind::Atom);
        assert!(sink.nodes[0].quoted);
        assert_eq!(sink.nodes[0].value, Some("hi there"));
    }
}
