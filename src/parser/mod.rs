//! S-expression parser module
//!
//! Builds the tree of atoms and lists from a token stream, and provides the
//! read-only views collaborators consume: printing and node-numbered traversal.

mod ast;
mod config;
mod printer;
mod sexpr_parser;
mod walk;

pub use ast::{Node, NodeKind, SExpr, Siblings, Tree};
pub use config::{BalancePolicy, ParserConfig, StreamMode};
pub use printer::Unparse;
pub use sexpr_parser::SExprParser;
pub use walk::{walk, Collect, DiagramSink, EdgeKind, EdgeRecord, NodeRecord};
