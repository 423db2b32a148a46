//! # sexpr - streaming S-expression scanner and parser
//!
//! Turns LISP-style symbolic expression text into an in-memory tree of atoms
//! and lists.
//!
//! ## Quick Start
//!
//! ```rust
//! use sexpr::{parse, SExpr};
//!
//! # fn main() -> sexpr::Result<()> {
//! let tree = parse("(test (test2 \"i am long\" test3) blah)", "example")?;
//!
//! let root = tree.root().expect("one top-level list");
//! let first: Vec<_> = root.children().filter_map(SExpr::value).collect();
//! assert_eq!(first, vec!["test", "blah"]);
//!
//! // Printing gives the canonical text back
//! assert_eq!(tree.to_string(), "(test (test2 \"i am long\" test3) blah)");
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! Source Text → Scanner → Token Stream → Parser → Tree
//! ```
//!
//! - [`Scanner`] - state machine producing tokens on demand
//! - [`Rendezvous`] - optional threaded hand-off with zero buffering
//! - [`Parser`] - consumes one token per step and builds the [`Tree`]
//! - [`Unparse`] / [`walk`] - read-only views for printers and exporters
//!
//! Token and atom text borrow from the source; nothing is copied.
//!
//! ## Error Handling
//!
//! An unterminated quoted atom ends the token stream with an Error token,
//! which the parser reports as [`Error::Scan`]. Unbalanced parentheses are
//! errors under the default [`BalancePolicy::Strict`]. Every error message
//! carries the diagnostic label, line and column, and byte range.
//!
//! ```rust
//! let err = sexpr::parse("(a \"b", "repl").unwrap_err();
//! assert_eq!(err.to_string(), "repl:1:4: unterminated quoted atom (bytes 3..5)");
//! ```

pub mod error;
pub mod lexer;
pub mod parser;
pub mod span;

// Re-export main types
pub use error::{Error, Result, ScanError};
pub use lexer::{tokenize, Rendezvous, SExprScanner, Token, TokenKind};
pub use parser::{
    walk, BalancePolicy, Collect, DiagramSink, EdgeKind, EdgeRecord, Node, NodeKind, NodeRecord,
    ParserConfig, SExpr, SExprParser, Siblings, StreamMode, Tree, Unparse,
};
pub use span::{Position, Span};

/// Type alias for the S-expression scanner (lexer).
pub type Scanner<'src> = SExprScanner<'src>;

/// Type alias for the S-expression parser driven by the pull-model scanner.
pub type Parser<'src> = SExprParser<'src, SExprScanner<'src>>;

/// Parses `source` with the default configuration
///
/// `label` names the source in diagnostics only.
pub fn parse<'src>(source: &'src str, label: &str) -> Result<Tree<'src>> {
    parse_with(source, label, &ParserConfig::default())
}

/// Parses `source` with an explicit configuration
pub fn parse_with<'src>(source: &'src str, label: &str, config: &ParserConfig) -> Result<Tree<'src>> {
    match config.stream {
        StreamMode::Pull => SExprParser::new(source, label, SExprScanner::new(source))
            .with_policy(config.policy)
            .parse(),
        StreamMode::Rendezvous => std::thread::scope(|scope| {
            let (tokens, _producer) = Rendezvous::spawn(scope, source);
            // The receiver is dropped when parsing returns, releasing the producer
            SExprParser::new(source, label, tokens)
                .with_policy(config.policy)
                .parse()
        }),
    }
}
