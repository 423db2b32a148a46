//! Lexical analysis for S-expressions
//!
//! Converts source text into a forward-only stream of tokens.

mod sexpr_scanner;
mod stream;
mod token;

pub use sexpr_scanner::SExprScanner;
pub use stream::{tokenize, Rendezvous};
pub use token::{Token, TokenKind};
