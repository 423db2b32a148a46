//! Error types for the sexpr scanner and parser

use crate::span::{Position, Span};
use serde::Serialize;
use thiserror::Error;

/// Failures detected while scanning raw text
///
/// A scan error never aborts the scanner directly: it is carried by a terminal
/// [`TokenKind::Error`](crate::lexer::TokenKind::Error) token that ends the
/// stream, and the parser turns it into [`Error::Scan`].
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ScanError {
    /// End of input reached before the closing `"` of a quoted atom
    #[error("unterminated quoted atom")]
    UnterminatedQuote,
}

/// Parse errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The scanner reported a failure through an Error token
    ///
    /// **Triggered by:** `(a "b` (quote never closed)
    #[error("{label}:{position}: {cause} (bytes {span})")]
    Scan {
        /// Diagnostic label of the source
        label: String,
        /// Where the failing token starts
        position: Position,
        /// Byte range of the failing token
        span: Span,
        /// Underlying scanner failure
        #[source]
        cause: ScanError,
    },

    /// End of input while a list was still open
    ///
    /// **Triggered by:** `(a (b c)` under the strict policy
    #[error("{label}:{position}: unexpected end of input inside list opened at bytes {span}")]
    UnexpectedEof {
        /// Diagnostic label of the source
        label: String,
        /// Where the innermost unmatched `(` is
        position: Position,
        /// Byte range of the innermost unmatched `(`
        span: Span,
    },

    /// A `)` with no open list to close
    ///
    /// **Triggered by:** `a) b` under the strict policy
    #[error("{label}:{position}: unmatched `)` (bytes {span})")]
    UnmatchedClose {
        /// Diagnostic label of the source
        label: String,
        /// Where the stray `)` is
        position: Position,
        /// Byte range of the stray `)`
        span: Span,
    },

    /// The token stream ran dry without ever yielding EndOfInput
    #[error("{label}: token stream closed before end of input")]
    StreamClosed {
        /// Diagnostic label of the source
        label: String,
    },
}

impl Error {
    /// Byte range of the offending input, when there is one
    pub fn span(&self) -> Option<Span> {
        match self {
            Error::Scan { span, .. }
            | Error::UnexpectedEof { span, .. }
            | Error::UnmatchedClose { span, .. } => Some(*span),
            Error::StreamClosed { .. } => None,
        }
    }

    /// Diagnostic label the failing parse was started with
    pub fn label(&self) -> &str {
        match self {
            Error::Scan { label, .. }
            | Error::UnexpectedEof { label, .. }
            | Error::UnmatchedClose { label, .. }
            | Error::StreamClosed { label } => label,
        }
    }
}

/// Result type for sexpr operations
pub type Result<T> = std::result::Result<T, Error>;
