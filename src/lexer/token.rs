use crate::error::ScanError;
use crate::span::Span;
use serde::Serialize;
use std::fmt;

/// Longest text rendered verbatim by `Display` before truncating
const DISPLAY_TEXT_LIMIT: usize = 20;

/// A single token from the source text
///
/// `text` borrows the exact source slice; quoted atoms exclude their quotes
/// and EndOfInput carries an empty slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Token<'src> {
    /// The type of token
    pub kind: TokenKind,
    /// Source slice the token covers
    pub text: &'src str,
    /// Byte range of `text` in the source
    pub span: Span,
}

impl<'src> Token<'src> {
    /// Creates a new token with the given properties
    pub fn new(kind: TokenKind, text: &'src str, span: Span) -> Self {
        Token { kind, text, span }
    }

    /// True for the token that always ends a stream
    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::EndOfInput
    }

    /// True for any token after which the scanner emits nothing
    pub fn is_terminal(&self) -> bool {
        matches!(self.kind, TokenKind::EndOfInput | TokenKind::Error(_))
    }
}

/// All possible token types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TokenKind {
    /// Left parenthesis (
    LeftParen,
    /// Right parenthesis )
    RightParen,
    /// Bare run of non-delimiter code points
    Atom,
    /// Text between a pair of double quotes
    QuotedAtom,
    /// End of input marker, always the last token
    EndOfInput,
    /// Scanner failure; also the last token
    Error(ScanError),
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TokenKind::LeftParen => write!(f, "LeftParen"),
            TokenKind::RightParen => write!(f, "RightParen"),
            TokenKind::Atom => write!(f, "Atom"),
            TokenKind::QuotedAtom => write!(f, "QuotedAtom"),
            TokenKind::EndOfInput => write!(f, "EndOfInput"),
            TokenKind::Error(_) => write!(f, "Error"),
        }
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.kind {
            TokenKind::EndOfInput => write!(f, "EOF"),
            TokenKind::Error(err) => write!(f, "{}", err),
            kind => {
                if self.text.chars().count() > DISPLAY_TEXT_LIMIT {
                    let head: String = self.text.chars().take(DISPLAY_TEXT_LIMIT).collect();
                    write!(f, "{}:{:?}...", kind, head)
                } else {
                    write!(f, "{}:{:?}", kind, self.text)
                }
            }
        }
    }
}
