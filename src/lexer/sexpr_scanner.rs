use super::token::{Token, TokenKind};
use crate::error::ScanError;
use crate::span::Span;
use std::iter::FusedIterator;

/// Scanner states
///
/// `LeftParen`, `RightParen` and `EndOfInput` are transient: they emit a
/// single token and hand control back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Default,
    InQuoted,
    InWhitespace,
    LeftParen,
    RightParen,
    EndOfInput,
    Done,
}

/// Scanner for S-expression text
///
/// The scanner is a lazy generator: every call to [`Iterator::next`] runs the
/// state machine just far enough to produce one token. The final token is
/// always EndOfInput or Error, after which the iterator is exhausted.
#[derive(Debug, Clone)]
pub struct SExprScanner<'src> {
    /// Source text, never copied
    source: &'src str,
    /// Start of the token being accumulated
    start: usize,
    /// Current byte position
    pos: usize,
    /// Byte width of the last consumed code point, for `backup`
    width: usize,
    state: State,
}

impl<'src> SExprScanner<'src> {
    /// Creates a new S-expression scanner over source text
    pub fn new(source: &'src str) -> Self {
        SExprScanner {
            source,
            start: 0,
            pos: 0,
            width: 0,
            state: State::Default,
        }
    }

    /// Drains the scanner and returns every token, the terminal one included
    pub fn scan_tokens(&mut self) -> Vec<Token<'src>> {
        self.collect()
    }

    /// Runs one state; returns the token it emitted, if any
    fn step(&mut self) -> Option<Token<'src>> {
        match self.state {
            State::Default => self.scan_default(),
            State::InQuoted => self.scan_quoted(),
            State::InWhitespace => self.scan_whitespace(),
            State::LeftParen => self.scan_paren(TokenKind::LeftParen),
            State::RightParen => self.scan_paren(TokenKind::RightParen),
            State::EndOfInput => {
                self.transition(State::Done);
                Some(self.emit(TokenKind::EndOfInput))
            }
            State::Done => None,
        }
    }

    fn scan_default(&mut self) -> Option<Token<'src>> {
        loop {
            match self.peek() {
                Some('(') => {
                    self.transition(State::LeftParen);
                    return self.flush_atom();
                }
                Some(')') => {
                    self.transition(State::RightParen);
                    return self.flush_atom();
                }
                Some('"') => {
                    let pending = self.flush_atom();
                    // Opening quote is not part of any token
                    self.next_char();
                    self.ignore();
                    self.transition(State::InQuoted);
                    return pending;
                }
                Some(c) if is_whitespace(c) => {
                    self.transition(State::InWhitespace);
                    return self.flush_atom();
                }
                None => {
                    self.transition(State::EndOfInput);
                    return self.flush_atom();
                }
                Some(_) => {
                    self.next_char();
                }
            }
        }
    }

    fn scan_quoted(&mut self) -> Option<Token<'src>> {
        loop {
            match self.next_char() {
                Some('"') => {
                    let span = Span::new(self.start, self.pos - 1);
                    let token = Token::new(TokenKind::QuotedAtom, &self.source[span.start..span.end], span);
                    self.ignore();
                    self.transition(State::Default);
                    return Some(token);
                }
                Some(_) => {}
                None => {
                    // Report from the opening quote onwards
                    let span = Span::new(self.start - 1, self.pos);
                    self.ignore();
                    self.transition(State::Done);
                    return Some(Token::new(
                        TokenKind::Error(ScanError::UnterminatedQuote),
                        &self.source[span.start..span.end],
                        span,
                    ));
                }
            }
        }
    }

    fn scan_whitespace(&mut self) -> Option<Token<'src>> {
        while self.peek().is_some_and(is_whitespace) {
            self.next_char();
        }
        self.ignore();
        self.transition(State::Default);
        None
    }

    fn scan_paren(&mut self, kind: TokenKind) -> Option<Token<'src>> {
        self.next_char();
        self.transition(State::Default);
        Some(self.emit(kind))
    }

    /// Emits the pending atom text, if any has accumulated
    fn flush_atom(&mut self) -> Option<Token<'src>> {
        if self.pos > self.start {
            Some(self.emit(TokenKind::Atom))
        } else {
            None
        }
    }

    fn emit(&mut self, kind: TokenKind) -> Token<'src> {
        let span = Span::new(self.start, self.pos);
        self.start = self.pos;
        let token = Token::new(kind, &self.source[span.start..span.end], span);
        tracing::trace!(token = %token, start = span.start, end = span.end, "emit");
        token
    }

    fn transition(&mut self, next: State) {
        tracing::trace!(from = ?self.state, to = ?next, pos = self.pos, "scanner state");
        self.state = next;
    }

    /// Drops everything accumulated since the last emit
    fn ignore(&mut self) {
        self.start = self.pos;
    }

    /// Consumes one code point
    fn next_char(&mut self) -> Option<char> {
        match self.source[self.pos..].chars().next() {
            Some(c) => {
                self.width = c.len_utf8();
                self.pos += self.width;
                Some(c)
            }
            None => {
                self.width = 0;
                None
            }
        }
    }

    /// Undoes the last `next_char`; only one step of undo is supported
    fn backup(&mut self) {
        self.pos -= self.width;
        self.width = 0;
    }

    fn peek(&mut self) -> Option<char> {
        let c = self.next_char();
        self.backup();
        c
    }
}

impl<'src> Iterator for SExprScanner<'src> {
    type Item = Token<'src>;

    fn next(&mut self) -> Option<Self::Item> {
        while self.state != State::Done {
            if let Some(token) = self.step() {
                return Some(token);
            }
        }
        None
    }
}

impl FusedIterator for SExprScanner<'_> {}

fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\n')
}
