use super::ast::{SExpr, Tree};
use super::config::BalancePolicy;
use crate::error::{Error, Result};
use crate::lexer::{Token, TokenKind};
use crate::span::{Position, Span};

/// A list whose `(` has been seen but not yet its `)`
struct Frame<'src> {
    open: Span,
    children: Vec<SExpr<'src>>,
}

impl<'src> Frame<'src> {
    fn close(self, end: usize) -> SExpr<'src> {
        SExpr::list(self.children).with_span(Span::new(self.open.start, end))
    }
}

/// Work-stack replacing native recursion for nested lists
#[derive(Default)]
struct Builder<'src> {
    open: Vec<Frame<'src>>,
    top: Vec<SExpr<'src>>,
}

impl<'src> Builder<'src> {
    /// Appends `node` to the innermost open list, or to the top level
    fn push(&mut self, node: SExpr<'src>) {
        match self.open.last_mut() {
            Some(frame) => frame.children.push(node),
            None => self.top.push(node),
        }
    }

    fn open(&mut self, span: Span) {
        self.open.push(Frame {
            open: span,
            children: Vec::new(),
        });
    }

    /// Closes the innermost list; false when no list is open
    fn close(&mut self, end: usize) -> bool {
        match self.open.pop() {
            Some(frame) => {
                let list = frame.close(end);
                self.push(list);
                true
            }
            None => false,
        }
    }

    fn innermost(&self) -> Option<Span> {
        self.open.last().map(|frame| frame.open)
    }

    fn depth(&self) -> usize {
        self.open.len()
    }

    fn finish(self) -> Tree<'src> {
        Tree::new(SExpr::chain(self.top))
    }
}

/// S-expression parser
///
/// Pulls exactly one token per step from a forward-only stream and never
/// looks further ahead. RightParen and EndOfInput are structural: they end
/// the current sibling chain and never become nodes.
pub struct SExprParser<'src, I> {
    tokens: I,
    source: &'src str,
    label: String,
    policy: BalancePolicy,
    consumed: usize,
}

impl<'src, I> SExprParser<'src, I>
where
    I: Iterator<Item = Token<'src>>,
{
    /// Creates a parser over `tokens` scanned from `source`
    ///
    /// `label` only appears in diagnostics.
    pub fn new(source: &'src str, label: impl Into<String>, tokens: I) -> Self {
        SExprParser {
            tokens,
            source,
            label: label.into(),
            policy: BalancePolicy::default(),
            consumed: 0,
        }
    }

    /// Sets how unbalanced parentheses are handled
    pub fn with_policy(mut self, policy: BalancePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Parses the whole stream into a tree
    pub fn parse(mut self) -> Result<Tree<'src>> {
        tracing::debug!(label = %self.label, policy = ?self.policy, "parse start");
        let mut builder = Builder::default();

        loop {
            let token = self.advance()?;

            match token.kind {
                TokenKind::LeftParen => builder.open(token.span),
                TokenKind::RightParen => {
                    if !builder.close(token.span.end) {
                        match self.policy {
                            BalancePolicy::Strict => {
                                return Err(Error::UnmatchedClose {
                                    label: self.label,
                                    position: Position::locate(self.source, token.span.start),
                                    span: token.span,
                                });
                            }
                            BalancePolicy::Lenient => {
                                tracing::warn!(
                                    label = %self.label,
                                    offset = token.span.start,
                                    "unmatched `)` ends the top-level sequence"
                                );
                                break;
                            }
                        }
                    }
                }
                TokenKind::Atom => builder.push(SExpr::atom(token.text).with_span(token.span)),
                TokenKind::QuotedAtom => {
                    builder.push(SExpr::quoted(token.text).with_span(token.span))
                }
                TokenKind::EndOfInput => {
                    if let Some(open) = builder.innermost() {
                        match self.policy {
                            BalancePolicy::Strict => {
                                return Err(Error::UnexpectedEof {
                                    label: self.label,
                                    position: Position::locate(self.source, open.start),
                                    span: open,
                                });
                            }
                            BalancePolicy::Lenient => {
                                tracing::warn!(
                                    label = %self.label,
                                    unclosed = builder.depth(),
                                    "end of input closes open lists"
                                );
                                while builder.close(token.span.end) {}
                            }
                        }
                    }
                    break;
                }
                TokenKind::Error(cause) => {
                    return Err(Error::Scan {
                        label: self.label,
                        position: Position::locate(self.source, token.span.start),
                        span: token.span,
                        cause,
                    });
                }
            }
        }

        tracing::debug!(label = %self.label, tokens = self.consumed, "parse finish");
        Ok(builder.finish())
    }

    fn advance(&mut self) -> Result<Token<'src>> {
        match self.tokens.next() {
            Some(token) => {
                self.consumed += 1;
                tracing::trace!(token = %token, "pull");
                Ok(token)
            }
            None => Err(Error::StreamClosed {
                label: self.label.clone(),
            }),
        }
    }
}
