//! Token stream plumbing between the scanner and the parser
//!
//! The default stream is the scanner itself, pulled one token at a time by
//! the parser. [`Rendezvous`] runs the scanner on its own thread instead and
//! hands tokens over a zero-capacity channel, so the producer is never more
//! than one token ahead of the consumer.

use super::sexpr_scanner::SExprScanner;
use super::token::Token;
use std::iter::FusedIterator;
use std::sync::mpsc::{sync_channel, Receiver};
use std::thread::{Scope, ScopedJoinHandle};

/// Receiving end of a scanner running on a scoped thread
///
/// Dropping the receiver before EndOfInput makes the producer's next send
/// fail, so it exits instead of blocking forever.
pub struct Rendezvous<'src> {
    items: Receiver<Token<'src>>,
    finished: bool,
}

impl<'src> Rendezvous<'src> {
    /// Spawns a scanner over `source` inside `scope`
    ///
    /// The scanner thread exits right after handing over the terminal token,
    /// or as soon as the receiver is dropped.
    pub fn spawn<'scope>(
        scope: &'scope Scope<'scope, 'src>,
        source: &'src str,
    ) -> (Self, ScopedJoinHandle<'scope, usize>) {
        let (tx, rx) = sync_channel(0);

        let handle = scope.spawn(move || {
            let mut sent = 0;
            for token in SExprScanner::new(source) {
                if tx.send(token).is_err() {
                    tracing::debug!(sent, "token consumer hung up early");
                    break;
                }
                sent += 1;
            }
            sent
        });

        (
            Rendezvous {
                items: rx,
                finished: false,
            },
            handle,
        )
    }
}

impl<'src> Iterator for Rendezvous<'src> {
    type Item = Token<'src>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        match self.items.recv() {
            Ok(token) => {
                // Never read past the terminal token
                self.finished = token.is_terminal();
                Some(token)
            }
            Err(_) => {
                self.finished = true;
                None
            }
        }
    }
}

impl FusedIterator for Rendezvous<'_> {}

/// Scans `source` to completion and returns every token
pub fn tokenize(source: &str) -> Vec<Token<'_>> {
    SExprScanner::new(source).collect()
}
