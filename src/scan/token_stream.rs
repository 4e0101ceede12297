use std::collections::VecDeque;

use crate::Token;

/// A buffered, k-lookahead view over a lazily-produced sequence of tokens.
///
/// Wraps any [`Iterator<Item = Token>`] — typically the iterator returned by
/// [`Scanner::scan`](crate::Scanner::scan) — and lets the prediction engine and parse driver peek
/// arbitrarily far ahead without consuming.
pub struct TokenStream<I: Iterator<Item = Token>> {
    source: I,
    buffer: VecDeque<Token>,
    exhausted: bool,
}

impl<I: Iterator<Item = Token>> TokenStream<I> {
    /// Wraps the given token-producing iterator.
    pub fn new(source: I) -> Self {
        TokenStream {
            source,
            buffer: VecDeque::new(),
            exhausted: false,
        }
    }

    /// Returns the token `k` positions ahead of the cursor without consuming it, pulling from the
    /// underlying sequence as needed. Once the underlying sequence is exhausted it is never
    /// queried again.
    pub fn peek(&mut self, k: usize) -> Option<&Token> {
        while self.buffer.len() <= k && !self.exhausted {
            match self.source.next() {
                Some(token) => self.buffer.push_back(token),
                None => self.exhausted = true,
            }
        }
        self.buffer.get(k)
    }

    /// Removes and returns the head of the stream, pulling one token from the underlying
    /// sequence if the buffer is empty.
    pub fn consume(&mut self) -> Option<Token> {
        if let Some(token) = self.buffer.pop_front() {
            return Some(token);
        }
        if self.exhausted {
            return None;
        }
        match self.source.next() {
            Some(token) => Some(token),
            None => {
                self.exhausted = true;
                None
            }
        }
    }

    /// True iff the underlying sequence is exhausted and the buffer is empty.
    pub fn is_eof(&self) -> bool {
        self.exhausted && self.buffer.is_empty()
    }
}
