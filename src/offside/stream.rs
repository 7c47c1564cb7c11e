//! Adapters between token sources and their consumers
//!
//! Grammar engines rarely pull through a bare `next_token` call. They want an iterator, or a
//! buffered stream they can look ahead in and rewind. Both adapters here forward whatever the
//! underlying source returns: no token is reordered, dropped, or duplicated, and the
//! end-of-input token is stored exactly once even though sources repeat it.

use crate::offside::lexing::source::TokenSource;
use crate::offside::token::{Token, TokenKind};
use std::iter::FusedIterator;

/// Iterator over a token source.
///
/// Yields the end-of-input token once and then stops. Stops after the first error as well.
pub struct TokenIter<S> {
    source: S,
    done: bool,
}

impl<S: TokenSource> TokenIter<S> {
    pub fn new(source: S) -> Self {
        TokenIter {
            source,
            done: false,
        }
    }
}

impl<S: TokenSource> Iterator for TokenIter<S> {
    type Item = Result<Token, S::Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let result = self.source.next_token();
        match &result {
            Ok(token) => self.done = token.is(TokenKind::EndOfInput),
            Err(_) => self.done = true,
        }
        Some(result)
    }
}

impl<S: TokenSource> FusedIterator for TokenIter<S> {}

/// Iterate over every token of `source`, end of input included
pub fn iter_tokens<S: TokenSource>(source: S) -> TokenIter<S> {
    TokenIter::new(source)
}

/// Lookahead buffer over a token source.
///
/// Tokens are fetched lazily as lookahead requires them; [fill](Self::fill) fetches
/// everything up to end of input.
pub struct BufferedTokenStream<S> {
    source: S,
    tokens: Vec<Token>,
    index: usize,
    fetched_end: bool,
}

impl<S: TokenSource> BufferedTokenStream<S> {
    pub fn new(source: S) -> Self {
        BufferedTokenStream {
            source,
            tokens: Vec::new(),
            index: 0,
            fetched_end: false,
        }
    }

    fn fetch(&mut self) -> Result<(), S::Error> {
        let token = self.source.next_token()?;
        self.fetched_end = token.is(TokenKind::EndOfInput);
        self.tokens.push(token);
        Ok(())
    }

    /// Make sure the token at buffer position `i` is fetched, if the stream reaches that far
    fn sync(&mut self, i: usize) -> Result<(), S::Error> {
        while self.tokens.len() <= i && !self.fetched_end {
            self.fetch()?;
        }
        Ok(())
    }

    /// Fetch every remaining token
    pub fn fill(&mut self) -> Result<(), S::Error> {
        while !self.fetched_end {
            self.fetch()?;
        }
        Ok(())
    }

    /// The `k`-th token ahead, starting at 1 for the current token.
    ///
    /// Looking past end of input returns the end-of-input token.
    pub fn lt(&mut self, k: usize) -> Result<&Token, S::Error> {
        let i = self.index + k.max(1) - 1;
        self.sync(i)?;
        let i = i.min(self.tokens.len() - 1);
        Ok(&self.tokens[i])
    }

    /// Advance past the current token. Consuming end of input is a no-op.
    pub fn consume(&mut self) -> Result<(), S::Error> {
        if !self.lt(1)?.is(TokenKind::EndOfInput) {
            self.index += 1;
        }
        Ok(())
    }

    /// Position of the current token in the buffer
    pub fn index(&self) -> usize {
        self.index
    }

    /// Move to buffer position `index`, clamped to the end-of-input token
    pub fn seek(&mut self, index: usize) -> Result<(), S::Error> {
        self.sync(index)?;
        self.index = index.min(self.tokens.len().saturating_sub(1));
        Ok(())
    }

    /// Tokens fetched so far
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn into_tokens(self) -> Vec<Token> {
        self.tokens
    }
}
