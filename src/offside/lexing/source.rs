//! The pull contract shared by the scanner and the indentation tracker

use crate::offside::error::Error;
use crate::offside::token::{Token, TokenKind};

/// A component tokens are pulled from, one at a time.
///
/// Once an `EndOfInput` token has been returned, raw sources keep returning it on every
/// later call. The indentation tracker implements this same trait over its inner source, so
/// it can stand in for a raw source anywhere one is expected.
pub trait TokenSource {
    type Error;

    fn next_token(&mut self) -> Result<Token, Self::Error>;
}

impl<S: TokenSource + ?Sized> TokenSource for &mut S {
    type Error = S::Error;

    fn next_token(&mut self) -> Result<Token, Self::Error> {
        (**self).next_token()
    }
}

impl<S: TokenSource + ?Sized> TokenSource for Box<S> {
    type Error = S::Error;

    fn next_token(&mut self) -> Result<Token, Self::Error> {
        (**self).next_token()
    }
}

/// Replays a prepared token list as a raw source.
///
/// If the list does not end with an `EndOfInput` token, one is appended after the last
/// token. Tokens after the first `EndOfInput` are never returned.
#[derive(Debug, Clone)]
pub struct ReplaySource {
    tokens: Vec<Token>,
    position: usize,
}

impl ReplaySource {
    pub fn new(mut tokens: Vec<Token>) -> Self {
        match tokens.iter().position(|t| t.is(TokenKind::EndOfInput)) {
            Some(end) => tokens.truncate(end + 1),
            None => {
                let end = match tokens.last() {
                    Some(last) => Token::end_of_input(
                        last.line,
                        last.column + last.text.chars().count(),
                        last.span.end,
                    ),
                    None => Token::end_of_input(1, 0, 0),
                };
                tokens.push(end);
            }
        }
        ReplaySource {
            tokens,
            position: 0,
        }
    }
}

impl TokenSource for ReplaySource {
    type Error = Error;

    fn next_token(&mut self) -> Result<Token, Error> {
        let last = self.tokens.len() - 1;
        let token = self.tokens[self.position.min(last)].clone();
        if self.position < last {
            self.position += 1;
        }
        Ok(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replay_appends_end_of_input() {
        let mut source = ReplaySource::new(vec![Token::new(TokenKind::Name, "abc", 2, 4, 10..13)]);

        assert_eq!(source.next_token().unwrap().text, "abc");
        let end = source.next_token().unwrap();
        assert_eq!(end.kind, TokenKind::EndOfInput);
        assert_eq!(end.line, 2);
        assert_eq!(end.column, 7);
        assert_eq!(end.span, 13..13);
    }

    #[test]
    fn test_replay_end_is_idempotent() {
        let mut source = ReplaySource::new(vec![]);
        for _ in 0..3 {
            assert_eq!(source.next_token().unwrap(), Token::end_of_input(1, 0, 0));
        }
    }

    #[test]
    fn test_replay_ignores_tokens_after_end() {
        let mut source = ReplaySource::new(vec![
            Token::end_of_input(1, 0, 0),
            Token::new(TokenKind::Name, "late", 2, 0, 1..5),
        ]);
        assert!(source.next_token().unwrap().is(TokenKind::EndOfInput));
        assert!(source.next_token().unwrap().is(TokenKind::EndOfInput));
    }

    #[test]
    fn test_mut_reference_is_a_source() {
        fn drain<S: TokenSource>(mut source: S) -> usize {
            let mut count = 0;
            while !source.next_token().ok().unwrap().is(TokenKind::EndOfInput) {
                count += 1;
            }
            count
        }

        let mut source = ReplaySource::new(vec![Token::new(TokenKind::Name, "a", 1, 0, 0..1)]);
        assert_eq!(drain(&mut source), 1);
    }
}
