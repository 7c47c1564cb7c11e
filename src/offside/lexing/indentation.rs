//! Indentation tracking
//!
//! This module turns line-leading columns into explicit BlockOpen and BlockDedent tokens.
//!
//! # Algorithm
//!
//! The tracker keeps a stack of open indentation columns (bottom is always 0), a FIFO of
//! tokens waiting to be handed out, and a flag saying the previous token was a line break.
//! On each call it:
//!
//! 1. Hands out the front of the pending queue, if any.
//! 2. Otherwise pulls one raw token:
//!    - EndOfInput: closes every open level with a BlockDedent, then queues the end token
//!    - LineBreak: arms the flag and passes the token through
//!    - any other token with the flag down: passes through
//!    - the first token of a line: compares its column with the top of the stack
//!      - greater: pushes the column, returns BlockOpen, queues the token
//!      - less: pops every level above the column, one BlockDedent per pop, queues the token
//!      - equal: passes through
//!
//! # Example
//!
//! Columns `0, 4, 8, 0` on four lines produce:
//! `a NEWLINE INDENT b NEWLINE INDENT c NEWLINE DEDENT DEDENT d NEWLINE EOF`
//!
//! # Ragged dedents
//!
//! With open levels `[0, 4, 8]`, a line at column 6 matches no level. Under
//! [DedentPolicy::Lenient] the tracker closes level 8 only and accepts the line at 6 inside
//! level 4; a following line at 6 then opens a new block. Under [DedentPolicy::Strict] it
//! reports [IndentationError::InconsistentDedent] and leaves the stack untouched.
//!
//! A strict error poisons the tracker: the offending line is never handed out, and every
//! later call returns the same error again.

use crate::offside::config::{DedentPolicy, ExhaustionPolicy, TrackerConfig};
use crate::offside::error::IndentationError;
use crate::offside::lexing::source::TokenSource;
use crate::offside::token::{Token, TokenKind};
use std::cmp::Ordering;
use std::collections::VecDeque;

/// Wraps a raw token source and inserts block tokens
pub struct IndentationTracker<S> {
    source: S,
    config: TrackerConfig,
    levels: Vec<usize>,
    pending: VecDeque<Token>,
    at_line_start: bool,
    end: Option<Token>,
    failed: Option<IndentationError>,
}

impl<S: TokenSource> IndentationTracker<S>
where
    S::Error: From<IndentationError>,
{
    pub fn new(source: S) -> Self {
        Self::with_config(source, TrackerConfig::default())
    }

    pub fn with_config(source: S, config: TrackerConfig) -> Self {
        IndentationTracker {
            source,
            config,
            levels: vec![0],
            pending: VecDeque::new(),
            // The start of input is the start of a line
            at_line_start: true,
            end: None,
            failed: None,
        }
    }

    /// Open indentation columns, bottom first
    pub fn levels(&self) -> &[usize] {
        &self.levels
    }

    /// Whether end of input has already been returned
    pub fn is_exhausted(&self) -> bool {
        self.end.is_some()
    }

    pub fn into_inner(self) -> S {
        self.source
    }

    fn top(&self) -> usize {
        self.levels[self.levels.len() - 1]
    }

    fn pop_pending(&mut self) -> Option<Token> {
        let token = self.pending.pop_front()?;
        if token.is(TokenKind::EndOfInput) {
            self.end = Some(token.clone());
        }
        Some(token)
    }

    fn synthesize(&mut self, kind: TokenKind, trigger: &Token) {
        tracing::debug!(
            kind = %kind,
            line = trigger.line,
            column = trigger.column,
            "synthesized block token"
        );
        self.pending.push_back(Token::synthetic(kind, trigger));
    }

    /// Close every open level and queue the end token
    fn flush(&mut self, end: Token) {
        while self.levels.len() > 1 {
            self.levels.pop();
            self.synthesize(TokenKind::BlockDedent, &end);
        }
        self.pending.push_back(end);
    }

    /// Compare the first token of a line with the open levels and queue the result
    fn measure(&mut self, token: Token) -> Result<(), S::Error> {
        let column = token.column;
        match column.cmp(&self.top()) {
            Ordering::Equal => {}
            Ordering::Greater => {
                self.levels.push(column);
                self.synthesize(TokenKind::BlockOpen, &token);
            }
            Ordering::Less => {
                if self.config.dedent == DedentPolicy::Strict && !self.levels.contains(&column) {
                    let nearest = self
                        .levels
                        .iter()
                        .copied()
                        .filter(|&level| level < column)
                        .max()
                        .unwrap_or(0);
                    let err = IndentationError::InconsistentDedent {
                        line: token.line,
                        column,
                        nearest,
                    };
                    self.failed = Some(err.clone());
                    return Err(err.into());
                }
                while column < self.top() {
                    self.levels.pop();
                    self.synthesize(TokenKind::BlockDedent, &token);
                }
            }
        }
        self.pending.push_back(token);
        Ok(())
    }
}

impl<S: TokenSource> TokenSource for IndentationTracker<S>
where
    S::Error: From<IndentationError>,
{
    type Error = S::Error;

    fn next_token(&mut self) -> Result<Token, S::Error> {
        loop {
            if let Some(err) = &self.failed {
                return Err(err.clone().into());
            }

            if let Some(token) = self.pop_pending() {
                return Ok(token);
            }

            if let Some(end) = &self.end {
                return match self.config.after_end {
                    ExhaustionPolicy::Repeat => Ok(end.clone()),
                    ExhaustionPolicy::Fail => Err(IndentationError::UseAfterEnd.into()),
                };
            }

            let token = self.source.next_token()?;
            match token.kind {
                TokenKind::EndOfInput => self.flush(token),
                TokenKind::LineBreak => {
                    self.at_line_start = true;
                    return Ok(token);
                }
                _ if !self.at_line_start => return Ok(token),
                _ => {
                    self.at_line_start = false;
                    self.measure(token)?;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::offside::error::Error;
    use crate::offside::lexing::source::ReplaySource;
    use crate::offside::testing::factories::{lines_at, mk_name};

    fn drain(tracker: &mut IndentationTracker<ReplaySource>) -> Vec<Token> {
        let mut out = Vec::new();
        loop {
            let token = tracker.next_token().unwrap();
            let done = token.is(TokenKind::EndOfInput);
            out.push(token);
            if done {
                return out;
            }
        }
    }

    fn kinds(tokens: &[Token]) -> Vec<TokenKind> {
        tokens.iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_flat_input_passes_through() {
        let raw = lines_at(&[0, 0]);
        let mut tracker = IndentationTracker::new(ReplaySource::new(raw.clone()));
        let out = drain(&mut tracker);
        assert_eq!(out, raw);
    }

    #[test]
    fn test_block_open_then_real_token() {
        let mut tracker = IndentationTracker::new(ReplaySource::new(lines_at(&[0, 4])));
        let out = drain(&mut tracker);

        assert_eq!(
            kinds(&out),
            vec![
                TokenKind::Name,
                TokenKind::LineBreak,
                TokenKind::BlockOpen,
                TokenKind::Name,
                TokenKind::LineBreak,
                TokenKind::BlockDedent,
                TokenKind::EndOfInput,
            ]
        );

        let open = &out[2];
        let real = &out[3];
        assert_eq!(open.column, 0);
        assert_eq!(open.line, real.line);
        assert_eq!(open.span, real.span);
        assert_eq!(real.column, 4);
    }

    #[test]
    fn test_mid_line_tokens_are_inert() {
        let raw = vec![
            mk_name("a", 1, 0, 0),
            mk_name("b", 1, 8, 8),
            mk_name("c", 1, 2, 10),
        ];
        let mut tracker = IndentationTracker::new(ReplaySource::new(raw.clone()));
        let out = drain(&mut tracker);
        assert_eq!(&out[..3], &raw[..]);
    }

    #[test]
    fn test_blank_lines_do_not_measure() {
        // a NEWLINE NEWLINE NEWLINE b, with b at column 0
        let raw = vec![
            mk_name("a", 1, 0, 0),
            Token::new(TokenKind::LineBreak, "\n", 1, 1, 1..2),
            Token::new(TokenKind::LineBreak, "\n", 2, 0, 2..3),
            Token::new(TokenKind::LineBreak, "\n", 3, 0, 3..4),
            mk_name("b", 4, 0, 4),
        ];
        let mut tracker = IndentationTracker::new(ReplaySource::new(raw));
        let out = drain(&mut tracker);
        assert!(!out.iter().any(|t| t.kind.is_synthetic()));
    }

    #[test]
    fn test_end_flush_uses_end_position() {
        let mut tracker = IndentationTracker::new(ReplaySource::new(lines_at(&[0, 4, 8])));
        let out = drain(&mut tracker);
        let end = out.last().unwrap().clone();

        let dedents: Vec<&Token> = out
            .iter()
            .filter(|t| t.is(TokenKind::BlockDedent))
            .collect();
        assert_eq!(dedents.len(), 2);
        for dedent in dedents {
            assert_eq!(dedent.line, end.line);
            assert_eq!(dedent.span, end.span);
            assert_eq!(dedent.column, 0);
        }
        assert_eq!(tracker.levels(), &[0]);
    }

    #[test]
    fn test_repeat_after_end() {
        let mut tracker = IndentationTracker::new(ReplaySource::new(lines_at(&[4])));
        let out = drain(&mut tracker);
        let end = out.last().unwrap().clone();

        assert!(tracker.is_exhausted());
        assert_eq!(tracker.next_token().unwrap(), end);
        assert_eq!(tracker.next_token().unwrap(), end);
    }

    #[test]
    fn test_fail_after_end() {
        let config = TrackerConfig {
            after_end: ExhaustionPolicy::Fail,
            ..TrackerConfig::default()
        };
        let mut tracker =
            IndentationTracker::with_config(ReplaySource::new(lines_at(&[0])), config);
        drain(&mut tracker);

        let err = tracker.next_token().unwrap_err();
        assert!(matches!(
            err,
            Error::Indentation(IndentationError::UseAfterEnd)
        ));
    }

    #[test]
    fn test_strict_rejects_ragged_dedent_without_mutating() {
        let mut tracker = IndentationTracker::with_config(
            ReplaySource::new(lines_at(&[0, 4, 8, 6])),
            TrackerConfig {
                dedent: DedentPolicy::Strict,
                ..TrackerConfig::default()
            },
        );

        let mut result = Ok(mk_name("unused", 1, 0, 0));
        for _ in 0..10 {
            result = tracker.next_token();
            if result.is_err() {
                break;
            }
        }

        match result {
            Err(Error::Indentation(IndentationError::InconsistentDedent {
                line,
                column,
                nearest,
            })) => {
                assert_eq!(line, 4);
                assert_eq!(column, 6);
                assert_eq!(nearest, 4);
            }
            other => panic!("expected inconsistent dedent, got {other:?}"),
        }
        assert_eq!(tracker.levels(), &[0, 4, 8]);
    }

    #[test]
    fn test_strict_accepts_exact_dedent() {
        let mut tracker = IndentationTracker::with_config(
            ReplaySource::new(lines_at(&[0, 4, 8, 4, 0])),
            TrackerConfig::strict(),
        );
        let out = drain(&mut tracker);
        let dedents = out.iter().filter(|t| t.is(TokenKind::BlockDedent)).count();
        assert_eq!(dedents, 2);
    }

    #[test]
    fn test_into_inner_returns_source_past_pulled_tokens() {
        let mut tracker = IndentationTracker::new(ReplaySource::new(lines_at(&[0, 4])));
        // t1, NEWLINE, then BlockOpen pulls t2 from the source
        for _ in 0..3 {
            tracker.next_token().unwrap();
        }

        let mut source = tracker.into_inner();
        let next = source.next_token().unwrap();
        assert!(next.is(TokenKind::LineBreak));
        assert_eq!(next.line, 2);
    }

    #[test]
    fn test_upstream_error_is_returned_unchanged() {
        struct Failing;

        impl TokenSource for Failing {
            type Error = Error;

            fn next_token(&mut self) -> Result<Token, Error> {
                Err(Error::UnexpectedCharacter {
                    line: 7,
                    column: 3,
                    text: "?".to_string(),
                })
            }
        }

        let mut tracker = IndentationTracker::new(Failing);
        match tracker.next_token() {
            Err(Error::UnexpectedCharacter { line, column, text }) => {
                assert_eq!((line, column, text.as_str()), (7, 3, "?"));
            }
            other => panic!("expected upstream error, got {other:?}"),
        }
    }
}
