//! Raw scanner for a small Python-like language
//!
//! The character level work is done entirely by logos. This module only adds line/column
//! bookkeeping and collapses the lexer vocabulary into the closed [TokenKind] set, so the
//! indentation tracker never sees the lexer's own token enum.

use crate::offside::error::Error;
use crate::offside::lexing::source::TokenSource;
use crate::offside::token::{Token, TokenKind};
use logos::Logos;

/// Lexer vocabulary
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\f]+")]
#[logos(skip r"#[^\r\n]*")]
pub enum RawToken {
    #[token("def")]
    Def,
    #[token("if")]
    If,
    #[token("elif")]
    Elif,
    #[token("else")]
    Else,
    #[token("while")]
    While,
    #[token("for")]
    For,
    #[token("in")]
    In,
    #[token("return")]
    Return,
    #[token("pass")]
    Pass,
    #[token("break")]
    Break,
    #[token("continue")]
    Continue,
    #[token("and")]
    And,
    #[token("or")]
    Or,
    #[token("not")]
    Not,
    #[token("True")]
    TrueKw,
    #[token("False")]
    FalseKw,
    #[token("None")]
    NoneKw,

    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Name,
    #[regex(r"[0-9]+(\.[0-9]+)?")]
    Number,
    #[regex(r#""([^"\\\r\n]|\\.)*""#)]
    #[regex(r"'([^'\\\r\n]|\\.)*'")]
    Str,

    #[token("==")]
    EqEq,
    #[token("!=")]
    NotEq,
    #[token("<=")]
    LessEq,
    #[token(">=")]
    GreaterEq,
    #[token("=")]
    Assign,
    #[token("<")]
    Less,
    #[token(">")]
    Greater,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,

    #[token("(")]
    OpenParen,
    #[token(")")]
    CloseParen,
    #[token("[")]
    OpenBracket,
    #[token("]")]
    CloseBracket,
    #[token(",")]
    Comma,
    #[token(":")]
    Colon,
    #[token(".")]
    Period,

    #[regex(r"\r?\n")]
    Newline,
}

impl RawToken {
    /// Map the lexer vocabulary onto the tracker's closed kind set
    pub fn kind(self) -> TokenKind {
        use RawToken::*;
        match self {
            Def | If | Elif | Else | While | For | In | Return | Pass | Break | Continue | And
            | Or | Not | TrueKw | FalseKw | NoneKw => TokenKind::Keyword,
            Name => TokenKind::Name,
            Number => TokenKind::Number,
            Str => TokenKind::Str,
            EqEq | NotEq | LessEq | GreaterEq | Assign | Less | Greater | Plus | Minus | Star
            | Slash | Percent => TokenKind::Operator,
            OpenParen | CloseParen | OpenBracket | CloseBracket | Comma | Colon | Period => {
                TokenKind::Delimiter
            }
            Newline => TokenKind::LineBreak,
        }
    }
}

/// Pull-based scanner over a source string.
///
/// Columns count characters from the start of the line; a tab is one column.
pub struct Scanner<'src> {
    lexer: logos::Lexer<'src, RawToken>,
    line: usize,
    line_start: usize,
}

impl<'src> Scanner<'src> {
    pub fn new(source: &'src str) -> Self {
        Scanner {
            lexer: RawToken::lexer(source),
            line: 1,
            line_start: 0,
        }
    }

    fn column_of(&self, offset: usize) -> usize {
        self.lexer.source()[self.line_start..offset].chars().count()
    }
}

impl TokenSource for Scanner<'_> {
    type Error = Error;

    fn next_token(&mut self) -> Result<Token, Error> {
        match self.lexer.next() {
            None => {
                let end = self.lexer.source().len();
                Ok(Token::end_of_input(self.line, self.column_of(end), end))
            }
            Some(Err(())) => {
                let span = self.lexer.span();
                Err(Error::UnexpectedCharacter {
                    line: self.line,
                    column: self.column_of(span.start),
                    text: self.lexer.slice().to_string(),
                })
            }
            Some(Ok(raw)) => {
                let span = self.lexer.span();
                let token = Token::new(
                    raw.kind(),
                    self.lexer.slice(),
                    self.line,
                    self.column_of(span.start),
                    span.clone(),
                );
                if raw == RawToken::Newline {
                    self.line += 1;
                    self.line_start = span.end;
                }
                tracing::trace!(
                    kind = %token.kind,
                    line = token.line,
                    column = token.column,
                    "scanned token"
                );
                Ok(token)
            }
        }
    }
}

/// Scan a whole source, including the final end-of-input token
pub fn tokenize(source: &str) -> Result<Vec<Token>, Error> {
    let mut scanner = Scanner::new(source);
    let mut tokens = Vec::new();
    loop {
        let token = scanner.next_token()?;
        let done = token.is(TokenKind::EndOfInput);
        tokens.push(token);
        if done {
            return Ok(tokens);
        }
    }
}
