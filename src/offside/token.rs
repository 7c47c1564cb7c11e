//! Token types shared by the scanner, the indentation tracker, and downstream consumers.
//!
//! Token Layers
//!
//!     Ordinary Tokens:
//!         Produced by the scanner from source text (names, numbers, operators, ...). The
//!         scanner's own lexer vocabulary is finer grained; it is collapsed into the closed
//!         [TokenKind] set at the scanner boundary.
//!
//!     Distinguished Tokens:
//!         LineBreak and EndOfInput are ordinary in the sense that they come from the scanner,
//!         but the indentation tracker gives them meaning: a LineBreak arms the next indentation
//!         measurement and EndOfInput flushes every open block.
//!
//!     Synthetic Tokens:
//!         BlockOpen and BlockDedent have no source text. They copy the line and span of the
//!         token that caused them and force the column to 0, since they do not sit at a real
//!         source column.

use serde::Serialize;
use std::fmt;
use std::ops::Range;

/// Placeholder text carried by synthesized block-open tokens
pub const BLOCK_OPEN_TEXT: &str = "<<INDENT>>";
/// Placeholder text carried by synthesized block-dedent tokens
pub const BLOCK_DEDENT_TEXT: &str = "<<DEDENT>>";
/// Text carried by the end-of-input token
pub const END_OF_INPUT_TEXT: &str = "<EOF>";

/// The closed set of token kinds seen by the indentation tracker and the grammar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TokenKind {
    Keyword,
    Name,
    Number,
    Str,
    Operator,
    Delimiter,
    LineBreak,
    BlockOpen,
    BlockDedent,
    EndOfInput,
}

impl TokenKind {
    /// Stable numeric code used in token dumps.
    ///
    /// Grammar engines usually identify token types by integer; these codes are the
    /// boundary encoding and carry no meaning inside the crate. End of input is `-1`.
    pub fn code(self) -> i32 {
        match self {
            TokenKind::Keyword => 1,
            TokenKind::Name => 2,
            TokenKind::Number => 3,
            TokenKind::Str => 4,
            TokenKind::Operator => 5,
            TokenKind::Delimiter => 6,
            TokenKind::LineBreak => 7,
            TokenKind::BlockOpen => 8,
            TokenKind::BlockDedent => 9,
            TokenKind::EndOfInput => -1,
        }
    }

    /// Upper-case name used in diagnostics
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::Keyword => "KEYWORD",
            TokenKind::Name => "NAME",
            TokenKind::Number => "NUMBER",
            TokenKind::Str => "STRING",
            TokenKind::Operator => "OPERATOR",
            TokenKind::Delimiter => "DELIMITER",
            TokenKind::LineBreak => "NEWLINE",
            TokenKind::BlockOpen => "INDENT",
            TokenKind::BlockDedent => "DEDENT",
            TokenKind::EndOfInput => "EOF",
        }
    }

    /// Tokens produced by the tracker rather than the scanner
    pub fn is_synthetic(self) -> bool {
        matches!(self, TokenKind::BlockOpen | TokenKind::BlockDedent)
    }

    /// Tokens that carry program content: everything except line breaks, block markers
    /// and end of input
    pub fn is_ordinary(self) -> bool {
        !matches!(
            self,
            TokenKind::LineBreak
                | TokenKind::BlockOpen
                | TokenKind::BlockDedent
                | TokenKind::EndOfInput
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single token with its source position
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    /// 1-based line
    pub line: usize,
    /// 0-based column, in characters
    pub column: usize,
    /// Byte offsets into the source
    pub span: Range<usize>,
}

impl Token {
    pub fn new(
        kind: TokenKind,
        text: impl Into<String>,
        line: usize,
        column: usize,
        span: Range<usize>,
    ) -> Self {
        Token {
            kind,
            text: text.into(),
            line,
            column,
            span,
        }
    }

    /// End-of-input token at the given position
    pub fn end_of_input(line: usize, column: usize, offset: usize) -> Self {
        Token::new(
            TokenKind::EndOfInput,
            END_OF_INPUT_TEXT,
            line,
            column,
            offset..offset,
        )
    }

    /// Synthesize a block token positioned on `trigger`.
    ///
    /// The column is forced to 0; line and span are copied from the trigger.
    pub fn synthetic(kind: TokenKind, trigger: &Token) -> Self {
        debug_assert!(kind.is_synthetic());
        let text = match kind {
            TokenKind::BlockOpen => BLOCK_OPEN_TEXT,
            _ => BLOCK_DEDENT_TEXT,
        };
        Token::new(kind, text, trigger.line, 0, trigger.span.clone())
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}({:?})@{}:{}",
            self.kind, self.text, self.line, self.column
        )
    }
}
