//! Token and source factories

use crate::offside::token::{Token, TokenKind};

pub fn mk_token(
    kind: TokenKind,
    text: &str,
    line: usize,
    column: usize,
    offset: usize,
) -> Token {
    Token::new(kind, text, line, column, offset..offset + text.len())
}

pub fn mk_name(text: &str, line: usize, column: usize, offset: usize) -> Token {
    mk_token(TokenKind::Name, text, line, column, offset)
}

pub fn mk_line_break(line: usize, column: usize, offset: usize) -> Token {
    mk_token(TokenKind::LineBreak, "\n", line, column, offset)
}

/// One line per column: a name token `t<line>` at that column followed by a line break,
/// then an end-of-input token on the line after the last one.
///
/// Spans are those of the source `source_at(columns)` would produce.
pub fn lines_at(columns: &[usize]) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut offset = 0;
    for (i, &column) in columns.iter().enumerate() {
        let line = i + 1;
        let text = format!("t{line}");
        tokens.push(mk_name(&text, line, column, offset + column));
        let break_column = column + text.len();
        tokens.push(mk_line_break(line, break_column, offset + break_column));
        offset += break_column + 1;
    }
    tokens.push(Token::end_of_input(columns.len() + 1, 0, offset));
    tokens
}

/// Source text with one `t<line>` statement per column, indented with spaces
pub fn source_at(columns: &[usize]) -> String {
    columns
        .iter()
        .enumerate()
        .map(|(i, &column)| format!("{}t{}\n", " ".repeat(column), i + 1))
        .collect()
}

/// Compact rendering of a stream: names and other lexemes as their text, structural tokens
/// by kind name
pub fn render(tokens: &[Token]) -> String {
    tokens
        .iter()
        .map(|t| match t.kind {
            TokenKind::LineBreak
            | TokenKind::BlockOpen
            | TokenKind::BlockDedent
            | TokenKind::EndOfInput => t.kind.name().to_string(),
            _ => t.text.clone(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}
