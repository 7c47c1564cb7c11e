//! Block structure grammar
//!
//! A small chumsky grammar that consumes the tracked token stream the way a real grammar
//! engine would: BlockOpen / BlockDedent play the role of braces and the grammar has no
//! idea that whitespace was ever involved.
//!
//! ```text
//! program   := LineBreak* node* EndOfInput
//! node      := statement | block
//! statement := ordinary+ LineBreak* block?
//! block     := BlockOpen node* BlockDedent
//! ```
//!
//! A block right after a statement becomes that statement's body. A block with no header can
//! only appear at the very start of the input, when the first line is already indented.

use chumsky::prelude::*;
use serde::Serialize;

use crate::offside::config::TrackerConfig;
use crate::offside::error::Error;
use crate::offside::lexing::lex_with_config;
use crate::offside::token::{Token, TokenKind};

type ParserError = Simple<Token>;

/// A node of the block tree
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Node {
    /// One logical line and the indented block that follows it, if any
    Statement { tokens: Vec<Token>, body: Vec<Node> },
    /// A block with no header line
    Block(Vec<Node>),
}

impl Node {
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Statement { body, .. } => body,
            Node::Block(children) => children,
        }
    }

    /// Source line of the node's first token, if it has one
    pub fn line(&self) -> Option<usize> {
        match self {
            Node::Statement { tokens, .. } => tokens.first().map(|t| t.line),
            Node::Block(children) => children.first().and_then(Node::line),
        }
    }

    /// Lexemes of the header line joined by single spaces
    pub fn label(&self) -> String {
        match self {
            Node::Statement { tokens, .. } => tokens
                .iter()
                .map(|t| t.text.as_str())
                .collect::<Vec<_>>()
                .join(" "),
            Node::Block(children) => format!("{} nodes", children.len()),
        }
    }
}

fn kind(expected: TokenKind) -> impl Parser<Token, Token, Error = ParserError> + Clone {
    filter(move |t: &Token| t.kind == expected)
}

fn program() -> impl Parser<Token, Vec<Node>, Error = ParserError> {
    let line_breaks = kind(TokenKind::LineBreak).repeated();

    let node = recursive(|node| {
        let block = kind(TokenKind::BlockOpen)
            .ignore_then(node.repeated())
            .then_ignore(kind(TokenKind::BlockDedent));

        let statement = filter(|t: &Token| t.kind.is_ordinary())
            .repeated()
            .at_least(1)
            .then_ignore(kind(TokenKind::LineBreak).repeated())
            .then(block.clone().or_not())
            .map(|(tokens, body)| Node::Statement {
                tokens,
                body: body.unwrap_or_default(),
            });

        statement.or(block.map(Node::Block))
    });

    line_breaks
        .ignore_then(node.repeated())
        .then_ignore(kind(TokenKind::EndOfInput))
        .then_ignore(end())
}

fn describe(err: &ParserError, tokens: &[Token]) -> Error {
    let at = tokens
        .get(err.span().start)
        .or_else(|| tokens.last());
    let (line, column) = at.map(|t| (t.line, t.column)).unwrap_or((1, 0));
    let message = match err.found() {
        Some(found) => format!("unexpected {} {:?}", found.kind, found.text),
        None => "unexpected end of token stream".to_string(),
    };
    Error::Structure {
        line,
        column,
        message,
    }
}

/// Parse a tracked token stream into its block tree
pub fn parse_structure(tokens: Vec<Token>) -> Result<Vec<Node>, Error> {
    program().parse(tokens.clone()).map_err(|errs| {
        let first = errs.first().map(|e| describe(e, &tokens));
        first.unwrap_or(Error::Structure {
            line: 1,
            column: 0,
            message: "unparseable token stream".to_string(),
        })
    })
}

/// Scan, track, and parse a source string
pub fn parse_source(source: &str, config: &TrackerConfig) -> Result<Vec<Node>, Error> {
    parse_structure(lex_with_config(source, config)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::offside::lexing::{lex, tokenize};

    fn labels(nodes: &[Node]) -> Vec<String> {
        nodes.iter().map(Node::label).collect()
    }

    #[test]
    fn test_flat_program() {
        let nodes = parse_source("a = 1\nb = 2\n", &TrackerConfig::default()).unwrap();
        assert_eq!(labels(&nodes), vec!["a = 1", "b = 2"]);
        assert!(nodes.iter().all(|n| n.children().is_empty()));
    }

    #[test]
    fn test_nested_bodies() {
        let source = "def f(x):\n    if x:\n        return 1\n    return 2\nf(3)\n";
        let nodes = parse_source(source, &TrackerConfig::default()).unwrap();

        assert_eq!(labels(&nodes), vec!["def f ( x ) :", "f ( 3 )"]);
        let body = nodes[0].children();
        assert_eq!(labels(body), vec!["if x :", "return 2"]);
        assert_eq!(labels(body[0].children()), vec!["return 1"]);
        assert_eq!(body[0].line(), Some(2));
    }

    #[test]
    fn test_blank_and_comment_lines() {
        let source = "\n\nif a:\n\n    # comment\n    b\n\nc\n";
        let nodes = parse_source(source, &TrackerConfig::default()).unwrap();
        assert_eq!(labels(&nodes), vec!["if a :", "c"]);
        assert_eq!(labels(nodes[0].children()), vec!["b"]);
    }

    #[test]
    fn test_leading_indent_is_headless_block() {
        let nodes = parse_source("    a\nb\n", &TrackerConfig::default()).unwrap();
        assert!(matches!(&nodes[0], Node::Block(children) if children.len() == 1));
        assert_eq!(nodes[0].line(), Some(1));
        assert_eq!(labels(&nodes[1..]), vec!["b"]);
    }

    #[test]
    fn test_unterminated_block_still_parses() {
        let nodes = parse_source("while x:\n    y", &TrackerConfig::default()).unwrap();
        assert_eq!(labels(nodes[0].children()), vec!["y"]);
    }

    #[test]
    fn test_raw_tokens_have_no_structure() {
        // Without the tracker, the indented line is just another statement
        let nodes = parse_structure(tokenize("if a:\n    b\n").unwrap()).unwrap();
        assert_eq!(labels(&nodes), vec!["if a :", "b"]);
    }

    #[test]
    fn test_unbalanced_stream_is_an_error() {
        let mut tokens = lex("if a:\n    b\n").unwrap();
        tokens.retain(|t| t.kind != TokenKind::BlockDedent);

        let err = parse_structure(tokens).unwrap_err();
        assert!(matches!(err, Error::Structure { .. }), "got {err:?}");
    }
}
