//! Lexing
//!
//! Tokenization runs in two stages:
//! 1. The [scanner] turns characters into flat tokens with line and column positions. Line
//!    breaks are tokens; leading whitespace is not, the column of the first token on a line
//!    is all that survives of it.
//! 2. The [indentation] tracker wraps the scanner and inserts BlockOpen / BlockDedent tokens
//!    wherever the first column of a line moves.
//!
//! Indentation Handling
//!
//!     In order to make indented blocks tractable by grammars that know nothing about
//!     whitespace, indentation ends up as semantic indent and dedent tokens, which map nicely
//!     to brace tokens for more standard syntaxes.
//!
//!     Both stages speak the same pull contract ([source::TokenSource]), so the tracker can
//!     be dropped in front of any consumer that already reads from a scanner.

pub mod indentation;
pub mod scanner;
pub mod source;

pub use indentation::IndentationTracker;
pub use scanner::{tokenize, Scanner};
pub use source::{ReplaySource, TokenSource};

use crate::offside::config::TrackerConfig;
use crate::offside::error::Error;
use crate::offside::stream::BufferedTokenStream;
use crate::offside::token::Token;

/// Main lexer function that returns fully processed tokens (scan + indentation tracking)
pub fn lex(source: &str) -> Result<Vec<Token>, Error> {
    lex_with_config(source, &TrackerConfig::default())
}

/// Like [lex], with an explicit tracker configuration
pub fn lex_with_config(source: &str, config: &TrackerConfig) -> Result<Vec<Token>, Error> {
    let tracker = IndentationTracker::with_config(Scanner::new(source), *config);
    let mut stream = BufferedTokenStream::new(tracker);
    stream.fill()?;
    Ok(stream.into_tokens())
}
