//! Token dumps
//!
//! The simple format prints one token per line, lexeme first (quoted, so line breaks and
//! synthetic placeholders stay readable), followed by its numeric kind code and position:
//!
//! ```text
//! "def"            type=  1  line=  1  col=  0
//! "<<INDENT>>"     type=  8  line=  2  col=  0
//! ```

use crate::offside::error::Error;
use crate::offside::token::Token;

/// Render one token as a dump line (no trailing newline)
pub fn dump_line(token: &Token) -> String {
    format!(
        "{:<15}  type={:>3}  line={:>3}  col={:>3}",
        format!("{:?}", token.text),
        token.kind.code(),
        token.line,
        token.column
    )
}

pub fn to_dump_str(tokens: &[Token]) -> String {
    let mut result = String::new();
    for token in tokens {
        result.push_str(&dump_line(token));
        result.push('\n');
    }
    result
}

pub fn to_json_str(tokens: &[Token]) -> Result<String, Error> {
    Ok(serde_json::to_string_pretty(tokens)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::offside::token::TokenKind;

    #[test]
    fn test_dump_line_layout() {
        let token = Token::new(TokenKind::Keyword, "def", 12, 4, 0..3);
        assert_eq!(
            dump_line(&token),
            "\"def\"            type=  1  line= 12  col=  4"
        );
    }

    #[test]
    fn test_dump_escapes_line_breaks() {
        let token = Token::new(TokenKind::LineBreak, "\n", 1, 5, 5..6);
        assert!(dump_line(&token).starts_with("\"\\n\" "));
    }

    #[test]
    fn test_end_of_input_code() {
        let token = Token::end_of_input(3, 0, 10);
        assert!(dump_line(&token).contains("type= -1"));
    }

    #[test]
    fn test_json() {
        let tokens = vec![Token::new(TokenKind::Name, "x", 1, 0, 0..1)];
        let json: serde_json::Value = serde_json::from_str(&to_json_str(&tokens).unwrap()).unwrap();
        assert_eq!(json[0]["kind"], "Name");
        assert_eq!(json[0]["text"], "x");
        assert_eq!(json[0]["span"]["start"], 0);
        assert_eq!(json[0]["span"]["end"], 1);
    }
}
