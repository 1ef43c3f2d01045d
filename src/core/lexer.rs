use crate::core::tokens::Token;
use crate::errors::ParseError;

/// Lexes a pattern string into tokens, resolving backslash escapes.
///
/// A backslash takes the next character literally, operators included, so
/// `\*` lexes as `Token::Char('*')`. The stream always ends with
/// [`Token::Eos`].
///
/// # Errors
///
/// Returns [`ParseError::InvalidEscape`] for a backslash at end of input.
pub fn lex(input: &str) -> Result<Vec<Token>, ParseError> {
    let mut tokens = Vec::new();
    let mut chars = input.chars();

    while let Some(ch) = chars.next() {
        let token = match ch {
            '\\' => Token::Char(chars.next().ok_or(ParseError::InvalidEscape)?),
            '|' => Token::Or,
            '*' => Token::Star,
            '+' => Token::Plus,
            '?' => Token::QMark,
            '(' => Token::LParen,
            ')' => Token::RParen,
            _ => Token::Char(ch),
        };
        tokens.push(token);
    }

    tokens.push(Token::Eos);
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lex_appends_eos() {
        assert_eq!(
            lex("ab").unwrap(),
            vec![Token::Char('a'), Token::Char('b'), Token::Eos]
        );
    }

    #[test]
    fn test_lex_escape_takes_operator_literally() {
        assert_eq!(
            lex("\\*").unwrap(),
            vec![Token::Char('*'), Token::Eos]
        );
    }

    #[test]
    fn test_lex_dangling_escape() {
        assert_eq!(lex("ab\\"), Err(ParseError::InvalidEscape));
    }
}
