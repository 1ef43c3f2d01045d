use refsm::{Ast, ParseError};

#[test]
fn test_escaped_star_is_a_literal() {
    assert_eq!(
        Ast::build("a\\*b").unwrap(),
        Ast::Concat(vec![Ast::Char('a'), Ast::Char('*'), Ast::Char('b')]),
    );
}

#[test]
fn test_lone_open_paren_message() {
    let err = Ast::build("(").unwrap_err();
    assert_eq!(err, ParseError::UnmatchedParens);
    assert_eq!(err.to_string(), "unmatched parentheses");
}

#[test]
fn test_trailing_backslash_message() {
    let err = Ast::build("ab\\").unwrap_err();
    assert_eq!(err, ParseError::InvalidEscape);
    assert_eq!(err.to_string(), "invalid escape sequence");
}

#[test]
fn test_bare_operator_message() {
    let err = Ast::build("+a").unwrap_err();
    assert_eq!(err, ParseError::UnexpectedChar('+'));
    assert_eq!(err.to_string(), "unexpected character '+'");
}

#[test]
fn test_display_round_trips_pattern() {
    for pattern in ["a(b|c)*", "a\\*b", "(ab)?c+", "x(y|z)?"] {
        let ast = Ast::build(pattern).unwrap();
        assert_eq!(ast.to_string(), pattern);
        assert_eq!(Ast::build(&ast.to_string()).unwrap(), ast);
    }
}
