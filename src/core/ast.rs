use std::fmt;

use crate::core::lexer;
use crate::core::parser;
use crate::errors::ParseError;

/// An abstract syntax tree for a regular expression.
///
/// Nodes are created by the parser, consumed by the Thompson compiler, and
/// never mutated in between.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Ast {
    /// A literal character.
    Char(char),
    /// The empty string, written as an empty group `()`.
    Epsilon,
    /// Concatenation of two or more expressions, in order.
    Concat(Vec<Ast>),
    /// Alternation between two or more expressions.
    Alt(Vec<Ast>),
    /// Zero-or-more repetition.
    Star(Box<Ast>),
    /// One-or-more repetition.
    Plus(Box<Ast>),
    /// Optional expression.
    Opt(Box<Ast>),
}

impl Ast {
    /// Lexes and parses `pattern` into an AST.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] when the pattern violates the grammar.
    pub fn build(pattern: &str) -> Result<Ast, ParseError> {
        let tokens = lexer::lex(pattern)?;
        parser::parse(&tokens)
    }

    /// Creates a Kleene star node.
    #[must_use]
    pub fn star(inner: Ast) -> Ast {
        Ast::Star(Box::new(inner))
    }

    /// Creates a one-or-more node.
    #[must_use]
    pub fn plus(inner: Ast) -> Ast {
        Ast::Plus(Box::new(inner))
    }

    /// Creates an optional node.
    #[must_use]
    pub fn opt(inner: Ast) -> Ast {
        Ast::Opt(Box::new(inner))
    }
}

/// Renders the tree back into pattern syntax, re-escaping literal operators.
impl fmt::Display for Ast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ast::Char(c) => {
                if is_operator(*c) {
                    write!(f, "\\{c}")
                } else {
                    write!(f, "{c}")
                }
            }
            Ast::Epsilon => write!(f, "()"),
            Ast::Concat(nodes) => {
                for node in nodes {
                    write!(f, "{node}")?;
                }
                Ok(())
            }
            Ast::Alt(branches) => {
                write!(f, "(")?;
                for (i, branch) in branches.iter().enumerate() {
                    if i > 0 {
                        write!(f, "|")?;
                    }
                    write!(f, "{branch}")?;
                }
                write!(f, ")")
            }
            Ast::Star(inner) => write_suffixed(f, inner, '*'),
            Ast::Plus(inner) => write_suffixed(f, inner, '+'),
            Ast::Opt(inner) => write_suffixed(f, inner, '?'),
        }
    }
}

fn write_suffixed(f: &mut fmt::Formatter<'_>, inner: &Ast, op: char) -> fmt::Result {
    match inner {
        Ast::Concat(_) | Ast::Star(_) | Ast::Plus(_) | Ast::Opt(_) => write!(f, "({inner}){op}"),
        _ => write!(f, "{inner}{op}"),
    }
}

fn is_operator(c: char) -> bool {
    matches!(c, '+' | '*' | '?' | '(' | ')' | '|' | '\\')
}
