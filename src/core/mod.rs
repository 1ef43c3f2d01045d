pub mod ast;
pub mod automaton;
pub mod closure;
pub(crate) mod det;
pub mod fsm;
pub mod lexer;
pub mod parser;
pub mod thompson;
pub mod tokens;

use tracing::debug;

use self::ast::Ast;
use self::fsm::Fsm;
use crate::errors::ParseError;

/// Compiles a regex pattern into an ε-NFA.
///
/// # Errors
///
/// Returns a [`ParseError`] when the pattern violates the grammar.
pub fn build_fsm(pattern: &str) -> Result<Fsm, ParseError> {
    let ast = Ast::build(pattern)?;
    let fsm = thompson::compile(&ast);
    debug!(pattern, states = fsm.state_count(), "compiled pattern");
    Ok(fsm)
}

/// Compiles a regex pattern straight to its minimal DFA.
///
/// # Errors
///
/// Returns a [`ParseError`] when the pattern violates the grammar.
pub fn min_regex(pattern: &str) -> Result<Fsm, ParseError> {
    Ok(build_fsm(pattern)?.min())
}
