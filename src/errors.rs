use thiserror::Error;

use crate::core::automaton::StateId;

/// Error raised while turning a pattern string into an AST.
///
/// Messages carry no position information; the pattern strings this crate
/// accepts are short enough that the offending character identifies the spot.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// An operator or stray byte appeared where a term was expected.
    #[error("unexpected character '{0}'")]
    UnexpectedChar(char),
    /// A `(` without its `)`, or a `)` without its `(`.
    #[error("unmatched parentheses")]
    UnmatchedParens,
    /// A backslash with nothing after it.
    #[error("invalid escape sequence")]
    InvalidEscape,
    /// The pattern ended where a term was expected.
    #[error("unexpected end of pattern")]
    UnexpectedEnd,
}

/// Precondition violation reported by the [`Fsm`](crate::core::fsm::Fsm)
/// constructors and mutators. Distinct from [`ParseError`]: these mean the
/// caller handed the automaton bad inputs, not that a pattern was malformed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FsmError {
    #[error("state {state} out of range for automaton with {states} states")]
    StateOutOfRange { state: StateId, states: usize },
    #[error("symbol '{0}' not in alphabet")]
    SymbolNotInAlphabet(char),
    #[error("duplicate symbol '{0}' in alphabet")]
    DuplicateSymbol(char),
    #[error("transition row for state {state} has {found} columns, expected {expected}")]
    BadTableRow {
        state: StateId,
        expected: usize,
        found: usize,
    },
}
