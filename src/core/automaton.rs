use std::fmt;

/// Identifier type for automaton states.
pub type StateId = u32;

/// Labels describing the kind of transition between states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeLabel {
    /// Epsilon transition that consumes no input.
    Eps,
    /// Consumes a specific symbol.
    Sym(char),
}

impl fmt::Display for EdgeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EdgeLabel::Eps => write!(f, "ε"),
            EdgeLabel::Sym(c) => write!(f, "{c}"),
        }
    }
}

/// A flattened representation of a transition, useful for external printers
/// and matchers reading an automaton back out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Edge {
    /// Origin state.
    pub from: StateId,
    /// Destination state.
    pub to: StateId,
    /// Transition label.
    pub label: EdgeLabel,
}
