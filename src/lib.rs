//! Finite automata with ε-transitions and the transformations that make
//! them useful: reversal, subset construction, and Brzozowski minimization
//! (`rev ∘ det ∘ rev ∘ det`), plus a small regex front-end compiled with
//! Thompson's construction.
//!
//! The central type is [`Fsm`], an immutable-after-construction value
//! holding an alphabet, a transition relation, and start/accept sets.
//! [`build_fsm`] turns a pattern into an ε-NFA; [`min_regex`] carries it all
//! the way to the minimal DFA:
//!
//! ```
//! use refsm::min_regex;
//!
//! let dfa = min_regex("a(b|c)*").unwrap();
//! assert_eq!(dfa.state_count(), 2);
//! ```

pub mod core;
pub mod errors;

pub use crate::core::ast::Ast;
pub use crate::core::automaton::{Edge, EdgeLabel, StateId};
pub use crate::core::fsm::Fsm;
pub use crate::core::{build_fsm, min_regex};
pub use crate::errors::{FsmError, ParseError};
