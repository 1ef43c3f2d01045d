use std::collections::BTreeSet;

use indexmap::IndexSet;
use tracing::debug;

use crate::core::ast::Ast;
use crate::core::automaton::{EdgeLabel, StateId};
use crate::core::fsm::Fsm;

/// Compiles an [`Ast`] into an ε-NFA using Thompson's construction.
///
/// Every AST node lowers to a fragment with exactly one start and one accept
/// state; fragments are glued together with ε-edges. State ids come from a
/// monotonic counter, and the alphabet of the result is the set of distinct
/// literal symbols in first-seen order.
pub fn compile(ast: &Ast) -> Fsm {
    let mut builder = Builder::default();
    let fragment = builder.build(ast);
    builder.finalize(fragment)
}

/// Accumulates states and edges while walking the AST.
#[derive(Default)]
struct Builder {
    /// Edges as `(from, to, column)`; `None` marks ε until the alphabet is
    /// final.
    edges: Vec<(StateId, StateId, Option<usize>)>,
    /// Number of states allocated so far.
    states: usize,
    /// Literal symbols in first-seen order.
    alphabet: IndexSet<char>,
}

/// A compiled sub-automaton with a single start and a single accept state.
struct Fragment {
    start: StateId,
    accept: StateId,
}

impl Builder {
    /// Allocates a fresh state.
    fn new_state(&mut self) -> StateId {
        let id = self.states as StateId;
        self.states += 1;
        id
    }

    /// Records an edge. Symbol columns are fixed at first sight of the
    /// symbol; `IndexSet` keeps earlier indices stable as later symbols
    /// arrive.
    fn add_edge(&mut self, from: StateId, to: StateId, label: EdgeLabel) {
        let column = match label {
            EdgeLabel::Eps => None,
            EdgeLabel::Sym(c) => Some(self.alphabet.insert_full(c).0),
        };
        self.edges.push((from, to, column));
    }

    /// Compiles one AST node into a fragment.
    fn build(&mut self, ast: &Ast) -> Fragment {
        match ast {
            Ast::Char(c) => self.build_char(*c),
            Ast::Epsilon => self.build_epsilon(),
            Ast::Concat(nodes) => self.build_concat(nodes),
            Ast::Alt(branches) => self.build_alternation(branches),
            Ast::Star(inner) => self.build_star(inner),
            Ast::Plus(inner) => self.build_plus(inner),
            Ast::Opt(inner) => self.build_opt(inner),
        }
    }

    /// `s --c-> f`.
    fn build_char(&mut self, c: char) -> Fragment {
        let start = self.new_state();
        let accept = self.new_state();
        self.add_edge(start, accept, EdgeLabel::Sym(c));
        Fragment { start, accept }
    }

    /// `s --ε-> f`.
    fn build_epsilon(&mut self) -> Fragment {
        let start = self.new_state();
        let accept = self.new_state();
        self.add_edge(start, accept, EdgeLabel::Eps);
        Fragment { start, accept }
    }

    /// Chains the children with ε-edges from each accept to the next start.
    fn build_concat(&mut self, nodes: &[Ast]) -> Fragment {
        let mut chained: Option<Fragment> = None;
        for node in nodes {
            let fragment = self.build(node);
            chained = Some(match chained {
                Some(prev) => {
                    self.add_edge(prev.accept, fragment.start, EdgeLabel::Eps);
                    Fragment {
                        start: prev.start,
                        accept: fragment.accept,
                    }
                }
                None => fragment,
            });
        }
        chained.unwrap_or_else(|| self.build_epsilon())
    }

    /// Fresh start and accept states fanning out over every branch.
    fn build_alternation(&mut self, branches: &[Ast]) -> Fragment {
        let start = self.new_state();
        let accept = self.new_state();
        for branch in branches {
            let fragment = self.build(branch);
            self.add_edge(start, fragment.start, EdgeLabel::Eps);
            self.add_edge(fragment.accept, accept, EdgeLabel::Eps);
        }
        Fragment { start, accept }
    }

    /// Fresh start and accept; the inner accept loops back through the
    /// start, which can also skip to the accept.
    fn build_star(&mut self, inner: &Ast) -> Fragment {
        let fragment = self.build(inner);
        let start = self.new_state();
        let accept = self.new_state();
        self.add_edge(start, fragment.start, EdgeLabel::Eps);
        self.add_edge(fragment.accept, start, EdgeLabel::Eps);
        self.add_edge(start, accept, EdgeLabel::Eps);
        Fragment { start, accept }
    }

    /// The inner fragment runs at least once; its accept either loops back
    /// to its start or exits to a fresh accept.
    fn build_plus(&mut self, inner: &Ast) -> Fragment {
        let fragment = self.build(inner);
        let accept = self.new_state();
        self.add_edge(fragment.accept, fragment.start, EdgeLabel::Eps);
        self.add_edge(fragment.accept, accept, EdgeLabel::Eps);
        Fragment {
            start: fragment.start,
            accept,
        }
    }

    /// Fresh start and accept with a bypass ε-edge around the inner
    /// fragment.
    fn build_opt(&mut self, inner: &Ast) -> Fragment {
        let fragment = self.build(inner);
        let start = self.new_state();
        let accept = self.new_state();
        self.add_edge(start, fragment.start, EdgeLabel::Eps);
        self.add_edge(fragment.accept, accept, EdgeLabel::Eps);
        self.add_edge(start, accept, EdgeLabel::Eps);
        Fragment { start, accept }
    }

    /// Assembles the collected states and edges into an [`Fsm`] whose start
    /// and accept sets are the outermost fragment's endpoints.
    fn finalize(self, fragment: Fragment) -> Fsm {
        let alphabet: Vec<char> = self.alphabet.into_iter().collect();
        let columns = alphabet.len() + 1;
        let mut rows = vec![vec![BTreeSet::new(); columns]; self.states];
        for (from, to, column) in self.edges {
            rows[from as usize][column.unwrap_or(alphabet.len())].insert(to);
        }
        debug!(
            states = self.states,
            symbols = alphabet.len(),
            "thompson construction finished"
        );
        Fsm::from_parts(
            alphabet,
            rows,
            BTreeSet::from([fragment.start]),
            BTreeSet::from([fragment.accept]),
        )
    }
}
