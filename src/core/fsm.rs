use std::collections::BTreeSet;
use std::fmt;

use tracing::debug;

use crate::core::automaton::{Edge, EdgeLabel, StateId};
use crate::core::det;
use crate::errors::FsmError;

/// Target set returned for symbols outside the alphabet.
static NO_TARGETS: BTreeSet<StateId> = BTreeSet::new();

/// A finite automaton with ε-transitions over an ordered alphabet.
///
/// States are dense indices `0..n`. The transition relation is stored as one
/// row per state with one column per alphabet symbol plus a trailing ε
/// column; every cell is a set of target states, so parallel edges collapse
/// and missing transitions are empty sets rather than absent entries.
///
/// Mutators ([`connect`](Fsm::connect), [`mark_start`](Fsm::mark_start),
/// [`mark_accept`](Fsm::mark_accept)) are meant for the construction phase.
/// The transforms [`rev`](Fsm::rev), [`det`](Fsm::det) and [`min`](Fsm::min)
/// never touch their receiver; they return fresh values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fsm {
    /// Ordered, duplicate-free alphabet.
    alphabet: Vec<char>,
    /// `rows[q][c]` is the target set of state `q` on column `c`; the last
    /// column is ε.
    rows: Vec<Vec<BTreeSet<StateId>>>,
    /// Start states.
    starts: BTreeSet<StateId>,
    /// Accepting states.
    accepts: BTreeSet<StateId>,
}

impl Fsm {
    /// Creates an automaton with `states` states over `alphabet`, with no
    /// transitions, no start states and no accepting states.
    ///
    /// # Errors
    ///
    /// Returns [`FsmError::DuplicateSymbol`] if the alphabet repeats a symbol.
    pub fn new(states: usize, alphabet: Vec<char>) -> Result<Self, FsmError> {
        check_alphabet(&alphabet)?;
        let columns = alphabet.len() + 1;
        Ok(Self {
            alphabet,
            rows: vec![vec![BTreeSet::new(); columns]; states],
            starts: BTreeSet::new(),
            accepts: BTreeSet::new(),
        })
    }

    /// Creates an automaton from a full transition table.
    ///
    /// `table[q]` lists the targets of state `q` per symbol column, in
    /// alphabet order with the ε column appended after the last symbol.
    /// Duplicate targets within a cell collapse. Start and accept states may
    /// be empty.
    ///
    /// # Errors
    ///
    /// Returns [`FsmError::DuplicateSymbol`] for a repeated alphabet symbol,
    /// [`FsmError::BadTableRow`] for a row with the wrong column count, and
    /// [`FsmError::StateOutOfRange`] for any target, start or accept state
    /// outside `0..table.len()`.
    pub fn from_table(
        alphabet: Vec<char>,
        table: Vec<Vec<Vec<StateId>>>,
        starts: impl IntoIterator<Item = StateId>,
        accepts: impl IntoIterator<Item = StateId>,
    ) -> Result<Self, FsmError> {
        check_alphabet(&alphabet)?;
        let states = table.len();
        let columns = alphabet.len() + 1;

        let mut rows = Vec::with_capacity(states);
        for (state, row) in table.into_iter().enumerate() {
            if row.len() != columns {
                return Err(FsmError::BadTableRow {
                    state: state as StateId,
                    expected: columns,
                    found: row.len(),
                });
            }
            let mut cells = Vec::with_capacity(columns);
            for targets in row {
                let mut cell = BTreeSet::new();
                for target in targets {
                    check_state(target, states)?;
                    cell.insert(target);
                }
                cells.push(cell);
            }
            rows.push(cells);
        }

        let mut fsm = Self {
            alphabet,
            rows,
            starts: BTreeSet::new(),
            accepts: BTreeSet::new(),
        };
        for state in starts {
            fsm.mark_start(state)?;
        }
        for state in accepts {
            fsm.mark_accept(state)?;
        }
        Ok(fsm)
    }

    /// Assembles an automaton from already-validated parts.
    pub(crate) fn from_parts(
        alphabet: Vec<char>,
        rows: Vec<Vec<BTreeSet<StateId>>>,
        starts: BTreeSet<StateId>,
        accepts: BTreeSet<StateId>,
    ) -> Self {
        Self {
            alphabet,
            rows,
            starts,
            accepts,
        }
    }

    /// Adds `to` to the target set of `from` on `label`. Inserting an edge
    /// that already exists has no effect.
    ///
    /// # Errors
    ///
    /// Returns [`FsmError::StateOutOfRange`] if either state is out of range
    /// and [`FsmError::SymbolNotInAlphabet`] if the label is neither ε nor an
    /// alphabet symbol.
    pub fn connect(&mut self, from: StateId, to: StateId, label: EdgeLabel) -> Result<(), FsmError> {
        check_state(from, self.rows.len())?;
        check_state(to, self.rows.len())?;
        let column = match label {
            EdgeLabel::Eps => self.alphabet.len(),
            EdgeLabel::Sym(c) => self
                .alphabet
                .iter()
                .position(|&a| a == c)
                .ok_or(FsmError::SymbolNotInAlphabet(c))?,
        };
        self.rows[from as usize][column].insert(to);
        Ok(())
    }

    /// Marks `state` as a start state.
    ///
    /// # Errors
    ///
    /// Returns [`FsmError::StateOutOfRange`] if `state` is out of range.
    pub fn mark_start(&mut self, state: StateId) -> Result<(), FsmError> {
        check_state(state, self.rows.len())?;
        self.starts.insert(state);
        Ok(())
    }

    /// Marks `state` as an accepting state.
    ///
    /// # Errors
    ///
    /// Returns [`FsmError::StateOutOfRange`] if `state` is out of range.
    pub fn mark_accept(&mut self, state: StateId) -> Result<(), FsmError> {
        check_state(state, self.rows.len())?;
        self.accepts.insert(state);
        Ok(())
    }

    /// Number of states.
    pub fn state_count(&self) -> usize {
        self.rows.len()
    }

    /// The alphabet, in its observable order.
    pub fn alphabet(&self) -> &[char] {
        &self.alphabet
    }

    /// Target set of `state` on `label`. A symbol outside the alphabet has
    /// no targets.
    ///
    /// # Panics
    ///
    /// Panics if `state` is out of range.
    pub fn targets(&self, state: StateId, label: EdgeLabel) -> &BTreeSet<StateId> {
        match self.column(label) {
            Some(column) => &self.rows[state as usize][column],
            None => &NO_TARGETS,
        }
    }

    /// Start states.
    pub fn starts(&self) -> &BTreeSet<StateId> {
        &self.starts
    }

    /// Accepting states.
    pub fn accepts(&self) -> &BTreeSet<StateId> {
        &self.accepts
    }

    /// Flattens the transition relation into an edge list, ordered by source
    /// state, then alphabet column with ε last, then target state.
    pub fn edges(&self) -> Vec<Edge> {
        let mut edges = Vec::new();
        for (from, row) in self.rows.iter().enumerate() {
            for (column, targets) in row.iter().enumerate() {
                let label = self.label_of(column);
                for &to in targets {
                    edges.push(Edge {
                        from: from as StateId,
                        to,
                        label,
                    });
                }
            }
        }
        edges
    }

    /// Reverses the automaton: every edge is flipped and the start and
    /// accept roles are swapped. The result accepts exactly the reversed
    /// strings of this automaton's language, and is generally
    /// nondeterministic even when this automaton is not.
    pub fn rev(&self) -> Fsm {
        let columns = self.alphabet.len() + 1;
        let mut rows = vec![vec![BTreeSet::new(); columns]; self.rows.len()];
        for (from, row) in self.rows.iter().enumerate() {
            for (column, targets) in row.iter().enumerate() {
                for &to in targets {
                    rows[to as usize][column].insert(from as StateId);
                }
            }
        }
        Fsm::from_parts(
            self.alphabet.clone(),
            rows,
            self.accepts.clone(),
            self.starts.clone(),
        )
    }

    /// Determinizes the automaton via subset construction, collapsing
    /// ε-closures on the fly. The result is a partial DFA: exactly one start
    /// state, at most one target per state and symbol, no ε-edges, and a
    /// missing transition means rejection.
    pub fn det(&self) -> Fsm {
        det::determinize(self)
    }

    /// Minimizes the automaton with Brzozowski's double reversal. The result
    /// is the minimal DFA for this automaton's language, up to state
    /// renumbering.
    pub fn min(&self) -> Fsm {
        let minimized = self.rev().det().rev().det();
        debug!(
            states = self.state_count(),
            minimized = minimized.state_count(),
            "minimized automaton"
        );
        minimized
    }

    /// Column index for a label, if the label belongs to this automaton.
    fn column(&self, label: EdgeLabel) -> Option<usize> {
        match label {
            EdgeLabel::Eps => Some(self.alphabet.len()),
            EdgeLabel::Sym(c) => self.alphabet.iter().position(|&a| a == c),
        }
    }

    /// Label carried by a column index.
    fn label_of(&self, column: usize) -> EdgeLabel {
        if column == self.alphabet.len() {
            EdgeLabel::Eps
        } else {
            EdgeLabel::Sym(self.alphabet[column])
        }
    }

    fn print_state(&self, f: &mut fmt::Formatter<'_>, state: StateId) -> fmt::Result {
        let left = if self.starts.contains(&state) { '*' } else { ' ' };
        let right = if self.accepts.contains(&state) { '*' } else { ' ' };
        write!(f, "{left}{state}{right}")
    }
}

/// One line per transition: `*q1* --c-> *q2*` for symbol edges and
/// `*q1* --->> *q2*` for ε-edges, where each state is flanked by `*` on the
/// start side if it is a start state and on the accept side if it accepts.
impl fmt::Display for Fsm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (from, row) in self.rows.iter().enumerate() {
            for (column, targets) in row.iter().enumerate() {
                for &to in targets {
                    self.print_state(f, from as StateId)?;
                    match self.label_of(column) {
                        EdgeLabel::Eps => write!(f, " --->> ")?,
                        EdgeLabel::Sym(c) => write!(f, " --{c}-> ")?,
                    }
                    self.print_state(f, to)?;
                    writeln!(f)?;
                }
            }
        }
        Ok(())
    }
}

fn check_alphabet(alphabet: &[char]) -> Result<(), FsmError> {
    for (i, &c) in alphabet.iter().enumerate() {
        if alphabet[..i].contains(&c) {
            return Err(FsmError::DuplicateSymbol(c));
        }
    }
    Ok(())
}

fn check_state(state: StateId, states: usize) -> Result<(), FsmError> {
    if (state as usize) < states {
        Ok(())
    } else {
        Err(FsmError::StateOutOfRange { state, states })
    }
}
