use std::collections::{BTreeSet, VecDeque};

use indexmap::IndexMap;
use tracing::{debug, trace};

use crate::core::automaton::{EdgeLabel, StateId};
use crate::core::closure;
use crate::core::fsm::Fsm;

/// Determinizes an ε-NFA into a partial DFA using subset construction.
///
/// DFA state `i` is the `i`-th distinct subset discovered while walking the
/// worklist, with symbols taken in alphabet order, so the numbering is a
/// deterministic function of the input automaton and its alphabet order.
pub(crate) fn determinize(fsm: &Fsm) -> Fsm {
    Determinizer::new(fsm).run()
}

/// Converts a subset of NFA states into its canonical ordered key.
fn set_to_key(set: BTreeSet<StateId>) -> Vec<StateId> {
    set.into_iter().collect()
}

/// Worklist state for one subset construction run.
struct Determinizer<'a> {
    /// The automaton being determinized.
    fsm: &'a Fsm,

    /// Alphabet of the input, reused verbatim for the output.
    alphabet: Vec<char>,

    /// Per-state ε-closures of the input.
    closures: Vec<BTreeSet<StateId>>,

    /// Mapping from canonical subset keys to DFA state ids, in discovery
    /// order.
    map: IndexMap<Vec<StateId>, StateId>,

    /// Queue of subsets whose outgoing transitions are still unexplored.
    queue: VecDeque<Vec<StateId>>,

    /// Transition rows of the DFA being built.
    rows: Vec<Vec<BTreeSet<StateId>>>,
}

impl<'a> Determinizer<'a> {
    fn new(fsm: &'a Fsm) -> Self {
        let closures = closure::epsilon_closures(fsm);

        let mut seed = BTreeSet::new();
        for &state in fsm.starts() {
            seed.extend(closures[state as usize].iter().copied());
        }
        let start_key = set_to_key(seed);

        let mut map = IndexMap::new();
        let mut queue = VecDeque::new();
        map.insert(start_key.clone(), 0 as StateId);
        queue.push_back(start_key);

        Self {
            fsm,
            alphabet: fsm.alphabet().to_vec(),
            closures,
            map,
            queue,
            rows: Vec::new(),
        }
    }

    fn run(mut self) -> Fsm {
        while let Some(key) = self.queue.pop_front() {
            let id = self.map[&key];
            self.ensure_capacity(id as usize + 1);

            for symbol_idx in 0..self.alphabet.len() {
                let symbol = self.alphabet[symbol_idx];
                if let Some(next) = self.advance_subset(&key, symbol) {
                    self.rows[id as usize][symbol_idx].insert(next);
                }
            }
        }

        let accepts = self.collect_accepting();
        debug!(
            input = self.fsm.state_count(),
            subsets = self.map.len(),
            "subset construction finished"
        );
        Fsm::from_parts(self.alphabet, self.rows, BTreeSet::from([0]), accepts)
    }

    /// Ensures the transition rows cover at least `len` DFA states.
    fn ensure_capacity(&mut self, len: usize) {
        while self.rows.len() < len {
            self.rows.push(vec![BTreeSet::new(); self.alphabet.len() + 1]);
        }
    }

    /// Computes the closure-union reached from `subset` on `symbol` and
    /// resolves it to a DFA state, or `None` when nothing is reachable and
    /// the partial DFA keeps no transition.
    fn advance_subset(&mut self, subset: &[StateId], symbol: char) -> Option<StateId> {
        let mut moved = BTreeSet::new();
        for &state in subset {
            for &target in self.fsm.targets(state, EdgeLabel::Sym(symbol)) {
                moved.extend(self.closures[target as usize].iter().copied());
            }
        }
        if moved.is_empty() {
            return None;
        }
        Some(self.lookup_or_insert(moved))
    }

    /// Resolves a subset to its DFA state id, discovering it if new.
    fn lookup_or_insert(&mut self, subset: BTreeSet<StateId>) -> StateId {
        let key = set_to_key(subset);
        if let Some(&id) = self.map.get(&key) {
            id
        } else {
            let id = self.map.len() as StateId;
            trace!(?key, id, "discovered subset");
            self.map.insert(key.clone(), id);
            self.queue.push_back(key);
            id
        }
    }

    /// DFA states whose subset contains an accepting input state.
    fn collect_accepting(&self) -> BTreeSet<StateId> {
        self.map
            .iter()
            .filter_map(|(subset, &id)| {
                let accepting = subset.iter().any(|state| self.fsm.accepts().contains(state));
                accepting.then_some(id)
            })
            .collect()
    }
}
