use std::collections::BTreeSet;

use crate::core::automaton::{EdgeLabel, StateId};
use crate::core::fsm::Fsm;

/// Computes the ε-closure of every state: `closures[q]` is the set of states
/// reachable from `q` by zero or more ε-transitions, including `q` itself.
///
/// The result is reflexive and transitively closed; ε-cycles are handled by
/// the membership test on insertion.
pub fn epsilon_closures(fsm: &Fsm) -> Vec<BTreeSet<StateId>> {
    (0..fsm.state_count() as StateId)
        .map(|state| close(fsm, state))
        .collect()
}

fn close(fsm: &Fsm, state: StateId) -> BTreeSet<StateId> {
    let mut closure = BTreeSet::from([state]);
    let mut stack = vec![state];
    while let Some(next) = stack.pop() {
        for &target in fsm.targets(next, EdgeLabel::Eps) {
            if closure.insert(target) {
                stack.push(target);
            }
        }
    }
    closure
}
