use std::collections::BTreeSet;

use refsm::{build_fsm, min_regex, EdgeLabel, Fsm, StateId};

/// Reference ε-closure over the public accessors.
fn eclose(fsm: &Fsm, states: &BTreeSet<StateId>) -> BTreeSet<StateId> {
    let mut closure = states.clone();
    let mut stack: Vec<StateId> = states.iter().copied().collect();
    while let Some(state) = stack.pop() {
        for &target in fsm.targets(state, EdgeLabel::Eps) {
            if closure.insert(target) {
                stack.push(target);
            }
        }
    }
    closure
}

/// Reference ε-NFA simulator over the public accessors.
fn nfa_accepts(fsm: &Fsm, input: &str) -> bool {
    let mut current = eclose(fsm, fsm.starts());
    for ch in input.chars() {
        let mut moved = BTreeSet::new();
        for &state in &current {
            moved.extend(fsm.targets(state, EdgeLabel::Sym(ch)).iter().copied());
        }
        current = eclose(fsm, &moved);
        if current.is_empty() {
            return false;
        }
    }
    current.iter().any(|state| fsm.accepts().contains(state))
}

/// All strings over `symbols` up to `max_len` characters.
fn strings_up_to(symbols: &[char], max_len: usize) -> Vec<String> {
    let mut all = vec![String::new()];
    let mut layer = vec![String::new()];
    for _ in 0..max_len {
        let mut next = Vec::new();
        for prefix in &layer {
            for &symbol in symbols {
                let mut s = prefix.clone();
                s.push(symbol);
                next.push(s);
            }
        }
        all.extend(next.iter().cloned());
        layer = next;
    }
    all
}

fn single_target(fsm: &Fsm, state: StateId, symbol: char) -> Option<StateId> {
    fsm.targets(state, EdgeLabel::Sym(symbol)).iter().next().copied()
}

#[test]
fn test_s5_a_then_b_or_c_star() {
    let min = min_regex("a(b|c)*").unwrap();
    assert_eq!(min.state_count(), 2);
    assert_eq!(min.starts().iter().copied().collect::<Vec<_>>(), vec![0]);
    assert_eq!(min.accepts().iter().copied().collect::<Vec<_>>(), vec![1]);
    assert_eq!(single_target(&min, 0, 'a'), Some(1));
    assert_eq!(single_target(&min, 0, 'b'), None);
    assert_eq!(single_target(&min, 0, 'c'), None);
    assert_eq!(single_target(&min, 1, 'b'), Some(1));
    assert_eq!(single_target(&min, 1, 'c'), Some(1));
    assert_eq!(single_target(&min, 1, 'a'), None);
}

#[test]
fn test_s6_a_plus() {
    let min = min_regex("a+").unwrap();
    assert_eq!(min.state_count(), 2);
    assert_eq!(min.accepts().iter().copied().collect::<Vec<_>>(), vec![1]);
    assert_eq!(single_target(&min, 0, 'a'), Some(1));
    assert_eq!(single_target(&min, 1, 'a'), Some(1));
}

#[test]
fn test_min_output_is_deterministic() {
    let min = build_fsm("(a|b)*ab(a|b)").unwrap().min();
    assert_eq!(min.starts().len(), 1);
    for state in 0..min.state_count() as StateId {
        assert!(min.targets(state, EdgeLabel::Eps).is_empty());
        for &symbol in min.alphabet() {
            assert!(min.targets(state, EdgeLabel::Sym(symbol)).len() <= 1);
        }
    }
}

#[test]
fn test_min_is_idempotent_on_state_count() {
    for pattern in ["a(b|c)*", "(a|b)*ab", "a+b?", "(ab)+"] {
        let min = build_fsm(pattern).unwrap().min();
        assert_eq!(min.min().state_count(), min.state_count(), "{pattern}");
    }
}

#[test]
fn test_min_preserves_language() {
    for pattern in ["a(b|c)*", "(a|b)*ab", "a?b*", "(ab)+", "(a|b)(a|b)"] {
        let nfa = build_fsm(pattern).unwrap();
        let min = nfa.min();
        for input in strings_up_to(&['a', 'b', 'c'], 4) {
            assert_eq!(
                nfa_accepts(&nfa, &input),
                nfa_accepts(&min, &input),
                "{pattern} on {input:?}"
            );
        }
    }
}

#[test]
fn test_min_collapses_redundant_patterns() {
    assert_eq!(
        min_regex("(a|aa)*").unwrap().state_count(),
        min_regex("a*").unwrap().state_count(),
    );
    assert_eq!(
        min_regex("aa*").unwrap().state_count(),
        min_regex("a+").unwrap().state_count(),
    );
    assert_eq!(
        min_regex("(a*)*").unwrap().state_count(),
        min_regex("a*").unwrap().state_count(),
    );
}

#[test]
fn test_min_beats_or_matches_plain_det() {
    for pattern in ["(a|b)*ab", "a(b|c)*", "(aa|ab|ba|bb)*"] {
        let nfa = build_fsm(pattern).unwrap();
        assert!(nfa.min().state_count() <= nfa.det().state_count(), "{pattern}");
    }
}

#[test]
fn test_min_of_empty_language_automaton() {
    // No accepting states at all.
    let mut fsm = Fsm::new(2, vec!['a']).unwrap();
    fsm.connect(0, 1, EdgeLabel::Sym('a')).unwrap();
    fsm.mark_start(0).unwrap();

    let min = fsm.min();
    assert!(min.accepts().is_empty());
    assert!(!nfa_accepts(&min, ""));
    assert!(!nfa_accepts(&min, "a"));
}
