//! Subset construction for turning an epsilon-free automaton into a
//! deterministic one.

use crate::automaton::model::Automaton;
use crate::automaton::state::{StateId, StateSet};
use crate::automaton::symbol::SymbolId;
use indexmap::IndexMap;
use log::{debug, warn};
use std::collections::{HashMap, HashSet};

/// Convert an automaton to a deterministic one using the powerset
/// construction.
///
/// Epsilon rules are ignored; run [`Automaton::remove_epsilon`] first. Only
/// subsets reachable from the initial state become states. Each one is named
/// by joining the sorted names of its members with `_`.
pub fn subset_construction(nfa: &Automaton) -> Automaton {
    let num_symbols = nfa.alphabet.len() as SymbolId;

    // Sorted member lists of NFA states -> DFA state ids, in creation order
    let mut state_mapping: IndexMap<Vec<StateId>, StateId> = IndexMap::new();
    let mut transitions: HashMap<(StateId, SymbolId), StateSet> = HashMap::new();
    let mut final_states = StateSet::with_capacity(16);

    let initial_set = StateSet::singleton(nfa.initial_state, nfa.num_states());
    state_mapping.insert(initial_set.to_vec(), 0);
    let mut worklist: Vec<(StateSet, StateId)> = vec![(initial_set, 0)];

    while let Some((current_nfa_set, current_dfa_state)) = worklist.pop() {
        if current_nfa_set.intersects(&nfa.final_states) {
            final_states.insert(current_dfa_state);
        }

        for symbol in 0..num_symbols {
            let next_nfa_set = nfa.move_on_symbol(&current_nfa_set, symbol);
            if next_nfa_set.is_empty() {
                continue;
            }

            let next_vec = next_nfa_set.to_vec();
            let next_dfa_state = match state_mapping.get(&next_vec) {
                Some(&existing) => existing,
                None => {
                    let new_state = state_mapping.len() as StateId;
                    state_mapping.insert(next_vec, new_state);
                    worklist.push((next_nfa_set, new_state));
                    new_state
                }
            };

            transitions
                .entry((current_dfa_state, symbol))
                .or_insert_with(|| StateSet::with_capacity(1))
                .insert(next_dfa_state);
        }
    }

    let states: Vec<String> = state_mapping
        .keys()
        .map(|members| canonical_name(nfa, members))
        .collect();

    let mut seen = HashSet::with_capacity(states.len());
    for name in &states {
        if !seen.insert(name.as_str()) {
            warn!("determinized states share the name '{name}'");
        }
    }

    debug!(
        "subset construction: {} states -> {} states",
        nfa.num_states(),
        states.len()
    );

    Automaton {
        states,
        alphabet: nfa.alphabet.clone(),
        transitions,
        initial_state: 0,
        final_states,
    }
}

/// Underscore-joined member names in lexicographic order.
fn canonical_name(nfa: &Automaton, members: &[StateId]) -> String {
    let mut names: Vec<&str> = members
        .iter()
        .map(|&state| nfa.states[state as usize].as_str())
        .collect();
    names.sort_unstable();
    names.join("_")
}

impl Automaton {
    /// Equivalent deterministic automaton. See [`subset_construction`].
    pub fn determinize(&self) -> Automaton {
        subset_construction(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subset_construction_basic() {
        // 0 -a-> 1, 0 -a-> 2, 1 -b-> 3(final), 2 -b-> 3(final)
        let nfa = Automaton::parse(
            "({s0,s1,s2,s3},{'a','b'},{s0 'a' -> s1, s0 'a' -> s2, s1 'b' -> s3, s2 'b' -> s3},s0,{s3})",
        )
        .unwrap();

        let dfa = subset_construction(&nfa);

        assert!(dfa.is_deterministic());
        assert_eq!(
            dfa.rules(),
            vec![("s0", Some('a'), "s1_s2"), ("s1_s2", Some('b'), "s3")]
        );
        assert_eq!(dfa.final_states().collect::<Vec<_>>(), vec!["s3"]);
        assert_eq!(dfa.initial_state(), "s0");
    }

    #[test]
    fn test_subset_construction_drops_unreachable_states() {
        let nfa = Automaton::parse("({a,b,c},{'x'},{a 'x' -> b, c 'x' -> a},a,{c})").unwrap();
        let dfa = nfa.determinize();
        let mut states: Vec<&str> = dfa.states().collect();
        states.sort_unstable();
        assert_eq!(states, vec!["a", "b"]);
        assert_eq!(dfa.final_states().count(), 0);
    }

    #[test]
    fn test_determinize_after_remove_epsilon() {
        let nfa = Automaton::parse(
            "({q0,q1,q2},{'a','b'},{q0 '' -> q1, q0 'a' -> q0, q1 'b' -> q2, q1 'a' -> q2},q0,{q2})",
        )
        .unwrap();
        let dfa = nfa.remove_epsilon().determinize();

        assert!(dfa.is_deterministic());
        assert_eq!(
            dfa.rules(),
            vec![
                ("q0", Some('a'), "q0_q2"),
                ("q0", Some('b'), "q2"),
                ("q0_q2", Some('a'), "q0_q2"),
                ("q0_q2", Some('b'), "q2"),
            ]
        );
        let mut finals: Vec<&str> = dfa.final_states().collect();
        finals.sort_unstable();
        assert_eq!(finals, vec!["q0_q2", "q2"]);

        for input in ["", "a", "b", "ab", "aab", "ba", "aaa"] {
            assert_eq!(nfa.accepts(input), dfa.accepts(input), "{input:?}");
        }
    }

    #[test]
    fn test_canonical_names_sort_members() {
        let nfa = Automaton::parse("({zeta,alpha,mid},{'a'},{zeta 'a' -> mid, zeta 'a' -> alpha},zeta,{})")
            .unwrap();
        let dfa = nfa.determinize();
        assert!(dfa.states().any(|name| name == "alpha_mid"));
    }

    #[test]
    fn test_name_collision_keeps_states_apart() {
        // {a, b} and {a_b} both serialize as "a_b" but stay distinct states
        let nfa = Automaton::parse(
            "({s,a,b,a_b},{'x','y'},{s 'x' -> a, s 'x' -> b, s 'y' -> a_b, a_b 'x' -> s},s,{a})",
        )
        .unwrap();
        let dfa = nfa.determinize();
        assert_eq!(dfa.num_states(), 3);
        assert_eq!(dfa.states().filter(|&name| name == "a_b").count(), 2);
        assert_eq!(dfa.accepts("x"), Ok(true));
        assert_eq!(dfa.accepts("yx"), Ok(false));
        assert_eq!(dfa.accepts("yxx"), Ok(true));
    }

    #[test]
    fn test_determinize_is_stable() {
        let nfa = Automaton::parse(
            "({p,q,r},{'0','1'},{p '0' -> p, p '0' -> q, p '1' -> p, q '1' -> r, r '0' -> r, r '1' -> r},p,{r})",
        )
        .unwrap();
        assert_eq!(nfa.determinize().to_string(), nfa.determinize().to_string());
    }
}
