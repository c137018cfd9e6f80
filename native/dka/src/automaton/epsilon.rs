//! Epsilon closures and epsilon rule elimination.

use crate::automaton::model::Automaton;
use crate::automaton::state::{StateId, StateSet};
use crate::automaton::symbol::{EPSILON, SymbolId, is_epsilon};
use log::debug;
use std::collections::HashMap;

impl Automaton {
    pub fn has_epsilon_rules(&self) -> bool {
        self.transitions.keys().any(|&(_, symbol)| is_epsilon(symbol))
    }

    /// States reachable from `state` through zero or more epsilon rules,
    /// `state` itself included.
    pub fn epsilon_closure(&self, state: StateId) -> StateSet {
        self.epsilon_closure_of(&StateSet::singleton(state, self.num_states()))
    }

    /// Epsilon closure of a set of states, computed with a worklist.
    pub(crate) fn epsilon_closure_of(&self, states: &StateSet) -> StateSet {
        let mut closure = states.clone();
        let mut stack: Vec<StateId> = states.iter().collect();

        while let Some(s) = stack.pop() {
            if let Some(destinations) = self.transitions.get(&(s, EPSILON)) {
                for dest in destinations.iter() {
                    if closure.insert(dest) {
                        stack.push(dest);
                    }
                }
            }
        }

        closure
    }

    /// Closures of every state, indexed by `StateId`.
    fn epsilon_closures(&self) -> Vec<StateSet> {
        (0..self.num_states() as StateId)
            .map(|state| self.epsilon_closure(state))
            .collect()
    }

    /// States reached from `states` by one rule on `symbol`, without closing
    /// over epsilon rules afterwards.
    pub(crate) fn move_on_symbol(&self, states: &StateSet, symbol: SymbolId) -> StateSet {
        let mut reached = StateSet::with_capacity(self.num_states());
        for state in states.iter() {
            if let Some(destinations) = self.transitions.get(&(state, symbol)) {
                reached.union_with(destinations);
            }
        }
        reached
    }

    /// Build an equivalent automaton without epsilon rules.
    ///
    /// Each state `p` receives every non-epsilon rule leaving a state of its
    /// closure, and becomes final when its closure holds a final state. The
    /// state set is kept as is, unreachable states included.
    pub fn remove_epsilon(&self) -> Automaton {
        let num_states = self.num_states();
        let closures = self.epsilon_closures();
        let mut transitions: HashMap<(StateId, SymbolId), StateSet> = HashMap::new();
        let mut final_states = StateSet::with_capacity(num_states);

        for (p, closure) in closures.iter().enumerate() {
            let p = p as StateId;
            for q in closure.iter() {
                for symbol in 0..self.alphabet.len() as SymbolId {
                    if let Some(targets) = self.transitions.get(&(q, symbol)) {
                        transitions
                            .entry((p, symbol))
                            .or_insert_with(|| StateSet::with_capacity(num_states))
                            .union_with(targets);
                    }
                }
            }
            if closure.intersects(&self.final_states) {
                final_states.insert(p);
            }
        }

        let result = Automaton {
            states: self.states.clone(),
            alphabet: self.alphabet.clone(),
            transitions,
            initial_state: self.initial_state,
            final_states,
        };
        debug!(
            "removed epsilon rules: {} rules before, {} after",
            self.transitions().count(),
            result.transitions().count()
        );
        result
    }
}
