//! Property-based tests for parsing, epsilon elimination and determinization.

use dka::automaton::Automaton;
use proptest::prelude::*;

/// Generated description: state count, alphabet, rules as index triples
/// (`None` symbol = epsilon), initial index and final indices.
#[derive(Debug, Clone)]
struct Machine {
    num_states: usize,
    alphabet: Vec<char>,
    rules: Vec<(usize, Option<usize>, usize)>,
    initial: usize,
    finals: Vec<usize>,
}

fn literal(symbol: Option<char>) -> String {
    match symbol {
        None => "''".to_owned(),
        Some('\'') => "''''".to_owned(),
        Some(c) => format!("'{c}'"),
    }
}

impl Machine {
    fn state(&self, index: usize) -> String {
        format!("q{index}")
    }

    /// Render as description text. `reversed` lists states and rules in the
    /// opposite order, which changes internal ids but not the automaton.
    fn render(&self, reversed: bool) -> String {
        let mut states: Vec<String> = (0..self.num_states).map(|i| self.state(i)).collect();
        let mut rules: Vec<String> = self
            .rules
            .iter()
            .map(|&(origin, symbol, target)| {
                format!(
                    "{} {} -> {}",
                    self.state(origin),
                    literal(symbol.map(|s| self.alphabet[s])),
                    self.state(target)
                )
            })
            .collect();
        if reversed {
            states.reverse();
            rules.reverse();
        }
        let alphabet: Vec<String> = self.alphabet.iter().map(|&c| literal(Some(c))).collect();
        let finals: Vec<String> = self.finals.iter().map(|&i| self.state(i)).collect();

        format!(
            "(\n{{{}}},\n{{{}}},\n{{\n{}\n}},\n{},\n{{{}}}\n)",
            states.join(", "),
            alphabet.join(", "),
            rules.join(",\n"),
            self.state(self.initial),
            finals.join(", ")
        )
    }
}

fn machine_strategy() -> impl Strategy<Value = Machine> {
    (1usize..=4, prop::sample::subsequence(vec!['a', 'b', '\''], 1..=3)).prop_flat_map(
        |(num_states, alphabet)| {
            let num_symbols = alphabet.len();
            (
                prop::collection::vec(
                    (0..num_states, prop::option::of(0..num_symbols), 0..num_states),
                    0..10,
                ),
                0..num_states,
                prop::sample::subsequence((0..num_states).collect::<Vec<_>>(), 0..=num_states),
            )
                .prop_map(move |(rules, initial, finals)| Machine {
                    num_states,
                    alphabet: alphabet.clone(),
                    rules,
                    initial,
                    finals,
                })
        },
    )
}

fn machine_and_inputs() -> impl Strategy<Value = (Machine, Vec<String>)> {
    machine_strategy().prop_flat_map(|machine| {
        let word = prop::collection::vec(prop::sample::select(machine.alphabet.clone()), 0..6)
            .prop_map(|chars| chars.into_iter().collect::<String>());
        (Just(machine), prop::collection::vec(word, 1..8))
    })
}

proptest! {
    #[test]
    fn prop_round_trip(machine in machine_strategy()) {
        let automaton = Automaton::parse(&machine.render(false)).unwrap();
        let serialized = automaton.to_string();
        let reparsed = Automaton::parse(&serialized).unwrap();
        prop_assert_eq!(&automaton, &reparsed);
        prop_assert_eq!(serialized, reparsed.to_string());
    }

    #[test]
    fn prop_remove_epsilon_is_idempotent(machine in machine_strategy()) {
        let automaton = Automaton::parse(&machine.render(false)).unwrap();
        let once = automaton.remove_epsilon();
        prop_assert!(!once.has_epsilon_rules());
        prop_assert_eq!(once.num_states(), automaton.num_states());
        prop_assert_eq!(&once, &once.remove_epsilon());
    }

    #[test]
    fn prop_transforms_preserve_language((machine, inputs) in machine_and_inputs()) {
        let automaton = Automaton::parse(&machine.render(false)).unwrap();
        let free = automaton.remove_epsilon();
        let dfa = free.determinize();

        for input in &inputs {
            let expected = automaton.accepts(input).unwrap();
            prop_assert_eq!(free.accepts(input).unwrap(), expected, "after remove_epsilon: {:?}", input);
            prop_assert_eq!(dfa.accepts(input).unwrap(), expected, "after determinize: {:?}", input);
        }
    }

    #[test]
    fn prop_determinize_is_deterministic(machine in machine_strategy()) {
        let dfa = Automaton::parse(&machine.render(false)).unwrap().remove_epsilon().determinize();
        prop_assert!(dfa.is_deterministic());

        let reparsed = Automaton::parse(&dfa.to_string()).unwrap();
        prop_assert_eq!(&dfa, &reparsed);
    }

    #[test]
    fn prop_determinize_output_is_canonical(machine in machine_strategy()) {
        let forward = Automaton::parse(&machine.render(false)).unwrap().remove_epsilon();
        let backward = Automaton::parse(&machine.render(true)).unwrap().remove_epsilon();
        prop_assert_eq!(forward.determinize().to_string(), forward.determinize().to_string());
        prop_assert_eq!(forward.determinize().to_string(), backward.determinize().to_string());
    }

    #[test]
    fn prop_no_finals_stay_no_finals(mut machine in machine_strategy()) {
        machine.finals.clear();
        let dfa = Automaton::parse(&machine.render(false)).unwrap().remove_epsilon().determinize();
        prop_assert_eq!(dfa.final_states().count(), 0);
    }
}
