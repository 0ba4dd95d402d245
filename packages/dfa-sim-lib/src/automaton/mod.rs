use std::{
    fmt::Debug,
    hash::{Hash, Hasher},
};

use hashbrown::{Equivalent, HashMap};
use itertools::Itertools;

pub mod builtin;
pub mod check;
pub mod description;
pub mod graph;
pub mod simulation;

/// Flat transition table, keyed by `(state, symbol)`.
pub type TransitionTable = HashMap<(String, String), String>;

/// A deterministic finite automaton over string states and string symbols.
///
/// Nothing about the shape is enforced on construction: the start state and the
/// final states do not have to be listed in `states`, and the transition table
/// may be partial. [`Dfa::is_valid`] checks totality, [`Dfa::report`] collects
/// the remaining inconsistencies, and [`Dfa::process_string`] tolerates all of
/// them.
#[derive(Clone, PartialEq, Eq)]
pub struct Dfa {
    states: Vec<String>,
    alphabet: Vec<String>,
    transitions: TransitionTable,
    start_state: String,
    final_states: Vec<String>,
}

impl Dfa {
    pub fn new(
        states: Vec<String>,
        alphabet: Vec<String>,
        transitions: TransitionTable,
        start_state: String,
        final_states: Vec<String>,
    ) -> Self {
        Dfa {
            states,
            alphabet,
            transitions,
            start_state,
            final_states,
        }
    }

    pub fn states(&self) -> &[String] {
        &self.states
    }

    pub fn alphabet(&self) -> &[String] {
        &self.alphabet
    }

    pub fn transitions(&self) -> &TransitionTable {
        &self.transitions
    }

    pub fn start_state(&self) -> &str {
        &self.start_state
    }

    pub fn final_states(&self) -> &[String] {
        &self.final_states
    }

    pub fn has_symbol(&self, symbol: &str) -> bool {
        self.alphabet.iter().any(|s| s == symbol)
    }

    pub fn has_state(&self, state: &str) -> bool {
        self.states.iter().any(|s| s == state)
    }

    pub fn is_final(&self, state: &str) -> bool {
        self.final_states.iter().any(|s| s == state)
    }

    /// Looks up the destination of `(state, symbol)` without allocating a key.
    pub fn transition(&self, state: &str, symbol: &str) -> Option<&str> {
        self.transitions
            .get(&TransitionKey(state, symbol))
            .map(|s| s.as_str())
    }

    /// Transitions sorted by source state and symbol, for stable output.
    pub fn sorted_transitions(&self) -> Vec<(&str, &str, &str)> {
        self.transitions
            .iter()
            .map(|((from, symbol), to)| (from.as_str(), symbol.as_str(), to.as_str()))
            .sorted()
            .collect_vec()
    }
}

/// Borrowed form of a transition table key. Hashes exactly like
/// `(String, String)` so it can be used for lookups.
#[derive(Debug, Clone, Copy)]
struct TransitionKey<'a>(&'a str, &'a str);

impl Hash for TransitionKey<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
        self.1.hash(state);
    }
}

impl Equivalent<(String, String)> for TransitionKey<'_> {
    fn equivalent(&self, key: &(String, String)) -> bool {
        self.0 == key.0 && self.1 == key.1
    }
}

impl Debug for Dfa {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dfa")
            .field("states", &self.states)
            .field("alphabet", &self.alphabet)
            .field("start_state", &self.start_state)
            .field("final_states", &self.final_states)
            .field("transition_count", &self.transitions.len())
            .field(
                "transitions",
                &self
                    .sorted_transitions()
                    .into_iter()
                    .map(|(from, symbol, to)| format!("{from} --- {symbol} --> {to}"))
                    .collect_vec(),
            )
            .finish()
    }
}
