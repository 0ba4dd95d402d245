use std::{fmt::Display, str::FromStr};

use crate::automaton::{Dfa, TransitionTable};

/// Machines that can be selected by identifier instead of being described.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BuiltinMachine {
    /// Binary strings with an even number of `1`s.
    #[default]
    EvenOnes,
}

impl BuiltinMachine {
    pub fn all() -> &'static [BuiltinMachine] {
        &[BuiltinMachine::EvenOnes]
    }

    pub fn id(&self) -> &'static str {
        match self {
            BuiltinMachine::EvenOnes => "even_ones",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            BuiltinMachine::EvenOnes => "Accept strings with an even number of 1s.",
        }
    }

    pub fn build(&self) -> Dfa {
        match self {
            BuiltinMachine::EvenOnes => Dfa::even_ones(),
        }
    }
}

impl FromStr for BuiltinMachine {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BuiltinMachine::all()
            .iter()
            .find(|m| m.id() == s)
            .copied()
            .ok_or_else(|| format!("Unknown machine: {}", s))
    }
}

impl Display for BuiltinMachine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}

impl Dfa {
    /// `q0` counts an even number of `1`s so far and is accepting, `q1` an odd
    /// number. `0` keeps the state, `1` flips it.
    pub fn even_ones() -> Dfa {
        let transitions: TransitionTable = [
            (("q0", "0"), "q0"),
            (("q0", "1"), "q1"),
            (("q1", "0"), "q1"),
            (("q1", "1"), "q0"),
        ]
        .into_iter()
        .map(|((from, symbol), to)| ((from.to_string(), symbol.to_string()), to.to_string()))
        .collect();

        Dfa::new(
            vec!["q0".to_string(), "q1".to_string()],
            vec!["0".to_string(), "1".to_string()],
            transitions,
            "q0".to_string(),
            vec!["q0".to_string()],
        )
    }
}
