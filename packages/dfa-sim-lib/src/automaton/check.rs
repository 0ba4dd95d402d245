use std::fmt::Display;

use itertools::Itertools;

use crate::automaton::Dfa;

/// Verdict of [`Dfa::is_valid`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validity {
    Valid,
    /// First `(state, symbol)` pair without a transition, in `states x alphabet`
    /// order.
    MissingTransition { state: String, symbol: String },
}

impl Validity {
    pub fn is_valid(&self) -> bool {
        matches!(self, Validity::Valid)
    }

    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl Display for Validity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Validity::Valid => write!(f, "Valid DFA"),
            Validity::MissingTransition { state, symbol } => {
                write!(f, "Missing transition: ({state}, {symbol})")
            }
        }
    }
}

/// Inconsistencies that do not make a DFA invalid but usually point at a
/// mistake in its description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    UnknownStartState(String),
    UnknownFinalState(String),
    UnknownTransitionState { from: String, to: String },
    UnknownTransitionSymbol { state: String, symbol: String },
    UnreachableState(String),
}

impl Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Warning::UnknownStartState(state) => {
                write!(f, "Start state {state} is not a listed state")
            }
            Warning::UnknownFinalState(state) => {
                write!(f, "Final state {state} is not a listed state")
            }
            Warning::UnknownTransitionState { from, to } => {
                write!(f, "Transition {from} -> {to} uses an unlisted state")
            }
            Warning::UnknownTransitionSymbol { state, symbol } => {
                write!(f, "Transition from {state} on {symbol} uses a symbol outside the alphabet")
            }
            Warning::UnreachableState(state) => {
                write!(f, "State {state} is unreachable from the start state")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    pub validity: Validity,
    pub warnings: Vec<Warning>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.validity.is_valid()
    }

    /// Valid and without any warnings.
    pub fn is_clean(&self) -> bool {
        self.is_valid() && self.warnings.is_empty()
    }
}

impl Dfa {
    /// Checks that the transition function is total over `states x alphabet`.
    /// Stops at the first missing pair, iterating states in the outer loop.
    pub fn is_valid(&self) -> Validity {
        self.states
            .iter()
            .cartesian_product(self.alphabet.iter())
            .find(|(state, symbol)| self.transition(state, symbol).is_none())
            .map_or(Validity::Valid, |(state, symbol)| {
                Validity::MissingTransition {
                    state: state.clone(),
                    symbol: symbol.clone(),
                }
            })
    }

    /// Runs [`Dfa::is_valid`] and collects every [`Warning`] about the
    /// description.
    pub fn report(&self) -> ValidationReport {
        let mut warnings = vec![];

        if !self.has_state(&self.start_state) {
            warnings.push(Warning::UnknownStartState(self.start_state.clone()));
        }

        for state in self.final_states.iter().unique() {
            if !self.has_state(state) {
                warnings.push(Warning::UnknownFinalState(state.clone()));
            }
        }

        for (from, symbol, to) in self.sorted_transitions() {
            if !self.has_state(from) || !self.has_state(to) {
                warnings.push(Warning::UnknownTransitionState {
                    from: from.to_string(),
                    to: to.to_string(),
                });
            }
            if !self.has_symbol(symbol) {
                warnings.push(Warning::UnknownTransitionSymbol {
                    state: from.to_string(),
                    symbol: symbol.to_string(),
                });
            }
        }

        if self.has_state(&self.start_state) {
            let reachable = self.reachable_states();
            for state in self.states.iter().unique() {
                if !reachable.contains(state.as_str()) {
                    warnings.push(Warning::UnreachableState(state.clone()));
                }
            }
        }

        ValidationReport {
            validity: self.is_valid(),
            warnings,
        }
    }
}
