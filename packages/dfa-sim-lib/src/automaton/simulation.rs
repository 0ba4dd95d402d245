use std::fmt::Display;

use crate::automaton::Dfa;

/// How a run over an input string ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The whole input was consumed and the last state is accepting.
    Accepted,
    /// The whole input was consumed and the last state is not accepting.
    Rejected,
    /// The run stopped at a symbol outside of the alphabet.
    InvalidSymbol(char),
    /// The run stopped because the table has no entry for `(state, symbol)`.
    MissingTransition { state: String, symbol: char },
}

impl Outcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Outcome::Accepted)
    }

    /// Whether the run stopped before the end of the input.
    pub fn stopped_early(&self) -> bool {
        matches!(
            self,
            Outcome::InvalidSymbol(_) | Outcome::MissingTransition { .. }
        )
    }
}

impl Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Accepted => write!(f, "Accepted"),
            Outcome::Rejected => write!(f, "Rejected"),
            Outcome::InvalidSymbol(symbol) => write!(f, "Invalid symbol: {symbol}"),
            Outcome::MissingTransition { state, symbol } => {
                write!(f, "No transition from {state} on {symbol}")
            }
        }
    }
}

/// The result of [`Dfa::process_string`]: the verdict together with every
/// state that was visited, starting with the start state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Simulation {
    pub outcome: Outcome,
    pub trace: Vec<String>,
}

impl Simulation {
    pub fn accepted(&self) -> bool {
        self.outcome.is_accepted()
    }

    pub fn message(&self) -> String {
        self.outcome.to_string()
    }

    /// Number of input symbols consumed before the run ended.
    pub fn consumed(&self) -> usize {
        self.trace.len().saturating_sub(1)
    }

    pub fn final_state(&self) -> Option<&str> {
        self.trace.last().map(|s| s.as_str())
    }
}

impl Dfa {
    /// Runs `input` through the transition table, one `char` per symbol.
    ///
    /// Never fails: a symbol outside the alphabet or a hole in the table ends
    /// the run with a rejecting [`Outcome`] and the trace collected so far.
    pub fn process_string(&self, input: &str) -> Simulation {
        let mut current = self.start_state();
        let mut trace = vec![current.to_string()];
        let mut buf = [0u8; 4];

        for symbol in input.chars() {
            let symbol_str: &str = symbol.encode_utf8(&mut buf);

            if !self.has_symbol(symbol_str) {
                tracing::debug!("Invalid symbol {:?} after {} steps", symbol, trace.len() - 1);
                return Simulation {
                    outcome: Outcome::InvalidSymbol(symbol),
                    trace,
                };
            }

            let Some(next) = self.transition(current, symbol_str) else {
                tracing::debug!("No transition from {} on {:?}", current, symbol);
                return Simulation {
                    outcome: Outcome::MissingTransition {
                        state: current.to_string(),
                        symbol,
                    },
                    trace,
                };
            };

            current = next;
            trace.push(current.to_string());
        }

        let outcome = if self.is_final(current) {
            Outcome::Accepted
        } else {
            Outcome::Rejected
        };

        tracing::debug!(
            "Consumed {} symbols, ended in {}: {}",
            trace.len() - 1,
            current,
            outcome
        );

        Simulation { outcome, trace }
    }
}
