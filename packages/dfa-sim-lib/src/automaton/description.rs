use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::automaton::{Dfa, TransitionTable};

/// Nested transition function as clients send it: state -> symbol -> state.
pub type NestedTransitions = BTreeMap<String, BTreeMap<String, String>>;

/// Loosely shaped description of a DFA, as accepted over the wire.
///
/// Every field may be missing. The start state and the final states are
/// accepted in snake_case and in camelCase; [`DfaDescription::start_state`]
/// and [`DfaDescription::final_states`] resolve the two spellings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DfaDescription {
    #[serde(default)]
    pub states: Vec<String>,
    #[serde(default)]
    pub alphabet: Vec<String>,
    #[serde(default)]
    pub transitions: NestedTransitions,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_state: Option<String>,
    #[serde(default, rename = "startState", skip_serializing_if = "Option::is_none")]
    pub start_state_camel: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_states: Option<Vec<String>>,
    #[serde(default, rename = "finalStates", skip_serializing_if = "Option::is_none")]
    pub final_states_camel: Option<Vec<String>>,
}

impl DfaDescription {
    /// The snake_case spelling wins when it is present and non-empty.
    /// Falls back to the camelCase spelling, then to an empty name.
    pub fn start_state(&self) -> String {
        self.start_state
            .as_ref()
            .filter(|s| !s.is_empty())
            .or(self.start_state_camel.as_ref())
            .cloned()
            .unwrap_or_default()
    }

    /// Same precedence as [`DfaDescription::start_state`]; an empty list
    /// counts as absent.
    pub fn final_states(&self) -> Vec<String> {
        self.final_states
            .as_ref()
            .filter(|s| !s.is_empty())
            .or(self.final_states_camel.as_ref())
            .cloned()
            .unwrap_or_default()
    }

    pub fn flatten_transitions(&self) -> TransitionTable {
        self.transitions
            .iter()
            .flat_map(|(state, row)| {
                row.iter()
                    .map(move |(symbol, to)| ((state.clone(), symbol.clone()), to.clone()))
            })
            .collect()
    }

    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl From<&DfaDescription> for Dfa {
    fn from(description: &DfaDescription) -> Self {
        Dfa::new(
            description.states.clone(),
            description.alphabet.clone(),
            description.flatten_transitions(),
            description.start_state(),
            description.final_states(),
        )
    }
}

impl From<DfaDescription> for Dfa {
    fn from(description: DfaDescription) -> Self {
        Dfa::from(&description)
    }
}

impl Dfa {
    /// Nested form of this automaton, using the snake_case keys.
    pub fn to_description(&self) -> DfaDescription {
        let mut transitions = NestedTransitions::new();
        for ((from, symbol), to) in self.transitions() {
            transitions
                .entry(from.clone())
                .or_default()
                .insert(symbol.clone(), to.clone());
        }

        DfaDescription {
            states: self.states().to_vec(),
            alphabet: self.alphabet().to_vec(),
            transitions,
            start_state: Some(self.start_state().to_string()),
            start_state_camel: None,
            final_states: Some(self.final_states().to_vec()),
            final_states_camel: None,
        }
    }
}
