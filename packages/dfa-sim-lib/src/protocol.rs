use serde::{Deserialize, Serialize};

use crate::automaton::{
    Dfa,
    builtin::BuiltinMachine,
    check::ValidationReport,
    description::DfaDescription,
    simulation::Simulation,
};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulateRequest {
    pub input_string: String,
    #[serde(default)]
    pub dfa_id: Option<String>,
    #[serde(default)]
    pub dfa: Option<DfaDescription>,
}

impl SimulateRequest {
    pub fn new(input_string: impl Into<String>) -> Self {
        SimulateRequest {
            input_string: input_string.into(),
            ..Default::default()
        }
    }

    pub fn with_dfa_id(mut self, dfa_id: impl Into<String>) -> Self {
        self.dfa_id = Some(dfa_id.into());
        self
    }

    pub fn with_dfa(mut self, dfa: DfaDescription) -> Self {
        self.dfa = Some(dfa);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulateResponse {
    pub accepted: bool,
    pub trace: Vec<String>,
    pub message: String,
}

impl From<Simulation> for SimulateResponse {
    fn from(simulation: Simulation) -> Self {
        SimulateResponse {
            accepted: simulation.accepted(),
            message: simulation.message(),
            trace: simulation.trace,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidateResponse {
    pub valid: bool,
    pub message: String,
    pub warnings: Vec<String>,
}

impl From<ValidationReport> for ValidateResponse {
    fn from(report: ValidationReport) -> Self {
        ValidateResponse {
            valid: report.is_valid(),
            message: report.validity.message(),
            warnings: report.warnings.iter().map(|w| w.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MachineSummary {
    pub id: String,
    pub description: String,
}

impl From<BuiltinMachine> for MachineSummary {
    fn from(machine: BuiltinMachine) -> Self {
        MachineSummary {
            id: machine.id().to_string(),
            description: machine.description().to_string(),
        }
    }
}

/// Which machine a request ends up running on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Builtin(BuiltinMachine),
    Custom,
    /// The identifier was not recognized and no description was given.
    Fallback(String),
}

/// Decides which machine serves a request. Never fails: a known identifier or
/// an empty request selects the built-in machine, otherwise a supplied
/// description wins, and an unknown identifier without a description falls
/// back to the default machine.
pub fn resolution(request: &SimulateRequest) -> Resolution {
    let builtin = request
        .dfa_id
        .as_deref()
        .and_then(|id| id.parse::<BuiltinMachine>().ok());

    match (&request.dfa_id, &request.dfa, builtin) {
        (Some(_), _, Some(machine)) => Resolution::Builtin(machine),
        (None, None, _) => Resolution::Builtin(BuiltinMachine::default()),
        (_, Some(_), _) => Resolution::Custom,
        (Some(id), None, None) => Resolution::Fallback(id.clone()),
    }
}

pub fn resolve_dfa(request: &SimulateRequest) -> Dfa {
    match (resolution(request), &request.dfa) {
        (Resolution::Builtin(machine), _) => machine.build(),
        (Resolution::Custom, Some(description)) => Dfa::from(description),
        (Resolution::Custom, None) => BuiltinMachine::default().build(),
        (Resolution::Fallback(id), _) => {
            tracing::warn!(
                "Unknown machine {:?}, falling back to {}",
                id,
                BuiltinMachine::default()
            );
            BuiltinMachine::default().build()
        }
    }
}

pub fn simulate(request: &SimulateRequest) -> SimulateResponse {
    let dfa = resolve_dfa(request);
    dfa.process_string(&request.input_string).into()
}
