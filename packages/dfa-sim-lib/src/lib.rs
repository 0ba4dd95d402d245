pub mod automaton;
pub mod config;
pub mod logger;
pub mod protocol;
pub mod validation;
