use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context;
use clap::{Parser, Subcommand};
use colored::Colorize;
use dfa_sim_lib::{
    automaton::{Dfa, description::DfaDescription},
    config::{ConfigFile, GeneralConfig, ServerConfig},
    protocol::{self, SimulateRequest, ValidateResponse},
};

pub mod logger;
pub mod server;

#[derive(Parser, Debug)]
#[command(name = "DFA Simulator")]
#[command(version = "0.1")]
#[command(about = "Run strings through deterministic finite automata", long_about = None)]
struct Args {
    /// TOML file with the server and logger configuration.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP server.
    Serve {
        #[arg(long)]
        host: Option<String>,
        #[arg(short, long)]
        port: Option<u16>,
        #[arg(long)]
        static_dir: Option<PathBuf>,
    },
    /// Run a single input string and print the verdict and the trace.
    Simulate {
        input: String,
        /// JSON file describing the DFA.
        #[arg(short, long)]
        dfa: Option<PathBuf>,
        /// Identifier of a built-in machine.
        #[arg(short, long)]
        machine: Option<String>,
        #[arg(long)]
        json: bool,
    },
    /// Check that a DFA description has a total transition function.
    Validate {
        #[arg(short, long)]
        dfa: PathBuf,
        #[arg(long)]
        json: bool,
    },
    /// Print a DFA in DOT format, optionally highlighting the run on an input.
    Dot {
        #[arg(short, long)]
        dfa: Option<PathBuf>,
        #[arg(short, long)]
        machine: Option<String>,
        #[arg(short, long)]
        input: Option<String>,
    },
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = ServerConfig::from_optional_file(args.config.as_ref())?;
    logger::init(config.logger())?;

    match args.command {
        Command::Serve {
            host,
            port,
            static_dir,
        } => {
            let mut config = config;
            if let Some(host) = host {
                config = config.with_host(host);
            }
            if let Some(port) = port {
                config = config.with_port(port);
            }
            if let Some(static_dir) = static_dir {
                config = config.with_static_dir(static_dir);
            }
            server::serve(config)
        }
        Command::Simulate {
            input,
            dfa,
            machine,
            json,
        } => simulate(input, dfa, machine, json),
        Command::Validate { dfa, json } => validate(dfa, json),
        Command::Dot {
            dfa,
            machine,
            input,
        } => {
            let request = build_request(input.unwrap_or_default(), dfa, machine)?;
            let dfa = protocol::resolve_dfa(&request);
            let input = (!request.input_string.is_empty()).then_some(request.input_string.as_str());
            print!("{}", dfa.to_graphviz(input));
            Ok(())
        }
    }
}

fn read_description(path: &Path) -> anyhow::Result<DfaDescription> {
    let content =
        fs::read_to_string(path).with_context(|| format!("failed to read: {}", path.display()))?;
    DfaDescription::from_json(&content)
        .with_context(|| format!("failed to parse: {}", path.display()))
}

fn build_request(
    input: String,
    dfa: Option<PathBuf>,
    machine: Option<String>,
) -> anyhow::Result<SimulateRequest> {
    let mut request = SimulateRequest::new(input);
    if let Some(machine) = machine {
        request = request.with_dfa_id(machine);
    }
    if let Some(path) = dfa {
        request = request.with_dfa(read_description(&path)?);
    }
    Ok(request)
}

fn simulate(
    input: String,
    dfa: Option<PathBuf>,
    machine: Option<String>,
    json: bool,
) -> anyhow::Result<()> {
    let request = build_request(input, dfa, machine)?;
    let response = protocol::simulate(&request);

    if json {
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(());
    }

    let verdict = if response.accepted {
        response.message.bright_green()
    } else {
        response.message.bright_red()
    };
    println!("{}", verdict);
    println!("{} {}", "trace:".dimmed(), response.trace.join(" -> "));

    Ok(())
}

fn validate(path: PathBuf, json: bool) -> anyhow::Result<()> {
    let dfa = Dfa::from(read_description(&path)?);
    let response = ValidateResponse::from(dfa.report());

    if json {
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(());
    }

    if response.valid {
        println!("{}", response.message.bright_green());
    } else {
        println!("{}", response.message.bright_red());
    }
    for warning in &response.warnings {
        println!("{} {}", "warning:".yellow(), warning);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use dfa_sim_lib::protocol::resolve_dfa;

    use super::*;

    fn write_description(name: &str, json: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "dfa-sim-cli-{}-{}.json",
            name,
            std::process::id()
        ));
        fs::write(&path, json).unwrap();
        path
    }

    const CUSTOM: &str = r#"{
        "states": ["s", "t"],
        "alphabet": ["a"],
        "transitions": { "s": { "a": "t" }, "t": { "a": "s" } },
        "startState": "s",
        "finalStates": ["t"]
    }"#;

    #[test]
    fn test_build_request_without_options() {
        let request = build_request("11".to_string(), None, None).unwrap();

        assert_eq!(request.dfa_id, None);
        assert_eq!(request.dfa, None);
        assert_eq!(resolve_dfa(&request), Dfa::even_ones());
    }

    #[test]
    fn test_build_request_known_machine_wins_over_file() {
        let path = write_description("known", CUSTOM);
        let request =
            build_request("a".to_string(), Some(path.clone()), Some("even_ones".to_string()))
                .unwrap();
        fs::remove_file(&path).unwrap();

        assert!(request.dfa.is_some());
        assert_eq!(resolve_dfa(&request), Dfa::even_ones());
        assert_eq!(protocol::simulate(&request).message, "Invalid symbol: a");
    }

    #[test]
    fn test_build_request_unknown_machine_uses_file() {
        let path = write_description("unknown", CUSTOM);
        let request =
            build_request("a".to_string(), Some(path.clone()), Some("mystery".to_string()))
                .unwrap();
        fs::remove_file(&path).unwrap();

        let response = protocol::simulate(&request);
        assert!(response.accepted);
        assert_eq!(response.trace, vec!["s".to_string(), "t".to_string()]);
    }

    #[test]
    fn test_build_request_reports_bad_files() {
        let missing = std::env::temp_dir().join("dfa-sim-cli-does-not-exist.json");
        let err = build_request(String::new(), Some(missing), None).unwrap_err();
        assert!(err.to_string().starts_with("failed to read"));

        let path = write_description("broken", "{ \"states\": 3 }");
        let err = build_request(String::new(), Some(path.clone()), None).unwrap_err();
        fs::remove_file(&path).unwrap();
        assert!(err.to_string().starts_with("failed to parse"));
    }
}
