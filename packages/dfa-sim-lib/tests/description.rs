use dfa_sim_lib::{
    automaton::{Dfa, builtin::BuiltinMachine, description::DfaDescription},
    validation::{assert_same_behaviour, same_behaviour, same_language},
};

fn parse(json: &str) -> DfaDescription {
    serde_json::from_str(json).unwrap()
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_nested_transitions_are_flattened() {
    let dfa = Dfa::from(parse(
        r#"{
            "states": ["q0", "q1"],
            "alphabet": ["0", "1"],
            "transitions": { "q0": { "0": "q0", "1": "q1" }, "q1": { "0": "q1", "1": "q0" } },
            "start_state": "q0",
            "final_states": ["q0"]
        }"#,
    ));

    assert_eq!(dfa.transitions().len(), 4);
    assert_eq!(dfa.transition("q0", "1"), Some("q1"));
    assert_eq!(dfa.transition("q1", "1"), Some("q0"));
    assert_eq!(dfa, Dfa::even_ones());
}

#[test]
fn test_camel_case_spelling() {
    let description = parse(
        r#"{
            "states": ["a"],
            "alphabet": ["x"],
            "transitions": {},
            "startState": "a",
            "finalStates": ["a"]
        }"#,
    );

    assert_eq!(description.start_state(), "a");
    assert_eq!(description.final_states(), strings(&["a"]));
}

#[test]
fn test_snake_case_wins_over_camel_case() {
    let description = parse(
        r#"{
            "start_state": "snake",
            "startState": "camel",
            "final_states": ["snake"],
            "finalStates": ["camel"]
        }"#,
    );

    assert_eq!(description.start_state(), "snake");
    assert_eq!(description.final_states(), strings(&["snake"]));
}

#[test]
fn test_empty_snake_case_falls_back_to_camel_case() {
    let description = parse(
        r#"{
            "start_state": "",
            "startState": "camel",
            "final_states": [],
            "finalStates": ["camel"]
        }"#,
    );

    assert_eq!(description.start_state(), "camel");
    assert_eq!(description.final_states(), strings(&["camel"]));
}

#[test]
fn test_null_spellings() {
    let description = parse(
        r#"{
            "start_state": null,
            "startState": "camel",
            "final_states": null,
            "finalStates": null
        }"#,
    );

    assert_eq!(description.start_state(), "camel");
    assert!(description.final_states().is_empty());
}

#[test]
fn test_missing_fields_default_to_empty() {
    let description = parse("{}");
    let dfa = Dfa::from(&description);

    assert!(dfa.states().is_empty());
    assert!(dfa.alphabet().is_empty());
    assert!(dfa.transitions().is_empty());
    assert_eq!(dfa.start_state(), "");
    assert!(dfa.final_states().is_empty());

    let run = dfa.process_string("0");
    assert!(!run.accepted());
    assert_eq!(run.trace, strings(&[""]));
    assert_eq!(run.message(), "Invalid symbol: 0");
}

#[test]
fn test_unknown_fields_are_ignored() {
    let description = parse(
        r#"{
            "states": ["q0"],
            "alphabet": ["0"],
            "transitions": { "q0": { "0": "q0" } },
            "startState": "q0",
            "finalStates": ["q0"],
            "labels": { "q0": "Even 1s" }
        }"#,
    );

    assert!(Dfa::from(description).process_string("000").accepted());
}

#[test]
fn test_round_trip_through_description() {
    let default = Dfa::even_ones();
    let description = default.to_description();

    let json = serde_json::to_string(&description).unwrap();
    assert!(json.contains("\"start_state\":\"q0\""));
    assert!(!json.contains("startState"));

    let rebuilt = Dfa::from(DfaDescription::from_json(&json).unwrap());

    assert_eq!(rebuilt, default);
    assert_same_behaviour(&default, &rebuilt, 8);
}

#[test]
fn test_hand_written_description_behaves_like_default() {
    // what the frontend sends for its first challenge
    let frontend = Dfa::from(parse(
        r#"{
            "states": ["q0", "q1"],
            "alphabet": ["0", "1"],
            "transitions": { "q0": { "0": "q0", "1": "q1" }, "q1": { "0": "q1", "1": "q0" } },
            "startState": "q0",
            "finalStates": ["q0"]
        }"#,
    ));

    assert!(same_behaviour(&frontend, &BuiltinMachine::EvenOnes.build(), 8));
}

#[test]
fn test_same_language_but_different_traces() {
    let renamed = Dfa::from(parse(
        r#"{
            "states": ["even", "odd"],
            "alphabet": ["0", "1"],
            "transitions": { "even": { "0": "even", "1": "odd" }, "odd": { "0": "odd", "1": "even" } },
            "start_state": "even",
            "final_states": ["even"]
        }"#,
    ));

    assert!(same_language(&renamed, &Dfa::even_ones(), 6));
    assert!(!same_behaviour(&renamed, &Dfa::even_ones(), 6));
}
