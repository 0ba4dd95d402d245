use dfa_sim_lib::automaton::{
    Dfa,
    check::{Validity, Warning},
    description::DfaDescription,
};

fn dfa(json: &str) -> Dfa {
    Dfa::from(serde_json::from_str::<DfaDescription>(json).unwrap())
}

#[test]
fn test_even_ones_is_valid() {
    let validity = Dfa::even_ones().is_valid();

    assert!(validity.is_valid());
    assert_eq!(validity, Validity::Valid);
    assert_eq!(validity.message(), "Valid DFA");
}

#[test]
fn test_first_missing_pair_is_reported() {
    // (q0, b) and (q1, a) are both missing, states are iterated first
    let dfa = dfa(r#"{
        "states": ["q0", "q1"],
        "alphabet": ["a", "b"],
        "transitions": { "q0": { "a": "q1" }, "q1": { "b": "q0" } },
        "start_state": "q0",
        "final_states": ["q1"]
    }"#);

    let validity = dfa.is_valid();
    assert!(!validity.is_valid());
    assert_eq!(validity.message(), "Missing transition: (q0, b)");
}

#[test]
fn test_listing_order_decides_first_missing_pair() {
    let dfa = dfa(r#"{
        "states": ["q1", "q0"],
        "alphabet": ["b", "a"],
        "transitions": { "q0": { "a": "q1" }, "q1": { "b": "q0" } },
        "start_state": "q0",
        "final_states": ["q1"]
    }"#);

    assert_eq!(dfa.is_valid().message(), "Missing transition: (q1, a)");
}

#[test]
fn test_empty_description_is_trivially_valid() {
    let dfa = dfa("{}");

    assert!(dfa.is_valid().is_valid());
    assert_eq!(dfa.process_string("").message(), "Rejected");
    assert_eq!(dfa.process_string("a").message(), "Invalid symbol: a");
}

#[test]
fn test_validity_does_not_affect_simulation() {
    let dfa = dfa(r#"{
        "states": ["s", "t"],
        "alphabet": ["a", "b"],
        "transitions": { "s": { "a": "t" } },
        "start_state": "s",
        "final_states": ["t"]
    }"#);

    assert!(!dfa.is_valid().is_valid());
    assert!(dfa.process_string("a").accepted());
}

#[test]
fn test_report_on_clean_dfa() {
    let report = Dfa::even_ones().report();

    assert!(report.is_valid());
    assert!(report.is_clean());
}

#[test]
fn test_report_warnings() {
    let dfa = dfa(r#"{
        "states": ["q0", "q1", "q2"],
        "alphabet": ["a", "c"],
        "transitions": {
            "q0": { "a": "q0", "b": "q1" },
            "q1": { "a": "q9" },
            "q2": { "a": "q2" }
        },
        "start_state": "q0",
        "final_states": ["q1", "q7"]
    }"#);

    let report = dfa.report();

    assert!(!report.is_valid());
    assert_eq!(report.validity.message(), "Missing transition: (q0, c)");
    assert_eq!(
        report.warnings,
        vec![
            Warning::UnknownFinalState("q7".to_string()),
            Warning::UnknownTransitionSymbol {
                state: "q0".to_string(),
                symbol: "b".to_string(),
            },
            Warning::UnknownTransitionState {
                from: "q1".to_string(),
                to: "q9".to_string(),
            },
            // `b` is not in the alphabet, so q0 -b-> q1 can never be taken
            Warning::UnreachableState("q1".to_string()),
            Warning::UnreachableState("q2".to_string()),
        ]
    );
}

#[test]
fn test_report_unknown_start_state() {
    let dfa = dfa(r#"{
        "states": ["q0"],
        "alphabet": ["a"],
        "transitions": { "q0": { "a": "q0" } },
        "startState": "nowhere",
        "finalStates": ["q0"]
    }"#);

    let report = dfa.report();

    assert!(report.is_valid());
    assert_eq!(
        report.warnings,
        vec![Warning::UnknownStartState("nowhere".to_string())]
    );
    assert_eq!(
        report.warnings[0].to_string(),
        "Start state nowhere is not a listed state"
    );
}
